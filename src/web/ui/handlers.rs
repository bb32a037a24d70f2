use axum::{extract::State, response::IntoResponse, Form};
use std::collections::HashMap;

use crate::form::Field;
use crate::web::state::AppState;

use super::templates::IndexTemplate;

fn render(state: &AppState) -> IndexTemplate {
    IndexTemplate::new(&state.session.status(), &state.config.predictor.endpoint)
}

pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    render(&state)
}

/// Applies the posted form values, then runs the requested action.
pub async fn submit_form(
    State(state): State<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> impl IntoResponse {
    let session = &state.session;

    if form.get("action").map(String::as_str) == Some("reset") {
        session.reset_form();
    } else {
        for field in Field::ALL {
            if let Some(raw) = form.get(field.name()) {
                // Unparseable text keeps the previous value.
                let _ = session.set_field(field, raw);
            }
        }
        if let Err(e) = session.submit().await {
            log::warn!("Form submission failed: {}", e);
        }
    }

    render(&state)
}
