use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::api::form as form_handlers;
use super::api::predict as predict_handlers;
use super::api_doc::ApiDoc;
use super::config::{Config, ConfigError};
use super::state::AppState;
use super::ui::handlers as ui_handlers;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // UI routes
        .route("/", get(ui_handlers::index).post(ui_handlers::submit_form))
        // Form API endpoints
        .route("/api/form", get(form_handlers::get_form))
        .route("/api/form/reset", post(form_handlers::reset_form))
        .route("/api/form/{field}", put(form_handlers::set_field))
        // Predict API endpoints
        .route("/api/predict", post(predict_handlers::submit))
        .route("/api/status", get(predict_handlers::status))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: Config) -> Result<(), ServerError> {
    let session = config.build_session()?;
    let bind_addr = config.web.bind.clone();
    log::info!("Forwarding predictions to {}", config.predictor.endpoint);

    let app = router(AppState::new(config, session));

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
