use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::form::{AsteroidParameters, Field, FieldError};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct FieldUpdate {
    /// Raw text as typed into the form
    pub value: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FieldUpdateResponse {
    pub field: Field,
    /// False when the text was not a number and the field kept its value
    pub applied: bool,
    pub value: f64,
}

#[utoipa::path(
    get,
    path = "/api/form",
    responses(
        (status = 200, description = "Current form values", body = AsteroidParameters)
    ),
    tag = "form"
)]
pub async fn get_form(State(state): State<AppState>) -> Json<AsteroidParameters> {
    Json(state.session.params())
}

#[utoipa::path(
    put,
    path = "/api/form/{field}",
    request_body = FieldUpdate,
    params(
        ("field" = String, Path, description = "Field wire name, e.g. semi_major_axis")
    ),
    responses(
        (status = 200, description = "Update processed", body = FieldUpdateResponse),
        (status = 404, description = "Unknown field", body = ErrorResponse)
    ),
    tag = "form"
)]
pub async fn set_field(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(update): Json<FieldUpdate>,
) -> ApiResult<Json<FieldUpdateResponse>> {
    let field: Field = name.parse().map_err(|_| ApiError::UnknownField(name))?;

    let applied = match state.session.set_field(field, &update.value) {
        Ok(_) => true,
        Err(FieldError::Parse { .. }) => false,
        Err(FieldError::Unknown(name)) => return Err(ApiError::UnknownField(name)),
    };

    Ok(Json(FieldUpdateResponse {
        field,
        applied,
        value: state.session.params().get(field),
    }))
}

#[utoipa::path(
    post,
    path = "/api/form/reset",
    responses(
        (status = 200, description = "Form restored to defaults", body = AsteroidParameters)
    ),
    tag = "form"
)]
pub async fn reset_form(State(state): State<AppState>) -> Json<AsteroidParameters> {
    state.session.reset_form();
    Json(state.session.params())
}
