use axum::{extract::State, Json};

use crate::predict::PredictionResult;
use crate::session::SessionStatus;
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[utoipa::path(
    post,
    path = "/api/predict",
    responses(
        (status = 200, description = "Prediction for the current form", body = PredictionResult),
        (status = 409, description = "A prediction is already in flight", body = ErrorResponse),
        (status = 502, description = "Prediction service unreachable or failed", body = ErrorResponse)
    ),
    tag = "predict"
)]
pub async fn submit(State(state): State<AppState>) -> ApiResult<Json<PredictionResult>> {
    let result = state.session.submit().await?;
    Ok(Json(result))
}

#[utoipa::path(
    get,
    path = "/api/status",
    responses(
        (status = 200, description = "Presentation state, form and latest result", body = SessionStatus)
    ),
    tag = "predict"
)]
pub async fn status(State(state): State<AppState>) -> Json<SessionStatus> {
    Json(state.session.status())
}
