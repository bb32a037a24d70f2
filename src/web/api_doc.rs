use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use super::api::form::{FieldUpdate, FieldUpdateResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::form::get_form,
        super::api::form::set_field,
        super::api::form::reset_form,
        super::api::predict::submit,
        super::api::predict::status,
    ),
    components(
        schemas(
            FieldUpdate,
            FieldUpdateResponse,
            ErrorResponse,
            crate::form::AsteroidParameters,
            crate::form::Field,
            crate::predict::PredictionResult,
            crate::session::SessionStatus,
            crate::session::PresentationState,
            crate::session::Notification,
            crate::session::NotificationKind,
        )
    ),
    info(
        title = "MOID Predict API",
        description = "Asteroid form state and hazard prediction requests",
        version = "0.1.0"
    ),
    tags(
        (name = "form", description = "Asteroid parameter form"),
        (name = "predict", description = "Prediction submission and status")
    )
)]
pub struct ApiDoc;
