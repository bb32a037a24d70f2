use thiserror::Error;

use crate::predict::PredictError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("a prediction is already in flight")]
    InFlight,
    #[error("prediction failed: {0}")]
    Predict(#[from] PredictError),
    #[error("prediction task aborted: {0}")]
    Aborted(String),
}
