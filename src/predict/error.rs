use thiserror::Error;

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("prediction service returned {status}")]
    Api { status: String },
    #[error("malformed prediction response: {0}")]
    Decode(#[from] serde_json::Error),
}
