mod client;
mod error;
mod types;

pub use client::{PredictClient, DEFAULT_ENDPOINT};
pub use error::PredictError;
pub use types::PredictionResult;
