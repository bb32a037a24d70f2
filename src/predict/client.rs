use std::time::Duration;
use url::Url;

use crate::form::AsteroidParameters;

use super::error::PredictError;
use super::types::PredictionResult;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/predict";

/// Client to the external MOID prediction service.
#[derive(Clone, Debug)]
pub struct PredictClient {
    endpoint: Url,
    web: reqwest::Client,
}

impl PredictClient {
    /// Creates a client posting to `endpoint`. Without a timeout a request
    /// waits for as long as the transport keeps the connection open.
    pub fn new(endpoint: Url, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            endpoint,
            web: builder.build()?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Makes a single prediction attempt.
    pub async fn predict(
        &self,
        params: &AsteroidParameters,
    ) -> Result<PredictionResult, PredictError> {
        let response = self
            .web
            .post(self.endpoint.clone())
            .json(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PredictError::Api {
                status: status.to_string(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
