use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::predict::{PredictClient, DEFAULT_ENDPOINT};
use crate::session::Session;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
    #[error("invalid duration {value:?}: {source}")]
    Duration {
        value: String,
        source: humantime::DurationError,
    },
    #[error("duration {value:?} is out of range")]
    OutOfRange { value: String },
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub predictor: PredictorConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        WebConfig {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictorConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Request timeout such as "30s". Requests never time out when unset.
    #[serde(default)]
    pub timeout: Option<String>,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        PredictorConfig {
            endpoint: default_endpoint(),
            timeout: None,
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "default_ttl")]
    pub ttl: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        NotificationConfig { ttl: default_ttl() }
    }
}

fn default_ttl() -> String {
    "5s".to_string()
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Loads `path` if given, otherwise the built-in defaults.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Config::default()),
        }
    }

    pub fn endpoint(&self) -> Result<Url, ConfigError> {
        Ok(Url::parse(&self.predictor.endpoint)?)
    }

    pub fn timeout(&self) -> Result<Option<Duration>, ConfigError> {
        self.predictor.timeout.as_deref().map(parse_duration).transpose()
    }

    pub fn notification_ttl(&self) -> Result<chrono::Duration, ConfigError> {
        let ttl = &self.notifications.ttl;
        chrono::Duration::from_std(parse_duration(ttl)?).map_err(|_| ConfigError::OutOfRange {
            value: ttl.clone(),
        })
    }

    pub fn build_session(&self) -> Result<Session, ConfigError> {
        let client = PredictClient::new(self.endpoint()?, self.timeout()?)?;
        Ok(Session::new(client, self.notification_ttl()?))
    }
}

fn parse_duration(value: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(value.trim()).map_err(|source| ConfigError::Duration {
        value: value.to_string(),
        source,
    })
}
