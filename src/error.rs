use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {endpoint}")]
    UnexpectedStatus { endpoint: String, status: u16 },

    #[error("Request to {endpoint} timed out after {after:?}")]
    Timeout { endpoint: String, after: Duration },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn unexpected_status(endpoint: impl Into<String>, status: u16) -> Self {
        Self::UnexpectedStatus {
            endpoint: endpoint.into(),
            status,
        }
    }

    pub fn timeout(endpoint: impl Into<String>, after: Duration) -> Self {
        Self::Timeout {
            endpoint: endpoint.into(),
            after,
        }
    }
}
