use super::types::*;
use crate::{Error, Result, config::ServiceConfig};
use async_trait::async_trait;
use reqwest::Response;
use serde::de::DeserializeOwned;
use tracing::debug;

/// The three endpoints of the prediction service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PredictionService: Send + Sync {
    /// Liveness probe. Any 2xx is healthy, the body is ignored.
    async fn health(&self) -> Result<()>;

    async fn info(&self) -> Result<ModelInfo>;

    async fn predict(&self, input: &MeasurementInput) -> Result<PredictionResult>;
}

pub struct HttpPredictionService {
    base_url: String,
    client: reqwest::Client,
}

impl HttpPredictionService {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        debug!("Creating prediction service client for: {}", config.base_url);

        Ok(Self {
            base_url: config.base_url.clone(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn ensure_success(path: &str, response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(Error::unexpected_status(path, status.as_u16()))
        }
    }

    async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> Result<T> {
        let body = Self::ensure_success(path, response)?.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl PredictionService for HttpPredictionService {
    async fn health(&self) -> Result<()> {
        let response = self.client.get(self.endpoint("/health")).send().await?;
        Self::ensure_success("/health", response)?;
        Ok(())
    }

    async fn info(&self) -> Result<ModelInfo> {
        let response = self.client.get(self.endpoint("/info")).send().await?;
        let info: ModelInfo = Self::decode("/info", response).await?;

        debug!(
            "Model info: {} with {} classes",
            info.model_type,
            info.classes.len()
        );
        Ok(info)
    }

    async fn predict(&self, input: &MeasurementInput) -> Result<PredictionResult> {
        debug!(?input, "Requesting prediction");

        let response = self
            .client
            .post(self.endpoint("/predict"))
            .json(input)
            .send()
            .await?;
        let result: PredictionResult = Self::decode("/predict", response).await?;

        Ok(result)
    }
}
