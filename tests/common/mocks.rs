use async_trait::async_trait;
use iris_console::{
    Error, Result,
    api::{MeasurementInput, ModelInfo, PredictionResult, PredictionService},
};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// In-process prediction service that records calls
#[derive(Debug)]
pub struct MockPredictionService {
    pub health_calls: AtomicUsize,
    pub info_calls: AtomicUsize,
    pub predictions: Mutex<Vec<MeasurementInput>>,
    pub healthy: bool,
    pub delay: Duration,
    pub model_info: Option<ModelInfo>,
    pub predicted_class: Option<String>,
}

impl MockPredictionService {
    pub fn new() -> Self {
        Self {
            health_calls: AtomicUsize::new(0),
            info_calls: AtomicUsize::new(0),
            predictions: Mutex::new(Vec::new()),
            healthy: true,
            delay: Duration::ZERO,
            model_info: None,
            predicted_class: None,
        }
    }

    pub fn with_model_info(mut self, model_type: &str, classes: &[&str]) -> Self {
        self.model_info = Some(ModelInfo {
            model_type: model_type.to_string(),
            classes: classes.iter().map(|c| c.to_string()).collect(),
        });
        self
    }

    pub fn with_prediction(mut self, class: &str) -> Self {
        self.predicted_class = Some(class.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn unhealthy(mut self) -> Self {
        self.healthy = false;
        self
    }

    pub fn health_calls(&self) -> usize {
        self.health_calls.load(Ordering::SeqCst)
    }

    pub fn info_calls(&self) -> usize {
        self.info_calls.load(Ordering::SeqCst)
    }

    pub fn get_predictions(&self) -> Vec<MeasurementInput> {
        self.predictions.lock().unwrap().clone()
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

impl Default for MockPredictionService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PredictionService for MockPredictionService {
    async fn health(&self) -> Result<()> {
        self.health_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        if self.healthy {
            Ok(())
        } else {
            Err(Error::unexpected_status("/health", 503))
        }
    }

    async fn info(&self) -> Result<ModelInfo> {
        self.info_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        self.model_info
            .clone()
            .ok_or_else(|| Error::unexpected_status("/info", 500))
    }

    async fn predict(&self, input: &MeasurementInput) -> Result<PredictionResult> {
        self.predictions.lock().unwrap().push(*input);
        self.pause().await;
        self.predicted_class
            .clone()
            .map(|predicted_class| PredictionResult { predicted_class })
            .ok_or_else(|| Error::unexpected_status("/predict", 500))
    }
}
