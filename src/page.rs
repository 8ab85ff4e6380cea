use crate::{
    Result,
    api::{HttpPredictionService, PredictionService},
    config::Config,
    widgets::{HealthMonitor, HealthSettings, ModelInfoPanel, PredictionForm},
};
use std::sync::Arc;
use tracing::info;

/// The three widgets mounted against one prediction service.
pub struct Page {
    base_url: String,
    pub health: HealthMonitor,
    pub model_info: ModelInfoPanel,
    pub form: PredictionForm,
}

impl Page {
    pub fn mount(config: &Config) -> Result<Self> {
        let service = HttpPredictionService::new(&config.service)?;
        Ok(Self::mount_with(
            Arc::new(service),
            &config.service.base_url,
            HealthSettings::from(&config.health),
        ))
    }

    pub fn mount_with(
        service: Arc<dyn PredictionService>,
        base_url: &str,
        health: HealthSettings,
    ) -> Self {
        info!("Mounting page against {}", base_url);

        Self {
            base_url: base_url.to_string(),
            health: HealthMonitor::start(service.clone(), health),
            model_info: ModelInfoPanel::mount(service.clone()),
            form: PredictionForm::new(service),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Stops polling and detaches every widget. Safe to call more than once.
    pub fn teardown(&mut self) {
        let stopped = self.health.stop();
        self.model_info.teardown();
        self.form.teardown();
        if stopped {
            info!("Page torn down");
        }
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        self.teardown();
    }
}
