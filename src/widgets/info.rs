use super::Liveness;
use crate::api::{ModelInfo, PredictionService};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error};

#[derive(Debug, Clone, PartialEq)]
pub enum ModelInfoState {
    Loading,
    Ready(ModelInfo),
    /// The fetch failed. The panel renders nothing at all.
    Unavailable,
}

/// Static model metadata, fetched once when the panel is mounted.
pub struct ModelInfoPanel {
    state: watch::Receiver<ModelInfoState>,
    liveness: Liveness,
}

impl ModelInfoPanel {
    pub fn mount(service: Arc<dyn PredictionService>) -> Self {
        let (tx, rx) = watch::channel(ModelInfoState::Loading);
        let liveness = Liveness::new();

        let task_liveness = liveness.clone();
        tokio::spawn(async move {
            let state = fetch(service.as_ref()).await;
            if !task_liveness.is_alive() {
                debug!("Discarding model info after teardown");
                return;
            }
            tx.send_replace(state);
        });

        Self {
            state: rx,
            liveness,
        }
    }

    pub fn state(&self) -> ModelInfoState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ModelInfoState> {
        self.state.clone()
    }

    pub fn teardown(&self) -> bool {
        self.liveness.teardown()
    }
}

impl Drop for ModelInfoPanel {
    fn drop(&mut self) {
        self.teardown();
    }
}

async fn fetch(service: &dyn PredictionService) -> ModelInfoState {
    match service.info().await {
        Ok(info) => {
            debug!(
                "Loaded model info: {} ({} classes)",
                info.model_type,
                info.classes.len()
            );
            ModelInfoState::Ready(info)
        }
        Err(e) => {
            error!(error = %e, "Failed to fetch model info");
            ModelInfoState::Unavailable
        }
    }
}
