pub mod health;
pub mod info;
mod liveness;
pub mod prediction;
pub mod species;

pub use health::{HealthMonitor, HealthSettings, HealthSnapshot, HealthStatus, Indicator};
pub use info::{ModelInfoPanel, ModelInfoState};
pub use liveness::Liveness;
pub use prediction::{
    FormState, Measurement, PREDICTION_ERROR_MESSAGE, PredictionForm, SubmissionOutcome,
};
pub use species::{display_name, species_icon};
