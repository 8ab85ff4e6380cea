mod client;
mod types;

#[cfg(test)]
pub use client::MockPredictionService;
pub use client::{HttpPredictionService, PredictionService};
pub use types::{MeasurementInput, ModelInfo, PredictionResult};
