use super::Liveness;
use crate::api::{MeasurementInput, PredictionResult, PredictionService};
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use tokio::sync::Mutex;
use tracing::{debug, error, info};

pub const PREDICTION_ERROR_MESSAGE: &str =
    "Failed to get prediction. Please check if the API is running.";

/// Range and granularity of the measurement inputs.
pub const MEASUREMENT_MIN: f64 = 0.0;
pub const MEASUREMENT_MAX: f64 = 10.0;
pub const MEASUREMENT_STEP: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Measurement {
    SepalLength,
    SepalWidth,
    PetalLength,
    PetalWidth,
}

impl Measurement {
    pub const ALL: [Measurement; 4] = [
        Measurement::SepalLength,
        Measurement::SepalWidth,
        Measurement::PetalLength,
        Measurement::PetalWidth,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::SepalLength => "Sepal Length (cm)",
            Self::SepalWidth => "Sepal Width (cm)",
            Self::PetalLength => "Petal Length (cm)",
            Self::PetalWidth => "Petal Width (cm)",
        }
    }

    pub fn get(self, input: &MeasurementInput) -> f64 {
        match self {
            Self::SepalLength => input.sepal_length,
            Self::SepalWidth => input.sepal_width,
            Self::PetalLength => input.petal_length,
            Self::PetalWidth => input.petal_width,
        }
    }

    pub fn set(self, input: &mut MeasurementInput, value: f64) {
        match self {
            Self::SepalLength => input.sepal_length = value,
            Self::SepalWidth => input.sepal_width = value,
            Self::PetalLength => input.petal_length = value,
            Self::PetalWidth => input.petal_width = value,
        }
    }
}

/// Reads the longest leading number out of `text`.
///
/// Never fails: text without a leading number, and non-finite values,
/// become `0.0`.
pub fn parse_lenient(text: &str) -> f64 {
    let text = text.trim_start();
    let value = (1..=text.len())
        .rev()
        .filter(|&end| text.is_char_boundary(end))
        .find_map(|end| text[..end].parse::<f64>().ok())
        .unwrap_or(0.0);

    if value.is_finite() && value != 0.0 {
        value
    } else {
        0.0
    }
}

/// `value + steps * 0.1`, rounded to one decimal and kept within the input range.
pub fn step_value(value: f64, steps: i32) -> f64 {
    let stepped = value + f64::from(steps) * MEASUREMENT_STEP;
    ((stepped * 10.0).round() / 10.0).clamp(MEASUREMENT_MIN, MEASUREMENT_MAX)
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub input: MeasurementInput,
    pub prediction: Option<PredictionResult>,
    pub error: Option<String>,
    /// Submissions issued but not yet resolved.
    pub in_flight: usize,
    /// Sequence number of the submission whose response was applied last.
    pub last_resolved: Option<u64>,
}

impl FormState {
    pub fn is_submitting(&self) -> bool {
        self.in_flight > 0
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            input: MeasurementInput::default(),
            prediction: None,
            error: None,
            in_flight: 0,
            last_resolved: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Predicted(PredictionResult),
    Failed,
    /// The form was torn down before the response arrived.
    Discarded,
}

/// Editable measurements plus the outcome of the latest resolved submission.
///
/// Overlapping submissions are not ordered: whichever response resolves last
/// overwrites the displayed state.
#[derive(Clone)]
pub struct PredictionForm {
    service: Arc<dyn PredictionService>,
    state: Arc<Mutex<FormState>>,
    liveness: Liveness,
    submissions: Arc<AtomicU64>,
}

impl PredictionForm {
    pub fn new(service: Arc<dyn PredictionService>) -> Self {
        Self {
            service,
            state: Arc::new(Mutex::new(FormState::default())),
            liveness: Liveness::new(),
            submissions: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn snapshot(&self) -> FormState {
        self.state.lock().await.clone()
    }

    /// Stores the leniently parsed value of `text` and returns it.
    pub async fn set_field(&self, field: Measurement, text: &str) -> f64 {
        let value = parse_lenient(text);
        let mut state = self.state.lock().await;
        field.set(&mut state.input, value);
        value
    }

    pub async fn step_field(&self, field: Measurement, steps: i32) -> f64 {
        let mut state = self.state.lock().await;
        let value = step_value(field.get(&state.input), steps);
        field.set(&mut state.input, value);
        value
    }

    /// Sends the current measurements to `/predict` and records the outcome.
    pub async fn submit(&self) -> SubmissionOutcome {
        let (submission, input) = {
            let mut state = self.state.lock().await;
            self.begin(&mut state)
        };
        self.complete(submission, input).await
    }

    /// Like [`submit`](Self::submit), but does nothing while another
    /// submission is still in flight.
    pub async fn submit_if_idle(&self) -> Option<SubmissionOutcome> {
        let (submission, input) = {
            let mut state = self.state.lock().await;
            if state.is_submitting() {
                debug!("Submission ignored, another one is in flight");
                return None;
            }
            self.begin(&mut state)
        };
        Some(self.complete(submission, input).await)
    }

    pub fn teardown(&self) -> bool {
        self.liveness.teardown()
    }

    fn begin(&self, state: &mut FormState) -> (u64, MeasurementInput) {
        let submission = self.submissions.fetch_add(1, Ordering::Relaxed) + 1;
        state.in_flight += 1;
        state.error = None;
        (submission, state.input)
    }

    async fn complete(&self, submission: u64, input: MeasurementInput) -> SubmissionOutcome {
        info!(submission, ?input, "Submitting prediction request");
        let result = self.service.predict(&input).await;

        if !self.liveness.is_alive() {
            debug!(submission, "Discarding prediction after teardown");
            return SubmissionOutcome::Discarded;
        }

        let mut state = self.state.lock().await;
        state.in_flight = state.in_flight.saturating_sub(1);
        state.last_resolved = Some(submission);

        match result {
            Ok(prediction) => {
                info!(
                    submission,
                    predicted_class = %prediction.predicted_class,
                    "Prediction received"
                );
                state.prediction = Some(prediction.clone());
                state.error = None;
                SubmissionOutcome::Predicted(prediction)
            }
            Err(e) => {
                error!(submission, error = %e, "Prediction error");
                state.error = Some(PREDICTION_ERROR_MESSAGE.to_string());
                SubmissionOutcome::Failed
            }
        }
    }
}
