use serde::{Deserialize, Serialize};

/// Body of `POST /predict`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurementInput {
    pub sepal_length: f64,
    pub sepal_width: f64,
    pub petal_length: f64,
    pub petal_width: f64,
}

impl Default for MeasurementInput {
    fn default() -> Self {
        Self {
            sepal_length: 5.1,
            sepal_width: 3.5,
            petal_length: 1.4,
            petal_width: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_class: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub model_type: String,
    pub classes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_measurement_input_wire_format() {
        let value = serde_json::to_value(MeasurementInput::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "sepal_length": 5.1,
                "sepal_width": 3.5,
                "petal_length": 1.4,
                "petal_width": 0.2
            })
        );
    }

    #[test]
    fn test_model_info_keeps_class_order() {
        let info: ModelInfo = serde_json::from_value(json!({
            "model_type": "RandomForestClassifier",
            "classes": ["virginica", "setosa", "versicolor"]
        }))
        .unwrap();

        assert_eq!(info.model_type, "RandomForestClassifier");
        assert_eq!(info.classes, vec!["virginica", "setosa", "versicolor"]);
    }

    #[test]
    fn test_prediction_result_ignores_extra_fields() {
        let result: PredictionResult = serde_json::from_value(json!({
            "predicted_class": "versicolor",
            "confidence": 0.93
        }))
        .unwrap();

        assert_eq!(result.predicted_class, "versicolor");
    }
}
