use leafscan_types::{ClassLabel, HealthReport, PredictionResult, TopPrediction};
use serde::Deserialize;

use crate::error::ClientError;

/// Used when the service reports neither `reliable` nor a threshold
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.7;

const SUCCESS: &str = "success";

/// Body of `POST /api/predict`, success or failure
#[derive(Debug, Deserialize)]
pub(crate) struct PredictEnvelope {
    status: Option<String>,
    message: Option<String>,
    prediction: Option<serde_json::Value>,
    /// Some service builds report reliability next to the prediction
    reliable: Option<bool>,
    confidence_threshold: Option<f64>,
    #[serde(default)]
    top_predictions: Vec<TopPrediction>,
}

#[derive(Debug, Deserialize)]
struct WirePrediction {
    plant: String,
    disease: String,
    #[serde(rename = "class")]
    class_name: String,
    confidence: f64,
    percentage: String,
    is_healthy: bool,
    reliable: Option<bool>,
}

impl PredictEnvelope {
    pub(crate) fn message(&self) -> Option<String> {
        self.message.clone()
    }

    pub(crate) fn into_result(self) -> Result<PredictionResult, ClientError> {
        if self.status.as_deref() != Some(SUCCESS) {
            return Err(ClientError::Service {
                message: self.message,
            });
        }

        let Some(raw) = self.prediction else {
            tracing::warn!("Success response without a prediction");
            return Err(ClientError::Service {
                message: self.message,
            });
        };

        let wire: WirePrediction = serde_json::from_value(raw).map_err(|e| {
            tracing::warn!("Malformed prediction payload: {}", e);
            ClientError::Service { message: None }
        })?;

        let threshold = self
            .confidence_threshold
            .unwrap_or(DEFAULT_CONFIDENCE_THRESHOLD);
        let reliable = wire
            .reliable
            .or(self.reliable)
            .unwrap_or(wire.confidence >= threshold);

        Ok(PredictionResult {
            plant: wire.plant,
            disease: wire.disease,
            class_name: wire.class_name,
            confidence: wire.confidence,
            percentage: wire.percentage,
            is_healthy: wire.is_healthy,
            reliable,
            top_predictions: self.top_predictions,
            confidence_threshold: self.confidence_threshold,
        })
    }
}

/// Body of `GET /api/health`
#[derive(Debug, Deserialize)]
pub(crate) struct HealthEnvelope {
    status: Option<String>,
    message: Option<String>,
    server: Option<String>,
    model: Option<ModelStatus>,
}

#[derive(Debug, Deserialize)]
struct ModelStatus {
    #[serde(default)]
    loaded: bool,
    #[serde(default)]
    classes: usize,
    input_shape: Option<String>,
}

impl HealthEnvelope {
    pub(crate) fn into_report(self) -> Result<HealthReport, ClientError> {
        if self.status.as_deref() != Some(SUCCESS) {
            return Err(ClientError::Service {
                message: self.message,
            });
        }

        let model = self.model.unwrap_or(ModelStatus {
            loaded: false,
            classes: 0,
            input_shape: None,
        });

        Ok(HealthReport {
            server: self.server.unwrap_or_else(|| "unknown".to_string()),
            model_loaded: model.loaded,
            classes: model.classes,
            input_shape: model.input_shape,
        })
    }
}

/// Body of `GET /api/classes`
#[derive(Debug, Deserialize)]
pub(crate) struct ClassesEnvelope {
    status: Option<String>,
    message: Option<String>,
    #[serde(default)]
    classes: Vec<String>,
}

impl ClassesEnvelope {
    pub(crate) fn into_labels(self) -> Result<Vec<ClassLabel>, ClientError> {
        if self.status.as_deref() != Some(SUCCESS) {
            return Err(ClientError::Service {
                message: self.message,
            });
        }

        Ok(self.classes.iter().map(|c| ClassLabel::parse(c)).collect())
    }
}
