mod client;
mod error;
mod wire;

pub use client::HttpPredictionClient;
pub use error::ClientError;
pub use wire::DEFAULT_CONFIDENCE_THRESHOLD;

use leafscan_types::{ClassLabel, HealthReport, PredictionResult, SelectedFile};

/// Prediction service interface
#[async_trait::async_trait]
pub trait PredictionService: Send + Sync {
    /// Upload an image and classify it
    async fn predict(&self, file: &SelectedFile) -> Result<PredictionResult, ClientError>;

    /// Service and model status
    async fn health(&self) -> Result<HealthReport, ClientError>;

    /// Every class the model can output
    async fn classes(&self) -> Result<Vec<ClassLabel>, ClientError>;
}
