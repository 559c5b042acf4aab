use std::time::Duration;

use leafscan_config::network::NetworkConfig;
use leafscan_types::{ClassLabel, HealthReport, PredictionResult, SelectedFile};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;

use crate::PredictionService;
use crate::error::ClientError;
use crate::wire::{ClassesEnvelope, HealthEnvelope, PredictEnvelope};

/// Multipart field the service reads the upload from
const IMAGE_FIELD: &str = "image";

#[derive(Clone)]
pub struct HttpPredictionClient {
    network: NetworkConfig,
    client: reqwest::Client,
}

impl HttpPredictionClient {
    pub fn new(network: NetworkConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(network.request_timeout_secs))
            .connect_timeout(Duration::from_secs(network.connect_timeout_secs))
            .build()?;

        Ok(Self { network, client })
    }

    pub fn base_url(&self) -> &str {
        &self.network.base_url
    }

    fn image_part(file: &SelectedFile) -> Part {
        let part = Part::bytes(file.bytes.to_vec()).file_name(file.name.clone());
        match part.mime_str(&file.mime) {
            Ok(part) => part,
            Err(e) => {
                tracing::warn!("Sending {} without content type: {}", file.name, e);
                Part::bytes(file.bytes.to_vec()).file_name(file.name.clone())
            }
        }
    }

    /// GET a JSON endpoint. Error statuses become `Rejected` with whatever
    /// `message` the body carried.
    async fn get_json<T>(&self, url: &str) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
    {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(ClientError::Rejected {
                status,
                message: body_message(&body),
            });
        }

        serde_json::from_slice(&body).map_err(|e| ClientError::Service {
            message: Some(format!("Invalid response: {e}")),
        })
    }
}

fn body_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message")?.as_str().map(str::to_string))
}

#[async_trait::async_trait]
impl PredictionService for HttpPredictionClient {
    async fn predict(&self, file: &SelectedFile) -> Result<PredictionResult, ClientError> {
        let url = self.network.predict_url();
        tracing::debug!("POST {} ({}, {} bytes)", url, file.mime, file.len());

        let form = Form::new().part(IMAGE_FIELD, Self::image_part(file));
        let response = self.client.post(&url).multipart(form).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            tracing::warn!("Prediction rejected with HTTP {}", status);
            return Err(ClientError::Rejected {
                status,
                message: body_message(&body),
            });
        }

        match serde_json::from_slice::<PredictEnvelope>(&body) {
            Ok(envelope) => {
                if let Some(message) = envelope.message() {
                    tracing::debug!("Service message: {}", message);
                }
                envelope.into_result()
            }
            Err(e) => {
                tracing::warn!("Unreadable prediction response: {}", e);
                Err(ClientError::Service { message: None })
            }
        }
    }

    async fn health(&self) -> Result<HealthReport, ClientError> {
        let envelope: HealthEnvelope = self.get_json(&self.network.health_url()).await?;
        envelope.into_report()
    }

    async fn classes(&self) -> Result<Vec<ClassLabel>, ClientError> {
        let envelope: ClassesEnvelope = self.get_json(&self.network.classes_url()).await?;
        envelope.into_labels()
    }
}
