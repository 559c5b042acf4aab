use bytes::Bytes;
use serde::Deserialize;

use crate::labels::{ClassLabel, Plant};
use crate::view::SessionView;

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// A path was picked and read by the UI
    FileChosen(SelectedFile),
    Predict,
    Reset,
    CheckHealth,
    ListClasses,
    /// Stdin reached EOF: finish the running prediction, then stop
    InputClosed,
    Quit,
    Render(SessionView),
    /// Forget the picker's retained path
    ClearPicker,
    Notice(String),
    ShowHealth(HealthReport),
    ShowClasses(Vec<ClassLabel>),
    BackendReady,
}

/// An image picked by the user, held in memory until reset or replaced
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    /// Declared content type, e.g. `image/jpeg`
    pub mime: String,
    pub bytes: Bytes,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes: bytes.into(),
        }
    }

    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// `data:<mime>;base64,<payload>` rendition of a [`SelectedFile`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewDataUri(String);

impl PreviewDataUri {
    pub fn new(uri: String) -> Self {
        Self(uri)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn mime(&self) -> Option<&str> {
        self.0
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(';'))
            .map(|(mime, _)| mime)
    }

    /// Length of the base64 payload after the comma
    pub fn payload_len(&self) -> usize {
        self.0.split_once(',').map(|(_, p)| p.len()).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// Classification returned by the prediction service
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub plant: String,
    pub disease: String,
    /// Full class identifier, e.g. `Tomato_Early_blight`
    pub class_name: String,
    /// 0.0..=1.0
    pub confidence: f64,
    pub percentage: String,
    pub is_healthy: bool,
    pub reliable: bool,
    pub top_predictions: Vec<TopPrediction>,
    pub confidence_threshold: Option<f64>,
}

impl PredictionResult {
    pub fn category(&self) -> Plant {
        Plant::from_label(&self.plant)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TopPrediction {
    #[serde(rename = "class")]
    pub class_name: String,
    pub confidence: f64,
    pub percentage: String,
}

/// Service liveness as reported by `/api/health`
#[derive(Debug, Clone, PartialEq)]
pub struct HealthReport {
    pub server: String,
    pub model_loaded: bool,
    pub classes: usize,
    pub input_shape: Option<String>,
}
