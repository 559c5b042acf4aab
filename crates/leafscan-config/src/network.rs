use std::env;

use serde::{Deserialize, Serialize};

pub const BASE_URL_ENV: &str = "LEAFSCAN_API_URL";

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    5
}

/// Where the prediction service lives and how long to wait for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl NetworkConfig {
    pub fn new() -> Self {
        let mut config = Self::default();
        config.apply_env(env::var(BASE_URL_ENV).ok());
        config
    }

    /// The base URL is the only setting taken from the environment
    pub fn apply_env(&mut self, base_url: Option<String>) {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            self.base_url = url;
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn predict_url(&self) -> String {
        self.endpoint("api/predict")
    }

    pub fn health_url(&self) -> String {
        self.endpoint("api/health")
    }

    pub fn classes_url(&self) -> String {
        self.endpoint("api/classes")
    }
}
