use std::sync::Arc;

use leafscan_client::PredictionService;
use leafscan_config::Config;
use leafscan_core::UploadSession;
use tokio::sync::{Mutex, RwLock};
use tokio_util::sync::CancellationToken;

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub session: Mutex<UploadSession>,
    pub service: Arc<dyn PredictionService>,
    pub in_flight: Mutex<InFlight>,
}

impl AppState {
    pub fn new(config: Config, service: Arc<dyn PredictionService>) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            session: Mutex::new(UploadSession::new()),
            service,
            in_flight: Mutex::new(InFlight::default()),
        }
    }
}

/// Cancellation handles for the preview decode and the prediction request
#[derive(Default)]
pub struct InFlight {
    preview: Option<CancellationToken>,
    predict: Option<CancellationToken>,
}

impl InFlight {
    /// A new selection supersedes both the old preview and any running request
    pub fn start_preview(&mut self, parent: &CancellationToken) -> CancellationToken {
        self.cancel_all();
        let token = parent.child_token();
        self.preview = Some(token.clone());
        token
    }

    pub fn start_predict(&mut self, parent: &CancellationToken) -> CancellationToken {
        if let Some(token) = self.predict.take() {
            token.cancel();
        }
        let token = parent.child_token();
        self.predict = Some(token.clone());
        token
    }

    pub fn cancel_all(&mut self) {
        for token in [self.preview.take(), self.predict.take()].into_iter().flatten() {
            token.cancel();
        }
    }
}
