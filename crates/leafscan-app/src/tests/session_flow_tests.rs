use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use leafscan_client::{ClientError, HttpPredictionClient, PredictionService};
use leafscan_config::Config;
use leafscan_config::network::NetworkConfig;
use leafscan_types::{
    AppEvent, ClassLabel, HealthReport, PredictionResult, PreviewStatus, RequestState,
    SelectedFile, SessionView, TopPrediction,
};
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::state::AppState;

/// Service double that counts uploads and can hold them until released
struct FakeService {
    calls: AtomicUsize,
    gate: Option<Arc<Notify>>,
    /// Health and class queries fail
    down: bool,
}

impl FakeService {
    fn immediate() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            gate: None,
            down: false,
        })
    }

    fn gated(gate: Arc<Notify>) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            gate: Some(gate),
            down: false,
        })
    }

    fn down() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            gate: None,
            down: true,
        })
    }

    fn outage(&self) -> Result<(), ClientError> {
        if self.down {
            return Err(ClientError::Service {
                message: Some("down".to_string()),
            });
        }
        Ok(())
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl PredictionService for FakeService {
    async fn predict(&self, _file: &SelectedFile) -> Result<PredictionResult, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        Ok(tomato_result())
    }

    async fn health(&self) -> Result<HealthReport, ClientError> {
        self.outage()?;
        Ok(HealthReport {
            server: "running".to_string(),
            model_loaded: true,
            classes: 15,
            input_shape: None,
        })
    }

    async fn classes(&self) -> Result<Vec<ClassLabel>, ClientError> {
        self.outage()?;
        Ok(vec![ClassLabel::parse("Tomato_Early_blight")])
    }
}

fn tomato_result() -> PredictionResult {
    PredictionResult {
        plant: "Tomato".to_string(),
        disease: "Early blight".to_string(),
        class_name: "Tomato_Early_blight".to_string(),
        confidence: 0.95,
        percentage: "95.00%".to_string(),
        is_healthy: false,
        reliable: true,
        top_predictions: vec![TopPrediction {
            class_name: "Tomato_Early_blight".to_string(),
            confidence: 0.95,
            percentage: "95.00%".to_string(),
        }],
        confidence_threshold: Some(0.7),
    }
}

fn leaf() -> SelectedFile {
    SelectedFile::new("leaf.jpg", "image/jpeg", vec![0xFF, 0xD8, 0xFF, 0xE0])
}

struct Harness {
    state: Arc<AppState>,
    ui_tx: AsyncSender<AppEvent>,
    app_rx: AsyncReceiver<AppEvent>,
    cancel: CancellationToken,
    handle: JoinHandle<anyhow::Result<()>>,
}

impl Harness {
    fn start(service: Arc<dyn PredictionService>) -> Self {
        let state = Arc::new(AppState::new(Config::default(), service));
        let (ui_tx, ui_rx) = kanal::bounded_async(16);
        let (app_tx, app_rx) = kanal::unbounded_async();
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(event_loop(state.clone(), ui_rx, app_tx, cancel.clone()));

        Self {
            state,
            ui_tx,
            app_rx,
            cancel,
            handle,
        }
    }

    async fn send(&self, event: AppEvent) {
        self.ui_tx.send(event).await.expect("send failed");
    }

    /// Skip events until a render satisfies `pred`
    async fn wait_for(&self, pred: impl Fn(&SessionView) -> bool) -> SessionView {
        let wait = async {
            loop {
                match self.app_rx.recv().await {
                    Ok(AppEvent::Render(view)) if pred(&view) => return view,
                    Ok(_) => continue,
                    Err(e) => panic!("Channel error: {}", e),
                }
            }
        };
        timeout(Duration::from_secs(5), wait)
            .await
            .expect("Timeout waiting for render")
    }

    /// Collect the next `count` notices, skipping other events
    async fn notices(&self, count: usize) -> Vec<String> {
        let collect = async {
            let mut notices = Vec::new();
            while notices.len() < count {
                match self.app_rx.recv().await {
                    Ok(AppEvent::Notice(text)) => notices.push(text),
                    Ok(_) => continue,
                    Err(e) => panic!("Channel error: {}", e),
                }
            }
            notices
        };
        timeout(Duration::from_secs(5), collect)
            .await
            .expect("Timeout waiting for notices")
    }

    async fn stop(self) {
        self.cancel.cancel();
        let result = timeout(Duration::from_secs(2), self.handle)
            .await
            .expect("event loop did not stop");
        assert!(result.expect("event loop panicked").is_ok());
    }
}

#[tokio::test]
async fn test_tomato_prediction_end_to_end() {
    let service = FakeService::immediate();
    let harness = Harness::start(service.clone());

    harness.send(AppEvent::FileChosen(leaf())).await;
    harness.send(AppEvent::Predict).await;

    let view = harness
        .wait_for(|v| v.request == RequestState::Succeeded)
        .await;
    let result = view.result.expect("result shown");

    assert_eq!(result.heading, "🍅 Tomato");
    assert_eq!(result.disease, "Early blight");
    assert_eq!(result.percentage, "95.00%");
    assert!(result.reliability_warning.is_none());
    assert!(view.error.is_none());
    assert!(view.predict_enabled);
    assert_eq!(service.calls(), 1);

    harness.stop().await;
}

#[tokio::test]
async fn test_unreachable_service_shows_connect_message() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = HttpPredictionClient::new(NetworkConfig {
        base_url: format!("http://127.0.0.1:{port}"),
        ..NetworkConfig::default()
    })
    .unwrap();
    let harness = Harness::start(Arc::new(client));

    harness.send(AppEvent::FileChosen(leaf())).await;
    harness.send(AppEvent::Predict).await;

    let view = harness.wait_for(|v| v.request == RequestState::Failed).await;
    assert_eq!(
        view.error.as_deref(),
        Some("Failed to connect to server. Make sure the backend is running.")
    );
    assert!(view.result.is_none());
    assert_eq!(view.file_name.as_deref(), Some("leaf.jpg"));

    harness.stop().await;
}

#[tokio::test]
async fn test_second_predict_while_loading_is_ignored() {
    let gate = Arc::new(Notify::new());
    let service = FakeService::gated(gate.clone());
    let harness = Harness::start(service.clone());

    harness.send(AppEvent::FileChosen(leaf())).await;
    harness.send(AppEvent::Predict).await;
    let loading = harness.wait_for(|v| v.request == RequestState::Loading).await;
    assert!(!loading.predict_enabled);
    assert_eq!(loading.predict_label, "Analyzing...");

    harness.send(AppEvent::Predict).await;
    gate.notify_one();

    harness
        .wait_for(|v| v.request == RequestState::Succeeded)
        .await;
    assert_eq!(service.calls(), 1);

    harness.stop().await;
}

#[tokio::test]
async fn test_reset_discards_in_flight_prediction() {
    let gate = Arc::new(Notify::new());
    let service = FakeService::gated(gate.clone());
    let harness = Harness::start(service.clone());

    harness.send(AppEvent::FileChosen(leaf())).await;
    harness.send(AppEvent::Predict).await;
    harness.wait_for(|v| v.request == RequestState::Loading).await;

    harness.send(AppEvent::Reset).await;

    let cleared = timeout(Duration::from_secs(2), async {
        loop {
            if let Ok(AppEvent::ClearPicker) = harness.app_rx.recv().await {
                break;
            }
        }
    })
    .await;
    assert!(cleared.is_ok(), "picker was not cleared");

    let view = harness
        .wait_for(|v| v.request == RequestState::Idle && v.file_name.is_none())
        .await;
    assert!(view.result.is_none());
    assert!(view.error.is_none());

    gate.notify_one();
    tokio::time::sleep(Duration::from_millis(100)).await;

    {
        let session = harness.state.session.lock().await;
        assert_eq!(session.request(), RequestState::Idle);
        assert!(session.result().is_none());
        assert!(session.selected().is_none());
    }

    harness.stop().await;
}

#[tokio::test]
async fn test_non_image_is_rejected() {
    let harness = Harness::start(FakeService::immediate());

    harness
        .send(AppEvent::FileChosen(SelectedFile::new(
            "notes.txt",
            "text/plain",
            b"hello".to_vec(),
        )))
        .await;

    let view = harness.wait_for(|v| v.error.is_some()).await;
    assert_eq!(view.error.as_deref(), Some("Please select a valid image file"));
    assert!(view.file_name.is_none());
    assert!(!view.predict_enabled);

    harness.stop().await;
}

#[tokio::test]
async fn test_predict_without_file() {
    let service = FakeService::immediate();
    let harness = Harness::start(service.clone());

    harness.send(AppEvent::Predict).await;

    let view = harness.wait_for(|v| v.error.is_some()).await;
    assert_eq!(view.error.as_deref(), Some("Please select an image first"));
    assert_eq!(view.request, RequestState::Idle);
    assert_eq!(service.calls(), 0);

    harness.stop().await;
}

#[tokio::test]
async fn test_quit_stops_event_loop() {
    let harness = Harness::start(FakeService::immediate());
    harness.send(AppEvent::Quit).await;

    let result = timeout(Duration::from_secs(2), harness.handle)
        .await
        .expect("event loop did not stop");
    assert!(result.unwrap().is_ok());
}

#[tokio::test]
async fn test_selected_image_gets_preview() {
    let harness = Harness::start(FakeService::immediate());

    harness.send(AppEvent::FileChosen(leaf())).await;

    let view = harness
        .wait_for(|v| matches!(v.preview, PreviewStatus::Ready { .. }))
        .await;
    assert_eq!(
        view.preview,
        PreviewStatus::Ready {
            mime: "image/jpeg".to_string(),
            encoded_len: 8,
        }
    );
    assert_eq!(view.file_name.as_deref(), Some("leaf.jpg"));

    {
        let session = harness.state.session.lock().await;
        let uri = session.preview().expect("preview stored");
        assert_eq!(uri.as_str(), "data:image/jpeg;base64,/9j/4A==");
    }

    harness.stop().await;
}

#[tokio::test]
async fn test_service_info_failures_are_notices() {
    let harness = Harness::start(FakeService::down());

    harness.send(AppEvent::CheckHealth).await;
    harness.send(AppEvent::ListClasses).await;

    let mut notices = harness.notices(2).await;
    notices.sort();
    assert_eq!(
        notices,
        vec![
            "Could not list classes: Service error: down".to_string(),
            "Health check failed: Service error: down".to_string(),
        ]
    );

    {
        let session = harness.state.session.lock().await;
        assert!(session.error().is_none());
        assert_eq!(session.request(), RequestState::Idle);
    }

    harness.stop().await;
}

#[tokio::test]
async fn test_service_info_reaches_ui() {
    let harness = Harness::start(FakeService::immediate());

    harness.send(AppEvent::CheckHealth).await;
    let report = timeout(Duration::from_secs(5), async {
        loop {
            if let Ok(AppEvent::ShowHealth(report)) = harness.app_rx.recv().await {
                return report;
            }
        }
    })
    .await
    .expect("no health report");
    assert!(report.model_loaded);

    harness.send(AppEvent::ListClasses).await;
    let labels = timeout(Duration::from_secs(5), async {
        loop {
            if let Ok(AppEvent::ShowClasses(labels)) = harness.app_rx.recv().await {
                return labels;
            }
        }
    })
    .await
    .expect("no class list");
    assert_eq!(labels[0].disease, "Early blight");

    harness.stop().await;
}

#[tokio::test]
async fn test_new_selection_discards_in_flight_prediction() {
    let gate = Arc::new(Notify::new());
    let service = FakeService::gated(gate.clone());
    let harness = Harness::start(service.clone());

    harness.send(AppEvent::FileChosen(leaf())).await;
    harness.send(AppEvent::Predict).await;
    harness.wait_for(|v| v.request == RequestState::Loading).await;

    harness
        .send(AppEvent::FileChosen(SelectedFile::new(
            "second.png",
            "image/png",
            b"\x89PNG".to_vec(),
        )))
        .await;
    let view = harness
        .wait_for(|v| v.file_name.as_deref() == Some("second.png"))
        .await;
    assert_eq!(view.request, RequestState::Idle);
    assert!(view.predict_enabled);

    gate.notify_one();
    tokio::time::sleep(Duration::from_millis(100)).await;

    {
        let session = harness.state.session.lock().await;
        assert_eq!(session.request(), RequestState::Idle);
        assert!(session.result().is_none());
        assert_eq!(session.selected().map(|f| f.name.as_str()), Some("second.png"));
    }
    assert_eq!(service.calls(), 1);

    harness.stop().await;
}

#[tokio::test]
async fn test_input_closed_waits_for_prediction() {
    let gate = Arc::new(Notify::new());
    let harness = Harness::start(FakeService::gated(gate.clone()));

    harness.send(AppEvent::FileChosen(leaf())).await;
    harness.send(AppEvent::Predict).await;
    harness.wait_for(|v| v.request == RequestState::Loading).await;

    harness.send(AppEvent::InputClosed).await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(!harness.handle.is_finished());

    gate.notify_one();
    let view = harness
        .wait_for(|v| v.request == RequestState::Succeeded)
        .await;
    assert!(view.result.is_some());

    let result = timeout(Duration::from_secs(2), harness.handle)
        .await
        .expect("event loop did not stop");
    assert!(result.unwrap().is_ok());
}

#[tokio::test]
async fn test_input_closed_when_idle_stops() {
    let harness = Harness::start(FakeService::immediate());
    harness.send(AppEvent::InputClosed).await;

    let result = timeout(Duration::from_secs(2), harness.handle)
        .await
        .expect("event loop did not stop");
    assert!(result.unwrap().is_ok());
}
