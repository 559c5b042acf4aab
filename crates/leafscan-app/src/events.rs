use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use leafscan_core::{PreviewTicket, RequestTicket, SessionError, view};
use leafscan_types::{AppEvent, PredictionResult, PreviewDataUri};
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

pub mod predict;
pub mod reset;
pub mod select_file;
pub mod service_info;

use predict::handle_predict;
use reset::handle_reset;
use select_file::handle_file_selection;
use service_info::{handle_class_listing, handle_health_check};

/// Outcome of background work, posted back to the event loop
#[derive(Debug)]
pub enum Completion {
    Preview {
        ticket: PreviewTicket,
        uri: PreviewDataUri,
    },
    Prediction {
        ticket: RequestTicket,
        outcome: Result<PredictionResult, SessionError>,
    },
}

/// Shared handles every event handler needs
#[derive(Clone)]
pub struct EventContext {
    pub state: Arc<AppState>,
    pub app_to_ui_tx: AsyncSender<AppEvent>,
    pub done_tx: AsyncSender<Completion>,
    pub cancel: CancellationToken,
}

/// App's main loop. Session state is only touched from here, one event at a time.
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let (done_tx, done_rx) = kanal::unbounded_async::<Completion>();
    let ctx = EventContext {
        state,
        app_to_ui_tx,
        done_tx,
        cancel: cancel.clone(),
    };

    ctx.app_to_ui_tx.send(AppEvent::BackendReady).await?;
    render(&ctx).await?;

    // Set once input is gone; the loop ends when no prediction is running
    let mut draining = false;

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("[EVENT_LOOP] Cancelled");
                break;
            }
            event = ui_to_app_rx.recv() => {
                let Ok(event) = event else {
                    tracing::info!("[EVENT_LOOP] UI channel closed");
                    break;
                };
                tracing::debug!("[EVENT_LOOP] Event received: {:?}", std::mem::discriminant(&event));

                if matches!(event, AppEvent::Quit) {
                    break;
                }
                if matches!(event, AppEvent::InputClosed) {
                    if !ctx.state.session.lock().await.is_loading() {
                        break;
                    }
                    tracing::info!("[EVENT_LOOP] Input closed, waiting for prediction");
                    draining = true;
                    continue;
                }
                if handle_events(&ctx, event).await? {
                    render(&ctx).await?;
                }
            }
            done = done_rx.recv() => {
                if handle_completion(&ctx, done?).await {
                    render(&ctx).await?;
                }
                if draining && !ctx.state.session.lock().await.is_loading() {
                    break;
                }
            }
        }
    }

    ctx.state.in_flight.lock().await.cancel_all();
    Ok(())
}

/// Returns true when the session changed and the view must be redrawn
async fn handle_events(ctx: &EventContext, event: AppEvent) -> anyhow::Result<bool> {
    match event {
        AppEvent::FileChosen(file) => {
            handle_file_selection(ctx, file).await;
            Ok(true)
        }
        AppEvent::Predict => {
            handle_predict(ctx).await;
            Ok(true)
        }
        AppEvent::Reset => {
            handle_reset(ctx).await?;
            Ok(true)
        }
        AppEvent::CheckHealth => {
            handle_health_check(ctx);
            Ok(false)
        }
        AppEvent::ListClasses => {
            handle_class_listing(ctx);
            Ok(false)
        }
        AppEvent::Quit
        | AppEvent::InputClosed
        | AppEvent::Render(_)
        | AppEvent::ClearPicker
        | AppEvent::Notice(_)
        | AppEvent::ShowHealth(_)
        | AppEvent::ShowClasses(_)
        | AppEvent::BackendReady => {
            // UI-only events, ignore in backend
            Ok(false)
        }
    }
}

async fn handle_completion(ctx: &EventContext, done: Completion) -> bool {
    let mut session = ctx.state.session.lock().await;
    match done {
        Completion::Preview { ticket, uri } => {
            let applied = session.complete_preview(ticket, uri);
            tracing::debug!("[PREVIEW] Ready (applied: {})", applied);
            applied
        }
        Completion::Prediction { ticket, outcome } => {
            if let Err(e) = &outcome {
                tracing::warn!("[PREDICT] Failed: {}", e);
            }
            let applied = session.complete_predict(ticket, outcome);
            tracing::debug!("[PREDICT] Finished (applied: {})", applied);
            applied
        }
    }
}

async fn render(ctx: &EventContext) -> anyhow::Result<()> {
    let view = {
        let config = ctx.state.config.read().await;
        let session = ctx.state.session.lock().await;
        view::project(&session, &config.ui)
    };

    ctx.app_to_ui_tx.send(AppEvent::Render(view)).await?;
    Ok(())
}
