use leafscan_core::SessionError;

use super::{Completion, EventContext};

pub async fn handle_predict(ctx: &EventContext) {
    let job = {
        let mut session = ctx.state.session.lock().await;
        session.begin_predict()
    };

    let job = match job {
        Ok(job) => job,
        Err(SessionError::Busy) => {
            tracing::debug!("[PREDICT] Already running, ignored");
            return;
        }
        Err(e) => {
            tracing::warn!("[PREDICT] Not started: {}", e);
            return;
        }
    };

    tracing::info!("[PREDICT] Uploading {}", job.file.name);

    let cancel = ctx.state.in_flight.lock().await.start_predict(&ctx.cancel);
    let service = ctx.state.service.clone();
    let done_tx = ctx.done_tx.clone();

    tokio::spawn(async move {
        let ticket = job.ticket;
        let file = job.file;
        let request = tokio::spawn(async move { service.predict(&file).await });
        let abort = request.abort_handle();

        // A panicking request still has to leave Loading
        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                abort.abort();
                tracing::debug!("[PREDICT] Request cancelled");
                return;
            }
            joined = request => match joined {
                Ok(result) => result.map_err(SessionError::from),
                Err(e) => {
                    tracing::error!("[PREDICT] Request task failed: {}", e);
                    Err(SessionError::transport(None))
                }
            }
        };

        if let Err(e) = done_tx.send(Completion::Prediction { ticket, outcome }).await {
            tracing::error!("Failed to post prediction: {}", e);
        }
    });
}
