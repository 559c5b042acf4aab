use leafscan_core::preview::decode_preview;
use leafscan_types::SelectedFile;

use super::{Completion, EventContext};

pub async fn handle_file_selection(ctx: &EventContext, file: SelectedFile) {
    let name = file.name.clone();
    let job = {
        let mut session = ctx.state.session.lock().await;
        session.select_file(file)
    };

    let job = match job {
        Ok(job) => job,
        Err(e) => {
            tracing::warn!("[SELECT] Rejected {}: {}", name, e);
            return;
        }
    };

    tracing::info!("[SELECT] {} ({}, {} bytes)", name, job.file.mime, job.file.len());

    let cancel = ctx.state.in_flight.lock().await.start_preview(&ctx.cancel);
    let done_tx = ctx.done_tx.clone();

    tokio::spawn(async move {
        let ticket = job.ticket;
        if let Some(uri) = decode_preview(job.file, cancel).await {
            if let Err(e) = done_tx.send(Completion::Preview { ticket, uri }).await {
                tracing::error!("Failed to post preview: {}", e);
            }
        }
    });
}
