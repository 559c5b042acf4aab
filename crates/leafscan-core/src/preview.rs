use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use leafscan_types::{PreviewDataUri, SelectedFile};
use tokio_util::sync::CancellationToken;

/// Encode a file as `data:<mime>;base64,<payload>`
pub fn encode_data_uri(file: &SelectedFile) -> PreviewDataUri {
    let payload = BASE64.encode(&file.bytes);
    PreviewDataUri::new(format!("data:{};base64,{}", file.mime, payload))
}

/// Encode off the async threads. `None` when cancelled first or the worker died.
pub async fn decode_preview(
    file: SelectedFile,
    cancel: CancellationToken,
) -> Option<PreviewDataUri> {
    let name = file.name.clone();
    let task = tokio::task::spawn_blocking(move || encode_data_uri(&file));

    tokio::select! {
        biased;
        _ = cancel.cancelled() => {
            tracing::debug!("Preview of {} cancelled", name);
            None
        }
        result = task => match result {
            Ok(uri) => Some(uri),
            Err(e) => {
                tracing::error!("Preview worker for {} failed: {}", name, e);
                None
            }
        }
    }
}
