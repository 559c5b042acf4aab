use leafscan_types::AppEvent;

use super::EventContext;

/// Query `/api/health` without blocking the event loop
pub fn handle_health_check(ctx: &EventContext) {
    let service = ctx.state.service.clone();
    let tx = ctx.app_to_ui_tx.clone();

    tokio::spawn(async move {
        let event = match service.health().await {
            Ok(report) => AppEvent::ShowHealth(report),
            Err(e) => {
                tracing::warn!("Health check failed: {}", e);
                AppEvent::Notice(format!("Health check failed: {e}"))
            }
        };
        if let Err(e) = tx.send(event).await {
            tracing::error!("Failed to send health report to UI: {}", e);
        }
    });
}

/// Query `/api/classes` without blocking the event loop
pub fn handle_class_listing(ctx: &EventContext) {
    let service = ctx.state.service.clone();
    let tx = ctx.app_to_ui_tx.clone();

    tokio::spawn(async move {
        let event = match service.classes().await {
            Ok(labels) => AppEvent::ShowClasses(labels),
            Err(e) => {
                tracing::warn!("Class listing failed: {}", e);
                AppEvent::Notice(format!("Could not list classes: {e}"))
            }
        };
        if let Err(e) = tx.send(event).await {
            tracing::error!("Failed to send classes to UI: {}", e);
        }
    });
}
