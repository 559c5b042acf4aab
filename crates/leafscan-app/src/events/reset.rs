use leafscan_types::AppEvent;

use super::EventContext;

pub async fn handle_reset(ctx: &EventContext) -> anyhow::Result<()> {
    ctx.state.in_flight.lock().await.cancel_all();
    ctx.state.session.lock().await.reset();
    tracing::info!("[RESET] Session cleared");

    ctx.app_to_ui_tx.send(AppEvent::ClearPicker).await?;
    Ok(())
}
