use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use leafscan_client::HttpPredictionClient;
use tokio::signal;
use tokio::task::JoinSet;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod cli;
mod controller;
mod events;
mod picker;
mod render;
mod state;
mod ui;

#[cfg(test)]
mod tests;

use self::cli::Args;
use self::controller::AppController;
use self::state::AppState;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    setup_logging(args.verbose)?;

    let config = args.load_config()?;

    let client = HttpPredictionClient::new(config.network.clone())
        .context("Failed to build HTTP client")?;
    tracing::info!("Using prediction service at {}", client.base_url());

    let state = Arc::new(AppState::new(config, Arc::new(client)));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    // Shutdown future (Ctrl+C)
    let shutdown = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl+c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    let result = runtime.block_on(run(state, args.image, shutdown));

    // A pending stdin read never finishes on its own
    runtime.shutdown_timeout(Duration::from_millis(200));
    result
}

fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {e}"))
}

async fn run(
    state: Arc<AppState>,
    initial_image: Option<PathBuf>,
    shutdown: impl Future<Output = ()>,
) -> anyhow::Result<()> {
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks(initial_image);

    tokio::select! {
        _ = shutdown => {
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            log_exit(result);
        }
    }

    controller.shutdown();
    drain(&mut tasks).await;
    Ok(())
}

async fn drain(tasks: &mut JoinSet<anyhow::Result<()>>) {
    while let Some(result) = tasks.join_next().await {
        log_exit(result);
    }
}

fn log_exit(result: Result<anyhow::Result<()>, tokio::task::JoinError>) {
    match result {
        Ok(Ok(())) => tracing::debug!("task exited"),
        Ok(Err(e)) => tracing::error!("task exited with error: {:#}", e),
        Err(e) => tracing::error!("task panicked: {e}"),
    }
}
