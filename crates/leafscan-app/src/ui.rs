use std::path::PathBuf;
use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use leafscan_config::{ColorMode, Config};
use leafscan_types::AppEvent;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::picker::FilePicker;
use crate::render::Painter;

const HELP: &str = "\
Commands:
  open <path>   select a leaf image (alias: o)
  predict       send the image for analysis (alias: p)
  reset         clear the image and results (alias: r)
  health        show prediction service status
  classes       list the diseases the model knows
  help          show this message
  quit          exit (alias: q)";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Open(PathBuf),
    Predict,
    Reset,
    Health,
    Classes,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "" => Command::Empty,
            "open" | "o" if !rest.is_empty() => Command::Open(PathBuf::from(unquote(rest))),
            "predict" | "p" => Command::Predict,
            "reset" | "r" => Command::Reset,
            "health" => Command::Health,
            "classes" => Command::Classes,
            "help" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            _ => Command::Unknown(line.to_string()),
        }
    }
}

fn unquote(path: &str) -> &str {
    path.strip_prefix('"')
        .and_then(|p| p.strip_suffix('"'))
        .or_else(|| path.strip_prefix('\'').and_then(|p| p.strip_suffix('\'')))
        .unwrap_or(path)
}

pub fn use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => atty::is(atty::Stream::Stdout),
    }
}

/// Terminal front end: reads commands from stdin, draws whatever the app sends
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    config: Arc<RwLock<Config>>,
    initial_image: Option<PathBuf>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let (painter, base_url) = {
        let config = config.read().await;
        (
            Painter::new(use_color(config.ui.color)),
            config.network.base_url.clone(),
        )
    };
    let mut picker = FilePicker::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print!("{}", painter.banner());
    println!("Prediction service: {base_url}");
    println!("Type `help` for commands.");

    if let Some(path) = initial_image {
        open(&mut picker, path, &ui_to_app_tx).await?;
    }

    let mut stdin_open = true;
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                // The backend may have posted a final render right before stopping
                while let Ok(Some(event)) = app_to_ui_rx.try_recv() {
                    draw(&painter, &mut picker, event);
                }
                break;
            }
            event = app_to_ui_rx.recv() => {
                let Ok(event) = event else { break };
                draw(&painter, &mut picker, event);
            }
            line = lines.next_line(), if stdin_open => {
                let Some(line) = line? else {
                    // Piped input ran out; let a running prediction finish
                    stdin_open = false;
                    ui_to_app_tx.send(AppEvent::InputClosed).await?;
                    continue;
                };

                let event = match Command::parse(&line) {
                    Command::Open(path) => {
                        open(&mut picker, path, &ui_to_app_tx).await?;
                        None
                    }
                    Command::Predict => Some(AppEvent::Predict),
                    Command::Reset => Some(AppEvent::Reset),
                    Command::Health => Some(AppEvent::CheckHealth),
                    Command::Classes => Some(AppEvent::ListClasses),
                    Command::Help => {
                        println!("{HELP}");
                        None
                    }
                    Command::Quit => {
                        ui_to_app_tx.send(AppEvent::Quit).await?;
                        break;
                    }
                    Command::Empty => None,
                    Command::Unknown(text) => {
                        println!("Unknown command: {text}\n{HELP}");
                        None
                    }
                };

                if let Some(event) = event {
                    ui_to_app_tx.send(event).await?;
                }
            }
        }
    }

    tracing::info!("[UI] Stopping");
    Ok(())
}

fn draw(painter: &Painter, picker: &mut FilePicker, event: AppEvent) {
    match event {
        AppEvent::Render(view) => print!("{}", painter.session(&view)),
        AppEvent::ClearPicker => picker.clear(),
        AppEvent::Notice(text) => println!("{text}"),
        AppEvent::ShowHealth(report) => print!("{}", painter.health(&report)),
        AppEvent::ShowClasses(labels) => print!("{}", painter.classes(&labels)),
        AppEvent::BackendReady => tracing::debug!("[UI] Backend ready"),
        _ => {}
    }
}

async fn open(
    picker: &mut FilePicker,
    path: PathBuf,
    ui_to_app_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    match picker.pick(&path).await {
        Ok(Some(file)) => ui_to_app_tx.send(AppEvent::FileChosen(file)).await?,
        Ok(None) => println!("{} is already selected (reset to pick it again)", path.display()),
        Err(e) => {
            tracing::warn!("{:#}", e);
            println!("{e:#}");
        }
    }
    Ok(())
}
