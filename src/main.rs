use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

use videopanel::controls::{ControlAction, PanelView};
use videopanel::surface::{MediaSurface, SimulatedSurface};
use videopanel::utils::{self, Config};
use videopanel::PlaybackController;

/// videopanel - drive a playback panel from the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Media resource URL (overrides the configured source)
    #[arg(short, long, value_name = "URL")]
    source: Option<String>,

    /// Length of the simulated resource in seconds
    #[arg(long, value_name = "SECS")]
    duration: Option<f64>,

    /// Initial volume (0-100)
    #[arg(short, long, value_name = "VOLUME")]
    volume: Option<u8>,

    /// Print the panel as JSON instead of a text line
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = utils::load_config()?;
    if let Some(source) = args.source {
        config.source.url = source;
    }
    if let Some(duration) = args.duration {
        config.playback.simulated_duration = duration;
    }
    if let Some(volume) = args.volume {
        config.playback.initial_volume = f32::from(volume.min(100)) / 100.0;
    }
    config.validate()?;

    let log_level = if args.debug {
        "debug"
    } else {
        config.general.log_level.as_str()
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level))
        .format_timestamp_millis()
        .init();

    info!("Starting videopanel v{}", env!("CARGO_PKG_VERSION"));

    run(config, args.json).await
}

async fn run(config: Config, json: bool) -> Result<()> {
    let surface = Arc::new(SimulatedSurface::new(
        config.source.url.clone(),
        config.playback.simulated_duration,
    ));

    let mut controller = PlaybackController::new(config.playback.clone());
    controller.activate(Arc::clone(&surface) as Arc<dyn MediaSurface>)?;

    let tick_interval = Duration::from_millis(config.playback.tick_interval_ms);
    let mut ticker = tokio::time::interval(tick_interval);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last_view: Option<PanelView> = None;

    println!(
        "Playing {} (commands: play, seek <t>, ff, rw, vol <0-1>, +, -, mute, reset, theme, quit)",
        surface.source()
    );

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                surface.tick(tick_interval.as_secs_f64());
            }
            line = lines.next_line() => {
                match line? {
                    Some(line) if is_quit(&line) => break,
                    Some(line) if line.trim().is_empty() => {}
                    Some(line) => match line.parse::<ControlAction>() {
                        Ok(action) => {
                            debug!("Action: {:?}", action);
                            controller.apply(action);
                        }
                        Err(e) => warn!("{}", e),
                    },
                    // stdin closed
                    None => break,
                }
            }
        }

        let view = controller.view();
        if last_view.as_ref() != Some(&view) {
            print_view(&view, json)?;
            last_view = Some(view);
        }
    }

    controller.deactivate();
    info!("Shutting down");
    Ok(())
}

fn is_quit(line: &str) -> bool {
    matches!(line.trim(), "q" | "quit" | "exit")
}

fn print_view(view: &PanelView, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(view)?);
    } else {
        println!("{}", view);
    }
    Ok(())
}
