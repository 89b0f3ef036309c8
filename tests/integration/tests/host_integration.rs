//! Integration tests for the pieces the terminal host wires together:
//! a clock-driven simulated surface and configuration loading.

use anyhow::Result;
use serial_test::serial;
use std::sync::Arc;
use std::time::Duration;
use videopanel::controls::ControlAction;
use videopanel::surface::{MediaSurface, SimulatedSurface};
use videopanel::utils::config::{Config, DEFAULT_SOURCE_URL};
use videopanel::{PanelError, PlaybackController};

const TICK: Duration = Duration::from_millis(250);

fn attach(duration: f64) -> Result<(PlaybackController, Arc<SimulatedSurface>)> {
    let surface = Arc::new(SimulatedSurface::new("test://clip.mp4", duration));
    let mut controller = PlaybackController::default();
    controller.activate(Arc::clone(&surface) as Arc<dyn MediaSurface>)?;
    Ok((controller, surface))
}

#[tokio::test(start_paused = true)]
async fn test_clock_driven_playback_reaches_end() -> Result<()> {
    let (controller, surface) = attach(2.0)?;
    let mut ticker = tokio::time::interval(TICK);

    ticker.tick().await;
    surface.tick(0.0);
    assert_eq!(controller.view().readout, "00:00 / 00:02");

    controller.toggle_play();
    for _ in 0..4 {
        ticker.tick().await;
        surface.tick(TICK.as_secs_f64());
    }
    assert!(controller.session().is_playing());
    assert_eq!(controller.session().current_time, 1.0);

    for _ in 0..6 {
        ticker.tick().await;
        surface.tick(TICK.as_secs_f64());
    }
    let session = controller.session();
    assert!(!session.is_playing());
    assert_eq!(session.current_time, 2.0);
    assert_eq!(controller.view().readout, "00:02 / 00:02");

    // Playing again after the end starts over
    controller.toggle_play();
    ticker.tick().await;
    surface.tick(TICK.as_secs_f64());
    assert!(controller.session().is_playing());
    assert_eq!(controller.session().current_time, 0.25);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_optimistic_echo_then_surface_confirmation() -> Result<()> {
    let (controller, surface) = attach(60.0)?;
    surface.tick(0.0);

    controller.apply(ControlAction::Seek(200.0));
    assert_eq!(controller.session().current_time, 60.0);

    controller.apply(ControlAction::Seek(30.0));
    assert!((controller.session().current_time - 30.0).abs() < 1e-9);

    tokio::time::sleep(TICK).await;
    surface.tick(0.0);
    assert!((controller.session().current_time - surface.position()).abs() < 1e-9);

    Ok(())
}

#[test]
#[serial]
fn test_env_overrides_config() -> Result<()> {
    std::env::set_var("VIDEOPANEL_SOURCE_URL", "file:///media/intro.mp4");
    std::env::set_var("VIDEOPANEL_VOLUME", "0.3");
    let loaded = Config::load();
    std::env::remove_var("VIDEOPANEL_SOURCE_URL");
    std::env::remove_var("VIDEOPANEL_VOLUME");

    let config = loaded?;
    assert_eq!(config.source.url, "file:///media/intro.mp4");
    assert_eq!(config.playback.initial_volume, 0.3);

    Ok(())
}

#[test]
#[serial]
fn test_invalid_env_volume_rejected() {
    std::env::set_var("VIDEOPANEL_VOLUME", "loud");
    let loaded = Config::load();
    std::env::remove_var("VIDEOPANEL_VOLUME");

    assert!(matches!(loaded, Err(PanelError::Config(_))));
}

#[test]
#[serial]
fn test_out_of_range_env_volume_fails_validation() {
    std::env::set_var("VIDEOPANEL_VOLUME", "1.5");
    let loaded = Config::load();
    std::env::remove_var("VIDEOPANEL_VOLUME");

    assert!(matches!(loaded, Err(PanelError::Config(_))));
}

#[test]
fn test_default_source_is_builtin_resource() {
    assert_eq!(Config::default().source.url, DEFAULT_SOURCE_URL);
}
