//! Integration tests for the playback controller
//!
//! These tests drive the controller through the public API against a
//! recording surface and check both the mirrored state and the commands the
//! surface received.

use anyhow::Result;
use proptest::prelude::*;
use std::sync::Arc;
use videopanel::controls::{ControlAction, Glyph};
use videopanel::surface::{MediaSurface, SurfaceEvent};
use videopanel::utils::config::PlaybackConfig;
use videopanel::utils::format_time;
use videopanel::{PlaybackController, ThemePreference};
use videopanel_integration_tests::{PanelFixture, RecordingSurface, SurfaceCommand};

#[test]
fn test_time_readout_format() {
    assert_eq!(format_time(0.0), "00:00");
    assert_eq!(format_time(65.0), "01:05");
    assert_eq!(format_time(3599.0), "59:59");
    assert_eq!(format_time(3600.0), "60:00");
}

#[test]
fn test_metadata_then_progress_scenario() -> Result<()> {
    let fixture = PanelFixture::new()?;

    fixture.surface.emit(SurfaceEvent::MetadataReady { duration: 120.0 });
    assert_eq!(fixture.controller.view().seek.max, 120.0);

    fixture.surface.emit(SurfaceEvent::Progress { current_time: 45.0 });
    assert_eq!(fixture.controller.view().readout, "00:45 / 02:00");

    Ok(())
}

#[test]
fn test_seek_echo_precedes_notification() -> Result<()> {
    let fixture = PanelFixture::loaded(120.0)?;

    for target in [0.0, 0.1, 37.5, 119.9, 120.0] {
        fixture.controller.seek(target);
        assert_eq!(fixture.controller.session().current_time, target);
    }

    // A late notification from before the last seek overwrites the echo
    fixture.surface.emit(SurfaceEvent::Progress { current_time: 12.0 });
    assert_eq!(fixture.controller.session().current_time, 12.0);

    Ok(())
}

proptest! {
    #[test]
    fn test_seek_echo_holds_across_range(target in 0.0f64..=120.0) {
        let fixture = PanelFixture::loaded(120.0).unwrap();
        fixture.controller.seek(target);
        prop_assert_eq!(fixture.controller.session().current_time, target);
        prop_assert_eq!(fixture.surface.commands(), vec![SurfaceCommand::Seek(target)]);
    }

    #[test]
    fn test_seek_before_metadata_echoes_target(target in 0.0f64..=3600.0) {
        let fixture = PanelFixture::new().unwrap();
        fixture.controller.seek(target);
        prop_assert_eq!(fixture.controller.session().current_time, target);
    }
}

#[test]
fn test_toggle_play_twice_restores_state() -> Result<()> {
    let fixture = PanelFixture::loaded(60.0)?;
    let before = fixture.controller.session().state;

    fixture.controller.toggle_play();
    assert!(fixture.controller.session().is_playing());
    assert_eq!(fixture.controller.view().play_button, Glyph::Pause);

    fixture.controller.toggle_play();
    assert_eq!(fixture.controller.session().state, before);
    assert_eq!(
        fixture.surface.commands(),
        vec![SurfaceCommand::Play, SurfaceCommand::Pause]
    );

    Ok(())
}

#[test]
fn test_volume_level_drives_mute() -> Result<()> {
    let fixture = PanelFixture::loaded(60.0)?;

    fixture.controller.set_volume(0.0);
    assert!(fixture.controller.session().muted);
    assert_eq!(fixture.controller.view().mute_button, Glyph::VolumeOff);

    fixture.controller.set_volume(0.25);
    assert!(!fixture.controller.session().muted);

    assert_eq!(
        fixture.surface.commands(),
        vec![
            SurfaceCommand::SetVolume(0.0),
            SurfaceCommand::SetMuted(true),
            SurfaceCommand::SetVolume(0.25),
            SurfaceCommand::SetMuted(false),
        ]
    );

    Ok(())
}

#[test]
fn test_toggle_mute_restores_volume() -> Result<()> {
    let fixture = PanelFixture::loaded(60.0)?;
    fixture.controller.set_volume(0.7);
    fixture.surface.clear();

    fixture.controller.toggle_mute();
    let session = fixture.controller.session();
    assert!(session.muted);
    assert_eq!(fixture.controller.view().volume.value, 0.0);

    fixture.controller.toggle_mute();
    let session_after = fixture.controller.session();
    assert!(!session_after.muted);
    assert_eq!(session_after.volume, 0.7);
    assert_eq!(session.volume, 0.7);

    assert_eq!(
        fixture.surface.commands(),
        vec![SurfaceCommand::SetMuted(true), SurfaceCommand::SetMuted(false)]
    );

    Ok(())
}

#[test]
fn test_unmute_after_slider_zero_restores_last_level() -> Result<()> {
    let fixture = PanelFixture::loaded(60.0)?;
    fixture.controller.set_volume(0.6);
    fixture.controller.set_volume(0.0);
    fixture.surface.clear();

    fixture.controller.toggle_mute();
    let session = fixture.controller.session();
    assert!(!session.muted);
    assert_eq!(session.volume, 0.6);
    assert_eq!(
        fixture.surface.commands(),
        vec![SurfaceCommand::SetVolume(0.6), SurfaceCommand::SetMuted(false)]
    );

    Ok(())
}

#[test]
fn test_reset_from_any_state() -> Result<()> {
    let fixture = PanelFixture::loaded(90.0)?;
    fixture.controller.toggle_play();
    fixture.surface.emit(SurfaceEvent::Progress { current_time: 61.2 });
    fixture.surface.clear();

    fixture.controller.reset();
    let session = fixture.controller.session();
    assert_eq!(session.current_time, 0.0);
    assert!(!session.is_playing());
    assert_eq!(
        fixture.surface.commands(),
        vec![SurfaceCommand::Pause, SurfaceCommand::Seek(0.0)]
    );

    // Resetting an already reset panel changes nothing
    fixture.controller.reset();
    assert_eq!(fixture.controller.session().current_time, 0.0);
    assert!(!fixture.controller.session().is_playing());

    Ok(())
}

#[test]
fn test_ended_notification_pauses() -> Result<()> {
    let fixture = PanelFixture::loaded(30.0)?;
    fixture.controller.toggle_play();
    fixture.surface.emit(SurfaceEvent::Progress { current_time: 30.0 });
    fixture.surface.emit(SurfaceEvent::Ended);

    let session = fixture.controller.session();
    assert!(!session.is_playing());
    assert_eq!(session.current_time, 30.0);
    assert_eq!(fixture.controller.view().play_button, Glyph::Play);

    Ok(())
}

#[test]
fn test_ended_with_rewind_seeks_surface() -> Result<()> {
    let fixture = PanelFixture::with_config(PlaybackConfig {
        rewind_on_end: true,
        ..PlaybackConfig::default()
    })?;
    fixture.surface.emit(SurfaceEvent::MetadataReady { duration: 30.0 });
    fixture.controller.toggle_play();
    fixture.surface.clear();

    fixture.surface.emit(SurfaceEvent::Ended);
    assert_eq!(fixture.controller.session().current_time, 0.0);
    assert_eq!(fixture.surface.commands(), vec![SurfaceCommand::Seek(0.0)]);

    Ok(())
}

#[test]
fn test_theme_starts_dark_on_every_activation() -> Result<()> {
    let surface = Arc::new(RecordingSurface::new());
    let mut controller = PlaybackController::default();

    for _ in 0..3 {
        controller.activate(Arc::clone(&surface) as Arc<dyn MediaSurface>)?;
        assert_eq!(controller.theme(), ThemePreference::Dark);
        controller.apply(ControlAction::ToggleTheme);
        assert_eq!(controller.theme(), ThemePreference::Light);
        assert_eq!(controller.view().theme_button, Glyph::Moon);
        controller.deactivate();
    }

    Ok(())
}

#[test]
fn test_no_updates_after_deactivation() -> Result<()> {
    let mut fixture = PanelFixture::loaded(60.0)?;
    assert_eq!(fixture.surface.listener_count(), 3);

    fixture.controller.deactivate();
    assert_eq!(fixture.surface.listener_count(), 0);

    fixture.surface.emit(SurfaceEvent::Progress { current_time: 42.0 });
    fixture.surface.emit(SurfaceEvent::Ended);
    assert_eq!(fixture.controller.session().current_time, 0.0);

    // Commands become no-ops again
    fixture.surface.clear();
    fixture.controller.toggle_play();
    fixture.controller.seek(10.0);
    assert!(fixture.surface.commands().is_empty());
    assert!(!fixture.controller.session().is_playing());

    Ok(())
}

#[test]
fn test_activation_pushes_initial_volume() -> Result<()> {
    let surface = Arc::new(RecordingSurface::new());
    let mut controller = PlaybackController::new(PlaybackConfig {
        initial_volume: 0.5,
        ..PlaybackConfig::default()
    });
    controller.activate(Arc::clone(&surface) as Arc<dyn MediaSurface>)?;

    assert_eq!(
        surface.commands(),
        vec![
            SurfaceCommand::Pause,
            SurfaceCommand::SetVolume(0.5),
            SurfaceCommand::SetMuted(false)
        ]
    );
    assert_eq!(controller.session().volume, 0.5);

    Ok(())
}

#[test]
fn test_text_commands_drive_controller() -> Result<()> {
    let fixture = PanelFixture::loaded(300.0)?;

    for command in ["play", "seek 2:30", "rw", "vol 0.5", "-", "mute"] {
        fixture.controller.apply(command.parse::<ControlAction>()?);
    }

    let session = fixture.controller.session();
    assert!(session.is_playing());
    assert!((session.current_time - 145.0).abs() < 1e-9);
    assert!((session.volume - 0.45).abs() < 1e-6);
    assert!(session.muted);
    assert_eq!(fixture.controller.view().readout, "02:25 / 05:00");

    Ok(())
}
