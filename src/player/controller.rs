//! Playback controller implementation for videopanel
//!
//! The controller attaches to a media surface, keeps the view-state mirror
//! subscribed to the surface's notifications while attached, and turns
//! control actions into surface commands plus optimistic mirror updates.

use crate::controls::{ControlAction, PanelView, Slider};
use crate::player::mirror::{EndBehavior, ViewStateMirror};
use crate::player::{PlaybackSession, PlaybackState, ThemePreference};
use crate::surface::{MediaSurface, Subscription, SurfaceEventKind};
use crate::utils::config::PlaybackConfig;
use crate::utils::error::{PanelError, Result};

use log::{debug, info};
use std::sync::{Arc, Weak};

/// Main playback controller
pub struct PlaybackController {
    mirror: ViewStateMirror,
    config: PlaybackConfig,

    /// Attached surface; `None` before activation and after deactivation
    surface: Option<Arc<dyn MediaSurface>>,

    /// Listener registrations, released on deactivation
    subscriptions: Vec<Subscription>,
}

impl PlaybackController {
    /// Create an inactive controller
    pub fn new(config: PlaybackConfig) -> Self {
        Self {
            mirror: ViewStateMirror::new(config.initial_volume),
            config,
            surface: None,
            subscriptions: Vec::new(),
        }
    }

    /// Attach to a surface and start mirroring it
    ///
    /// Every activation starts from a fresh, paused session with the dark
    /// theme. The surface is paused and given the configured volume; its
    /// position and duration reach the mirror through the usual notifications.
    pub fn activate(&mut self, surface: Arc<dyn MediaSurface>) -> Result<()> {
        if self.surface.is_some() {
            return Err(PanelError::InvalidState(
                "controller is already attached to a surface".to_string(),
            ));
        }

        self.mirror.reinitialize(self.config.initial_volume);

        let on_end = if self.config.rewind_on_end {
            EndBehavior::Rewind
        } else {
            EndBehavior::Hold
        };

        for kind in [
            SurfaceEventKind::Progress,
            SurfaceEventKind::MetadataReady,
            SurfaceEventKind::Ended,
        ] {
            let mirror = self.mirror.clone();
            // Weak: the listener lives inside the surface it points back to
            let weak_surface: Weak<dyn MediaSurface> = Arc::downgrade(&surface);

            let subscription = surface.subscribe(
                kind,
                Box::new(move |event| {
                    mirror.apply_event(event, on_end);
                    if kind == SurfaceEventKind::Ended && on_end == EndBehavior::Rewind {
                        if let Some(surface) = weak_surface.upgrade() {
                            surface.seek(0.0);
                        }
                    }
                }),
            );
            self.subscriptions.push(subscription);
        }

        let session = self.mirror.session();
        surface.pause();
        surface.set_volume(session.volume);
        surface.set_muted(session.muted);

        self.surface = Some(surface);
        info!("Playback controller activated");
        Ok(())
    }

    /// Detach from the surface and drop every subscription
    ///
    /// Safe to call when already inactive.
    pub fn deactivate(&mut self) {
        if self.surface.is_none() && self.subscriptions.is_empty() {
            return;
        }

        self.subscriptions.clear();
        self.surface = None;
        info!("Playback controller deactivated");
    }

    /// Whether a surface is attached
    pub fn is_active(&self) -> bool {
        self.surface.is_some()
    }

    /// Snapshot of the mirrored session
    pub fn session(&self) -> PlaybackSession {
        self.mirror.session()
    }

    /// Current theme
    pub fn theme(&self) -> ThemePreference {
        self.mirror.theme()
    }

    /// Render model for the current state
    pub fn view(&self) -> PanelView {
        PanelView::new(&self.mirror.session(), self.mirror.theme())
    }

    /// Play if paused, pause if playing
    ///
    /// The local state flips immediately, without waiting for the surface.
    pub fn toggle_play(&self) {
        let Some(surface) = self.attached("toggle_play") else {
            return;
        };

        match self.mirror.toggle_state() {
            PlaybackState::Playing => surface.play(),
            PlaybackState::Paused => surface.pause(),
        }
    }

    /// Seek to `time_secs` and echo it locally
    pub fn seek(&self, time_secs: f64) {
        let Some(surface) = self.attached("seek") else {
            return;
        };

        if !time_secs.is_finite() {
            debug!("Ignoring seek to {}", time_secs);
            return;
        }

        let target = self.mirror.echo_seek(time_secs);
        surface.seek(target);
    }

    /// Set the volume level; zero mutes and any other level unmutes
    pub fn set_volume(&self, level: f32) {
        let Some(surface) = self.attached("set_volume") else {
            return;
        };

        if !level.is_finite() {
            debug!("Ignoring volume level {}", level);
            return;
        }

        let level = level.clamp(0.0, 1.0);
        let mute_change = self.mirror.set_volume(level);
        surface.set_volume(level);
        if let Some(muted) = mute_change {
            surface.set_muted(muted);
        }
    }

    /// Mute or unmute, keeping the volume level for the unmute
    pub fn toggle_mute(&self) {
        let Some(surface) = self.attached("toggle_mute") else {
            return;
        };

        let (muted, restored) = self.mirror.toggle_mute();
        if let Some(level) = restored {
            surface.set_volume(level);
        }
        surface.set_muted(muted);
        debug!("Mute toggled: {}", muted);
    }

    /// Stop and return to the start
    ///
    /// Pauses the surface before seeking so the mirror and the surface agree.
    pub fn reset(&self) {
        let Some(surface) = self.attached("reset") else {
            return;
        };

        self.mirror.reset_position();
        surface.pause();
        surface.seek(0.0);
    }

    /// Switch between dark and light
    pub fn toggle_theme(&self) -> ThemePreference {
        let theme = self.mirror.toggle_theme();
        debug!("Theme: {:?}", theme);
        theme
    }

    /// Apply a control gesture
    ///
    /// Slider gestures are bounded by the slider they come from.
    pub fn apply(&self, action: ControlAction) {
        let session = self.mirror.session();

        match action {
            ControlAction::TogglePlay => self.toggle_play(),
            ControlAction::Seek(target) => self.seek(Slider::seek(&session).constrain(target)),
            ControlAction::SeekBy(delta) => {
                self.seek(Slider::seek(&session).constrain(session.current_time + delta))
            }
            ControlAction::SetVolume(level) => {
                self.set_volume(Slider::volume(&session).constrain(level as f64) as f32)
            }
            ControlAction::VolumeBy(delta) => {
                // Nudges start from the retained level, even while muted
                let target = session.volume + delta;
                self.set_volume(target.clamp(0.0, 1.0))
            }
            ControlAction::ToggleMute => self.toggle_mute(),
            ControlAction::Reset => self.reset(),
            ControlAction::ToggleTheme => {
                self.toggle_theme();
            }
        }
    }

    fn attached(&self, operation: &str) -> Option<&Arc<dyn MediaSurface>> {
        if self.surface.is_none() {
            debug!("{}: no media surface attached", operation);
        }
        self.surface.as_ref()
    }
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new(PlaybackConfig::default())
    }
}

impl Drop for PlaybackController {
    fn drop(&mut self) {
        self.deactivate();
    }
}
