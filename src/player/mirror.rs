//! View-state mirror
//!
//! Shared, lock-protected copy of the session. Surface listeners and the
//! controller both write to it; every method takes the lock for the
//! duration of one update only.

use crate::player::{PlaybackSession, PlaybackState, ThemePreference};
use crate::surface::SurfaceEvent;
use log::{debug, info, trace, warn};
use parking_lot::RwLock;
use std::sync::Arc;

#[derive(Debug)]
struct MirrorState {
    session: PlaybackSession,
    theme: ThemePreference,
}

/// Locally held approximation of the surface's state
#[derive(Debug, Clone)]
pub struct ViewStateMirror {
    inner: Arc<RwLock<MirrorState>>,
}

/// What an `Ended` notification should do with the position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EndBehavior {
    Hold,
    Rewind,
}

impl ViewStateMirror {
    /// Create a mirror for a fresh session
    pub fn new(initial_volume: f32) -> Self {
        Self {
            inner: Arc::new(RwLock::new(MirrorState {
                session: PlaybackSession::new(initial_volume),
                theme: ThemePreference::default(),
            })),
        }
    }

    /// Snapshot of the mirrored session
    pub fn session(&self) -> PlaybackSession {
        self.inner.read().session.clone()
    }

    /// Current theme
    pub fn theme(&self) -> ThemePreference {
        self.inner.read().theme
    }

    /// Start over: fresh session and the default theme
    pub(crate) fn reinitialize(&self, initial_volume: f32) {
        let mut inner = self.inner.write();
        inner.session = PlaybackSession::new(initial_volume);
        inner.theme = ThemePreference::default();
    }

    /// Apply a surface notification
    pub(crate) fn apply_event(&self, event: &SurfaceEvent, on_end: EndBehavior) {
        match *event {
            SurfaceEvent::Progress { current_time } => self.on_progress(current_time),
            SurfaceEvent::MetadataReady { duration } => self.on_metadata(duration),
            SurfaceEvent::Ended => self.on_ended(on_end),
        }
    }

    fn on_progress(&self, current_time: f64) {
        if !current_time.is_finite() {
            warn!("Ignoring non-finite progress time {}", current_time);
            return;
        }

        let mut inner = self.inner.write();
        let session = &mut inner.session;
        let mut time = current_time.max(0.0);
        if let Some(duration) = session.duration {
            time = time.min(duration);
        }
        session.current_time = time;
        trace!("Progress {:.2}s", time);
    }

    fn on_metadata(&self, duration: f64) {
        if !duration.is_finite() || duration < 0.0 {
            warn!("Ignoring unusable duration {}; keeping it unknown", duration);
            return;
        }

        let mut inner = self.inner.write();
        let session = &mut inner.session;
        session.duration = Some(duration);
        session.current_time = session.current_time.min(duration);
        info!("Media duration: {:.1}s", duration);
    }

    fn on_ended(&self, on_end: EndBehavior) {
        let mut inner = self.inner.write();
        let session = &mut inner.session;
        session.state = PlaybackState::Paused;
        session.current_time = match on_end {
            EndBehavior::Rewind => 0.0,
            EndBehavior::Hold => session.duration.unwrap_or(session.current_time),
        };
        info!("End of media ({:?}), position {:.1}s", on_end, session.current_time);
    }

    /// Flip the local play state; returns the new state
    pub(crate) fn toggle_state(&self) -> PlaybackState {
        let mut inner = self.inner.write();
        inner.session.state = inner.session.state.toggled();
        inner.session.state
    }

    /// Echo a seek; returns the position actually recorded
    ///
    /// The target is held to `[0, duration]` once the duration is known.
    pub(crate) fn echo_seek(&self, target: f64) -> f64 {
        let mut inner = self.inner.write();
        let session = &mut inner.session;
        let mut time = target.max(0.0);
        if let Some(duration) = session.duration {
            time = time.min(duration);
        }
        session.current_time = time;
        time
    }

    /// Record a volume change; returns the mute flag if it changed
    ///
    /// A zero level mutes, any other level unmutes.
    pub(crate) fn set_volume(&self, level: f32) -> Option<bool> {
        let mut inner = self.inner.write();
        let session = &mut inner.session;
        session.volume = level;
        if level > 0.0 {
            session.last_nonzero_volume = level;
        }

        let muted = level == 0.0;
        if session.muted != muted {
            session.muted = muted;
            debug!("Volume {:.2} {}", level, if muted { "muted" } else { "unmuted" });
            Some(muted)
        } else {
            None
        }
    }

    /// Flip the mute flag; returns the new flag and a level to restore
    ///
    /// Muting keeps the retained level. Unmuting a level that was zeroed
    /// restores the last non-zero level.
    pub(crate) fn toggle_mute(&self) -> (bool, Option<f32>) {
        let mut inner = self.inner.write();
        let session = &mut inner.session;
        session.muted = !session.muted;

        if !session.muted && session.volume == 0.0 {
            session.volume = session.last_nonzero_volume;
            return (false, Some(session.volume));
        }

        (session.muted, None)
    }

    /// Stop locally and return to the start
    pub(crate) fn reset_position(&self) {
        let mut inner = self.inner.write();
        inner.session.current_time = 0.0;
        inner.session.state = PlaybackState::Paused;
    }

    /// Flip the theme; returns the new theme
    pub(crate) fn toggle_theme(&self) -> ThemePreference {
        let mut inner = self.inner.write();
        inner.theme = inner.theme.toggled();
        inner.theme
    }
}
