//! Player module for videopanel
//!
//! This module keeps a local mirror of a media surface's playback state and
//! maps transport controls onto the surface. The surface stays the source of
//! truth; the mirror is updated optimistically by commands and corrected by
//! the surface's notifications.

mod controller;
mod mirror;

pub use controller::PlaybackController;
pub use mirror::ViewStateMirror;

use serde::{Deserialize, Serialize};

/// Playback state as mirrored locally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// Not playing (initial state, after pause, reset or end of media)
    #[default]
    Paused,

    /// Currently playing
    Playing,
}

impl PlaybackState {
    /// The other state
    pub fn toggled(self) -> Self {
        match self {
            PlaybackState::Paused => PlaybackState::Playing,
            PlaybackState::Playing => PlaybackState::Paused,
        }
    }
}

/// Light/dark preference of the panel
///
/// Starts dark on every activation and is never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Dark,
    Light,
}

impl ThemePreference {
    /// The other theme
    pub fn toggled(self) -> Self {
        match self {
            ThemePreference::Dark => ThemePreference::Light,
            ThemePreference::Light => ThemePreference::Dark,
        }
    }
}

/// Mirrored playback session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaybackSession {
    /// Local play/pause state
    pub state: PlaybackState,

    /// Playback position in seconds
    pub current_time: f64,

    /// Total length in seconds, unknown until the surface reports metadata
    pub duration: Option<f64>,

    /// Retained volume level (0.0 to 1.0), kept while muted
    pub volume: f32,

    /// Mute flag
    pub muted: bool,

    /// Level restored when unmuting a zeroed volume
    pub last_nonzero_volume: f32,
}

impl PlaybackSession {
    /// Fresh session at the given volume level
    pub fn new(initial_volume: f32) -> Self {
        let volume = initial_volume.clamp(0.0, 1.0);
        Self {
            state: PlaybackState::Paused,
            current_time: 0.0,
            duration: None,
            volume,
            muted: volume == 0.0,
            last_nonzero_volume: if volume > 0.0 { volume } else { 1.0 },
        }
    }

    /// Whether the session is mirrored as playing
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Duration in seconds, 0 while unknown
    pub fn duration_secs(&self) -> f64 {
        self.duration.unwrap_or(0.0)
    }

    /// Level actually audible: 0 while muted
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.volume
        }
    }
}

impl Default for PlaybackSession {
    fn default() -> Self {
        Self::new(1.0)
    }
}
