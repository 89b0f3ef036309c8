//! videopanel - a media playback panel
//!
//! Mirrors the state of a media surface (play state, position, duration,
//! volume, mute) and maps transport controls onto it: play/pause, seek,
//! volume, mute, reset and a light/dark theme toggle.

pub mod controls;
pub mod player;
pub mod surface;
pub mod utils;

pub use controls::{ControlAction, PanelView};
pub use player::{PlaybackController, PlaybackSession, PlaybackState, ThemePreference};
pub use surface::{MediaSurface, SimulatedSurface, SurfaceEvent, SurfaceEventKind};
pub use utils::error::{PanelError, Result};
