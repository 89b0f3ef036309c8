//! Control surface for videopanel
//!
//! User gestures arrive as [`ControlAction`]s. Slider gestures are bounded by
//! the slider they come from before they reach the controller; the text
//! command syntax used by the terminal host is parsed here as well.

mod slider;
mod view;

pub use slider::{Slider, SEEK_STEP_SECS, VOLUME_STEP};
pub use view::{Glyph, PanelView};

use crate::utils::error::{IntoPanelError, PanelError, Result};
use std::str::FromStr;

/// Seconds skipped by a relative seek without an explicit amount
pub const SEEK_NUDGE_SECS: f64 = 5.0;

/// Volume change of one nudge
pub const VOLUME_NUDGE: f32 = 0.05;

/// A discrete user gesture on the panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlAction {
    /// Play/pause button
    TogglePlay,

    /// Seek slider dragged to a position in seconds
    Seek(f64),

    /// Skip relative to the mirrored position (negative for backward)
    SeekBy(f64),

    /// Volume slider dragged to a level (0.0 to 1.0)
    SetVolume(f32),

    /// Nudge the volume up or down
    VolumeBy(f32),

    /// Mute button
    ToggleMute,

    /// Reset button
    Reset,

    /// Theme button
    ToggleTheme,
}

impl FromStr for ControlAction {
    type Err = PanelError;

    /// Parse a terminal command such as `seek 1:30`, `vol 0.4` or `mute`
    fn from_str(input: &str) -> Result<Self> {
        let mut words = input.split_whitespace();
        let command = words
            .next()
            .ok_or_else(|| PanelError::InvalidInput("empty command".to_string()))?
            .to_ascii_lowercase();
        let argument = words.next();

        if let Some(extra) = words.next() {
            return Err(PanelError::InvalidInput(format!(
                "unexpected argument '{}'",
                extra
            )));
        }

        let action = match (command.as_str(), argument) {
            ("play" | "pause" | "p" | "space" | "toggle", None) => ControlAction::TogglePlay,
            ("seek" | "s", Some(target)) => ControlAction::Seek(parse_time(target)?),
            ("ff" | "forward", amount) => ControlAction::SeekBy(parse_nudge(amount)?),
            ("rw" | "back", amount) => ControlAction::SeekBy(-parse_nudge(amount)?),
            ("vol" | "volume" | "v", Some(level)) => {
                ControlAction::SetVolume(level.parse::<f32>().input_err("Parsing volume level")?)
            }
            ("+", None) => ControlAction::VolumeBy(VOLUME_NUDGE),
            ("-", None) => ControlAction::VolumeBy(-VOLUME_NUDGE),
            ("mute" | "m", None) => ControlAction::ToggleMute,
            ("reset" | "r", None) => ControlAction::Reset,
            ("theme" | "t", None) => ControlAction::ToggleTheme,
            ("seek" | "s" | "vol" | "volume" | "v", None) => {
                return Err(PanelError::InvalidInput(format!(
                    "'{}' needs a value",
                    command
                )))
            }
            (_, _) => {
                return Err(PanelError::InvalidInput(format!(
                    "unknown command '{}'",
                    input.trim()
                )))
            }
        };

        Ok(action)
    }
}

/// Parse seconds given as `90`, `90.5` or `1:30`
pub fn parse_time(text: &str) -> Result<f64> {
    match text.split_once(':') {
        Some((minutes, seconds)) => {
            let minutes = minutes.parse::<u64>().input_err("Parsing minutes")?;
            let seconds = seconds.parse::<f64>().input_err("Parsing seconds")?;
            if !(0.0..60.0).contains(&seconds) {
                return Err(PanelError::InvalidInput(format!(
                    "seconds out of range in '{}'",
                    text
                )));
            }
            Ok(minutes as f64 * 60.0 + seconds)
        }
        None => text.parse::<f64>().input_err("Parsing seconds"),
    }
}

fn parse_nudge(amount: Option<&str>) -> Result<f64> {
    match amount {
        Some(text) => parse_time(text),
        None => Ok(SEEK_NUDGE_SECS),
    }
}
