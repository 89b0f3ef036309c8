//! Render model of the control panel
//!
//! A `PanelView` is a pure function of the mirrored session and the theme.
//! Front ends draw it; the terminal host prints it as text or JSON.

use crate::controls::Slider;
use crate::player::{PlaybackSession, ThemePreference};
use crate::utils::format_time;
use serde::Serialize;
use std::fmt;

/// Icon shown on a panel button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Glyph {
    Play,
    Pause,
    Reset,
    VolumeOn,
    VolumeOff,
    Sun,
    Moon,
}

impl Glyph {
    /// Terminal symbol for the icon
    pub fn symbol(self) -> &'static str {
        match self {
            Glyph::Play => "▶",
            Glyph::Pause => "⏸",
            Glyph::Reset => "↺",
            Glyph::VolumeOn => "🔊",
            Glyph::VolumeOff => "🔇",
            Glyph::Sun => "☀",
            Glyph::Moon => "☾",
        }
    }
}

/// Everything a front end needs to draw the panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelView {
    /// Play button icon: pause while playing, play otherwise
    pub play_button: Glyph,
    pub reset_button: Glyph,
    /// Mute button icon
    pub mute_button: Glyph,
    pub seek: Slider,
    pub volume: Slider,
    /// "current / total" in MM:SS
    pub readout: String,
    pub theme: ThemePreference,
    /// Theme button icon: the theme a click switches to
    pub theme_button: Glyph,
}

impl PanelView {
    /// Build the view for a session
    pub fn new(session: &PlaybackSession, theme: ThemePreference) -> Self {
        Self {
            play_button: if session.is_playing() {
                Glyph::Pause
            } else {
                Glyph::Play
            },
            reset_button: Glyph::Reset,
            mute_button: if session.muted {
                Glyph::VolumeOff
            } else {
                Glyph::VolumeOn
            },
            seek: Slider::seek(session),
            volume: Slider::volume(session),
            readout: format!(
                "{} / {}",
                format_time(session.current_time),
                format_time(session.duration_secs())
            ),
            theme,
            theme_button: match theme {
                ThemePreference::Dark => Glyph::Sun,
                ThemePreference::Light => Glyph::Moon,
            },
        }
    }
}

impl fmt::Display for PanelView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {:>3}%  {}  {}  {}",
            self.play_button.symbol(),
            self.reset_button.symbol(),
            self.mute_button.symbol(),
            self.volume.render(10),
            (self.volume.value * 100.0).round() as u32,
            self.seek.render(30),
            self.readout,
            self.theme_button.symbol(),
        )
    }
}
