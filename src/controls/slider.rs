//! Slider model shared by the seek bar and the volume control

use crate::player::PlaybackSession;
use serde::Serialize;

/// Seek bar granularity in seconds
pub const SEEK_STEP_SECS: f64 = 0.1;

/// Volume slider granularity
pub const VOLUME_STEP: f64 = 0.01;

/// A bounded, stepped slider
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Slider {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub value: f64,
}

impl Slider {
    /// Create a slider; `value` is constrained to the domain and step grid
    pub fn new(min: f64, max: f64, step: f64, value: f64) -> Self {
        let max = if max.is_finite() { max.max(min) } else { min };
        let mut slider = Self {
            min,
            max,
            step,
            value: min,
        };
        slider.value = slider.constrain(value);
        slider
    }

    /// Seek bar over `[0, duration]`
    ///
    /// The domain collapses to `[0, 0]` until the duration is known.
    pub fn seek(session: &PlaybackSession) -> Self {
        Self::new(0.0, session.duration_secs(), SEEK_STEP_SECS, session.current_time)
    }

    /// Volume slider over `[0, 1]`, reading 0 while muted
    pub fn volume(session: &PlaybackSession) -> Self {
        Self::new(0.0, 1.0, VOLUME_STEP, session.effective_volume() as f64)
    }

    /// Value the slider would settle on if dragged to `input`
    pub fn constrain(&self, input: f64) -> f64 {
        if !input.is_finite() {
            return self.min;
        }

        let clamped = input.clamp(self.min, self.max);
        if self.step <= 0.0 {
            return clamped;
        }

        let snapped = self.min + ((clamped - self.min) / self.step).round() * self.step;
        snapped.clamp(self.min, self.max)
    }

    /// Position of the thumb as a fraction of the track
    pub fn fraction(&self) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            0.0
        } else {
            (self.value - self.min) / span
        }
    }

    /// Text rendering of the track, `width` cells wide
    pub fn render(&self, width: usize) -> String {
        let filled = ((self.fraction() * width as f64).round() as usize).min(width);
        format!("[{}{}]", "=".repeat(filled), "-".repeat(width - filled))
    }
}
