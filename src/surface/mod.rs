//! Media surface module for videopanel
//!
//! A media surface is the object that actually decodes and renders the
//! resource. The panel never owns playback: it issues fire-and-forget
//! transport commands and learns the outcome from notifications the
//! surface delivers later.

mod events;
mod simulated;

pub use events::{EventDispatcher, Subscription};
pub use simulated::SimulatedSurface;

/// Notification emitted by a media surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceEvent {
    /// Playback position moved (fired continuously while playing and after seeks)
    Progress { current_time: f64 },

    /// Total duration became known
    MetadataReady { duration: f64 },

    /// Playback reached the end of the resource
    Ended,
}

/// Discriminant used to subscribe to one kind of notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceEventKind {
    Progress,
    MetadataReady,
    Ended,
}

impl SurfaceEvent {
    /// Kind of this notification
    pub fn kind(&self) -> SurfaceEventKind {
        match self {
            SurfaceEvent::Progress { .. } => SurfaceEventKind::Progress,
            SurfaceEvent::MetadataReady { .. } => SurfaceEventKind::MetadataReady,
            SurfaceEvent::Ended => SurfaceEventKind::Ended,
        }
    }
}

/// Callback invoked for each delivered notification
pub type SurfaceListener = Box<dyn Fn(&SurfaceEvent) + Send + Sync>;

/// Transport interface of a media surface
///
/// All commands are requests: their effect becomes visible through
/// notifications, possibly delivered from inside the call itself.
pub trait MediaSurface: Send + Sync {
    /// Start or resume playback
    fn play(&self);

    /// Pause playback
    fn pause(&self);

    /// Move the playback position
    ///
    /// # Arguments
    ///
    /// * `time_secs` - Target position; implementations clamp to `[0, duration]`
    fn seek(&self, time_secs: f64);

    /// Set the output level
    ///
    /// # Arguments
    ///
    /// * `level` - Volume level (0.0 to 1.0)
    fn set_volume(&self, level: f32);

    /// Mute or unmute output without touching the level
    fn set_muted(&self, muted: bool);

    /// Register a listener for one kind of notification
    ///
    /// The listener stays registered until the returned [`Subscription`] is dropped.
    fn subscribe(&self, kind: SurfaceEventKind, listener: SurfaceListener) -> Subscription;
}
