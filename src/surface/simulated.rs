//! Headless media surface
//!
//! Plays a resource of known length on a virtual clock. Notifications are
//! queued and only delivered from [`SimulatedSurface::tick`], which mirrors
//! how a platform media element reports back asynchronously.

use crate::surface::{
    EventDispatcher, MediaSurface, Subscription, SurfaceEvent, SurfaceEventKind, SurfaceListener,
};
use log::{debug, info};
use parking_lot::Mutex;
use std::collections::VecDeque;

#[derive(Debug)]
struct SurfaceState {
    position: f64,
    playing: bool,
    volume: f32,
    muted: bool,
    metadata_sent: bool,
    pending: VecDeque<SurfaceEvent>,
}

/// In-process media surface driven by an external clock
pub struct SimulatedSurface {
    source: String,
    duration: f64,
    state: Mutex<SurfaceState>,
    dispatcher: EventDispatcher,
}

impl SimulatedSurface {
    /// Create a surface for `source` whose resource lasts `duration` seconds
    pub fn new(source: impl Into<String>, duration: f64) -> Self {
        let source = source.into();
        let duration = if duration.is_finite() { duration.max(0.0) } else { 0.0 };
        info!("Simulated surface for {} ({:.1}s)", source, duration);

        Self {
            source,
            duration,
            state: Mutex::new(SurfaceState {
                position: 0.0,
                playing: false,
                volume: 1.0,
                muted: false,
                metadata_sent: false,
                pending: VecDeque::new(),
            }),
            dispatcher: EventDispatcher::new(),
        }
    }

    /// Resource address this surface plays
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Total length of the resource in seconds
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Actual playback position
    pub fn position(&self) -> f64 {
        self.state.lock().position
    }

    /// Whether the surface is actually playing
    pub fn is_playing(&self) -> bool {
        self.state.lock().playing
    }

    /// Actual output level
    pub fn volume(&self) -> f32 {
        self.state.lock().volume
    }

    /// Actual mute flag
    pub fn is_muted(&self) -> bool {
        self.state.lock().muted
    }

    /// Dispatcher the surface notifies through
    pub fn dispatcher(&self) -> &EventDispatcher {
        &self.dispatcher
    }

    /// Advance the virtual clock by `elapsed` seconds and deliver notifications
    ///
    /// The first tick reports metadata. While playing, each tick reports the
    /// new position; reaching the end stops playback and reports `Ended`.
    /// Returns the number of notifications delivered.
    pub fn tick(&self, elapsed: f64) -> usize {
        let events: Vec<SurfaceEvent> = {
            let mut state = self.state.lock();

            if !state.metadata_sent {
                state.metadata_sent = true;
                state.pending.push_front(SurfaceEvent::MetadataReady {
                    duration: self.duration,
                });
            }

            if state.playing && elapsed > 0.0 {
                state.position = (state.position + elapsed).min(self.duration);
                let current_time = state.position;
                state.pending.push_back(SurfaceEvent::Progress { current_time });

                if state.position >= self.duration {
                    state.playing = false;
                    state.pending.push_back(SurfaceEvent::Ended);
                    info!("Reached end of {}", self.source);
                }
            }

            state.pending.drain(..).collect()
        };

        // Delivered without the state lock so listeners may call back in
        for event in &events {
            self.dispatcher.dispatch(*event);
        }

        events.len()
    }
}

impl MediaSurface for SimulatedSurface {
    fn play(&self) {
        let mut state = self.state.lock();
        if state.position >= self.duration {
            // Playing a finished resource starts it over
            state.position = 0.0;
            state.pending.push_back(SurfaceEvent::Progress { current_time: 0.0 });
        }
        state.playing = self.duration > 0.0;
        debug!("Surface play (playing: {})", state.playing);
    }

    fn pause(&self) {
        self.state.lock().playing = false;
        debug!("Surface pause");
    }

    fn seek(&self, time_secs: f64) {
        let mut state = self.state.lock();
        let target = if time_secs.is_finite() {
            time_secs.clamp(0.0, self.duration)
        } else {
            state.position
        };
        state.position = target;
        state.pending.push_back(SurfaceEvent::Progress {
            current_time: target,
        });
        debug!("Surface seek to {:.2}s", target);
    }

    fn set_volume(&self, level: f32) {
        self.state.lock().volume = level.clamp(0.0, 1.0);
    }

    fn set_muted(&self, muted: bool) {
        self.state.lock().muted = muted;
    }

    /// A late subscriber is caught up on the next tick with the metadata and
    /// position already reported.
    fn subscribe(&self, kind: SurfaceEventKind, listener: SurfaceListener) -> Subscription {
        {
            let mut state = self.state.lock();
            if state.metadata_sent {
                match kind {
                    SurfaceEventKind::MetadataReady => {
                        state.pending.push_front(SurfaceEvent::MetadataReady {
                            duration: self.duration,
                        })
                    }
                    SurfaceEventKind::Progress => {
                        let current_time = state.position;
                        state.pending.push_back(SurfaceEvent::Progress { current_time });
                    }
                    SurfaceEventKind::Ended => {}
                }
            }
        }

        self.dispatcher.subscribe(kind, listener)
    }
}
