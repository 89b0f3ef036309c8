//! Notification fan-out for media surfaces
//!
//! Listeners are keyed by id so that a [`Subscription`] can remove exactly
//! its own entry when dropped.

use crate::surface::{SurfaceEvent, SurfaceEventKind, SurfaceListener};
use log::trace;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

type SharedListener = Arc<dyn Fn(&SurfaceEvent) + Send + Sync>;

struct ListenerEntry {
    id: u64,
    kind: SurfaceEventKind,
    callback: SharedListener,
}

type Registry = RwLock<Vec<ListenerEntry>>;

/// Event dispatcher shared by a surface and its subscriptions
#[derive(Clone, Default)]
pub struct EventDispatcher {
    listeners: Arc<Registry>,
    next_id: Arc<AtomicU64>,
}

impl EventDispatcher {
    /// Create a dispatcher with no listeners
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for one kind of notification
    pub fn subscribe(&self, kind: SurfaceEventKind, listener: SurfaceListener) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.listeners.write().push(ListenerEntry {
            id,
            kind,
            callback: Arc::from(listener),
        });
        trace!("Listener {} subscribed to {:?}", id, kind);

        Subscription {
            id,
            kind,
            registry: Arc::downgrade(&self.listeners),
        }
    }

    /// Deliver a notification to every listener of its kind
    ///
    /// Callbacks run after the registry lock is released, so a listener may
    /// subscribe or drop subscriptions while being notified.
    pub fn dispatch(&self, event: SurfaceEvent) {
        let kind = event.kind();
        let targets: Vec<SharedListener> = self
            .listeners
            .read()
            .iter()
            .filter(|entry| entry.kind == kind)
            .map(|entry| Arc::clone(&entry.callback))
            .collect();

        for callback in targets {
            callback(&event);
        }
    }

    /// Number of listeners registered for a kind
    pub fn listener_count(&self, kind: SurfaceEventKind) -> usize {
        self.listeners
            .read()
            .iter()
            .filter(|entry| entry.kind == kind)
            .count()
    }

    /// Total number of registered listeners
    pub fn total_listeners(&self) -> usize {
        self.listeners.read().len()
    }
}

/// Registration handle; dropping it unregisters the listener
#[must_use = "dropping a Subscription unregisters its listener immediately"]
pub struct Subscription {
    id: u64,
    kind: SurfaceEventKind,
    registry: Weak<Registry>,
}

impl Subscription {
    /// Kind of notification this subscription receives
    pub fn kind(&self) -> SurfaceEventKind {
        self.kind
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        // Surface already gone: nothing left to unregister from
        if let Some(registry) = self.registry.upgrade() {
            registry.write().retain(|entry| entry.id != self.id);
            trace!("Listener {} unsubscribed from {:?}", self.id, self.kind);
        }
    }
}
