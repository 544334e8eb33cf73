//! Process-wide native event channel.
//!
//! The native layer emits named events (barcode reads, for instance) that
//! any number of views may listen to. Listeners are invoked synchronously
//! on the emitting thread, in registration order.

use crate::config::EventCallback;
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError, Weak};

/// Emitted by the native layer whenever a barcode is decoded.
pub const BAR_CODE_READ_EVENT: &str = "CameraBarCodeRead";

struct Listener {
    id: u64,
    event: String,
    callback: EventCallback,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<Listener>,
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    // Listeners run outside the lock; the registry is never half-updated.
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Named event channel between the native layer and views.
#[derive(Clone, Default)]
pub struct EventEmitter {
    registry: Arc<Mutex<Registry>>,
}

impl EventEmitter {
    /// Creates an emitter with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// The emitter shared by the whole process.
    pub fn global() -> &'static EventEmitter {
        static GLOBAL: OnceLock<EventEmitter> = OnceLock::new();
        GLOBAL.get_or_init(EventEmitter::new)
    }

    /// Registers a listener. It stays active until the returned
    /// subscription is removed or dropped.
    pub fn add_listener(&self, event: impl Into<String>, callback: EventCallback) -> Subscription {
        let event = event.into();
        let mut registry = lock(&self.registry);
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.push(Listener {
            id,
            event: event.clone(),
            callback,
        });

        tracing::trace!(id, event = %event, "Listener added");
        Subscription {
            id,
            event,
            registry: Some(Arc::downgrade(&self.registry)),
        }
    }

    /// Delivers a payload to every listener of `event`.
    ///
    /// Returns the number of listeners invoked.
    pub fn emit(&self, event: &str, payload: &Value) -> usize {
        let callbacks: Vec<EventCallback> = lock(&self.registry)
            .listeners
            .iter()
            .filter(|l| l.event == event)
            .map(|l| Arc::clone(&l.callback))
            .collect();

        for callback in &callbacks {
            callback(payload);
        }
        callbacks.len()
    }

    /// Number of listeners registered for `event`.
    pub fn listener_count(&self, event: &str) -> usize {
        lock(&self.registry)
            .listeners
            .iter()
            .filter(|l| l.event == event)
            .count()
    }
}

impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("listeners", &lock(&self.registry).listeners.len())
            .finish()
    }
}

/// Handle to a registered listener.
///
/// Removal is idempotent; dropping the handle removes the listener too.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    event: String,
    registry: Option<Weak<Mutex<Registry>>>,
}

impl Subscription {
    /// Unregisters the listener. Returns `false` if it was already removed.
    pub fn remove(&mut self) -> bool {
        let Some(registry) = self.registry.take() else {
            return false;
        };
        // Emitter already gone: nothing left to unregister from.
        let Some(registry) = registry.upgrade() else {
            return false;
        };

        let mut registry = lock(&registry);
        let before = registry.listeners.len();
        registry.listeners.retain(|l| l.id != self.id);
        let removed = registry.listeners.len() != before;

        tracing::trace!(id = self.id, event = %self.event, "Listener removed");
        removed
    }

    /// Returns true while the listener is registered.
    pub fn is_active(&self) -> bool {
        self.registry
            .as_ref()
            .is_some_and(|registry| registry.strong_count() > 0)
    }

    /// Name of the event this subscription listens to.
    pub fn event(&self) -> &str {
        &self.event
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.remove();
    }
}
