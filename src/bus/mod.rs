//! In-process publish/subscribe bus.
//!
//! Decouples the component that records a payment from the views that must
//! refresh afterwards (dashboard stats, payslip/payment lists). Delivery is
//! synchronous: by the time [`EventBus::emit`] returns, every listener that
//! was registered at emission time has run. Work a listener kicks off (a
//! re-fetch) is fire-and-forget from the bus's perspective.

mod events;

pub use events::{DomainEvent, PaiementCreated, TOPIC_LOGOUT, TOPIC_PAIEMENT_CREATED};

use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use once_cell::sync::Lazy;

/// Shared instance the application wires up at startup. Tests build their own
/// isolated buses with [`EventBus::new`].
pub static BUS: Lazy<EventBus> = Lazy::new(EventBus::new);

type Callback = Arc<dyn Fn(&DomainEvent) + Send + Sync>;

struct Entry {
    id: u64,
    callback: Callback,
}

struct Inner {
    registry: Mutex<HashMap<String, Vec<Entry>>>,
    next_id: AtomicU64,
}

impl Inner {
    fn lock_registry(&self) -> MutexGuard<'_, HashMap<String, Vec<Entry>>> {
        // Listeners run outside the lock, so poisoning can only come from a
        // panic in the registry bookkeeping itself; recover the data.
        match self.registry.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Remove a listener. Removing one that is already gone is a no-op; an
    /// emptied topic is dropped from the registry.
    fn unsubscribe(&self, topic: &str, id: u64) {
        let mut registry = self.lock_registry();
        if let Some(entries) = registry.get_mut(topic) {
            entries.retain(|e| e.id != id);
            if entries.is_empty() {
                registry.remove(topic);
            }
        }
    }
}

/// Cheap-to-clone handle; clones share one listener registry.
#[derive(Clone)]
pub struct EventBus {
    inner: Arc<Inner>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                registry: Mutex::new(HashMap::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// Register `callback` under `topic`. Listeners fire in registration order.
    ///
    /// Dropping the returned [`Subscription`] (or calling
    /// [`Subscription::cancel`]) removes the listener.
    pub fn subscribe(
        &self,
        topic: &str,
        callback: impl Fn(&DomainEvent) + Send + Sync + 'static,
    ) -> Subscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner
            .lock_registry()
            .entry(topic.to_string())
            .or_default()
            .push(Entry {
                id,
                callback: Arc::new(callback),
            });
        Subscription {
            bus: Arc::downgrade(&self.inner),
            topic: topic.to_string(),
            id,
        }
    }

    /// Synchronously deliver `event` to every listener currently registered
    /// for its topic.
    ///
    /// The listener list is snapshotted first, so a listener that subscribes
    /// or cancels during delivery never skips or double-invokes the others. A
    /// panicking listener is contained: the remaining listeners still run and
    /// the emitter is unaffected. No subscribers is a no-op.
    pub fn emit(&self, event: &DomainEvent) {
        let snapshot: Vec<Callback> = self
            .inner
            .lock_registry()
            .get(event.topic())
            .map(|entries| entries.iter().map(|e| Arc::clone(&e.callback)).collect())
            .unwrap_or_default();

        for callback in snapshot {
            if catch_unwind(AssertUnwindSafe(|| callback(event))).is_err() {
                tracing::warn!(topic = event.topic(), "listener panicked during emit");
            }
        }
    }

    /// Number of listeners currently registered for `topic`.
    pub fn listener_count(&self, topic: &str) -> usize {
        self.inner.lock_registry().get(topic).map_or(0, Vec::len)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a registered listener. Cancelling twice is safe; dropping the
/// handle cancels, so a consumer that goes away stops receiving events and
/// the registry does not grow without bound.
pub struct Subscription {
    bus: Weak<Inner>,
    topic: String,
    id: u64,
}

impl Subscription {
    pub fn cancel(&self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.unsubscribe(&self.topic, self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Subscribe on the shared bus.
pub fn on(topic: &str, callback: impl Fn(&DomainEvent) + Send + Sync + 'static) -> Subscription {
    BUS.subscribe(topic, callback)
}

/// Emit on the shared bus.
pub fn emit(event: &DomainEvent) {
    BUS.emit(event);
}
