//! Generic observer registry for fire-and-forget notifications.
//!
//! Replaces a process-wide singleton listener with explicit registration:
//! observers are registered against a value of this type, identified by an
//! [`ObserverId`], and invoked in registration order on every
//! notification. The registry is thread-safe because notifications arrive
//! from the event bridge's forwarding task.

use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicU64, Ordering},
};

/// Unique identifier for a registered observer.
///
/// Used to unregister the observer when it is no longer interested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

static NEXT_OBSERVER_ID: AtomicU64 = AtomicU64::new(1);

impl ObserverId {
    fn next() -> Self {
        Self(NEXT_OBSERVER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

struct ObserverEntry<T> {
    id: ObserverId,
    callback: Arc<dyn Fn(&T) + Send + Sync>,
}

/// A registry of observers receiving borrowed notification values.
pub struct Observers<T> {
    inner: Mutex<Vec<ObserverEntry<T>>>,
}

impl<T> Observers<T> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Vec::new()),
        }
    }

    /// Register an observer; returns its id for later removal.
    pub fn register<F>(&self, callback: F) -> ObserverId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = ObserverId::next();
        self.lock().push(ObserverEntry {
            id,
            callback: Arc::new(callback),
        });
        id
    }

    /// Remove an observer. Returns `true` if it was registered.
    pub fn unregister(&self, id: ObserverId) -> bool {
        let mut inner = self.lock();
        let before = inner.len();
        inner.retain(|entry| entry.id != id);
        inner.len() < before
    }

    /// Invoke every observer with the given value.
    ///
    /// The list is snapshotted before invocation so observers may register
    /// or unregister from within their callback.
    pub fn notify(&self, value: &T) {
        let callbacks: Vec<_> = self
            .lock()
            .iter()
            .map(|entry| Arc::clone(&entry.callback))
            .collect();
        for callback in callbacks {
            callback(value);
        }
    }

    /// Drop every registered observer.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of registered observers.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no observer is registered.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ObserverEntry<T>>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Default for Observers<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicU32, Ordering},
    };

    use super::Observers;

    #[test]
    fn registered_observers_receive_notifications() {
        let observers: Observers<i32> = Observers::new();
        let sum = Arc::new(AtomicU32::new(0));

        let sum_clone = Arc::clone(&sum);
        observers.register(move |value| {
            sum_clone.fetch_add(*value as u32, Ordering::Relaxed);
        });

        observers.notify(&5);
        observers.notify(&3);
        assert_eq!(sum.load(Ordering::Relaxed), 8);
    }

    #[test]
    fn observers_run_in_registration_order() {
        let observers: Observers<()> = Observers::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second"] {
            let order = Arc::clone(&order);
            observers.register(move |()| order.lock().unwrap().push(tag));
        }

        observers.notify(&());
        assert_eq!(*order.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn unregister_stops_delivery() {
        let observers: Observers<()> = Observers::new();
        let count = Arc::new(AtomicU32::new(0));

        let count_clone = Arc::clone(&count);
        let id = observers.register(move |()| {
            count_clone.fetch_add(1, Ordering::Relaxed);
        });

        observers.notify(&());
        assert!(observers.unregister(id));
        observers.notify(&());
        assert_eq!(count.load(Ordering::Relaxed), 1);

        assert!(!observers.unregister(id));
    }

    #[test]
    fn clear_drops_every_observer() {
        let observers: Observers<()> = Observers::new();
        observers.register(|()| {});
        observers.register(|()| {});
        assert_eq!(observers.len(), 2);

        observers.clear();
        assert!(observers.is_empty());
    }

    #[test]
    fn observer_ids_are_unique_across_registries() {
        let left: Observers<()> = Observers::new();
        let right: Observers<()> = Observers::new();
        let a = left.register(|()| {});
        let b = right.register(|()| {});
        assert_ne!(a, b);
    }
}
