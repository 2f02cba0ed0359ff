//! In-memory value store.
//!
//! [`MemoryStore`] holds entity values in a shared map and implements both
//! [`ValueSource`] and [`ValueSink`]. It backs the demo binary and serves as
//! the test double for the card controller.
//!
//! # Examples
//!
//! ```
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! use rangecard_protocol::{MemoryStore, ValueSink};
//!
//! let changes = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&changes);
//!
//! let store = MemoryStore::new();
//! store.set_listener(move |_id, _value| {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! store.set_value("input_number.low", 10.0);
//! assert_eq!(changes.load(Ordering::SeqCst), 1);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use crate::entity::{ValueSink, ValueSource};

type Listener = Arc<dyn Fn(&str, f64) + Send + Sync>;

#[derive(Default)]
struct Inner {
    values: HashMap<String, f64>,
    listener: Option<Listener>,
}

/// A cloneable, shared in-memory entity store.
///
/// Clones share the same underlying map. An optional listener is invoked
/// after every [`ValueSink::set_value`] call, outside of the store's lock.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f.debug_struct("MemoryStore")
            .field("values", &inner.values)
            .field("listener", &inner.listener.is_some())
            .finish()
    }
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with the given values.
    ///
    /// # Examples
    ///
    /// ```
    /// use rangecard_protocol::{MemoryStore, ValueSource};
    ///
    /// let store = MemoryStore::with_values([("a", 1.0), ("b", 2.0)]);
    /// assert_eq!(store.lookup("b"), Some(2.0));
    /// ```
    #[must_use]
    pub fn with_values<I, K>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let store = Self::new();
        for (id, value) in values {
            store.insert(id, value);
        }
        store
    }

    /// Inserts a value without notifying the listener.
    pub fn insert(&self, id: impl Into<String>, value: f64) {
        self.lock().values.insert(id.into(), value);
    }

    /// Removes an entity, returning its last value.
    pub fn remove(&self, id: &str) -> Option<f64> {
        self.lock().values.remove(id)
    }

    /// Installs the change listener, replacing any previous one.
    pub fn set_listener(&self, listener: impl Fn(&str, f64) + Send + Sync + 'static) {
        self.lock().listener = Some(Arc::new(listener));
    }

    /// Returns the number of stored entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().values.len()
    }

    /// Returns `true` if no entity is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().values.is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ValueSource for MemoryStore {
    fn lookup(&self, id: &str) -> Option<f64> {
        self.lock().values.get(id).copied()
    }
}

impl ValueSink for MemoryStore {
    fn set_value(&self, id: &str, value: f64) {
        let listener = {
            let mut inner = self.lock();
            inner.values.insert(id.to_string(), value);
            inner.listener.clone()
        };
        if let Some(listener) = listener {
            listener(id, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn lookup_missing_returns_none() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.lookup("nothing"), None);
    }

    #[test]
    fn clones_share_values() {
        let store = MemoryStore::new();
        let clone = store.clone();
        clone.insert("a", 3.0);
        assert_eq!(store.lookup("a"), Some(3.0));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn insert_does_not_notify() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let store = MemoryStore::new();
        store.set_listener(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        store.insert("a", 1.0);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        store.set_value("a", 2.0);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.lookup("a"), Some(2.0));
    }

    #[test]
    fn listener_may_read_the_store() {
        // The listener runs outside the lock, so reading back must not deadlock.
        let store = MemoryStore::new();
        let reader = store.clone();
        let seen = Arc::new(Mutex::new(None));
        let slot = Arc::clone(&seen);
        store.set_listener(move |id, _| {
            *slot.lock().unwrap() = reader.lookup(id);
        });

        store.set_value("a", 7.0);
        assert_eq!(*seen.lock().unwrap(), Some(7.0));
    }

    #[test]
    fn remove_returns_last_value() {
        let store = MemoryStore::with_values([("a", 1.0)]);
        assert_eq!(store.remove("a"), Some(1.0));
        assert_eq!(store.lookup("a"), None);
    }
}
