use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, RwLock, Weak};

use crate::error::{panic_message, Result, StoreError};
use crate::store::lock;

/// A zero-argument callback run after every state transition.
///
/// Listeners are compared by identity (`Arc::ptr_eq`), so keep a clone of
/// the `Arc` around if the same listener may be subscribed twice.
pub type Listener = Arc<dyn Fn() + Send + Sync>;

/// Wrap a closure as a [`Listener`].
pub fn listener<F>(f: F) -> Listener
where
    F: Fn() + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Ordered, duplicate-free set of listeners.
#[derive(Default)]
pub(crate) struct Listeners {
    entries: RwLock<Vec<Listener>>,
}

impl Listeners {
    /// Register a listener. Returns false when it was already registered.
    pub(crate) fn add(&self, listener: &Listener) -> bool {
        let mut entries = lock::write(&self.entries);
        if entries.iter().any(|existing| Arc::ptr_eq(existing, listener)) {
            return false;
        }
        entries.push(Arc::clone(listener));
        true
    }

    /// Remove a listener wherever it sits in the list, first slot included.
    pub(crate) fn remove(&self, listener: &Listener) -> bool {
        let mut entries = lock::write(&self.entries);
        match entries.iter().position(|existing| Arc::ptr_eq(existing, listener)) {
            Some(index) => {
                entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn len(&self) -> usize {
        lock::read(&self.entries).len()
    }

    /// Invoke every listener in subscription order.
    ///
    /// Runs over a snapshot taken up front with no lock held, so listeners
    /// may subscribe, unsubscribe, or dispatch. The first panicking listener
    /// aborts the round.
    pub(crate) fn notify(&self) -> Result<()> {
        let snapshot: Vec<Listener> = lock::read(&self.entries).clone();
        for (index, listener) in snapshot.iter().enumerate() {
            if let Err(payload) = catch_unwind(AssertUnwindSafe(|| listener())) {
                let message = panic_message(payload);
                tracing::warn!(index, error = %message, "Listener panicked, skipping the rest");
                return Err(StoreError::ListenerFailure { index, message });
            }
        }
        Ok(())
    }
}

/// Handle returned by `subscribe`.
///
/// Dropping the handle keeps the listener registered; call
/// [`Unsubscribe::unsubscribe`] to remove it.
#[must_use = "dropping the handle makes the listener impossible to remove"]
pub struct Unsubscribe {
    listener: Listener,
    listeners: Weak<Listeners>,
}

impl Unsubscribe {
    pub(crate) fn new(listener: Listener, listeners: &Arc<Listeners>) -> Self {
        Self {
            listener,
            listeners: Arc::downgrade(listeners),
        }
    }

    /// Remove the listener. Returns false if it was already gone or the
    /// store no longer exists.
    pub fn unsubscribe(&self) -> bool {
        match self.listeners.upgrade() {
            Some(listeners) => {
                let removed = listeners.remove(&self.listener);
                if removed {
                    tracing::debug!(remaining = listeners.len(), "Listener unsubscribed");
                }
                removed
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recording(log: &Arc<Mutex<Vec<&'static str>>>, name: &'static str) -> Listener {
        let log = log.clone();
        listener(move || log.lock().unwrap().push(name))
    }

    #[test]
    fn duplicates_are_suppressed() {
        let listeners = Listeners::default();
        let l = listener(|| {});
        assert!(listeners.add(&l));
        assert!(!listeners.add(&l));
        assert_eq!(listeners.len(), 1);

        // Same behavior, different identity.
        assert!(listeners.add(&listener(|| {})));
        assert_eq!(listeners.len(), 2);
    }

    #[test]
    fn removes_first_listener() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let listeners = Arc::new(Listeners::default());
        let first = recording(&log, "first");
        let second = recording(&log, "second");
        listeners.add(&first);
        listeners.add(&second);

        let handle = Unsubscribe::new(first, &listeners);
        assert!(handle.unsubscribe());
        assert!(!handle.unsubscribe());

        listeners.notify().unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["second"]);
    }

    #[test]
    fn panicking_listener_aborts_the_round() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let listeners = Listeners::default();
        listeners.add(&recording(&log, "before"));
        listeners.add(&listener(|| panic!("listener exploded")));
        listeners.add(&recording(&log, "after"));

        let err = listeners.notify().unwrap_err();
        assert!(matches!(err, StoreError::ListenerFailure { index: 1, .. }));
        assert_eq!(*log.lock().unwrap(), vec!["before"]);
    }

    #[test]
    fn handle_outliving_the_registry_is_harmless() {
        let listeners = Arc::new(Listeners::default());
        let l = listener(|| {});
        listeners.add(&l);
        let handle = Unsubscribe::new(l, &listeners);
        drop(listeners);
        assert!(!handle.unsubscribe());
    }
}
