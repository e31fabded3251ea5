//! Session state container.
//!
//! # Responsibilities
//! - Own the process-wide session state with a single writer
//! - Complete hydration exactly once
//! - Notify observers of state transitions
//!
//! # Design Decisions
//! - Observers subscribe to a watch channel and read snapshots; they never
//!   mutate the state
//! - `logged_in` is meaningless until `hydrated` is true
//! - A failed persisted-store read completes hydration as logged-out, so
//!   consumers never hang on an explicit failure

use tokio::sync::watch;

/// Snapshot of the session's authentication state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionState {
    /// Whether persisted session data has been read from durable storage.
    pub hydrated: bool,
    /// Whether the session is authenticated. Meaningless before hydration.
    pub logged_in: bool,
}

impl SessionState {
    /// The state every session starts in, before durable storage is read.
    pub const fn unhydrated() -> Self {
        Self {
            hydrated: false,
            logged_in: false,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::unhydrated()
    }
}

/// Single-writer container for [`SessionState`].
///
/// Consumers subscribe for change notifications and read snapshots.
#[derive(Debug)]
pub struct SessionStore {
    tx: watch::Sender<SessionState>,
}

impl SessionStore {
    /// Create a store in the unhydrated state.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(SessionState::unhydrated());
        Self { tx }
    }

    /// Subscribe to state-change notifications.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }

    /// Read the current state without subscribing.
    pub fn snapshot(&self) -> SessionState {
        *self.tx.borrow()
    }

    /// Complete hydration with whatever the persisted store yielded.
    ///
    /// Hydration happens exactly once; later calls are ignored.
    pub fn complete_hydration(&self, logged_in: bool) {
        let applied = self.tx.send_if_modified(|state| {
            if state.hydrated {
                return false;
            }
            state.hydrated = true;
            state.logged_in = logged_in;
            true
        });

        if !applied {
            tracing::debug!("Hydration already completed; ignoring");
        }
    }

    /// Complete hydration after a failed persisted-store read.
    ///
    /// Fails closed: the session is treated as logged out.
    pub fn fail_hydration(&self) {
        self.complete_hydration(false);
    }

    /// Record an explicit login or logout. No-op before hydration.
    pub fn set_logged_in(&self, logged_in: bool) {
        let applied = self.tx.send_if_modified(|state| {
            if !state.hydrated || state.logged_in == logged_in {
                return false;
            }
            state.logged_in = logged_in;
            true
        });

        if !applied {
            tracing::debug!(logged_in, "Login state unchanged or not yet hydrated");
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unhydrated() {
        let store = SessionStore::new();
        assert_eq!(store.snapshot(), SessionState::unhydrated());
    }

    #[test]
    fn hydration_completes_once() {
        let store = SessionStore::new();
        store.complete_hydration(true);
        assert_eq!(
            store.snapshot(),
            SessionState {
                hydrated: true,
                logged_in: true
            }
        );

        // A second completion must not overwrite the first.
        store.complete_hydration(false);
        assert!(store.snapshot().logged_in);
    }

    #[test]
    fn login_updates_only_after_hydration() {
        let store = SessionStore::new();
        store.set_logged_in(true);
        assert!(!store.snapshot().hydrated);
        assert!(!store.snapshot().logged_in);

        store.complete_hydration(false);
        store.set_logged_in(true);
        assert!(store.snapshot().logged_in);
        store.set_logged_in(false);
        assert!(!store.snapshot().logged_in);
    }

    #[test]
    fn failed_hydration_is_logged_out() {
        let store = SessionStore::new();
        store.fail_hydration();
        assert_eq!(
            store.snapshot(),
            SessionState {
                hydrated: true,
                logged_in: false
            }
        );
    }

    #[tokio::test]
    async fn subscribers_observe_transitions() {
        let store = SessionStore::new();
        let mut rx = store.subscribe();
        assert_eq!(*rx.borrow_and_update(), SessionState::unhydrated());

        store.complete_hydration(true);
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().logged_in);
    }

    #[tokio::test]
    async fn redundant_writes_do_not_notify() {
        let store = SessionStore::new();
        store.complete_hydration(false);

        let mut rx = store.subscribe();
        rx.borrow_and_update();
        store.complete_hydration(true);
        store.set_logged_in(false);
        assert!(!rx.has_changed().unwrap());
    }
}
