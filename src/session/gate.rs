//! Authentication gate for protected views.
//!
//! # Responsibilities
//! - Gate protected content on hydrated, authenticated session state
//! - Issue exactly one login redirect per (mount, path), carrying the
//!   original destination as a return-path query parameter
//!
//! # Design Decisions
//! - Explicit three-state machine; the navigation side effect is attached
//!   to the entry into Unauthenticated, not to every evaluation
//! - Never navigate before hydration: redirecting early would bounce an
//!   already-authenticated returning user to the login view
//! - A login-state flip that races an in-flight navigation wins on the next
//!   evaluation; cancelling the navigation itself is best-effort only

use std::sync::Arc;

use tokio::sync::{broadcast, watch};
use url::form_urlencoded;

use crate::session::store::SessionState;

/// Client-side navigation primitive (a collaborator, not owned here).
pub trait Navigator: Send + Sync {
    /// Navigate the client to `target`.
    fn navigate(&self, target: &str);
}

/// What the gate renders right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Session state unknown; show a neutral loading indicator.
    Pending,
    /// Known logged-out; show a transient indicator while redirecting.
    Unauthenticated,
    /// Known logged-in; render the protected content.
    Authorized,
}

impl GateState {
    /// Classify a session snapshot.
    pub fn from_session(state: SessionState) -> Self {
        match (state.hydrated, state.logged_in) {
            (false, _) => GateState::Pending,
            (true, false) => GateState::Unauthenticated,
            (true, true) => GateState::Authorized,
        }
    }
}

/// Build the login URL carrying the original destination.
///
/// Shape: `<login-path>?redirect=<url-encoded-path>`.
pub fn login_redirect_url(login_path: &str, return_path: &str) -> String {
    let query: String = form_urlencoded::Serializer::new(String::new())
        .append_pair("redirect", return_path)
        .finish();
    format!("{login_path}?{query}")
}

/// Gates a protected view tree on session state.
///
/// One gate per mount; dropping it (or firing its unmount signal) stops all
/// side effects.
pub struct AuthGate {
    login_path: String,
    current_path: String,
    navigator: Arc<dyn Navigator>,
    /// Path the gate has already redirected for, if any.
    redirected_for: Option<String>,
    last_state: GateState,
}

impl AuthGate {
    /// Create a gate for the view mounted at `current_path`.
    pub fn new(
        login_path: impl Into<String>,
        current_path: impl Into<String>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            login_path: login_path.into(),
            current_path: current_path.into(),
            navigator,
            redirected_for: None,
            last_state: GateState::Pending,
        }
    }

    /// The state produced by the most recent evaluation.
    pub fn state(&self) -> GateState {
        self.last_state
    }

    /// Record a client-side path change within this mount.
    ///
    /// The redirect latch is keyed by path, so a new destination may
    /// trigger a fresh redirect if the session is still logged out.
    pub fn set_path(&mut self, path: impl Into<String>) {
        self.current_path = path.into();
    }

    /// Evaluate a session snapshot, firing the redirect side effect at most
    /// once per (mount, path).
    ///
    /// Re-running with unchanged state is idempotent: no duplicate
    /// navigation is issued.
    pub fn evaluate(&mut self, session: SessionState) -> GateState {
        let state = GateState::from_session(session);

        if state == GateState::Unauthenticated
            && self.redirected_for.as_deref() != Some(self.current_path.as_str())
        {
            let target = login_redirect_url(&self.login_path, &self.current_path);
            self.redirected_for = Some(self.current_path.clone());
            tracing::debug!(target = %target, "Redirecting unauthenticated session to login");
            self.navigator.navigate(&target);
        }

        self.last_state = state;
        state
    }

    /// Drive the gate from session-store notifications until the store goes
    /// away or the unmount signal fires.
    ///
    /// Nothing navigates after unmount: the side effect only runs inside
    /// this loop.
    pub async fn run(
        mut self,
        mut session: watch::Receiver<SessionState>,
        mut unmount: broadcast::Receiver<()>,
    ) {
        // Evaluate the snapshot present at mount before waiting for changes.
        let initial = *session.borrow_and_update();
        self.evaluate(initial);

        loop {
            tokio::select! {
                changed = session.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let snapshot = *session.borrow_and_update();
                    self.evaluate(snapshot);
                }
                _ = unmount.recv() => {
                    tracing::debug!("Gate unmounted");
                    break;
                }
            }
        }
    }
}
