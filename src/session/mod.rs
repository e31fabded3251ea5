//! Client session subsystem.
//!
//! # Data Flow
//! ```text
//! Client startup:
//!     SessionStore::new()            (hydrated = false)
//!     → persisted storage read completes
//!     → complete_hydration(..)       (exactly once)
//!     → login/logout actions update logged_in
//!
//! Protected view mount:
//!     AuthGate::run(store.subscribe(), unmount)
//!     → Pending | Unauthenticated (one redirect) | Authorized
//! ```
//!
//! # Design Decisions
//! - Single writer (the store); the gate only reads snapshots
//! - Navigation is attached to the Unauthenticated entry edge, never to
//!   re-evaluation, so duplicate redirects cannot happen
//! - No hydration timeout: if the store never hydrates, the gate stays
//!   Pending

pub mod gate;
pub mod store;

pub use gate::{login_redirect_url, AuthGate, GateState, Navigator};
pub use store::{SessionState, SessionStore};
