//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (host, path, query)
//!     → policy.rs (classify Host header)
//!     → router.rs (apply interception rules)
//!     → Return: Pass | Redirect(301) | Robots(profile)
//!
//! Policy Compilation (at startup and on reload):
//!     PolicyConfig
//!     → Parse canonical origin
//!     → Normalize sandbox suffixes
//!     → Freeze as immutable EdgeRouter snapshot
//! ```
//!
//! # Design Decisions
//! - Policy compiled at startup, immutable at runtime
//! - Deterministic: same input always yields the same decision
//! - Unknown hosts fail open to Pass, never into a redirect loop

pub mod policy;
pub mod router;

pub use policy::{HostClass, HostPolicy};
pub use router::{EdgeRouter, RobotsProfile, RoutingDecision};
