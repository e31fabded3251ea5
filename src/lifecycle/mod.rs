//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Load config → Validate → Compile policy → Start listener
//!
//! Shutdown:
//!     Signal received → Stop accepting → Drain connections → Exit
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then policy, then listener
//! - A single broadcast channel fans the signal out to every task

pub mod shutdown;

pub use shutdown::Shutdown;
