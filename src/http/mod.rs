//! HTTP edge subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (attach request ID)
//!     → [routing layer classifies host, decides]
//!     → Pass: forward to upstream rendering origin
//!     → Redirect: 301 to canonical origin
//!     → Robots: robots.rs synthesizes crawler policy
//! ```

pub mod request;
pub mod robots;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::EdgeServer;
