//! Merchant Travel Platform Edge Library

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod session;

pub use config::schema::EdgeConfig;
pub use http::EdgeServer;
pub use lifecycle::Shutdown;
pub use routing::{EdgeRouter, RoutingDecision};
pub use session::{AuthGate, SessionStore};
