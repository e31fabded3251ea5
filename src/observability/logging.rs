//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Respect RUST_LOG over the configured level
//!
//! # Design Decisions
//! - Uses the tracing crate for structured logging
//! - The config's log level seeds the filter; the environment wins

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ObservabilityConfig;

/// Initialize the global tracing subscriber.
///
/// Call once at startup, before anything logs.
pub fn init(config: &ObservabilityConfig) {
    let default_filter = format!(
        "merchant_edge={level},tower_http={level}",
        level = config.log_level
    );

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
