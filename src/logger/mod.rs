//! Logger module
//!
//! Provides logging utilities for the edge router including:
//! - Subscriber setup from configuration
//! - Decision logging with multiple formats
//! - Fallback, error and warning logging
//!
//! Events go to stderr; stdout belongs to the binary's outcome stream.

mod format;

pub use format::DecisionLogEntry;

use crate::config::Config;
use crate::error::RoutingError;
use crate::routing::RoutingPolicy;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global subscriber with configuration
///
/// `RUST_LOG` takes precedence over `logging.level`. Should be called once at
/// application startup.
pub fn init(config: &Config) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init()
}

pub fn log_startup(config: &Config, policy: &RoutingPolicy) {
    tracing::info!(
        log_level = %config.logging.level,
        access_log = config.logging.access_log,
        access_log_format = %config.logging.access_log_format,
        static_extensions = policy.assets().len(),
        "edge router ready"
    );
    match policy.registered_applications() {
        Some(count) => tracing::info!(applications = count, "routing registered applications only"),
        None => tracing::info!("routing every first path segment as an application"),
    }
}

pub fn log_request(method: &str, uri: &str) {
    tracing::debug!(%method, %uri, "request");
}

pub fn log_headers_count(count: usize, show: bool) {
    if show {
        tracing::debug!(count, "request headers");
    }
}

pub fn log_redirect(from: &str, to: &str, rule: &str) {
    tracing::debug!(%from, %to, %rule, "redirecting");
}

pub fn log_pass_through(uri: &str, rule: &str) {
    tracing::debug!(%uri, %rule, "no redirect needed");
}

/// Log a stage that used its safe default
pub fn log_fallback(stage: &str, reason: &RoutingError) {
    tracing::warn!(%stage, error = %reason, "falling back to safe default");
}

/// Log formatted decision entry
pub fn log_decision(entry: &DecisionLogEntry, format: &str) {
    tracing::info!(target: "access", "{}", entry.format(format));
}

pub fn log_error(message: &str) {
    tracing::error!("{message}");
}

pub fn log_warning(message: &str) {
    tracing::warn!("{message}");
}
