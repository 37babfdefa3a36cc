//! Logging setup and lookup counters

use std::sync::atomic::{AtomicU64, Ordering};

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogFormat, LoggingConfig};

/// Counters kept by a [`crate::PostalCodeManager`]
#[derive(Debug, Default)]
pub struct Metrics {
    cache_hits: AtomicU64,
    instantiations: AtomicU64,
    resolution_failures: AtomicU64,
    registrations: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn instantiated(&self) {
        self.instantiations.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "instantiations", "Metric incremented");
    }

    pub fn resolution_failed(&self) {
        self.resolution_failures.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "resolution_failures", "Metric incremented");
    }

    pub fn registered(&self) {
        self.registrations.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "registrations", "Metric incremented");
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            instantiations: self.instantiations.load(Ordering::Relaxed),
            resolution_failures: self.resolution_failures.load(Ordering::Relaxed),
            registrations: self.registrations.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct MetricsSnapshot {
    pub cache_hits: u64,
    pub instantiations: u64,
    pub resolution_failures: u64,
    pub registrations: u64,
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Calling this
/// twice is harmless; the second subscriber is ignored.
pub fn init_tracing(logging: &LoggingConfig, verbose: bool) {
    let level = if verbose { "debug" } else { logging.level.as_str() };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("postalcode={level},warn")));

    let registry = tracing_subscriber::registry().with(filter);
    let result = match logging.format {
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .json(),
            )
            .try_init(),
    };

    if let Err(error) = result {
        tracing::debug!(%error, "Tracing subscriber already installed");
    }
}
