//! Tracing subscriber setup
//!
//! Library code only emits `tracing` events under the `langserve_endpoints::*`
//! targets. Host binaries that have no subscriber of their own can install one
//! with [`init_tracing`].

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::error::EndpointError;

/// Options for [`init_tracing`].
#[derive(Debug, Clone)]
pub struct TracingOptions {
    /// Filter directive used when `RUST_LOG` is unset.
    pub default_filter: String,
    /// Emit one JSON object per event instead of human-readable lines.
    pub json: bool,
    pub with_ansi: bool,
}

impl Default for TracingOptions {
    fn default() -> Self {
        Self {
            default_filter: "info".to_string(),
            json: false,
            with_ansi: true,
        }
    }
}

impl TracingOptions {
    pub fn json() -> Self {
        Self {
            json: true,
            with_ansi: false,
            ..Default::default()
        }
    }

    pub fn with_default_filter(mut self, filter: impl Into<String>) -> Self {
        self.default_filter = filter.into();
        self
    }

    fn env_filter(&self) -> Result<EnvFilter, EndpointError> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => EnvFilter::try_new(&self.default_filter).map_err(|e| {
                EndpointError::ConfigurationError(format!(
                    "Invalid tracing filter {:?}: {e}",
                    self.default_filter
                ))
            }),
        }
    }
}

/// Install a global `fmt` subscriber.
///
/// Returns `Ok(false)` when a global subscriber was already installed.
pub fn init_tracing(options: TracingOptions) -> Result<bool, EndpointError> {
    let filter = options.env_filter()?;

    let layer = tracing_subscriber::fmt::layer()
        .with_ansi(options.with_ansi)
        .with_target(true);
    let layer = if options.json {
        layer.json().flatten_event(true).boxed()
    } else {
        layer.boxed()
    };

    Ok(tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .is_ok())
}
