//! Core types and logic for the leadboard dashboard
//!
//! Holds the lead model, the in-session [`LeadStore`] and the pure view
//! derivations (filtering, per-status metrics, chart buckets) that the
//! dashboard renders.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod config;
pub mod error;
pub mod store;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use crate::config::{Config, LoggingConfig, SourceConfig};
pub use error::{Error, Result};
pub use store::LeadStore;
pub use types::{Lead, LeadId, LeadPatch, LeadStatus};
pub use view::{ChartBucket, FilterCriteria, Metrics, StatusFilter, chart_data, filter, metrics};

/// Initialize the logging system
///
/// `RUST_LOG` wins over the configured level when set.
///
/// # Errors
///
/// Returns an error if the level or format is invalid, or a global
/// subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| Error::Configuration {
            message: format!("invalid log level '{}': {e}", config.level),
        })?;

    let registry = tracing_subscriber::registry().with(filter);
    let installed = match config.format.as_str() {
        "json" => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        "text" => registry.with(tracing_subscriber::fmt::layer()).try_init(),
        other => {
            return Err(Error::Configuration {
                message: format!("unknown log format '{other}'"),
            });
        }
    };

    installed.map_err(|e| Error::Configuration {
        message: e.to_string(),
    })
}
