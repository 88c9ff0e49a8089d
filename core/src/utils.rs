//! # Utilities
//!
//! Logging helpers shared by binaries and tests.

use crate::config::ServerConfig;
use crate::errors::ServerError;
use std::str::FromStr;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Maps the configured `log_level` string to a [`LevelFilter`]. Unknown
/// values fall back to `INFO`, matching the record's default.
pub fn level_filter_from_config(config: &ServerConfig) -> LevelFilter {
    LevelFilter::from_str(&config.log_level).unwrap_or(LevelFilter::INFO)
}

/// Initializes the global tracing subscriber.
///
/// If the `JSON_LOGS` env var is set, logs are emitted as JSON lines,
/// otherwise in a human readable format. A `None` level defers entirely to
/// the `RUST_LOG` environment variable.
pub fn initialize_logger(level: Option<LevelFilter>) -> Result<(), ServerError> {
    // Standard layer that will output human readable logs.
    let layer = fmt::layer().with_test_writer();
    // JSON layer that will output JSON formatted logs.
    let json_layer = fmt::layer::<Registry>().with_test_writer().json();

    let filter = match level {
        Some(level) => EnvFilter::builder()
            .with_default_directive(level.into())
            .from_env_lossy(),
        None => EnvFilter::from_default_env(),
    };

    let res = if std::env::var("JSON_LOGS").is_ok() {
        tracing_subscriber::util::SubscriberInitExt::try_init(
            tracing_subscriber::registry().with(json_layer).with(filter),
        )
    } else {
        tracing_subscriber::util::SubscriberInitExt::try_init(
            tracing_subscriber::registry().with(layer).with(filter),
        )
    };

    if let Err(e) = res {
        // If it failed because of a re-initialization, do not care about
        // the error.
        if e.to_string() != "a global default trace dispatcher has already been set" {
            return Err(ServerError::ConfigError(e.to_string()));
        }

        tracing::trace!("Tracing is already initialized, skipping without errors...");
    };

    Ok(())
}
