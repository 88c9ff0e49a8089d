//! # Configuration Options
//!
//! This module defines configuration options.
//!
//! This module is base for `cli` module and not dependent on it. Therefore,
//! this module can be used independently.
//!
//! ## Configuration File
//!
//! Configuration options can be read from a TOML file. File contents are
//! described in `ServerConfig` struct. Every key is optional in the file:
//! missing keys keep their default values.

use crate::errors::ServerError;
use serde::{Deserialize, Serialize};
use std::{fs::File, io::Read, path::PathBuf};

pub mod env;

/// Configuration options for any MCP for Unity target (tests, binaries etc.).
///
/// Every field has a default, so the record is always fully populated. It is
/// constructed once at process start and handed to collaborators; nothing
/// mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Hostname of the Unity editor bridge.
    pub unity_host: String,
    /// TCP port the Unity editor bridge listens on.
    pub unity_port: u16,
    /// TCP port this MCP server uses.
    pub mcp_port: u16,

    /// Initial connection attempt timeout, in seconds. Kept short; retry
    /// attempts use [`ServerConfig::retry_timeout`] instead.
    pub connection_timeout: f64,
    /// Timeout for the Unity handshake negotiation, in seconds.
    pub handshake_timeout: f64,
    /// Size of the fixed receive buffer, in bytes.
    pub buffer_size: usize,
    /// Max seconds to wait while a framed receive consumes heartbeats only.
    pub framed_receive_timeout: f64,
    /// Cap on heartbeat frames consumed before giving up on a framed receive.
    pub max_heartbeat_frames: u32,

    /// Minimum severity for log emission.
    pub log_level: String,
    /// Log line layout template.
    pub log_format: String,

    /// Cap on connection retry attempts.
    pub max_retries: u32,
    /// Delay between retries, in seconds.
    pub retry_delay: f64,
    /// Per-attempt timeout during a retry burst, in seconds.
    pub retry_timeout: f64,
    /// Backoff hint returned to clients while Unity is reloading, in
    /// milliseconds.
    pub reload_retry_ms: u64,
    /// Number of polite retries while Unity reports reloading.
    pub reload_max_retries: u32,

    /// Master switch for telemetry emission.
    pub telemetry_enabled: bool,
    /// Destination for telemetry events.
    pub telemetry_endpoint: String,
}

impl ServerConfig {
    /// Create a new `ServerConfig` with default values.
    pub fn new() -> Self {
        ServerConfig {
            ..Default::default()
        }
    }

    /// Read contents of a TOML file and generate a `ServerConfig`.
    pub fn try_parse_file(path: PathBuf) -> Result<Self, ServerError> {
        let mut contents = String::new();

        let mut file = match File::open(path.clone()) {
            Ok(f) => f,
            Err(e) => return Err(ServerError::ConfigError(e.to_string())),
        };

        if let Err(e) = file.read_to_string(&mut contents) {
            return Err(ServerError::ConfigError(e.to_string()));
        }

        tracing::trace!("Using configuration file: {:?}", path);

        ServerConfig::try_parse_from(contents)
    }

    /// Try to parse a `ServerConfig` from given TOML formatted string and
    /// generate a `ServerConfig`.
    pub fn try_parse_from(input: String) -> Result<Self, ServerError> {
        match toml::from_str::<ServerConfig>(&input) {
            Ok(c) => Ok(c),
            Err(e) => Err(ServerError::ConfigError(e.to_string())),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            unity_host: "localhost".to_string(),
            unity_port: 6400,
            mcp_port: 6500,

            connection_timeout: 10.0,
            handshake_timeout: 10.0,
            buffer_size: 16 * 1024 * 1024,
            framed_receive_timeout: 10.0,
            max_heartbeat_frames: 16,

            log_level: "INFO".to_string(),
            log_format: "%(asctime)s - %(name)s - %(levelname)s - %(message)s".to_string(),

            max_retries: 10,
            retry_delay: 0.25,
            retry_timeout: 1.0,
            reload_retry_ms: 250,
            // 40 x 250ms is a 10s default window.
            reload_max_retries: 40,

            telemetry_enabled: true,
            telemetry_endpoint: "https://api-prod.coplay.dev/telemetry/events".to_string(),
        }
    }
}
