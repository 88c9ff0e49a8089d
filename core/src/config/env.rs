//! # Environment Variable Support For [`ServerConfig`]
//!
//! Every [`ServerConfig`] field can be overridden through an environment
//! variable carrying the upper-cased field name (`UNITY_PORT`,
//! `TELEMETRY_ENABLED`, ...). An unset variable keeps the current value; a
//! set but unparsable one is an error.

use super::ServerConfig;
use crate::errors::ServerError;
use std::fmt::Display;
use std::str::FromStr;

/// Reads a value from the environment and parses it into `T`. An unset
/// variable is not an error.
fn maybe_read_from_env<T: FromStr>(var: &'static str) -> Result<Option<T>, ServerError>
where
    T::Err: Display,
{
    match std::env::var(var) {
        Ok(value) => value
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ServerError::EnvVarMalformed(var, e.to_string())),
        Err(_) => Ok(None),
    }
}

impl ServerConfig {
    /// Generate a `ServerConfig` from default values and the environment.
    pub fn from_env() -> Result<Self, ServerError> {
        ServerConfig::default().with_env_overrides()
    }

    /// Apply environment variable overrides on top of `self`, field by field.
    pub fn with_env_overrides(self) -> Result<Self, ServerError> {
        let mut config = self;

        if let Some(value) = maybe_read_from_env("UNITY_HOST")? {
            config.unity_host = value;
        }
        if let Some(value) = maybe_read_from_env("UNITY_PORT")? {
            config.unity_port = value;
        }
        if let Some(value) = maybe_read_from_env("MCP_PORT")? {
            config.mcp_port = value;
        }
        if let Some(value) = maybe_read_from_env("CONNECTION_TIMEOUT")? {
            config.connection_timeout = value;
        }
        if let Some(value) = maybe_read_from_env("HANDSHAKE_TIMEOUT")? {
            config.handshake_timeout = value;
        }
        if let Some(value) = maybe_read_from_env("BUFFER_SIZE")? {
            config.buffer_size = value;
        }
        if let Some(value) = maybe_read_from_env("FRAMED_RECEIVE_TIMEOUT")? {
            config.framed_receive_timeout = value;
        }
        if let Some(value) = maybe_read_from_env("MAX_HEARTBEAT_FRAMES")? {
            config.max_heartbeat_frames = value;
        }
        if let Some(value) = maybe_read_from_env("LOG_LEVEL")? {
            config.log_level = value;
        }
        if let Some(value) = maybe_read_from_env("LOG_FORMAT")? {
            config.log_format = value;
        }
        if let Some(value) = maybe_read_from_env("MAX_RETRIES")? {
            config.max_retries = value;
        }
        if let Some(value) = maybe_read_from_env("RETRY_DELAY")? {
            config.retry_delay = value;
        }
        if let Some(value) = maybe_read_from_env("RETRY_TIMEOUT")? {
            config.retry_timeout = value;
        }
        if let Some(value) = maybe_read_from_env("RELOAD_RETRY_MS")? {
            config.reload_retry_ms = value;
        }
        if let Some(value) = maybe_read_from_env("RELOAD_MAX_RETRIES")? {
            config.reload_max_retries = value;
        }
        if let Some(value) = maybe_read_from_env("TELEMETRY_ENABLED")? {
            config.telemetry_enabled = value;
        }
        if let Some(value) = maybe_read_from_env("TELEMETRY_ENDPOINT")? {
            config.telemetry_endpoint = value;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::ServerConfig;

    const ALL_VARS: [&str; 17] = [
        "UNITY_HOST",
        "UNITY_PORT",
        "MCP_PORT",
        "CONNECTION_TIMEOUT",
        "HANDSHAKE_TIMEOUT",
        "BUFFER_SIZE",
        "FRAMED_RECEIVE_TIMEOUT",
        "MAX_HEARTBEAT_FRAMES",
        "LOG_LEVEL",
        "LOG_FORMAT",
        "MAX_RETRIES",
        "RETRY_DELAY",
        "RETRY_TIMEOUT",
        "RELOAD_RETRY_MS",
        "RELOAD_MAX_RETRIES",
        "TELEMETRY_ENABLED",
        "TELEMETRY_ENDPOINT",
    ];

    fn clear_env() {
        for var in ALL_VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial_test::serial]
    fn no_env_vars_set_yields_defaults() {
        clear_env();

        assert_eq!(ServerConfig::from_env().unwrap(), ServerConfig::default());
    }

    #[test]
    #[serial_test::serial]
    fn set_env_vars_override_their_fields_only() {
        clear_env();

        std::env::set_var("UNITY_HOST", "10.0.0.42");
        std::env::set_var("UNITY_PORT", "7400");
        std::env::set_var("TELEMETRY_ENABLED", "false");

        let config = ServerConfig::from_env().unwrap();
        assert_eq!(config.unity_host, "10.0.0.42");
        assert_eq!(config.unity_port, 7400);
        assert!(!config.telemetry_enabled);

        // Untouched fields keep their defaults.
        assert_eq!(config.mcp_port, ServerConfig::default().mcp_port);
        assert_eq!(config.max_retries, ServerConfig::default().max_retries);

        clear_env();
    }

    #[test]
    #[serial_test::serial]
    fn env_overrides_apply_on_top_of_a_parsed_config() {
        clear_env();

        std::env::set_var("MCP_PORT", "9500");

        let config = ServerConfig::try_parse_from("unity_port = 7070\n".to_string())
            .unwrap()
            .with_env_overrides()
            .unwrap();

        assert_eq!(config.unity_port, 7070);
        assert_eq!(config.mcp_port, 9500);

        clear_env();
    }

    #[test]
    #[serial_test::serial]
    fn malformed_env_var_is_an_error() {
        clear_env();

        std::env::set_var("UNITY_PORT", "not-a-port");
        assert!(ServerConfig::from_env().is_err());

        clear_env();
    }
}
