//! # Command Line Interface
//!
//! This module defines command line interface for binaries. `Clap` is used
//! for easy generation of help messages and handling arguments.

use crate::config::ServerConfig;
use crate::errors::ServerError;
use crate::utils;
use clap::Parser;
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::exit;
use std::str::FromStr;
use tracing::level_filters::LevelFilter;
use tracing::Level;

/// MCP for Unity Server
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// TOML formatted configuration file. Without it, built-in defaults are
    /// used.
    pub config_file: Option<PathBuf>,
    /// Verbosity level, ranging from 0 (use the configured log level) to 5
    /// (highest)
    #[arg(short, long, default_value_t = 0)]
    pub verbose: u8,
}

/// Parse all the command line arguments and generate an `Args`.
fn parse() -> Result<Args, ServerError> {
    parse_from(env::args())
}

/// Parse given iterator. This is good for isolated environments, like tests.
fn parse_from<I, T>(itr: I) -> Result<Args, ServerError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Args::try_parse_from(itr) {
        Ok(c) => Ok(c),
        Err(e) => Err(ServerError::ConfigError(e.to_string())),
    }
}

/// Gets configuration from CLI, for binaries. If there are any errors, prints
/// error and exits the program.
///
/// Steps:
///
/// 1. Get CLI arguments
/// 2. Build the configuration: file contents if a file is given, built-in
///    defaults otherwise, with environment variable overrides applied on top
/// 3. Initialize logger, honoring either the `--verbose` flag or the
///    configured `log_level`
///
/// # Returns
///
/// A tuple, containing:
///
/// - [`ServerConfig`] resolved from defaults, file and environment
/// - [`Args`] from CLI options
pub fn get_configuration_from_cli() -> (ServerConfig, Args) {
    let args = match parse() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            exit(1);
        }
    };

    let config = match resolve_configuration(args.config_file.clone()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Can't resolve configuration: {e}");
            exit(1);
        }
    };

    let level_filter = match args.verbose {
        0 => utils::level_filter_from_config(&config),
        other => LevelFilter::from_level(
            Level::from_str(&other.to_string()).unwrap_or(Level::INFO),
        ),
    };

    if let Err(e) = utils::initialize_logger(Some(level_filter)) {
        eprintln!("{e}");
        exit(1);
    }

    match args.config_file {
        Some(ref path) => tracing::info!("Configuration file: {:?}", path),
        None => tracing::info!("No configuration file given, using built-in defaults..."),
    };

    (config, args)
}

/// Resolves the effective configuration: config file (or defaults when no
/// file is given) plus environment variable overrides.
fn resolve_configuration(config_file: Option<PathBuf>) -> Result<ServerConfig, ServerError> {
    let config = match config_file {
        Some(path) => ServerConfig::try_parse_file(path)?,
        None => ServerConfig::new(),
    };

    config.with_env_overrides()
}

#[cfg(test)]
mod tests {
    use super::{parse_from, resolve_configuration};
    use crate::config::ServerConfig;
    use crate::errors::ServerError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// With help message flag, we should see the help message. Shocking.
    #[test]
    fn help_message() {
        match parse_from(vec!["unity-mcp-core", "--help"]) {
            Ok(_) => panic!("expected configuration error"),
            Err(ServerError::ConfigError(e)) => println!("{e}"),
            e => panic!("unexpected error {e:#?}"),
        }
    }

    /// With version flag, we should see the program version read from
    /// `Cargo.toml`.
    #[test]
    fn version() {
        match parse_from(vec!["unity-mcp-core", "--version"]) {
            Ok(_) => panic!("expected configuration error"),
            Err(ServerError::ConfigError(e)) => println!("{e}"),
            e => panic!("unexpected error {e:#?}"),
        }
    }

    #[test]
    fn no_arguments_are_required() {
        let args = parse_from(vec!["unity-mcp-core"]).unwrap();
        assert!(args.config_file.is_none());
        assert_eq!(args.verbose, 0);
    }

    #[test]
    #[serial_test::serial]
    fn resolve_without_file_yields_defaults() {
        std::env::remove_var("UNITY_PORT");

        let config = resolve_configuration(None).unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    #[serial_test::serial]
    fn resolve_file_then_env_precedence() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"unity_port = 7070\nmcp_port = 7171\n")
            .unwrap();

        std::env::set_var("MCP_PORT", "9999");

        let config = resolve_configuration(Some(file.path().to_path_buf())).unwrap();
        // File overrides defaults, environment overrides the file.
        assert_eq!(config.unity_port, 7070);
        assert_eq!(config.mcp_port, 9999);

        std::env::remove_var("MCP_PORT");
    }
}
