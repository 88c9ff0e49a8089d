//! This binary resolves the effective server configuration (defaults, then
//! configuration file, then environment variable overrides) and prints it as
//! TOML. Useful for checking what a server at this host would actually run
//! with.

use unity_mcp_core::cli;
use unity_mcp_core::errors::ServerError;

fn main() -> Result<(), ServerError> {
    let (config, _args) = cli::get_configuration_from_cli();

    let rendered =
        toml::to_string_pretty(&config).map_err(|e| ServerError::ConfigError(e.to_string()))?;
    print!("{rendered}");

    Ok(())
}
