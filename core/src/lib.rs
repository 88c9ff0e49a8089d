//! # MCP for Unity Server Core
//!
//! This crate holds the configuration surface shared by every MCP for Unity
//! target (server binaries, tests, tools). The server loop, the retry engine
//! and the telemetry transport live elsewhere; they receive a
//! [`config::ServerConfig`] at startup and read from it for the lifetime of
//! the process.

pub mod cli;
pub mod config;
pub mod errors;
pub mod utils;
