//! Storage infrastructure: configuration file loading.
//!
//! The `config` sub-module reads the TOML configuration from the
//! platform-appropriate directory (or an explicit path) and supplies defaults
//! when no file exists yet.  Nothing here writes bindings back to disk; runtime
//! binding changes live only as long as the process.

pub mod config;
