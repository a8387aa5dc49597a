//! TOML-based configuration for the host.
//!
//! Resolved in this order:
//! 1. The path in the `LAYERBIND_CONFIG` environment variable, if set.
//! 2. The platform config file:
//!    - Windows:  `%APPDATA%\Layerbind\config.toml`
//!    - Linux:    `~/.config/layerbind/config.toml`
//!    - macOS:    `~/Library/Application Support/Layerbind/config.toml`
//!
//! A missing file is not an error; [`AppConfig::default`] is used instead.
//!
//! # Example
//!
//! ```toml
//! [host]
//! role = "client"
//! log_level = "debug"
//! initial_layer = "Default"
//!
//! [[bindings]]
//! name = "Jump"
//! input = "Space"
//! layers = ["Default", "Air"]
//!
//! [[bindings]]
//! name = "Attack"
//! input = "MouseButton1"
//! ```
//!
//! `[[bindings]]` entries seed the binding store at startup.  `layers` defaults
//! to `["Default"]`.  Inputs use the same names `layer_binds` reports, and also
//! accept `KeyCode.X` / `Enum.KeyCode.X` spellings.

use std::path::{Path, PathBuf};

use layerbind_core::{InputId, Layer};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infrastructure::context::HostRole;

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "LAYERBIND_CONFIG";

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub host: HostConfig,
    #[serde(default)]
    pub bindings: Vec<BindingEntry>,
}

/// Process-level settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HostConfig {
    /// `"client"` processes receive input; `"server"` processes never do.
    #[serde(default)]
    pub role: HostRole,
    /// `tracing` filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Layer that is current right after initialization.
    #[serde(default)]
    pub initial_layer: Layer,
}

/// One startup binding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BindingEntry {
    /// Callback name, e.g. `"Jump"`.
    pub name: String,
    /// Input name, e.g. `"Space"` or `"MouseButton1"`.
    pub input: InputId,
    /// Layers the binding is active in.
    #[serde(default = "default_layers")]
    pub layers: Vec<Layer>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_layers() -> Vec<Layer> {
    vec![Layer::DEFAULT]
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            role: HostRole::default(),
            log_level: default_log_level(),
            initial_layer: Layer::default(),
        }
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Resolves the full path to the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if neither the override
/// variable nor the platform base directory is available.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
        return Ok(PathBuf::from(path));
    }
    platform_config_dir()
        .map(|dir| dir.join("config.toml"))
        .ok_or(ConfigError::NoPlatformConfigDir)
}

/// Loads the configuration from [`config_file_path`].
///
/// # Errors
///
/// See [`load_config_from`].
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

/// Loads the configuration at `path`, returning defaults if the file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed or names an unknown input.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Resolves the platform config directory including the `Layerbind` subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("Layerbind"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("layerbind"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("Layerbind")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
