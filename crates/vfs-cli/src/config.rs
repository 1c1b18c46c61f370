//! CLI configuration.
//!
//! Configuration is stored in TOML format at:
//! - Linux: `~/.config/agent-vfs/config.toml`
//! - macOS: `~/Library/Application Support/agent-vfs/config.toml`
//! - Windows: `%APPDATA%\agent-vfs\config.toml`
//!
//! A missing file at the default location means defaults. A file named
//! explicitly with `--config` must exist.

use crate::cli::{InvalidInput, OutputFormat};
use agent_vfs_tools::EditorConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// CLI configuration.
///
/// # Examples
///
/// ```toml
/// [general]
/// default_format = "pretty"
/// log_level = "info"
/// pretty_snapshots = true
///
/// [editor]
/// view_range_policy = "clamp"
/// max_view_lines = 400
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub general: GeneralConfig,

    /// Text editor settings
    #[serde(default)]
    pub editor: EditorConfig,
}

/// General configuration settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Output format used when `--format` is not given (json, text, pretty)
    pub default_format: String,

    /// Log level used when `RUST_LOG` is unset
    pub log_level: String,

    /// Write snapshot files with indentation
    pub pretty_snapshots: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_format: "pretty".to_string(),
            log_level: "info".to_string(),
            pretty_snapshots: true,
        }
    }
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if !OutputFormat::NAMES.contains(&self.general.default_format.as_str()) {
            anyhow::bail!(InvalidInput(format!(
                "invalid default_format '{}', must be one of: {}",
                self.general.default_format,
                OutputFormat::NAMES.join(", ")
            )));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            anyhow::bail!(InvalidInput(format!(
                "invalid log_level '{}', must be one of: {}",
                self.general.log_level,
                valid_levels.join(", ")
            )));
        }

        if self.editor.max_view_lines == Some(0) {
            anyhow::bail!(InvalidInput(
                "editor.max_view_lines must be greater than 0".to_string()
            ));
        }

        Ok(())
    }

    /// The default output format as a typed value.
    ///
    /// # Errors
    ///
    /// Returns an error if `default_format` is not a known format.
    pub fn default_format(&self) -> Result<OutputFormat> {
        self.general.default_format.parse()
    }
}

/// Gets the default configuration file path.
///
/// # Errors
///
/// Returns an error if the platform has no config directory.
pub fn get_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("failed to determine config directory")?;

    Ok(config_dir.join("agent-vfs").join("config.toml"))
}

/// Loads configuration from `path`, or from the default location.
///
/// # Errors
///
/// Returns an error if an explicit file is missing, or if any file that is
/// read cannot be parsed or fails validation.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config_path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let default_path = get_config_path()?;
            if !default_path.exists() {
                debug!("Config file not found, using defaults");
                return Ok(Config::default());
            }
            default_path
        }
    };

    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("failed to read config file {}", config_path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| {
        InvalidInput(format!("failed to parse config file {}", config_path.display()))
    })?;

    config.validate()?;

    debug!("Loaded config from {}", config_path.display());
    Ok(config)
}
