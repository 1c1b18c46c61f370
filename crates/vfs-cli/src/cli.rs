//! CLI-specific types.
//!
//! # Examples
//!
//! ```
//! use agent_vfs_cli::cli::{ExitCode, OutputFormat};
//!
//! let format: OutputFormat = "json".parse().unwrap();
//! assert_eq!(format.as_str(), "json");
//!
//! assert!(ExitCode::SUCCESS.is_success());
//! assert_eq!(ExitCode::PARTIAL_FAILURE.as_i32(), 5);
//!
//! let err = "yaml".parse::<OutputFormat>().unwrap_err();
//! assert_eq!(ExitCode::from_error(&err), ExitCode::INVALID_INPUT);
//! ```

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Input the CLI cannot accept: a malformed file, argument or setting.
///
/// Attach it as the error or as context anywhere in an error's chain and the
/// process exits with [`ExitCode::INVALID_INPUT`].
#[derive(Debug, Error)]
#[error("{0}")]
pub struct InvalidInput(pub String);

/// Output format for CLI results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// Indented JSON, for machines.
    Json,
    /// Plain text without colors, for pipes.
    Text,
    /// Colored, human-readable output.
    #[default]
    Pretty,
}

impl OutputFormat {
    /// Every accepted format name.
    pub const NAMES: &'static [&'static str] = &["json", "text", "pretty"];

    /// Returns the string representation of the format.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "text",
            Self::Pretty => "pretty",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            "pretty" => Ok(Self::Pretty),
            _ => anyhow::bail!(InvalidInput(format!(
                "invalid output format: '{s}' (expected: json, text, or pretty)"
            ))),
        }
    }
}

/// Process exit code with semantic meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExitCode(i32);

impl ExitCode {
    /// Everything succeeded.
    pub const SUCCESS: Self = Self(0);

    /// A general error.
    pub const ERROR: Self = Self(1);

    /// Bad arguments or unreadable input.
    pub const INVALID_INPUT: Self = Self(2);

    /// The batch ran, but at least one tool call failed.
    pub const PARTIAL_FAILURE: Self = Self(5);

    /// Creates an exit code from a raw value.
    #[must_use]
    pub const fn from_i32(code: i32) -> Self {
        Self(code)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn as_i32(&self) -> i32 {
        self.0
    }

    /// Returns `true` for [`ExitCode::SUCCESS`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.0 == 0
    }

    /// The exit code for an error that ended a command.
    ///
    /// [`ExitCode::INVALID_INPUT`] if the error carries [`InvalidInput`],
    /// [`ExitCode::ERROR`] otherwise.
    #[must_use]
    pub fn from_error(err: &anyhow::Error) -> Self {
        if err.downcast_ref::<InvalidInput>().is_some() {
            Self::INVALID_INPUT
        } else {
            Self::ERROR
        }
    }
}

impl Default for ExitCode {
    fn default() -> Self {
        Self::SUCCESS
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.0
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
