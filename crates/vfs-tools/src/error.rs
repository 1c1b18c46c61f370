//! Errors raised while decoding agent-supplied tool input.
//!
//! Tools themselves never fail with these: a decoded command always
//! produces a [`ToolResult`](crate::ToolResult). `ToolError` only covers the
//! step before that, when raw JSON is turned into a typed command.

use thiserror::Error;

/// Errors that can occur while decoding a tool call.
#[derive(Error, Debug)]
pub enum ToolError {
    /// The tool name is not one this crate provides.
    #[error("Unknown tool: {tool}")]
    UnknownTool {
        /// The tool name as supplied
        tool: String,
    },

    /// The command tag is missing or not recognized by the tool.
    #[error("Invalid command: {command}")]
    InvalidCommand {
        /// The command tag as supplied
        command: String,
    },

    /// The command tag is known but its fields are malformed.
    #[error("Invalid arguments for {command}: {reason}")]
    InvalidArgument {
        /// The command tag
        command: String,
        /// What was wrong with the fields
        reason: String,
    },
}

impl ToolError {
    /// Returns `true` if the tool name was not recognized.
    #[must_use]
    pub const fn is_unknown_tool(&self) -> bool {
        matches!(self, Self::UnknownTool { .. })
    }

    /// Returns `true` if the command tag was missing or unknown.
    #[must_use]
    pub const fn is_invalid_command(&self) -> bool {
        matches!(self, Self::InvalidCommand { .. })
    }

    /// Returns `true` if a known command carried malformed fields.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

/// Type alias for tool decoding results.
pub type Result<T> = std::result::Result<T, ToolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_command_display() {
        let error = ToolError::InvalidCommand {
            command: "compile".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid command: compile");
        assert!(error.is_invalid_command());
        assert!(!error.is_invalid_argument());
    }

    #[test]
    fn test_invalid_argument_display() {
        let error = ToolError::InvalidArgument {
            command: "insert".to_string(),
            reason: "missing field `insert_line`".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid arguments for insert: missing field `insert_line`"
        );
        assert!(error.is_invalid_argument());
    }
}
