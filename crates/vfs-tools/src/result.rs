//! The success/failure envelope every tool call returns.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::fmt;

/// Outcome of one tool call.
///
/// Failures are ordinary values: the text is meant to be forwarded verbatim
/// to the calling agent, which reacts to it in its next step.
///
/// Serializes as `{"success": true, "message": ..}` or
/// `{"success": false, "error": ..}`.
///
/// # Examples
///
/// ```
/// use agent_vfs_tools::ToolResult;
///
/// let result = ToolResult::failure("Failed to delete /x");
/// assert!(!result.is_success());
/// assert_eq!(
///     serde_json::to_string(&result).unwrap(),
///     r#"{"success":false,"error":"Failed to delete /x"}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolResult {
    /// The call succeeded.
    Success {
        /// Human-readable outcome
        message: String,
    },
    /// The call failed and the tree is unchanged.
    Failure {
        /// Human-readable cause
        error: String,
    },
}

impl ToolResult {
    /// A successful result.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::Success {
            message: message.into(),
        }
    }

    /// A failed result.
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
        }
    }

    /// Returns `true` for successes.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The message or error text.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Success { message } => message,
            Self::Failure { error } => error,
        }
    }

    /// Consumes the result, returning its text.
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Self::Success { message } => message,
            Self::Failure { error } => error,
        }
    }
}

impl fmt::Display for ToolResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

impl Serialize for ToolResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ToolResult", 2)?;
        match self {
            Self::Success { message } => {
                state.serialize_field("success", &true)?;
                state.serialize_field("message", message)?;
            }
            Self::Failure { error } => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
            }
        }
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_shape() {
        let result = ToolResult::success("Deleted /a");
        assert!(result.is_success());
        assert_eq!(result.text(), "Deleted /a");
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            serde_json::json!({"success": true, "message": "Deleted /a"})
        );
    }

    #[test]
    fn test_failure_into_text() {
        let result = ToolResult::failure("Error: nope");
        assert_eq!(result.to_string(), "Error: nope");
        assert_eq!(result.into_text(), "Error: nope");
    }
}
