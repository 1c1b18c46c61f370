//! Typed tool commands.
//!
//! Agents send commands as JSON objects tagged by a `"command"` field. Each
//! variant carries exactly the fields its command accepts, so decoding is
//! the only place where a malformed call can be rejected.
//!
//! # Examples
//!
//! ```
//! use agent_vfs_tools::EditorCommand;
//! use serde_json::json;
//!
//! let command = EditorCommand::from_json_value(&json!({
//!     "command": "view",
//!     "path": "/src/main.rs",
//!     "view_range": [10, -1]
//! }))
//! .unwrap();
//!
//! assert_eq!(command.name(), "view");
//! assert_eq!(command.path(), "/src/main.rs");
//! ```

use crate::error::{Result, ToolError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A command for the [`TextEditor`](crate::TextEditor).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum EditorCommand {
    /// Show a file with line numbers, or list a directory.
    View {
        /// File or directory to show
        path: String,
        /// Inclusive 1-based line range; an end of `-1` means the last line
        #[serde(default, skip_serializing_if = "Option::is_none")]
        view_range: Option<(i64, i64)>,
    },
    /// Create a new file.
    Create {
        /// Where to create the file
        path: String,
        /// Initial content
        #[serde(default)]
        file_text: String,
    },
    /// Replace every occurrence of a literal string.
    StrReplace {
        /// File to edit
        path: String,
        /// Text to look for, matched verbatim
        old_str: String,
        /// Replacement text
        new_str: String,
    },
    /// Insert text after a given line.
    Insert {
        /// File to edit
        path: String,
        /// Number of lines to keep above the new text (0 prepends)
        insert_line: i64,
        /// Text to insert
        #[serde(default)]
        new_str: String,
    },
    /// Revert the last edit (not supported).
    UndoEdit {
        /// File whose edit would be reverted
        path: String,
    },
}

impl EditorCommand {
    /// Every command tag the editor accepts.
    pub const NAMES: &'static [&'static str] =
        &["view", "create", "str_replace", "insert", "undo_edit"];

    /// Decodes a command from agent-supplied JSON.
    ///
    /// # Errors
    ///
    /// Returns `ToolError::InvalidCommand` if the `command` tag is missing or
    /// unknown, and `ToolError::InvalidArgument` if the tag is known but the
    /// fields do not match it.
    pub fn from_json_value(value: &Value) -> Result<Self> {
        decode(value, Self::NAMES)
    }

    /// The command tag.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::View { .. } => "view",
            Self::Create { .. } => "create",
            Self::StrReplace { .. } => "str_replace",
            Self::Insert { .. } => "insert",
            Self::UndoEdit { .. } => "undo_edit",
        }
    }

    /// The path the command targets, as the caller wrote it.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::View { path, .. }
            | Self::Create { path, .. }
            | Self::StrReplace { path, .. }
            | Self::Insert { path, .. }
            | Self::UndoEdit { path } => path,
        }
    }
}

/// A command for the [`FileManager`](crate::FileManager).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum FileManagerCommand {
    /// Move a file or directory.
    Rename {
        /// Current location
        path: String,
        /// New location; absence is reported as a failed result
        #[serde(default, skip_serializing_if = "Option::is_none")]
        new_path: Option<String>,
    },
    /// Remove a file or a directory with everything below it.
    Delete {
        /// What to delete
        path: String,
    },
}

impl FileManagerCommand {
    /// Every command tag the file manager accepts.
    pub const NAMES: &'static [&'static str] = &["rename", "delete"];

    /// Decodes a command from agent-supplied JSON.
    ///
    /// # Errors
    ///
    /// Same as [`EditorCommand::from_json_value`].
    pub fn from_json_value(value: &Value) -> Result<Self> {
        decode(value, Self::NAMES)
    }

    /// The command tag.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Rename { .. } => "rename",
            Self::Delete { .. } => "delete",
        }
    }

    /// The path the command targets, as the caller wrote it.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Rename { path, .. } | Self::Delete { path } => path,
        }
    }
}

fn decode<T: DeserializeOwned>(value: &Value, names: &[&str]) -> Result<T> {
    let tag = match value.get("command") {
        Some(Value::String(tag)) if names.contains(&tag.as_str()) => tag,
        Some(Value::String(tag)) => {
            return Err(ToolError::InvalidCommand {
                command: tag.clone(),
            });
        }
        Some(other) => {
            return Err(ToolError::InvalidCommand {
                command: other.to_string(),
            });
        }
        None => {
            return Err(ToolError::InvalidCommand {
                command: "<missing>".to_string(),
            });
        }
    };

    T::deserialize(value).map_err(|err| ToolError::InvalidArgument {
        command: tag.clone(),
        reason: err.to_string(),
    })
}
