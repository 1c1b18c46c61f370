//! The file manager tool.
//!
//! Store failures are collapsed into one message per operation. The
//! underlying cause is still logged at debug level.

use crate::command::FileManagerCommand;
use crate::result::ToolResult;
use agent_vfs_store::Store;
use serde_json::Value;
use tracing::debug;

/// Rename and delete files and directories in a [`Store`].
///
/// # Examples
///
/// ```
/// use agent_vfs_store::Store;
/// use agent_vfs_tools::{FileManager, FileManagerCommand};
///
/// let mut store = Store::new();
/// store.create_file("/draft.md", "text").unwrap();
///
/// let result = FileManager::new().execute(
///     &mut store,
///     &FileManagerCommand::Rename {
///         path: "/draft.md".to_string(),
///         new_path: Some("/posts/final.md".to_string()),
///     },
/// );
/// assert!(result.is_success());
/// assert_eq!(store.read_file("/posts/final.md").unwrap(), "text");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FileManager;

impl FileManager {
    /// Creates a file manager.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Runs one command against the store.
    pub fn execute(self, store: &mut Store, command: &FileManagerCommand) -> ToolResult {
        debug!(command = command.name(), path = command.path(), "file manager");

        match command {
            FileManagerCommand::Rename { path, new_path } => match new_path {
                Some(new_path) => Self::rename(store, path, new_path),
                None => ToolResult::failure("new_path is required for rename"),
            },
            FileManagerCommand::Delete { path } => Self::delete(store, path),
        }
    }

    /// Decodes a raw JSON command and runs it.
    ///
    /// Decoding failures become failed results rather than errors.
    pub fn execute_json(self, store: &mut Store, input: &Value) -> ToolResult {
        match FileManagerCommand::from_json_value(input) {
            Ok(command) => self.execute(store, &command),
            Err(err) => ToolResult::failure(err.to_string()),
        }
    }

    fn rename(store: &mut Store, path: &str, new_path: &str) -> ToolResult {
        match store.rename_node(path, new_path) {
            Ok(()) => ToolResult::success(format!("Renamed {path} to {new_path}")),
            Err(err) => {
                debug!(path, new_path, kind = ?err.kind(), error = %err, "rename failed");
                ToolResult::failure(format!("Failed to rename {path} to {new_path}"))
            }
        }
    }

    fn delete(store: &mut Store, path: &str) -> ToolResult {
        match store.delete_node(path) {
            Ok(()) => ToolResult::success(format!("Deleted {path}")),
            Err(err) => {
                debug!(path, kind = ?err.kind(), error = %err, "delete failed");
                ToolResult::failure(format!("Failed to delete {path}"))
            }
        }
    }
}
