//! Agent-facing tools over an in-memory file store.
//!
//! Two tools act on an [`agent_vfs_store::Store`]:
//!
//! - [`TextEditor`]: `view`, `create`, `str_replace`, `insert`, `undo_edit`
//! - [`FileManager`]: `rename`, `delete`
//!
//! Every call returns a [`ToolResult`]; failures are values whose text is
//! meant to be read by the agent, not errors to be propagated. A [`Session`]
//! bundles a store with both tools and logs each call.
//!
//! # Examples
//!
//! ```
//! use agent_vfs_store::Store;
//! use agent_vfs_tools::{EditorCommand, TextEditor};
//!
//! let mut store = Store::new();
//! store.create_file("/t.txt", "foo bar foo").unwrap();
//!
//! let result = TextEditor::new().execute(
//!     &mut store,
//!     &EditorCommand::StrReplace {
//!         path: "/t.txt".to_string(),
//!         old_str: "foo".to_string(),
//!         new_str: "qux".to_string(),
//!     },
//! );
//!
//! assert!(result.is_success());
//! assert_eq!(store.read_file("/t.txt").unwrap(), "qux bar qux");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod command;
mod config;
mod editor;
mod error;
mod file_manager;
mod result;
mod session;

pub use command::{EditorCommand, FileManagerCommand};
pub use config::{EditorConfig, ViewRangePolicy};
pub use editor::{EMPTY_DIRECTORY_MESSAGE, TextEditor};
pub use error::{Result, ToolError};
pub use file_manager::FileManager;
pub use result::ToolResult;
pub use session::{Session, SessionOutcome, ToolCall, ToolLogEntry};
