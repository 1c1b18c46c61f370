//! A session: one store plus the tools and the log of calls made on it.
//!
//! A host restores a session from a snapshot, feeds it the agent's tool
//! calls, and serializes the result when the interaction ends.

use crate::command::{EditorCommand, FileManagerCommand};
use crate::config::EditorConfig;
use crate::editor::TextEditor;
use crate::error::{Result, ToolError};
use crate::file_manager::FileManager;
use crate::result::ToolResult;
use agent_vfs_store::{Snapshot, Store};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// One tool call, addressed to a specific tool.
///
/// Encoded as `{"tool": "text_editor", "input": {"command": "view", ..}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tool", content = "input", rename_all = "snake_case")]
pub enum ToolCall {
    /// A call to the text editor.
    TextEditor(EditorCommand),
    /// A call to the file manager.
    FileManager(FileManagerCommand),
}

impl ToolCall {
    /// Every tool name a call may address.
    pub const TOOLS: &'static [&'static str] = &["text_editor", "file_manager"];

    /// Decodes a call from JSON.
    ///
    /// # Errors
    ///
    /// Returns `ToolError::UnknownTool` for an unrecognized `tool`, and the
    /// command decoding errors of the addressed tool otherwise.
    pub fn from_json_value(value: &Value) -> Result<Self> {
        let input = value.get("input").unwrap_or(&Value::Null);
        match value.get("tool").and_then(Value::as_str) {
            Some("text_editor") => EditorCommand::from_json_value(input).map(Self::TextEditor),
            Some("file_manager") => {
                FileManagerCommand::from_json_value(input).map(Self::FileManager)
            }
            Some(other) => Err(ToolError::UnknownTool {
                tool: other.to_string(),
            }),
            None => Err(ToolError::UnknownTool {
                tool: "<missing>".to_string(),
            }),
        }
    }

    /// Name of the addressed tool.
    #[must_use]
    pub const fn tool(&self) -> &'static str {
        match self {
            Self::TextEditor(_) => "text_editor",
            Self::FileManager(_) => "file_manager",
        }
    }

    /// The command tag.
    #[must_use]
    pub const fn command(&self) -> &'static str {
        match self {
            Self::TextEditor(command) => command.name(),
            Self::FileManager(command) => command.name(),
        }
    }

    /// The targeted path, as the caller wrote it.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::TextEditor(command) => command.path(),
            Self::FileManager(command) => command.path(),
        }
    }
}

/// Record of one applied call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolLogEntry {
    /// 1-based position in the session
    pub sequence: usize,
    /// Addressed tool
    pub tool: String,
    /// Command tag
    pub command: String,
    /// Targeted path as supplied
    pub path: String,
    /// What the tool returned
    pub result: ToolResult,
}

/// Final state of a finished session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionOutcome {
    /// The store, flattened
    pub snapshot: Snapshot,
    /// Every call in order
    pub log: Vec<ToolLogEntry>,
}

impl SessionOutcome {
    /// Number of calls that failed.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.log.iter().filter(|entry| !entry.result.is_success()).count()
    }

    /// Returns `true` if every call succeeded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures() == 0
    }
}

/// A store together with the tools that act on it.
///
/// # Examples
///
/// ```
/// use agent_vfs_tools::Session;
/// use serde_json::json;
///
/// let mut session = Session::new();
/// session.apply_json(&json!({
///     "tool": "text_editor",
///     "input": {"command": "create", "path": "/notes.md", "file_text": "todo"}
/// }));
/// session.apply_json(&json!({
///     "tool": "file_manager",
///     "input": {"command": "rename", "path": "/notes.md", "new_path": "/done.md"}
/// }));
///
/// let outcome = session.finish();
/// assert_eq!(outcome.failures(), 0);
/// assert!(outcome.snapshot.get("/done.md").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Session {
    store: Store,
    editor: TextEditor,
    file_manager: FileManager,
    log: Vec<ToolLogEntry>,
}

impl Session {
    /// A session over an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A session over a store restored from `snapshot`.
    ///
    /// # Errors
    ///
    /// Returns the store error if the snapshot cannot be installed.
    pub fn from_snapshot(snapshot: &Snapshot) -> agent_vfs_store::Result<Self> {
        Ok(Self {
            store: Store::from_snapshot(snapshot)?,
            ..Self::default()
        })
    }

    /// Replaces the editor settings.
    #[must_use]
    pub const fn with_config(mut self, config: EditorConfig) -> Self {
        self.editor = TextEditor::with_config(config);
        self
    }

    /// Applies one call and records it.
    pub fn apply(&mut self, call: ToolCall) -> &ToolLogEntry {
        let result = match &call {
            ToolCall::TextEditor(command) => self.editor.execute(&mut self.store, command),
            ToolCall::FileManager(command) => self.file_manager.execute(&mut self.store, command),
        };
        self.record(call.tool(), call.command(), call.path(), result)
    }

    /// Decodes and applies one call.
    ///
    /// Calls that cannot be decoded are recorded as failures.
    pub fn apply_json(&mut self, value: &Value) -> &ToolLogEntry {
        match ToolCall::from_json_value(value) {
            Ok(call) => self.apply(call),
            Err(err) => {
                let field = |outer: Option<&Value>, key: &str| {
                    outer
                        .and_then(|v| v.get(key))
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string()
                };
                let input = value.get("input");
                let tool = field(Some(value), "tool");
                let command = field(input, "command");
                let path = field(input, "path");
                // editor failures always carry the "Error: " prefix
                let text = if tool == "text_editor" && !err.is_unknown_tool() {
                    format!("Error: {err}")
                } else {
                    err.to_string()
                };
                self.record(&tool, &command, &path, ToolResult::failure(text))
            }
        }
    }

    fn record(&mut self, tool: &str, command: &str, path: &str, result: ToolResult) -> &ToolLogEntry {
        let sequence = self.log.len() + 1;
        debug!(sequence, tool, command, path, success = result.is_success(), "applied tool call");

        self.log.push(ToolLogEntry {
            sequence,
            tool: tool.to_string(),
            command: command.to_string(),
            path: path.to_string(),
            result,
        });
        &self.log[sequence - 1]
    }

    /// The session's store.
    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }

    /// Every call applied so far.
    #[must_use]
    pub fn log(&self) -> &[ToolLogEntry] {
        &self.log
    }

    /// Flattens the current store.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.store.serialize()
    }

    /// Ends the session.
    #[must_use]
    pub fn finish(self) -> SessionOutcome {
        SessionOutcome {
            snapshot: self.store.serialize(),
            log: self.log,
        }
    }
}
