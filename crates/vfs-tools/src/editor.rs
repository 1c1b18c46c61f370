//! The text editor tool.
//!
//! Every outcome, including every failure, is a [`ToolResult`] whose text
//! can be handed straight back to the agent. Failure texts start with
//! `"Error: "`. Paths in messages are echoed exactly as the caller wrote
//! them.
//!
//! Content is treated as a sequence of lines separated by `\n`. An empty
//! file has one empty line and a trailing newline produces a trailing empty
//! line.

use crate::command::EditorCommand;
use crate::config::{EditorConfig, ViewRangePolicy};
use crate::result::ToolResult;
use agent_vfs_store::{Node, Store, VfsPath};
use serde_json::Value;
use tracing::debug;

/// Text returned when viewing a directory without children.
pub const EMPTY_DIRECTORY_MESSAGE: &str = "Directory is empty";

/// View, create and edit text files in a [`Store`].
///
/// # Examples
///
/// ```
/// use agent_vfs_store::Store;
/// use agent_vfs_tools::{EditorCommand, TextEditor};
///
/// let mut store = Store::new();
/// store.create_file("/t.txt", "line1\nline2\nline3").unwrap();
///
/// let editor = TextEditor::new();
/// let result = editor.execute(
///     &mut store,
///     &EditorCommand::View {
///         path: "/t.txt".to_string(),
///         view_range: Some((2, -1)),
///     },
/// );
/// assert_eq!(result.text(), "2\tline2\n3\tline3");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TextEditor {
    config: EditorConfig,
}

impl TextEditor {
    /// Creates an editor with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an editor with the given settings.
    #[must_use]
    pub const fn with_config(config: EditorConfig) -> Self {
        Self { config }
    }

    /// The editor's settings.
    #[must_use]
    pub const fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Runs one command against the store.
    pub fn execute(&self, store: &mut Store, command: &EditorCommand) -> ToolResult {
        debug!(command = command.name(), path = command.path(), "text editor");

        match command {
            EditorCommand::View { path, view_range } => self.view(store, path, *view_range),
            EditorCommand::Create { path, file_text } => Self::create(store, path, file_text),
            EditorCommand::StrReplace {
                path,
                old_str,
                new_str,
            } => Self::str_replace(store, path, old_str, new_str),
            EditorCommand::Insert {
                path,
                insert_line,
                new_str,
            } => Self::insert(store, path, *insert_line, new_str),
            EditorCommand::UndoEdit { path } => Self::undo_edit(path),
        }
    }

    /// Decodes a raw JSON command and runs it.
    ///
    /// Decoding failures become failed results rather than errors.
    pub fn execute_json(&self, store: &mut Store, input: &Value) -> ToolResult {
        match EditorCommand::from_json_value(input) {
            Ok(command) => self.execute(store, &command),
            Err(err) => ToolResult::failure(format!("Error: {err}")),
        }
    }

    fn view(&self, store: &Store, path: &str, view_range: Option<(i64, i64)>) -> ToolResult {
        if VfsPath::new(path).is_root() {
            let children = store.root().children();
            return list_entries(children.map(|child| (child.is_file(), child.name())));
        }
        let Some(node) = store.get(path) else {
            return ToolResult::failure(format!("Error: File not found: {path}"));
        };

        let file = match node {
            Node::File(file) => file,
            Node::Directory(dir) => {
                return list_entries(dir.children().map(|child| (child.is_file(), child.name())));
            }
        };

        let lines: Vec<&str> = file.content().split('\n').collect();
        let (first, last) = match view_range {
            Some(range) => match self.resolve_range(range, lines.len()) {
                Ok(bounds) => bounds,
                Err(message) => return ToolResult::failure(message),
            },
            None => (1, lines.len()),
        };

        let mut shown = last - first + 1;
        let mut notice = None;
        if view_range.is_none()
            && let Some(limit) = self.config.max_view_lines
            && shown > limit
        {
            notice = Some(format!(
                "... (truncated, showing {limit} of {} lines; use view_range to see more)",
                lines.len()
            ));
            shown = limit;
        }

        let mut output = lines
            .iter()
            .enumerate()
            .skip(first - 1)
            .take(shown)
            .map(|(index, line)| format!("{}\t{line}", index + 1))
            .collect::<Vec<_>>()
            .join("\n");
        if let Some(notice) = notice {
            if !output.is_empty() {
                output.push('\n');
            }
            output.push_str(&notice);
        }
        ToolResult::success(output)
    }

    /// Turns a caller-supplied range into inclusive 1-based bounds.
    fn resolve_range(&self, (start, end): (i64, i64), line_count: usize) -> Result<(usize, usize), String> {
        let count = i64::try_from(line_count).unwrap_or(i64::MAX);
        let invalid = || {
            format!("Error: Invalid view_range [{start}, {end}]. File has {line_count} lines.")
        };

        let (first, last) = match self.config.view_range_policy {
            ViewRangePolicy::Strict => {
                if start < 1 || start > count {
                    return Err(invalid());
                }
                let last = if end == -1 { count } else { end };
                if last < start || last > count {
                    return Err(invalid());
                }
                (start, last)
            }
            ViewRangePolicy::Clamp => {
                let first = start.clamp(1, count);
                let last = if end == -1 || end > count { count } else { end };
                (first, last.max(first))
            }
        };

        match (usize::try_from(first), usize::try_from(last)) {
            (Ok(first), Ok(last)) => Ok((first, last)),
            _ => Err(invalid()),
        }
    }

    fn create(store: &mut Store, path: &str, file_text: &str) -> ToolResult {
        if store.exists(path) {
            return ToolResult::failure(format!("Error: File already exists at {path}"));
        }
        match store.create_file(path, file_text) {
            Ok(_) => ToolResult::success(format!("File created successfully at {path}")),
            Err(err) => {
                debug!(path, error = %err, "create failed");
                ToolResult::failure(format!("Error: Failed to create file at {path}: {err}"))
            }
        }
    }

    fn str_replace(store: &mut Store, path: &str, old_str: &str, new_str: &str) -> ToolResult {
        let content = match read_text(store, path) {
            Ok(content) => content,
            Err(result) => return result,
        };

        let count = if old_str.is_empty() {
            0
        } else {
            content.matches(old_str).count()
        };
        if count == 0 {
            return ToolResult::failure(format!("Error: String not found in file: \"{old_str}\""));
        }

        let updated = content.replace(old_str, new_str);
        if let Err(err) = store.update_file(path, updated) {
            return ToolResult::failure(format!("Error: {err}"));
        }
        ToolResult::success(format!(
            "Successfully replaced {count} occurrence(s) in {path}"
        ))
    }

    fn insert(store: &mut Store, path: &str, insert_line: i64, new_str: &str) -> ToolResult {
        let content = match read_text(store, path) {
            Ok(content) => content,
            Err(result) => return result,
        };

        let mut lines: Vec<&str> = content.split('\n').collect();
        let line_count = lines.len();
        let Some(index) = usize::try_from(insert_line)
            .ok()
            .filter(|index| *index <= line_count)
        else {
            return ToolResult::failure(format!(
                "Error: Invalid line number {insert_line}. File has {line_count} lines."
            ));
        };

        lines.insert(index, new_str);
        let updated = lines.join("\n");
        if let Err(err) = store.update_file(path, updated) {
            return ToolResult::failure(format!("Error: {err}"));
        }
        ToolResult::success(format!("Text inserted after line {insert_line} in {path}"))
    }

    fn undo_edit(path: &str) -> ToolResult {
        ToolResult::failure(format!(
            "Error: undo_edit is not supported. No edit history is kept for {path}."
        ))
    }
}

/// Reads a file for editing, producing the failure text on error.
fn read_text(store: &Store, path: &str) -> Result<String, ToolResult> {
    match store.get(path) {
        Some(Node::File(file)) => Ok(file.content().to_string()),
        Some(Node::Directory(_)) => Err(ToolResult::failure(format!(
            "Error: {path} is a directory, not a file"
        ))),
        None if store.exists(path) => Err(ToolResult::failure(format!(
            "Error: {path} is a directory, not a file"
        ))),
        None => Err(ToolResult::failure(format!("Error: File not found: {path}"))),
    }
}

fn list_entries<'a>(entries: impl Iterator<Item = (bool, &'a str)>) -> ToolResult {
    let lines: Vec<String> = entries
        .map(|(is_file, name)| {
            if is_file {
                format!("[FILE] {name}")
            } else {
                format!("[DIR] {name}")
            }
        })
        .collect();

    if lines.is_empty() {
        ToolResult::success(EMPTY_DIRECTORY_MESSAGE)
    } else {
        ToolResult::success(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(path: &str, content: &str) -> Store {
        let mut store = Store::new();
        store.create_file(path, content).unwrap();
        store
    }

    fn view(editor: &TextEditor, store: &mut Store, path: &str, range: Option<(i64, i64)>) -> ToolResult {
        editor.execute(
            store,
            &EditorCommand::View {
                path: path.to_string(),
                view_range: range,
            },
        )
    }

    #[test]
    fn test_view_numbers_lines() {
        let mut store = store_with("/t.txt", "foo\nbar");
        let result = view(&TextEditor::new(), &mut store, "/t.txt", None);
        assert!(result.is_success());
        assert_eq!(result.text(), "1\tfoo\n2\tbar");
    }

    #[test]
    fn test_view_empty_file() {
        let mut store = store_with("/empty.txt", "");
        let result = view(&TextEditor::new(), &mut store, "empty.txt", None);
        assert_eq!(result.text(), "1\t");
    }

    #[test]
    fn test_view_trailing_newline_shows_empty_last_line() {
        let mut store = store_with("/t.txt", "a\n");
        let result = view(&TextEditor::new(), &mut store, "/t.txt", None);
        assert_eq!(result.text(), "1\ta\n2\t");
    }

    #[test]
    fn test_view_directory() {
        let mut store = Store::new();
        store.create_file("/src/main.rs", "").unwrap();
        store.create_directory("/src/bin").unwrap();
        let editor = TextEditor::new();

        let result = view(&editor, &mut store, "/src", None);
        assert_eq!(result.text(), "[FILE] main.rs\n[DIR] bin");

        let result = view(&editor, &mut store, "/", None);
        assert_eq!(result.text(), "[DIR] src");

        let result = view(&editor, &mut store, "/src/bin", None);
        assert_eq!(result.text(), EMPTY_DIRECTORY_MESSAGE);
    }

    #[test]
    fn test_view_empty_root() {
        let mut store = Store::new();
        let result = view(&TextEditor::new(), &mut store, "/", None);
        assert!(result.is_success());
        assert_eq!(result.text(), EMPTY_DIRECTORY_MESSAGE);
    }

    #[test]
    fn test_view_root_in_any_spelling() {
        let mut store = Store::new();
        store.create_file("/a.txt", "a").unwrap();
        store.create_directory("/lib").unwrap();
        let editor = TextEditor::new();

        for root in ["/", "", "//", "///"] {
            let result = view(&editor, &mut store, root, None);
            assert!(result.is_success(), "{root:?}");
            assert_eq!(result.text(), "[FILE] a.txt\n[DIR] lib", "{root:?}");
        }
    }

    #[test]
    fn test_view_missing_path() {
        let mut store = Store::new();
        let result = view(&TextEditor::new(), &mut store, "nope.txt", None);
        assert!(!result.is_success());
        assert_eq!(result.text(), "Error: File not found: nope.txt");
    }

    #[test]
    fn test_view_range_strict() {
        let mut store = store_with("/t.txt", "a\nb\nc");
        let editor = TextEditor::new();

        assert_eq!(view(&editor, &mut store, "/t.txt", Some((1, 2))).text(), "1\ta\n2\tb");
        assert_eq!(view(&editor, &mut store, "/t.txt", Some((3, 3))).text(), "3\tc");

        for range in [(0, 2), (4, -1), (2, 1), (1, 4), (2, -2)] {
            let result = view(&editor, &mut store, "/t.txt", Some(range));
            assert!(!result.is_success(), "range {range:?}");
            assert!(result.text().ends_with("File has 3 lines."));
        }
    }

    #[test]
    fn test_view_range_clamp() {
        let mut store = store_with("/t.txt", "a\nb\nc");
        let editor = TextEditor::with_config(
            EditorConfig::default().with_view_range_policy(ViewRangePolicy::Clamp),
        );

        assert_eq!(view(&editor, &mut store, "/t.txt", Some((0, 1))).text(), "1\ta");
        assert_eq!(view(&editor, &mut store, "/t.txt", Some((2, 99))).text(), "2\tb\n3\tc");
        assert_eq!(view(&editor, &mut store, "/t.txt", Some((9, -1))).text(), "3\tc");
        assert_eq!(view(&editor, &mut store, "/t.txt", Some((2, 1))).text(), "2\tb");
    }

    #[test]
    fn test_view_truncates_long_files() {
        let mut store = store_with("/t.txt", "1\n2\n3\n4\n5");
        let editor = TextEditor::with_config(EditorConfig::default().with_max_view_lines(2));

        let result = view(&editor, &mut store, "/t.txt", None);
        let lines: Vec<&str> = result.text().lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "1\t1");
        assert_eq!(lines[1], "2\t2");
        assert!(lines[2].contains("showing 2 of 5 lines"));

        let ranged = view(&editor, &mut store, "/t.txt", Some((1, -1)));
        assert_eq!(ranged.text().lines().count(), 5);
    }

    #[test]
    fn test_create() {
        let mut store = Store::new();
        let editor = TextEditor::new();
        let command = EditorCommand::Create {
            path: "docs/readme.md".to_string(),
            file_text: "# Title".to_string(),
        };

        let result = editor.execute(&mut store, &command);
        assert_eq!(result.text(), "File created successfully at docs/readme.md");
        assert_eq!(store.read_file("/docs/readme.md").unwrap(), "# Title");

        let again = editor.execute(&mut store, &command);
        assert_eq!(again.text(), "Error: File already exists at docs/readme.md");
    }

    #[test]
    fn test_create_under_file_fails() {
        let mut store = store_with("/a", "file");
        let result = TextEditor::new().execute(
            &mut store,
            &EditorCommand::Create {
                path: "/a/b.txt".to_string(),
                file_text: String::new(),
            },
        );
        assert!(!result.is_success());
        assert!(result.text().starts_with("Error: "));
        assert_eq!(store.read_file("/a").unwrap(), "file");
    }

    fn str_replace(store: &mut Store, old_str: &str, new_str: &str) -> ToolResult {
        TextEditor::new().execute(
            store,
            &EditorCommand::StrReplace {
                path: "/t.txt".to_string(),
                old_str: old_str.to_string(),
                new_str: new_str.to_string(),
            },
        )
    }

    #[test]
    fn test_str_replace_reports_count() {
        let mut store = store_with("/t.txt", "foo bar foo");
        let result = str_replace(&mut store, "foo", "qux");
        assert_eq!(result.text(), "Successfully replaced 2 occurrence(s) in /t.txt");
        assert_eq!(store.read_file("/t.txt").unwrap(), "qux bar qux");
    }

    #[test]
    fn test_str_replace_is_literal() {
        let mut store = store_with("/t.txt", "a.b a+b (a) $1");
        let result = str_replace(&mut store, "a.b", "x");
        assert!(result.is_success());
        assert_eq!(store.read_file("/t.txt").unwrap(), "x a+b (a) $1");

        str_replace(&mut store, "(a) $1", "[ok]");
        assert_eq!(store.read_file("/t.txt").unwrap(), "x a+b [ok]");
    }

    #[test]
    fn test_str_replace_not_found() {
        let mut store = store_with("/t.txt", "hello");
        let result = str_replace(&mut store, "bye", "x");
        assert_eq!(result.text(), "Error: String not found in file: \"bye\"");
        assert_eq!(store.read_file("/t.txt").unwrap(), "hello");

        let result = str_replace(&mut store, "", "x");
        assert!(!result.is_success());
        assert_eq!(store.read_file("/t.txt").unwrap(), "hello");
    }

    #[test]
    fn test_str_replace_on_directory_and_missing() {
        let mut store = Store::new();
        store.create_directory("/t.txt").unwrap();
        let result = str_replace(&mut store, "a", "b");
        assert!(result.text().contains("is a directory"));

        let mut empty = Store::new();
        let result = str_replace(&mut empty, "a", "b");
        assert_eq!(result.text(), "Error: File not found: /t.txt");
    }

    fn insert(store: &mut Store, line: i64, new_str: &str) -> ToolResult {
        TextEditor::new().execute(
            store,
            &EditorCommand::Insert {
                path: "/t.txt".to_string(),
                insert_line: line,
                new_str: new_str.to_string(),
            },
        )
    }

    #[test]
    fn test_insert_positions() {
        let mut store = store_with("/t.txt", "a\nb");
        assert!(insert(&mut store, 0, "start").is_success());
        assert_eq!(store.read_file("/t.txt").unwrap(), "start\na\nb");

        assert!(insert(&mut store, 3, "end").is_success());
        assert_eq!(store.read_file("/t.txt").unwrap(), "start\na\nb\nend");

        assert!(insert(&mut store, 2, "mid").is_success());
        assert_eq!(store.read_file("/t.txt").unwrap(), "start\na\nmid\nb\nend");
    }

    #[test]
    fn test_insert_out_of_range() {
        let mut store = store_with("/t.txt", "a\nb");
        let result = insert(&mut store, -1, "x");
        assert_eq!(result.text(), "Error: Invalid line number -1. File has 2 lines.");

        let result = insert(&mut store, 3, "x");
        assert_eq!(result.text(), "Error: Invalid line number 3. File has 2 lines.");
        assert_eq!(store.read_file("/t.txt").unwrap(), "a\nb");
    }

    #[test]
    fn test_undo_edit_is_unsupported() {
        let mut store = store_with("/t.txt", "a");
        let result = TextEditor::new().execute(
            &mut store,
            &EditorCommand::UndoEdit {
                path: "/t.txt".to_string(),
            },
        );
        assert!(!result.is_success());
        assert!(result.text().contains("not supported"));
    }

    #[test]
    fn test_execute_json_unknown_command() {
        let mut store = Store::new();
        let result = TextEditor::new()
            .execute_json(&mut store, &serde_json::json!({"command": "format", "path": "/a"}));
        assert_eq!(result.text(), "Error: Invalid command: format");
    }
}
