//! End-to-end behavior of the tools through a session.

use agent_vfs_store::Store;
use agent_vfs_tools::{EditorCommand, FileManagerCommand, Session, TextEditor, ToolCall};
use serde_json::json;

fn editor_call(input: serde_json::Value) -> serde_json::Value {
    json!({"tool": "text_editor", "input": input})
}

/// Scenario: viewing a range through the last line.
#[test]
fn test_view_range_to_end() {
    let mut session = Session::new();
    session.apply_json(&editor_call(json!({
        "command": "create",
        "path": "/t.txt",
        "file_text": "line1\nline2\nline3"
    })));

    let entry = session.apply_json(&editor_call(json!({
        "command": "view",
        "path": "/t.txt",
        "view_range": [2, -1]
    })));
    assert!(entry.result.is_success());
    assert_eq!(entry.result.text(), "2\tline2\n3\tline3");
}

/// Scenario: replacing every occurrence and reporting the count.
#[test]
fn test_str_replace_counts_occurrences() {
    let mut session = Session::new();
    session.apply_json(&editor_call(json!({
        "command": "create",
        "path": "/t.txt",
        "file_text": "foo bar foo"
    })));

    let entry = session.apply_json(&editor_call(json!({
        "command": "str_replace",
        "path": "/t.txt",
        "old_str": "foo",
        "new_str": "qux"
    })));
    assert!(entry.result.text().contains('2'));
    assert_eq!(session.store().read_file("/t.txt").unwrap(), "qux bar qux");
}

/// Scenario: a negative insert line fails and reports the line count.
#[test]
fn test_insert_negative_line() {
    let mut session = Session::new();
    session.apply_json(&editor_call(json!({
        "command": "create",
        "path": "/t.txt",
        "file_text": "one\ntwo"
    })));

    let entry = session.apply_json(&editor_call(json!({
        "command": "insert",
        "path": "/t.txt",
        "insert_line": -1,
        "new_str": "x"
    })));
    assert!(!entry.result.is_success());
    assert!(entry.result.text().contains("File has 2 lines"));
    assert_eq!(session.store().read_file("/t.txt").unwrap(), "one\ntwo");
}

/// After replacing `n` occurrences none remain.
#[test]
fn test_str_replace_leaves_no_occurrences() {
    let cases = [
        ("aaaa", "aa", "b", 2),
        ("x.y.z", ".", "::", 2),
        ("fn a() {}\nfn b() {}", "fn ", "def ", 2),
        ("(a)(a)(a)", "(a)", "", 3),
        ("héllo héllo", "é", "e", 2),
    ];

    for (content, old_str, new_str, expected) in cases {
        let mut store = Store::new();
        store.create_file("/f", content).unwrap();

        let result = TextEditor::new().execute(
            &mut store,
            &EditorCommand::StrReplace {
                path: "/f".to_string(),
                old_str: old_str.to_string(),
                new_str: new_str.to_string(),
            },
        );

        assert!(
            result.text().contains(&format!("replaced {expected} occurrence")),
            "{content:?}: {}",
            result.text()
        );
        let updated = store.read_file("/f").unwrap();
        assert!(!updated.contains(old_str), "{content:?}: {old_str:?} left in {updated:?}");
    }
}

/// Inserting at either end adds exactly the inserted lines.
#[test]
fn test_insert_bounds_grow_line_count() {
    let contents = ["", "single", "a\nb\nc", "trailing\n"];

    for content in contents {
        let line_count = content.split('\n').count();
        for (insert_line, new_str, added) in [(0, "x", 1), (line_count, "x", 1), (0, "x\ny", 2)] {
            let mut store = Store::new();
            store.create_file("/f", content).unwrap();

            let result = TextEditor::new().execute(
                &mut store,
                &EditorCommand::Insert {
                    path: "/f".to_string(),
                    insert_line: i64::try_from(insert_line).unwrap(),
                    new_str: new_str.to_string(),
                },
            );

            assert!(result.is_success(), "{content:?} at {insert_line}");
            let after = store.read_file("/f").unwrap().split('\n').count();
            assert_eq!(after, line_count + added, "{content:?} at {insert_line}");
        }
    }
}

/// Paths in messages are echoed as written, not normalized.
#[test]
fn test_messages_echo_raw_paths() {
    let mut session = Session::new();
    let created = session
        .apply(ToolCall::TextEditor(EditorCommand::Create {
            path: "notes//today.md".to_string(),
            file_text: String::new(),
        }))
        .clone();
    assert_eq!(created.result.text(), "File created successfully at notes//today.md");
    assert_eq!(created.path, "notes//today.md");

    let deleted = session.apply(ToolCall::FileManager(FileManagerCommand::Delete {
        path: "notes/".to_string(),
    }));
    assert_eq!(deleted.result.text(), "Deleted notes/");
    assert!(!session.store().exists("/notes/today.md"));
}

/// A whole agent exchange, serialized and resumed.
#[test]
fn test_session_resumes_from_outcome() {
    let calls = json!([
        {"tool": "text_editor", "input": {"command": "create", "path": "/src/app.ts", "file_text": "let a = 1;"}},
        {"tool": "text_editor", "input": {"command": "str_replace", "path": "/src/app.ts", "old_str": "let", "new_str": "const"}},
        {"tool": "file_manager", "input": {"command": "rename", "path": "/src", "new_path": "/lib"}},
        {"tool": "file_manager", "input": {"command": "delete", "path": "/"}},
        {"tool": "text_editor", "input": {"command": "undo_edit", "path": "/lib/app.ts"}}
    ]);

    let mut session = Session::new();
    for call in calls.as_array().unwrap() {
        session.apply_json(call);
    }
    let outcome = session.finish();
    assert_eq!(outcome.failures(), 2);

    let json = outcome.snapshot.to_json().unwrap();
    let resumed = Session::from_snapshot(&agent_vfs_store::Snapshot::from_json(&json).unwrap()).unwrap();
    assert_eq!(resumed.store().read_file("/lib/app.ts").unwrap(), "const a = 1;");
    assert!(!resumed.store().exists("/src"));

    let log = serde_json::to_value(&outcome.log).unwrap();
    assert_eq!(log[3]["result"], json!({"success": false, "error": "Failed to delete /"}));
    assert_eq!(log[0]["sequence"], 1);
}
