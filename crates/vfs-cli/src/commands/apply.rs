//! `apply`: run a batch of tool calls against a snapshot file.
//!
//! Calls are read as JSON, either one call object or an array of them:
//!
//! ```json
//! [
//!   {"tool": "text_editor", "input": {"command": "create", "path": "/a.md", "file_text": "# A"}},
//!   {"tool": "file_manager", "input": {"command": "rename", "path": "/a.md", "new_path": "/b.md"}}
//! ]
//! ```

use super::common::{load_snapshot, save_snapshot};
use crate::cli::{ExitCode, InvalidInput, OutputFormat};
use crate::config::Config;
use crate::formatters::format_log;
use agent_vfs_store::Snapshot;
use agent_vfs_tools::{EditorConfig, Session, SessionOutcome};
use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Arguments of the apply command.
#[derive(Debug, Clone)]
pub struct ApplyArgs {
    /// Snapshot to load
    pub snapshot: PathBuf,
    /// File holding the calls; stdin when absent
    pub calls: Option<PathBuf>,
    /// Where to write the new snapshot; the input snapshot when absent
    pub output: Option<PathBuf>,
    /// Run the calls without writing anything
    pub dry_run: bool,
}

/// Applies calls to a snapshot in a fresh session.
///
/// `calls` is a single call object or an array of them. Calls that cannot be
/// decoded are recorded as failures.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be installed or `calls` is
/// neither an object nor an array.
pub fn apply_calls(snapshot: &Snapshot, calls: &Value, editor: EditorConfig) -> Result<SessionOutcome> {
    let calls = match calls {
        Value::Array(items) => items.as_slice(),
        Value::Object(_) => std::slice::from_ref(calls),
        _ => anyhow::bail!(InvalidInput(
            "tool calls must be a JSON object or an array of objects".to_string()
        )),
    };

    let mut session = Session::from_snapshot(snapshot)
        .with_context(|| InvalidInput("failed to restore session from snapshot".to_string()))?
        .with_config(editor);
    for call in calls {
        session.apply_json(call);
    }

    let outcome = session.finish();
    debug!(
        calls = outcome.log.len(),
        failures = outcome.failures(),
        "session finished"
    );
    Ok(outcome)
}

/// Runs the apply command.
///
/// # Errors
///
/// Returns an error if an input cannot be read or decoded, or the new
/// snapshot cannot be written.
pub fn run(args: &ApplyArgs, config: &Config, output_format: OutputFormat) -> Result<ExitCode> {
    let snapshot = load_snapshot(&args.snapshot)?;
    let calls = read_calls(args.calls.as_deref())?;

    let outcome = apply_calls(&snapshot, &calls, config.editor)?;
    println!("{}", format_log(&outcome.log, output_format)?);

    if args.dry_run {
        info!("Dry run, snapshot not written");
    } else {
        let target = args.output.as_ref().unwrap_or(&args.snapshot);
        save_snapshot(target, &outcome.snapshot, config.general.pretty_snapshots)?;
        info!("Wrote snapshot to {}", target.display());
    }

    if outcome.is_clean() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::PARTIAL_FAILURE)
    }
}

fn read_calls(path: Option<&Path>) -> Result<Value> {
    let content = match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read tool calls from {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read tool calls from stdin")?;
            buffer
        }
    };

    serde_json::from_str(&content)
        .with_context(|| InvalidInput("tool calls are not valid JSON".to_string()))
}
