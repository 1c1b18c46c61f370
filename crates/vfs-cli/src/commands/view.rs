//! `view`: show one file or directory from a snapshot.

use super::common::load_snapshot;
use crate::cli::{ExitCode, InvalidInput, OutputFormat};
use crate::formatters::json;
use agent_vfs_store::Store;
use agent_vfs_tools::{EditorCommand, EditorConfig, TextEditor};
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

/// Runs the view command.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be loaded.
pub fn run(
    snapshot: &Path,
    path: &str,
    range: Option<(i64, i64)>,
    editor: EditorConfig,
    output_format: OutputFormat,
) -> Result<ExitCode> {
    let mut store = Store::from_snapshot(&load_snapshot(snapshot)?)
        .with_context(|| InvalidInput(format!("failed to restore {}", snapshot.display())))?;

    let result = TextEditor::with_config(editor).execute(
        &mut store,
        &EditorCommand::View {
            path: path.to_string(),
            view_range: range,
        },
    );

    match output_format {
        OutputFormat::Json => println!("{}", json::format(&result)?),
        OutputFormat::Text => println!("{result}"),
        OutputFormat::Pretty if result.is_success() => println!("{result}"),
        OutputFormat::Pretty => println!("{}", result.text().red()),
    }

    if result.is_success() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::ERROR)
    }
}
