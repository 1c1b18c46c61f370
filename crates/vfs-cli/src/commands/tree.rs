//! `tree`: print every path in a snapshot.

use super::common::load_snapshot;
use crate::cli::{ExitCode, InvalidInput, OutputFormat};
use crate::formatters::format_tree;
use agent_vfs_store::Store;
use anyhow::{Context, Result};
use std::path::Path;

/// Runs the tree command.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be loaded.
pub fn run(snapshot: &Path, output_format: OutputFormat) -> Result<ExitCode> {
    let store = Store::from_snapshot(&load_snapshot(snapshot)?)
        .with_context(|| InvalidInput(format!("failed to restore {}", snapshot.display())))?;

    println!("{}", format_tree(&store, output_format)?);
    Ok(ExitCode::SUCCESS)
}
