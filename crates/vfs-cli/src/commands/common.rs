//! Snapshot file handling shared by the commands.

use crate::cli::InvalidInput;
use agent_vfs_store::Snapshot;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Reads and decodes a snapshot file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid snapshot.
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    let snapshot = Snapshot::from_json(&content)
        .with_context(|| InvalidInput(format!("failed to decode snapshot {}", path.display())))?;

    debug!(path = %path.display(), entries = snapshot.len(), "loaded snapshot");
    Ok(snapshot)
}

/// Encodes and writes a snapshot file, creating parent directories.
///
/// # Errors
///
/// Returns an error if encoding or writing fails.
pub fn save_snapshot(path: &Path, snapshot: &Snapshot, pretty: bool) -> Result<()> {
    let json = if pretty {
        snapshot.to_json_pretty()
    } else {
        snapshot.to_json()
    }
    .context("failed to encode snapshot")?;

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    fs::write(path, json).with_context(|| format!("failed to write snapshot {}", path.display()))?;

    debug!(path = %path.display(), entries = snapshot.len(), "saved snapshot");
    Ok(())
}
