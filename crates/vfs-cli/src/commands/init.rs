//! `init`: write an empty snapshot.

use super::common::save_snapshot;
use crate::cli::{ExitCode, OutputFormat};
use crate::formatters::format_output;
use agent_vfs_store::Snapshot;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Result of `init`.
#[derive(Debug, Clone, Serialize)]
pub struct InitResult {
    /// Whether a snapshot was written
    pub success: bool,
    /// What happened
    pub message: String,
    /// The snapshot file
    pub path: String,
}

/// Runs the init command.
///
/// An existing file is left alone unless `force` is set.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be written.
pub fn run(path: &Path, force: bool, pretty: bool, output_format: OutputFormat) -> Result<ExitCode> {
    let (result, code) = if path.exists() && !force {
        (
            InitResult {
                success: false,
                message: "snapshot already exists (use --force to overwrite)".to_string(),
                path: path.display().to_string(),
            },
            ExitCode::ERROR,
        )
    } else {
        save_snapshot(path, &Snapshot::new(), pretty)?;
        info!("Initialized empty snapshot at {}", path.display());
        (
            InitResult {
                success: true,
                message: "empty snapshot created".to_string(),
                path: path.display().to_string(),
            },
            ExitCode::SUCCESS,
        )
    };

    let formatted = format_output(&result, output_format).context("failed to format init result")?;
    println!("{formatted}");
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::common::load_snapshot;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_empty_snapshot() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");

        let code = run(&path, false, true, OutputFormat::Json).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(load_snapshot(&path).unwrap().is_empty());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, r#"{"/keep.txt":{"type":"file","content":"x"}}"#).unwrap();

        let code = run(&path, false, true, OutputFormat::Json).unwrap();
        assert_eq!(code, ExitCode::ERROR);
        assert_eq!(load_snapshot(&path).unwrap().len(), 1);

        let code = run(&path, true, true, OutputFormat::Json).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
        assert!(load_snapshot(&path).unwrap().is_empty());
    }
}
