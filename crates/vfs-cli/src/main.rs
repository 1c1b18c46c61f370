//! `agent-vfs`: drive agent file tool sessions over snapshot files.
//!
//! A snapshot file holds a whole in-memory file tree as JSON. Commands load
//! it, act on it with the text editor and file manager tools, and write it
//! back.
//!
//! # Examples
//!
//! ```bash
//! # Start from an empty tree
//! agent-vfs init state.json
//!
//! # Apply a batch of tool calls
//! agent-vfs apply state.json --calls calls.json
//!
//! # Look at the result
//! agent-vfs tree state.json
//! agent-vfs view state.json /src/main.rs --range 1 20
//! ```

use agent_vfs_cli::cli::{ExitCode, OutputFormat};
use agent_vfs_cli::commands::{self, apply::ApplyArgs};
use agent_vfs_cli::config::{Config, load_config};
use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Agent VFS - in-memory file tools for agents.
///
/// Applies text editor and file manager tool calls to a file tree kept in a
/// JSON snapshot.
#[derive(Parser, Debug)]
#[command(name = "agent-vfs")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (json, text, pretty); defaults to the configured format
    #[arg(long = "format", global = true)]
    format: Option<String>,

    /// Configuration file to use instead of the default location
    #[arg(long = "config", global = true, env = "AGENT_VFS_CONFIG")]
    config: Option<PathBuf>,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write an empty snapshot file.
    Init {
        /// Snapshot file to create
        snapshot: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Apply a batch of tool calls to a snapshot.
    ///
    /// Calls are a JSON object or array of objects shaped like
    /// `{"tool": "text_editor", "input": {"command": "view", "path": "/"}}`.
    /// Exits with status 5 if any call failed.
    Apply {
        /// Snapshot file to load
        snapshot: PathBuf,

        /// File holding the tool calls (reads stdin when omitted)
        #[arg(long)]
        calls: Option<PathBuf>,

        /// Write the resulting snapshot here instead of over the input
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Apply the calls and report, but do not write a snapshot
        #[arg(long)]
        dry_run: bool,
    },

    /// View a file with line numbers, or list a directory.
    View {
        /// Snapshot file to load
        snapshot: PathBuf,

        /// Path inside the snapshot
        path: String,

        /// Inclusive line range; END may be -1 for the last line
        #[arg(long, num_args = 2, value_names = ["START", "END"], allow_negative_numbers = true)]
        range: Option<Vec<i64>>,
    },

    /// Print every path in a snapshot as a tree.
    Tree {
        /// Snapshot file to load
        snapshot: PathBuf,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    let exit_code = run(cli).unwrap_or_else(|err| {
        eprintln!("Error: {err:?}");
        ExitCode::from_error(&err)
    });

    std::process::exit(exit_code.as_i32());
}

/// Loads configuration, sets up logging and runs the selected command.
///
/// # Errors
///
/// Returns an error if configuration, arguments or the command fail.
fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_config(cli.config.as_deref())?;

    init_logging(cli.verbose, &config.general.log_level)?;

    let output_format = match &cli.format {
        Some(format) => format.parse::<OutputFormat>()?,
        None => config.default_format()?,
    };

    execute_command(cli.command, &config, output_format)
}

/// Initializes logging infrastructure.
///
/// `RUST_LOG` wins over the configured level; `--verbose` wins over both.
///
/// # Errors
///
/// Returns an error if logging initialization fails.
fn init_logging(verbose: bool, default_level: &str) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}

/// Routes a command to its handler.
///
/// # Errors
///
/// Returns an error if command execution fails.
fn execute_command(command: Commands, config: &Config, output_format: OutputFormat) -> Result<ExitCode> {
    match command {
        Commands::Init { snapshot, force } => {
            commands::init::run(&snapshot, force, config.general.pretty_snapshots, output_format)
        }
        Commands::Apply {
            snapshot,
            calls,
            output,
            dry_run,
        } => {
            let args = ApplyArgs {
                snapshot,
                calls,
                output,
                dry_run,
            };
            commands::apply::run(&args, config, output_format)
        }
        Commands::View {
            snapshot,
            path,
            range,
        } => {
            let range = range.and_then(|bounds| match bounds.as_slice() {
                [start, end] => Some((*start, *end)),
                _ => None,
            });
            commands::view::run(&snapshot, &path, range, config.editor, output_format)
        }
        Commands::Tree { snapshot } => commands::tree::run(&snapshot, output_format),
        Commands::Completions { shell } => {
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            commands::completions::run(shell, &mut cmd)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing_init() {
        let cli = Cli::parse_from(["agent-vfs", "init", "state.json", "--force"]);
        if let Commands::Init { snapshot, force } = cli.command {
            assert_eq!(snapshot, PathBuf::from("state.json"));
            assert!(force);
        } else {
            panic!("Expected Init command");
        }
    }

    #[test]
    fn test_cli_parsing_apply() {
        let cli = Cli::parse_from([
            "agent-vfs",
            "apply",
            "state.json",
            "--calls",
            "calls.json",
            "-o",
            "out.json",
            "--dry-run",
        ]);
        if let Commands::Apply {
            snapshot,
            calls,
            output,
            dry_run,
        } = cli.command
        {
            assert_eq!(snapshot, PathBuf::from("state.json"));
            assert_eq!(calls, Some(PathBuf::from("calls.json")));
            assert_eq!(output, Some(PathBuf::from("out.json")));
            assert!(dry_run);
        } else {
            panic!("Expected Apply command");
        }
    }

    #[test]
    fn test_cli_parsing_view_with_negative_range() {
        let cli = Cli::parse_from(["agent-vfs", "view", "s.json", "/t.txt", "--range", "2", "-1"]);
        if let Commands::View { path, range, .. } = cli.command {
            assert_eq!(path, "/t.txt");
            assert_eq!(range, Some(vec![2, -1]));
        } else {
            panic!("Expected View command");
        }
    }

    #[test]
    fn test_cli_parsing_global_flags() {
        let cli = Cli::parse_from([
            "agent-vfs",
            "tree",
            "s.json",
            "--verbose",
            "--format",
            "json",
            "--config",
            "custom.toml",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.format.as_deref(), Some("json"));
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(matches!(cli.command, Commands::Tree { .. }));
    }

    #[test]
    fn test_cli_parsing_completions() {
        let cli = Cli::parse_from(["agent-vfs", "completions", "bash"]);
        assert!(matches!(
            cli.command,
            Commands::Completions { shell: Shell::Bash }
        ));
    }

    #[test]
    fn test_cli_verify() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
