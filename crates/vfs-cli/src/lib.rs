//! Library half of the `agent-vfs` CLI.
//!
//! Exposes the command implementations, configuration and formatters so
//! they can be tested without spawning the binary.

#![allow(clippy::unnecessary_wraps)] // every command returns Result<ExitCode>

pub mod cli;
pub mod commands;
pub mod config;
pub mod formatters;
