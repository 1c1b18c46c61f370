//! Command implementations for the `agent-vfs` CLI.
//!
//! Each command loads what it needs, runs against an in-memory store, and
//! formats its output according to the requested format.

pub mod apply;
pub mod common;
pub mod completions;
pub mod init;
pub mod tree;
pub mod view;
