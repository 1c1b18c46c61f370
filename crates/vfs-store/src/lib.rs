//! In-memory hierarchical file store for agent tooling.
//!
//! Provides a self-contained tree of text files and directories that an
//! external agent mutates through structured commands. Nothing here touches
//! the real filesystem; the only bridge to the outside world is the
//! [`Snapshot`] codec.
//!
//! # Features
//!
//! - **Forgiving paths**: every path goes through [`normalize`], so `a/b`,
//!   `/a/b/` and `//a//b` all address the same node
//! - **Implicit ancestors**: creating `/a/b/c.txt` creates `/a` and `/a/b`
//! - **Atomic mutations**: failed operations leave the tree unchanged
//! - **Protected root**: `/` can never be deleted or renamed
//! - **Lossless snapshots**: `from_snapshot(serialize(x))` reproduces `x`
//!
//! # Examples
//!
//! ```
//! use agent_vfs_store::Store;
//!
//! let mut store = Store::new();
//! store.create_file("/src/main.rs", "fn main() {}").unwrap();
//! store.rename_node("/src", "/app/src").unwrap();
//!
//! let entries = store.list_directory("/app/src").unwrap();
//! assert_eq!(entries.len(), 1);
//! assert!(entries[0].is_file);
//!
//! store.delete_node("/app").unwrap();
//! assert!(!store.exists("/app/src/main.rs"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod error;
mod node;
mod path;
mod snapshot;
mod store;

pub use error::{ErrorKind, Result, StoreError};
pub use node::{DirEntry, DirectoryNode, FileNode, Node, NodeKind, NodeMetadata};
pub use path::{VfsPath, normalize};
pub use snapshot::{Snapshot, SnapshotEntry};
pub use store::{Store, Walk};
