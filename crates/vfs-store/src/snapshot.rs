//! Snapshot codec: the flat, serializable form of a [`Store`].
//!
//! A snapshot maps absolute paths to either a file record or a directory
//! marker. It is the only representation that crosses a session boundary;
//! hosts persist or transmit it opaquely.
//!
//! ```json
//! {
//!   "/docs": { "type": "directory" },
//!   "/docs/readme.md": {
//!     "type": "file",
//!     "content": "# Readme",
//!     "created_at": "2025-01-01T00:00:00Z",
//!     "updated_at": "2025-01-01T00:00:00Z"
//!   }
//! }
//! ```
//!
//! # Examples
//!
//! ```
//! use agent_vfs_store::{Snapshot, Store};
//!
//! let mut store = Store::new();
//! store.create_file("/a/b.txt", "hello").unwrap();
//!
//! let json = store.serialize().to_json().unwrap();
//! let restored = Store::from_snapshot(&Snapshot::from_json(&json).unwrap()).unwrap();
//!
//! assert_eq!(restored.read_file("/a/b.txt").unwrap(), "hello");
//! assert!(restored.get("/a").unwrap().is_directory());
//! ```

use crate::error::{Result, StoreError};
use crate::node::{FileNode, Node};
use crate::path::VfsPath;
use crate::store::Store;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// One record of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SnapshotEntry {
    /// A file and its full text.
    File {
        /// Full text content.
        content: String,
        /// Creation time, if recorded.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        created_at: Option<DateTime<Utc>>,
        /// Last write time, if recorded.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        updated_at: Option<DateTime<Utc>>,
    },
    /// A directory marker.
    Directory,
}

impl SnapshotEntry {
    /// A file record without timestamps.
    #[must_use]
    pub fn file(content: impl Into<String>) -> Self {
        Self::File {
            content: content.into(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Returns `true` for file records.
    #[must_use]
    pub const fn is_file(&self) -> bool {
        matches!(self, Self::File { .. })
    }

    /// File content, `None` for directory markers.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::File { content, .. } => Some(content),
            Self::Directory => None,
        }
    }
}

/// Ordered mapping from path to [`SnapshotEntry`].
///
/// Entries produced by [`Store::serialize`] are in pre-order, so restoring
/// reproduces the original listing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    entries: IndexMap<String, SnapshotEntry>,
}

impl Snapshot {
    /// An empty snapshot (a store holding only the root).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a record.
    pub fn insert(&mut self, path: impl Into<String>, entry: SnapshotEntry) {
        self.entries.insert(path.into(), entry);
    }

    /// Looks up a record by its key exactly as stored.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&SnapshotEntry> {
        self.entries.get(path)
    }

    /// Iterates over records in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SnapshotEntry)> {
        self.entries.iter().map(|(path, entry)| (path.as_str(), entry))
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encodes the snapshot as compact JSON.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Serialization` if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|source| StoreError::Serialization {
            message: "failed to encode snapshot".to_string(),
            source,
        })
    }

    /// Encodes the snapshot as indented JSON.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Serialization` if encoding fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|source| StoreError::Serialization {
            message: "failed to encode snapshot".to_string(),
            source,
        })
    }

    /// Decodes a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Serialization` if the text is not a valid snapshot.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|source| StoreError::Serialization {
            message: "failed to decode snapshot".to_string(),
            source,
        })
    }
}

impl FromIterator<(String, SnapshotEntry)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (String, SnapshotEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl Store {
    /// Flattens the tree into a snapshot. The root is implied and not written.
    #[must_use]
    pub fn serialize(&self) -> Snapshot {
        self.walk()
            .map(|node| {
                let entry = match node {
                    Node::File(file) => SnapshotEntry::File {
                        content: file.content().to_string(),
                        created_at: Some(file.created_at()),
                        updated_at: Some(file.updated_at()),
                    },
                    Node::Directory(_) => SnapshotEntry::Directory,
                };
                (node.path().as_str().to_string(), entry)
            })
            .collect()
    }

    /// Builds a new store from a snapshot.
    ///
    /// Keys are normalized; ancestors missing from the snapshot are created.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidSnapshot` if an entry cannot be installed:
    /// a file at `/`, two keys that normalize to the same path, or an entry
    /// nested under a file.
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self> {
        let mut store = Self::new();
        let mut seen = HashSet::with_capacity(snapshot.len());

        for (key, entry) in snapshot.iter() {
            let path = VfsPath::new(key);
            if !seen.insert(path.clone()) {
                return Err(StoreError::invalid_snapshot(
                    key,
                    format!("duplicate entry for {path}"),
                ));
            }

            let installed = match entry {
                SnapshotEntry::Directory => store.create_directory(path.as_str()).map(|_| ()),
                SnapshotEntry::File { .. } if path.is_root() => {
                    return Err(StoreError::invalid_snapshot(key, "the root must be a directory"));
                }
                SnapshotEntry::File {
                    content,
                    created_at,
                    updated_at,
                } => {
                    let now = Utc::now();
                    let file = FileNode::with_timestamps(
                        path,
                        content.clone(),
                        created_at.unwrap_or(now),
                        updated_at.unwrap_or(now),
                    );
                    store.insert_file(file).map(|_| ())
                }
            };
            installed.map_err(|err| StoreError::invalid_snapshot(key, err.to_string()))?;
        }

        debug!(
            entries = snapshot.len(),
            files = store.file_count(),
            "restored store from snapshot"
        );
        Ok(store)
    }

    /// Replaces the whole tree with the snapshot's contents.
    ///
    /// # Errors
    ///
    /// Same as [`Store::from_snapshot`]; on error the current tree is kept.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<()> {
        *self = Self::from_snapshot(snapshot)?;
        Ok(())
    }
}
