//! Error types for store operations.
//!
//! Every variant carries the normalized path it concerns so a host can report
//! or branch on the failure without re-deriving context.
//!
//! # Examples
//!
//! ```
//! use agent_vfs_store::{ErrorKind, Store};
//!
//! let mut store = Store::new();
//! let err = store.delete_node("/").unwrap_err();
//!
//! assert!(err.is_root_protected());
//! assert_eq!(err.kind(), ErrorKind::RootProtected);
//! ```

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No node exists at the path.
    #[error("No such file or directory: {path}")]
    NotFound {
        /// The path that was not found
        path: String,
    },

    /// The path names a directory where a file was required.
    #[error("Not a file: {path}")]
    NotAFile {
        /// The path that is a directory
        path: String,
    },

    /// The path names a file where a directory was required.
    #[error("Not a directory: {path}")]
    NotADirectory {
        /// The path that is a file
        path: String,
    },

    /// A node already occupies the path.
    #[error("Already exists: {path}")]
    AlreadyExists {
        /// The occupied path
        path: String,
    },

    /// The operation would delete or move the root directory.
    #[error("The root directory cannot be deleted or renamed")]
    RootProtected,

    /// The arguments are individually valid but cannot be combined.
    #[error("Invalid argument for {path}: {reason}")]
    InvalidArgument {
        /// The path the argument concerns
        path: String,
        /// Why the argument was rejected
        reason: String,
    },

    /// A snapshot entry cannot be installed into a tree.
    #[error("Invalid snapshot entry {path}: {reason}")]
    InvalidSnapshot {
        /// The offending snapshot key
        path: String,
        /// Why the entry was rejected
        reason: String,
    },

    /// Snapshot encoding or decoding failed.
    #[error("Snapshot serialization failed: {message}")]
    Serialization {
        /// Description of the failure
        message: String,
        /// Underlying serde error
        #[source]
        source: serde_json::Error,
    },
}

/// Field-less classification of a [`StoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`StoreError::NotFound`].
    NotFound,
    /// See [`StoreError::NotAFile`].
    NotAFile,
    /// See [`StoreError::NotADirectory`].
    NotADirectory,
    /// See [`StoreError::AlreadyExists`].
    AlreadyExists,
    /// See [`StoreError::RootProtected`].
    RootProtected,
    /// See [`StoreError::InvalidArgument`].
    InvalidArgument,
    /// See [`StoreError::InvalidSnapshot`] and [`StoreError::Serialization`].
    InvalidSnapshot,
}

impl StoreError {
    pub(crate) fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub(crate) fn not_a_file(path: impl Into<String>) -> Self {
        Self::NotAFile { path: path.into() }
    }

    pub(crate) fn not_a_directory(path: impl Into<String>) -> Self {
        Self::NotADirectory { path: path.into() }
    }

    pub(crate) fn already_exists(path: impl Into<String>) -> Self {
        Self::AlreadyExists { path: path.into() }
    }

    pub(crate) fn invalid_snapshot(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSnapshot {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Returns the classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::NotAFile { .. } => ErrorKind::NotAFile,
            Self::NotADirectory { .. } => ErrorKind::NotADirectory,
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::RootProtected => ErrorKind::RootProtected,
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::InvalidSnapshot { .. } | Self::Serialization { .. } => ErrorKind::InvalidSnapshot,
        }
    }

    /// Returns `true` if this is a not-found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if a file was required but a directory was found.
    #[must_use]
    pub const fn is_not_a_file(&self) -> bool {
        matches!(self, Self::NotAFile { .. })
    }

    /// Returns `true` if a directory was required but a file was found.
    #[must_use]
    pub const fn is_not_a_directory(&self) -> bool {
        matches!(self, Self::NotADirectory { .. })
    }

    /// Returns `true` if the target path was already occupied.
    #[must_use]
    pub const fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }

    /// Returns `true` if the operation targeted the root.
    #[must_use]
    pub const fn is_root_protected(&self) -> bool {
        matches!(self, Self::RootProtected)
    }

    /// Returns `true` for malformed or uninstallable snapshots.
    #[must_use]
    pub const fn is_snapshot_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidSnapshot { .. } | Self::Serialization { .. }
        )
    }
}

/// Type alias for store operation results.
pub type Result<T> = std::result::Result<T, StoreError>;
