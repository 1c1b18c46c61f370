//! Node types stored in the tree.
//!
//! A directory owns its children outright; the `parent_path` kept on every
//! node is only a lookup key back into the tree, never an ownership edge.

use crate::path::VfsPath;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

/// A file or a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A text file.
    File(FileNode),
    /// A directory and its owned children.
    Directory(DirectoryNode),
}

impl Node {
    /// Final path segment (empty for the root).
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::File(file) => file.name(),
            Self::Directory(dir) => dir.name(),
        }
    }

    /// Full normalized path.
    #[must_use]
    pub const fn path(&self) -> &VfsPath {
        match self {
            Self::File(file) => file.path(),
            Self::Directory(dir) => dir.path(),
        }
    }

    /// Path of the containing directory, `None` only for the root.
    #[must_use]
    pub fn parent_path(&self) -> Option<&VfsPath> {
        match self {
            Self::File(file) => Some(file.parent_path()),
            Self::Directory(dir) => dir.parent_path(),
        }
    }

    /// Returns `true` for files.
    #[must_use]
    pub const fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }

    /// Returns `true` for directories.
    #[must_use]
    pub const fn is_directory(&self) -> bool {
        matches!(self, Self::Directory(_))
    }

    /// Returns the file, if this node is one.
    #[must_use]
    pub const fn as_file(&self) -> Option<&FileNode> {
        match self {
            Self::File(file) => Some(file),
            Self::Directory(_) => None,
        }
    }

    /// Returns the directory, if this node is one.
    #[must_use]
    pub const fn as_directory(&self) -> Option<&DirectoryNode> {
        match self {
            Self::File(_) => None,
            Self::Directory(dir) => Some(dir),
        }
    }

    /// Summary of this node's attributes.
    #[must_use]
    pub fn metadata(&self) -> NodeMetadata {
        match self {
            Self::File(file) => file.metadata(),
            Self::Directory(dir) => dir.metadata(),
        }
    }

    /// Moves this node (and every descendant) to `new_path`, rewriting the
    /// stored `name`, `path` and `parent_path` attributes.
    pub(crate) fn relocate(&mut self, new_path: VfsPath) {
        match self {
            Self::File(file) => {
                file.name = new_path.name().to_string();
                file.parent_path = new_path.parent().unwrap_or_default();
                file.path = new_path;
            }
            Self::Directory(dir) => {
                dir.name = new_path.name().to_string();
                dir.parent_path = new_path.parent();
                for (name, child) in &mut dir.children {
                    child.relocate(new_path.join(name));
                }
                dir.path = new_path;
            }
        }
    }
}

/// A text file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    name: String,
    path: VfsPath,
    parent_path: VfsPath,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl FileNode {
    pub(crate) fn new(path: VfsPath, content: String) -> Self {
        let now = Utc::now();
        Self::with_timestamps(path, content, now, now)
    }

    pub(crate) fn with_timestamps(
        path: VfsPath,
        content: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name: path.name().to_string(),
            parent_path: path.parent().unwrap_or_default(),
            path,
            content,
            created_at,
            updated_at,
        }
    }

    /// File name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full normalized path.
    #[must_use]
    pub const fn path(&self) -> &VfsPath {
        &self.path
    }

    /// Path of the containing directory.
    #[must_use]
    pub const fn parent_path(&self) -> &VfsPath {
        &self.parent_path
    }

    /// Full text content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Content length in bytes.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.content.len()
    }

    /// When the file was created.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the content was last written.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Summary of this file's attributes.
    #[must_use]
    pub fn metadata(&self) -> NodeMetadata {
        NodeMetadata {
            kind: NodeKind::File,
            name: self.name.clone(),
            path: self.path.clone(),
            parent_path: Some(self.parent_path.clone()),
            size: Some(self.size()),
            child_count: None,
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
        }
    }

    pub(crate) fn set_content(&mut self, content: String) {
        self.content = content;
        self.updated_at = Utc::now();
    }
}

/// A directory.
///
/// Children keep the order in which they were inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryNode {
    name: String,
    path: VfsPath,
    parent_path: Option<VfsPath>,
    children: IndexMap<String, Node>,
}

impl DirectoryNode {
    pub(crate) fn root() -> Self {
        Self::new(VfsPath::root())
    }

    pub(crate) fn new(path: VfsPath) -> Self {
        Self {
            name: path.name().to_string(),
            parent_path: path.parent(),
            path,
            children: IndexMap::new(),
        }
    }

    /// Directory name (empty for the root).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full normalized path.
    #[must_use]
    pub const fn path(&self) -> &VfsPath {
        &self.path
    }

    /// Path of the containing directory, `None` for the root.
    #[must_use]
    pub const fn parent_path(&self) -> Option<&VfsPath> {
        self.parent_path.as_ref()
    }

    /// Looks up an immediate child by name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.get(name)
    }

    /// Immediate children in insertion order.
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.values()
    }

    /// Number of immediate children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if the directory has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Summary of this directory's attributes.
    #[must_use]
    pub fn metadata(&self) -> NodeMetadata {
        NodeMetadata {
            kind: NodeKind::Directory,
            name: self.name.clone(),
            path: self.path.clone(),
            parent_path: self.parent_path.clone(),
            size: None,
            child_count: Some(self.len()),
            created_at: None,
            updated_at: None,
        }
    }

    pub(crate) const fn children_mut(&mut self) -> &mut IndexMap<String, Node> {
        &mut self.children
    }
}

/// Kind of a node, as reported by listings and metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A text file.
    File,
    /// A directory.
    Directory,
}

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirEntry {
    /// Child name.
    pub name: String,
    /// `true` for files, `false` for directories.
    pub is_file: bool,
}

impl DirEntry {
    /// Kind of the listed child.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        if self.is_file {
            NodeKind::File
        } else {
            NodeKind::Directory
        }
    }
}

/// Attributes of a single node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeMetadata {
    /// File or directory.
    pub kind: NodeKind,
    /// Final path segment.
    pub name: String,
    /// Full normalized path.
    pub path: VfsPath,
    /// Containing directory, absent for the root.
    pub parent_path: Option<VfsPath>,
    /// Content length in bytes (files only).
    pub size: Option<usize>,
    /// Number of immediate children (directories only).
    pub child_count: Option<usize>,
    /// Creation time (files only).
    pub created_at: Option<DateTime<Utc>>,
    /// Last content write (files only).
    pub updated_at: Option<DateTime<Utc>>,
}
