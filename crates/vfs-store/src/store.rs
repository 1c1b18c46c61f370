//! The in-memory file store.
//!
//! `Store` owns a single tree rooted at `/`. Every public operation
//! normalizes its path arguments first, validates completely, and only then
//! mutates, so a failed call leaves the tree exactly as it was.
//!
//! # Examples
//!
//! ```
//! use agent_vfs_store::Store;
//!
//! let mut store = Store::new();
//! store.create_file("/a/b/c.txt", "hi").unwrap();
//!
//! assert!(store.exists("/a"));
//! assert!(store.exists("a/b/"));
//! assert_eq!(store.read_file("/a/b/c.txt").unwrap(), "hi");
//! ```

use crate::error::{Result, StoreError};
use crate::node::{DirEntry, DirectoryNode, FileNode, Node, NodeMetadata};
use crate::path::VfsPath;
use indexmap::map::Entry;
use tracing::debug;

/// An in-memory hierarchical file store.
///
/// The store is single-writer: hosts that share one across tasks must guard
/// it with a mutex for the duration of a command sequence.
///
/// # Thread Safety
///
/// This type is `Send` and `Sync`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    root: DirectoryNode,
}

impl Store {
    /// Creates a store containing only the root directory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: DirectoryNode::root(),
        }
    }

    /// The root directory.
    #[must_use]
    pub const fn root(&self) -> &DirectoryNode {
        &self.root
    }

    /// Returns `true` if a file or directory exists at `path`.
    ///
    /// The root always exists.
    #[must_use]
    pub fn exists(&self, path: impl AsRef<str>) -> bool {
        self.contains(&VfsPath::new(path))
    }

    /// Looks up a node.
    ///
    /// Returns `None` for missing paths and for `/`; use [`Store::root`] to
    /// reach the root directory.
    #[must_use]
    pub fn get(&self, path: impl AsRef<str>) -> Option<&Node> {
        self.find(&VfsPath::new(path))
    }

    /// Returns the attributes of the node at `path`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if nothing exists at `path`.
    pub fn metadata(&self, path: impl AsRef<str>) -> Result<NodeMetadata> {
        let path = VfsPath::new(path);
        if path.is_root() {
            return Ok(self.root.metadata());
        }
        self.find(&path)
            .map(Node::metadata)
            .ok_or_else(|| StoreError::not_found(path.as_str()))
    }

    /// Creates a file, creating any missing ancestor directories.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AlreadyExists` if any node occupies `path`.
    /// Returns `StoreError::NotADirectory` if an ancestor is a file.
    ///
    /// # Examples
    ///
    /// ```
    /// use agent_vfs_store::Store;
    ///
    /// let mut store = Store::new();
    /// let file = store.create_file("notes/todo.md", "- ship it").unwrap();
    /// assert_eq!(file.path().as_str(), "/notes/todo.md");
    ///
    /// assert!(store.create_file("/notes/todo.md", "again").unwrap_err().is_already_exists());
    /// ```
    pub fn create_file(
        &mut self,
        path: impl AsRef<str>,
        content: impl Into<String>,
    ) -> Result<&FileNode> {
        let path = VfsPath::new(path);
        self.insert_file(FileNode::new(path, content.into()))
    }

    /// Creates a directory, creating any missing ancestors.
    ///
    /// Succeeds without change if the directory already exists.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AlreadyExists` if a file occupies `path`.
    /// Returns `StoreError::NotADirectory` if an ancestor is a file.
    pub fn create_directory(&mut self, path: impl AsRef<str>) -> Result<&DirectoryNode> {
        let path = VfsPath::new(path);
        match self.find(&path) {
            Some(Node::File(_)) => return Err(StoreError::already_exists(path.as_str())),
            Some(Node::Directory(_)) => {}
            None if path.is_root() => {}
            None => {
                self.check_directory_chain(&path)?;
                debug!(path = %path, "creating directory");
            }
        }
        let dir = self.ensure_directory(&path)?;
        Ok(&*dir)
    }

    /// Reads a file's content.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if nothing exists at `path`.
    /// Returns `StoreError::NotAFile` if `path` is a directory.
    pub fn read_file(&self, path: impl AsRef<str>) -> Result<&str> {
        let path = VfsPath::new(path);
        if path.is_root() {
            return Err(StoreError::not_a_file(path.as_str()));
        }
        match self.find(&path) {
            Some(Node::File(file)) => Ok(file.content()),
            Some(Node::Directory(_)) => Err(StoreError::not_a_file(path.as_str())),
            None => Err(StoreError::not_found(path.as_str())),
        }
    }

    /// Replaces a file's content and bumps its `updated_at` timestamp.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if nothing exists at `path`.
    /// Returns `StoreError::NotAFile` if `path` is a directory.
    pub fn update_file(&mut self, path: impl AsRef<str>, content: impl Into<String>) -> Result<()> {
        let path = VfsPath::new(path);
        if path.is_root() {
            return Err(StoreError::not_a_file(path.as_str()));
        }
        match self.find_mut(&path) {
            Some(Node::File(file)) => {
                file.set_content(content.into());
                debug!(path = %path, bytes = file.size(), "updated file");
                Ok(())
            }
            Some(Node::Directory(_)) => Err(StoreError::not_a_file(path.as_str())),
            None => Err(StoreError::not_found(path.as_str())),
        }
    }

    /// Removes a node and, for directories, its entire subtree.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::RootProtected` for `/`.
    /// Returns `StoreError::NotFound` if nothing exists at `path`.
    pub fn delete_node(&mut self, path: impl AsRef<str>) -> Result<()> {
        let path = VfsPath::new(path);
        let Some(parent) = path.parent() else {
            return Err(StoreError::RootProtected);
        };

        let removed = self
            .dir_mut(&parent)
            .and_then(|dir| dir.children_mut().shift_remove(path.name()));

        match removed {
            Some(node) => {
                debug!(path = %path, directory = node.is_directory(), "deleted node");
                Ok(())
            }
            None => Err(StoreError::not_found(path.as_str())),
        }
    }

    /// Moves the node at `old_path`, with its whole subtree, to `new_path`.
    ///
    /// Missing ancestors of `new_path` are created. Every descendant keeps its
    /// content and its position relative to the moved node.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::RootProtected` if either path is `/`.
    /// Returns `StoreError::NotFound` if nothing exists at `old_path`.
    /// Returns `StoreError::AlreadyExists` if `new_path` is occupied.
    /// Returns `StoreError::InvalidArgument` if `new_path` lies inside `old_path`.
    /// Returns `StoreError::NotADirectory` if an ancestor of `new_path` is a file.
    ///
    /// # Examples
    ///
    /// ```
    /// use agent_vfs_store::Store;
    ///
    /// let mut store = Store::new();
    /// store.create_file("/src/lib.rs", "pub fn f() {}").unwrap();
    /// store.rename_node("/src", "/crates/core/src").unwrap();
    ///
    /// assert!(!store.exists("/src"));
    /// assert_eq!(store.read_file("/crates/core/src/lib.rs").unwrap(), "pub fn f() {}");
    /// ```
    pub fn rename_node(&mut self, old_path: impl AsRef<str>, new_path: impl AsRef<str>) -> Result<()> {
        let from = VfsPath::new(old_path);
        let to = VfsPath::new(new_path);

        let (Some(from_parent), Some(to_parent)) = (from.parent(), to.parent()) else {
            return Err(StoreError::RootProtected);
        };
        if !self.contains(&from) {
            return Err(StoreError::not_found(from.as_str()));
        }
        if self.contains(&to) {
            return Err(StoreError::already_exists(to.as_str()));
        }
        if from.is_ancestor_of(&to) {
            return Err(StoreError::InvalidArgument {
                path: to.as_str().to_string(),
                reason: format!("cannot move {from} into its own subtree"),
            });
        }
        self.check_directory_chain(&to_parent)?;

        let Some(mut node) = self
            .dir_mut(&from_parent)
            .and_then(|dir| dir.children_mut().shift_remove(from.name()))
        else {
            return Err(StoreError::not_found(from.as_str()));
        };
        node.relocate(to.clone());

        // `to_parent` is outside the detached subtree and its chain was checked above.
        self.ensure_directory(&to_parent)?
            .children_mut()
            .insert(to.name().to_string(), node);
        debug!(from = %from, to = %to, "renamed node");
        Ok(())
    }

    /// Lists the immediate children of a directory in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if nothing exists at `path`.
    /// Returns `StoreError::NotADirectory` if `path` is a file.
    pub fn list_directory(&self, path: impl AsRef<str>) -> Result<Vec<DirEntry>> {
        let path = VfsPath::new(path);
        let dir = self.find_dir(&path)?;
        Ok(dir
            .children()
            .map(|child| DirEntry {
                name: child.name().to_string(),
                is_file: child.is_file(),
            })
            .collect())
    }

    /// Iterates over every node except the root, parents before children,
    /// siblings in insertion order.
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        let mut stack: Vec<&Node> = self.root.children().collect();
        stack.reverse();
        Walk { stack }
    }

    /// All paths below the root in [`Store::walk`] order.
    #[must_use]
    pub fn all_paths(&self) -> Vec<&VfsPath> {
        self.walk().map(Node::path).collect()
    }

    /// Number of files in the store.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.walk().filter(|node| node.is_file()).count()
    }

    /// Number of directories in the store, not counting the root.
    #[must_use]
    pub fn directory_count(&self) -> usize {
        self.walk().filter(|node| node.is_directory()).count()
    }

    /// Installs a prepared file node, creating its ancestors.
    pub(crate) fn insert_file(&mut self, file: FileNode) -> Result<&FileNode> {
        let path = file.path().clone();
        let Some(parent) = path.parent() else {
            return Err(StoreError::already_exists(path.as_str()));
        };
        if self.contains(&path) {
            return Err(StoreError::already_exists(path.as_str()));
        }
        self.check_directory_chain(&parent)?;

        let dir = self.ensure_directory(&parent)?;
        match dir.children_mut().entry(path.name().to_string()) {
            Entry::Occupied(_) => Err(StoreError::already_exists(path.as_str())),
            Entry::Vacant(slot) => {
                debug!(path = %path, bytes = file.size(), "created file");
                match slot.insert(Node::File(file)) {
                    Node::File(file) => Ok(&*file),
                    Node::Directory(_) => Err(StoreError::not_a_file(path.as_str())),
                }
            }
        }
    }

    fn contains(&self, path: &VfsPath) -> bool {
        path.is_root() || self.find(path).is_some()
    }

    fn find(&self, path: &VfsPath) -> Option<&Node> {
        let mut segments = path.segments();
        let mut current = self.root.child(segments.next()?)?;
        for segment in segments {
            current = current.as_directory()?.child(segment)?;
        }
        Some(current)
    }

    fn find_mut(&mut self, path: &VfsPath) -> Option<&mut Node> {
        let mut segments = path.segments();
        let mut current = self.root.children_mut().get_mut(segments.next()?)?;
        for segment in segments {
            current = match current {
                Node::Directory(dir) => dir.children_mut().get_mut(segment)?,
                Node::File(_) => return None,
            };
        }
        Some(current)
    }

    fn find_dir(&self, path: &VfsPath) -> Result<&DirectoryNode> {
        if path.is_root() {
            return Ok(&self.root);
        }
        match self.find(path) {
            Some(Node::Directory(dir)) => Ok(dir),
            Some(Node::File(_)) => Err(StoreError::not_a_directory(path.as_str())),
            None => Err(StoreError::not_found(path.as_str())),
        }
    }

    fn dir_mut(&mut self, path: &VfsPath) -> Option<&mut DirectoryNode> {
        if path.is_root() {
            return Some(&mut self.root);
        }
        match self.find_mut(path)? {
            Node::Directory(dir) => Some(dir),
            Node::File(_) => None,
        }
    }

    /// Fails if any existing prefix of `path` (including `path`) is a file.
    fn check_directory_chain(&self, path: &VfsPath) -> Result<()> {
        let mut dir = &self.root;
        for segment in path.segments() {
            match dir.child(segment) {
                Some(Node::Directory(child)) => dir = child,
                Some(Node::File(file)) => {
                    return Err(StoreError::not_a_directory(file.path().as_str()));
                }
                None => return Ok(()),
            }
        }
        Ok(())
    }

    /// Walks down to `path`, creating missing directories on the way.
    fn ensure_directory(&mut self, path: &VfsPath) -> Result<&mut DirectoryNode> {
        let mut dir = &mut self.root;
        for segment in path.segments() {
            let child_path = dir.path().join(segment);
            let child = dir
                .children_mut()
                .entry(segment.to_string())
                .or_insert_with(|| Node::Directory(DirectoryNode::new(child_path.clone())));
            dir = match child {
                Node::Directory(child_dir) => child_dir,
                Node::File(_) => return Err(StoreError::not_a_directory(child_path.as_str())),
            };
        }
        Ok(dir)
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

/// Pre-order iterator over the nodes of a [`Store`].
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Node::Directory(dir) = node {
            let start = self.stack.len();
            self.stack.extend(dir.children());
            self.stack[start..].reverse();
        }
        Some(node)
    }
}
