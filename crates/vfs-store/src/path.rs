//! Path normalization for the store.
//!
//! Every path that enters the store goes through [`normalize`] first. The
//! normalizer never fails: it guarantees exactly one leading `/`, drops
//! trailing separators and collapses runs of `/`, and leaves everything else
//! (spaces, parentheses, unicode, dots) exactly as the caller wrote it.
//!
//! # Examples
//!
//! ```
//! use agent_vfs_store::{VfsPath, normalize};
//!
//! assert_eq!(normalize("docs/readme.md"), "/docs/readme.md");
//! assert_eq!(normalize("/docs/"), "/docs");
//! assert_eq!(normalize(""), "/");
//!
//! let path = VfsPath::new("notes/2024 (draft)/ideas.txt");
//! assert_eq!(path.as_str(), "/notes/2024 (draft)/ideas.txt");
//! assert_eq!(path.name(), "ideas.txt");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonicalizes an arbitrary string into an absolute, slash-separated path.
///
/// Paths without a leading slash are treated as relative to the root. The
/// empty string and strings made only of slashes normalize to `/`.
///
/// # Examples
///
/// ```
/// use agent_vfs_store::normalize;
///
/// assert_eq!(normalize("a/b"), "/a/b");
/// assert_eq!(normalize("//a//b//"), "/a/b");
/// assert_eq!(normalize("/"), "/");
/// assert_eq!(normalize("/ünï cödé/(1).txt"), "/ünï cödé/(1).txt");
/// ```
#[must_use]
pub fn normalize(path: &str) -> String {
    let mut normalized = String::with_capacity(path.len() + 1);
    for segment in path.split('/').filter(|segment| !segment.is_empty()) {
        normalized.push('/');
        normalized.push_str(segment);
    }

    if normalized.is_empty() {
        normalized.push('/');
    }
    normalized
}

/// A normalized, absolute store path.
///
/// Construction always normalizes, so two `VfsPath` values compare equal
/// exactly when they address the same node.
///
/// # Examples
///
/// ```
/// use agent_vfs_store::VfsPath;
///
/// let path = VfsPath::new("/projects/app/src/");
/// assert_eq!(path.as_str(), "/projects/app/src");
/// assert_eq!(path.parent().unwrap().as_str(), "/projects/app");
/// assert!(VfsPath::root().is_root());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct VfsPath(String);

impl VfsPath {
    /// Creates a normalized path from any string.
    #[must_use]
    pub fn new(path: impl AsRef<str>) -> Self {
        Self(normalize(path.as_ref()))
    }

    /// The root path, `/`.
    #[must_use]
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for `/`.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Returns the parent directory of this path.
    ///
    /// Returns `None` for the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use agent_vfs_store::VfsPath;
    ///
    /// assert_eq!(VfsPath::new("/a").parent(), Some(VfsPath::root()));
    /// assert_eq!(VfsPath::root().parent(), None);
    /// ```
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        self.0.rfind('/').map(|pos| {
            if pos == 0 {
                Self::root()
            } else {
                Self(self.0[..pos].to_string())
            }
        })
    }

    /// Returns the final segment, or the empty string for the root.
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.rfind('/').map_or("", |pos| &self.0[pos + 1..])
    }

    /// Iterates over the segments from the root downwards.
    ///
    /// The root has no segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|segment| !segment.is_empty())
    }

    /// Number of segments below the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// Appends a child name to this path.
    ///
    /// # Examples
    ///
    /// ```
    /// use agent_vfs_store::VfsPath;
    ///
    /// assert_eq!(VfsPath::root().join("a").as_str(), "/a");
    /// assert_eq!(VfsPath::new("/a").join("b.txt").as_str(), "/a/b.txt");
    /// ```
    #[must_use]
    pub fn join(&self, name: &str) -> Self {
        Self::new(format!("{}/{name}", self.0))
    }

    /// Returns `true` if `other` lies strictly below this path.
    ///
    /// # Examples
    ///
    /// ```
    /// use agent_vfs_store::VfsPath;
    ///
    /// let dir = VfsPath::new("/a");
    /// assert!(dir.is_ancestor_of(&VfsPath::new("/a/b/c")));
    /// assert!(!dir.is_ancestor_of(&VfsPath::new("/ab")));
    /// assert!(!dir.is_ancestor_of(&dir));
    /// ```
    #[must_use]
    pub fn is_ancestor_of(&self, other: &Self) -> bool {
        if self.is_root() {
            return !other.is_root();
        }
        other
            .0
            .strip_prefix(self.0.as_str())
            .is_some_and(|rest| rest.starts_with('/'))
    }
}

impl Default for VfsPath {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for VfsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VfsPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for VfsPath {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

impl From<&str> for VfsPath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<VfsPath> for String {
    fn from(path: VfsPath) -> Self {
        path.0
    }
}
