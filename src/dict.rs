//! # Static Trees
//!
//! [`DictFs`] serves a tree that is known in advance: nested directories of
//! named files and symlinks. The whole tree is served by a single wildcard
//! route, and its handler walks the tree along the requested path.
//!
//! ```rust
//! use routefs::{DictFs, FsExt, FsLink, Node};
//! use std::path::Path;
//!
//! let fs = DictFs::build(Node::dir([
//!     ("Hello", Node::file("World")),
//!     ("Directory", Node::dir([
//!         ("a", Node::file("a")),
//!         ("c", Node::symlink("a")),
//!     ])),
//! ]))
//! .unwrap();
//!
//! assert_eq!(fs.read_to_string(Path::new("/Hello")).unwrap(), "World");
//! assert_eq!(fs.list(Path::new("/Directory")).unwrap(), ["a", "c"]);
//! assert_eq!(fs.read_link(Path::new("/Directory/c")).unwrap(), "a");
//! ```

use std::sync::Arc;

use indexmap::IndexMap;

use crate::{Entry, FsError, RouteFs};

/// A node of a static tree.
///
/// With the `serde` feature, nodes map to JSON: a string is a file, an
/// object whose only key is `"symlink"` with a string value is a symlink,
/// and any other object is a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Node {
    /// A regular file with text content.
    File(String),
    /// A symbolic link.
    Symlink(SymlinkNode),
    /// A directory; members are listed in insertion order.
    Dir(IndexMap<String, Node>),
}

/// Target of a symlink node.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields))]
pub struct SymlinkNode {
    /// Where the link points.
    pub symlink: String,
}

impl Node {
    /// A file node.
    pub fn file(content: impl Into<String>) -> Self {
        Node::File(content.into())
    }

    /// A symlink node.
    pub fn symlink(target: impl Into<String>) -> Self {
        Node::Symlink(SymlinkNode {
            symlink: target.into(),
        })
    }

    /// A directory node from `(name, node)` pairs, kept in order.
    pub fn dir<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = (S, Node)>,
        S: Into<String>,
    {
        Node::Dir(
            members
                .into_iter()
                .map(|(name, node)| (name.into(), node))
                .collect(),
        )
    }

    /// Follow a `/`-separated relative path. The empty path is this node.
    ///
    /// Returns `None` if a component is missing or passes through a file
    /// or symlink.
    pub fn get(&self, path: &str) -> Option<&Node> {
        if path.is_empty() {
            return Some(self);
        }
        path.split('/').try_fold(self, |node, name| match node {
            Node::Dir(members) => members.get(name),
            Node::File(_) | Node::Symlink(_) => None,
        })
    }

    fn to_entry(&self) -> Entry {
        match self {
            Node::File(content) => Entry::file(content.as_str()),
            Node::Symlink(link) => Entry::symlink(link.symlink.as_str()),
            Node::Dir(members) => Entry::dir(members.keys().cloned()),
        }
    }
}

/// Filesystem over a static [`Node`] tree.
///
/// Builds a [`RouteFs`] with the single route `/{*path}` dispatching to one
/// handler, `"handler"`, that walks the tree.
#[derive(Debug)]
pub struct DictFs;

impl DictFs {
    /// Pattern of the single route.
    pub const ROUTE: &'static str = "/{*path}";

    /// Build a filesystem serving `root` at `/`.
    ///
    /// # Errors
    ///
    /// Only construction errors, which a fixed route table cannot produce.
    pub fn build(root: Node) -> Result<RouteFs, FsError> {
        let root = Arc::new(root);
        RouteFs::builder()
            .handler("handler", move |params| {
                root.get(params.get("path").unwrap_or_default())
                    .map(Node::to_entry)
            })
            .route(Self::ROUTE, "handler")
            .build()
    }

    /// Build a filesystem from a JSON document describing the tree.
    ///
    /// # Errors
    ///
    /// - [`FsError::Deserialization`] if the document is not a valid tree
    ///
    /// # Example
    ///
    /// ```rust
    /// # #[cfg(feature = "serde")]
    /// # {
    /// use routefs::{DictFs, FsExt};
    /// use std::path::Path;
    ///
    /// let fs = DictFs::from_json(r#"{"etc": {"motd": "hi", "link": {"symlink": "motd"}}}"#).unwrap();
    /// assert_eq!(fs.list(Path::new("/etc")).unwrap(), ["motd", "link"]);
    /// assert!(fs.is_symlink(Path::new("/etc/link")).unwrap());
    /// # }
    /// ```
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<RouteFs, FsError> {
        let root: Node =
            serde_json::from_str(json).map_err(|e| FsError::Deserialization(e.to_string()))?;
        Self::build(root)
    }
}
