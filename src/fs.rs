//! # RouteFs
//!
//! The filesystem a transport mounts: read-only operations answered by
//! resolving every path through the route table on every call.
//!
//! ## Building
//!
//! Handlers are registered by name, then routes refer to them. Routes are
//! tried in the order they are added. All validation happens in
//! [`RouteFsBuilder::build`]:
//!
//! ```rust
//! use routefs::{Entry, FsDir, FsLink, FsRead, RouteFs};
//! use std::path::Path;
//!
//! let fs = RouteFs::builder()
//!     .handler("get_list", |_| vec!["README.txt", "joe"])
//!     .handler("get_readme", |_| "Lockers appear here on demand.\n")
//!     .handler("get_locker", |p| {
//!         p.get("name")
//!             .map(|name| Entry::symlink(format!("/afs/lockers/{name}")))
//!     })
//!     .route("/", "get_list")
//!     .route("/README.txt", "get_readme")
//!     .route("/{name}", "get_locker")
//!     .build()
//!     .unwrap();
//!
//! assert!(fs.metadata(Path::new("/README.txt")).unwrap().is_file());
//! assert_eq!(fs.read_link(Path::new("/joe")).unwrap(), "/afs/lockers/joe");
//! assert_eq!(
//!     fs.read_dir(Path::new("/"), 0).unwrap().names(),
//!     [".", "..", "README.txt", "joe"]
//! );
//! ```

use std::collections::HashMap;
use std::collections::hash_map;
use std::path::Path;

use crate::dispatch::{Dispatcher, Handler};
use crate::{
    Entry, FsDir, FsError, FsLink, FsRead, IntoEntry, Metadata, Params, ReadDirIter, Router,
};

/// A read-only filesystem whose tree is defined by route patterns.
///
/// Every operation resolves the path afresh: route match, one handler call,
/// coercion. Nothing is cached between calls, so handlers backed by changing
/// state are always current.
///
/// `RouteFs` is `Send + Sync` and may be shared across transport threads.
#[derive(Debug)]
pub struct RouteFs {
    dispatcher: Dispatcher,
}

impl RouteFs {
    /// Start building a filesystem.
    pub fn builder() -> RouteFsBuilder {
        RouteFsBuilder::default()
    }

    /// The dispatcher behind this filesystem.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Resolve `path` to the entry its handler describes.
    ///
    /// # Errors
    ///
    /// Handler faults, as for [`Dispatcher::resolve`].
    pub fn resolve(&self, path: &Path) -> Result<Entry, FsError> {
        self.dispatcher.resolve(path)
    }

    /// Resolve `path`, turning `Absent` and `Invalid` into errors.
    fn lookup(&self, path: &Path, operation: &'static str) -> Result<Entry, FsError> {
        match self.dispatcher.resolve(path)? {
            Entry::Absent => Err(FsError::NotFound {
                path: path.to_path_buf(),
            }),
            Entry::Invalid => Err(invalid_argument(path, operation)),
            entry => Ok(entry),
        }
    }
}

fn invalid_argument(path: &Path, operation: &'static str) -> FsError {
    FsError::InvalidArgument {
        path: path.to_path_buf(),
        operation,
    }
}

impl FsRead for RouteFs {
    fn metadata(&self, path: &Path) -> Result<Metadata, FsError> {
        self.lookup(path, "metadata")?
            .metadata()
            .ok_or_else(|| invalid_argument(path, "metadata"))
    }

    fn read_range(&self, path: &Path, offset: u64, len: usize) -> Result<Vec<u8>, FsError> {
        let Entry::File { content, .. } = self.lookup(path, "read")? else {
            return Err(invalid_argument(path, "read"));
        };
        let start = usize::try_from(offset).unwrap_or(usize::MAX);
        if start >= content.len() {
            return Ok(Vec::new());
        }
        let end = start.saturating_add(len).min(content.len());
        Ok(content[start..end].to_vec())
    }
}

impl FsDir for RouteFs {
    fn read_dir(&self, path: &Path, offset: u64) -> Result<ReadDirIter, FsError> {
        let Entry::Directory { members, .. } = self.lookup(path, "read_dir")? else {
            return Err(invalid_argument(path, "read_dir"));
        };
        Ok(ReadDirIter::listing(members, offset))
    }
}

impl FsLink for RouteFs {
    fn read_link(&self, path: &Path) -> Result<String, FsError> {
        let Entry::Symlink { target, .. } = self.lookup(path, "read_link")? else {
            return Err(invalid_argument(path, "read_link"));
        };
        Ok(target)
    }
}

/// Builder for [`RouteFs`].
///
/// Errors are collected and reported by [`build`](Self::build), so the
/// whole table can be written as one chain.
#[derive(Default)]
pub struct RouteFsBuilder {
    handlers: Vec<(String, Handler)>,
    routes: Vec<(String, String)>,
}

impl RouteFsBuilder {
    /// Register a handler under `name`.
    ///
    /// The handler receives the variables bound by the matching route and
    /// returns anything implementing [`IntoEntry`].
    pub fn handler<F, R>(mut self, name: &str, handler: F) -> Self
    where
        F: Fn(&Params) -> R + Send + Sync + 'static,
        R: IntoEntry,
    {
        let handler: Handler = Box::new(move |params: &Params| handler(params).into_entry());
        self.handlers.push((name.to_string(), handler));
        self
    }

    /// Append a route sending paths that match `pattern` to handler `handler`.
    pub fn route(mut self, pattern: &str, handler: &str) -> Self {
        self.routes.push((pattern.to_string(), handler.to_string()));
        self
    }

    /// Validate the table and build the filesystem.
    ///
    /// # Errors
    ///
    /// - [`FsError::DuplicateHandler`] if a handler name was registered twice
    /// - [`FsError::InvalidPattern`] if a route pattern is malformed
    /// - [`FsError::UnknownHandler`] if a route names an unregistered handler
    pub fn build(self) -> Result<RouteFs, FsError> {
        let mut handlers = HashMap::with_capacity(self.handlers.len());
        for (name, handler) in self.handlers {
            match handlers.entry(name) {
                hash_map::Entry::Occupied(slot) => {
                    return Err(FsError::DuplicateHandler {
                        handler: slot.key().clone(),
                    });
                }
                hash_map::Entry::Vacant(slot) => {
                    slot.insert(handler);
                }
            }
        }

        let mut router = Router::new();
        for (pattern, handler) in &self.routes {
            router.register(pattern, handler)?;
            if !handlers.contains_key(handler) {
                return Err(FsError::UnknownHandler {
                    handler: handler.clone(),
                    pattern: pattern.clone(),
                });
            }
        }

        tracing::debug!(
            routes = router.routes().len(),
            handlers = handlers.len(),
            "route table built"
        );
        Ok(RouteFs {
            dispatcher: Dispatcher::new(router, handlers),
        })
    }
}

impl std::fmt::Debug for RouteFsBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.handlers.iter().map(|(name, _)| name).collect();
        f.debug_struct("RouteFsBuilder")
            .field("handlers", &names)
            .field("routes", &self.routes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FileType;

    fn sample() -> RouteFs {
        RouteFs::builder()
            .handler("root", |_| vec!["file", "dir", "link"])
            .handler("file", |_| "0123456789")
            .handler("dir", |_| Entry::dir(["x"]).with_mode(0o500))
            .handler("link", |_| Entry::symlink("/target/path"))
            .handler("invalid", |_| Entry::Invalid)
            .route("/", "root")
            .route("/file", "file")
            .route("/dir", "dir")
            .route("/link", "link")
            .route("/invalid", "invalid")
            .build()
            .unwrap()
    }

    #[test]
    fn metadata_per_kind() {
        let fs = sample();

        let file = fs.metadata(Path::new("/file")).unwrap();
        assert_eq!(file.file_type, FileType::File);
        assert_eq!(file.size, 10);
        assert_eq!(file.nlink, 1);
        assert_eq!(file.mode(), 0o100444);

        let dir = fs.metadata(Path::new("/dir")).unwrap();
        assert_eq!(dir.mode(), 0o040500);
        assert_eq!(dir.nlink, 2);
        assert_eq!(dir.size, 0);

        let link = fs.metadata(Path::new("/link")).unwrap();
        assert_eq!(link.file_type, FileType::Symlink);
        assert_eq!(link.size, 12);
        assert_eq!(link.mode(), 0o120777);
    }

    #[test]
    fn missing_paths_are_not_found() {
        let fs = sample();
        let err = fs.metadata(Path::new("/nope")).unwrap_err();
        assert!(matches!(err, FsError::NotFound { .. }));
        assert!(matches!(
            fs.read_range(Path::new("/nope"), 0, 1),
            Err(FsError::NotFound { .. })
        ));
        assert!(matches!(
            fs.read_dir(Path::new("/nope"), 0),
            Err(FsError::NotFound { .. })
        ));
        assert!(matches!(
            fs.read_link(Path::new("/nope")),
            Err(FsError::NotFound { .. })
        ));
    }

    #[test]
    fn read_range_clips_to_content() {
        let fs = sample();
        let path = Path::new("/file");
        assert_eq!(fs.read_range(path, 0, 4).unwrap(), b"0123");
        assert_eq!(fs.read_range(path, 8, 100).unwrap(), b"89");
        assert_eq!(fs.read_range(path, 3, 0).unwrap(), b"");
        assert!(fs.read_range(path, 10, 5).unwrap().is_empty());
        assert!(fs.read_range(path, u64::MAX, usize::MAX).unwrap().is_empty());
        assert_eq!(fs.read_range(path, 2, usize::MAX).unwrap(), b"23456789");
    }

    #[test]
    fn wrong_kind_is_invalid_argument() {
        let fs = sample();
        for result in [
            fs.read_range(Path::new("/dir"), 0, 1).map(|_| ()),
            fs.read_range(Path::new("/link"), 0, 1).map(|_| ()),
            fs.read_dir(Path::new("/file"), 0).map(|_| ()),
            fs.read_link(Path::new("/file")).map(|_| ()),
            fs.read_link(Path::new("/dir")).map(|_| ()),
            fs.metadata(Path::new("/invalid")).map(|_| ()),
        ] {
            let err = result.unwrap_err();
            assert!(matches!(err, FsError::InvalidArgument { .. }), "{err}");
            assert_eq!(err.errno(), libc::EINVAL);
        }
    }

    #[test]
    fn read_dir_lists_dot_entries_first() {
        let fs = sample();
        let names = fs.read_dir(Path::new("/"), 0).unwrap().names();
        assert_eq!(names, vec![".", "..", "file", "dir", "link"]);
    }

    #[test]
    fn read_link_returns_target() {
        let fs = sample();
        assert_eq!(fs.read_link(Path::new("/link")).unwrap(), "/target/path");
    }

    #[test]
    fn build_rejects_duplicate_handlers() {
        let err = RouteFs::builder()
            .handler("h", |_| "a")
            .handler("h", |_| "b")
            .build()
            .unwrap_err();
        assert!(matches!(err, FsError::DuplicateHandler { ref handler } if handler == "h"));
    }

    #[test]
    fn build_rejects_unknown_handlers() {
        let err = RouteFs::builder()
            .handler("h", |_| "a")
            .route("/a", "h")
            .route("/b", "missing")
            .build()
            .unwrap_err();
        match err {
            FsError::UnknownHandler { handler, pattern } => {
                assert_eq!(handler, "missing");
                assert_eq!(pattern, "/b");
            }
            other => panic!("expected UnknownHandler, got {other:?}"),
        }
    }

    #[test]
    fn build_rejects_bad_patterns() {
        let err = RouteFs::builder()
            .handler("h", |_| "a")
            .route("/{*rest}/x", "h")
            .build()
            .unwrap_err();
        assert!(matches!(err, FsError::InvalidPattern { .. }));
    }

    #[test]
    fn build_rejects_empty_segments() {
        for pattern in ["/docs/", "/a//b"] {
            let err = RouteFs::builder()
                .handler("h", |_| "x")
                .route(pattern, "h")
                .build()
                .unwrap_err();
            assert!(matches!(err, FsError::InvalidPattern { .. }), "{pattern}");
        }
    }

    #[test]
    fn empty_table_has_nothing() {
        let fs = RouteFs::builder().build().unwrap();
        assert!(matches!(
            fs.metadata(Path::new("/")),
            Err(FsError::NotFound { .. })
        ));
    }

    #[test]
    fn route_fs_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RouteFs>();
    }
}
