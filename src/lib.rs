//! # routefs
//!
//! Read-only virtual filesystems whose directory tree is declared with
//! **URL-style route patterns** instead of filesystem callbacks.
//!
//! You register handlers by name and map path patterns to them. On every
//! filesystem request the path is matched against the patterns, the first
//! matching handler is called with the variables the pattern bound, and its
//! return value (a string, a list of names, a symlink, or nothing) becomes a
//! file, a directory, a symlink, or "not found".
//!
//! ---
//!
//! ## Quick Start
//!
//! ```rust
//! use routefs::{Entry, FsDir, FsError, FsExt, FsLink, FsRead, RouteFs};
//! use std::path::Path;
//!
//! let fs = RouteFs::builder()
//!     .handler("get_list", |_| vec!["README.txt", "alice", "bob"])
//!     .handler("get_readme", |_| "Each name here links to a home directory.\n")
//!     .handler("get_home", |p| {
//!         p.get("user")
//!             .filter(|user| *user != "nobody")
//!             .map(|user| Entry::symlink(format!("/srv/home/{user}")))
//!     })
//!     .route("/", "get_list")
//!     .route("/README.txt", "get_readme")
//!     .route("/{user}", "get_home")
//!     .build()?;
//!
//! assert_eq!(
//!     fs.read_dir(Path::new("/"), 0)?.names(),
//!     [".", "..", "README.txt", "alice", "bob"]
//! );
//! assert!(fs.is_file(Path::new("/README.txt"))?);
//! assert_eq!(fs.read_link(Path::new("/alice"))?, "/srv/home/alice");
//! assert!(matches!(
//!     fs.metadata(Path::new("/nobody")),
//!     Err(FsError::NotFound { .. })
//! ));
//! # Ok::<(), FsError>(())
//! ```
//!
//! ---
//!
//! ## Core Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`RouteFs`] | The filesystem: implements [`Fs`] on top of the route table |
//! | [`RouteFsBuilder`] | Registers handlers and routes, validates them at `build` |
//! | [`Router`] | Ordered pattern table, first match wins |
//! | [`Pattern`] | Parsed route pattern (literals, `{var}`, `{*rest}`) |
//! | [`Dispatcher`] | Route → handler call → coerced [`Entry`] |
//! | [`Entry`] | What a path resolved to: file, directory, symlink, absent |
//! | [`IntoEntry`] | Coercion from handler return values |
//! | [`FsError`] | Error type; [`FsError::errno`] gives the transport reply |
//! | [`DictFs`] | Ready-made filesystem over a static [`Node`] tree |
//!
//! ---
//!
//! ## Route Patterns
//!
//! | Segment | Matches |
//! |---------|---------|
//! | `README.txt` | exactly that segment |
//! | `{name}` or `:name` | any one non-empty segment, bound to `name` |
//! | `{*rest}` or `*rest` | the rest of the path (possibly empty), bound to `rest` |
//!
//! Patterns are tried in registration order. A literal route registered
//! after a catch-all that also matches it is never reached.
//!
//! ---
//!
//! ## Error Handling
//!
//! | Situation | Error | errno |
//! |-----------|-------|-------|
//! | No route matches, or the handler returns nothing | [`FsError::NotFound`] | `ENOENT` |
//! | Operation doesn't fit the entry (e.g. `read_link` on a file) | [`FsError::InvalidArgument`] | `EINVAL` |
//! | Handler returned `Err`, panicked, or returned an unusable entry | [`FsError::Handler`], [`FsError::HandlerPanicked`], [`FsError::InvalidReply`] | `EIO` |
//!
//! Handler faults fail only the request in flight and are logged through
//! `tracing`. Nothing is retried or cached.
//!
//! ---
//!
//! ## Thread Safety
//!
//! [`RouteFs`] is `Send + Sync`, and every operation takes `&self`. The route
//! table is immutable after `build`. Handler calls are **not** serialized:
//! a handler that keeps mutable state (a lookup cache, say) must guard it.
//!
//! ---
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | Serialization for [`Metadata`], [`DirEntry`], [`Permissions`], [`FileType`], [`Node`]; [`DictFs::from_json`] |

// Private modules
mod dict;
mod dispatch;
mod entry;
mod error;
mod ext;
mod fs;
mod pattern;
mod router;
mod traits;
mod types;

// Public re-exports - error types
pub use error::{FsError, HandlerError};

// Public re-exports - core types
pub use types::{DirEntry, FileType, Metadata, Permissions, S_IFDIR, S_IFLNK, S_IFREG};

// Public re-exports - entry model
pub use entry::{Entry, IntoEntry};

// Public re-exports - routing and dispatch
pub use dispatch::Dispatcher;
pub use pattern::Pattern;
pub use router::{Match, Params, Route, Router};

// Public re-exports - operation traits
pub use traits::{Fs, FsDir, FsLink, FsRead, ReadDirIter};

// Public re-exports - filesystems
pub use dict::{DictFs, Node, SymlinkNode};
pub use fs::{RouteFs, RouteFsBuilder};

// Public re-exports - infrastructure
pub use ext::FsExt;
