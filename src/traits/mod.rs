//! # Filesystem Traits
//!
//! The read-only operation set a transport calls into.
//!
//! ## Quick Reference
//!
//! | Trait | Methods | FUSE operation |
//! |-------|---------|----------------|
//! | [`FsRead`] | `metadata`, `read_range` | `getattr`, `read` |
//! | [`FsDir`] | `read_dir` | `readdir` |
//! | [`FsLink`] | `read_link` | `readlink` |
//! | [`Fs`] | all of the above | |
//!
//! ## Blanket Implementation
//!
//! [`Fs`] is implemented for every type implementing the three component
//! traits. Transports should be generic over `Fs` (or take `&dyn Fs`):
//!
//! ```rust
//! use routefs::{Fs, FsError};
//! use std::path::Path;
//!
//! fn describe(fs: &dyn Fs, path: &Path) -> Result<String, FsError> {
//!     let meta = fs.metadata(path)?;
//!     Ok(format!("{:o} {} bytes", meta.mode(), meta.size))
//! }
//! ```
//!
//! ## Thread Safety
//!
//! All traits require `Send + Sync`. Methods take `&self`, so one filesystem
//! can serve concurrent requests without locking at the call site.

mod fs_dir;
mod fs_link;
mod fs_read;

pub use fs_dir::{FsDir, ReadDirIter};
pub use fs_link::FsLink;
pub use fs_read::FsRead;

/// A complete read-only filesystem.
///
/// Combines metadata and content reads ([`FsRead`]), directory listing
/// ([`FsDir`]), and symlink reads ([`FsLink`]).
///
/// # Blanket Implementation
///
/// Automatically implemented for any type that implements all three component
/// traits. You never need to implement `Fs` directly.
///
/// # Example
///
/// ```rust
/// use routefs::{Fs, FsError};
/// use std::path::Path;
///
/// // Generic function that works with any Fs implementation
/// fn cat<B: Fs>(fs: &B, path: &Path) -> Result<Vec<u8>, FsError> {
///     let size = fs.metadata(path)?.size;
///     fs.read_range(path, 0, size as usize)
/// }
/// ```
pub trait Fs: FsRead + FsDir + FsLink {}

// Blanket implementation - any type implementing all three gets Fs for free
impl<T: FsRead + FsDir + FsLink> Fs for T {}
