//! Metadata and file content operations.

use std::path::Path;

use crate::{FsError, Metadata};

/// Metadata and content reads for a read-only filesystem.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`. Methods take `&self` so a
/// transport can serve requests from several threads at once.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn FsRead`.
pub trait FsRead: Send + Sync {
    /// Get metadata for a path (`getattr`). Symlinks are not followed.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if nothing exists at the path
    /// - [`FsError::InvalidArgument`] if the entry supports no operations
    fn metadata(&self, path: &Path) -> Result<Metadata, FsError>;

    /// Read a range of bytes from a file (`read`).
    ///
    /// Returns at most `len` bytes starting at `offset`. Reading at or past
    /// the end of the content returns an empty vector, not an error.
    ///
    /// Note the argument order: a transport's `read(path, size, offset)`
    /// maps to `read_range(path, offset, size)`.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the file
    /// * `offset` - Byte offset to start reading from
    /// * `len` - Maximum number of bytes to read
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if nothing exists at the path
    /// - [`FsError::InvalidArgument`] if the path is not a regular file
    fn read_range(&self, path: &Path, offset: u64, len: usize) -> Result<Vec<u8>, FsError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_read_is_object_safe() {
        fn _check(_: &dyn FsRead) {}
    }

    #[test]
    fn fs_read_requires_send_sync() {
        fn _assert_send_sync<T: Send + Sync>() {}
        fn _check<T: FsRead>() {
            _assert_send_sync::<T>();
        }
    }
}
