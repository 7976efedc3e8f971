//! Symlink operations.

use std::path::Path;

use crate::FsError;

/// Reading symbolic links.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`. Methods use `&self` to allow
/// concurrent access.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn FsLink`.
pub trait FsLink: Send + Sync {
    /// Read the target of a symbolic link (`readlink`).
    ///
    /// Returns the raw target, not canonicalized and not checked for existence.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if nothing exists at the path
    /// - [`FsError::InvalidArgument`] if the path is not a symlink
    fn read_link(&self, path: &Path) -> Result<String, FsError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_link_is_object_safe() {
        fn _check(_: &dyn FsLink) {}
    }

    #[test]
    fn fs_link_requires_send_sync() {
        fn _assert_send_sync<T: Send + Sync>() {}
        fn _check<T: FsLink>() {
            _assert_send_sync::<T>();
        }
    }
}
