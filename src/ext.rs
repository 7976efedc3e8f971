//! # Extension Traits
//!
//! Convenience methods for any [`Fs`].
//!
//! ## Overview
//!
//! [`FsExt`] provides commonly-needed queries that aren't part of the
//! transport-facing operation set. They are default methods with a blanket
//! implementation, so every `Fs` gets them for free.
//!
//! ## Available Methods
//!
//! | Method | Description |
//! |--------|-------------|
//! | [`exists`](FsExt::exists) | Check whether anything is at a path |
//! | [`is_file`](FsExt::is_file) | Check if path is a regular file |
//! | [`is_dir`](FsExt::is_dir) | Check if path is a directory |
//! | [`is_symlink`](FsExt::is_symlink) | Check if path is a symbolic link |
//! | [`file_size`](FsExt::file_size) | Size from metadata |
//! | [`read`](FsExt::read) | Whole file content |
//! | [`read_to_string`](FsExt::read_to_string) | Whole file as UTF-8 |
//! | [`list`](FsExt::list) | Directory members without `.` and `..` |

use std::path::Path;

use crate::{Fs, FsError, Metadata};

/// Extension methods for any read-only filesystem.
///
/// # Example
///
/// ```rust
/// use routefs::{FsExt, RouteFs};
/// use std::path::Path;
///
/// let fs = RouteFs::builder()
///     .handler("motd", |_| "welcome\n")
///     .route("/motd", "motd")
///     .build()
///     .unwrap();
///
/// assert!(fs.is_file(Path::new("/motd")).unwrap());
/// assert!(!fs.exists(Path::new("/other")).unwrap());
/// assert_eq!(fs.read_to_string(Path::new("/motd")).unwrap(), "welcome\n");
/// ```
pub trait FsExt: Fs {
    /// Check whether anything exists at `path`.
    ///
    /// Returns `Ok(false)` for NotFound; other errors are passed through.
    fn exists(&self, path: &Path) -> Result<bool, FsError> {
        Ok(probe(self.metadata(path))?.is_some())
    }

    /// Check if the path points to a regular file.
    ///
    /// Returns `Ok(false)` if the path doesn't exist (not an error).
    fn is_file(&self, path: &Path) -> Result<bool, FsError> {
        Ok(probe(self.metadata(path))?.is_some_and(|m| m.is_file()))
    }

    /// Check if the path points to a directory.
    ///
    /// Returns `Ok(false)` if the path doesn't exist (not an error).
    fn is_dir(&self, path: &Path) -> Result<bool, FsError> {
        Ok(probe(self.metadata(path))?.is_some_and(|m| m.is_dir()))
    }

    /// Check if the path points to a symbolic link.
    ///
    /// Returns `Ok(false)` if the path doesn't exist (not an error).
    fn is_symlink(&self, path: &Path) -> Result<bool, FsError> {
        Ok(probe(self.metadata(path))?.is_some_and(|m| m.is_symlink()))
    }

    /// Get the size in bytes.
    ///
    /// # Errors
    ///
    /// Returns `FsError::NotFound` if the path doesn't exist.
    fn file_size(&self, path: &Path) -> Result<u64, FsError> {
        Ok(self.metadata(path)?.size)
    }

    /// Read the whole file.
    ///
    /// The handler runs twice: once for the size, once for the content.
    /// A handler whose content changes in between yields a short or clipped read.
    fn read(&self, path: &Path) -> Result<Vec<u8>, FsError> {
        let size = self.file_size(path)?;
        self.read_range(path, 0, usize::try_from(size).unwrap_or(usize::MAX))
    }

    /// Read the whole file as UTF-8.
    ///
    /// # Errors
    ///
    /// - [`FsError::InvalidData`] if the content is not valid UTF-8
    fn read_to_string(&self, path: &Path) -> Result<String, FsError> {
        String::from_utf8(self.read(path)?).map_err(|_| FsError::InvalidData {
            path: path.to_path_buf(),
            details: "not valid UTF-8".into(),
        })
    }

    /// Directory member names, without `.` and `..`.
    fn list(&self, path: &Path) -> Result<Vec<String>, FsError> {
        Ok(self.read_dir(path, 2)?.names())
    }
}

// Blanket implementation - any Fs gets FsExt for free
impl<B: Fs + ?Sized> FsExt for B {}

fn probe(result: Result<Metadata, FsError>) -> Result<Option<Metadata>, FsError> {
    match result {
        Ok(m) => Ok(Some(m)),
        Err(FsError::NotFound { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FileType, FsDir, FsLink, FsRead, Permissions, ReadDirIter};

    /// Mock filesystem with one entry of a fixed kind at every path except `/missing`.
    struct MockFs {
        kind: FileType,
        content: &'static [u8],
    }

    impl MockFs {
        fn with_file(content: &'static [u8]) -> Self {
            Self {
                kind: FileType::File,
                content,
            }
        }

        fn with_dir() -> Self {
            Self {
                kind: FileType::Directory,
                content: b"",
            }
        }
    }

    impl FsRead for MockFs {
        fn metadata(&self, path: &Path) -> Result<Metadata, FsError> {
            if path == Path::new("/missing") {
                return Err(FsError::NotFound {
                    path: path.to_path_buf(),
                });
            }
            Ok(Metadata {
                file_type: self.kind,
                size: self.content.len() as u64,
                permissions: Permissions::default_file(),
                nlink: 1,
            })
        }

        fn read_range(&self, _: &Path, offset: u64, len: usize) -> Result<Vec<u8>, FsError> {
            let start = (offset as usize).min(self.content.len());
            let end = start.saturating_add(len).min(self.content.len());
            Ok(self.content[start..end].to_vec())
        }
    }

    impl FsDir for MockFs {
        fn read_dir(&self, _: &Path, offset: u64) -> Result<ReadDirIter, FsError> {
            Ok(ReadDirIter::listing(vec!["one".into(), "two".into()], offset))
        }
    }

    impl FsLink for MockFs {
        fn read_link(&self, path: &Path) -> Result<String, FsError> {
            Err(FsError::InvalidArgument {
                path: path.to_path_buf(),
                operation: "read_link",
            })
        }
    }

    #[test]
    fn is_file_and_is_dir() {
        let file = MockFs::with_file(b"abc");
        assert!(file.is_file(Path::new("/f")).unwrap());
        assert!(!file.is_dir(Path::new("/f")).unwrap());

        let dir = MockFs::with_dir();
        assert!(dir.is_dir(Path::new("/d")).unwrap());
        assert!(!dir.is_symlink(Path::new("/d")).unwrap());
    }

    #[test]
    fn missing_is_false_not_error() {
        let fs = MockFs::with_file(b"abc");
        assert!(!fs.exists(Path::new("/missing")).unwrap());
        assert!(!fs.is_file(Path::new("/missing")).unwrap());
        assert!(!fs.is_dir(Path::new("/missing")).unwrap());
    }

    #[test]
    fn file_size_errors_on_missing() {
        let fs = MockFs::with_file(b"abc");
        assert_eq!(fs.file_size(Path::new("/f")).unwrap(), 3);
        assert!(matches!(
            fs.file_size(Path::new("/missing")),
            Err(FsError::NotFound { .. })
        ));
    }

    #[test]
    fn read_whole_file() {
        let fs = MockFs::with_file(b"hello world");
        assert_eq!(fs.read(Path::new("/f")).unwrap(), b"hello world");
        assert_eq!(fs.read_to_string(Path::new("/f")).unwrap(), "hello world");
    }

    #[test]
    fn read_to_string_rejects_invalid_utf8() {
        let fs = MockFs::with_file(&[0xff, 0xfe]);
        assert!(matches!(
            fs.read_to_string(Path::new("/f")),
            Err(FsError::InvalidData { .. })
        ));
    }

    #[test]
    fn list_skips_dot_entries() {
        let fs = MockFs::with_dir();
        assert_eq!(fs.list(Path::new("/")).unwrap(), vec!["one", "two"]);
    }

    #[test]
    fn fs_ext_available_on_dyn_fs() {
        let fs: &dyn Fs = &MockFs::with_file(b"x");
        assert!(fs.is_file(Path::new("/f")).unwrap());
    }
}
