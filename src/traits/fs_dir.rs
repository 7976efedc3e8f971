//! Directory listing.

use std::path::Path;

use crate::{DirEntry, FsError};

/// Directory listing for a read-only filesystem.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`. Methods use `&self` to allow
/// concurrent access.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `dyn FsDir`.
pub trait FsDir: Send + Sync {
    /// List directory contents (`readdir`).
    ///
    /// The listing always starts with `.` and `..`, followed by the members
    /// in the order the filesystem stores them. `offset` skips that many
    /// leading entries; every yielded [`DirEntry`] carries the offset at
    /// which a later call resumes after it.
    ///
    /// # Errors
    ///
    /// - [`FsError::NotFound`] if nothing exists at the path
    /// - [`FsError::InvalidArgument`] if the path is not a directory
    fn read_dir(&self, path: &Path, offset: u64) -> Result<ReadDirIter, FsError>;
}

/// One-shot iterator over directory entries.
///
/// Wraps a boxed iterator for flexibility across implementations. A listing
/// is not restartable: call [`FsDir::read_dir`] again for a fresh one.
///
/// # Example
///
/// ```rust
/// use routefs::{Fs, FsError};
/// use std::path::Path;
///
/// fn list_names<B: Fs>(fs: &B) -> Result<Vec<String>, FsError> {
///     Ok(fs.read_dir(Path::new("/"), 0)?.names())
/// }
/// ```
pub struct ReadDirIter(Box<dyn Iterator<Item = DirEntry> + Send + 'static>);

impl ReadDirIter {
    /// Create from any compatible iterator.
    pub fn new<I>(iter: I) -> Self
    where
        I: Iterator<Item = DirEntry> + Send + 'static,
    {
        Self(Box::new(iter))
    }

    /// Create a listing of `.`, `..`, then `members`, skipping the first
    /// `offset` entries.
    pub fn listing(members: Vec<String>, offset: u64) -> Self {
        let names = [".".to_string(), "..".to_string()].into_iter().chain(members);
        Self::new(
            names
                .zip(1u64..)
                .skip(usize::try_from(offset).unwrap_or(usize::MAX))
                .map(|(name, next)| DirEntry { name, offset: next }),
        )
    }

    /// Collect just the names.
    pub fn names(self) -> Vec<String> {
        self.map(|entry| entry.name).collect()
    }
}

impl Iterator for ReadDirIter {
    type Item = DirEntry;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }
}

impl std::fmt::Debug for ReadDirIter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadDirIter").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn members(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn listing_starts_with_dot_entries() {
        let names = ReadDirIter::listing(members(&["a", "b", "c"]), 0).names();
        assert_eq!(names, vec![".", "..", "a", "b", "c"]);
    }

    #[test]
    fn listing_of_empty_directory() {
        let names = ReadDirIter::listing(Vec::new(), 0).names();
        assert_eq!(names, vec![".", ".."]);
    }

    #[test]
    fn listing_offsets_resume_after_entry() {
        let entries: Vec<_> = ReadDirIter::listing(members(&["a", "b"]), 0).collect();
        let offsets: Vec<_> = entries.iter().map(|e| e.offset).collect();
        assert_eq!(offsets, vec![1, 2, 3, 4]);

        let resumed = ReadDirIter::listing(members(&["a", "b"]), entries[2].offset).names();
        assert_eq!(resumed, vec!["b"]);
    }

    #[test]
    fn listing_offset_past_end_is_empty() {
        let names = ReadDirIter::listing(members(&["a"]), 10).names();
        assert!(names.is_empty());
    }

    #[test]
    fn read_dir_iter_from_custom_iterator() {
        let iter = ReadDirIter::new(
            vec![DirEntry {
                name: "x".into(),
                offset: 1,
            }]
            .into_iter(),
        );
        assert_eq!(iter.names(), vec!["x"]);
    }

    #[test]
    fn read_dir_iter_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<ReadDirIter>();
    }

    #[test]
    fn fs_dir_is_object_safe() {
        fn _check(_: &dyn FsDir) {}
    }
}
