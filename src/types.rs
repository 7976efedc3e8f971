//! Core types for route-based filesystems.

/// File-type bits of a regular file (`S_IFREG`).
pub const S_IFREG: u32 = 0o100000;
/// File-type bits of a directory (`S_IFDIR`).
pub const S_IFDIR: u32 = 0o040000;
/// File-type bits of a symbolic link (`S_IFLNK`).
pub const S_IFLNK: u32 = 0o120000;

/// Type of a filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FileType {
    /// Regular file.
    File,
    /// Directory.
    Directory,
    /// Symbolic link.
    Symlink,
}

impl FileType {
    /// The `st_mode` file-type bits for this kind.
    #[inline]
    pub const fn mode_bits(self) -> u32 {
        match self {
            FileType::File => S_IFREG,
            FileType::Directory => S_IFDIR,
            FileType::Symlink => S_IFLNK,
        }
    }
}

/// Stat-like metadata for a filesystem entry.
///
/// Everything here is derived from the resolved entry: nothing is stored
/// between requests.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metadata {
    /// Type of the entry (file, directory, symlink).
    pub file_type: FileType,
    /// Size in bytes. Always 0 for directories.
    pub size: u64,
    /// Permission bits.
    pub permissions: Permissions,
    /// Number of hard links: 2 for directories, 1 otherwise.
    pub nlink: u32,
}

impl Metadata {
    /// Full `st_mode`: file-type bits combined with permission bits.
    #[inline]
    pub const fn mode(&self) -> u32 {
        self.file_type.mode_bits() | self.permissions.mode()
    }

    /// Returns `true` if this is a regular file.
    #[inline]
    pub fn is_file(&self) -> bool {
        self.file_type == FileType::File
    }

    /// Returns `true` if this is a directory.
    #[inline]
    pub fn is_dir(&self) -> bool {
        self.file_type == FileType::Directory
    }

    /// Returns `true` if this is a symbolic link.
    #[inline]
    pub fn is_symlink(&self) -> bool {
        self.file_type == FileType::Symlink
    }
}

/// A directory listing item returned from `read_dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirEntry {
    /// Name of the entry (filename only, not full path).
    pub name: String,
    /// Offset to pass to `read_dir` to resume after this entry.
    pub offset: u64,
}

/// Unix-style permissions stored as a mode bitmask.
///
/// Only permission bits are kept; file-type bits come from the entry kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Permissions(u32);

impl Permissions {
    /// Create permissions from a Unix mode (e.g., 0o444).
    #[inline]
    pub const fn from_mode(mode: u32) -> Self {
        Self(mode & 0o7777)
    }

    /// Get the raw mode value.
    #[inline]
    pub const fn mode(&self) -> u32 {
        self.0
    }

    /// Returns `true` if these permissions deny writing.
    #[inline]
    pub const fn readonly(&self) -> bool {
        (self.0 & 0o222) == 0
    }

    /// Default permissions for a file (0o444 = r--r--r--).
    #[inline]
    pub const fn default_file() -> Self {
        Self(0o444)
    }

    /// Default permissions for a directory (0o555 = r-xr-xr-x).
    #[inline]
    pub const fn default_dir() -> Self {
        Self(0o555)
    }

    /// Default permissions for a symlink (0o777 = rwxrwxrwx).
    #[inline]
    pub const fn default_symlink() -> Self {
        Self(0o777)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_type_mode_bits() {
        assert_eq!(FileType::File.mode_bits(), 0o100000);
        assert_eq!(FileType::Directory.mode_bits(), 0o040000);
        assert_eq!(FileType::Symlink.mode_bits(), 0o120000);
    }

    #[test]
    fn file_type_bits_match_libc() {
        assert_eq!(S_IFREG, libc::S_IFREG as u32);
        assert_eq!(S_IFDIR, libc::S_IFDIR as u32);
        assert_eq!(S_IFLNK, libc::S_IFLNK as u32);
    }

    #[test]
    fn metadata_mode_combines_type_and_permissions() {
        let m = Metadata {
            file_type: FileType::Directory,
            size: 0,
            permissions: Permissions::default_dir(),
            nlink: 2,
        };
        assert_eq!(m.mode(), 0o040555);
        assert!(m.is_dir());
        assert!(!m.is_file());
        assert!(!m.is_symlink());
    }

    #[test]
    fn metadata_is_symlink() {
        let m = Metadata {
            file_type: FileType::Symlink,
            size: 3,
            permissions: Permissions::default_symlink(),
            nlink: 1,
        };
        assert!(m.is_symlink());
        assert_eq!(m.mode(), 0o120777);
    }

    #[test]
    fn permissions_from_mode_masks_extra_bits() {
        let p = Permissions::from_mode(0o100755);
        assert_eq!(p.mode(), 0o755);
    }

    #[test]
    fn permissions_readonly() {
        assert!(Permissions::from_mode(0o444).readonly());
        assert!(!Permissions::from_mode(0o644).readonly());
    }

    #[test]
    fn permissions_defaults() {
        assert_eq!(Permissions::default_file().mode(), 0o444);
        assert_eq!(Permissions::default_dir().mode(), 0o555);
        assert_eq!(Permissions::default_symlink().mode(), 0o777);
        assert!(Permissions::default_file().readonly());
        assert!(Permissions::default_dir().readonly());
    }

    #[test]
    fn types_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FileType>();
        assert_send_sync::<Metadata>();
        assert_send_sync::<DirEntry>();
        assert_send_sync::<Permissions>();
    }
}
