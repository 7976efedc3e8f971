//! # Entry Model
//!
//! The closed set of things a path can resolve to, and the coercion rules
//! that turn a handler's return value into one of them.
//!
//! ## Coercion
//!
//! | Handler returns | Entry |
//! |-----------------|-------|
//! | `None`, [`Entry::Absent`] | nothing here (`ENOENT`) |
//! | `String`, `&str` | [`Entry::File`] with the UTF-8 bytes as content |
//! | `Vec<String>`, `Vec<&str>` | [`Entry::Directory`] with the names in order |
//! | [`Entry::symlink`] | [`Entry::Symlink`] |
//! | any [`Entry`] | passed through unchanged, including its mode |
//! | `Result<T, E>` | `T` coerced, `E` reported as a handler fault |
//!
//! Return types outside this table do not implement [`IntoEntry`] and are
//! rejected by the compiler when the handler is registered.

use crate::error::HandlerError;
use crate::{FileType, Metadata, Permissions};

/// What lives at a path, as resolved for a single request.
///
/// Entries are built fresh for every operation and never shared or mutated.
/// Sizes are derived from the content, never stored.
///
/// # Example
///
/// ```rust
/// use routefs::{Entry, FileType};
///
/// let readme = Entry::file("hello\n");
/// assert_eq!(readme.size(), Some(6));
///
/// let home = Entry::symlink("/afs/athena/user/j/o/joe").with_mode(0o755);
/// assert_eq!(home.file_type(), Some(FileType::Symlink));
/// assert_eq!(home.permissions().map(|p| p.mode()), Some(0o755));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// Nothing exists at this path.
    Absent,
    /// Something exists, but no operation is meaningful on it.
    Invalid,
    /// A regular file.
    File {
        /// File content.
        content: Vec<u8>,
        /// Permission bits (default `0o444`).
        permissions: Permissions,
    },
    /// A directory. `.` and `..` are not stored here.
    Directory {
        /// Member names, listed in this order.
        members: Vec<String>,
        /// Permission bits (default `0o555`).
        permissions: Permissions,
    },
    /// A symbolic link.
    Symlink {
        /// Link target, returned verbatim by `read_link`.
        target: String,
        /// Permission bits (default `0o777`).
        permissions: Permissions,
    },
}

impl Entry {
    /// A regular file with the default mode.
    pub fn file(content: impl Into<Vec<u8>>) -> Self {
        Entry::File {
            content: content.into(),
            permissions: Permissions::default_file(),
        }
    }

    /// A directory with the default mode.
    pub fn dir<I, S>(members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Entry::Directory {
            members: members.into_iter().map(Into::into).collect(),
            permissions: Permissions::default_dir(),
        }
    }

    /// A symbolic link with the default mode.
    pub fn symlink(target: impl Into<String>) -> Self {
        Entry::Symlink {
            target: target.into(),
            permissions: Permissions::default_symlink(),
        }
    }

    /// Override the permission bits. No effect on `Absent` and `Invalid`.
    pub fn with_mode(self, mode: u32) -> Self {
        let permissions = Permissions::from_mode(mode);
        match self {
            Entry::File { content, .. } => Entry::File {
                content,
                permissions,
            },
            Entry::Directory { members, .. } => Entry::Directory {
                members,
                permissions,
            },
            Entry::Symlink { target, .. } => Entry::Symlink {
                target,
                permissions,
            },
            other => other,
        }
    }

    /// Returns `true` for [`Entry::Absent`].
    #[inline]
    pub fn is_absent(&self) -> bool {
        matches!(self, Entry::Absent)
    }

    /// The kind of entry, if it has one.
    pub fn file_type(&self) -> Option<FileType> {
        match self {
            Entry::File { .. } => Some(FileType::File),
            Entry::Directory { .. } => Some(FileType::Directory),
            Entry::Symlink { .. } => Some(FileType::Symlink),
            Entry::Absent | Entry::Invalid => None,
        }
    }

    /// Permission bits, if the entry has any.
    pub fn permissions(&self) -> Option<Permissions> {
        match self {
            Entry::File { permissions, .. }
            | Entry::Directory { permissions, .. }
            | Entry::Symlink { permissions, .. } => Some(*permissions),
            Entry::Absent | Entry::Invalid => None,
        }
    }

    /// Size in bytes: content length, target length, or 0 for directories.
    pub fn size(&self) -> Option<u64> {
        match self {
            Entry::File { content, .. } => Some(content.len() as u64),
            Entry::Symlink { target, .. } => Some(target.len() as u64),
            Entry::Directory { .. } => Some(0),
            Entry::Absent | Entry::Invalid => None,
        }
    }

    /// Stat-like metadata, or `None` for `Absent` and `Invalid`.
    pub fn metadata(&self) -> Option<Metadata> {
        let file_type = self.file_type()?;
        Some(Metadata {
            file_type,
            size: self.size()?,
            permissions: self.permissions()?,
            nlink: if file_type == FileType::Directory { 2 } else { 1 },
        })
    }

    /// Check that the entry is something a filesystem can serve.
    ///
    /// Directory members must be plain names: non-empty, not `.` or `..`,
    /// without `/` or NUL. Symlink targets must be non-empty and NUL-free.
    pub(crate) fn validate(&self) -> Result<(), String> {
        match self {
            Entry::Directory { members, .. } => {
                for name in members {
                    if name.is_empty() {
                        return Err("directory member with an empty name".into());
                    }
                    if name == "." || name == ".." {
                        return Err(format!("directory member {name:?} is reserved"));
                    }
                    if name.contains('/') || name.contains('\0') {
                        return Err(format!("directory member {name:?} is not a plain name"));
                    }
                }
                Ok(())
            }
            Entry::Symlink { target, .. } => {
                if target.is_empty() {
                    Err("symlink with an empty target".into())
                } else if target.contains('\0') {
                    Err("symlink target contains NUL".into())
                } else {
                    Ok(())
                }
            }
            _ => Ok(()),
        }
    }
}

/// Conversion from a handler's return value into an [`Entry`].
///
/// Implemented for every return type listed in the [module docs](self).
/// Implement it for your own types to return them straight from handlers.
///
/// # Example
///
/// ```rust
/// use routefs::{Entry, IntoEntry};
///
/// assert_eq!("hi".into_entry().unwrap(), Entry::file("hi"));
/// assert_eq!(vec!["a", "b"].into_entry().unwrap(), Entry::dir(["a", "b"]));
/// assert_eq!(None::<String>.into_entry().unwrap(), Entry::Absent);
/// ```
pub trait IntoEntry {
    /// Convert into an entry, or report the handler's failure.
    fn into_entry(self) -> Result<Entry, HandlerError>;
}

impl IntoEntry for Entry {
    fn into_entry(self) -> Result<Entry, HandlerError> {
        Ok(self)
    }
}

impl IntoEntry for String {
    fn into_entry(self) -> Result<Entry, HandlerError> {
        Ok(Entry::file(self))
    }
}

impl IntoEntry for &str {
    fn into_entry(self) -> Result<Entry, HandlerError> {
        Ok(Entry::file(self))
    }
}

impl IntoEntry for Vec<String> {
    fn into_entry(self) -> Result<Entry, HandlerError> {
        Ok(Entry::dir(self))
    }
}

impl IntoEntry for Vec<&str> {
    fn into_entry(self) -> Result<Entry, HandlerError> {
        Ok(Entry::dir(self))
    }
}

impl<T: IntoEntry> IntoEntry for Option<T> {
    fn into_entry(self) -> Result<Entry, HandlerError> {
        match self {
            Some(value) => value.into_entry(),
            None => Ok(Entry::Absent),
        }
    }
}

impl<T, E> IntoEntry for Result<T, E>
where
    T: IntoEntry,
    E: Into<HandlerError>,
{
    fn into_entry(self) -> Result<Entry, HandlerError> {
        self.map_err(Into::into)?.into_entry()
    }
}
