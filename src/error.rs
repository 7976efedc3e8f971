//! Error types for route-based filesystems.

use std::path::PathBuf;

/// Boxed error returned by a failing handler.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Filesystem error type with contextual variants.
///
/// Variants fall into two groups: errors raised while building a
/// [`RouteFs`](crate::RouteFs) (bad patterns, missing or duplicate handlers),
/// and per-request errors raised by filesystem operations. Per-request errors
/// never outlive the request that produced them.
///
/// Use [`FsError::errno`] to obtain the code a FUSE-style transport expects.
///
/// # Examples
///
/// ```rust
/// use routefs::FsError;
/// use std::path::PathBuf;
///
/// let err = FsError::NotFound { path: PathBuf::from("/missing") };
/// assert_eq!(err.to_string(), "not found: /missing");
/// assert_eq!(err.errno(), libc::ENOENT);
/// ```
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    // Lookup errors
    /// Nothing exists at the path: no route matched, or the handler returned nothing.
    #[error("not found: {path}")]
    NotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The operation is not meaningful for the kind of entry at the path.
    #[error("{operation}: invalid argument: {path}")]
    InvalidArgument {
        /// The path whose entry has the wrong kind.
        path: PathBuf,
        /// The operation that was attempted.
        operation: &'static str,
    },

    /// File content could not be decoded.
    #[error("invalid data: {path} ({details})")]
    InvalidData {
        /// The path with invalid data.
        path: PathBuf,
        /// Details about the invalid data.
        details: String,
    },

    // Handler errors
    /// The handler returned an error.
    #[error("handler {handler} failed for {path}: {source}")]
    Handler {
        /// The path being resolved.
        path: PathBuf,
        /// Name of the handler that failed.
        handler: String,
        /// The error the handler returned.
        #[source]
        source: HandlerError,
    },

    /// The handler panicked.
    #[error("handler {handler} panicked for {path}: {message}")]
    HandlerPanicked {
        /// The path being resolved.
        path: PathBuf,
        /// Name of the handler that panicked.
        handler: String,
        /// The panic payload, if it was a string.
        message: String,
    },

    /// The handler returned a value that cannot be turned into an entry.
    #[error("handler {handler} returned an invalid entry for {path}: {reason}")]
    InvalidReply {
        /// The path being resolved.
        path: PathBuf,
        /// Name of the handler at fault.
        handler: String,
        /// What was wrong with the value.
        reason: String,
    },

    // Construction errors
    /// A route pattern could not be parsed.
    #[error("invalid route pattern {pattern:?}: {reason}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A route refers to a handler that was never registered.
    #[error("route {pattern:?} refers to unknown handler {handler}")]
    UnknownHandler {
        /// The missing handler name.
        handler: String,
        /// The route that refers to it.
        pattern: String,
    },

    /// Two handlers were registered under the same name.
    #[error("handler registered twice: {handler}")]
    DuplicateHandler {
        /// The duplicated name.
        handler: String,
    },

    /// Deserialization error.
    #[error("deserialization error: {0}")]
    Deserialization(String),
}

impl FsError {
    /// The errno value a filesystem transport should reply with.
    ///
    /// Lookup failures map to `ENOENT`, kind mismatches and construction
    /// errors to `EINVAL`, and every handler fault to `EIO`.
    pub fn errno(&self) -> i32 {
        match self {
            FsError::NotFound { .. } => libc::ENOENT,
            FsError::InvalidArgument { .. }
            | FsError::InvalidPattern { .. }
            | FsError::UnknownHandler { .. }
            | FsError::DuplicateHandler { .. }
            | FsError::Deserialization(_) => libc::EINVAL,
            FsError::InvalidData { .. }
            | FsError::Handler { .. }
            | FsError::HandlerPanicked { .. }
            | FsError::InvalidReply { .. } => libc::EIO,
        }
    }

    /// Returns `true` for errors caused by handler code rather than by the request.
    pub fn is_handler_fault(&self) -> bool {
        matches!(
            self,
            FsError::Handler { .. } | FsError::HandlerPanicked { .. } | FsError::InvalidReply { .. }
        )
    }
}

impl From<FsError> for std::io::Error {
    fn from(error: FsError) -> Self {
        std::io::Error::from_raw_os_error(error.errno())
    }
}
