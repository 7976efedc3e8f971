//! # Dispatcher
//!
//! Resolves a path to an [`Entry`] by routing it, calling the matched handler
//! once with the bound variables, and coercing what the handler returns.
//!
//! ## Failure Handling
//!
//! A handler that returns `Err`, panics, or produces an entry that cannot be
//! served fails only the request in flight. The error is logged and returned;
//! nothing is retried and nothing is remembered, so the next request for the
//! same path calls the handler again.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use crate::error::HandlerError;
use crate::{Entry, FsError, Params, Router};

/// A registered handler, type-erased.
pub(crate) type Handler = Box<dyn Fn(&Params) -> Result<Entry, HandlerError> + Send + Sync>;

/// Routes paths to handlers and coerces their results.
///
/// Handlers are called synchronously, exactly once per `resolve`, and are
/// never serialized by the dispatcher. Handlers that share mutable state
/// must synchronize it themselves.
pub struct Dispatcher {
    router: Router,
    handlers: HashMap<String, Handler>,
}

impl Dispatcher {
    pub(crate) fn new(router: Router, handlers: HashMap<String, Handler>) -> Self {
        Self { router, handlers }
    }

    /// The route table.
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Names of all registered handlers.
    pub fn handler_names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    /// Resolve `path` to an entry.
    ///
    /// Returns `Ok(Entry::Absent)` when no route matches, the handler
    /// returns nothing, or `path` is not valid UTF-8.
    ///
    /// # Errors
    ///
    /// - [`FsError::Handler`] if the handler returned an error
    /// - [`FsError::HandlerPanicked`] if the handler panicked
    /// - [`FsError::InvalidReply`] if the handler's entry cannot be served
    /// - [`FsError::UnknownHandler`] if the route names a handler that is not
    ///   registered (prevented by [`RouteFsBuilder::build`](crate::RouteFsBuilder::build))
    pub fn resolve(&self, path: &Path) -> Result<Entry, FsError> {
        let Some(path_str) = path.to_str() else {
            tracing::debug!(path = %path.display(), "path is not valid UTF-8");
            return Ok(Entry::Absent);
        };
        let Some(matched) = self.router.route(path_str) else {
            tracing::debug!(path = %path_str, "no route matches");
            return Ok(Entry::Absent);
        };
        tracing::trace!(path = %path_str, handler = matched.handler, params = ?matched.params, "dispatching");

        let handler = self
            .handlers
            .get(matched.handler)
            .ok_or_else(|| FsError::UnknownHandler {
                handler: matched.handler.to_string(),
                pattern: matched.pattern.to_string(),
            })?;

        let entry = match panic::catch_unwind(AssertUnwindSafe(|| handler(&matched.params))) {
            Ok(Ok(entry)) => entry,
            Ok(Err(source)) => {
                tracing::error!(path = %path_str, handler = matched.handler, error = %source, "handler failed");
                return Err(FsError::Handler {
                    path: path.to_path_buf(),
                    handler: matched.handler.to_string(),
                    source,
                });
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::error!(path = %path_str, handler = matched.handler, %message, "handler panicked");
                return Err(FsError::HandlerPanicked {
                    path: path.to_path_buf(),
                    handler: matched.handler.to_string(),
                    message,
                });
            }
        };

        if let Err(reason) = entry.validate() {
            tracing::warn!(path = %path_str, handler = matched.handler, %reason, "handler returned an invalid entry");
            return Err(FsError::InvalidReply {
                path: path.to_path_buf(),
                handler: matched.handler.to_string(),
                reason,
            });
        }

        Ok(entry)
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.handler_names().collect();
        names.sort_unstable();
        f.debug_struct("Dispatcher")
            .field("router", &self.router)
            .field("handlers", &names)
            .finish()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
