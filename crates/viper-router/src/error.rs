//! Errors raised while turning page files into routes
//!
//! A `MalformedPath` only concerns the one file it names; callers are
//! expected to skip that file and keep going. `DuplicateRoute` is fatal for
//! the whole build.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// A path component has invalid bracket/group syntax
    #[error("malformed page path `{path}`: {reason}")]
    MalformedPath { path: String, reason: String },

    /// An absolute path handed to the registry is not below the pages root
    #[error("`{}` is not inside the pages directory", path.display())]
    OutsidePagesRoot { path: PathBuf },

    /// Two distinct pages would be registered at the same path
    #[error("duplicate route `{path}`: `{first}` and `{second}` resolve to the same path")]
    DuplicateRoute {
        path: String,
        first: String,
        second: String,
    },
}

impl RouteError {
    pub(crate) fn malformed(path: &str, reason: impl Into<String>) -> Self {
        RouteError::MalformedPath {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = RouteError> = std::result::Result<T, E>;
