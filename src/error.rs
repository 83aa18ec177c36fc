//! Error types for the module registry.

use crate::path::ModulePath;
use thiserror::Error;

/// Registry-level errors
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A handler declaration in a raw definition has the wrong shape.
    ///
    /// Raised synchronously during `register` and `update` when validation
    /// is enabled; carries everything needed to locate the offending entry.
    #[error("{category}.{entry} in module \"{path}\" should be {expected}, got {value}")]
    InvalidHandler {
        path: ModulePath,
        category: &'static str,
        entry: String,
        expected: &'static str,
        value: String,
    },

    /// A path did not resolve through successive child lookups.
    #[error("invalid module path: \"{0}\"")]
    InvalidPath(ModulePath),

    /// The empty path was passed to `register`; the root module is assigned
    /// exactly once, at construction.
    #[error("cannot register at the root path; the root module is fixed at construction")]
    RootRedefinition,

    #[error("logging setup failed: {0}")]
    LoggingInit(String),
}
