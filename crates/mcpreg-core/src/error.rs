//! Typed errors for the registry core
//!
//! Each failure a caller can act on has its own type so the HTTP layer can
//! map it to a status code without inspecting message text.

use thiserror::Error;

/// The same `(name, version)` pair appeared twice in the load input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Duplicate entry: server '{name}' version {version} appears more than once")]
pub struct DuplicateEntryError {
    pub name: String,
    pub version: String,
}

/// Failures of the one-time store population step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error(transparent)]
    Duplicate(#[from] DuplicateEntryError),

    #[error("Entry store has already been loaded")]
    AlreadyLoaded,

    #[error("Invalid entry at index {index}: {reason}")]
    InvalidEntry { index: usize, reason: String },
}

/// Why a pagination cursor was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorErrorKind {
    /// The token does not decode to a prior-position marker.
    Malformed,
}

/// Pagination token could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid cursor: {reason}")]
pub struct CursorError {
    pub kind: CursorErrorKind,
    pub reason: String,
}

impl CursorError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self {
            kind: CursorErrorKind::Malformed,
            reason: reason.into(),
        }
    }
}

/// A requested server or server version does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotFoundError {
    #[error("Server '{name}' not found")]
    UnknownName { name: String },

    #[error("Version {version} not found for server '{name}'")]
    UnknownVersion { name: String, version: String },
}

impl NotFoundError {
    pub fn unknown_name(name: impl Into<String>) -> Self {
        NotFoundError::UnknownName { name: name.into() }
    }

    pub fn unknown_version(name: impl Into<String>, version: impl Into<String>) -> Self {
        NotFoundError::UnknownVersion {
            name: name.into(),
            version: version.into(),
        }
    }

    /// Name of the server the lookup was for.
    pub fn name(&self) -> &str {
        match self {
            NotFoundError::UnknownName { name } | NotFoundError::UnknownVersion { name, .. } => {
                name
            }
        }
    }
}

/// Invalid values in a registry configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("listing.default_limit must be at least 1 (got {0})")]
    ZeroDefaultLimit(usize),

    #[error("listing.max_limit must be at least 1 (got {0})")]
    ZeroMaxLimit(usize),

    #[error("listing.default_limit ({default}) exceeds listing.max_limit ({max})")]
    DefaultAboveMax { default: usize, max: usize },

    #[error("server.workers must be at least 1")]
    NoWorkers,

    #[error("server.workers ({workers}) exceeds the maximum of {max}")]
    TooManyWorkers { workers: usize, max: usize },

    #[error("Invalid bind address '{0}'")]
    InvalidBind(String),
}

/// HTTP listener failures.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {reason}")]
    Bind { addr: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Server task failed: {0}")]
    Task(String),
}
