//! mcpreg Core Library
//!
//! Catalogs installable MCP server descriptors and serves them over a small
//! read-only HTTP API with cursor pagination and version resolution.

pub mod api;
pub mod config;
pub mod cursor;
pub mod entry;
pub mod error;
pub mod registry;
pub mod server;
pub mod source;
pub mod store;
pub mod version;

/// Re-exports of commonly used types
pub mod prelude {
    // Data model
    pub use crate::entry::Entry;
    pub use crate::store::{EntryStore, VersionSet};

    // Services
    pub use crate::cursor::CursorCodec;
    pub use crate::registry::{
        HealthReport, HealthReporter, HealthStatus, ListingService, Page, PageLimits,
        PageMetadata, Registry, VersionResolver,
    };

    // Errors
    pub use crate::error::{
        ConfigError, CursorError, CursorErrorKind, DuplicateEntryError, LoadError, NotFoundError,
        ServerError,
    };

    // Versions
    pub use crate::version::{LexicalOrdering, SemverOrdering, VersionOrdering};

    // HTTP
    pub use crate::api::{ApiResponse, Router};
    pub use crate::server::{RegistryServer, ShutdownHandle};

    // Configuration
    pub use crate::config::RegistryConfig;
}
