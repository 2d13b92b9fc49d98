//! Read-only registry services
//!
//! The listing service, version resolver and health reporter all share one
//! loaded [`EntryStore`] through an `Arc`. None of them mutate it, so a
//! [`Registry`] can be cloned freely across request handlers.

pub mod health;
pub mod listing;
pub mod resolver;

pub use health::{HealthReport, HealthReporter, HealthStatus};
pub use listing::{ListingService, Page, PageLimits, PageMetadata};
pub use resolver::VersionResolver;

use std::sync::Arc;

use anyhow::Context;

use crate::config::RegistryConfig;
use crate::source;
use crate::store::EntryStore;

/// The registry's services wired to a single store.
#[derive(Debug, Clone)]
pub struct Registry {
    store: Arc<EntryStore>,
    listing: ListingService,
    resolver: VersionResolver,
    health: HealthReporter,
}

impl Registry {
    pub fn new(store: EntryStore, limits: PageLimits) -> Self {
        Self::from_shared(Arc::new(store), limits)
    }

    pub fn from_shared(store: Arc<EntryStore>, limits: PageLimits) -> Self {
        Self {
            listing: ListingService::new(Arc::clone(&store), limits),
            resolver: VersionResolver::new(Arc::clone(&store)),
            health: HealthReporter::new(Arc::clone(&store)),
            store,
        }
    }

    /// Read the configured seed data and load it into a fresh store.
    ///
    /// Duplicate `(name, version)` pairs abort the load.
    pub fn load(config: &RegistryConfig) -> anyhow::Result<Self> {
        let path = &config.data.path;
        let entries = source::load_path(path)?;
        let store = EntryStore::from_entries(entries)
            .with_context(|| format!("Failed to load registry data from {}", path.display()))?;
        Ok(Self::new(store, config.page_limits()))
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    pub fn listing(&self) -> &ListingService {
        &self.listing
    }

    pub fn resolver(&self) -> &VersionResolver {
        &self.resolver
    }

    pub fn health(&self) -> &HealthReporter {
        &self.health
    }
}
