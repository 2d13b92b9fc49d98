//! Aggregate health derived from the entry store.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::store::EntryStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    /// Distinct server names, not total versions
    pub servers_loaded: usize,
}

#[derive(Debug, Clone)]
pub struct HealthReporter {
    store: Arc<EntryStore>,
}

impl HealthReporter {
    pub fn new(store: Arc<EntryStore>) -> Self {
        Self { store }
    }

    pub fn health(&self) -> HealthReport {
        let status = if self.store.is_loaded() {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        };
        HealthReport {
            status,
            servers_loaded: self.store.count(),
        }
    }
}
