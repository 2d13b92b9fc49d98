//! Registry configuration schema (config.toml)

use std::net::SocketAddr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::registry::PageLimits;
use crate::registry::listing::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
pub const DEFAULT_WORKERS: usize = 4;
pub const MAX_WORKERS: usize = 1024;
pub const DEFAULT_DATA_PATH: &str = "data/servers.json";

/// Complete registry configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub listing: ListingConfig,

    #[serde(default)]
    pub data: DataConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to listen on
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Request handling threads
    #[serde(default = "default_workers")]
    pub workers: usize,
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

fn default_workers() -> usize {
    DEFAULT_WORKERS
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            workers: default_workers(),
        }
    }
}

/// Page size bounds for `GET /v0/servers`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListingConfig {
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    #[serde(default = "max_limit")]
    pub max_limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_PAGE_LIMIT
}

fn max_limit() -> usize {
    MAX_PAGE_LIMIT
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: max_limit(),
        }
    }
}

/// Where seed entries are read from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataConfig {
    /// Seed file or per-integration directory
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
}

fn default_data_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_PATH)
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
        }
    }
}

impl RegistryConfig {
    /// Validate value ranges that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ListingConfig {
            default_limit,
            max_limit,
        } = self.listing;

        if default_limit == 0 {
            return Err(ConfigError::ZeroDefaultLimit(default_limit));
        }
        if max_limit == 0 {
            return Err(ConfigError::ZeroMaxLimit(max_limit));
        }
        if default_limit > max_limit {
            return Err(ConfigError::DefaultAboveMax {
                default: default_limit,
                max: max_limit,
            });
        }
        if self.server.workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        if self.server.workers > MAX_WORKERS {
            return Err(ConfigError::TooManyWorkers {
                workers: self.server.workers,
                max: MAX_WORKERS,
            });
        }
        self.bind_addr()?;
        Ok(())
    }

    /// Parsed listen address
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server
            .bind
            .parse()
            .map_err(|_| ConfigError::InvalidBind(self.server.bind.clone()))
    }

    pub fn page_limits(&self) -> PageLimits {
        PageLimits {
            default_limit: self.listing.default_limit,
            max_limit: self.listing.max_limit,
        }
    }
}
