//! Registry configuration
//!
//! Configuration is read from `config.toml`. Every field has a default, so a
//! missing default config file is not an error; an explicitly requested file
//! that does not exist is.

pub mod parser;
pub mod schema;

use std::path::{Path, PathBuf};

pub use parser::{parse_config, parse_config_str, to_toml};
pub use schema::{DataConfig, ListingConfig, RegistryConfig, ServerConfig};

/// `<config_dir>/mcpreg/config.toml`, if a config directory exists
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("mcpreg").join("config.toml"))
}

/// Load configuration from an explicit path, or from the default location.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<RegistryConfig> {
    if let Some(path) = explicit {
        return parse_config(path);
    }

    match default_config_path() {
        Some(path) if path.is_file() => {
            tracing::debug!(path = %path.display(), "Using default config file");
            parse_config(&path)
        }
        _ => Ok(RegistryConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let err = load_config(Some(Path::new("/no/such/config.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_default_path_layout() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("mcpreg/config.toml"));
        }
    }
}
