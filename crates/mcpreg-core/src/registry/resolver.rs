//! Resolve a server name and optional version to a concrete entry.

use std::sync::Arc;

use crate::entry::Entry;
use crate::error::NotFoundError;
use crate::store::EntryStore;

#[derive(Debug, Clone)]
pub struct VersionResolver {
    store: Arc<EntryStore>,
}

impl VersionResolver {
    pub fn new(store: Arc<EntryStore>) -> Self {
        Self { store }
    }

    /// Resolve `name` at `version`, or at its latest version when omitted.
    ///
    /// A given version must match exactly.
    pub fn resolve(&self, name: &str, version: Option<&str>) -> Result<&Entry, NotFoundError> {
        let set = self
            .store
            .versions_of(name)
            .ok_or_else(|| NotFoundError::unknown_name(name))?;

        match version {
            None => Ok(set.latest()),
            Some(version) => set
                .get(version)
                .ok_or_else(|| NotFoundError::unknown_version(name, version)),
        }
    }

    /// Every version of `name`, newest first. Never empty on success.
    pub fn versions(&self, name: &str) -> Result<&[Entry], NotFoundError> {
        self.store
            .versions_of(name)
            .map(|set| set.entries())
            .ok_or_else(|| NotFoundError::unknown_name(name))
    }

    /// Whether a server (and optionally an exact version) exists.
    pub fn exists(&self, name: &str, version: Option<&str>) -> bool {
        match version {
            Some(v) => self.store.get(name, v).is_some(),
            None => self.store.contains(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> VersionResolver {
        let store = EntryStore::from_entries(vec![
            Entry::new("tool", "1.0.0", ""),
            Entry::new("tool", "latest", "literal"),
        ])
        .unwrap();
        VersionResolver::new(Arc::new(store))
    }

    #[test]
    fn test_literal_latest_version_is_exact_match() {
        let resolver = resolver();

        assert_eq!(
            resolver.resolve("tool", Some("latest")).unwrap().description,
            "literal"
        );
        // Malformed versions rank below semver ones
        assert_eq!(resolver.resolve("tool", None).unwrap().version, "1.0.0");
    }

    #[test]
    fn test_given_version_never_falls_back_to_newest() {
        let store = EntryStore::from_entries(vec![Entry::new("tool", "1.0.0", "")]).unwrap();
        let resolver = VersionResolver::new(Arc::new(store));

        for version in ["latest", "LATEST", "", "  "] {
            assert_eq!(
                resolver.resolve("tool", Some(version)).unwrap_err(),
                NotFoundError::unknown_version("tool", version),
                "{version:?}"
            );
        }
    }

    #[test]
    fn test_exists() {
        let resolver = resolver();
        assert!(resolver.exists("tool", None));
        assert!(resolver.exists("tool", Some("1.0.0")));
        assert!(!resolver.exists("tool", Some("2.0.0")));
        assert!(!resolver.exists("other", None));
    }
}
