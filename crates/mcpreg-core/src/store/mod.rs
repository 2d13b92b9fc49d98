//! Entry store
//!
//! Owns every registry entry, grouped by server name. The store is filled
//! exactly once by [`EntryStore::load`] and is read-only afterwards, so it can
//! be shared between request handlers behind an `Arc` without locking.
//!
//! Names are kept in a `BTreeMap`, which gives the canonical listing order
//! (byte-wise lexicographic, case-sensitive) for free.

mod version_set;

pub use version_set::VersionSet;

use std::collections::{BTreeMap, HashSet};
use std::ops::Bound;
use std::sync::Arc;

use crate::entry::Entry;
use crate::error::{DuplicateEntryError, LoadError};
use crate::version::{SemverOrdering, VersionOrdering};

/// In-memory mapping from server name to its versions.
#[derive(Debug, Clone)]
pub struct EntryStore {
    servers: BTreeMap<String, VersionSet>,
    ordering: Arc<dyn VersionOrdering>,
    loaded: bool,
}

impl Default for EntryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryStore {
    /// Create an empty, unloaded store using semver ordering.
    pub fn new() -> Self {
        Self::with_ordering(Arc::new(SemverOrdering))
    }

    /// Create an empty, unloaded store with a custom version ordering.
    pub fn with_ordering(ordering: Arc<dyn VersionOrdering>) -> Self {
        Self {
            servers: BTreeMap::new(),
            ordering,
            loaded: false,
        }
    }

    /// Create and load a store in one step.
    pub fn from_entries(entries: Vec<Entry>) -> Result<Self, LoadError> {
        let mut store = Self::new();
        store.load(entries)?;
        Ok(store)
    }

    /// Populate the store.
    ///
    /// Either every entry is accepted or the store is left untouched: the new
    /// map is built aside and only swapped in once it is complete.
    pub fn load(&mut self, entries: Vec<Entry>) -> Result<(), LoadError> {
        if self.loaded {
            return Err(LoadError::AlreadyLoaded);
        }

        let total = entries.len();
        let mut servers: BTreeMap<String, VersionSet> = BTreeMap::new();
        let mut seen: HashSet<(String, String)> = HashSet::with_capacity(total);

        for (index, entry) in entries.into_iter().enumerate() {
            entry
                .validate()
                .map_err(|reason| LoadError::InvalidEntry { index, reason })?;

            if !seen.insert((entry.name.clone(), entry.version.clone())) {
                return Err(DuplicateEntryError {
                    name: entry.name,
                    version: entry.version,
                }
                .into());
            }

            match servers.get_mut(&entry.name) {
                Some(set) => set.push(entry),
                None => {
                    servers.insert(entry.name.clone(), VersionSet::new(entry));
                }
            }
        }

        for set in servers.values_mut() {
            set.sort(self.ordering.as_ref());
        }

        tracing::info!(
            servers = servers.len(),
            versions = total,
            "Loaded registry entries"
        );

        self.servers = servers;
        self.loaded = true;
        Ok(())
    }

    /// Whether the load step has completed successfully.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Every distinct name in canonical order.
    pub fn all_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.servers.keys().map(String::as_str)
    }

    /// Version sets whose names sort strictly after `name`, in canonical order.
    ///
    /// `name` need not exist in the store.
    pub fn sets_after<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a VersionSet> + 'a {
        self.servers
            .range::<str, _>((Bound::Excluded(name), Bound::Unbounded))
            .map(|(_, set)| set)
    }

    /// All version sets in canonical order.
    pub fn sets(&self) -> impl Iterator<Item = &VersionSet> + '_ {
        self.servers.values()
    }

    pub fn versions_of(&self, name: &str) -> Option<&VersionSet> {
        self.servers.get(name)
    }

    pub fn latest(&self, name: &str) -> Option<&Entry> {
        self.servers.get(name).map(VersionSet::latest)
    }

    pub fn get(&self, name: &str, version: &str) -> Option<&Entry> {
        self.servers.get(name).and_then(|set| set.get(version))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.servers.contains_key(name)
    }

    /// Number of distinct names (not versions).
    pub fn count(&self) -> usize {
        self.servers.len()
    }

    /// Number of entries across all names.
    pub fn version_count(&self) -> usize {
        self.servers.values().map(VersionSet::len).sum()
    }

    /// The ordering used to rank versions.
    pub fn ordering(&self) -> &dyn VersionOrdering {
        self.ordering.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::LexicalOrdering;

    fn entry(name: &str, version: &str) -> Entry {
        Entry::new(name, version, format!("{name} {version}"))
    }

    #[test]
    fn test_load_groups_versions_newest_first() {
        let store = EntryStore::from_entries(vec![
            entry("b.tool", "1.0.0"),
            entry("a.tool", "1.0.0"),
            entry("b.tool", "1.10.0"),
            entry("b.tool", "1.9.0"),
        ])
        .unwrap();

        assert!(store.is_loaded());
        assert_eq!(store.count(), 2);
        assert_eq!(store.version_count(), 4);
        assert_eq!(store.all_names().collect::<Vec<_>>(), vec!["a.tool", "b.tool"]);

        let versions: Vec<&str> = store
            .versions_of("b.tool")
            .unwrap()
            .iter()
            .map(|e| e.version.as_str())
            .collect();
        assert_eq!(versions, vec!["1.10.0", "1.9.0", "1.0.0"]);
        assert_eq!(store.latest("b.tool").unwrap().version, "1.10.0");
    }

    #[test]
    fn test_duplicate_pair_fails_and_leaves_store_empty() {
        let mut store = EntryStore::new();
        let err = store
            .load(vec![
                entry("a.tool", "1.0.0"),
                entry("b.tool", "1.0.0"),
                entry("a.tool", "1.0.0"),
            ])
            .unwrap_err();

        assert_eq!(
            err,
            LoadError::Duplicate(DuplicateEntryError {
                name: "a.tool".to_string(),
                version: "1.0.0".to_string(),
            })
        );
        assert!(!store.is_loaded());
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_second_load_is_rejected() {
        let mut store = EntryStore::new();
        store.load(vec![entry("a.tool", "1.0.0")]).unwrap();
        assert_eq!(
            store.load(vec![entry("b.tool", "1.0.0")]),
            Err(LoadError::AlreadyLoaded)
        );
        assert_eq!(store.count(), 1);
    }

    #[test]
    fn test_invalid_entry_reports_index() {
        let mut store = EntryStore::new();
        let err = store
            .load(vec![entry("a.tool", "1.0.0"), entry("", "1.0.0")])
            .unwrap_err();
        assert!(matches!(err, LoadError::InvalidEntry { index: 1, .. }));
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let store = EntryStore::from_entries(vec![
            entry("beta", "1.0.0"),
            entry("Alpha", "1.0.0"),
            entry("alpha", "1.0.0"),
        ])
        .unwrap();
        assert_eq!(
            store.all_names().collect::<Vec<_>>(),
            vec!["Alpha", "alpha", "beta"]
        );
    }

    #[test]
    fn test_sets_after_skips_missing_name() {
        let store = EntryStore::from_entries(vec![
            entry("a", "1.0.0"),
            entry("c", "1.0.0"),
            entry("e", "1.0.0"),
        ])
        .unwrap();

        let after: Vec<&str> = store.sets_after("b").map(|s| s.name()).collect();
        assert_eq!(after, vec!["c", "e"]);

        let after: Vec<&str> = store.sets_after("c").map(|s| s.name()).collect();
        assert_eq!(after, vec!["e"]);

        assert_eq!(store.sets_after("z").count(), 0);
    }

    #[test]
    fn test_get_exact_version() {
        let store =
            EntryStore::from_entries(vec![entry("a", "1.0.0"), entry("a", "v1.0.0")]).unwrap();
        assert_eq!(store.get("a", "v1.0.0").unwrap().version, "v1.0.0");
        assert!(store.get("a", "1.0").is_none());
        assert!(store.get("missing", "1.0.0").is_none());
    }

    #[test]
    fn test_custom_ordering_is_used() {
        let mut store = EntryStore::with_ordering(Arc::new(LexicalOrdering));
        store
            .load(vec![entry("a", "1.9.0"), entry("a", "1.10.0")])
            .unwrap();
        assert_eq!(store.latest("a").unwrap().version, "1.9.0");
    }

    #[test]
    fn test_empty_load_is_healthy_and_empty() {
        let store = EntryStore::from_entries(Vec::new()).unwrap();
        assert!(store.is_loaded());
        assert_eq!(store.count(), 0);
        assert_eq!(store.all_names().count(), 0);
    }
}
