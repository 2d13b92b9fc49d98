//! All versions owned by one server name.

use crate::entry::Entry;
use crate::version::VersionOrdering;

/// Non-empty, newest-first collection of one server's versions.
///
/// Only the store builds these, and only from at least one entry, so
/// `latest()` never has to handle the empty case.
#[derive(Debug, Clone)]
pub struct VersionSet {
    entries: Vec<Entry>,
}

impl VersionSet {
    pub(crate) fn new(first: Entry) -> Self {
        Self {
            entries: vec![first],
        }
    }

    pub(crate) fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub(crate) fn sort(&mut self, ordering: &dyn VersionOrdering) {
        self.entries
            .sort_by(|a, b| ordering.compare(&b.version, &a.version));
    }

    /// Server name shared by every entry in the set.
    pub fn name(&self) -> &str {
        &self.entries[0].name
    }

    /// Highest version under the store's ordering.
    pub fn latest(&self) -> &Entry {
        &self.entries[0]
    }

    /// Exact version lookup; no normalization is applied.
    pub fn get(&self, version: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.version == version)
    }

    pub fn contains(&self, version: &str) -> bool {
        self.get(version).is_some()
    }

    /// Entries newest-first.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true for a set built by the store.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a VersionSet {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
