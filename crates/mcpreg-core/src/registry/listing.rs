//! Cursor-paginated listing of the latest version of every server.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cursor::CursorCodec;
use crate::entry::Entry;
use crate::error::CursorError;
use crate::store::{EntryStore, VersionSet};

pub const DEFAULT_PAGE_LIMIT: usize = 20;
pub const MAX_PAGE_LIMIT: usize = 100;

/// Page size bounds applied to every listing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLimits {
    pub default_limit: usize,
    pub max_limit: usize,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_PAGE_LIMIT,
            max_limit: MAX_PAGE_LIMIT,
        }
    }
}

impl PageLimits {
    /// Effective page size for a requested limit.
    ///
    /// Absent uses the default; anything outside `1..=max_limit` is clamped
    /// into range rather than rejected.
    pub fn clamp(&self, requested: Option<i64>) -> usize {
        let max = self.max_limit.max(1);
        match requested {
            None => self.default_limit.clamp(1, max),
            Some(n) if n < 1 => 1,
            Some(n) => usize::try_from(n).map_or(max, |n| n.min(max)),
        }
    }
}

/// Pagination metadata returned with a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub count: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

/// One page of the listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub servers: Vec<Entry>,
    pub metadata: PageMetadata,
}

impl Page {
    /// True when no further page follows.
    pub fn is_last(&self) -> bool {
        self.metadata.next_cursor.is_none()
    }
}

/// Produces pages over the store's canonical name order.
#[derive(Debug, Clone)]
pub struct ListingService {
    store: Arc<EntryStore>,
    limits: PageLimits,
}

impl ListingService {
    pub fn new(store: Arc<EntryStore>, limits: PageLimits) -> Self {
        Self { store, limits }
    }

    pub fn limits(&self) -> PageLimits {
        self.limits
    }

    /// List up to `limit` servers after the cursor position.
    ///
    /// Each server appears once, as its latest version. A cursor naming a
    /// server that no longer exists resumes at the next name after it.
    pub fn list(&self, limit: Option<i64>, cursor: Option<&str>) -> Result<Page, CursorError> {
        let limit = self.limits.clamp(limit);
        let resume = cursor.map(CursorCodec::decode).transpose()?;

        let remaining: Box<dyn Iterator<Item = &VersionSet> + '_> = match resume.as_deref() {
            Some(last_name) => Box::new(self.store.sets_after(last_name)),
            None => Box::new(self.store.sets()),
        };

        let mut sets: Vec<&VersionSet> = remaining.take(limit + 1).collect();
        let has_more = sets.len() > limit;
        sets.truncate(limit);

        let next_cursor = if has_more {
            sets.last().map(|set| CursorCodec::encode(set.name()))
        } else {
            None
        };

        let servers: Vec<Entry> = sets.into_iter().map(|set| set.latest().clone()).collect();

        tracing::debug!(
            limit,
            returned = servers.len(),
            has_more,
            "Listed servers"
        );

        Ok(Page {
            metadata: PageMetadata {
                count: servers.len(),
                next_cursor,
            },
            servers,
        })
    }
}
