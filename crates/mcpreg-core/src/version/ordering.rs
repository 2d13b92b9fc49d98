//! Pluggable version ordering
//!
//! The store sorts each server's versions with a [`VersionOrdering`]. The
//! default [`SemverOrdering`] understands semantic versions and degrades to
//! string comparison for anything it cannot parse, so a malformed version
//! string never fails a load.

use std::cmp::Ordering;
use std::fmt::Debug;

/// Total order over version strings. `Greater` means newer.
pub trait VersionOrdering: Debug + Send + Sync {
    fn compare(&self, a: &str, b: &str) -> Ordering;
}

/// Semantic-version aware ordering with lexicographic fallback.
///
/// - Well-formed versions (optionally prefixed with `v`) compare by semver
///   precedence, so `2.0.0-beta` sorts below `2.0.0`.
/// - Any well-formed version is newer than any malformed one.
/// - Malformed versions compare as plain strings.
/// - Equal precedence (`1.0.0` vs `v1.0.0`) falls back to the raw string.
#[derive(Debug, Clone, Copy, Default)]
pub struct SemverOrdering;

impl VersionOrdering for SemverOrdering {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        match (parse_lenient(a), parse_lenient(b)) {
            (Some(va), Some(vb)) => va.cmp(&vb).then_with(|| a.cmp(b)),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => a.cmp(b),
        }
    }
}

/// Plain byte-wise string ordering.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalOrdering;

impl VersionOrdering for LexicalOrdering {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        a.cmp(b)
    }
}

/// Parse a version, accepting an optional leading `v`.
pub fn parse_lenient(version: &str) -> Option<semver::Version> {
    let trimmed = version.trim();
    let bare = trimmed.strip_prefix('v').unwrap_or(trimmed);
    semver::Version::parse(bare).ok()
}
