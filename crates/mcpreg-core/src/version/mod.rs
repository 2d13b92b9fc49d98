//! Version comparison strategies.

pub mod ordering;

pub use ordering::{LexicalOrdering, SemverOrdering, VersionOrdering, parse_lenient};
