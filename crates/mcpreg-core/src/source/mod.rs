//! Static seed data loading
//!
//! Entries come from JSON on disk, in one of two layouts:
//! - a single file holding an entry array, `{ "servers": [...] }`, or one entry
//! - a directory where each subdirectory carries a `server.json`
//!   (`servers/<integration>/server.json`), plus any top-level `*.json` files
//!
//! Directory contents are visited in sorted order so that load errors are
//! reported deterministically.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;

use crate::entry::Entry;

/// File name looked up inside each integration directory.
pub const SERVER_FILE: &str = "server.json";

/// Load entries from a seed file or directory.
pub fn load_path(path: &Path) -> Result<Vec<Entry>> {
    let metadata = fs::metadata(path)
        .with_context(|| format!("Failed to access seed data: {}", path.display()))?;

    if metadata.is_dir() {
        load_dir(path)
    } else {
        load_file(path)
    }
}

/// Load every entry in one JSON file.
pub fn load_file(path: &Path) -> Result<Vec<Entry>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read seed file: {}", path.display()))?;
    let entries = parse_entries_str(&content)
        .with_context(|| format!("Failed to parse seed file: {}", path.display()))?;
    tracing::debug!(path = %path.display(), entries = entries.len(), "Read seed file");
    Ok(entries)
}

/// Load a per-integration directory tree.
pub fn load_dir(dir: &Path) -> Result<Vec<Entry>> {
    let mut children: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("Failed to read seed directory: {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<_>>()
        .with_context(|| format!("Failed to list seed directory: {}", dir.display()))?;
    children.sort();

    let mut entries = Vec::new();
    for child in children {
        if child.is_dir() {
            let server_file = child.join(SERVER_FILE);
            if server_file.is_file() {
                entries.extend(load_file(&server_file)?);
            } else {
                tracing::debug!(dir = %child.display(), "Skipping directory without {}", SERVER_FILE);
            }
        } else if child.extension().is_some_and(|ext| ext == "json") {
            entries.extend(load_file(&child)?);
        }
    }
    Ok(entries)
}

/// Parse seed JSON: an entry array, a `servers` wrapper, or a single entry.
pub fn parse_entries_str(content: &str) -> Result<Vec<Entry>> {
    let value: Value = serde_json::from_str(content).context("Invalid JSON")?;
    parse_entries_value(value)
}

fn parse_entries_value(value: Value) -> Result<Vec<Entry>> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                serde_json::from_value(item).with_context(|| format!("Invalid entry at index {i}"))
            })
            .collect(),
        Value::Object(mut map) if map.get("servers").is_some_and(Value::is_array) => {
            let servers = map.remove("servers").unwrap_or(Value::Null);
            parse_entries_value(servers)
        }
        Value::Object(map) => {
            let entry: Entry = serde_json::from_value(Value::Object(map))
                .context("Object is neither an entry nor a { \"servers\": [...] } document")?;
            Ok(vec![entry])
        }
        other => anyhow::bail!(
            "Expected an array or object of server entries, found {}",
            json_kind(&other)
        ),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
