//! The shipped seed catalog and on-disk loading.

use std::fs;
use std::path::PathBuf;

use mcpreg_core::config::parse_config_str;
use mcpreg_core::prelude::*;
use mcpreg_core::source;
use tempfile::TempDir;

fn shipped_catalog() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/servers.json")
}

#[test]
fn shipped_catalog_loads_cleanly() {
    let entries = source::load_path(&shipped_catalog()).unwrap();
    let store = EntryStore::from_entries(entries).unwrap();

    assert_eq!(store.count(), 24);
    assert!(store.contains("io.github.mcp-servers/stripe"));

    let stripe = store.latest("io.github.mcp-servers/stripe").unwrap();
    assert_eq!(stripe.metadata["env"], serde_json::json!(["STRIPE_API_KEY"]));
}

#[test]
fn registry_load_uses_configured_path_and_limits() {
    let toml = format!(
        "[listing]\ndefault_limit = 5\nmax_limit = 10\n\n[data]\npath = {:?}\n",
        shipped_catalog().display().to_string()
    );
    let config = parse_config_str(&toml).unwrap();
    let registry = Registry::load(&config).unwrap();

    let page = registry.listing().list(None, None).unwrap();
    assert_eq!(page.servers.len(), 5);
    assert_eq!(page.servers[0].name, "io.github.mcp-servers/abstract-api");

    let page = registry.listing().list(Some(1_000), None).unwrap();
    assert_eq!(page.servers.len(), 10);
}

#[test]
fn duplicate_versions_across_files_abort_the_load() {
    let dir = TempDir::new().unwrap();
    for sub in ["one", "two"] {
        fs::create_dir(dir.path().join(sub)).unwrap();
        fs::write(
            dir.path().join(sub).join(source::SERVER_FILE),
            r#"{"name":"dup.tool","version":"1.0.0","description":"x"}"#,
        )
        .unwrap();
    }

    let entries = source::load_path(dir.path()).unwrap();
    let err = EntryStore::from_entries(entries).unwrap_err();
    assert_eq!(
        err,
        LoadError::Duplicate(DuplicateEntryError {
            name: "dup.tool".to_string(),
            version: "1.0.0".to_string(),
        })
    );
}

#[test]
fn per_integration_directory_with_multiple_versions() {
    let dir = TempDir::new().unwrap();
    let sub = dir.path().join("weather");
    fs::create_dir(&sub).unwrap();
    fs::write(
        sub.join(source::SERVER_FILE),
        r#"[
            {"name":"io.github.example/weather","version":"0.9.0","description":"old"},
            {"name":"io.github.example/weather","version":"1.0.0","description":"new","tags":["weather"]}
        ]"#,
    )
    .unwrap();

    let config = parse_config_str(&format!(
        "[data]\npath = {:?}\n",
        dir.path().display().to_string()
    ))
    .unwrap();
    let registry = Registry::load(&config).unwrap();

    let latest = registry
        .resolver()
        .resolve("io.github.example/weather", None)
        .unwrap();
    assert_eq!(latest.description, "new");
    assert_eq!(latest.metadata["tags"], serde_json::json!(["weather"]));
    assert_eq!(registry.health().health().servers_loaded, 1);
}
