//! Registry entry schema
//!
//! An entry is one named, versioned server descriptor. Only `name`,
//! `version` and `description` are read by the registry; every other field
//! is carried through untouched in `metadata`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One named, versioned registry record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Server name, possibly namespaced (`io.github.org/server`)
    pub name: String,

    /// Version string; semver when well-formed
    pub version: String,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Additional structured fields (categories, env, links, ...)
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

impl Entry {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            description: description.into(),
            metadata: Map::new(),
        }
    }

    /// Attach a metadata field, keeping insertion order.
    pub fn with_metadata(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Check the fields the registry itself depends on.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        if self.version.trim().is_empty() {
            return Err(format!("server '{}' has an empty version", self.name));
        }
        Ok(())
    }

    /// `name@version`, for logs and CLI output
    pub fn display_id(&self) -> String {
        format!("{}@{}", self.name, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_fields_land_in_metadata_in_order() {
        let json = r#"{
            "name": "io.github.example/stripe",
            "version": "1.0.0",
            "description": "Stripe payments",
            "categories": ["payments"],
            "repository": {"url": "https://example.com"},
            "env": ["STRIPE_API_KEY"]
        }"#;

        let entry: Entry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.name, "io.github.example/stripe");
        let keys: Vec<&str> = entry.metadata.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["categories", "repository", "env"]);
    }

    #[test]
    fn test_serializes_flat() {
        let entry = Entry::new("a.tool", "1.0.0", "A tool")
            .with_metadata("tags", json!(["x"]));
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            json!({"name": "a.tool", "version": "1.0.0", "description": "A tool", "tags": ["x"]})
        );
    }

    #[test]
    fn test_missing_description_defaults_to_empty() {
        let entry: Entry = serde_json::from_str(r#"{"name":"a","version":"1"}"#).unwrap();
        assert_eq!(entry.description, "");
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        assert!(Entry::new("", "1.0.0", "").validate().is_err());
        assert!(Entry::new("a", " ", "").validate().is_err());
        assert!(Entry::new("a", "1.0.0", "").validate().is_ok());
    }
}
