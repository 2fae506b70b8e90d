//! Store configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Which backend holds the records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// Process memory; contents are lost on exit
    #[default]
    Memory,
    /// A JSON file rewritten on every put
    File,
}

/// Store section of the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub kind: StoreKind,

    /// Table name reported in write acknowledgments (default: "dummies")
    #[serde(default = "default_table")]
    pub table: String,

    /// Backing file, required when `kind` is `file`
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_table() -> String {
    "dummies".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            kind: StoreKind::default(),
            table: default_table(),
            path: None,
        }
    }
}

impl StoreConfig {
    /// A file store at `path`
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            kind: StoreKind::File,
            path: Some(path.into()),
            ..Default::default()
        }
    }

    /// Check the section is usable, returning a human-readable reason if not
    pub fn validate(&self) -> Result<(), String> {
        if self.table.trim().is_empty() {
            return Err("store.table must not be empty".to_string());
        }
        if self.kind == StoreKind::File && self.path.is_none() {
            return Err("store.path is required when store.kind is 'file'".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: StoreConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.kind, StoreKind::Memory);
        assert_eq!(config.table, "dummies");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_requires_path() {
        let config: StoreConfig = serde_json::from_str(r#"{"kind": "file"}"#).unwrap();
        assert!(config.validate().unwrap_err().contains("store.path"));

        assert!(StoreConfig::file("/tmp/records.json").validate().is_ok());
    }

    #[test]
    fn test_empty_table_rejected() {
        let config = StoreConfig {
            table: " ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
