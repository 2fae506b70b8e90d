//! JSON file record store
//!
//! The whole table lives in memory and is mirrored to a single file
//! holding a JSON array. Every `put` rewrites the file through a
//! temporary sibling and a rename, so a crash mid-write leaves the
//! previous contents in place.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::fs;
use tokio::sync::RwLock;

use super::errors::{StoreError, StoreResult};
use super::filter::ScanFilter;
use super::{item_key, upsert, RecordStore, WriteAck};

pub struct JsonFileStore {
    path: PathBuf,
    table: String,
    items: RwLock<Vec<Value>>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty table; the
    /// file is created by the first `put`.
    pub async fn open(path: impl Into<PathBuf>, table: impl Into<String>) -> StoreResult<Self> {
        let path = path.into();
        let items = match fs::read_to_string(&path).await {
            Ok(content) if content.trim().is_empty() => Vec::new(),
            Ok(content) => parse_items(&path, &content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            table: table.into(),
            items: RwLock::new(items),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, items: &[Value]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let body = serde_json::to_vec_pretty(items)
            .map_err(|e| StoreError::Io(format!("serialize items: {}", e)))?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, body).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

fn parse_items(path: &Path, content: &str) -> StoreResult<Vec<Value>> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| StoreError::Corrupt(format!("{}: {}", path.display(), e)))?;

    match value {
        Value::Array(items) => Ok(items),
        _ => Err(StoreError::Corrupt(format!(
            "{}: expected a JSON array of items",
            path.display()
        ))),
    }
}

impl RecordStore for JsonFileStore {
    async fn get(&self, id: &str) -> StoreResult<Option<Value>> {
        let items = self.items.read().await;
        Ok(items.iter().find(|item| item_key(item) == Some(id)).cloned())
    }

    async fn scan(&self, filter: &ScanFilter) -> StoreResult<Vec<Value>> {
        let items = self.items.read().await;
        Ok(filter.apply(items.iter()))
    }

    async fn put(&self, item: Value) -> StoreResult<WriteAck> {
        let mut items = self.items.write().await;

        // Only publish the new item once it is on disk.
        let mut next = items.clone();
        let replaced = upsert(&mut next, item)?;
        self.persist(&next).await?;
        *items = next;

        Ok(WriteAck {
            table: self.table.clone(),
            replaced,
        })
    }
}
