//! # Record store adapter
//!
//! The persistence seam. Pipelines talk to a [`RecordStore`] and never
//! to a concrete backend, so tests can hand them a fake.
//!
//! Items cross this boundary as raw JSON: the store does not validate
//! anything except that a written item carries a string `id`, which is
//! its primary key.

mod config;
mod errors;
mod file;
mod filter;
mod memory;

use std::future::Future;

use serde::Serialize;
use serde_json::Value;

pub use config::{StoreConfig, StoreKind};
pub use errors::{StoreError, StoreResult};
pub use file::JsonFileStore;
pub use filter::{FilterExpr, ScanFilter};
pub use memory::MemoryStore;

/// Acknowledgment returned by a successful `put`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteAck {
    /// Table the item was written to
    pub table: String,
    /// True if an item with the same key was overwritten
    pub replaced: bool,
}

/// Operations the pipelines need from a document store.
///
/// Implementations are shared across concurrent requests behind an `Arc`.
pub trait RecordStore: Send + Sync + 'static {
    /// Fetch one item by primary key
    fn get(&self, id: &str) -> impl Future<Output = StoreResult<Option<Value>>> + Send;

    /// Return every item matching `filter`, in store order
    fn scan(&self, filter: &ScanFilter) -> impl Future<Output = StoreResult<Vec<Value>>> + Send;

    /// Write an item unconditionally, replacing any item with the same key
    fn put(&self, item: Value) -> impl Future<Output = StoreResult<WriteAck>> + Send;
}

/// Primary key of a raw item
pub(crate) fn item_key(item: &Value) -> Option<&str> {
    item.get("id").and_then(Value::as_str)
}

/// Insert or replace `item` by key, keeping the position of a replaced item.
/// Returns whether an existing item was replaced.
pub(crate) fn upsert(items: &mut Vec<Value>, item: Value) -> StoreResult<bool> {
    let key = item_key(&item)
        .ok_or_else(|| StoreError::InvalidItem("missing string 'id'".to_string()))?
        .to_string();

    match items.iter().position(|existing| item_key(existing) == Some(key.as_str())) {
        Some(idx) => {
            items[idx] = item;
            Ok(true)
        }
        None => {
            items.push(item);
            Ok(false)
        }
    }
}

/// The store selected by configuration
pub enum AnyStore {
    Memory(MemoryStore),
    File(JsonFileStore),
}

impl AnyStore {
    /// Open the backend described by `config`
    pub async fn open(config: &StoreConfig) -> StoreResult<Self> {
        match config.kind {
            StoreKind::Memory => Ok(AnyStore::Memory(MemoryStore::new(&config.table))),
            StoreKind::File => {
                let path = config.path.clone().ok_or_else(|| {
                    StoreError::Unavailable("file store configured without a path".to_string())
                })?;
                Ok(AnyStore::File(JsonFileStore::open(path, &config.table).await?))
            }
        }
    }

    pub fn kind(&self) -> StoreKind {
        match self {
            AnyStore::Memory(_) => StoreKind::Memory,
            AnyStore::File(_) => StoreKind::File,
        }
    }
}

impl RecordStore for AnyStore {
    async fn get(&self, id: &str) -> StoreResult<Option<Value>> {
        match self {
            AnyStore::Memory(store) => store.get(id).await,
            AnyStore::File(store) => store.get(id).await,
        }
    }

    async fn scan(&self, filter: &ScanFilter) -> StoreResult<Vec<Value>> {
        match self {
            AnyStore::Memory(store) => store.scan(filter).await,
            AnyStore::File(store) => store.scan(filter).await,
        }
    }

    async fn put(&self, item: Value) -> StoreResult<WriteAck> {
        match self {
            AnyStore::Memory(store) => store.put(item).await,
            AnyStore::File(store) => store.put(item).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_upsert_appends_then_replaces_in_place() {
        let mut items = Vec::new();
        assert!(!upsert(&mut items, json!({"id": "a", "v": 1})).unwrap());
        assert!(!upsert(&mut items, json!({"id": "b", "v": 1})).unwrap());
        assert!(upsert(&mut items, json!({"id": "a", "v": 2})).unwrap());

        assert_eq!(items.len(), 2);
        assert_eq!(items[0], json!({"id": "a", "v": 2}));
    }

    #[test]
    fn test_upsert_requires_key() {
        let mut items = Vec::new();
        let err = upsert(&mut items, json!({"name": "no id"})).unwrap_err();
        assert!(matches!(err, StoreError::InvalidItem(_)));

        let err = upsert(&mut items, json!({"id": 7})).unwrap_err();
        assert!(matches!(err, StoreError::InvalidItem(_)));
        assert!(items.is_empty());
    }

    #[test]
    fn test_write_ack_wire_form() {
        let ack = WriteAck {
            table: "dummies".to_string(),
            replaced: false,
        };
        assert_eq!(
            serde_json::to_value(ack).unwrap(),
            json!({"table": "dummies", "replaced": false})
        );
    }

    #[tokio::test]
    async fn test_open_memory_store() {
        let store = AnyStore::open(&StoreConfig::default()).await.unwrap();
        assert_eq!(store.kind(), StoreKind::Memory);

        store.put(json!({"id": "a", "status": "active"})).await.unwrap();
        assert!(store.get("a").await.unwrap().is_some());
        assert_eq!(store.scan(&ScanFilter::eq("status", "active")).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_open_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::file(dir.path().join("records.json"));

        let store = AnyStore::open(&config).await.unwrap();
        assert_eq!(store.kind(), StoreKind::File);
        store.put(json!({"id": "a"})).await.unwrap();
        assert!(dir.path().join("records.json").exists());
    }
}
