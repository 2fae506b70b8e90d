//! In-memory record store

use std::sync::RwLock;

use serde_json::Value;

use super::errors::{StoreError, StoreResult};
use super::filter::ScanFilter;
use super::{item_key, upsert, RecordStore, WriteAck};

/// Items held in process memory, in insertion order
pub struct MemoryStore {
    table: String,
    items: RwLock<Vec<Value>>,
}

impl MemoryStore {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            items: RwLock::new(Vec::new()),
        }
    }

    /// A store pre-loaded with items. Fails on the first item without a
    /// string `id`.
    pub fn with_items(
        table: impl Into<String>,
        items: impl IntoIterator<Item = Value>,
    ) -> StoreResult<Self> {
        let mut loaded = Vec::new();
        for item in items {
            upsert(&mut loaded, item)?;
        }
        Ok(Self {
            table: table.into(),
            items: RwLock::new(loaded),
        })
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn len(&self) -> usize {
        self.items.read().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("Lock poisoned".to_string())
}

impl RecordStore for MemoryStore {
    async fn get(&self, id: &str) -> StoreResult<Option<Value>> {
        let items = self.items.read().map_err(|_| poisoned())?;
        Ok(items.iter().find(|item| item_key(item) == Some(id)).cloned())
    }

    async fn scan(&self, filter: &ScanFilter) -> StoreResult<Vec<Value>> {
        let items = self.items.read().map_err(|_| poisoned())?;
        Ok(filter.apply(items.iter()))
    }

    async fn put(&self, item: Value) -> StoreResult<WriteAck> {
        let mut items = self.items.write().map_err(|_| poisoned())?;
        let replaced = upsert(&mut items, item)?;
        Ok(WriteAck {
            table: self.table.clone(),
            replaced,
        })
    }
}
