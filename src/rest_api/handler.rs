//! # Record service
//!
//! The three pipelines (list, read-by-id, create) over an injected store.

use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use crate::observability::{log_event_with_fields, Event};
use crate::schema::{now_timestamp, parse_record, Record, Status};
use crate::store::{RecordStore, ScanFilter, StoreError};

use super::errors::{RestError, RestResult};
use super::listing::{build_page, validate_items};
use super::parser::ListQuery;
use super::response::{CreateResponse, ListResponse};

/// Pipelines over a shared store handle
pub struct RecordService<S: RecordStore> {
    store: Arc<S>,
}

impl<S: RecordStore> Clone for RecordService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

/// Log a store failure with its cause and turn it into the generic error
fn store_failure(operation: &'static str) -> impl FnOnce(StoreError) -> RestError {
    move |err| {
        log_event_with_fields(
            Event::StoreFailure,
            &[("operation", operation), ("cause", err.to_string().as_str())],
        );
        RestError::Store(err)
    }
}

impl<S: RecordStore> RecordService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Listing pipeline: scan by status, validate, sort, paginate
    pub async fn list(&self, query: &ListQuery) -> RestResult<ListResponse> {
        let filter = ScanFilter::eq("status", query.status.as_str());
        let items = self
            .store
            .scan(&filter)
            .await
            .map_err(store_failure("scan"))?;

        let scanned = items.len();
        let response = build_page(items, query);

        log_event_with_fields(
            Event::RecordsListed,
            &[
                ("status", query.status.as_str()),
                ("page", query.page.to_string().as_str()),
                ("limit", query.limit.to_string().as_str()),
                ("scanned", scanned.to_string().as_str()),
                ("returned", response.records.len().to_string().as_str()),
            ],
        );

        Ok(response)
    }

    /// Read-by-id pipeline. The stored item is returned as-is; a shape
    /// violation is logged but does not fail the request.
    pub async fn get(&self, id: &str) -> RestResult<Value> {
        if id.trim().is_empty() {
            return Err(RestError::InvalidId);
        }

        let item = self
            .store
            .get(id)
            .await
            .map_err(store_failure("get"))?
            .ok_or_else(|| {
                log_event_with_fields(Event::RecordNotFound, &[("id", id)]);
                RestError::NotFound
            })?;

        match parse_record(&item) {
            Ok(_) => log_event_with_fields(Event::RecordFetched, &[("id", id)]),
            Err(e) => log_event_with_fields(
                Event::StoredRecordInvalid,
                &[("id", id), ("reason", e.to_string().as_str())],
            ),
        }

        Ok(item)
    }

    /// Fetch a record for display; an item failing validation counts as absent
    pub async fn find_valid(&self, id: &str) -> RestResult<Option<Record>> {
        if id.trim().is_empty() {
            return Ok(None);
        }

        let item = self.store.get(id).await.map_err(store_failure("get"))?;
        Ok(item.and_then(|item| parse_record(&item).ok()))
    }

    /// Up to `count` valid active records, in store order
    pub async fn first_active(&self, count: usize) -> RestResult<Vec<Record>> {
        let filter = ScanFilter::eq("status", Status::Active.as_str()).with_limit(count);
        let items = self
            .store
            .scan(&filter)
            .await
            .map_err(store_failure("scan"))?;
        Ok(validate_items(items))
    }

    /// Write pipeline: stamp id and timestamp, validate, persist
    pub async fn create(&self, body: Value) -> RestResult<CreateResponse> {
        let id = Uuid::new_v4().to_string();

        let candidate = match body {
            Value::Object(mut fields) => {
                fields.insert("id".to_string(), Value::String(id.clone()));
                fields.insert("created_at".to_string(), Value::String(now_timestamp()));
                Value::Object(fields)
            }
            other => other,
        };

        let record = parse_record(&candidate).map_err(|e| {
            log_event_with_fields(
                Event::ValidationRejected,
                &[("reason", e.to_string().as_str())],
            );
            RestError::from(e)
        })?;

        let ack = self
            .store
            .put(record.to_value())
            .await
            .map_err(store_failure("put"))?;

        log_event_with_fields(Event::RecordCreated, &[("id", id.as_str())]);

        Ok(CreateResponse::new(record, id, ack))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest_api::parser::SortDirection;
    use crate::store::{MemoryStore, StoreResult, WriteAck};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts calls and fails every one of them
    #[derive(Default)]
    struct BrokenStore {
        calls: AtomicUsize,
    }

    impl RecordStore for BrokenStore {
        async fn get(&self, _id: &str) -> StoreResult<Option<Value>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        async fn scan(&self, _filter: &ScanFilter) -> StoreResult<Vec<Value>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        async fn put(&self, _item: Value) -> StoreResult<WriteAck> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
    }

    fn memory_service(items: Vec<Value>) -> RecordService<MemoryStore> {
        RecordService::new(Arc::new(MemoryStore::with_items("dummies", items).unwrap()))
    }

    fn seeded() -> Vec<Value> {
        vec![
            json!({
                "id": "00000000-0000-0000-0000-000000000001",
                "name": "Dummy 1",
                "description": "Description 1",
                "status": "active",
                "created_at": "2024-01-01T10:00:00Z"
            }),
            json!({
                "id": "00000000-0000-0000-0000-000000000002",
                "name": "Dummy 2",
                "description": "Description 2",
                "status": "active",
                "created_at": "2024-01-02T10:00:00Z"
            }),
            json!({
                "id": "00000000-0000-0000-0000-000000000003",
                "name": "Dummy 3",
                "description": "Description 3",
                "status": "inactive",
                "created_at": "2024-01-03T10:00:00Z"
            }),
        ]
    }

    #[tokio::test]
    async fn test_list_active_ascending() {
        let service = memory_service(seeded());
        let query = ListQuery {
            limit: 2,
            ..Default::default()
        };

        let response = service.list(&query).await.unwrap();
        let names: Vec<_> = response.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Dummy 1", "Dummy 2"]);
        assert_eq!(response.pagination.total_documents, 2);
        assert_eq!(response.pagination.total_pages, 1);
    }

    #[tokio::test]
    async fn test_list_inactive_descending() {
        let service = memory_service(seeded());
        let query = ListQuery {
            status: "inactive".to_string(),
            limit: 2,
            sort: SortDirection::Desc,
            ..Default::default()
        };

        let response = service.list(&query).await.unwrap();
        assert_eq!(response.records.len(), 1);
        assert_eq!(response.records[0].name, "Dummy 3");
        assert_eq!(response.pagination.total_documents, 1);
        assert_eq!(response.pagination.last_evaluated_key, None);
    }

    #[tokio::test]
    async fn test_list_store_failure() {
        let service = RecordService::new(Arc::new(BrokenStore::default()));
        let result = service.list(&ListQuery::default()).await;
        assert!(matches!(result, Err(RestError::Store(_))));
    }

    #[tokio::test]
    async fn test_get_returns_item_as_is() {
        let raw = json!({"id": "valid-uuid", "name": "Test Dummy", "extra": true});
        let service = memory_service(vec![raw.clone()]);

        let item = service.get("valid-uuid").await.unwrap();
        assert_eq!(item, raw);
    }

    #[tokio::test]
    async fn test_get_missing_and_blank() {
        let service = memory_service(seeded());
        assert!(matches!(service.get("nope").await, Err(RestError::NotFound)));
        assert!(matches!(service.get("  ").await, Err(RestError::InvalidId)));
    }

    #[tokio::test]
    async fn test_blank_id_never_reaches_store() {
        let store = Arc::new(BrokenStore::default());
        let service = RecordService::new(Arc::clone(&store));

        assert!(matches!(service.get("").await, Err(RestError::InvalidId)));
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let service = memory_service(Vec::new());

        let created = service
            .create(json!({"name": "Test Dummy", "description": "desc", "status": "inactive"}))
            .await
            .unwrap();

        assert_eq!(created.message, "Record created");
        assert_eq!(created.record.id_string().as_deref(), Some(created.id.as_str()));
        assert!(created.record.created_at.is_some());
        assert!(!created.result.replaced);

        let stored = service.get(&created.id).await.unwrap();
        assert_eq!(stored["name"], "Test Dummy");
        assert_eq!(stored["description"], "desc");
        assert_eq!(stored["status"], "inactive");
    }

    #[tokio::test]
    async fn test_create_ignores_client_id_and_extra_fields() {
        let service = memory_service(Vec::new());

        let created = service
            .create(json!({"id": "mine", "name": "x", "color": "blue"}))
            .await
            .unwrap();

        assert_ne!(created.id, "mine");
        let stored = service.get(&created.id).await.unwrap();
        assert!(stored.get("color").is_none());
        assert_eq!(stored["status"], "active");
    }

    #[tokio::test]
    async fn test_invalid_create_never_reaches_store() {
        let store = Arc::new(BrokenStore::default());
        let service = RecordService::new(Arc::clone(&store));

        let result = service.create(json!({"name": "", "status": "active"})).await;
        assert!(matches!(result, Err(RestError::Validation(_))));

        let result = service.create(json!("just a string")).await;
        assert!(matches!(result, Err(RestError::Validation(_))));

        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_create_store_failure() {
        let service = RecordService::new(Arc::new(BrokenStore::default()));
        let result = service.create(json!({"name": "ok"})).await;
        assert!(matches!(result, Err(RestError::Store(_))));
    }

    #[tokio::test]
    async fn test_find_valid_and_first_active() {
        let mut items = seeded();
        items.push(json!({"id": "broken", "name": "", "status": "active"}));
        let service = memory_service(items);

        let found = service
            .find_valid("00000000-0000-0000-0000-000000000002")
            .await
            .unwrap();
        assert_eq!(found.unwrap().name, "Dummy 2");
        assert!(service.find_valid("broken").await.unwrap().is_none());
        assert!(service.find_valid("").await.unwrap().is_none());

        let active = service.first_active(10).await.unwrap();
        assert_eq!(active.len(), 2);
        assert_eq!(service.first_active(1).await.unwrap().len(), 1);
    }
}
