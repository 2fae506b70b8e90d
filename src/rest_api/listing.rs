//! # Listing pipeline
//!
//! Everything after the store scan: validate, sort, count, slice.
//!
//! The store has no offset pagination, so a listing pulls every item
//! matching the status filter and pages over it in memory. Cost is linear
//! in the number of matching items on every request.

use serde_json::Value;

use crate::observability::{log_event_with_fields, Event};
use crate::schema::{parse_record, Record};

use super::parser::{ListQuery, SortDirection};
use super::response::{ListResponse, Pagination};

/// Validate scanned items, silently dropping those that fail the Record shape
pub fn validate_items(items: Vec<Value>) -> Vec<Record> {
    items
        .into_iter()
        .filter_map(|item| match parse_record(&item) {
            Ok(record) => Some(record),
            Err(e) => {
                log_event_with_fields(
                    Event::RecordDropped,
                    &[("id", dropped_id(&item)), ("reason", e.to_string().as_str())],
                );
                None
            }
        })
        .collect()
}

/// Raw `id` of a dropped item for the log line, empty when it is not a string
fn dropped_id(item: &Value) -> &str {
    item.get("id").and_then(Value::as_str).unwrap_or_default()
}

/// Stable sort by `created_at`. Equal timestamps keep their store order in
/// both directions; missing or unparsable timestamps count as epoch zero.
pub fn sort_records(records: Vec<Record>, direction: SortDirection) -> Vec<Record> {
    let mut keyed: Vec<(i64, Record)> = records
        .into_iter()
        .map(|record| (record.created_at_millis(), record))
        .collect();

    match direction {
        SortDirection::Asc => keyed.sort_by(|a, b| a.0.cmp(&b.0)),
        SortDirection::Desc => keyed.sort_by(|a, b| b.0.cmp(&a.0)),
    }

    keyed.into_iter().map(|(_, record)| record).collect()
}

/// Slice `[(page-1)*limit, page*limit)` out of the sorted set.
///
/// `page` and `limit` are expected to be at least 1; a zero `limit` yields
/// an empty page with zero pages.
pub fn paginate(records: Vec<Record>, page: usize, limit: usize) -> ListResponse {
    let total_documents = records.len();
    let total_pages = if limit == 0 {
        0
    } else {
        total_documents.div_ceil(limit)
    };

    let start = page.saturating_sub(1).saturating_mul(limit);
    let page_records: Vec<Record> = records.into_iter().skip(start).take(limit).collect();

    let last_evaluated_key = if page_records.len() > 1 {
        page_records.last().and_then(Record::id_string)
    } else {
        None
    };

    ListResponse {
        records: page_records,
        pagination: Pagination {
            page,
            limit,
            total_pages,
            total_documents,
            last_evaluated_key,
        },
    }
}

/// Run the whole in-memory part of the pipeline over a scan result
pub fn build_page(items: Vec<Value>, query: &ListQuery) -> ListResponse {
    let records = validate_items(items);
    let sorted = sort_records(records, query.sort);
    paginate(sorted, query.page, query.limit)
}
