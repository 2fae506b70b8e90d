//! # Response Formatting
//!
//! Response bodies for the records endpoints.

use serde::Serialize;

use crate::schema::Record;
use crate::store::WriteAck;

/// Pagination metadata of a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total_pages: usize,
    pub total_documents: usize,
    /// Id of the last record of the page when the page holds more than one
    pub last_evaluated_key: Option<String>,
}

/// `GET /records` body
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse {
    pub records: Vec<Record>,
    pub pagination: Pagination,
}

/// `POST /records` body
#[derive(Debug, Clone, Serialize)]
pub struct CreateResponse {
    pub message: String,
    pub record: Record,
    /// The store's write acknowledgment
    pub result: WriteAck,
    pub id: String,
}

impl CreateResponse {
    pub fn new(record: Record, id: String, result: WriteAck) -> Self {
        Self {
            message: "Record created".to_string(),
            record,
            result,
            id,
        }
    }
}
