//! dummydb - a small CRUD service for "dummy" records
//!
//! Records live in a single document table. The JSON API lists them
//! filtered by status with in-memory sort and pagination, fetches one by
//! id and creates new ones after schema validation. Read-only HTML pages
//! render the same records.

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod pages;
pub mod rest_api;
pub mod schema;
pub mod store;
