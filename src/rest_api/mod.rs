//! # Records REST API
//!
//! - `GET /records` - paginated, status-filtered, `created_at`-sorted listing
//! - `GET /records/:id` - one stored item
//! - `POST /records` - validate, stamp and persist a new record

pub mod errors;
pub mod handler;
pub mod listing;
pub mod parser;
pub mod response;
pub mod server;

pub use errors::{ErrorResponse, ListingError, RestError, RestResult, VALIDATION_MESSAGE};
pub use handler::RecordService;
pub use parser::{ListQuery, SortDirection, DEFAULT_LIMIT, MAX_LIMIT};
pub use response::{CreateResponse, ListResponse, Pagination};
pub use server::record_routes;
