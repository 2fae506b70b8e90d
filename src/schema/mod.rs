//! Record schema
//!
//! The fixed shape every stored item is checked against, and the one
//! validation operation, [`parse_record`].

mod errors;
mod record;
mod validator;

pub use errors::{SchemaError, SchemaResult, ValidationDetails};
pub use record::{now_timestamp, parse_timestamp, Record, Status};
pub use validator::parse_record;
