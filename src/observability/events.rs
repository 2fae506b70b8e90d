//! Observable events
//!
//! Every log line the service writes is named by one of these.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    BootStart,
    ConfigLoaded,
    StoreOpened,
    Serving,
    ShutdownStart,
    ShutdownComplete,
    BootFailed,

    // Listing
    RecordsListed,
    /// A scanned item failed validation and was left out of the page
    RecordDropped,

    // Read-by-id
    RecordFetched,
    RecordNotFound,
    /// A stored item failed validation but was returned anyway
    StoredRecordInvalid,

    // Write
    RecordCreated,
    ValidationRejected,

    // Store
    StoreFailure,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "DUMMYDB_STARTUP_BEGIN",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::StoreOpened => "STORE_OPENED",
            Event::Serving => "DUMMYDB_SERVING",
            Event::ShutdownStart => "SHUTDOWN_START",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",
            Event::BootFailed => "BOOT_FAILED",

            Event::RecordsListed => "RECORDS_LISTED",
            Event::RecordDropped => "RECORD_DROPPED",

            Event::RecordFetched => "RECORD_FETCHED",
            Event::RecordNotFound => "RECORD_NOT_FOUND",
            Event::StoredRecordInvalid => "STORED_RECORD_INVALID",

            Event::RecordCreated => "RECORD_CREATED",
            Event::ValidationRejected => "VALIDATION_REJECTED",

            Event::StoreFailure => "STORE_FAILURE",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::BootFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::RecordsListed.as_str(), "RECORDS_LISTED");
        assert_eq!(Event::StoreFailure.to_string(), "STORE_FAILURE");
    }

    #[test]
    fn test_only_boot_failure_is_fatal() {
        assert!(Event::BootFailed.is_fatal());
        assert!(!Event::StoreFailure.is_fatal());
        assert!(!Event::RecordDropped.is_fatal());
    }
}
