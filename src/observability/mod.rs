//! Observability for dummydb
//!
//! Structured JSON logging keyed by typed [`Event`]s.
//!
//! ```ignore
//! use dummydb::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::RecordCreated, &[("id", "0c6f...")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity, TRACE_ENV};

/// Log an event at the severity it carries by default
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log an event with fields at its default severity
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(default_severity(event), event.as_str(), fields);
}

fn default_severity(event: Event) -> Severity {
    if event.is_fatal() {
        return Severity::Fatal;
    }
    match event {
        Event::StoreFailure => Severity::Error,
        Event::StoredRecordInvalid => Severity::Warn,
        Event::RecordDropped => Severity::Trace,
        _ => Severity::Info,
    }
}
