//! HTML rendering for the record pages
//!
//! Plain string building; every piece of record text goes through
//! [`escape_html`].

use std::fmt::Write;

use crate::schema::{parse_timestamp, Record, Status};

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// `YYYY-MM-DD` of the creation time, or `Invalid Date`
fn created_date(record: &Record) -> String {
    record
        .created_at
        .as_deref()
        .and_then(parse_timestamp)
        .map(|ts| ts.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "Invalid Date".to_string())
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        escape_html(title),
        body
    )
}

fn status_class(status: Status) -> &'static str {
    match status {
        Status::Active => "status-active",
        Status::Inactive => "status-inactive",
    }
}

/// Detail page for one record
pub fn render_detail(record: &Record) -> String {
    let mut body = String::new();
    body.push_str("<a href=\"/records-view\">Back</a>\n");
    body.push_str("<h1>Record Details</h1>\n<dl>\n");

    let _ = writeln!(body, "<dt>Name:</dt><dd>{}</dd>", escape_html(&record.name));
    let _ = writeln!(
        body,
        "<dt>Description:</dt><dd>{}</dd>",
        escape_html(record.description.as_deref().unwrap_or(""))
    );
    let _ = writeln!(
        body,
        "<dt>Status:</dt><dd class=\"{}\">{}</dd>",
        status_class(record.status),
        record.status.label()
    );
    let _ = writeln!(body, "<dt>Created At:</dt><dd>{}</dd>", created_date(record));

    body.push_str("</dl>\n");
    layout(&format!("{} - Record Details", record.name), &body)
}

/// Page shown when a record is absent or fails validation
pub fn render_not_found() -> String {
    layout(
        "Record not found",
        "<a href=\"/records-view\">Back</a>\n<p>Record not found</p>\n",
    )
}

/// Page shown when the store cannot be reached
pub fn render_error() -> String {
    layout(
        "Something went wrong",
        "<p>Something went wrong. Please try again later.</p>\n",
    )
}

/// Index of records, each linking to its detail page
pub fn render_index(records: &[Record]) -> String {
    let mut body = String::from("<h1>Records</h1>\n");

    if records.is_empty() {
        body.push_str("<p>No records yet.</p>\n");
        return layout("Records", &body);
    }

    body.push_str("<ul>\n");
    for record in records {
        match record.id_string() {
            Some(id) => {
                let _ = writeln!(
                    body,
                    "<li><a href=\"/records-view/{}\">{}</a></li>",
                    escape_html(&id),
                    escape_html(&record.name)
                );
            }
            None => {
                let _ = writeln!(body, "<li>{}</li>", escape_html(&record.name));
            }
        }
    }
    body.push_str("</ul>\n");

    layout("Records", &body)
}
