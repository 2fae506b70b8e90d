//! # Query Parameter Parser
//!
//! Parses the listing query string into a [`ListQuery`].

use std::collections::HashMap;
use std::fmt;


use super::errors::{RestError, RestResult};

/// Maximum page size
pub const MAX_LIMIT: usize = 1000;

/// Page size if not specified
pub const DEFAULT_LIMIT: usize = 10;

/// Page number if not specified
pub const DEFAULT_PAGE: usize = 1;

/// Status filter if not specified
pub const DEFAULT_STATUS: &str = "active";

/// Order of the listing by `created_at`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(raw: &str) -> RestResult<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(RestError::InvalidQueryParam(format!(
                "Invalid created_at_sort: {}",
                raw
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed listing parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Exact-match status filter. Any string is accepted; unknown values
    /// simply match nothing.
    pub status: String,

    /// 1-based page number
    pub page: usize,

    /// Page size, 1..=MAX_LIMIT
    pub limit: usize,

    pub sort: SortDirection,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            status: DEFAULT_STATUS.to_string(),
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            sort: SortDirection::default(),
        }
    }
}

impl ListQuery {
    /// Parse query parameters from a HashMap.
    ///
    /// Empty values count as absent; unknown keys are ignored.
    pub fn parse(params: &HashMap<String, String>) -> RestResult<Self> {
        let mut result = ListQuery::default();

        for (key, value) in params {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }

            match key.as_str() {
                "status" => result.status = value.to_string(),
                "page" => result.page = parse_positive("page", value)?,
                "limit" => result.limit = parse_positive("limit", value)?,
                "created_at_sort" => result.sort = SortDirection::parse(value)?,
                _ => {}
            }
        }

        if result.limit > MAX_LIMIT {
            return Err(RestError::LimitExceeded(result.limit, MAX_LIMIT));
        }

        Ok(result)
    }
}

fn parse_positive(name: &str, value: &str) -> RestResult<usize> {
    match value.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(RestError::InvalidQueryParam(format!(
            "Invalid {}: {}",
            name, value
        ))),
    }
}
