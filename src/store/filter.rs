//! Scan filters
//!
//! The store only understands exact equality on top-level fields, plus an
//! optional cap on the number of matches returned.

use serde_json::Value;

/// Equality condition on one top-level field
#[derive(Debug, Clone, PartialEq)]
pub struct FilterExpr {
    pub field: String,
    pub value: Value,
}

impl FilterExpr {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// A missing field never matches
    pub fn matches(&self, doc: &Value) -> bool {
        doc.get(&self.field) == Some(&self.value)
    }
}

/// Conditions combined with AND, and an optional result cap
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanFilter {
    pub conditions: Vec<FilterExpr>,
    pub limit: Option<usize>,
}

impl ScanFilter {
    /// Match every item
    pub fn all() -> Self {
        Self::default()
    }

    /// Match items whose `field` equals `value`
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::all().and(FilterExpr::eq(field, value))
    }

    pub fn and(mut self, condition: FilterExpr) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Stop after this many matches
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, doc: &Value) -> bool {
        self.conditions.iter().all(|c| c.matches(doc))
    }

    /// Apply the filter to items in store order
    pub fn apply<'a, I>(&self, items: I) -> Vec<Value>
    where
        I: IntoIterator<Item = &'a Value>,
    {
        items
            .into_iter()
            .filter(|doc| self.matches(doc))
            .take(self.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_eq_filter() {
        let filter = FilterExpr::eq("status", "active");

        assert!(filter.matches(&json!({"status": "active"})));
        assert!(!filter.matches(&json!({"status": "inactive"})));
        assert!(!filter.matches(&json!({"name": "no status"})));
    }

    #[test]
    fn test_equality_is_exact() {
        let filter = FilterExpr::eq("status", "act");
        assert!(!filter.matches(&json!({"status": "active"})));
    }

    #[test]
    fn test_conditions_and_together() {
        let filter = ScanFilter::eq("status", "active").and(FilterExpr::eq("name", "a"));

        assert!(filter.matches(&json!({"status": "active", "name": "a"})));
        assert!(!filter.matches(&json!({"status": "active", "name": "b"})));
    }

    #[test]
    fn test_apply_keeps_order_and_limit() {
        let items = vec![
            json!({"id": "1", "status": "active"}),
            json!({"id": "2", "status": "inactive"}),
            json!({"id": "3", "status": "active"}),
            json!({"id": "4", "status": "active"}),
        ];

        let all_active = ScanFilter::eq("status", "active").apply(&items);
        let ids: Vec<_> = all_active.iter().map(|v| v["id"].clone()).collect();
        assert_eq!(ids, vec![json!("1"), json!("3"), json!("4")]);

        let capped = ScanFilter::eq("status", "active").with_limit(2).apply(&items);
        assert_eq!(capped.len(), 2);

        assert_eq!(ScanFilter::all().apply(&items).len(), 4);
    }
}
