// src/selection.rs
//! Selection state: the user's structured query intent.
//!
//! A [`Selection`] is the in-memory form of "what the analyst wants":
//! a data source, a table, ordered dimension and metric columns, filter
//! conditions, and sort order. It is populated either by direct edits or
//! by hydrating a saved template, and compiled to SQL by
//! [`crate::compile::compile_sql`] regardless of how it was populated.

use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Filters
// =============================================================================

/// Comparison operator of a filter condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOp {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = "<", alias = "&lt;")]
    Lt,
    #[serde(rename = "<=", alias = "&lt;=")]
    Le,
    #[serde(rename = ">", alias = "&gt;")]
    Gt,
    #[serde(rename = ">=", alias = "&gt;=")]
    Ge,
    #[serde(rename = "LIKE", alias = "like")]
    Like,
}

impl FilterOp {
    /// Parse an operator string.
    ///
    /// Operators that passed through HTML form state historically arrive
    /// entity-encoded (`&lt;`, `&gt;=`); those are decoded here, so an
    /// encoded operator can never reach SQL rendering.
    pub fn parse(raw: &str) -> Option<Self> {
        let decoded = raw.trim().replace("&lt;", "<").replace("&gt;", ">");
        match decoded.as_str() {
            "=" => Some(FilterOp::Eq),
            "!=" => Some(FilterOp::Ne),
            "<" => Some(FilterOp::Lt),
            "<=" => Some(FilterOp::Le),
            ">" => Some(FilterOp::Gt),
            ">=" => Some(FilterOp::Ge),
            _ if decoded.eq_ignore_ascii_case("LIKE") => Some(FilterOp::Like),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOp::Eq => "=",
            FilterOp::Ne => "!=",
            FilterOp::Lt => "<",
            FilterOp::Le => "<=",
            FilterOp::Gt => ">",
            FilterOp::Ge => ">=",
            FilterOp::Like => "LIKE",
        }
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A filter comparison value: free text or a number.
///
/// The distinction drives SQL rendering; numbers are emitted bare, text is
/// single-quoted. `serde_json::Number` keeps numeric values rendering
/// exactly as authored (`30`, not `30.0`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Number(serde_json::Number),
    Text(String),
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Number(value.into())
    }
}

impl From<serde_json::Number> for FilterValue {
    fn from(value: serde_json::Number) -> Self {
        FilterValue::Number(value)
    }
}

/// One filter condition. Filters are order-significant: they are rendered
/// in entry order, never reordered or deduplicated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub column: String,
    pub op: FilterOp,
    pub value: FilterValue,
}

impl Filter {
    pub fn new(column: &str, op: FilterOp, value: impl Into<FilterValue>) -> Self {
        Self {
            column: column.to_string(),
            op,
            value: value.into(),
        }
    }
}

// =============================================================================
// Sorts
// =============================================================================

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Clamp an arbitrary direction string to ASC/DESC. Anything that is
    /// not DESC (case-insensitive) is ASC.
    pub fn clamp(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("DESC") {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One sort term. Order-significant, like filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sort {
    pub column: String,
    pub direction: SortDirection,
}

impl Sort {
    pub fn new(column: &str, direction: SortDirection) -> Self {
        Self {
            column: column.to_string(),
            direction,
        }
    }

    pub fn asc(column: &str) -> Self {
        Self::new(column, SortDirection::Asc)
    }

    pub fn desc(column: &str) -> Self {
        Self::new(column, SortDirection::Desc)
    }
}

// =============================================================================
// Selection
// =============================================================================

/// The current structured query intent.
///
/// Dimensions and metrics are ordered; selection order is rendering order.
/// They are expected, but not enforced, to be a subset of the selected
/// table's columns — the compiler trusts the caller's catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub data_source_id: Option<i64>,
    pub table_id: Option<i64>,
    #[serde(default)]
    pub dimensions: Vec<String>,
    #[serde(default)]
    pub metrics: Vec<String>,
    #[serde(default)]
    pub filters: Vec<Filter>,
    #[serde(default)]
    pub sorts: Vec<Sort>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// No columns, filters, or sorts picked.
    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
            && self.metrics.is_empty()
            && self.filters.is_empty()
            && self.sorts.is_empty()
    }

    /// Drop dimensions, metrics, filters, and sorts, keeping the data
    /// source and table.
    pub fn clear(&mut self) {
        self.dimensions.clear();
        self.metrics.clear();
        self.filters.clear();
        self.sorts.clear();
    }
}

// =============================================================================
// Tests
// =============================================================================
