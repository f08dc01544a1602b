//! Reverse hydration: stored parameter bag → Selection.
//!
//! The mirror image of saving a scenario. Every field of the result is
//! resolved independently from the bag; a field whose entry is missing or
//! malformed keeps its current value. Filter and sort records tolerate the
//! alias sets and positional shapes found in historically saved templates.

use serde_json::Value;

use super::params::pick;
use super::Template;
use crate::catalog::Catalog;
use crate::selection::{Filter, FilterOp, FilterValue, Selection, Sort, SortDirection};

/// Rebuild a selection from a template's stored parameter bag.
///
/// Total: hydration is advisory, so nothing here can fail — each
/// unresolvable field simply leaves the corresponding part of `current`
/// untouched.
pub fn hydrate_selection_from_template(
    template: &Template,
    catalog: &Catalog,
    current: &Selection,
) -> Selection {
    let mut selection = current.clone();
    let bag = &template.parameters;

    // Table: a table_id entry wins and suppresses the name lookup, even
    // when it does not resolve. Either path must match the catalog.
    match pick(bag, &["table_id"]) {
        Some(raw) => {
            if let Some(id) = as_id(raw) {
                if catalog.table_by_id(id).is_some() {
                    selection.table_id = Some(id);
                }
            }
        }
        None => {
            if let Some(name) = pick(bag, &["table_name", "table"]).and_then(Value::as_str) {
                if let Some(table) = catalog.find_table_by_name(name) {
                    selection.table_id = Some(table.id);
                }
            }
        }
    }

    if let Some(names) = pick(bag, &["dimensions", "dimension"]).and_then(column_names) {
        selection.dimensions = names;
    }
    if let Some(names) = pick(bag, &["metrics", "metric"]).and_then(column_names) {
        selection.metrics = names;
    }
    if let Some(Value::Array(records)) = pick(bag, &["filters", "filter"]) {
        selection.filters = records.iter().filter_map(filter_record).collect();
    }
    if let Some(Value::Array(records)) = pick(bag, &["sorts", "sort"]) {
        selection.sorts = records.iter().filter_map(sort_record).collect();
    }

    selection
}

/// Numeric id: a JSON number or a numeric string.
fn as_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Column-name list: a string array (non-strings silently dropped) or a
/// comma-delimited string, split, trimmed, and emptied of blanks.
fn column_names(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
        ),
        Value::String(joined) => Some(
            joined
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect(),
        ),
        _ => None,
    }
}

/// One field of a filter/sort record: named aliases on an object (falling
/// back to a stringified positional key), or a positional slot on an
/// array.
fn record_field<'a>(record: &'a Value, names: &[&str], position: usize) -> Option<&'a Value> {
    match record {
        Value::Object(map) => pick(map, names).or_else(|| map.get(&position.to_string())),
        Value::Array(items) => items.get(position),
        _ => None,
    }
}

/// Scalars stringified; shapes that have no sensible string form resolve
/// to nothing.
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn filter_value(value: &Value) -> Option<FilterValue> {
    match value {
        Value::Number(n) => Some(FilterValue::Number(n.clone())),
        Value::String(s) => Some(FilterValue::Text(s.clone())),
        Value::Bool(b) => Some(FilterValue::Text(b.to_string())),
        _ => None,
    }
}

fn filter_record(record: &Value) -> Option<Filter> {
    let column = record_field(record, &["column", "col"], 0).and_then(scalar_string)?;
    if column.is_empty() {
        return None;
    }
    let op = record_field(record, &["op", "operator"], 1)
        .and_then(Value::as_str)
        .and_then(FilterOp::parse)
        .unwrap_or(FilterOp::Eq);
    let value = record_field(record, &["value"], 2)
        .and_then(filter_value)
        .unwrap_or_else(|| FilterValue::Text(String::new()));
    Some(Filter { column, op, value })
}

fn sort_record(record: &Value) -> Option<Sort> {
    let column = record_field(record, &["column", "col"], 0).and_then(scalar_string)?;
    if column.is_empty() {
        return None;
    }
    let direction = record_field(record, &["direction", "dir"], 1)
        .and_then(scalar_string)
        .map(|raw| SortDirection::clamp(&raw))
        .unwrap_or_default();
    Some(Sort { column, direction })
}

// =============================================================================
// Tests
// =============================================================================
