//! Scenario compiler: Selection + Table → SQL text.
//!
//! A pure function over the selection state. The rendering rules are
//! exact and deliberately conservative:
//!
//! - Column list is dimensions followed by metrics, comma-joined in
//!   selection order; `*` when both are empty.
//! - WHERE appears only when there are filters; conditions are AND-joined
//!   in entry order, never reordered or deduplicated.
//! - Numeric literals render bare; every other value renders
//!   single-quoted with embedded quotes doubled (`O'Brien` → `'O''Brien'`).
//! - ORDER BY appears only when there are sorts.
//! - Column identifiers are never quoted. Quoting them breaks MySQL-family
//!   sources that treat double-quoted tokens as string literals, so the
//!   caller's catalog is trusted instead. Literal quoting is the only
//!   injection defense this layer provides; real validation belongs to
//!   the backend.
//!
//! The compiler never fails: an empty selection compiles to
//! `SELECT * FROM <table>`. Supplying a resolved table is the caller's
//! precondition — [`crate::session::Session::generate_sql`] is the checked
//! entry point that surfaces the missing-table case as a blocking error.

use crate::catalog::Table;
use crate::selection::{FilterValue, Selection};

/// Quote a string as a SQL literal: wrap in single quotes and double any
/// embedded quote.
pub fn sql_string_literal(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('\'');
    for ch in raw.chars() {
        if ch == '\'' {
            out.push('\'');
        }
        out.push(ch);
    }
    out.push('\'');
    out
}

/// Render a filter value as a SQL literal.
pub fn sql_literal(value: &FilterValue) -> String {
    match value {
        FilterValue::Number(n) => n.to_string(),
        FilterValue::Text(s) => sql_string_literal(s),
    }
}

/// Compile a selection against its resolved table into one SQL string.
pub fn compile_sql(selection: &Selection, table: &Table) -> String {
    let mut columns: Vec<&str> =
        Vec::with_capacity(selection.dimensions.len() + selection.metrics.len());
    columns.extend(selection.dimensions.iter().map(String::as_str));
    columns.extend(selection.metrics.iter().map(String::as_str));

    let column_sql = if columns.is_empty() {
        "*".to_string()
    } else {
        columns.join(", ")
    };

    let mut sql = format!("SELECT {} FROM {}", column_sql, table.table_name);

    if !selection.filters.is_empty() {
        let conditions: Vec<String> = selection
            .filters
            .iter()
            .map(|f| format!("{} {} {}", f.column, f.op, sql_literal(&f.value)))
            .collect();
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }

    if !selection.sorts.is_empty() {
        let terms: Vec<String> = selection
            .sorts
            .iter()
            .map(|s| format!("{} {}", s.column, s.direction))
            .collect();
        sql.push_str(" ORDER BY ");
        sql.push_str(&terms.join(", "));
    }

    sql
}

// =============================================================================
// Tests
// =============================================================================
