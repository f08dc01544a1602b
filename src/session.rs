//! Console session: the single logical owner of selection state.
//!
//! A [`Session`] holds the catalog view, the live [`Selection`], and the
//! current SQL text. Selection state is mutated only here — by direct
//! edits or by a completed hydration — and the SQL editor is free-form:
//! compiled or substituted text lands in `sql`, and the user may overwrite
//! it by hand before executing.

use serde_json::{Map, Value};
use tracing::debug;

use crate::catalog::{Catalog, Table};
use crate::compile::compile_sql;
use crate::selection::Selection;
use crate::services::ExecuteRequest;
use crate::template::{hydrate_selection_from_template, substitute_template, Template};

/// Blocking, user-visible precondition failures. These are surfaced, never
/// silently defaulted.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("no data source selected")]
    NoDataSource,

    #[error("no table selected")]
    NoTable,

    #[error("selected table {0} is not in the catalog")]
    UnknownTable(i64),

    #[error("no SQL to execute")]
    EmptySql,
}

/// The active console session.
#[derive(Debug, Default)]
pub struct Session {
    pub catalog: Catalog,
    pub selection: Selection,
    sql: String,
}

impl Session {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            selection: Selection::new(),
            sql: String::new(),
        }
    }

    /// The current SQL text.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Overwrite the SQL text (manual edits, picking a history entry).
    pub fn set_sql(&mut self, sql: impl Into<String>) {
        self.sql = sql.into();
    }

    /// The table the selection points at, if it resolves.
    pub fn selected_table(&self) -> Option<&Table> {
        self.selection
            .table_id
            .and_then(|id| self.catalog.table_by_id(id))
    }

    // =========================================================================
    // Selection edits
    // =========================================================================

    /// Switch data source. The table and all table-scoped selection state
    /// belong to the old source, so they are cleared.
    pub fn select_data_source(&mut self, id: i64) {
        if self.selection.data_source_id == Some(id) {
            return;
        }
        self.selection.data_source_id = Some(id);
        self.selection.table_id = None;
        self.selection.clear();
    }

    pub fn select_table(&mut self, id: i64) {
        self.selection.table_id = Some(id);
    }

    /// Drop dimensions, metrics, filters, and sorts.
    pub fn reset_selection(&mut self) {
        self.selection.clear();
    }

    // =========================================================================
    // Compilation and execution preconditions
    // =========================================================================

    /// Compile the current selection into SQL, storing and returning it.
    ///
    /// The compiler itself cannot fail; what can is the session not being
    /// ready — no data source, no table, or a table id the catalog does
    /// not know.
    pub fn generate_sql(&mut self) -> Result<&str, SessionError> {
        if self.selection.data_source_id.is_none() {
            return Err(SessionError::NoDataSource);
        }
        let table_id = self.selection.table_id.ok_or(SessionError::NoTable)?;
        let table = self
            .catalog
            .table_by_id(table_id)
            .ok_or(SessionError::UnknownTable(table_id))?;

        self.sql = compile_sql(&self.selection, table);
        debug!(table = %table.table_name, "compiled scenario sql");
        Ok(&self.sql)
    }

    /// Build an execution request for the current SQL, checking the
    /// execute-time preconditions.
    pub fn execution_request(&self, max_rows: u32) -> Result<ExecuteRequest, SessionError> {
        let data_source_id = self
            .selection
            .data_source_id
            .ok_or(SessionError::NoDataSource)?;
        if self.sql.trim().is_empty() {
            return Err(SessionError::EmptySql);
        }
        Ok(ExecuteRequest {
            data_source_id,
            sql: self.sql.clone(),
            max_rows,
        })
    }

    // =========================================================================
    // Template application
    // =========================================================================

    /// Fill a template's SQL with its stored parameters and make it the
    /// current SQL text.
    pub fn apply_template(&mut self, template: &Template) -> &str {
        self.sql = substitute_template(&template.sql_template, &template.parameters);
        debug!(template = %template.name, "applied template sql");
        &self.sql
    }

    /// Hydrate the selection from a template's stored scenario.
    pub fn apply_scenario(&mut self, template: &Template) {
        self.selection =
            hydrate_selection_from_template(template, &self.catalog, &self.selection);
        debug!(template = %template.name, "applied template scenario");
    }

    /// The parameter bag describing the current scenario, as stored on a
    /// saved template. [`hydrate_selection_from_template`] reads this
    /// exact shape back.
    pub fn scenario_parameters(&self) -> Map<String, Value> {
        let mut parameters = Map::new();
        parameters.insert(
            "data_source_id".to_string(),
            option_id(self.selection.data_source_id),
        );
        parameters.insert("table_id".to_string(), option_id(self.selection.table_id));
        parameters.insert(
            "dimensions".to_string(),
            serde_json::to_value(&self.selection.dimensions).unwrap_or(Value::Null),
        );
        parameters.insert(
            "metrics".to_string(),
            serde_json::to_value(&self.selection.metrics).unwrap_or(Value::Null),
        );
        parameters.insert(
            "filters".to_string(),
            serde_json::to_value(&self.selection.filters).unwrap_or(Value::Null),
        );
        parameters.insert(
            "sorts".to_string(),
            serde_json::to_value(&self.selection.sorts).unwrap_or(Value::Null),
        );
        parameters
    }
}

fn option_id(id: Option<i64>) -> Value {
    match id {
        Some(id) => Value::from(id),
        None => Value::Null,
    }
}

// =============================================================================
// Tests
// =============================================================================
