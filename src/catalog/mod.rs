//! Column catalog: a read-only, in-memory view of data sources, tables,
//! and columns, fed by the external metadata service.
//!
//! Columns carry dimension/metric role flags that drive the selection UI's
//! candidate lists. The catalog answers lookups only; it never validates a
//! selection against itself — that is deliberately left to the backend.

mod provider;

pub use provider::{CatalogProvider, CatalogResult, PagedLoad};

use serde::{Deserialize, Serialize};

// =============================================================================
// Catalog entities
// =============================================================================

/// A column with its role flags. Identity is `name` within its table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    #[serde(alias = "column_name")]
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub data_type: Option<String>,
    #[serde(default)]
    pub is_dimension: bool,
    #[serde(default)]
    pub is_metric: bool,
}

impl Column {
    /// Display name when set, stored name otherwise.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

/// A table with its ordered column list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub id: i64,
    #[serde(alias = "name")]
    pub table_name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Table {
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.table_name)
    }

    /// Whether `name` matches the stored name or the display name.
    pub fn matches_name(&self, name: &str) -> bool {
        self.table_name == name || self.display_name.as_deref() == Some(name)
    }

    /// Columns flagged as dimension candidates, in catalog order.
    pub fn dimensions(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.is_dimension)
    }

    /// Columns flagged as metric candidates, in catalog order.
    pub fn metrics(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.is_metric)
    }
}

/// A registered data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSource {
    pub id: i64,
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

// =============================================================================
// Catalog
// =============================================================================

/// The in-memory catalog view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub data_sources: Vec<DataSource>,
    #[serde(default)]
    pub tables: Vec<Table>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data_source_by_id(&self, id: i64) -> Option<&DataSource> {
        self.data_sources.iter().find(|ds| ds.id == id)
    }

    pub fn table_by_id(&self, id: i64) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == id)
    }

    /// First table whose stored name or display name matches.
    pub fn find_table_by_name(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.matches_name(name))
    }

    /// Swap in a freshly loaded table list (data-source switch).
    pub fn replace_tables(&mut self, tables: Vec<Table>) {
        self.tables = tables;
    }

    /// Attach lazily loaded columns to a table already in the catalog.
    pub fn set_table_columns(&mut self, table_id: i64, columns: Vec<Column>) {
        if let Some(table) = self.tables.iter_mut().find(|t| t.id == table_id) {
            table.columns = columns;
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
