//! Query execution service boundary.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::ServiceResult;

/// A request to execute SQL against a data source, with a row cap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecuteRequest {
    pub data_source_id: i64,
    pub sql: String,
    pub max_rows: u32,
}

/// A result column, which some service versions send as a bare name and
/// others as an object carrying one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnRef {
    Plain(String),
    Named { name: String },
}

impl ColumnRef {
    pub fn name(&self) -> &str {
        match self {
            ColumnRef::Plain(name) => name,
            ColumnRef::Named { name } => name,
        }
    }
}

/// Outcome of executing SQL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    #[serde(default)]
    pub columns: Vec<ColumnRef>,
    #[serde(default, rename = "data")]
    pub rows: Vec<Map<String, Value>>,
    #[serde(default)]
    pub execution_time_ms: Option<u64>,
    #[serde(default)]
    pub row_count: Option<u64>,
    #[serde(default)]
    pub query_id: Option<i64>,
}

impl ExecutionResult {
    /// Column names in reply order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(ColumnRef::name).collect()
    }
}

/// Trait for executing SQL through the backend's query engine.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute(&self, request: &ExecuteRequest) -> ServiceResult<ExecutionResult>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_tolerates_both_column_shapes() {
        let result: ExecutionResult = serde_json::from_str(
            r#"{
                "columns": [{"name": "region"}, "gmv"],
                "data": [{"region": "east", "gmv": 10}],
                "execution_time_ms": 12,
                "row_count": 1,
                "query_id": 77
            }"#,
        )
        .unwrap();
        assert_eq!(result.column_names(), vec!["region", "gmv"]);
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.query_id, Some(77));
    }

    #[test]
    fn test_result_defaults_when_fields_missing() {
        let result: ExecutionResult = serde_json::from_str("{}").unwrap();
        assert!(result.columns.is_empty());
        assert!(result.rows.is_empty());
        assert_eq!(result.row_count, None);
    }
}
