//! History service boundary.

use async_trait::async_trait;

use super::ServiceResult;
use crate::history::{HistoryPage, PageRequest};

/// Trait for the execution-history service.
#[async_trait]
pub trait HistoryService: Send + Sync {
    /// One page of past executions.
    async fn history_page(&self, request: &PageRequest) -> ServiceResult<HistoryPage>;

    /// Name and tag a past execution so it shows up as saved.
    async fn save_query(&self, query_id: i64, name: &str, tags: &[String]) -> ServiceResult<()>;

    /// Toggle sharing of a past execution.
    async fn share_query(&self, query_id: i64, shared: bool) -> ServiceResult<()>;
}
