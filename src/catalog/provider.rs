//! CatalogProvider trait: the metadata service boundary.
//!
//! The required methods map one-to-one onto the metadata service's paged
//! endpoints. The provided `load_all_*` methods implement the bounded
//! paged loops the console uses to populate its pickers: they stop on the
//! first short page, and stop with a visible `truncated` signal when a
//! collaborator never returns one.

use std::future::Future;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::{Column, DataSource, Table};
use crate::services::ServiceError;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, ServiceError>;

/// Outcome of a bounded paged load.
#[derive(Debug, Clone, PartialEq)]
pub struct PagedLoad<T> {
    pub items: Vec<T>,
    /// True when loading stopped at the page limit before seeing a short
    /// final page; `items` is then a prefix of the full listing.
    pub truncated: bool,
}

/// Trait for fetching catalog metadata.
///
/// # Example
///
/// ```ignore
/// use queryboard::catalog::CatalogProvider;
///
/// async fn example(provider: &impl CatalogProvider) -> queryboard::catalog::CatalogResult<()> {
///     let sources = provider.load_all_data_sources(100, 50).await?;
///     let tables = provider.load_all_tables(sources.items[0].id, 200, 50).await?;
///     if tables.truncated {
///         // surface "listing truncated" to the user
///     }
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// List registered data sources, one page at a time.
    async fn list_data_sources(&self, limit: u32, offset: u64)
        -> CatalogResult<Vec<DataSource>>;

    /// List tables of a data source, one page at a time.
    async fn list_tables(
        &self,
        data_source_id: i64,
        limit: u32,
        offset: u64,
    ) -> CatalogResult<Vec<Table>>;

    /// List the columns of a table.
    async fn list_columns(&self, table_id: i64) -> CatalogResult<Vec<Column>>;

    // =========================================================================
    // Bounded paged loads (default implementations)
    // =========================================================================

    /// Load every data source, at most `max_pages` pages.
    async fn load_all_data_sources(
        &self,
        page_size: u32,
        max_pages: u32,
    ) -> CatalogResult<PagedLoad<DataSource>> {
        load_paged(
            |limit, offset| self.list_data_sources(limit, offset),
            page_size,
            max_pages,
        )
        .await
    }

    /// Load every table of a data source, at most `max_pages` pages.
    async fn load_all_tables(
        &self,
        data_source_id: i64,
        page_size: u32,
        max_pages: u32,
    ) -> CatalogResult<PagedLoad<Table>> {
        load_paged(
            |limit, offset| self.list_tables(data_source_id, limit, offset),
            page_size,
            max_pages,
        )
        .await
    }

    /// Batch fetch columns for several tables in parallel.
    async fn list_columns_batch(&self, table_ids: &[i64]) -> CatalogResult<Vec<Vec<Column>>> {
        let futures: Vec<_> = table_ids.iter().map(|id| self.list_columns(*id)).collect();

        let results = futures::future::join_all(futures).await;

        results.into_iter().collect()
    }
}

/// Fetch pages until a short or empty page, bounded by `max_pages`.
async fn load_paged<T, F, Fut>(
    mut fetch_page: F,
    page_size: u32,
    max_pages: u32,
) -> CatalogResult<PagedLoad<T>>
where
    F: FnMut(u32, u64) -> Fut + Send,
    Fut: Future<Output = CatalogResult<Vec<T>>> + Send,
    T: Send,
{
    let page_size = page_size.max(1);
    let mut items: Vec<T> = Vec::new();
    let mut offset: u64 = 0;
    let mut pages: u32 = 0;
    let mut truncated = false;

    loop {
        if pages >= max_pages {
            truncated = true;
            warn!(pages, loaded = items.len(), "paged load stopped at page limit");
            break;
        }
        let batch = fetch_page(page_size, offset).await?;
        if batch.is_empty() {
            break;
        }
        let short_page = (batch.len() as u64) < u64::from(page_size);
        offset += batch.len() as u64;
        pages += 1;
        items.extend(batch);
        debug!(page = pages, loaded = items.len(), "catalog page loaded");
        if short_page {
            break;
        }
    }

    Ok(PagedLoad { items, truncated })
}

// =============================================================================
// Tests
// =============================================================================
