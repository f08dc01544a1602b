//! History browsing: reconcile requested pagination with the server's
//! authoritative reply.
//!
//! The history service's pagination block is optional and possibly
//! partial, so every fetch produces a fresh [`PageState`] by preferring
//! each server-supplied field and falling back to the request. A page
//! state is always recomputed whole; stale fields are never merged into a
//! newer reply.

use serde::{Deserialize, Serialize};

// =============================================================================
// Requests and server reply shapes
// =============================================================================

/// A history page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl PageRequest {
    pub fn new(page: u64, page_size: u64) -> Self {
        Self { page, page_size }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 5,
        }
    }
}

/// Possibly-partial pagination block of a server reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    #[serde(default)]
    pub page: Option<u64>,
    #[serde(default)]
    pub page_size: Option<u64>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u64>,
}

/// One past execution, as listed by the history service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    #[serde(default)]
    pub query_name: Option<String>,
    #[serde(default)]
    pub natural_language_query: Option<String>,
    #[serde(default)]
    pub generated_sql: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub row_count: Option<u64>,
    #[serde(default)]
    pub execution_time_ms: Option<u64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub is_saved: bool,
    #[serde(default)]
    pub is_shared: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A raw history reply: the result list plus the optional pagination
/// block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryPage {
    #[serde(default, rename = "data")]
    pub items: Vec<HistoryEntry>,
    #[serde(default)]
    pub pagination: Option<PageInfo>,
}

// =============================================================================
// Page state
// =============================================================================

/// The authoritative page state after reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageState {
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub total_pages: u64,
    pub items: Vec<HistoryEntry>,
}

impl PageState {
    /// Merge a server reply with the request that produced it. Server
    /// fields win; missing fields fall back to the request (total falls
    /// back to the list length), and a missing `total_pages` is derived
    /// as `ceil(total / page_size)`, floored at 1.
    pub fn reconcile(request: &PageRequest, reply: HistoryPage) -> PageState {
        let info = reply.pagination.unwrap_or_default();
        let page = info.page.unwrap_or(request.page);
        let page_size = info.page_size.unwrap_or(request.page_size).max(1);
        let total = info.total.unwrap_or(reply.items.len() as u64);
        let total_pages = info
            .total_pages
            .unwrap_or_else(|| total.div_ceil(page_size).max(1));
        PageState {
            page,
            page_size,
            total,
            total_pages,
            items: reply.items,
        }
    }

    /// The deterministic state after a transport failure: no list, no
    /// counts. Retaining the previous page's data would display counts
    /// inconsistent with an empty list.
    pub fn empty(request: &PageRequest) -> PageState {
        PageState {
            page: request.page,
            page_size: request.page_size,
            total: 0,
            total_pages: 0,
            items: Vec::new(),
        }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Request for the previous page, clamped to page 1. `None` when the
    /// page would not change.
    pub fn prev_request(&self) -> Option<PageRequest> {
        let page = self.page.saturating_sub(1).max(1);
        (page != self.page).then(|| PageRequest::new(page, self.page_size))
    }

    /// Request for the next page, clamped to `total_pages` when known.
    /// When the page count is unknown, the next page is requested
    /// optimistically and corrected by the following reconciliation.
    /// `None` when the page would not change.
    pub fn next_request(&self) -> Option<PageRequest> {
        let page = if self.total_pages > 0 {
            (self.page + 1).min(self.total_pages)
        } else {
            self.page + 1
        };
        (page != self.page).then(|| PageRequest::new(page, self.page_size))
    }

    /// Request after a page-size change; always restarts at page 1.
    pub fn resize_request(&self, page_size: u64) -> PageRequest {
        PageRequest::new(1, page_size)
    }
}

/// Reconcile a fetch outcome into the authoritative page state.
pub fn reconcile_history_page<E>(
    request: &PageRequest,
    reply: Result<HistoryPage, E>,
) -> PageState {
    match reply {
        Ok(page) => PageState::reconcile(request, page),
        Err(_) => PageState::empty(request),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(n: usize) -> Vec<HistoryEntry> {
        (0..n)
            .map(|i| HistoryEntry {
                id: i as i64,
                ..HistoryEntry::default()
            })
            .collect()
    }

    #[test]
    fn test_server_fields_win() {
        let request = PageRequest::new(2, 5);
        let reply = HistoryPage {
            items: entries(5),
            pagination: Some(PageInfo {
                page: Some(3),
                page_size: Some(10),
                total: Some(42),
                total_pages: Some(5),
            }),
        };
        let state = PageState::reconcile(&request, reply);
        assert_eq!((state.page, state.page_size), (3, 10));
        assert_eq!((state.total, state.total_pages), (42, 5));
    }

    #[test]
    fn test_missing_total_pages_is_derived() {
        let request = PageRequest::new(1, 5);
        let reply = HistoryPage {
            items: entries(5),
            pagination: Some(PageInfo {
                total: Some(23),
                ..PageInfo::default()
            }),
        };
        let state = PageState::reconcile(&request, reply);
        assert_eq!(state.total_pages, 5);
    }

    #[test]
    fn test_missing_pagination_block() {
        let request = PageRequest::new(2, 5);
        let reply = HistoryPage {
            items: entries(3),
            pagination: None,
        };
        let state = PageState::reconcile(&request, reply);
        assert_eq!(state.page, 2);
        assert_eq!(state.page_size, 5);
        assert_eq!(state.total, 3);
        assert_eq!(state.total_pages, 1);
    }

    #[test]
    fn test_empty_reply_still_shows_one_page() {
        let state = PageState::reconcile(&PageRequest::default(), HistoryPage::default());
        assert_eq!(state.total, 0);
        assert_eq!(state.total_pages, 1);
    }

    #[test]
    fn test_transport_failure_resets_counts() {
        let request = PageRequest::new(4, 10);
        let state = reconcile_history_page::<&str>(&request, Err("boom"));
        assert!(state.items.is_empty());
        assert_eq!(state.total, 0);
        assert_eq!(state.total_pages, 0);
        assert_eq!(state.page, 4);
    }

    #[test]
    fn test_prev_clamps_at_first_page() {
        let state = PageState {
            page: 1,
            page_size: 5,
            ..PageState::default()
        };
        assert_eq!(state.prev_request(), None);

        let state = PageState { page: 3, ..state };
        assert_eq!(state.prev_request(), Some(PageRequest::new(2, 5)));
    }

    #[test]
    fn test_next_clamps_at_known_last_page() {
        let state = PageState {
            page: 5,
            page_size: 5,
            total: 23,
            total_pages: 5,
            items: vec![],
        };
        assert_eq!(state.next_request(), None);

        let state = PageState { page: 2, ..state };
        assert_eq!(state.next_request(), Some(PageRequest::new(3, 5)));
    }

    #[test]
    fn test_next_is_optimistic_when_count_unknown() {
        let state = PageState {
            page: 7,
            page_size: 5,
            total: 0,
            total_pages: 0,
            items: vec![],
        };
        assert_eq!(state.next_request(), Some(PageRequest::new(8, 5)));
    }

    #[test]
    fn test_resize_resets_to_first_page() {
        let state = PageState {
            page: 4,
            page_size: 5,
            ..PageState::default()
        };
        assert_eq!(state.resize_request(20), PageRequest::new(1, 20));
    }

    #[test]
    fn test_reply_deserializes_backend_shape() {
        let reply: HistoryPage = serde_json::from_str(
            r#"{
                "data": [{"id": 9, "generated_sql": "SELECT 1", "is_saved": true}],
                "pagination": {"page": 1, "page_size": 5, "total": 23, "total_pages": 5}
            }"#,
        )
        .unwrap();
        assert_eq!(reply.items.len(), 1);
        assert!(reply.items[0].is_saved);
        assert_eq!(reply.pagination.unwrap().total, Some(23));
    }
}
