#[cfg(test)]
mod tests {
    use queryboard::history::{
        reconcile_history_page, HistoryEntry, HistoryPage, PageInfo, PageRequest, PageState,
    };
    use queryboard::services::ServiceError;

    fn entries(n: usize) -> Vec<HistoryEntry> {
        (0..n)
            .map(|i| HistoryEntry {
                id: i as i64,
                ..HistoryEntry::default()
            })
            .collect()
    }

    #[test]
    fn test_derives_total_pages_from_total() {
        let request = PageRequest::new(1, 5);
        let reply = HistoryPage {
            items: entries(5),
            pagination: Some(PageInfo {
                total: Some(23),
                ..PageInfo::default()
            }),
        };
        let state = reconcile_history_page::<ServiceError>(&request, Ok(reply));
        assert_eq!(state.total_pages, 5);
        assert_eq!(state.page, 1);
        assert_eq!(state.page_size, 5);
    }

    #[test]
    fn test_transport_failure_yields_empty_state() {
        let request = PageRequest::new(3, 5);
        let state = reconcile_history_page(
            &request,
            Err(ServiceError::Transport("connection reset".to_string())),
        );
        assert!(state.items.is_empty());
        assert_eq!(state.total, 0);
        assert_eq!(state.total_pages, 0);
    }

    #[test]
    fn test_navigation_walk() {
        // Land on page 1 of 5, walk forward twice, then resize.
        let request = PageRequest::new(1, 5);
        let reply = HistoryPage {
            items: entries(5),
            pagination: Some(PageInfo {
                page: Some(1),
                page_size: Some(5),
                total: Some(23),
                total_pages: Some(5),
            }),
        };
        let state = PageState::reconcile(&request, reply);
        assert_eq!(state.prev_request(), None);

        let next = state.next_request().unwrap();
        assert_eq!(next, PageRequest::new(2, 5));

        let resized = state.resize_request(20);
        assert_eq!(resized, PageRequest::new(1, 20));
    }

    #[test]
    fn test_optimistic_next_corrected_by_reconciliation() {
        // No page count known: next is optimistic...
        let unknown = PageState::reconcile(&PageRequest::new(1, 5), HistoryPage::default());
        assert_eq!(unknown.total_pages, 1);

        // ...but once the server reports 2 pages, the clamp applies.
        let reply = HistoryPage {
            items: entries(5),
            pagination: Some(PageInfo {
                page: Some(2),
                page_size: Some(5),
                total: Some(8),
                total_pages: Some(2),
            }),
        };
        let state = PageState::reconcile(&PageRequest::new(2, 5), reply);
        assert_eq!(state.next_request(), None);
        assert_eq!(state.prev_request(), Some(PageRequest::new(1, 5)));
    }
}
