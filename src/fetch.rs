//! Stale-response guard for overlapping fetches.
//!
//! The console's fetches are not cancelled: switching data sources twice
//! in quick succession leaves two table-list requests in flight, and the
//! slower (older) one can resolve last. Each logical fetch target owns a
//! [`FetchSlot`]; responses carry the ticket issued when their request
//! started, and only the most recently issued ticket may be applied.

use std::sync::atomic::{AtomicU64, Ordering};

/// Ticket identifying one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// Sequence counter for one logical fetch target (e.g. "tables of the
/// selected data source").
#[derive(Debug, Default)]
pub struct FetchSlot {
    issued: AtomicU64,
}

impl FetchSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a new fetch, superseding all earlier ones.
    pub fn begin(&self) -> FetchTicket {
        FetchTicket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether a response holding this ticket is still current.
    pub fn accept(&self, ticket: FetchTicket) -> bool {
        self.issued.load(Ordering::SeqCst) == ticket.0
    }
}
