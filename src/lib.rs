//! # Queryboard
//!
//! Scenario compiler and template parameter binder for a SQL analytics
//! console.
//!
//! ## Architecture
//!
//! The console lets analysts assemble a query intent — table, dimensions,
//! metrics, filters, sorts — and turns it into SQL, either directly or by
//! way of a saved template:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                 Template (persisted)                     │
//! │        {natural language, SQL text, parameter bag}       │
//! └─────────────────────────────────────────────────────────┘
//!        │ substitute                     │ hydrate
//!        ▼ [template::substitute]         ▼ [template::hydrate]
//! ┌──────────────────┐          ┌─────────────────────────┐
//! │     SQL text     │ ◀──────  │        Selection        │
//! └──────────────────┘ compile  │ (+ Catalog for lookups) │
//!        │          [compile]   └─────────────────────────┘
//!        ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │      Query / history services (async collaborators)      │
//! │      paging replies reconciled by [history]              │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Both binder directions and the compiler are pure, synchronous, and
//! total over malformed input (hydration and substitution degrade
//! per-field instead of failing). I/O lives behind the async traits in
//! [`services`] and [`catalog::CatalogProvider`]; the [`fetch`] module
//! guards against overlapping fetches resolving out of order.

pub mod catalog;
pub mod compile;
pub mod config;
pub mod fetch;
pub mod history;
pub mod selection;
pub mod services;
pub mod session;
pub mod template;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::catalog::{Catalog, CatalogProvider, Column, DataSource, PagedLoad, Table};
    pub use crate::compile::compile_sql;
    pub use crate::config::Settings;
    pub use crate::fetch::{FetchSlot, FetchTicket};
    pub use crate::history::{
        reconcile_history_page, HistoryEntry, HistoryPage, PageRequest, PageState,
    };
    pub use crate::selection::{Filter, FilterOp, FilterValue, Selection, Sort, SortDirection};
    pub use crate::services::{
        ExecuteRequest, ExecutionResult, HistoryService, QueryExecutor, ServiceError,
        TemplateStore,
    };
    pub use crate::session::{Session, SessionError};
    pub use crate::template::{
        hydrate_selection_from_template, substitute_template, Template,
    };
}
