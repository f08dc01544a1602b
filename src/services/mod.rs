//! Collaborator service boundaries.
//!
//! This crate performs no I/O of its own; the query, template, and
//! history services (and the catalog's metadata service, see
//! [`crate::catalog::CatalogProvider`]) are consumed through these traits.
//! Transport failures surface as [`ServiceError`] and are summarized by
//! the surrounding application — no retries happen at this layer.

mod history;
mod query;
mod template;

pub use history::HistoryService;
pub use query::{ColumnRef, ExecuteRequest, ExecutionResult, QueryExecutor};
pub use template::{NewTemplate, TemplateStore, TemplateUpdate};

use thiserror::Error;

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Transport-level failure from a collaborator service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request never produced a reply.
    #[error("transport error: {0}")]
    Transport(String),

    /// The service replied with a failure status.
    #[error("service replied {status}: {message}")]
    Status { status: u16, message: String },

    /// The reply arrived but did not match the expected shape.
    #[error("malformed service reply: {0}")]
    Decode(#[from] serde_json::Error),
}
