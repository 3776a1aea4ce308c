//! Core domain logic for DeskBoard.
//! This crate is the single source of truth for document state and its
//! mutation rules.

pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;
pub mod sync;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::document::{Document, Filters, PriorityFilter, Theme, TodoBuckets};
pub use model::issue::{Issue, IssueId, IssueStatus, Priority};
pub use model::todo::{Todo, TodoId};
pub use service::issue_service::{
    FilterChange, IssuePatch, IssueService, IssueServiceError, IssueServiceResult, NewIssueRequest,
};
pub use service::todo_service::{TodoService, TodoServiceError, TodoServiceResult};
pub use store::{DocumentSlot, SqliteDocumentSlot, Store, StoreError, StoreResult};
pub use sync::github_import::{
    map_remote_issue, map_remote_issues, GithubIssueSource, ImportError, ImportResult, RemoteIssue,
    IMPORT_PAGE_SIZE,
};
pub use sync::time_sync::{
    ClockError, ClockOrigin, ClockResult, ClockSource, DateSyncReport, HttpClockSource,
    TimeSyncService,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
