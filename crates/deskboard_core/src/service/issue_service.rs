//! Issue use-case service.
//!
//! # Responsibility
//! - Provide CRUD, batch import and filtering over the document's issue
//!   list.
//!
//! # Invariants
//! - `created_at` is stamped from the document's `current_date` at creation
//!   and never patched afterwards.
//! - Issue order is creation/import order; no operation reorders the list.
//! - A lookup miss mutates nothing and fires no notification.

use crate::model::document::{Filters, PriorityFilter};
use crate::model::issue::{Issue, IssueId, IssueStatus, Priority};
use crate::store::{DocumentSlot, Store, StoreError};
use chrono::NaiveDate;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type IssueServiceResult<T> = Result<T, IssueServiceError>;

/// Service error for issue use-cases.
#[derive(Debug)]
pub enum IssueServiceError {
    /// Title is empty after trimming.
    EmptyTitle,
    /// Target issue does not exist.
    IssueNotFound(IssueId),
    /// Persistence-layer failure.
    Store(StoreError),
}

impl Display for IssueServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "issue title cannot be empty"),
            Self::IssueNotFound(id) => write!(f, "issue not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for IssueServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::EmptyTitle | Self::IssueNotFound(_) => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for IssueServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Request model for creating an issue.
///
/// Unsupplied fields keep the defaults from `titled`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIssueRequest {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: IssueStatus,
    pub due_date: Option<NaiveDate>,
}

impl NewIssueRequest {
    /// Creates a request with the given title and default fields: empty
    /// description, `Medium` priority, `Open` status, no due date.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            priority: Priority::Medium,
            status: IssueStatus::Open,
            due_date: None,
        }
    }
}

/// Partial update for one issue. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssuePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<IssueStatus>,
    /// Outer `None` leaves the due date unchanged; `Some(None)` clears it.
    pub due_date: Option<Option<NaiveDate>>,
}

impl IssuePatch {
    fn apply(self, issue: &mut Issue) {
        if let Some(title) = self.title {
            issue.title = title;
        }
        if let Some(description) = self.description {
            issue.description = description;
        }
        if let Some(priority) = self.priority {
            issue.priority = priority;
        }
        if let Some(status) = self.status {
            issue.status = status;
        }
        if let Some(due_date) = self.due_date {
            issue.due_date = due_date;
        }
    }
}

/// One facet change for the issue list filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    Priority(PriorityFilter),
    Search(String),
}

/// Use-case service over the document's issue list.
///
/// Borrows the store exclusively for the duration of one interaction.
pub struct IssueService<'a, S: DocumentSlot> {
    store: &'a mut Store<S>,
}

impl<'a, S: DocumentSlot> IssueService<'a, S> {
    pub fn new(store: &'a mut Store<S>) -> Self {
        Self { store }
    }

    /// Creates an issue from `request` and appends it to the board.
    ///
    /// # Contract
    /// - Assigns a fresh stable id.
    /// - Stamps `created_at` from the document's `current_date`.
    /// - Returns the created issue id.
    pub fn add_issue(&mut self, request: NewIssueRequest) -> IssueServiceResult<IssueId> {
        let title = request.title.trim().to_string();
        if title.is_empty() {
            return Err(IssueServiceError::EmptyTitle);
        }

        let id = Uuid::new_v4();
        self.store.mutate(|doc| {
            let created_at = doc.current_date;
            doc.issues.push(Issue {
                id,
                title,
                description: request.description,
                priority: request.priority,
                status: request.status,
                due_date: request.due_date,
                created_at,
                source_url: None,
            });
        })?;

        info!("event=issue_add module=issue_service status=ok id={id}");
        Ok(id)
    }

    /// Merges `patch` into the issue with the given id.
    ///
    /// # Errors
    /// - `IssueNotFound` when no issue carries `id`; the document is left
    ///   untouched and no notification fires.
    pub fn update_issue(&mut self, id: IssueId, patch: IssuePatch) -> IssueServiceResult<()> {
        if self.store.document().issue(id).is_none() {
            return Err(IssueServiceError::IssueNotFound(id));
        }

        self.store.mutate(|doc| {
            if let Some(issue) = doc.issue_mut(id) {
                patch.apply(issue);
            }
        })?;

        info!("event=issue_update module=issue_service status=ok id={id}");
        Ok(())
    }

    /// Removes the issue with the given id.
    ///
    /// # Errors
    /// - `IssueNotFound` when no issue carries `id`; no notification fires.
    pub fn delete_issue(&mut self, id: IssueId) -> IssueServiceResult<()> {
        if self.store.document().issue(id).is_none() {
            return Err(IssueServiceError::IssueNotFound(id));
        }

        self.store.mutate(|doc| {
            doc.issues.retain(|issue| issue.id != id);
        })?;

        info!("event=issue_delete module=issue_service status=ok id={id}");
        Ok(())
    }

    /// Appends a batch of externally sourced issues in the order received.
    ///
    /// Each issue already carries a pre-assigned unique id from the import
    /// adapter. An empty batch mutates nothing and fires no notification.
    /// Returns the number of issues appended.
    pub fn import_issues(&mut self, batch: Vec<Issue>) -> IssueServiceResult<usize> {
        if batch.is_empty() {
            return Ok(0);
        }

        let count = batch.len();
        self.store.mutate(|doc| {
            doc.issues.extend(batch);
        })?;

        info!("event=issue_import module=issue_service status=ok count={count}");
        Ok(count)
    }

    /// Sets one facet of the issue list filter.
    ///
    /// Filters are UI state but persist with the document, so the change
    /// notifies and persists like any other mutation.
    pub fn set_filter(&mut self, change: FilterChange) -> IssueServiceResult<()> {
        self.store.mutate(|doc| match change {
            FilterChange::Priority(priority) => doc.filters.priority = priority,
            FilterChange::Search(search) => doc.filters.search = search,
        })?;
        Ok(())
    }

    /// Returns the issues passing the document's current filters, in board
    /// order. Pure read; recomputed on every call, no caching.
    pub fn filtered_issues(&self) -> Vec<Issue> {
        let doc = self.store.document();
        doc.issues
            .iter()
            .filter(|issue| doc.filters.matches(issue))
            .cloned()
            .collect()
    }

    /// Current filter state, for callers rendering filter controls.
    pub fn filters(&self) -> &Filters {
        &self.store.document().filters
    }
}
