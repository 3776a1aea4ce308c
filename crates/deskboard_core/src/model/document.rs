//! Application document: the single persisted state object.
//!
//! # Responsibility
//! - Hold issues, date-bucketed todos, theme, current date and view filters.
//! - Define the canonical default used whenever persisted state is absent
//!   or unreadable.
//!
//! # Invariants
//! - Issue order is creation/import order.
//! - Todo buckets are keyed by calendar date; a missing key and an empty
//!   bucket are equivalent for reads.
//! - Every field carries a serde default so documents written by older or
//!   newer builds merge field-by-field against the canonical default.

use crate::model::issue::{Issue, IssueId, Priority};
use crate::model::todo::Todo;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Date-keyed todo storage. Serializes as a JSON object with `YYYY-MM-DD`
/// keys.
pub type TodoBuckets = BTreeMap<NaiveDate, Vec<Todo>>;

/// Interface color scheme, persisted with the rest of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Priority facet of the issue list filter. `All` admits every issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityFilter {
    #[default]
    All,
    Low,
    Medium,
    High,
    Critical,
}

impl PriorityFilter {
    /// Returns whether an issue with the given priority passes this facet.
    pub fn admits(self, priority: Priority) -> bool {
        match self {
            Self::All => true,
            Self::Low => priority == Priority::Low,
            Self::Medium => priority == Priority::Medium,
            Self::High => priority == Priority::High,
            Self::Critical => priority == Priority::Critical,
        }
    }
}

/// Issue list view filter. UI state, but persisted alongside business data.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Filters {
    pub priority: PriorityFilter,
    /// Free text matched case-insensitively against title and description.
    /// Empty means no text constraint.
    pub search: String,
}

impl Filters {
    /// Returns whether `issue` passes both filter facets.
    ///
    /// # Contract
    /// - Priority facet: `All` or an exact priority match.
    /// - Search facet: empty search, or a case-insensitive substring match
    ///   on title or description.
    pub fn matches(&self, issue: &Issue) -> bool {
        if !self.priority.admits(issue.priority) {
            return false;
        }
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        issue.title.to_lowercase().contains(&needle)
            || issue.description.to_lowercase().contains(&needle)
    }
}

/// The entire application state, serialized whole on every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    pub issues: Vec<Issue>,
    pub todos: TodoBuckets,
    pub theme: Theme,
    /// The app's notion of "today", reconciled by the time sync service.
    pub current_date: NaiveDate,
    pub filters: Filters,
}

impl Default for Document {
    /// Canonical initial document: empty lists, light theme, local today,
    /// permissive filters.
    fn default() -> Self {
        Self {
            issues: Vec::new(),
            todos: TodoBuckets::new(),
            theme: Theme::Light,
            current_date: Local::now().date_naive(),
            filters: Filters::default(),
        }
    }
}

impl Document {
    /// Looks up an issue by id.
    pub fn issue(&self, id: IssueId) -> Option<&Issue> {
        self.issues.iter().find(|issue| issue.id == id)
    }

    /// Looks up an issue by id for in-place mutation.
    pub fn issue_mut(&mut self, id: IssueId) -> Option<&mut Issue> {
        self.issues.iter_mut().find(|issue| issue.id == id)
    }

    /// Returns the todo bucket for `date`, or an empty slice when the date
    /// has no bucket. Never creates a bucket as a read side effect.
    pub fn todos_for(&self, date: NaiveDate) -> &[Todo] {
        self.todos.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }
}
