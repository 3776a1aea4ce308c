//! Issue domain model.
//!
//! # Responsibility
//! - Define the kanban issue record and its priority/status vocabulary.
//! - Provide constructors that fix identity and `created_at` at creation.
//!
//! # Invariants
//! - `id` is stable and never reused for another issue.
//! - `status` is always one of the three board columns.
//! - `source_url` is present only for externally imported issues.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for an issue.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type IssueId = Uuid;

/// Urgency bucket shown on the board and targeted by the priority filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

/// Board column for an issue.
///
/// Serialized values use kebab-case to match the persisted document shape
/// (`open`, `in-progress`, `resolved`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueStatus {
    Open,
    InProgress,
    Resolved,
}

/// Canonical issue record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Stable id used for lookup, update and deletion.
    pub id: IssueId,
    pub title: String,
    /// May be empty; defaulted when a source record carries no body.
    #[serde(default)]
    pub description: String,
    pub priority: Priority,
    pub status: IssueStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Set once at creation and never patched afterwards.
    pub created_at: NaiveDate,
    /// Canonical web link of the external record this issue was imported
    /// from. `None` for locally created issues.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

impl Issue {
    /// Creates an issue with a generated stable id.
    ///
    /// # Invariants
    /// - `description` starts empty, `status` starts `Open`.
    /// - `due_date` and `source_url` start unset.
    pub fn new(title: impl Into<String>, priority: Priority, created_at: NaiveDate) -> Self {
        Self::with_id(Uuid::new_v4(), title, priority, created_at)
    }

    /// Creates an issue with a caller-provided stable id.
    ///
    /// Used by import paths where identity is assigned before the record
    /// reaches the issue list.
    pub fn with_id(
        id: IssueId,
        title: impl Into<String>,
        priority: Priority,
        created_at: NaiveDate,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            priority,
            status: IssueStatus::Open,
            due_date: None,
            created_at,
            source_url: None,
        }
    }

    /// Returns whether this issue originates from an external source.
    pub fn is_imported(&self) -> bool {
        self.source_url.is_some()
    }
}
