//! External issue import adapter.
//!
//! # Responsibility
//! - Fetch open issues for one owner/repo from a GitHub-style endpoint.
//! - Map each remote record to the internal issue shape before it is handed
//!   to the issue service.
//!
//! # Invariants
//! - Mapped issues carry `status=Open`, `priority=Medium` and the record's
//!   canonical web link as `source_url`.
//! - Records representing pull requests are skipped; issues endpoints
//!   interleave them with real issues.
//! - Any transport, status or body failure surfaces as one human-readable
//!   `ImportError`.

use crate::model::issue::{Issue, IssueStatus, Priority};
use chrono::NaiveDate;
use log::info;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Fixed page size for one import fetch.
pub const IMPORT_PAGE_SIZE: u32 = 20;

const USER_AGENT_VALUE: &str = concat!("deskboard/", env!("CARGO_PKG_VERSION"));

pub type ImportResult<T> = Result<T, ImportError>;

/// Failure modes of an external issue fetch.
#[derive(Debug)]
pub enum ImportError {
    Network(String),
    Status(u16),
    InvalidBody(String),
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network(message) => write!(f, "issue source request failed: {message}"),
            Self::Status(code) => write!(f, "issue source returned status {code}"),
            Self::InvalidBody(message) => write!(f, "issue source body invalid: {message}"),
        }
    }
}

impl Error for ImportError {}

/// One record of a GitHub-style issues listing, reduced to the fields the
/// mapping consumes.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteIssue {
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub created_at: Option<String>,
    /// Present when the record is a pull request rather than an issue.
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

impl RemoteIssue {
    fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

/// Maps one remote record to an internal issue.
///
/// `fallback_date` is used as `created_at` when the record carries no
/// parseable creation timestamp.
pub fn map_remote_issue(record: RemoteIssue, fallback_date: NaiveDate) -> Issue {
    let created_at = record
        .created_at
        .as_deref()
        .and_then(|value| value.get(..10))
        .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
        .unwrap_or(fallback_date);

    Issue {
        id: Uuid::new_v4(),
        title: record.title,
        description: record.body.unwrap_or_default(),
        priority: Priority::Medium,
        status: IssueStatus::Open,
        due_date: None,
        created_at,
        source_url: Some(record.html_url),
    }
}

/// Maps a listing batch, skipping pull-request records, preserving order.
pub fn map_remote_issues(records: Vec<RemoteIssue>, fallback_date: NaiveDate) -> Vec<Issue> {
    records
        .into_iter()
        .filter(|record| !record.is_pull_request())
        .map(|record| map_remote_issue(record, fallback_date))
        .collect()
}

/// Blocking HTTP source for one owner/repo issue listing.
pub struct GithubIssueSource {
    client: Client,
    api_base: String,
    owner: String,
    repo: String,
}

impl GithubIssueSource {
    pub const DEFAULT_API_BASE: &'static str = "https://api.github.com";

    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self::with_api_base(Self::DEFAULT_API_BASE, owner, repo)
    }

    pub fn with_api_base(
        api_base: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.into(),
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    fn issues_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/issues?state=open&per_page={IMPORT_PAGE_SIZE}",
            self.api_base, self.owner, self.repo
        )
    }

    /// Fetches one page of open issues and maps them to internal issues.
    ///
    /// Single attempt; callers decide whether and when to retry.
    pub fn fetch_open_issues(&self, fallback_date: NaiveDate) -> ImportResult<Vec<Issue>> {
        let response = self
            .client
            .get(self.issues_url())
            .header(USER_AGENT, USER_AGENT_VALUE)
            .header(ACCEPT, "application/vnd.github+json")
            .send()
            .map_err(|err| ImportError::Network(err.to_string()))?;

        if !response.status().is_success() {
            return Err(ImportError::Status(response.status().as_u16()));
        }

        let records: Vec<RemoteIssue> = response
            .json()
            .map_err(|err| ImportError::InvalidBody(err.to_string()))?;

        let issues = map_remote_issues(records, fallback_date);
        info!(
            "event=issue_fetch module=sync status=ok owner={} repo={} count={}",
            self.owner,
            self.repo,
            issues.len()
        );
        Ok(issues)
    }
}
