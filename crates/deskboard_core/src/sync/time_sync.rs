//! Current-date reconciliation against an external clock.
//!
//! # Responsibility
//! - Fetch "today" from a world-time endpoint.
//! - Fall back to the local device clock on any failure (silent degrade).
//! - Update the document's `current_date` only when it actually changed.
//!
//! # Invariants
//! - One fetch attempt per sync; no retry, no backoff.
//! - A failed fetch never surfaces to the caller as an error.

use crate::store::{DocumentSlot, Store, StoreResult};
use chrono::{Local, NaiveDate};
use log::{info, warn};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ClockResult<T> = Result<T, ClockError>;

/// Failure modes of an external clock fetch.
#[derive(Debug)]
pub enum ClockError {
    Network(String),
    Status(u16),
    InvalidBody(String),
}

impl Display for ClockError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network(message) => write!(f, "time source request failed: {message}"),
            Self::Status(code) => write!(f, "time source returned status {code}"),
            Self::InvalidBody(message) => write!(f, "time source body invalid: {message}"),
        }
    }
}

impl Error for ClockError {}

/// External source of the current calendar date.
pub trait ClockSource {
    fn fetch_today(&self) -> ClockResult<NaiveDate>;
}

#[derive(Debug, Deserialize)]
struct WorldTimePayload {
    /// RFC 3339 timestamp; only the leading date part is consumed.
    datetime: String,
}

/// Blocking HTTP clock source over a world-time JSON endpoint.
pub struct HttpClockSource {
    client: Client,
    endpoint: String,
}

impl HttpClockSource {
    pub const DEFAULT_ENDPOINT: &'static str = "https://worldtimeapi.org/api/ip";

    pub fn new() -> Self {
        Self::with_endpoint(Self::DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

impl Default for HttpClockSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockSource for HttpClockSource {
    fn fetch_today(&self) -> ClockResult<NaiveDate> {
        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .map_err(|err| ClockError::Network(err.to_string()))?;

        if !response.status().is_success() {
            return Err(ClockError::Status(response.status().as_u16()));
        }

        let payload: WorldTimePayload = response
            .json()
            .map_err(|err| ClockError::InvalidBody(err.to_string()))?;
        parse_datetime_date(&payload.datetime)
    }
}

fn parse_datetime_date(datetime: &str) -> ClockResult<NaiveDate> {
    let date_part = datetime
        .get(..10)
        .ok_or_else(|| ClockError::InvalidBody(format!("datetime too short: `{datetime}`")))?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| ClockError::InvalidBody(format!("unparseable datetime `{datetime}`")))
}

/// Where the synchronized date came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockOrigin {
    Remote,
    LocalFallback,
}

/// Outcome of one sync pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSyncReport {
    pub today: NaiveDate,
    pub origin: ClockOrigin,
    /// Whether the document's `current_date` was updated (and observers
    /// notified) by this pass.
    pub changed: bool,
}

/// Reconciles the document's `current_date` against a clock source.
pub struct TimeSyncService<C: ClockSource> {
    source: C,
}

impl<C: ClockSource> TimeSyncService<C> {
    pub fn new(source: C) -> Self {
        Self { source }
    }

    /// Runs one sync pass: fetch today's date, degrade silently to the
    /// local clock on failure, and update the document when the date
    /// differs. No notification fires when the date is unchanged.
    pub fn sync_now<S: DocumentSlot>(&self, store: &mut Store<S>) -> StoreResult<DateSyncReport> {
        let (today, origin) = match self.source.fetch_today() {
            Ok(date) => (date, ClockOrigin::Remote),
            Err(err) => {
                warn!("event=time_sync module=sync status=fallback error={err}");
                (Local::now().date_naive(), ClockOrigin::LocalFallback)
            }
        };

        if store.document().current_date == today {
            return Ok(DateSyncReport {
                today,
                origin,
                changed: false,
            });
        }

        store.mutate(|doc| doc.current_date = today)?;
        info!("event=time_sync module=sync status=ok date={today} origin={origin:?}");
        Ok(DateSyncReport {
            today,
            origin,
            changed: true,
        })
    }
}
