//! Persistent document store.
//!
//! # Responsibility
//! - Own the application Document and its subscriber registry.
//! - Funnel every mutation through a single mutate-then-notify-then-persist
//!   choke point.
//!
//! # Invariants
//! - The Document is written whole on every persist; there are no partial
//!   writes.
//! - Listeners are notified synchronously, in registration order, with the
//!   full current Document.
//! - Only `initialize` may silently recover from corrupt persisted input;
//!   every later persistence failure is a reported error.

use crate::db::DbError;
use crate::model::document::Document;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

mod slot;

pub use slot::{DocumentSlot, SqliteDocumentSlot};

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level error for slot access and document serialization.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Serialize(serde_json::Error),
    /// The connection has not been migrated to the schema this binary
    /// expects; the slot refuses to operate on it.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "document serialization failed: {err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Process-lifetime observer invoked with the full Document after every
/// mutation.
pub type Listener = Box<dyn FnMut(&Document)>;

/// Owner of the application Document.
///
/// Services borrow the store exclusively for the duration of one operation;
/// the `&mut` receiver on every mutating path is what makes interleaved
/// mutation and subscribe-during-notify unrepresentable.
pub struct Store<S: DocumentSlot> {
    slot: S,
    document: Document,
    listeners: Vec<Listener>,
}

impl<S: DocumentSlot> Store<S> {
    /// Loads the persisted document from `slot`, falling back to the
    /// canonical default on absence or on any deserialization failure, and
    /// concludes by persisting the result.
    ///
    /// Recovery policy: prefer a well-formed empty document over failing
    /// startup. This is the only silently-recovering operation in the store.
    pub fn initialize(slot: S) -> StoreResult<Self> {
        let document = match slot.load()? {
            Some(body) => match serde_json::from_str::<Document>(&body) {
                Ok(document) => {
                    info!(
                        "event=document_load module=store status=ok issues={} todo_dates={}",
                        document.issues.len(),
                        document.todos.len()
                    );
                    document
                }
                Err(err) => {
                    warn!("event=document_load module=store status=fallback error={err}");
                    Document::default()
                }
            },
            None => {
                info!("event=document_load module=store status=empty");
                Document::default()
            }
        };

        let store = Self {
            slot,
            document,
            listeners: Vec::new(),
        };
        store.persist()?;
        Ok(store)
    }

    /// Read access to the current document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Registers a process-lifetime listener.
    ///
    /// # Contract
    /// - Registration order defines notification order.
    /// - There is no unsubscribe; listeners live as long as the store.
    pub fn subscribe(&mut self, listener: impl FnMut(&Document) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Runs `mutator` against the document, then notifies and persists.
    ///
    /// This is the single mutation entry point: a mutator either runs to
    /// completion followed by notify-and-persist, or does not run at all.
    /// Callers must decide any not-found outcome before entering, since a
    /// completed mutator always notifies.
    pub fn mutate<T>(&mut self, mutator: impl FnOnce(&mut Document) -> T) -> StoreResult<T> {
        let value = mutator(&mut self.document);
        self.notify_and_persist()?;
        Ok(value)
    }

    fn notify_and_persist(&mut self) -> StoreResult<()> {
        for listener in &mut self.listeners {
            listener(&self.document);
        }
        self.persist()
    }

    fn persist(&self) -> StoreResult<()> {
        let body = serde_json::to_string(&self.document)?;
        self.slot.save(&body)
    }
}
