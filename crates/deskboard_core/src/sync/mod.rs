//! External boundary adapters.
//!
//! # Responsibility
//! - Reconcile the document's current date against an external clock.
//! - Translate third-party issue records into the internal issue shape.
//!
//! # Invariants
//! - Each adapter makes a single attempt per call; no retry or backoff.
//! - Adapter failures are typed errors or defined fallbacks, never panics.

pub mod github_import;
pub mod time_sync;
