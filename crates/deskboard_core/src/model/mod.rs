//! Domain model for the DeskBoard document.
//!
//! # Responsibility
//! - Define the single serializable Document and its issue/todo records.
//! - Keep the persisted wire shape stable (camelCase fields, kebab-case
//!   status values) and forward-compatible via per-field defaults.
//!
//! # Invariants
//! - Every issue and todo is identified by a stable id assigned at creation.
//! - The Document is the sole unit of persistence; it round-trips through
//!   JSON without loss.

pub mod document;
pub mod issue;
pub mod todo;
