//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate document mutations into use-case level APIs.
//! - Keep callers decoupled from storage and notification details.
//!
//! # Invariants
//! - Every mutation runs through `Store::mutate`; services never write to
//!   the slot directly.
//! - Lookup misses are reported as typed `NotFound` errors and fire no
//!   notification.

pub mod issue_service;
pub mod todo_service;
