//! Daily todo domain model.
//!
//! # Invariants
//! - `id` is stable and never reused for another todo.
//! - A todo lives in exactly one date bucket for its whole lifetime.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a todo entry.
pub type TodoId = Uuid;

/// One entry of a daily todo bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    /// Non-empty at creation; the service trims caller input.
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

impl Todo {
    /// Creates an open todo with a generated stable id.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            completed: false,
        }
    }

    /// Flips the completion flag in place.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}
