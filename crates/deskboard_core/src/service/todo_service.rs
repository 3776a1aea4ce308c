//! Daily todo use-case service.
//!
//! # Responsibility
//! - Provide create/toggle/delete/read APIs over date-bucketed todos.
//!
//! # Invariants
//! - A todo never moves between date buckets.
//! - Reads never create a bucket; an emptied bucket keeps its key.
//! - A lookup miss mutates nothing and fires no notification.

use crate::model::todo::{Todo, TodoId};
use crate::store::{DocumentSlot, Store, StoreError};
use chrono::NaiveDate;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type TodoServiceResult<T> = Result<T, TodoServiceError>;

/// Service error for todo use-cases.
#[derive(Debug)]
pub enum TodoServiceError {
    /// Text is empty after trimming.
    EmptyText,
    /// No todo with this id exists under this date bucket.
    TodoNotFound { id: TodoId, date: NaiveDate },
    /// Persistence-layer failure.
    Store(StoreError),
}

impl Display for TodoServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "todo text cannot be empty"),
            Self::TodoNotFound { id, date } => {
                write!(f, "todo not found: {id} under {date}")
            }
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TodoServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::EmptyText | Self::TodoNotFound { .. } => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<StoreError> for TodoServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Use-case service over the document's date-bucketed todos.
pub struct TodoService<'a, S: DocumentSlot> {
    store: &'a mut Store<S>,
}

impl<'a, S: DocumentSlot> TodoService<'a, S> {
    pub fn new(store: &'a mut Store<S>) -> Self {
        Self { store }
    }

    /// Appends a todo with the trimmed `text` to the bucket for `date`,
    /// creating the bucket if absent. Returns the created todo id.
    pub fn add_todo(&mut self, text: &str, date: NaiveDate) -> TodoServiceResult<TodoId> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TodoServiceError::EmptyText);
        }

        let todo = Todo::new(text);
        let id = todo.id;
        self.store.mutate(|doc| {
            doc.todos.entry(date).or_default().push(todo);
        })?;

        info!("event=todo_add module=todo_service status=ok id={id} date={date}");
        Ok(id)
    }

    /// Flips `completed` on the matching todo within that date's bucket.
    ///
    /// # Errors
    /// - `TodoNotFound` when the bucket or the id is absent; no
    ///   notification fires.
    pub fn toggle_todo(&mut self, id: TodoId, date: NaiveDate) -> TodoServiceResult<()> {
        if !self.contains(id, date) {
            return Err(TodoServiceError::TodoNotFound { id, date });
        }

        self.store.mutate(|doc| {
            if let Some(bucket) = doc.todos.get_mut(&date) {
                if let Some(todo) = bucket.iter_mut().find(|todo| todo.id == id) {
                    todo.toggle();
                }
            }
        })?;

        info!("event=todo_toggle module=todo_service status=ok id={id} date={date}");
        Ok(())
    }

    /// Removes the matching todo from that date's bucket. The bucket keeps
    /// its key even when emptied.
    ///
    /// # Errors
    /// - `TodoNotFound` when the bucket or the id is absent; no
    ///   notification fires.
    pub fn delete_todo(&mut self, id: TodoId, date: NaiveDate) -> TodoServiceResult<()> {
        if !self.contains(id, date) {
            return Err(TodoServiceError::TodoNotFound { id, date });
        }

        self.store.mutate(|doc| {
            if let Some(bucket) = doc.todos.get_mut(&date) {
                bucket.retain(|todo| todo.id != id);
            }
        })?;

        info!("event=todo_delete module=todo_service status=ok id={id} date={date}");
        Ok(())
    }

    /// Returns the bucket for `date`, or an empty slice when the date has
    /// no bucket. Pure read; never creates a bucket.
    pub fn todos_for_date(&self, date: NaiveDate) -> &[Todo] {
        self.store.document().todos_for(date)
    }

    fn contains(&self, id: TodoId, date: NaiveDate) -> bool {
        self.store
            .document()
            .todos_for(date)
            .iter()
            .any(|todo| todo.id == id)
    }
}
