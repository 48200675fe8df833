//! Collaborators the controller reads and writes.
//!
//! The controller never touches the terminal directly. It owns one value of
//! each of these and drives them; the terminal panels implement the traits
//! for the real UI and tests substitute fakes or mocks.

use crate::task::{Task, TaskId};

/// The free-text entry the user types new tasks into.
#[cfg_attr(test, mockall::automock)]
pub trait EntryField {
    fn value(&self) -> String;
    fn set_value(&mut self, value: &str);
    /// Ask the host to move input focus to this field.
    fn focus(&mut self);
}

/// The ordered display container holding one row per task.
#[cfg_attr(test, mockall::automock)]
pub trait RowContainer {
    fn append_row(&mut self, row: TaskRow);
    fn remove_row(&mut self, id: TaskId);
    fn set_row_completed(&mut self, id: TaskId, completed: bool);
}

/// What a single displayed row exposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub id: TaskId,
    pub label: String,
    /// Accessible label of the row's delete control.
    pub delete_label: String,
    pub completed: bool,
}

impl TaskRow {
    pub fn for_task(task: &Task) -> Self {
        Self {
            id: task.id,
            label: task.text.clone(),
            delete_label: delete_label(&task.text),
            completed: task.completed,
        }
    }
}

pub fn delete_label(text: &str) -> String {
    format!("Delete task: {text}")
}

/// The explicit submit control next to the entry field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitButton {
    pub label: String,
}

impl SubmitButton {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Default for SubmitButton {
    fn default() -> Self {
        Self::new("Add")
    }
}
