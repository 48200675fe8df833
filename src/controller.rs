use crossterm::event::{KeyCode, KeyEvent};
use tracing::debug;

use crate::events::{self, Dispatch, Propagation, Target};
use crate::surface::{EntryField, RowContainer, SubmitButton, TaskRow};
use crate::task::TaskId;
use crate::task_list::TaskList;
use crate::util::KeyHandleResult;

/// Key that submits the entry field's contents, same as the submit control.
pub const COMMIT_KEY: KeyCode = KeyCode::Enter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Added(TaskId),
    /// Blank input. Nothing was created; the entry field was refocused.
    Rejected,
}

/// Owns the task list and the three UI collaborators, and turns user
/// gestures into list changes mirrored onto the display container.
pub struct TaskListController<E, C> {
    tasks: TaskList,
    entry: E,
    submit: SubmitButton,
    container: C,
}

impl<E: EntryField, C: RowContainer> TaskListController<E, C> {
    pub fn new(entry: E, submit: SubmitButton, container: C) -> Self {
        Self {
            tasks: TaskList::new(),
            entry,
            submit,
            container,
        }
    }

    /// Trim `raw_text` and append it as a new task. Blank input is rejected
    /// silently apart from refocusing the entry field.
    pub fn submit_task(&mut self, raw_text: &str) -> SubmitOutcome {
        let text = raw_text.trim();
        if text.is_empty() {
            debug!("rejected blank submission");
            self.entry.focus();
            return SubmitOutcome::Rejected;
        }

        let id = self.tasks.push(text.to_string());
        if let Some(task) = self.tasks.get(id) {
            self.container.append_row(TaskRow::for_task(task));
        }
        self.entry.set_value("");
        self.entry.focus();
        debug!(%id, len = self.tasks.len(), "task added");
        SubmitOutcome::Added(id)
    }

    /// Submit whatever is currently in the entry field.
    pub fn submit_from_entry(&mut self) -> SubmitOutcome {
        let raw = self.entry.value();
        self.submit_task(&raw)
    }

    pub fn toggle_completion(&mut self, id: TaskId) {
        if let Some(completed) = self.tasks.toggle(id) {
            self.container.set_row_completed(id, completed);
            debug!(%id, completed, "task toggled");
        }
    }

    pub fn delete_task(&mut self, id: TaskId) {
        if self.tasks.remove(id).is_some() {
            self.container.remove_row(id);
            debug!(%id, len = self.tasks.len(), "task deleted");
        }
    }

    /// Intercept the commit key while the entry field has focus. Every
    /// other key is left to the field's own editing.
    pub fn on_entry_key(&mut self, key: KeyEvent) -> KeyHandleResult {
        if key.code == COMMIT_KEY {
            self.submit_from_entry();
            KeyHandleResult::Consumed
        } else {
            KeyHandleResult::Ignored
        }
    }

    /// Deliver a click or activation to `target`, innermost element first.
    /// A delete control consumes the gesture so its row never toggles.
    pub fn click(&mut self, target: Target) -> Dispatch {
        events::dispatch(target, |node| self.handle_click(node))
    }

    fn handle_click(&mut self, node: Target) -> Propagation {
        match node {
            Target::Entry => {
                self.entry.focus();
                Propagation::Stop
            }
            Target::SubmitButton => {
                self.submit_from_entry();
                Propagation::Stop
            }
            Target::Row(id) => {
                self.toggle_completion(id);
                Propagation::Continue
            }
            Target::DeleteButton(id) => {
                self.delete_task(id);
                Propagation::Stop
            }
        }
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn entry(&self) -> &E {
        &self.entry
    }

    pub fn entry_mut(&mut self) -> &mut E {
        &mut self.entry
    }

    pub fn submit_button(&self) -> &SubmitButton {
        &self.submit
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut C {
        &mut self.container
    }
}
