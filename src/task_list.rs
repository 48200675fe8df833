use crate::task::{Task, TaskId};

/// Ordered in-memory collection of tasks. Insertion order is display order.
#[derive(Debug, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
    next_id: u64,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new incomplete task and return its id.
    pub fn push(&mut self, text: String) -> TaskId {
        self.next_id += 1;
        let id = TaskId::new(self.next_id);
        self.tasks.push(Task::new(id, text));
        id
    }

    /// Toggle a task's completion. Returns the new state, or `None` if the
    /// id is not in the list.
    pub fn toggle(&mut self, id: TaskId) -> Option<bool> {
        self.tasks.iter_mut().find(|t| t.id == id).map(Task::toggle)
    }

    pub fn remove(&mut self, id: TaskId) -> Option<Task> {
        let index = self.position(id)?;
        Some(self.tasks.remove(index))
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    pub fn id_at(&self, index: usize) -> Option<TaskId> {
        self.tasks.get(index).map(|t| t.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }
}
