//! Task store: the most recently fetched task list for the session user.

use std::sync::Arc;

use tokio::sync::watch;

use crate::models::Task;

/// Shared handle to the cached task list. Writes always replace the whole list.
#[derive(Clone, Debug)]
pub struct TaskStore {
    tasks: Arc<watch::Sender<Vec<Task>>>,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Vec::new());
        Self { tasks: Arc::new(tx) }
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.tasks.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.tasks.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.borrow().is_empty()
    }

    pub fn set_tasks(&self, tasks: Vec<Task>) {
        tracing::debug!(count = tasks.len(), "task list replaced");
        self.tasks.send_replace(tasks);
    }

    pub fn clear(&self) {
        self.set_tasks(Vec::new());
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Task>> {
        self.tasks.subscribe()
    }
}
