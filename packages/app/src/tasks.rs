//! # Task sync flow
//!
//! [`TaskSyncFlow`] keeps the [`TaskStore`] in step with the backend for the
//! session user.
//!
//! - [`load_tasks`](TaskSyncFlow::load_tasks) runs when the task screen mounts. The
//!   fetched list replaces the store only when it differs from what is cached. A
//!   failed fetch is logged and otherwise ignored: the screen keeps whatever list
//!   it had.
//! - [`create_task`](TaskSyncFlow::create_task) validates the inputs locally, then
//!   posts the task. It does not touch the store; the new row shows up on the next
//!   `load_tasks`.
//! - [`submit`](TaskSyncFlow::submit) drives `create_task` from a [`TaskForm`] and
//!   clears and closes the form on success.

use std::sync::Arc;

use api::Backend;
use store::{filter_by_priority, NewTask, Priority, Task, TaskStore};

use crate::error::TaskError;
use crate::forms::TaskForm;
use crate::loading::LoadingFlag;

pub const MISSING_FIELDS: &str = "Please fill in all fields.";

pub struct TaskSyncFlow<B> {
    backend: Arc<B>,
    tasks: TaskStore,
    loading: LoadingFlag,
}

impl<B: Backend> TaskSyncFlow<B> {
    pub fn new(backend: Arc<B>, tasks: TaskStore) -> Self {
        Self {
            backend,
            tasks,
            loading: LoadingFlag::new(),
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.tasks
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    /// Fetch the user's tasks and replace the cached list if it changed.
    /// Returns whether the store was written.
    pub async fn load_tasks(&self, user_id: i64) -> bool {
        let _loading = self.loading.start();

        match self.backend.fetch_tasks(user_id).await {
            Ok(fetched) if fetched != self.tasks.tasks() => {
                tracing::debug!(user_id, count = fetched.len(), "task list changed");
                self.tasks.set_tasks(fetched);
                true
            }
            Ok(_) => false,
            Err(e) => {
                tracing::error!(user_id, error = %e, "error fetching tasks");
                false
            }
        }
    }

    /// Create a task for `user_id`. Both fields are required; nothing is sent otherwise.
    pub async fn create_task(
        &self,
        description: &str,
        priority: Option<Priority>,
        user_id: i64,
    ) -> Result<(), TaskError> {
        let Some(priority) = priority.filter(|_| !description.is_empty()) else {
            return Err(TaskError::Validation(MISSING_FIELDS.into()));
        };

        let body = NewTask {
            description: description.to_string(),
            priority,
            id_user: user_id,
        };
        self.backend.create_task(&body).await.map_err(|e| {
            let e = TaskError::from(e);
            if matches!(e, TaskError::Unexpected(_)) {
                tracing::error!(error = %e, "error creating task");
            }
            e
        })
    }

    /// Submit the create-task form. On success the form is cleared and closed; on
    /// failure it is left as is so the user can correct it.
    pub async fn submit(&self, form: &mut TaskForm, user_id: i64) -> Result<(), TaskError> {
        self.create_task(&form.description, form.priority, user_id)
            .await?;
        form.reset();
        Ok(())
    }

    /// The cached list, optionally narrowed to one priority.
    pub fn visible_tasks(&self, filter: Option<Priority>) -> Vec<Task> {
        filter_by_priority(&self.tasks.tasks(), filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{MemoryBackend, Request};
    use crate::error::CREATE_TASK_FAILED;

    fn setup() -> (MemoryBackend, TaskSyncFlow<MemoryBackend>) {
        let backend = MemoryBackend::new();
        let flow = TaskSyncFlow::new(Arc::new(backend.clone()), TaskStore::new());
        (backend, flow)
    }

    fn seed(backend: &MemoryBackend, user: i64, description: &str, priority: Priority) {
        backend.seed_task(NewTask {
            description: description.into(),
            priority,
            id_user: user,
        });
    }

    #[tokio::test]
    async fn test_load_replaces_only_on_change() {
        let (backend, flow) = setup();
        seed(&backend, 1, "a", Priority::High);
        seed(&backend, 2, "other user", Priority::Low);

        assert!(flow.load_tasks(1).await);
        assert_eq!(flow.store().len(), 1);

        // Same data again: no write
        let mut rx = flow.store().subscribe();
        rx.mark_unchanged();
        assert!(!flow.load_tasks(1).await);
        assert!(!rx.has_changed().unwrap());

        seed(&backend, 1, "b", Priority::Medium);
        assert!(flow.load_tasks(1).await);
        assert_eq!(flow.store().len(), 2);
        assert!(!flow.is_loading());
    }

    #[tokio::test]
    async fn test_load_failure_keeps_stale_list() {
        let (backend, flow) = setup();
        seed(&backend, 1, "a", Priority::High);
        flow.load_tasks(1).await;

        backend.set_offline(true);
        assert!(!flow.load_tasks(1).await);
        assert_eq!(flow.store().len(), 1);
        assert!(!flow.is_loading());
    }

    #[tokio::test]
    async fn test_create_task_validation_skips_network() {
        let (backend, flow) = setup();

        for (description, priority) in [("", Some(Priority::High)), ("Buy milk", None), ("", None)] {
            let err = flow.create_task(description, priority, 1).await.unwrap_err();
            assert_eq!(err, TaskError::Validation(MISSING_FIELDS.into()));
        }
        assert!(backend.requests().is_empty());
    }

    #[tokio::test]
    async fn test_create_task_does_not_touch_store() {
        let (backend, flow) = setup();

        flow.create_task("Buy milk", Some(Priority::Medium), 1).await.unwrap();
        flow.create_task("Buy milk", Some(Priority::Medium), 1).await.unwrap();

        assert!(flow.store().is_empty());
        let created = backend.created_tasks();
        assert_eq!(created.len(), 2);
        assert_eq!(created[0], created[1]);
        assert_eq!(
            created[0],
            NewTask {
                description: "Buy milk".into(),
                priority: Priority::Medium,
                id_user: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_rejection_without_message_uses_fallback() {
        let (backend, flow) = setup();
        backend.reject_next_task(None);

        let err = flow.create_task("x", Some(Priority::Low), 1).await.unwrap_err();
        assert_eq!(err, TaskError::Api(CREATE_TASK_FAILED.into()));
    }

    #[tokio::test]
    async fn test_rejection_keeps_server_message() {
        let (backend, flow) = setup();
        backend.reject_next_task(Some("new row violates row-level security policy"));

        let err = flow.create_task("x", Some(Priority::Low), 1).await.unwrap_err();
        assert_eq!(err.to_string(), "new row violates row-level security policy");
    }

    #[tokio::test]
    async fn test_network_failure_is_unexpected() {
        let (backend, flow) = setup();
        backend.set_offline(true);

        let err = flow.create_task("x", Some(Priority::Low), 1).await.unwrap_err();
        assert!(matches!(err, TaskError::Unexpected(_)));
    }

    #[tokio::test]
    async fn test_submit_clears_form_on_success_only() {
        let (backend, flow) = setup();
        let mut form = TaskForm::default();
        form.open();
        form.description = "Buy milk".into();
        form.priority = Some(Priority::High);

        backend.reject_next_task(Some("nope"));
        assert!(flow.submit(&mut form, 1).await.is_err());
        assert!(form.open);
        assert_eq!(form.description, "Buy milk");

        flow.submit(&mut form, 1).await.unwrap();
        assert_eq!(form, TaskForm::default());
        assert!(flow.store().is_empty());
        assert_eq!(
            backend.requests().iter().filter(|r| matches!(r, Request::CreateTask(_))).count(),
            2
        );
    }

    #[tokio::test]
    async fn test_visible_tasks_filter() {
        let (backend, flow) = setup();
        seed(&backend, 1, "h", Priority::High);
        seed(&backend, 1, "m", Priority::Medium);
        seed(&backend, 1, "l", Priority::Low);
        flow.load_tasks(1).await;

        let high = flow.visible_tasks(Some(Priority::High));
        assert_eq!(high.len(), 1);
        assert_eq!(high[0].description, "h");

        let all = flow.visible_tasks(None);
        assert_eq!(all, flow.store().tasks());
        assert_eq!(all.len(), 3);
    }
}
