use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use store::{NewTask, NewUser, Task, User};

use crate::backend::Backend;
use crate::error::{Error, Result};

/// A call received by [`MemoryBackend`], in arrival order.
#[derive(Clone, Debug, PartialEq)]
pub enum Request {
    FetchUserByEmail(String),
    FetchTasks(i64),
    CreateUser(NewUser),
    CreateTask(NewTask),
}

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    tasks: Vec<Task>,
    next_id: i64,
    requests: Vec<Request>,
    offline: bool,
    reject_next_task: Option<Option<String>>,
    reject_next_lookup: Option<Option<String>>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory Backend for testing and offline use.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        // A panic while holding the lock leaves plain data behind; keep using it.
        self.tables.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Insert a user row directly, returning it with its assigned id.
    pub fn seed_user(&self, email: &str, password_hash: &str) -> User {
        let mut t = self.tables();
        let user = User {
            id: t.next_id(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Some(Utc::now()),
            is_authenticated: false,
        };
        t.users.push(user.clone());
        user
    }

    /// Insert a task row directly, returning it with its assigned id.
    pub fn seed_task(&self, task: NewTask) -> Task {
        let mut t = self.tables();
        let task = Task {
            id: t.next_id(),
            description: task.description,
            priority: task.priority,
            id_user: task.id_user,
            created_at: Some(Utc::now()),
        };
        t.tasks.push(task.clone());
        task
    }

    /// Every request received so far.
    pub fn requests(&self) -> Vec<Request> {
        self.tables().requests.clone()
    }

    /// Task creations received so far.
    pub fn created_tasks(&self) -> Vec<NewTask> {
        self.tables()
            .requests
            .iter()
            .filter_map(|r| match r {
                Request::CreateTask(t) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    /// While offline every call fails with [`Error::Unavailable`].
    pub fn set_offline(&self, offline: bool) {
        self.tables().offline = offline;
    }

    /// Reject the next `create_task` with a 400 carrying `message`.
    pub fn reject_next_task(&self, message: Option<&str>) {
        self.tables().reject_next_task = Some(message.map(str::to_string));
    }

    /// Reject the next `fetch_user_by_email` with a 401 carrying `message`.
    pub fn reject_next_lookup(&self, message: Option<&str>) {
        self.tables().reject_next_lookup = Some(message.map(str::to_string));
    }

    fn record(&self, request: Request) -> Result<MutexGuard<'_, Tables>> {
        let mut t = self.tables();
        t.requests.push(request);
        if t.offline {
            return Err(Error::Unavailable("memory backend is offline".into()));
        }
        Ok(t)
    }
}

impl Backend for MemoryBackend {
    async fn fetch_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let mut t = self.record(Request::FetchUserByEmail(email.to_string()))?;
        if let Some(message) = t.reject_next_lookup.take() {
            return Err(Error::Rejected {
                status: 401,
                message,
            });
        }
        Ok(t.users.iter().find(|u| u.email == email).cloned())
    }

    async fn fetch_tasks(&self, user_id: i64) -> Result<Vec<Task>> {
        let t = self.record(Request::FetchTasks(user_id))?;
        Ok(t.tasks
            .iter()
            .filter(|task| task.id_user == user_id)
            .cloned()
            .collect())
    }

    async fn create_user(&self, user: &NewUser) -> Result<()> {
        let mut t = self.record(Request::CreateUser(user.clone()))?;
        if t.users.iter().any(|u| u.email == user.email) {
            return Err(Error::Rejected {
                status: 409,
                message: Some(format!("duplicate key value: email {}", user.email)),
            });
        }
        let id = t.next_id();
        t.users.push(User {
            id,
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            created_at: Some(Utc::now()),
            is_authenticated: false,
        });
        Ok(())
    }

    async fn create_task(&self, task: &NewTask) -> Result<()> {
        let mut t = self.record(Request::CreateTask(task.clone()))?;
        if let Some(message) = t.reject_next_task.take() {
            return Err(Error::Rejected {
                status: 400,
                message,
            });
        }
        let id = t.next_id();
        t.tasks.push(Task {
            id,
            description: task.description.clone(),
            priority: task.priority,
            id_user: task.id_user,
            created_at: Some(Utc::now()),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::Priority;

    #[tokio::test]
    async fn test_user_roundtrip() {
        let backend = MemoryBackend::new();
        assert!(backend.fetch_user_by_email("ana@example.com").await.unwrap().is_none());

        backend
            .create_user(&NewUser {
                email: "ana@example.com".into(),
                password_hash: "pw".into(),
            })
            .await
            .unwrap();

        let user = backend.fetch_user_by_email("ana@example.com").await.unwrap().unwrap();
        assert_eq!(user.password_hash, "pw");
        assert!(user.created_at.is_some());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let backend = MemoryBackend::new();
        backend.seed_user("ana@example.com", "pw");
        let err = backend
            .create_user(&NewUser {
                email: "ana@example.com".into(),
                password_hash: "other".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Rejected { status: 409, .. }));
    }

    #[tokio::test]
    async fn test_tasks_scoped_to_user() {
        let backend = MemoryBackend::new();
        for (user, desc) in [(1, "a"), (2, "b"), (1, "c")] {
            backend
                .create_task(&NewTask {
                    description: desc.into(),
                    priority: Priority::High,
                    id_user: user,
                })
                .await
                .unwrap();
        }
        let tasks = backend.fetch_tasks(1).await.unwrap();
        assert_eq!(
            tasks.iter().map(|t| t.description.as_str()).collect::<Vec<_>>(),
            vec!["a", "c"]
        );
    }

    #[tokio::test]
    async fn test_offline_and_rejection() {
        let backend = MemoryBackend::new();
        let body = NewTask {
            description: "x".into(),
            priority: Priority::Low,
            id_user: 1,
        };

        backend.reject_next_task(None);
        let err = backend.create_task(&body).await.unwrap_err();
        assert!(matches!(err, Error::Rejected { status: 400, message: None }));
        backend.create_task(&body).await.unwrap();

        backend.reject_next_lookup(Some("Invalid API key"));
        let err = backend.fetch_user_by_email("ana@example.com").await.unwrap_err();
        assert_eq!(err.server_message(), Some("Invalid API key"));
        assert!(backend.fetch_user_by_email("ana@example.com").await.unwrap().is_none());

        backend.set_offline(true);
        assert!(matches!(
            backend.fetch_tasks(1).await,
            Err(Error::Unavailable(_))
        ));
        assert_eq!(backend.requests().len(), 5);
        assert_eq!(backend.created_tasks().len(), 2);
    }
}
