//! # Backend: the data access port
//!
//! Every flow in the app talks to the remote tables through the [`Backend`] trait.
//! It covers exactly the four calls the client makes; there is no update or delete,
//! no pagination and no retry. Implementations:
//!
//! | Type | Used for |
//! |------|----------|
//! | [`crate::RestClient`] | The real REST endpoints (`/Users`, `/Tasks`). |
//! | [`crate::MemoryBackend`] | Tests and offline demos. |

use std::future::Future;

use store::{NewTask, NewUser, Task, User};

use crate::error::Result;

/// Async access to the `Users` and `Tasks` tables.
pub trait Backend {
    /// Look up a user by email. The table returns at most one row; `None` when empty.
    fn fetch_user_by_email(&self, email: &str) -> impl Future<Output = Result<Option<User>>>;

    /// All tasks owned by `user_id`, in the order the backend returns them.
    fn fetch_tasks(&self, user_id: i64) -> impl Future<Output = Result<Vec<Task>>>;

    /// Insert a user row. Succeeds only when the backend reports it as created.
    fn create_user(&self, user: &NewUser) -> impl Future<Output = Result<()>>;

    /// Insert a task row. Succeeds only when the backend reports it as created.
    fn create_task(&self, task: &NewTask) -> impl Future<Output = Result<()>>;
}
