//! Profile tab: a read-only summary derived from the session and task stores.

use store::{format_timestamp, SessionStore, TaskStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSummary {
    pub email: String,
    pub display_name: String,
    /// Formatted account creation time; empty when the backend sent none.
    pub member_since: String,
    pub task_count: usize,
}

impl ProfileSummary {
    pub fn from_stores(session: &SessionStore, tasks: &TaskStore) -> Self {
        let user = session.user();
        Self {
            display_name: user.display_name().to_string(),
            member_since: user.created_at.map(format_timestamp).unwrap_or_default(),
            email: user.email,
            task_count: tasks.len(),
        }
    }
}
