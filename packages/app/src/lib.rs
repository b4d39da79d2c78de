//! # App crate: client logic for the task app
//!
//! The screens of the app are thin; everything they do goes through this crate.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | [`AuthFlow`]: login, sign-up, logout; sole writer of the session |
//! | [`tasks`] | [`TaskSyncFlow`]: fetch-on-mount, create, priority filter |
//! | [`forms`] | Login, sign-up and create-task form state with email validation |
//! | [`profile`] | [`ProfileSummary`] derived from the stores |
//! | [`navigation`] | [`Route`] and the [`Navigator`] port |
//! | [`loading`] | Scoped `loading` flag shared by the flows |
//! | [`error`] | [`AuthError`] and [`TaskError`] |
//!
//! [`App`] wires one backend, one pair of stores and one navigator into both flows.

use std::sync::Arc;

use api::Backend;
use store::{SessionStore, TaskStore};

pub mod auth;
pub mod error;
pub mod forms;
pub mod loading;
pub mod navigation;
pub mod profile;
pub mod tasks;

pub use auth::{AuthFlow, AuthPhase};
pub use error::{AuthError, TaskError};
pub use forms::{validate_email, LoginForm, SignUpForm, TaskForm};
pub use navigation::{HistoryNavigator, HomeTab, Navigator, Route, TracingNavigator};
pub use profile::ProfileSummary;
pub use tasks::TaskSyncFlow;

/// The flows of one running app, sharing its stores.
pub struct App<B, N> {
    pub auth: AuthFlow<B, N>,
    pub tasks: TaskSyncFlow<B>,
    pub session: SessionStore,
}

impl<B: Backend, N: Navigator> App<B, N> {
    pub fn new(backend: B, navigator: N) -> Self {
        let backend = Arc::new(backend);
        let session = SessionStore::new();
        let task_store = TaskStore::new();
        Self {
            auth: AuthFlow::new(backend.clone(), session.clone(), task_store.clone(), navigator),
            tasks: TaskSyncFlow::new(backend, task_store),
            session,
        }
    }

    pub fn profile(&self) -> ProfileSummary {
        ProfileSummary::from_stores(&self.session, self.tasks.store())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::MemoryBackend;
    use store::Priority;

    #[tokio::test]
    async fn test_full_session() {
        let backend = MemoryBackend::new();
        let nav = HistoryNavigator::new();
        let app = App::new(backend.clone(), nav.clone());

        let user = app.auth.sign_up("ana@example.com", "pw").await.unwrap();
        assert_eq!(Route::Home(HomeTab::Tasks).guard(&app.session), Route::Home(HomeTab::Tasks));

        let mut form = TaskForm::default();
        form.open();
        form.description = "Water plants".into();
        form.priority = Some(Priority::Low);
        app.tasks.submit(&mut form, user.id).await.unwrap();

        // Not visible until the next fetch
        assert_eq!(app.profile().task_count, 0);
        app.tasks.load_tasks(user.id).await;
        assert_eq!(app.profile().task_count, 1);
        assert_eq!(app.profile().display_name, "ana");

        app.auth.logout();
        assert_eq!(app.profile().task_count, 0);
        assert_eq!(Route::Home(HomeTab::Profile).guard(&app.session), Route::Login);
        assert_eq!(nav.current(), Route::Launch);
    }
}
