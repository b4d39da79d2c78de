//! # Auth flow: login, sign-up and logout
//!
//! [`AuthFlow`] is the only writer of the [`SessionStore`]. A call moves the flow
//! through `Idle → Pending → Authenticated | Failed`; the next call starts again
//! from `Pending`. Each call is a single attempt with no retry.
//!
//! ## Login
//!
//! 1. Look the user up by email through the [`Backend`].
//! 2. No row → [`AuthError::InvalidCredentials`]. A rejected lookup surfaces the
//!    server's message as [`AuthError::Api`].
//! 3. Compare the supplied password with the stored `password_hash` by plain
//!    equality. The backend stores whatever sign-up sent, so this is a string compare.
//! 4. On a match, store the record with `is_authenticated = true` and navigate to
//!    the task tab.
//!
//! ## Sign-up
//!
//! Create the user row, then run login with the same credentials. A failure in
//! either step is returned as one error.
//!
//! ## Logout
//!
//! Reset the session, drop the cached tasks of the previous user, and go back to
//! the launch screen.

use std::sync::{Arc, Mutex};

use api::Backend;
use store::{NewUser, SessionStore, TaskStore, User};

use crate::error::AuthError;
use crate::loading::LoadingFlag;
use crate::navigation::{HomeTab, Navigator, Route};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthPhase {
    #[default]
    Idle,
    Pending,
    Authenticated,
    Failed(AuthError),
}

pub struct AuthFlow<B, N> {
    backend: Arc<B>,
    session: SessionStore,
    tasks: TaskStore,
    navigator: N,
    loading: LoadingFlag,
    phase: Mutex<AuthPhase>,
}

impl<B: Backend, N: Navigator> AuthFlow<B, N> {
    pub fn new(backend: Arc<B>, session: SessionStore, tasks: TaskStore, navigator: N) -> Self {
        Self {
            backend,
            session,
            tasks,
            navigator,
            loading: LoadingFlag::new(),
            phase: Mutex::new(AuthPhase::Idle),
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// True only while a login or sign-up is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    pub fn phase(&self) -> AuthPhase {
        match self.phase.lock() {
            Ok(p) => p.clone(),
            Err(e) => e.into_inner().clone(),
        }
    }

    fn set_phase(&self, phase: AuthPhase) {
        match self.phase.lock() {
            Ok(mut p) => *p = phase,
            Err(e) => *e.into_inner() = phase,
        }
    }

    /// Log in with email and password.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let result = {
            let _loading = self.loading.start();
            self.set_phase(AuthPhase::Pending);
            self.authenticate(email.trim(), password).await
        };
        match &result {
            Ok(user) => {
                tracing::info!(user_id = user.id, "login succeeded");
                self.session.set_user(user.clone());
                self.set_phase(AuthPhase::Authenticated);
                self.navigator.navigate(Route::Home(HomeTab::Tasks));
            }
            Err(e) => {
                tracing::warn!(error = %e, "login failed");
                self.set_phase(AuthPhase::Failed(e.clone()));
            }
        }
        result
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let user = self
            .backend
            .fetch_user_by_email(email)
            .await
            .map_err(AuthError::from_login)?
            .ok_or(AuthError::InvalidCredentials)?;

        if user.password_hash != password {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(user.authenticated())
    }

    /// Create an account, then log into it.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::Validation("Please fill in all fields.".into()));
        }

        {
            let _loading = self.loading.start();
            self.set_phase(AuthPhase::Pending);
            let created = self
                .backend
                .create_user(&NewUser {
                    email: email.to_string(),
                    password_hash: password.to_string(),
                })
                .await
                .map_err(AuthError::from_sign_up);
            if let Err(e) = created {
                tracing::warn!(error = %e, "sign-up failed");
                self.set_phase(AuthPhase::Failed(e.clone()));
                return Err(e);
            }
            tracing::info!("user created");
        }

        self.login(email, password).await
    }

    /// End the session and return to the launch screen.
    pub fn logout(&self) {
        self.session.logout();
        self.tasks.clear();
        self.set_phase(AuthPhase::Idle);
        self.navigator.navigate(Route::Launch);
    }
}
