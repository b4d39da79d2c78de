//! # Navigation port
//!
//! Screens are a closed set. Each transition is a [`Route`] value, and every flow
//! that moves the user somewhere does it through a single [`Navigator`] it was
//! given at construction time.
//!
//! | Route | Screen | Needs a session |
//! |-------|--------|-----------------|
//! | `Launch` | Landing page with login / sign-up choices | no |
//! | `Login` | Email + password form | no |
//! | `SignUp` | Registration form | no |
//! | `Home(HomeTab::Tasks)` | Task list tab | yes |
//! | `Home(HomeTab::Profile)` | Profile tab | yes |

use std::fmt;
use std::sync::{Arc, Mutex};

use store::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HomeTab {
    Tasks,
    Profile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Launch,
    Login,
    SignUp,
    Home(HomeTab),
}

impl Route {
    /// Where a fresh app start lands.
    pub const INITIAL: Route = Route::Launch;

    pub fn requires_session(self) -> bool {
        matches!(self, Route::Home(_))
    }

    /// Redirect to `Login` when the target needs a session and there is none.
    pub fn guard(self, session: &SessionStore) -> Route {
        if self.requires_session() && !session.is_authenticated() {
            Route::Login
        } else {
            self
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Launch => f.write_str("launch"),
            Route::Login => f.write_str("login"),
            Route::SignUp => f.write_str("sign-up"),
            Route::Home(HomeTab::Tasks) => f.write_str("home/tasks"),
            Route::Home(HomeTab::Profile) => f.write_str("home/profile"),
        }
    }
}

/// The one port through which flows change screens.
pub trait Navigator {
    fn navigate(&self, route: Route);
}

impl<N: Navigator + ?Sized> Navigator for Arc<N> {
    fn navigate(&self, route: Route) {
        (**self).navigate(route)
    }
}

/// Navigator for headless runs: logs each transition.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn navigate(&self, route: Route) {
        tracing::info!(%route, "navigate");
    }
}

/// Navigator that keeps the history of transitions, newest last.
#[derive(Debug, Clone, Default)]
pub struct HistoryNavigator {
    history: Arc<Mutex<Vec<Route>>>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<Route> {
        self.history
            .lock()
            .map(|h| h.clone())
            .unwrap_or_else(|e| e.into_inner().clone())
    }

    pub fn current(&self) -> Route {
        self.history().last().copied().unwrap_or(Route::INITIAL)
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&self, route: Route) {
        match self.history.lock() {
            Ok(mut h) => h.push(route),
            Err(e) => e.into_inner().push(route),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::User;

    #[test]
    fn test_guard_redirects_without_session() {
        let session = SessionStore::new();
        assert_eq!(Route::Home(HomeTab::Tasks).guard(&session), Route::Login);
        assert_eq!(Route::SignUp.guard(&session), Route::SignUp);

        session.set_user(User::default().authenticated());
        assert_eq!(
            Route::Home(HomeTab::Profile).guard(&session),
            Route::Home(HomeTab::Profile)
        );
    }

    #[test]
    fn test_history_navigator() {
        let nav = HistoryNavigator::new();
        assert_eq!(nav.current(), Route::Launch);
        nav.navigate(Route::Login);
        nav.navigate(Route::Home(HomeTab::Tasks));
        assert_eq!(nav.history(), vec![Route::Login, Route::Home(HomeTab::Tasks)]);
        assert_eq!(nav.current().to_string(), "home/tasks");
    }
}
