//! # Session store: the signed-in user
//!
//! [`SessionStore`] holds exactly one [`User`]: either the record of whoever logged
//! in, or [`User::default()`] when nobody has. It has two mutation entry points,
//! [`set_user`](SessionStore::set_user) (full replace) and
//! [`logout`](SessionStore::logout) (reset to the default), and never patches
//! individual fields.
//!
//! The store is a cheap-to-clone handle over a [`tokio::sync::watch`] channel. Build
//! one per app and hand clones to whatever needs it; views that want to react to
//! login/logout call [`subscribe`](SessionStore::subscribe) and await `changed()`.

use std::sync::Arc;

use tokio::sync::watch;

use crate::models::User;

/// Shared handle to the current session.
#[derive(Clone, Debug)]
pub struct SessionStore {
    user: Arc<watch::Sender<User>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// A store with nobody signed in.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(User::default());
        Self { user: Arc::new(tx) }
    }

    /// Snapshot of the current user.
    pub fn user(&self) -> User {
        self.user.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.borrow().is_authenticated
    }

    /// Replace the session user wholesale.
    pub fn set_user(&self, user: User) {
        tracing::info!(user_id = user.id, "session user set");
        self.user.send_replace(user);
    }

    /// Reset to the signed-out default.
    pub fn logout(&self) {
        tracing::info!("session cleared");
        self.user.send_replace(User::default());
    }

    /// Receiver that observes every replace.
    pub fn subscribe(&self) -> watch::Receiver<User> {
        self.user.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ana() -> User {
        User {
            id: 7,
            email: "ana@example.com".into(),
            password_hash: "secret".into(),
            created_at: None,
            is_authenticated: true,
        }
    }

    #[test]
    fn test_starts_signed_out() {
        let store = SessionStore::new();
        assert_eq!(store.user(), User::default());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_set_user_replaces_whole_record() {
        let store = SessionStore::new();
        store.set_user(ana());
        assert_eq!(store.user(), ana());
        assert!(store.is_authenticated());

        let other = User {
            id: 9,
            email: "bo@example.com".into(),
            ..User::default()
        };
        store.set_user(other.clone());
        assert_eq!(store.user(), other);
    }

    #[test]
    fn test_logout_resets_regardless_of_content() {
        let store = SessionStore::new();
        store.logout();
        assert_eq!(store.user(), User::default());

        store.set_user(ana());
        store.logout();
        assert_eq!(store.user(), User::default());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_clones_share_state() {
        let store = SessionStore::new();
        let view = store.clone();
        store.set_user(ana());
        assert_eq!(view.user().id, 7);
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let store = SessionStore::new();
        let mut rx = store.subscribe();

        store.set_user(ana());
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_authenticated);

        store.logout();
        rx.changed().await.unwrap();
        assert!(!rx.borrow_and_update().is_authenticated);
    }
}
