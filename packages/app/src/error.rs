//! User-facing errors raised by the auth and task flows.
//!
//! Transport failures from [`api::Error`] are folded into two buckets: a
//! rejection with a server message becomes `Api`, anything else (network,
//! decoding, an unreachable backend) becomes `Unexpected`.

/// Message shown for a failed login, whatever the cause.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
pub const CREATE_TASK_FAILED: &str = "Failed to create task";
pub const CREATE_USER_FAILED: &str = "Failed to create user";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("{0}")]
    Api(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Api(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

impl AuthError {
    fn from_api(e: api::Error, fallback: &str) -> Self {
        if e.is_rejection() {
            AuthError::Api(e.server_message().unwrap_or(fallback).to_string())
        } else {
            AuthError::Unexpected(e.to_string())
        }
    }

    /// Map a failed user lookup.
    pub(crate) fn from_login(e: api::Error) -> Self {
        Self::from_api(e, INVALID_CREDENTIALS)
    }

    /// Map a failed `create_user` call.
    pub(crate) fn from_sign_up(e: api::Error) -> Self {
        Self::from_api(e, CREATE_USER_FAILED)
    }
}

impl From<api::Error> for TaskError {
    fn from(e: api::Error) -> Self {
        if e.is_rejection() {
            TaskError::Api(e.server_message().unwrap_or(CREATE_TASK_FAILED).to_string())
        } else {
            TaskError::Unexpected(e.to_string())
        }
    }
}
