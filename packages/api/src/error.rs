//! Errors raised by the data access layer.

/// Failure of a single backend call.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The request never produced a response (DNS, TLS, timeout, connection reset).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// The backend answered with a status the call does not accept.
    #[error("request rejected with status {status}{}", suffix(.message))]
    Rejected { status: u16, message: Option<String> },
    /// The response body was not the JSON we expected.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    /// The backend is not reachable at all.
    #[error("backend unavailable: {0}")]
    Unavailable(String),
    #[error("configuration error: {0}")]
    Config(String),
}

fn suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

impl Error {
    /// Message supplied by the server in a rejection body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Error::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, Error::Rejected { .. })
    }
}

impl From<config::ConfigError> for Error {
    fn from(e: config::ConfigError) -> Self {
        Error::Config(e.to_string())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
