use thiserror::Error;

/// Errors returned by the backend API client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend rejected the credential (HTTP 401).
    #[error("unauthorized: credential rejected by {url}")]
    Unauthorized { url: String },

    /// Any other non-2xx status. `body` holds the response text, if readable.
    #[error("unexpected HTTP status {status} from {url}: {body}")]
    UnexpectedStatus {
        status: u16,
        url: String,
        body: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A base URL or path from configuration could not form a request URL.
    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl ClientError {
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized { .. })
    }
}

/// Errors surfaced by a [`TokenStore`](crate::token::TokenStore) backend.
///
/// The token manager never propagates these; they exist so store
/// implementations and their tests can report what went wrong.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session storage unavailable: {0}")]
    Unavailable(String),

    #[error("session storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Misuse of a [`PollSession`](crate::poller::PollSession).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PollerError {
    #[error("poll session is already active")]
    AlreadyActive,

    #[error("poll session has stopped and cannot be restarted")]
    Finished,

    #[error("poll interval must be greater than zero")]
    ZeroInterval,

    #[error("poll session must be started inside a Tokio runtime")]
    NoRuntime,
}
