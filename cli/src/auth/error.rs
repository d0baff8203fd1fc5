//! Error types for the browser-login flow.

use thiserror::Error;

/// Terminal failures of one authentication attempt.
///
/// None of these are retried internally; retrying means running
/// `crest setup` again with a fresh session. [`TimedOut`](Self::TimedOut)
/// is kept distinct from [`Polling`](Self::Polling) so the user message can
/// say "try again" rather than "check connectivity".
#[derive(Error, Debug)]
pub enum FlowError {
    /// The session-creation request failed; no poll was ever issued.
    #[error("Could not start browser login: {source}")]
    Creation {
        #[source]
        source: TransportError,
    },

    /// A wait request failed at the transport level. A single failed poll
    /// ends the whole attempt, even with time budget remaining.
    #[error("Lost contact with the server while waiting for login: {source}. Check your network connection and run 'crest setup' again.")]
    Polling {
        #[source]
        source: TransportError,
    },

    /// The overall time budget lapsed with the session still pending.
    #[error("Login did not complete within {waited_secs} seconds. Run 'crest setup' to try again.")]
    TimedOut {
        /// The overall budget that was exhausted, in seconds.
        waited_secs: u64,
    },
}

/// HTTP-level failures, classified for user messaging.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The request did not complete within its per-request timeout.
    #[error("request timed out")]
    Timeout,

    /// Connection could not be established (refused, DNS failure).
    #[error("server is unreachable")]
    Unreachable,

    /// The server answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as far as it could be read.
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("malformed server response: {0}")]
    Protocol(String),

    /// Any other error during the HTTP exchange.
    #[error("network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Unreachable
        } else {
            Self::Network(err.to_string())
        }
    }
}
