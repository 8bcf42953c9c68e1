//! Upstream error types.
//!
//! Every failure of an outbound Trello call is captured here so that the
//! bridge can decide per call whether it is terminal or degradable.

use miette::Diagnostic;
use thiserror::Error;

/// Errors produced by the remote card repository.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum TrelloError {
    #[error("Trello request to '{path}' timed out")]
    #[diagnostic(
        code(trello_mcp::trello::timeout),
        help("The upstream did not answer within the configured timeout (TRELLO_TIMEOUT_SECS).")
    )]
    Timeout { path: String },

    #[error("Failed to connect to Trello: {message}")]
    #[diagnostic(code(trello_mcp::trello::connection_failed))]
    Connection { message: String },

    #[error("Trello API error ({status}) on '{path}': {message}")]
    #[diagnostic(code(trello_mcp::trello::status))]
    Status {
        path: String,
        status: u16,
        message: String,
    },

    #[error("Trello request failed: {message}")]
    #[diagnostic(code(trello_mcp::trello::request))]
    Request { message: String },

    #[error("Invalid response from Trello: {message}")]
    #[diagnostic(
        code(trello_mcp::trello::invalid_response),
        help("The upstream returned data in an unexpected format.")
    )]
    InvalidResponse { message: String },

    #[error("Failed to build HTTP client: {message}")]
    #[diagnostic(code(trello_mcp::trello::client))]
    Client { message: String },
}

impl TrelloError {
    /// Classify a reqwest failure for the given request path.
    ///
    /// The request URL carries the API key and token in its query string,
    /// so it is stripped before the error is rendered.
    pub fn from_reqwest(path: &str, e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return TrelloError::Timeout {
                path: path.to_string(),
            };
        }

        let is_connect = e.is_connect();
        let is_decode = e.is_decode();
        let message = format!("{} ({})", e.without_url(), path);

        if is_connect {
            TrelloError::Connection { message }
        } else if is_decode {
            TrelloError::InvalidResponse { message }
        } else {
            TrelloError::Request { message }
        }
    }
}

impl From<serde_json::Error> for TrelloError {
    fn from(e: serde_json::Error) -> Self {
        TrelloError::InvalidResponse {
            message: e.to_string(),
        }
    }
}

/// Result type for upstream calls.
pub type TrelloResult<T> = Result<T, TrelloError>;
