//! Bridge error types and the uniform error envelope.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::trello::TrelloError;

#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    #[error("{message}")]
    #[diagnostic(code(trello_mcp::bridge::validation))]
    Validation { message: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Upstream(#[from] TrelloError),

    #[error("Internal error: {message}")]
    #[diagnostic(code(trello_mcp::bridge::internal))]
    Internal { message: String },
}

impl BridgeError {
    pub fn validation(message: impl Into<String>) -> Self {
        BridgeError::Validation {
            message: message.into(),
        }
    }
}

/// Result type for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;

/// `{ "error": "<description>" }`, the shape every failed tool call returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
}

impl From<&BridgeError> for ErrorEnvelope {
    fn from(e: &BridgeError) -> Self {
        Self {
            error: e.to_string(),
        }
    }
}
