use reqwest::StatusCode;
use thiserror::Error;

use crate::validation::ValidationReport;

/// Why a registration request did not succeed.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The server answered, but not with a success status.
    #[error("registration rejected with status {status}")]
    Rejected {
        status: StatusCode,
        /// The `error` field of the response body, if the body had one.
        error: Option<String>,
    },
    #[error("could not reach server: {0}")]
    Transport(#[from] reqwest::Error),
}

impl SubmitError {
    /// The server's own explanation, if it sent a structured one.
    pub fn server_error(&self) -> Option<&str> {
        match self {
            SubmitError::Rejected { error, .. } => error.as_deref(),
            SubmitError::Transport(_) => None,
        }
    }
}

/// Why a submit trigger did not issue a request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitBlocked {
    #[error("the form has invalid fields")]
    Invalid(ValidationReport),
    #[error("a submission is already in progress")]
    InFlight,
}
