use std::fmt;

use crate::messages;

/// Errors raised by CEP providers.
///
/// The orchestrator never lets these escape to the caller: every variant is
/// caught by the fallback loop and folded into `CepResult`. They are public
/// so that adapters used standalone can be matched on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CepError {
    /// The CEP is empty, has the wrong length, or has no digits. Raised
    /// before any network call.
    Validation(String),
    /// The provider returned a non-success status, an empty body, or a body
    /// that could not be deserialized.
    Service(String),
    /// The provider answered successfully but has no record for this CEP.
    NotFound(String),
    /// The shared deadline elapsed or the request timed out.
    Cancelled(String),
}

impl CepError {
    /// The human-readable message, as accumulated into `CepResult.message`.
    pub fn message(&self) -> &str {
        match self {
            CepError::Validation(msg)
            | CepError::Service(msg)
            | CepError::NotFound(msg)
            | CepError::Cancelled(msg) => msg,
        }
    }
}

impl fmt::Display for CepError {
    // Prints the message verbatim so that concatenating failures yields the
    // same diagnostic trail the services produce.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CepError {}

impl From<reqwest::Error> for CepError {
    /// Maps transport errors, keeping timeouts distinct from generic
    /// service failures.
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CepError::Cancelled(format!("Tempo limite excedido: {}", err))
        } else {
            CepError::Service(format!("{} {}", messages::EXCEPTION_SERVICE_ERROR, err))
        }
    }
}
