//! Error types for curlsmith-core

use thiserror::Error;

/// Result type alias for core operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Core error types
///
/// These cover invalid requests against the session. Remote-model
/// failures never surface here: the orchestrator reduces them to an
/// error string stored in the session itself.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoreError {
    #[error("A call is already in flight - wait for it to settle")]
    CallInFlight,

    #[error("No analysis available - analyze a command first")]
    NothingAnalyzed,

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Field name must not be blank")]
    BlankField,

    #[error("Unexpected {event} event while the session is {status}")]
    InvalidTransition {
        event: &'static str,
        status: String,
    },
}
