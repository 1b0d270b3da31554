//! Error types for the gateway

use thiserror::Error;

/// Result type alias for gateway operations
pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

/// Gateway error types
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("No API key - set GEMINI_API_KEY or pass --api-key")]
    MissingApiKey,

    #[error("Request to model endpoint failed: {0}")]
    RequestError(String),

    #[error("Model endpoint returned {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("Unexpected response structure: {0}")]
    MalformedResponse(String),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}
