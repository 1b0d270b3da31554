//! Wire-facing type definitions shared by the analyzer and generator

use serde::{Deserialize, Serialize};

/// Where a volatile request input lives in the original cURL command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolatileKind {
    /// An HTTP header value (e.g. a bearer token)
    Header,
    /// A query-string parameter (e.g. an API key)
    Query,
    /// A body field (e.g. a timestamp nonce)
    Body,
}

impl VolatileKind {
    /// Label used when serializing the input into prompt text
    pub fn as_str(&self) -> &'static str {
        match self {
            VolatileKind::Header => "header",
            VolatileKind::Query => "query",
            VolatileKind::Body => "body",
        }
    }
}

/// A request component whose value is expected to expire or rotate
/// (bearer token, session cookie, timestamp nonce)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolatileInput {
    /// Name of the header/parameter/field
    pub name: String,

    /// The literal value found in the command
    pub current_value: String,

    /// Classification of where the value lives
    #[serde(rename = "type")]
    pub kind: VolatileKind,

    /// Human-readable description of what the value is
    pub description: String,
}

/// Result of the analyze leg: predicted response fields plus any
/// volatile inputs spotted in the command
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Predicted JSON response field names, dot-path notation for nesting
    pub response_fields: Vec<String>,

    /// Expiring/rotating request inputs found in the command
    #[serde(default)]
    pub volatile_inputs: Vec<VolatileInput>,
}

/// Result of the generate leg
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    /// The generated Python script
    pub generated_code: String,

    /// Human-readable explanation of what the script does
    pub explanation: String,

    /// Example JSON payload of the filtered shape, as a string of JSON
    /// text (re-parsed by the display layer)
    pub mock_response: String,
}
