//! JSON response schemas sent with each model call
//!
//! The model is asked for structured output conforming to these schemas;
//! anything else is treated as a malformed response by the caller.

use serde_json::{json, Value};

/// Schema for the analyze leg: predicted response fields plus volatile
/// request inputs
pub fn analysis_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "responseFields": {
                "type": "array",
                "items": { "type": "string" }
            },
            "volatileInputs": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "currentValue": { "type": "string" },
                        "type": {
                            "type": "string",
                            "enum": ["header", "query", "body"]
                        },
                        "description": { "type": "string" }
                    },
                    "required": ["name", "currentValue", "type", "description"]
                }
            }
        },
        "required": ["responseFields", "volatileInputs"]
    })
}

/// Schema for the generate leg: script text, explanation, and a mock
/// filtered response (a string of JSON text)
pub fn conversion_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "generatedCode": { "type": "string" },
            "explanation": { "type": "string" },
            "mockResponse": { "type": "string" }
        },
        "required": ["generatedCode", "explanation", "mockResponse"]
    })
}
