//! # gemini-gateway
//!
//! Gemini client for curlsmith. The cURL command is never parsed locally;
//! it is embedded verbatim into prompts and all understanding is delegated
//! to the hosted model, constrained by explicit JSON response schemas.
//!
//! - Prompt builders for the analyze and generate legs
//! - Response schemas for structured model output
//! - A `ModelGateway` trait so callers can be tested against a canned model

pub mod analyzer;
pub mod client;
pub mod error;
pub mod generator;
pub mod prompt;
pub mod schema;
pub mod types;

pub use analyzer::SchemaAnalyzer;
pub use client::{GeminiClient, ModelGateway, DEFAULT_MODEL};
pub use error::{GatewayError, GatewayResult};
pub use generator::CodeGenerator;
pub use types::{AnalysisResult, ConversionResult, VolatileInput, VolatileKind};
