//! Gemini HTTP client and the gateway trait it implements

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::error::{GatewayError, GatewayResult};

/// Base URL of the Gemini REST API
const ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Outbound call to the hosted generative model.
///
/// One method: a natural-language prompt plus a JSON response schema in,
/// the model's parsed JSON value out. Kept as a trait so the analyzer,
/// generator, and session orchestration can be exercised against a canned
/// implementation in tests.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Send a prompt with a structured-output schema and parse the JSON
    /// text the model returns
    async fn generate_json(&self, prompt: &str, schema: Value) -> GatewayResult<Value>;
}

/// Client for the Gemini `generateContent` endpoint
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    /// Create a client with an explicit API key
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> GatewayResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GatewayError::MissingApiKey);
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| GatewayError::RequestError(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            model: model.into(),
        })
    }

    /// Create a client from `GEMINI_API_KEY`
    pub fn from_env(model: impl Into<String>) -> GatewayResult<Self> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| GatewayError::MissingApiKey)?;
        Self::new(api_key, model)
    }

    /// The configured model name
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ModelGateway for GeminiClient {
    async fn generate_json(&self, prompt: &str, schema: Value) -> GatewayResult<Value> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            ENDPOINT, self.model, self.api_key
        );

        let body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": schema,
            }
        });

        info!("Calling model {} ({} byte prompt)", self.model, prompt.len());

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::RequestError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| GatewayError::RequestError(e.to_string()))?;

        debug!("Model response received, extracting candidate text");
        extract_candidate_json(&response_json)
    }
}

/// Pull the JSON text out of `candidates[0].content.parts[0].text` and
/// parse it
pub(crate) fn extract_candidate_json(response: &Value) -> GatewayResult<Value> {
    let text = response["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .ok_or_else(|| {
            GatewayError::MalformedResponse("no candidate text in model response".to_string())
        })?;

    Ok(serde_json::from_str(text.trim())?)
}
