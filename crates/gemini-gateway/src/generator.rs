//! Code generator: one model call that produces the script, explanation,
//! and mock filtered response

use tracing::{debug, info};

use crate::client::ModelGateway;
use crate::error::GatewayResult;
use crate::prompt::conversion_prompt;
use crate::schema::conversion_schema;
use crate::types::{ConversionResult, VolatileInput};

/// Generates a Python script for a cURL command via the model
pub struct CodeGenerator<'a> {
    gateway: &'a dyn ModelGateway,
}

impl<'a> CodeGenerator<'a> {
    /// Create a generator over a gateway
    pub fn new(gateway: &'a dyn ModelGateway) -> Self {
        Self { gateway }
    }

    /// Ask the model for a script filtered to `selected_fields`.
    ///
    /// An empty selection means no filtering: the script returns the full
    /// response. Volatile inputs are passed through so the model hoists
    /// them into the script's configuration block.
    pub async fn generate(
        &self,
        curl_command: &str,
        selected_fields: &[String],
        volatile_inputs: &[VolatileInput],
    ) -> GatewayResult<ConversionResult> {
        info!(
            "Generating script: {} selected fields, {} volatile inputs",
            selected_fields.len(),
            volatile_inputs.len()
        );

        let prompt = conversion_prompt(curl_command, selected_fields, volatile_inputs);
        let value = self
            .gateway
            .generate_json(&prompt, conversion_schema())
            .await?;

        let result: ConversionResult = serde_json::from_value(value)?;

        debug!(
            "Generation returned {} bytes of code",
            result.generated_code.len()
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GatewayError;
    use async_trait::async_trait;
    use serde_json::{json, Value};

    struct CannedGateway {
        response: Value,
        expect_in_prompt: Option<&'static str>,
    }

    #[async_trait]
    impl ModelGateway for CannedGateway {
        async fn generate_json(&self, prompt: &str, _schema: Value) -> GatewayResult<Value> {
            if let Some(needle) = self.expect_in_prompt {
                assert!(prompt.contains(needle), "prompt missing: {}", needle);
            }
            Ok(self.response.clone())
        }
    }

    fn canned_conversion() -> Value {
        json!({
            "generatedCode": "import requests\n...",
            "explanation": "Fetches the user and prints login",
            "mockResponse": "{\"login\": \"octocat\"}"
        })
    }

    #[tokio::test]
    async fn test_generate_deserializes_model_output() {
        let gateway = CannedGateway {
            response: canned_conversion(),
            expect_in_prompt: Some("login"),
        };

        let result = CodeGenerator::new(&gateway)
            .generate(
                "curl https://api.github.com/users/octocat",
                &["login".to_string()],
                &[],
            )
            .await
            .unwrap();

        assert!(result.generated_code.starts_with("import requests"));
        assert!(!result.explanation.is_empty());

        let mock: Value = serde_json::from_str(&result.mock_response).unwrap();
        assert!(mock.get("login").is_some());
    }

    #[tokio::test]
    async fn test_generate_empty_selection_sends_sentinel() {
        let gateway = CannedGateway {
            response: canned_conversion(),
            expect_in_prompt: Some("no filtering"),
        };

        let result = CodeGenerator::new(&gateway)
            .generate("curl https://example.com", &[], &[])
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_generate_rejects_missing_required_field() {
        let gateway = CannedGateway {
            response: json!({ "generatedCode": "x", "explanation": "y" }),
            expect_in_prompt: None,
        };

        let result = CodeGenerator::new(&gateway)
            .generate("curl x", &[], &[])
            .await;

        assert!(matches!(result, Err(GatewayError::JsonError(_))));
    }
}
