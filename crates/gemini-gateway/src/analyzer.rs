//! Schema analyzer: one model call that predicts response fields and
//! spots volatile inputs

use tracing::{debug, info};

use crate::client::ModelGateway;
use crate::error::GatewayResult;
use crate::prompt::analysis_prompt;
use crate::schema::analysis_schema;
use crate::types::AnalysisResult;

/// Analyzes a cURL command by delegating it to the model
pub struct SchemaAnalyzer<'a> {
    gateway: &'a dyn ModelGateway,
}

impl<'a> SchemaAnalyzer<'a> {
    /// Create an analyzer over a gateway
    pub fn new(gateway: &'a dyn ModelGateway) -> Self {
        Self { gateway }
    }

    /// Ask the model for the predicted response fields and volatile
    /// inputs of a cURL command.
    ///
    /// The result is taken verbatim from the model; no plausibility check
    /// against the actual cURL syntax is performed.
    pub async fn analyze(&self, curl_command: &str) -> GatewayResult<AnalysisResult> {
        info!("Analyzing cURL command ({} bytes)", curl_command.len());

        let value = self
            .gateway
            .generate_json(&analysis_prompt(curl_command), analysis_schema())
            .await?;

        let result: AnalysisResult = serde_json::from_value(value)?;

        debug!(
            "Analysis returned {} fields, {} volatile inputs",
            result.response_fields.len(),
            result.volatile_inputs.len()
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
    }

    #[async_trait]
    impl ModelGateway for CannedGateway {
        async fn generate_json(&self, _prompt: &str, _schema: Value) -> GatewayResult<Value> {
            Ok(self.response.clone())
        }
    }

    struct FailingGateway;

    #[async_trait]
    impl ModelGateway for FailingGateway {
        async fn generate_json(&self, _prompt: &str, _schema: Value) -> GatewayResult<Value> {
            Err(GatewayError::ApiError {
                status: 429,
                body: "rate limited".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_analyze_deserializes_model_output() {
        let gateway = CannedGateway {
            response: json!({
                "responseFields": ["login", "id", "company.name"],
                "volatileInputs": [{
                    "name": "Authorization",
                    "currentValue": "Bearer abc",
                    "type": "header",
                    "description": "OAuth token"
                }]
            }),
        };

        let result = SchemaAnalyzer::new(&gateway)
            .analyze("curl https://api.github.com/users/octocat")
            .await
            .unwrap();

        assert_eq!(result.response_fields[0], "login");
        assert_eq!(result.volatile_inputs[0].name, "Authorization");
    }

    #[tokio::test]
    async fn test_analyze_surfaces_gateway_failure() {
        let result = SchemaAnalyzer::new(&FailingGateway)
            .analyze("curl https://example.com")
            .await;

        assert!(matches!(result, Err(GatewayError::ApiError { status: 429, .. })));
    }

    #[tokio::test]
    async fn test_analyze_rejects_nonconforming_shape() {
        let gateway = CannedGateway {
            response: json!({ "fields": ["wrong", "key"] }),
        };

        let result = SchemaAnalyzer::new(&gateway).analyze("curl x").await;
        assert!(matches!(result, Err(GatewayError::JsonError(_))));
    }
}
