//! Route handlers and the session view returned to the browser

use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use curlsmith_core::{Converter, CoreError, SessionState, Status};
use gemini_gateway::{ConversionResult, VolatileInput};

/// Shared state for route handlers
pub struct AppState {
    pub converter: RwLock<Converter>,
}

/// Session snapshot for the browser
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub id: String,
    pub status: Status,
    pub command: String,
    pub response_fields: Vec<String>,
    pub volatile_inputs: Vec<VolatileInput>,
    pub selection: Vec<String>,
    pub result: Option<ConversionResult>,
    pub error: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&SessionState> for SessionView {
    fn from(session: &SessionState) -> Self {
        Self {
            id: session.id().to_string(),
            status: session.status(),
            command: session.command().to_string(),
            response_fields: session.response_fields().to_vec(),
            volatile_inputs: session.volatile_inputs().to_vec(),
            selection: session.selection().to_vec(),
            result: session.result().cloned(),
            error: session.error().map(|e| e.to_string()),
            created_at: session.created_at().to_rfc3339(),
            updated_at: session.updated_at().to_rfc3339(),
        }
    }
}

/// Analyze request body
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub command: String,
}

/// Toggle/custom-field request body
#[derive(Debug, Deserialize)]
pub struct FieldRequest {
    pub field: String,
}

/// Map a core error to the HTTP status it deserves.
///
/// A busy session is a conflict; everything else is a bad request.
/// Remote-model failures never reach this mapping - they settle the
/// session into its error state and are returned inside the snapshot.
fn error_status(error: &CoreError) -> StatusCode {
    match error {
        CoreError::CallInFlight => StatusCode::CONFLICT,
        _ => StatusCode::BAD_REQUEST,
    }
}

type HandlerResult = Result<Json<SessionView>, (StatusCode, String)>;

fn reject(error: CoreError) -> (StatusCode, String) {
    (error_status(&error), error.to_string())
}

/// Embedded browser UI
pub async fn index() -> Html<&'static str> {
    Html(include_str!("assets/index.html"))
}

/// Liveness probe
pub async fn health() -> &'static str {
    "OK"
}

/// Current session snapshot
pub async fn get_session(State(state): State<Arc<AppState>>) -> Json<SessionView> {
    let converter = state.converter.read().await;
    Json(SessionView::from(converter.session()))
}

/// Run the analyze leg
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> HandlerResult {
    debug!("Analyze requested ({} bytes)", request.command.len());

    let mut converter = state.converter.write().await;
    converter.analyze(&request.command).await.map_err(reject)?;

    Ok(Json(SessionView::from(converter.session())))
}

/// Run the generate leg
pub async fn generate(State(state): State<Arc<AppState>>) -> HandlerResult {
    debug!("Generate requested");

    let mut converter = state.converter.write().await;
    converter.generate().await.map_err(reject)?;

    Ok(Json(SessionView::from(converter.session())))
}

/// Toggle a field in or out of the selection
pub async fn toggle_field(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FieldRequest>,
) -> HandlerResult {
    let mut converter = state.converter.write().await;
    converter.toggle_field(&request.field).map_err(reject)?;

    Ok(Json(SessionView::from(converter.session())))
}

/// Add a user-provided field name
pub async fn add_custom_field(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FieldRequest>,
) -> HandlerResult {
    let mut converter = state.converter.write().await;
    converter.add_custom_field(&request.field).map_err(reject)?;

    Ok(Json(SessionView::from(converter.session())))
}

/// Reset the session to idle
pub async fn reset(State(state): State<Arc<AppState>>) -> HandlerResult {
    let mut converter = state.converter.write().await;
    converter.reset().map_err(reject)?;

    Ok(Json(SessionView::from(converter.session())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use gemini_gateway::{GatewayError, GatewayResult, ModelGateway};
    use serde_json::{json, Value};

    struct CannedGateway;

    #[async_trait]
    impl ModelGateway for CannedGateway {
        async fn generate_json(&self, _prompt: &str, schema: Value) -> GatewayResult<Value> {
            if schema["properties"].get("responseFields").is_some() {
                Ok(json!({
                    "responseFields": ["login", "id", "name"],
                    "volatileInputs": []
                }))
            } else {
                Ok(json!({
                    "generatedCode": "import requests",
                    "explanation": "no filtering applied - full response returned",
                    "mockResponse": "{\"login\": \"octocat\"}"
                }))
            }
        }
    }

    struct FailingGateway;

    #[async_trait]
    impl ModelGateway for FailingGateway {
        async fn generate_json(&self, _prompt: &str, _schema: Value) -> GatewayResult<Value> {
            Err(GatewayError::RequestError("timed out".to_string()))
        }
    }

    fn app_state(gateway: Box<dyn ModelGateway>) -> Arc<AppState> {
        Arc::new(AppState {
            converter: RwLock::new(Converter::new(gateway)),
        })
    }

    #[tokio::test]
    async fn test_analyze_returns_snapshot_with_fields() {
        let state = app_state(Box::new(CannedGateway));

        let Json(view) = analyze(
            State(state),
            Json(AnalyzeRequest {
                command: "curl https://api.github.com/users/octocat".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(view.status, Status::AwaitingSelection);
        assert_eq!(view.response_fields, vec!["login", "id", "name"]);
        assert_eq!(view.selection, vec!["login", "id", "name"]);
        assert!(view.error.is_none());
    }

    #[tokio::test]
    async fn test_gateway_failure_is_a_200_with_error_state() {
        let state = app_state(Box::new(FailingGateway));

        let Json(view) = analyze(
            State(state),
            Json(AnalyzeRequest {
                command: "curl https://example.com".to_string(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(view.status, Status::Error);
        assert!(view.error.unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn test_generate_without_analysis_is_bad_request() {
        let state = app_state(Box::new(CannedGateway));

        let (status, _) = generate(State(state)).await.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_toggle_unknown_field_is_bad_request() {
        let state = app_state(Box::new(CannedGateway));

        let (status, message) = toggle_field(
            State(state),
            Json(FieldRequest {
                field: "nope".to_string(),
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(message.contains("nope"));
    }

    #[tokio::test]
    async fn test_full_flow_over_handlers() {
        let state = app_state(Box::new(CannedGateway));

        analyze(
            State(state.clone()),
            Json(AnalyzeRequest {
                command: "curl https://api.github.com/users/octocat".to_string(),
            }),
        )
        .await
        .unwrap();

        toggle_field(
            State(state.clone()),
            Json(FieldRequest {
                field: "id".to_string(),
            }),
        )
        .await
        .unwrap();

        let Json(view) = generate(State(state.clone())).await.unwrap();
        assert_eq!(view.status, Status::Success);

        let result = view.result.unwrap();
        let mock: Value = serde_json::from_str(&result.mock_response).unwrap();
        assert_eq!(mock["login"], "octocat");

        let Json(view) = reset(State(state)).await.unwrap();
        assert_eq!(view.status, Status::Idle);
        assert!(view.response_fields.is_empty());
        assert!(!view.command.is_empty());
    }

    #[test]
    fn test_busy_maps_to_conflict() {
        assert_eq!(error_status(&CoreError::CallInFlight), StatusCode::CONFLICT);
        assert_eq!(
            error_status(&CoreError::NothingAnalyzed),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_session_view_wire_format() {
        let session = SessionState::new();
        let view = SessionView::from(&session);
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["status"], "idle");
        assert!(json["responseFields"].as_array().unwrap().is_empty());
        assert!(json["error"].is_null());
    }
}
