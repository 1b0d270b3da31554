//! Server setup and lifecycle

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use curlsmith_core::Converter;

use crate::routes::{self, AppState};

/// HTTP server wrapping a single converter session
pub struct ConverterServer {
    state: Arc<AppState>,
    port: u16,
}

impl ConverterServer {
    /// Create a server for a converter
    pub fn new(converter: Converter, port: u16) -> Self {
        Self {
            state: Arc::new(AppState {
                converter: RwLock::new(converter),
            }),
            port,
        }
    }

    /// Build the router
    pub fn router(state: Arc<AppState>) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .route("/", get(routes::index))
            .route("/health", get(routes::health))
            .route("/api/session", get(routes::get_session))
            .route("/api/analyze", post(routes::analyze))
            .route("/api/generate", post(routes::generate))
            .route("/api/selection/toggle", post(routes::toggle_field))
            .route("/api/selection/custom", post(routes::add_custom_field))
            .route("/api/reset", post(routes::reset))
            .layer(cors)
            .with_state(state)
    }

    /// Bind and serve until shutdown
    pub async fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let app = Self::router(self.state.clone());

        let addr = format!("0.0.0.0:{}", self.port);
        info!("Starting curlsmith server on {}", addr);

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
