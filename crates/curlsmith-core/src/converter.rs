//! The conversion orchestrator
//!
//! Owns the session and the model gateway, and drives the two call legs.
//! Gateway failures never propagate past this boundary: they are reduced
//! to the error string held in the session.

use tracing::{info, warn};

use gemini_gateway::{CodeGenerator, ModelGateway, SchemaAnalyzer};

use crate::error::CoreResult;
use crate::session::{SessionEvent, SessionState};

/// Drives a single session through analyze, selection, and generate
pub struct Converter {
    session: SessionState,
    gateway: Box<dyn ModelGateway>,
}

impl Converter {
    /// Create a converter over a gateway with a fresh session
    pub fn new(gateway: Box<dyn ModelGateway>) -> Self {
        Self {
            session: SessionState::new(),
            gateway,
        }
    }

    /// The current session state
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Run the analyze leg for a command.
    ///
    /// Blank or whitespace-only text is a no-op: the session does not
    /// change. A busy session is an error; a gateway failure settles the
    /// session into the error state instead of returning `Err`.
    pub async fn analyze(&mut self, command: &str) -> CoreResult<()> {
        if command.trim().is_empty() {
            info!("Ignoring analyze request for blank command");
            return Ok(());
        }

        self.session.apply(SessionEvent::AnalyzeStarted {
            command: command.to_string(),
        })?;

        let outcome = SchemaAnalyzer::new(self.gateway.as_ref())
            .analyze(command)
            .await;

        match outcome {
            Ok(analysis) => self.session.apply(SessionEvent::AnalyzeSucceeded(analysis)),
            Err(e) => {
                warn!("Analyze call failed: {}", e);
                self.session.apply(SessionEvent::Failed(e.to_string()))
            }
        }
    }

    /// Run the generate leg using the session's command, selection, and
    /// volatile inputs
    pub async fn generate(&mut self) -> CoreResult<()> {
        self.session.apply(SessionEvent::GenerateStarted)?;

        let command = self.session.command().to_string();
        let selected = self.session.selection().to_vec();
        let volatile = self.session.volatile_inputs().to_vec();

        let outcome = CodeGenerator::new(self.gateway.as_ref())
            .generate(&command, &selected, &volatile)
            .await;

        match outcome {
            Ok(result) => self.session.apply(SessionEvent::GenerateSucceeded(result)),
            Err(e) => {
                warn!("Generate call failed: {}", e);
                self.session.apply(SessionEvent::Failed(e.to_string()))
            }
        }
    }

    /// Toggle a field in the selection
    pub fn toggle_field(&mut self, field: &str) -> CoreResult<bool> {
        self.session.toggle_field(field)
    }

    /// Add a user-provided field name
    pub fn add_custom_field(&mut self, field: &str) -> CoreResult<()> {
        self.session.add_custom_field(field)
    }

    /// Return the session to idle, keeping the command text
    pub fn reset(&mut self) -> CoreResult<()> {
        self.session.apply(SessionEvent::Reset)
    }
}
