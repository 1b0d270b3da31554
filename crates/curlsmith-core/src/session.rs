//! Session state machine for the analyze/select/generate flow
//!
//! The session is the single holder of mutable UI state: command text,
//! status, discovered fields, the selection, and the latest result or
//! error. Status transitions are pure functions over `SessionEvent`s and
//! invalid transitions are rejected rather than silently applied.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use gemini_gateway::{AnalysisResult, ConversionResult, VolatileInput};

use crate::error::{CoreError, CoreResult};
use crate::selection::SelectionSet;

/// How many discovered fields are pre-selected after a successful analyze
const PRESELECT_COUNT: usize = 3;

/// Message stored when a failure carries no text of its own
const FALLBACK_ERROR: &str = "The model call failed. Please try again.";

/// Where the session currently is in the flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Nothing analyzed yet
    #[default]
    Idle,
    /// The analyze call is in flight
    Analyzing,
    /// Fields discovered, waiting for the user to pick a subset
    AwaitingSelection,
    /// The generate call is in flight
    Generating,
    /// A conversion result is available
    Success,
    /// The last call failed; the session holds the message
    Error,
}

impl Status {
    /// Whether a model call is outstanding
    pub fn is_busy(&self) -> bool {
        matches!(self, Status::Analyzing | Status::Generating)
    }

    /// Wire name of the status, as serialized
    pub fn name(&self) -> &'static str {
        match self {
            Status::Idle => "idle",
            Status::Analyzing => "analyzing",
            Status::AwaitingSelection => "awaiting_selection",
            Status::Generating => "generating",
            Status::Success => "success",
            Status::Error => "error",
        }
    }
}

/// Events that drive status transitions
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// An analyze call is starting for the given command text
    AnalyzeStarted { command: String },
    /// The analyze call settled successfully
    AnalyzeSucceeded(AnalysisResult),
    /// A generate call is starting
    GenerateStarted,
    /// The generate call settled successfully
    GenerateSucceeded(ConversionResult),
    /// The in-flight call settled with a failure
    Failed(String),
    /// The user reset the session
    Reset,
}

impl SessionEvent {
    fn name(&self) -> &'static str {
        match self {
            SessionEvent::AnalyzeStarted { .. } => "analyze_started",
            SessionEvent::AnalyzeSucceeded(_) => "analyze_succeeded",
            SessionEvent::GenerateStarted => "generate_started",
            SessionEvent::GenerateSucceeded(_) => "generate_succeeded",
            SessionEvent::Failed(_) => "failed",
            SessionEvent::Reset => "reset",
        }
    }
}

/// The single mutable session owned by the converter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    /// Session identifier (for logging)
    id: Uuid,

    /// The pasted cURL command text; persists across resets
    command: String,

    /// Current position in the flow
    status: Status,

    /// Predicted response field names, non-empty only after a successful
    /// analyze (plus any user-added custom names)
    response_fields: Vec<String>,

    /// Volatile inputs discovered during analysis
    volatile_inputs: Vec<VolatileInput>,

    /// The user's field selection, always a subset of `response_fields`
    selection: SelectionSet,

    /// Whether an analyze call has succeeded in this session; gates the
    /// generate leg (an analysis may legitimately return zero fields)
    analyzed: bool,

    /// The latest conversion result, present only in Success
    result: Option<ConversionResult>,

    /// The latest failure message, present only in Error
    error: Option<String>,

    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// Create a fresh idle session
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            command: String::new(),
            status: Status::Idle,
            response_fields: Vec::new(),
            volatile_inputs: Vec::new(),
            selection: SelectionSet::new(),
            analyzed: false,
            result: None,
            error: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply an event, transitioning the status
    pub fn apply(&mut self, event: SessionEvent) -> CoreResult<()> {
        debug!(
            "Session {}: {} in state {:?}",
            self.id,
            event.name(),
            self.status
        );

        match event {
            SessionEvent::AnalyzeStarted { command } => {
                if self.status.is_busy() {
                    return Err(CoreError::CallInFlight);
                }
                self.command = command;
                self.clear_discovered();
                self.status = Status::Analyzing;
            }

            SessionEvent::AnalyzeSucceeded(analysis) => {
                self.require_status(Status::Analyzing, "analyze_succeeded")?;
                self.response_fields = analysis.response_fields;
                self.volatile_inputs = analysis.volatile_inputs;
                self.selection.clear();
                for field in self.response_fields.iter().take(PRESELECT_COUNT) {
                    self.selection.insert(field);
                }
                self.analyzed = true;
                self.status = Status::AwaitingSelection;
            }

            SessionEvent::GenerateStarted => {
                if self.status.is_busy() {
                    return Err(CoreError::CallInFlight);
                }
                if !self.analyzed {
                    return Err(CoreError::NothingAnalyzed);
                }
                self.result = None;
                self.error = None;
                self.status = Status::Generating;
            }

            SessionEvent::GenerateSucceeded(result) => {
                self.require_status(Status::Generating, "generate_succeeded")?;
                self.result = Some(result);
                self.status = Status::Success;
            }

            SessionEvent::Failed(message) => {
                if !self.status.is_busy() {
                    return Err(CoreError::InvalidTransition {
                        event: "failed",
                        status: self.status.name().to_string(),
                    });
                }
                let message = message.trim().to_string();
                self.error = if message.is_empty() {
                    Some(FALLBACK_ERROR.to_string())
                } else {
                    Some(message)
                };
                self.status = Status::Error;
            }

            SessionEvent::Reset => {
                self.clear_discovered();
                self.status = Status::Idle;
            }
        }

        self.updated_at = Utc::now();
        Ok(())
    }

    /// Toggle a known field in or out of the selection
    pub fn toggle_field(&mut self, field: &str) -> CoreResult<bool> {
        if !self.response_fields.iter().any(|f| f == field) {
            return Err(CoreError::UnknownField(field.to_string()));
        }
        let selected = self.selection.toggle(field);
        self.updated_at = Utc::now();
        Ok(selected)
    }

    /// Add a user-provided field name; it joins both the known-field
    /// list and the selection
    pub fn add_custom_field(&mut self, field: &str) -> CoreResult<()> {
        let field = field.trim();
        if field.is_empty() {
            return Err(CoreError::BlankField);
        }
        if !self.response_fields.iter().any(|f| f == field) {
            self.response_fields.push(field.to_string());
        }
        self.selection.insert(field);
        self.updated_at = Utc::now();
        Ok(())
    }

    fn require_status(&self, expected: Status, event: &'static str) -> CoreResult<()> {
        if self.status != expected {
            debug!(
                "Session {}: rejecting {} in state {:?}",
                self.id, event, self.status
            );
            return Err(CoreError::InvalidTransition {
                event,
                status: self.status.name().to_string(),
            });
        }
        Ok(())
    }

    /// Drop everything discovered by the last analyze; the command text
    /// is deliberately kept
    fn clear_discovered(&mut self) {
        self.response_fields.clear();
        self.volatile_inputs.clear();
        self.selection.clear();
        self.analyzed = false;
        self.result = None;
        self.error = None;
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn response_fields(&self) -> &[String] {
        &self.response_fields
    }

    pub fn volatile_inputs(&self) -> &[VolatileInput] {
        &self.volatile_inputs
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn result(&self) -> Option<&ConversionResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
