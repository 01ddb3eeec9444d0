//! Lifecycle of a single extraction request.

use serde::Serialize;
use thiserror::Error;

use crate::error::{ExtractionError, SessionError};
use crate::models::quotation::QuotationRecord;

/// Category of a failed extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Missing or malformed image, or missing credential.
    Input,
    /// The model service refused or failed the request.
    Upstream,
    /// The reply held no usable JSON object.
    Format,
    /// The caller's deadline passed.
    Timeout,
}

/// Terminal failure of an extraction, with a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct ExtractionFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl ExtractionFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<ExtractionError> for ExtractionFailure {
    fn from(err: ExtractionError) -> Self {
        Self::new(FailureKind::Format, err.to_string())
    }
}

/// State of an extraction session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ExtractionState {
    #[default]
    Idle,
    Submitted,
    Succeeded(QuotationRecord),
    Failed(ExtractionFailure),
}

impl ExtractionState {
    pub fn name(&self) -> &'static str {
        match self {
            ExtractionState::Idle => "idle",
            ExtractionState::Submitted => "submitted",
            ExtractionState::Succeeded(_) => "succeeded",
            ExtractionState::Failed(_) => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ExtractionState::Succeeded(_) | ExtractionState::Failed(_))
    }
}

/// `Idle -> Submitted -> Succeeded | Failed`, with `reset` back to `Idle`
/// from a terminal state. There are no automatic retries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionSession {
    state: ExtractionState,
}

impl ExtractionSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ExtractionState {
        &self.state
    }

    pub fn into_state(self) -> ExtractionState {
        self.state
    }

    pub fn submit(&mut self) -> Result<(), SessionError> {
        self.transition("submit", |state| matches!(state, ExtractionState::Idle))?;
        self.state = ExtractionState::Submitted;
        Ok(())
    }

    pub fn succeed(&mut self, record: QuotationRecord) -> Result<(), SessionError> {
        self.transition("complete", |state| matches!(state, ExtractionState::Submitted))?;
        self.state = ExtractionState::Succeeded(record);
        Ok(())
    }

    pub fn fail(&mut self, failure: ExtractionFailure) -> Result<(), SessionError> {
        self.transition("fail", |state| matches!(state, ExtractionState::Submitted))?;
        self.state = ExtractionState::Failed(failure);
        Ok(())
    }

    /// Return a finished session to `Idle` so it can be submitted again.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        self.transition("reset", ExtractionState::is_terminal)?;
        self.state = ExtractionState::Idle;
        Ok(())
    }

    fn transition(
        &self,
        action: &'static str,
        allowed: impl Fn(&ExtractionState) -> bool,
    ) -> Result<(), SessionError> {
        if allowed(&self.state) {
            Ok(())
        } else {
            Err(SessionError {
                state: self.state.name(),
                action,
            })
        }
    }
}
