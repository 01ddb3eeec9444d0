//! Driving a document model through an extraction session.

use std::sync::Arc;
use std::time::Duration;

use quotr_inference::{DocumentModel, ImagePayload, InferenceError};
use tracing::{info, warn};

use super::parser::{QuotationParser, ResponseParser};
use super::session::{ExtractionFailure, ExtractionSession, ExtractionState, FailureKind};
use crate::error::SessionError;
use crate::models::quotation::QuotationRecord;

/// Default deadline for one extraction.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

impl From<InferenceError> for ExtractionFailure {
    fn from(err: InferenceError) -> Self {
        let kind = if err.is_input_error() {
            FailureKind::Input
        } else {
            FailureKind::Upstream
        };
        Self::new(kind, err.to_string())
    }
}

/// Sends document images to a model and parses the replies.
///
/// One outbound call per extraction, bounded by the timeout. The resulting
/// record is only returned; appending it to the working set is up to the
/// caller.
#[derive(Clone)]
pub struct QuotationExtractor {
    model: Arc<dyn DocumentModel>,
    parser: ResponseParser,
    timeout: Duration,
}

impl QuotationExtractor {
    pub fn new(model: Arc<dyn DocumentModel>) -> Self {
        Self {
            model,
            parser: ResponseParser::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_parser(mut self, parser: ResponseParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model_name(&self) -> &str {
        self.model.model_name()
    }

    /// Run one extraction in a fresh session, returning its terminal state.
    pub async fn extract(&self, image: &ImagePayload) -> ExtractionState {
        let mut session = ExtractionSession::new();
        match self.run(&mut session, image).await {
            Ok(()) => session.into_state(),
            Err(err) => ExtractionState::Failed(ExtractionFailure::new(
                FailureKind::Input,
                err.to_string(),
            )),
        }
    }

    /// Submit `session` and drive it to a terminal state.
    ///
    /// Fails only when the session is not idle.
    pub async fn run(
        &self,
        session: &mut ExtractionSession,
        image: &ImagePayload,
    ) -> Result<(), SessionError> {
        session.submit()?;
        info!(
            "Submitting {} ({} bytes) to {}",
            image.mime_type(),
            image.len(),
            self.model.model_name()
        );

        match self.call_model(image).await {
            Ok(record) => session.succeed(record),
            Err(failure) => {
                warn!("Extraction failed ({:?}): {}", failure.kind, failure.message);
                session.fail(failure)
            }
        }
    }

    async fn call_model(
        &self,
        image: &ImagePayload,
    ) -> Result<QuotationRecord, ExtractionFailure> {
        let reply = tokio::time::timeout(self.timeout, self.model.extract(image))
            .await
            .map_err(|_| {
                ExtractionFailure::new(
                    FailureKind::Timeout,
                    format!("Extraction timed out after {}s", self.timeout.as_secs()),
                )
            })??;

        let result = self.parser.parse(&reply)?;
        for warning in &result.warnings {
            warn!("{}", warning);
        }
        Ok(result.record)
    }
}
