//! Document model backends.

#[cfg(feature = "gateway")]
pub mod gateway;

use async_trait::async_trait;

use crate::{ImagePayload, Result};

/// A model that reads a document image and answers with raw text.
///
/// The text is expected to contain the quotation as JSON, possibly wrapped in
/// a fenced code block; interpreting it is left to the caller.
#[async_trait]
pub trait DocumentModel: Send + Sync {
    /// Send the image with the instruction prompt and return the reply text.
    async fn extract(&self, image: &ImagePayload) -> Result<String>;

    /// Identifier of the underlying model, for logging.
    fn model_name(&self) -> &str;
}
