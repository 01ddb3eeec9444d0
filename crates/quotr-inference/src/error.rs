//! Error types for the document model layer.

use thiserror::Error;

/// Errors that can occur while asking a document model to read an image.
#[derive(Error, Debug)]
pub enum InferenceError {
    /// No image was supplied.
    #[error("No image data provided")]
    MissingImage,

    /// The image was not a `data:<mime>;base64,<payload>` URL.
    #[error("Invalid image format. Expected base64 data URL.")]
    InvalidDataUrl,

    /// The file extension does not name a supported image type.
    #[error("unsupported image type: {0}")]
    UnsupportedImageType(String),

    /// The base64 payload did not decode.
    #[error("invalid base64 image payload: {0}")]
    InvalidBase64(String),

    /// The credential environment variable is unset or empty.
    #[error("{0} is not configured")]
    MissingCredential(String),

    /// Upstream answered 429.
    #[error("Rate limit exceeded. Please try again in a moment.")]
    RateLimited,

    /// Upstream answered 402.
    #[error("AI credits exhausted. Please add credits to your workspace.")]
    QuotaExhausted,

    /// Any other non-success upstream status.
    #[error("AI gateway error: {status} - {body}")]
    Upstream { status: u16, body: String },

    /// Upstream answered without message content.
    #[error("No content in AI response")]
    EmptyResponse,

    /// Upstream body was not a chat-completion response.
    #[error("malformed AI response: {0}")]
    MalformedResponse(String),

    /// Transport failure.
    #[cfg(feature = "gateway")]
    #[error("AI gateway request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl InferenceError {
    /// Whether the failure was caused by the caller's input or local setup
    /// rather than by the upstream service.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            InferenceError::MissingImage
                | InferenceError::InvalidDataUrl
                | InferenceError::InvalidBase64(_)
                | InferenceError::UnsupportedImageType(_)
                | InferenceError::MissingCredential(_)
        )
    }
}
