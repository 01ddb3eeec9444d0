//! Document model abstraction layer for quotr.
//!
//! This crate provides:
//! - the `DocumentModel` trait that turns a document image into raw text
//! - a chat-completion gateway backend (feature `gateway`)
//! - data-URL image payload decoding
//! - the fixed instruction prompt sent with every document

mod backend;
mod error;
mod payload;
mod prompt;

pub use backend::DocumentModel;
pub use error::InferenceError;
pub use payload::ImagePayload;
pub use prompt::{INSTRUCTION_PROMPT, SCHEMA_KEYS};

#[cfg(feature = "gateway")]
pub use backend::gateway::{ChatGatewayBackend, classify_status};

/// Result type for document model operations.
pub type Result<T> = std::result::Result<T, InferenceError>;
