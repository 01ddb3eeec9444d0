//! Extraction of quotation records from model replies.

mod parser;
mod session;

#[cfg(feature = "gateway")]
mod runner;

pub use parser::{ExtractionResult, QuotationParser, ResponseParser, locate_json, parse_response};
pub use session::{ExtractionFailure, ExtractionSession, ExtractionState, FailureKind};

#[cfg(feature = "gateway")]
pub use runner::{DEFAULT_TIMEOUT, QuotationExtractor};

use crate::error::ExtractionError;

/// Result type for extraction parsing.
pub type Result<T> = std::result::Result<T, ExtractionError>;
