//! Core library for quotation record keeping.
//!
//! This crate provides:
//! - The quotation record schema and its field rules (amounts, dates)
//! - Filtering, pagination and facet listing over a working set
//! - Summary statistics
//! - Parsing of document model replies into candidate records
//! - Manual entry drafts with derived totals

pub mod dataset;
pub mod error;
pub mod extraction;
pub mod filter;
pub mod models;
pub mod rules;
pub mod stats;

pub use dataset::WorkingSet;
pub use error::{
    ExtractionError, FilterError, QuotrError, Result, SessionError, ValidationError,
};
pub use extraction::{
    ExtractionFailure, ExtractionResult, ExtractionSession, ExtractionState, FailureKind,
    QuotationParser, ResponseParser, parse_response,
};
pub use filter::{
    Facet, FacetValues, FilterCriteria, FilterParams, Page, apply_filters, filter_records,
    paginate,
};
pub use models::config::{EnumPolicy, QuotrConfig};
pub use models::draft::{QuotationDraft, TotalProvenance};
pub use models::quotation::{ClientType, QuotationRecord, QuotationStatus};
pub use rules::{compute_total, format_amount, parse_amount, parse_business_date};
pub use stats::{QuotationStats, compute_stats};

#[cfg(feature = "gateway")]
pub use extraction::QuotationExtractor;

/// Re-export document model types.
#[cfg(feature = "gateway")]
pub use quotr_inference::{ChatGatewayBackend, DocumentModel, ImagePayload, InferenceError};
