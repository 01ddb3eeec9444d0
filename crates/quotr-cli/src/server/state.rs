//! Shared handler state.

use std::sync::Arc;

use quotr_core::extraction::QuotationExtractor;
use quotr_core::WorkingSet;

#[derive(Clone)]
pub struct AppState {
    pub quotations: Arc<WorkingSet>,
    pub extractor: Arc<QuotationExtractor>,
    /// Page size used when a request does not name one.
    pub page_size: usize,
}

impl AppState {
    pub fn new(quotations: WorkingSet, extractor: QuotationExtractor, page_size: usize) -> Self {
        Self {
            quotations: Arc::new(quotations),
            extractor: Arc::new(extractor),
            page_size,
        }
    }
}
