//! The shared, in-memory working set of quotation records.

pub mod embedded;

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, info};

use crate::error::{QuotrError, Result, ValidationError};
use crate::models::draft::QuotationDraft;
use crate::models::quotation::QuotationRecord;

/// Ordered record collection shared between readers and writers.
///
/// Readers take an immutable snapshot. Appends build the next snapshot and
/// swap it in under the write lock, so a reader always sees either the
/// collection before an append or after it.
#[derive(Debug, Default)]
pub struct WorkingSet {
    records: RwLock<Arc<Vec<QuotationRecord>>>,
}

impl WorkingSet {
    pub fn new(records: Vec<QuotationRecord>) -> Self {
        Self {
            records: RwLock::new(Arc::new(records)),
        }
    }

    /// Parse a JSON array of records.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let records: Vec<QuotationRecord> = serde_json::from_str(json)
            .map_err(|e| QuotrError::Dataset(format!("invalid quotation dataset: {e}")))?;
        Ok(Self::new(records))
    }

    /// Load a JSON dataset file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let set = Self::from_json_str(&content)?;
        info!("Loaded {} quotations from {}", set.len(), path.display());
        Ok(set)
    }

    /// Load the dataset compiled into the binary.
    pub fn bundled() -> Result<Self> {
        let set = Self::from_json_str(embedded::BUNDLED_QUOTATIONS)?;
        info!("Loaded {} bundled quotations", set.len());
        Ok(set)
    }

    /// Load `path` when given, otherwise the bundled dataset.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::bundled(),
        }
    }

    /// Current records, unaffected by later appends.
    pub fn snapshot(&self) -> Arc<Vec<QuotationRecord>> {
        let guard = self.records.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a record at the end, returning the new size.
    pub fn append(&self, record: QuotationRecord) -> usize {
        let mut guard = self.records.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = Vec::with_capacity(guard.len() + 1);
        next.extend(guard.iter().cloned());
        next.push(record);
        *guard = Arc::new(next);

        debug!("Working set now holds {} quotations", guard.len());
        guard.len()
    }

    /// Validate a draft and append it.
    pub fn submit_draft(&self, draft: QuotationDraft) -> std::result::Result<usize, ValidationError> {
        let record = draft.submit()?;
        Ok(self.append(record))
    }

    /// Write the current records as a JSON array.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self.snapshot().as_slice())?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
