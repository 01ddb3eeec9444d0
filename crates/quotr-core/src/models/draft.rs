//! Manual entry of quotation records.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ValidationError;
use crate::models::quotation::{ClientType, QuotationRecord, QuotationStatus};
use crate::rules::compute_total;

/// Where the current total amount came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TotalProvenance {
    /// Computed from quantity and unit cost.
    #[default]
    Derived,
    /// Typed in directly.
    ManuallyOverridden,
}

/// A quotation being filled in by hand.
///
/// Editing quantity or unit cost recomputes the total and marks it derived,
/// even if it had been overridden. Editing the total directly marks it
/// overridden until the next quantity or unit cost edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuotationDraft {
    record: QuotationRecord,
    total_provenance: TotalProvenance,
}

impl QuotationDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing record, e.g. an extraction result under review.
    ///
    /// A non-empty total is kept as typed; an empty one is derived.
    pub fn from_record(record: QuotationRecord) -> Self {
        let mut draft = Self {
            record,
            total_provenance: TotalProvenance::ManuallyOverridden,
        };
        if draft.record.total_amount.trim().is_empty() {
            draft.recompute_total();
        }
        draft
    }

    pub fn record(&self) -> &QuotationRecord {
        &self.record
    }

    pub fn total_provenance(&self) -> TotalProvenance {
        self.total_provenance
    }

    pub fn set_quotation_number(&mut self, value: impl Into<String>) {
        self.record.quotation_number = value.into();
    }

    pub fn set_quotation_date(&mut self, value: impl Into<String>) {
        self.record.quotation_date = value.into();
    }

    pub fn set_client(&mut self, value: impl Into<String>) {
        self.record.client = value.into();
    }

    pub fn set_client_type(&mut self, value: ClientType) {
        self.record.client_type = value;
    }

    pub fn set_description1(&mut self, value: impl Into<String>) {
        self.record.description1 = value.into();
    }

    pub fn set_description2(&mut self, value: impl Into<String>) {
        self.record.description2 = value.into();
    }

    pub fn set_quantity(&mut self, value: impl Into<String>) {
        self.record.quantity = value.into();
        self.recompute_total();
    }

    pub fn set_unit_cost(&mut self, value: impl Into<String>) {
        self.record.unit_cost = value.into();
        self.recompute_total();
    }

    /// Override the total amount.
    pub fn set_total_amount(&mut self, value: impl Into<String>) {
        self.record.total_amount = value.into();
        self.total_provenance = TotalProvenance::ManuallyOverridden;
    }

    pub fn set_sales_person(&mut self, value: impl Into<String>) {
        self.record.sales_person = value.into();
    }

    pub fn set_invoice_number(&mut self, value: impl Into<String>) {
        self.record.invoice_number = value.into();
    }

    pub fn set_status(&mut self, value: QuotationStatus) {
        self.record.status = value;
    }

    /// Check required fields without consuming the draft.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing = self.record.missing_required_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingFields(missing))
        }
    }

    /// Finish the draft, yielding a record ready to be appended.
    pub fn submit(self) -> Result<QuotationRecord, ValidationError> {
        self.validate()?;
        Ok(self.record)
    }

    fn recompute_total(&mut self) {
        self.record.total_amount = compute_total(&self.record.quantity, &self.record.unit_cost);
        self.total_provenance = TotalProvenance::Derived;
        debug!(total = %self.record.total_amount, "recomputed draft total");
    }
}
