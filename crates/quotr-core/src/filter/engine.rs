//! Filter evaluation.

use tracing::debug;

use super::criteria::FilterCriteria;
use crate::models::quotation::QuotationRecord;

impl FilterCriteria {
    /// Whether a single record satisfies every predicate.
    pub fn matches(&self, record: &QuotationRecord) -> bool {
        self.matches_search(record)
            && self.client.matches_str(&record.client)
            && self.status.matches(&record.status)
            && self.sales_person.matches_str(&record.sales_person)
            && self.client_type.matches(&record.client_type)
            && contains_ignore_case(&record.quotation_number, &self.quotation_number)
            && contains_ignore_case(&record.invoice_number, &self.invoice_number)
            && self.matches_date_range(record)
    }

    fn matches_search(&self, record: &QuotationRecord) -> bool {
        if self.search_query.is_empty() {
            return true;
        }
        let needle = self.search_query.to_lowercase();
        record
            .searchable_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    // Records whose date does not parse never satisfy an active range.
    fn matches_date_range(&self, record: &QuotationRecord) -> bool {
        if !self.has_date_range() {
            return true;
        }
        let Some(date) = record.quotation_date_value() else {
            return false;
        };
        self.date_from.is_none_or(|from| date >= from) && self.date_to.is_none_or(|to| date <= to)
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Select the records matching `criteria`, preserving input order.
pub fn apply_filters<'a>(
    records: &'a [QuotationRecord],
    criteria: &FilterCriteria,
) -> Vec<&'a QuotationRecord> {
    if criteria.is_empty() {
        return records.iter().collect();
    }

    let selected: Vec<&QuotationRecord> = records.iter().filter(|r| criteria.matches(r)).collect();
    debug!("Filter kept {} of {} records", selected.len(), records.len());
    selected
}

/// Owned variant of [`apply_filters`].
pub fn filter_records(records: &[QuotationRecord], criteria: &FilterCriteria) -> Vec<QuotationRecord> {
    apply_filters(records, criteria).into_iter().cloned().collect()
}
