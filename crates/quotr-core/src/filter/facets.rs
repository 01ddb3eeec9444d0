//! Distinct facet values for drop-down style selectors.

use std::borrow::Borrow;
use std::collections::BTreeSet;

use serde::Serialize;

use crate::models::quotation::{QuotationRecord, QuotationStatus};

/// Sorted distinct values of the facet fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetValues {
    pub clients: Vec<String>,
    pub statuses: Vec<QuotationStatus>,
    pub sales_persons: Vec<String>,
}

impl FacetValues {
    /// Collect distinct values, skipping blank text.
    pub fn collect<I, R>(records: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Borrow<QuotationRecord>,
    {
        let mut clients = BTreeSet::new();
        let mut statuses = BTreeSet::new();
        let mut sales_persons = BTreeSet::new();

        for record in records {
            let record = record.borrow();
            if !record.client.trim().is_empty() {
                clients.insert(record.client.clone());
            }
            if !record.sales_person.trim().is_empty() {
                sales_persons.insert(record.sales_person.clone());
            }
            statuses.insert(record.status);
        }

        Self {
            clients: clients.into_iter().collect(),
            statuses: statuses.into_iter().collect(),
            sales_persons: sales_persons.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_collect_sorted_unique() {
        let records = vec![
            QuotationRecord {
                client: "Zenith".into(),
                sales_person: "Rahul".into(),
                status: QuotationStatus::Invoiced,
                ..QuotationRecord::default()
            },
            QuotationRecord {
                client: "Acme".into(),
                sales_person: "".into(),
                ..QuotationRecord::default()
            },
            QuotationRecord {
                client: "Zenith".into(),
                sales_person: "Anil".into(),
                status: QuotationStatus::Regret,
                ..QuotationRecord::default()
            },
        ];

        let facets = FacetValues::collect(&records);
        assert_eq!(facets.clients, vec!["Acme", "Zenith"]);
        assert_eq!(facets.sales_persons, vec!["Anil", "Rahul"]);
        assert_eq!(
            facets.statuses,
            vec![QuotationStatus::Pending, QuotationStatus::Invoiced, QuotationStatus::Regret]
        );
    }
}
