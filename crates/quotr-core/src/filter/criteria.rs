//! Filter criteria and their query-string form.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::FilterError;
use crate::models::quotation::{ClientType, QuotationStatus};
use crate::rules::parse_iso_date;

/// Sentinel meaning "no restriction" in query-style parameters.
pub const ALL_SENTINEL: &str = "all";

/// An exact-match facet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Facet<T> {
    Unfiltered,
    Equals(T),
}

impl<T> Default for Facet<T> {
    fn default() -> Self {
        Facet::Unfiltered
    }
}

impl<T: PartialEq> Facet<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Facet::Unfiltered => true,
            Facet::Equals(expected) => expected == value,
        }
    }
}

impl<T> Facet<T> {
    pub fn is_unfiltered(&self) -> bool {
        matches!(self, Facet::Unfiltered)
    }

    pub fn as_option(&self) -> Option<&T> {
        match self {
            Facet::Unfiltered => None,
            Facet::Equals(value) => Some(value),
        }
    }
}

impl Facet<String> {
    /// Exact match on a text field.
    pub fn matches_str(&self, value: &str) -> bool {
        match self {
            Facet::Unfiltered => true,
            Facet::Equals(expected) => expected == value,
        }
    }
}

/// Typed filter criteria applied to the working set.
///
/// Empty text fields and unfiltered facets impose no restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Case-insensitive substring over the searchable fields.
    pub search_query: String,
    pub client: Facet<String>,
    pub status: Facet<QuotationStatus>,
    pub sales_person: Facet<String>,
    pub client_type: Facet<ClientType>,
    /// Case-insensitive substring on the quotation number.
    pub quotation_number: String,
    /// Case-insensitive substring on the invoice number.
    pub invoice_number: String,
    /// Inclusive lower bound on the quotation date.
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on the quotation date.
    pub date_to: Option<NaiveDate>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search_query = query.into();
        self
    }

    pub fn with_client(mut self, client: impl Into<String>) -> Self {
        self.client = Facet::Equals(client.into());
        self
    }

    pub fn with_status(mut self, status: QuotationStatus) -> Self {
        self.status = Facet::Equals(status);
        self
    }

    pub fn with_sales_person(mut self, sales_person: impl Into<String>) -> Self {
        self.sales_person = Facet::Equals(sales_person.into());
        self
    }

    pub fn with_client_type(mut self, client_type: ClientType) -> Self {
        self.client_type = Facet::Equals(client_type);
        self
    }

    pub fn with_quotation_number(mut self, fragment: impl Into<String>) -> Self {
        self.quotation_number = fragment.into();
        self
    }

    pub fn with_invoice_number(mut self, fragment: impl Into<String>) -> Self {
        self.invoice_number = fragment.into();
        self
    }

    pub fn with_date_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }

    /// True when no predicate restricts the result.
    pub fn is_empty(&self) -> bool {
        self.search_query.is_empty()
            && self.client.is_unfiltered()
            && self.status.is_unfiltered()
            && self.sales_person.is_unfiltered()
            && self.client_type.is_unfiltered()
            && self.quotation_number.is_empty()
            && self.invoice_number.is_empty()
            && self.date_from.is_none()
            && self.date_to.is_none()
    }

    pub fn has_date_range(&self) -> bool {
        self.date_from.is_some() || self.date_to.is_some()
    }
}

/// Query-string form of [`FilterCriteria`].
///
/// Facets use `all` (or an empty value) for "no restriction" and dates use
/// `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterParams {
    pub search: String,
    pub client: String,
    pub status: String,
    pub sales_person: String,
    #[serde(alias = "clientType")]
    pub new_old: String,
    pub quotation_no: String,
    pub invoice_no: String,
    pub date_from: String,
    pub date_to: String,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            search: String::new(),
            client: ALL_SENTINEL.to_string(),
            status: ALL_SENTINEL.to_string(),
            sales_person: ALL_SENTINEL.to_string(),
            new_old: ALL_SENTINEL.to_string(),
            quotation_no: String::new(),
            invoice_no: String::new(),
            date_from: String::new(),
            date_to: String::new(),
        }
    }
}

fn is_unrestricted(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.eq_ignore_ascii_case(ALL_SENTINEL)
}

fn text_facet(value: String) -> Facet<String> {
    if is_unrestricted(&value) {
        Facet::Unfiltered
    } else {
        Facet::Equals(value)
    }
}

fn date_bound(field: &'static str, value: &str) -> Result<Option<NaiveDate>, FilterError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    parse_iso_date(value)
        .map(Some)
        .ok_or_else(|| FilterError::InvalidDate {
            field,
            value: value.to_string(),
        })
}

impl TryFrom<FilterParams> for FilterCriteria {
    type Error = FilterError;

    fn try_from(params: FilterParams) -> Result<Self, Self::Error> {
        let status = if is_unrestricted(&params.status) {
            Facet::Unfiltered
        } else {
            QuotationStatus::parse(&params.status)
                .map(Facet::Equals)
                .ok_or(FilterError::InvalidStatus(params.status))?
        };

        let client_type = if is_unrestricted(&params.new_old) {
            Facet::Unfiltered
        } else {
            ClientType::parse(&params.new_old)
                .map(Facet::Equals)
                .ok_or(FilterError::InvalidClientType(params.new_old))?
        };

        Ok(Self {
            search_query: params.search.trim().to_string(),
            client: text_facet(params.client),
            status,
            sales_person: text_facet(params.sales_person),
            client_type,
            quotation_number: params.quotation_no.trim().to_string(),
            invoice_number: params.invoice_no.trim().to_string(),
            date_from: date_bound("dateFrom", &params.date_from)?,
            date_to: date_bound("dateTo", &params.date_to)?,
        })
    }
}

impl From<&FilterCriteria> for FilterParams {
    fn from(criteria: &FilterCriteria) -> Self {
        fn facet_text<T: ToString>(facet: &Facet<T>) -> String {
            facet
                .as_option()
                .map(ToString::to_string)
                .unwrap_or_else(|| ALL_SENTINEL.to_string())
        }

        Self {
            search: criteria.search_query.clone(),
            client: facet_text(&criteria.client),
            status: facet_text(&criteria.status),
            sales_person: facet_text(&criteria.sales_person),
            new_old: facet_text(&criteria.client_type),
            quotation_no: criteria.quotation_number.clone(),
            invoice_no: criteria.invoice_number.clone(),
            date_from: criteria
                .date_from
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            date_to: criteria
                .date_to
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_params_are_unrestricted() {
        let criteria = FilterCriteria::try_from(FilterParams::default()).unwrap();
        assert!(criteria.is_empty());
        assert_eq!(criteria, FilterCriteria::default());
    }

    #[test]
    fn test_all_sentinel_and_blank_mean_unfiltered() {
        let params = FilterParams {
            client: "ALL".into(),
            status: "".into(),
            ..FilterParams::default()
        };
        let criteria = FilterCriteria::try_from(params).unwrap();
        assert!(criteria.client.is_unfiltered());
        assert!(criteria.status.is_unfiltered());
    }

    #[test]
    fn test_params_to_criteria() {
        let params = FilterParams {
            search: "  hose ".into(),
            client: "Gulf Marine LLC".into(),
            status: "invoiced".into(),
            new_old: "OLD".into(),
            date_from: "2025-01-01".into(),
            ..FilterParams::default()
        };

        let criteria = FilterCriteria::try_from(params).unwrap();
        assert_eq!(criteria.search_query, "hose");
        assert_eq!(criteria.client, Facet::Equals("Gulf Marine LLC".to_string()));
        assert_eq!(criteria.status, Facet::Equals(QuotationStatus::Invoiced));
        assert_eq!(criteria.client_type, Facet::Equals(ClientType::Old));
        assert_eq!(criteria.date_from, NaiveDate::from_ymd_opt(2025, 1, 1));
        assert_eq!(criteria.date_to, None);
    }

    #[test]
    fn test_invalid_params() {
        let bad_status = FilterParams {
            status: "LOST".into(),
            ..FilterParams::default()
        };
        assert_eq!(
            FilterCriteria::try_from(bad_status),
            Err(FilterError::InvalidStatus("LOST".into()))
        );

        let bad_date = FilterParams {
            date_to: "31/01/2025".into(),
            ..FilterParams::default()
        };
        assert!(matches!(
            FilterCriteria::try_from(bad_date),
            Err(FilterError::InvalidDate { field: "dateTo", .. })
        ));
    }

    #[test]
    fn test_params_deserialize_camel_case() {
        let params: FilterParams =
            serde_json::from_str(r#"{"salesPerson": "Rahul", "newOld": "NEW"}"#).unwrap();
        assert_eq!(params.sales_person, "Rahul");
        assert_eq!(params.new_old, "NEW");
        assert_eq!(params.client, "all");
    }

    #[test]
    fn test_criteria_to_params() {
        let criteria = FilterCriteria::new()
            .with_status(QuotationStatus::Regret)
            .with_date_range(NaiveDate::from_ymd_opt(2025, 3, 1), None);
        let params = FilterParams::from(&criteria);

        assert_eq!(params.status, "REGRET");
        assert_eq!(params.client, "all");
        assert_eq!(params.date_from, "2025-03-01");
        assert_eq!(FilterCriteria::try_from(params).unwrap(), criteria);
    }
}
