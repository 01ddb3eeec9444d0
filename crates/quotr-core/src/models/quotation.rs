//! Quotation record schema.
//!
//! Records keep every field as text at rest, using the column names of the
//! spreadsheet export as wire keys. Numeric and date values are only
//! ever read through the typed accessors, which go through the field rules.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::rules::{parse_amount, parse_business_date};

/// Wire keys of the record schema, in display order.
pub mod keys {
    pub const QUOTATION_NO: &str = "QUOTATION NO";
    pub const QUOTATION_DATE: &str = "QUOTATION DATE";
    pub const CLIENT: &str = "CLIENT";
    pub const CLIENT_TYPE: &str = "NEW/OLD";
    pub const DESCRIPTION_1: &str = "DESCRIPTION 1";
    pub const DESCRIPTION_2: &str = "DESCRIPTION 2";
    pub const QTY: &str = "QTY";
    pub const UNIT_COST: &str = "UNIT COST";
    pub const TOTAL_AMOUNT: &str = "TOTAL AMOUNT";
    /// Note the double space; it is part of the key.
    pub const SALES_PERSON: &str = "SALES  PERSON";
    pub const INVOICE_NO: &str = "INVOICE NO";
    pub const STATUS: &str = "STATUS";

    pub const ALL: [&str; 12] = [
        QUOTATION_NO,
        QUOTATION_DATE,
        CLIENT,
        CLIENT_TYPE,
        DESCRIPTION_1,
        DESCRIPTION_2,
        QTY,
        UNIT_COST,
        TOTAL_AMOUNT,
        SALES_PERSON,
        INVOICE_NO,
        STATUS,
    ];
}

/// A single quotation entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotationRecord {
    /// Business identifier, e.g. `25-0001`.
    #[serde(rename = "QUOTATION NO")]
    pub quotation_number: String,

    /// Quotation date as `DD-Mon-YY` text.
    #[serde(rename = "QUOTATION DATE")]
    pub quotation_date: String,

    #[serde(rename = "CLIENT")]
    pub client: String,

    #[serde(rename = "NEW/OLD")]
    pub client_type: ClientType,

    #[serde(rename = "DESCRIPTION 1")]
    pub description1: String,

    #[serde(rename = "DESCRIPTION 2")]
    pub description2: String,

    /// Quantity as typed; may carry thousands separators.
    #[serde(rename = "QTY")]
    pub quantity: String,

    /// Unit cost as typed; may carry separators or a currency marker.
    #[serde(rename = "UNIT COST")]
    pub unit_cost: String,

    /// Total amount as typed or derived from quantity and unit cost.
    #[serde(rename = "TOTAL AMOUNT")]
    pub total_amount: String,

    #[serde(rename = "SALES  PERSON")]
    pub sales_person: String,

    /// Empty until the quotation has been invoiced.
    #[serde(rename = "INVOICE NO")]
    pub invoice_number: String,

    #[serde(rename = "STATUS")]
    pub status: QuotationStatus,
}

impl QuotationRecord {
    /// Create an empty record with schema defaults.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quantity_value(&self) -> Decimal {
        parse_amount(&self.quantity)
    }

    pub fn unit_cost_value(&self) -> Decimal {
        parse_amount(&self.unit_cost)
    }

    /// Parsed total amount; unparseable text counts as zero.
    pub fn total_amount_value(&self) -> Decimal {
        parse_amount(&self.total_amount)
    }

    /// Parsed quotation date, or `None` when the text is not `DD-Mon-YY`.
    pub fn quotation_date_value(&self) -> Option<NaiveDate> {
        parse_business_date(&self.quotation_date)
    }

    /// Whether an invoice number has been recorded.
    pub fn has_invoice(&self) -> bool {
        !self.invoice_number.trim().is_empty()
    }

    /// Fields covered by free-text search.
    pub fn searchable_fields(&self) -> [&str; 7] {
        [
            &self.quotation_number,
            &self.client,
            &self.description1,
            &self.description2,
            &self.sales_person,
            self.status.as_str(),
            &self.invoice_number,
        ]
    }

    /// Wire keys of required fields that are blank.
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.quotation_number.trim().is_empty() {
            missing.push(keys::QUOTATION_NO);
        }
        if self.client.trim().is_empty() {
            missing.push(keys::CLIENT);
        }
        if self.quotation_date.trim().is_empty() {
            missing.push(keys::QUOTATION_DATE);
        }
        missing
    }
}

/// Lifecycle status of a quotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum QuotationStatus {
    #[default]
    Pending,
    Invoiced,
    Regret,
    Open,
}

impl QuotationStatus {
    pub const ALL: [QuotationStatus; 4] = [
        QuotationStatus::Pending,
        QuotationStatus::Invoiced,
        QuotationStatus::Regret,
        QuotationStatus::Open,
    ];

    /// Canonical upper-case spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuotationStatus::Pending => "PENDING",
            QuotationStatus::Invoiced => "INVOICED",
            QuotationStatus::Regret => "REGRET",
            QuotationStatus::Open => "OPEN",
        }
    }

    /// Parse a status, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for QuotationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuotationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown quotation status: {s:?}"))
    }
}

impl TryFrom<String> for QuotationStatus {
    type Error = String;

    // Blank cells take the default; unknown text is still an error.
    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().is_empty() {
            return Ok(Self::default());
        }
        value.parse()
    }
}

impl From<QuotationStatus> for String {
    fn from(status: QuotationStatus) -> Self {
        status.as_str().to_string()
    }
}

/// Whether the client is new or returning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ClientType {
    #[default]
    New,
    Old,
}

impl ClientType {
    pub const ALL: [ClientType; 2] = [ClientType::New, ClientType::Old];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClientType::New => "NEW",
            ClientType::Old => "OLD",
        }
    }

    /// Parse a client type, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for ClientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClientType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown client type: {s:?}"))
    }
}

impl TryFrom<String> for ClientType {
    type Error = String;

    // Blank cells take the default; unknown text is still an error.
    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.trim().is_empty() {
            return Ok(Self::default());
        }
        value.parse()
    }
}

impl From<ClientType> for String {
    fn from(kind: ClientType) -> Self {
        kind.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_status_parsing() {
        assert_eq!(QuotationStatus::parse("INVOICED"), Some(QuotationStatus::Invoiced));
        assert_eq!(QuotationStatus::parse(" regret "), Some(QuotationStatus::Regret));
        assert_eq!(QuotationStatus::parse("Open"), Some(QuotationStatus::Open));
        assert_eq!(QuotationStatus::parse("CANCELLED"), None);
        assert_eq!(QuotationStatus::parse(""), None);
    }

    #[test]
    fn test_client_type_parsing() {
        assert_eq!(ClientType::parse("old"), Some(ClientType::Old));
        assert_eq!(ClientType::parse("NEW"), Some(ClientType::New));
        assert_eq!(ClientType::parse("returning"), None);
    }

    #[test]
    fn test_deserialize_wire_keys() {
        let json = r#"{
            "QUOTATION NO": "25-0007",
            "QUOTATION DATE": "14-Feb-25",
            "CLIENT": "Gulf Marine LLC",
            "NEW/OLD": "OLD",
            "DESCRIPTION 1": "Hydraulic hose",
            "DESCRIPTION 2": "",
            "QTY": "1,200",
            "UNIT COST": "4.50",
            "TOTAL AMOUNT": "5,400.00",
            "SALES  PERSON": "Rahul",
            "INVOICE NO": "INV-1001",
            "STATUS": "INVOICED"
        }"#;

        let record: QuotationRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.quotation_number, "25-0007");
        assert_eq!(record.client_type, ClientType::Old);
        assert_eq!(record.status, QuotationStatus::Invoiced);
        assert_eq!(record.sales_person, "Rahul");
        assert_eq!(record.quantity_value(), Decimal::from(1200));
        assert_eq!(record.total_amount_value(), Decimal::new(540000, 2));
        assert_eq!(
            record.quotation_date_value(),
            NaiveDate::from_ymd_opt(2025, 2, 14)
        );
        assert!(record.has_invoice());
    }

    #[test]
    fn test_missing_keys_default() {
        let record: QuotationRecord =
            serde_json::from_str(r#"{"QUOTATION NO": "25-0001"}"#).unwrap();

        assert_eq!(record.client, "");
        assert_eq!(record.status, QuotationStatus::Pending);
        assert_eq!(record.client_type, ClientType::New);
    }

    #[test]
    fn test_blank_enum_cells_take_defaults() {
        let record: QuotationRecord =
            serde_json::from_str(r#"{"STATUS": "", "NEW/OLD": "  "}"#).unwrap();
        assert_eq!(record.status, QuotationStatus::Pending);
        assert_eq!(record.client_type, ClientType::New);
    }

    #[cfg(feature = "gateway")]
    #[test]
    fn test_prompt_keys_match_schema() {
        assert_eq!(quotr_inference::SCHEMA_KEYS, keys::ALL);
    }

    #[test]
    fn test_unknown_status_rejected_on_load() {
        let result: Result<QuotationRecord, _> =
            serde_json::from_str(r#"{"STATUS": "LOST"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_uses_every_key() {
        let value = serde_json::to_value(QuotationRecord::new()).unwrap();
        let object = value.as_object().unwrap();

        for key in keys::ALL {
            assert!(object.contains_key(key), "missing key {key}");
        }
        assert_eq!(object["STATUS"], "PENDING");
        assert_eq!(object["NEW/OLD"], "NEW");
    }

    #[test]
    fn test_missing_required_fields() {
        let mut record = QuotationRecord::new();
        assert_eq!(
            record.missing_required_fields(),
            vec![keys::QUOTATION_NO, keys::CLIENT, keys::QUOTATION_DATE]
        );

        record.quotation_number = "25-0002".into();
        record.client = "  ".into();
        record.quotation_date = "02-Jan-25".into();
        assert_eq!(record.missing_required_fields(), vec![keys::CLIENT]);
    }
}
