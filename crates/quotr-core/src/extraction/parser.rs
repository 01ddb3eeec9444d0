//! Turning model reply text into a quotation record.

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use super::Result;
use crate::error::ExtractionError;
use crate::models::config::{EnumPolicy, ExtractionConfig};
use crate::models::quotation::{ClientType, QuotationRecord, QuotationStatus, keys};
use crate::rules::normalize_business_date;
use crate::rules::patterns::{ANY_FENCE, JSON_FENCE};

/// Result of parsing a model reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    /// The candidate record. Never written to the working set by the parser.
    pub record: QuotationRecord,

    /// The JSON text that was parsed.
    pub json_text: String,

    /// Non-fatal issues, such as coerced enum values.
    pub warnings: Vec<String>,
}

/// Parser for model replies containing a quotation as JSON.
pub trait QuotationParser {
    fn parse(&self, text: &str) -> Result<ExtractionResult>;
}

/// Parser for JSON replies, tolerant of code fences and key spelling drift.
#[derive(Debug, Clone)]
pub struct ResponseParser {
    enum_policy: EnumPolicy,
    normalize_dates: bool,
}

impl ResponseParser {
    pub fn new() -> Self {
        Self {
            enum_policy: EnumPolicy::Coerce,
            normalize_dates: true,
        }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new()
            .with_enum_policy(config.enum_policy)
            .with_date_normalization(config.normalize_dates)
    }

    pub fn with_enum_policy(mut self, policy: EnumPolicy) -> Self {
        self.enum_policy = policy;
        self
    }

    pub fn with_date_normalization(mut self, enabled: bool) -> Self {
        self.normalize_dates = enabled;
        self
    }

    fn enum_field<T: Default>(
        &self,
        field: &'static str,
        raw: String,
        parse: impl Fn(&str) -> Option<T>,
        warnings: &mut Vec<String>,
    ) -> Result<T> {
        if raw.trim().is_empty() {
            return Ok(T::default());
        }

        match parse(&raw) {
            Some(value) => Ok(value),
            None => match self.enum_policy {
                EnumPolicy::Reject => Err(ExtractionError::UnrecognizedValue { field, value: raw }),
                EnumPolicy::Coerce => {
                    warn!("Unrecognized {} value {:?}, using default", field, raw);
                    warnings.push(format!("{field}: unrecognized value {raw:?} replaced with default"));
                    Ok(T::default())
                }
            },
        }
    }
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new()
    }
}

impl QuotationParser for ResponseParser {
    fn parse(&self, text: &str) -> Result<ExtractionResult> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ExtractionError::EmptyResponse);
        }

        info!("Parsing quotation from {} characters of model output", trimmed.len());

        let json_text = locate_json(trimmed);
        let object = parse_object(json_text)?;
        let mut warnings = Vec::new();

        let mut text_field = |key: &'static str| -> String {
            match lookup(&object, key) {
                Some(value) => match render_value(value) {
                    Some(rendered) => rendered,
                    None => {
                        warnings.push(format!("{key}: nested value ignored"));
                        String::new()
                    }
                },
                None => String::new(),
            }
        };

        let mut record = QuotationRecord {
            quotation_number: text_field(keys::QUOTATION_NO),
            quotation_date: text_field(keys::QUOTATION_DATE),
            client: text_field(keys::CLIENT),
            client_type: ClientType::default(),
            description1: text_field(keys::DESCRIPTION_1),
            description2: text_field(keys::DESCRIPTION_2),
            quantity: text_field(keys::QTY),
            unit_cost: text_field(keys::UNIT_COST),
            total_amount: text_field(keys::TOTAL_AMOUNT),
            sales_person: text_field(keys::SALES_PERSON),
            invoice_number: text_field(keys::INVOICE_NO),
            status: QuotationStatus::default(),
        };
        let raw_client_type = text_field(keys::CLIENT_TYPE);
        let raw_status = text_field(keys::STATUS);

        record.client_type = self.enum_field(
            keys::CLIENT_TYPE,
            raw_client_type,
            ClientType::parse,
            &mut warnings,
        )?;
        record.status = self.enum_field(
            keys::STATUS,
            raw_status,
            QuotationStatus::parse,
            &mut warnings,
        )?;

        if self.normalize_dates && !record.quotation_date.is_empty() {
            let normalized = normalize_business_date(&record.quotation_date);
            if normalized != record.quotation_date {
                debug!("Normalized date {:?} -> {:?}", record.quotation_date, normalized);
                record.quotation_date = normalized;
            }
        }

        debug!(
            "Extracted quotation {:?} for {:?} ({} warnings)",
            record.quotation_number,
            record.client,
            warnings.len()
        );

        Ok(ExtractionResult {
            record,
            json_text: json_text.to_string(),
            warnings,
        })
    }
}

/// Parse with the default policy.
pub fn parse_response(text: &str) -> Result<QuotationRecord> {
    ResponseParser::new().parse(text).map(|result| result.record)
}

/// Narrow the reply to the JSON text: a `json`-tagged fence first, then any
/// fence, else the whole (trimmed) reply.
pub fn locate_json(text: &str) -> &str {
    JSON_FENCE
        .captures(text)
        .or_else(|| ANY_FENCE.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .unwrap_or_else(|| text.trim())
}

fn parse_object(json_text: &str) -> Result<Map<String, Value>> {
    let value: Value = match serde_json::from_str(json_text) {
        Ok(value) => value,
        // Prose around a bare object: fall back to the outermost braces
        Err(err) => embedded_object(json_text)
            .and_then(|candidate| serde_json::from_str(candidate).ok())
            .ok_or_else(|| ExtractionError::Format(err.to_string()))?,
    };

    match value {
        Value::Object(map) => Ok(map),
        other => Err(ExtractionError::Format(format!(
            "expected a JSON object, found {}",
            json_kind(&other)
        ))),
    }
}

fn embedded_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Exact key first, then case-insensitive with whitespace collapsed.
fn lookup<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    if let Some(value) = object.get(key) {
        return Some(value);
    }
    let wanted = canonical_key(key);
    object
        .iter()
        .find(|(candidate, _)| canonical_key(candidate) == wanted)
        .map(|(_, value)| value)
}

fn canonical_key(key: &str) -> String {
    key.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Text form of a scalar; `None` for arrays and objects.
fn render_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fenced_json_reply() {
        let reply = "```json\n{\"QUOTATION NO\":\"25-0001\",\"CLIENT\":\"Acme\"}\n```";
        let record = parse_response(reply).unwrap();

        assert_eq!(
            record,
            QuotationRecord {
                quotation_number: "25-0001".into(),
                client: "Acme".into(),
                ..QuotationRecord::default()
            }
        );
        assert_eq!(record.status, QuotationStatus::Pending);
        assert_eq!(record.client_type, ClientType::New);
    }

    #[test]
    fn test_json_fence_wins_over_untagged() {
        let reply = "Notes:\n```\nnot json\n```\nData:\n```json\n{\"CLIENT\":\"Tagged\"}\n```";
        assert_eq!(locate_json(reply), "{\"CLIENT\":\"Tagged\"}");
        assert_eq!(parse_response(reply).unwrap().client, "Tagged");
    }

    #[test]
    fn test_untagged_fence_and_bare_json() {
        assert_eq!(parse_response("```\n{\"CLIENT\":\"Plain\"}\n```").unwrap().client, "Plain");
        assert_eq!(parse_response("  {\"CLIENT\":\"Bare\"}  ").unwrap().client, "Bare");
    }

    #[test]
    fn test_object_inside_prose() {
        let reply = "Here is the data you asked for: {\"CLIENT\": \"Prose\"} Let me know!";
        assert_eq!(parse_response(reply).unwrap().client, "Prose");
    }

    #[test]
    fn test_non_json_is_format_error() {
        assert!(matches!(
            parse_response("I could not read this document."),
            Err(ExtractionError::Format(_))
        ));
        assert_eq!(parse_response("   "), Err(ExtractionError::EmptyResponse));
    }

    #[test]
    fn test_non_object_json_is_format_error() {
        let err = parse_response("[1, 2, 3]").unwrap_err();
        assert_eq!(
            err,
            ExtractionError::Format("expected a JSON object, found an array".into())
        );
    }

    #[test]
    fn test_scalars_rendered_as_text_and_null_is_empty() {
        let reply = r#"{"QTY": 12, "UNIT COST": 4.5, "INVOICE NO": null, "DESCRIPTION 1": true}"#;
        let record = parse_response(reply).unwrap();

        assert_eq!(record.quantity, "12");
        assert_eq!(record.unit_cost, "4.5");
        assert_eq!(record.invoice_number, "");
        assert_eq!(record.description1, "true");
    }

    #[test]
    fn test_lenient_key_matching() {
        let reply = r#"{"Sales Person": "Meera", "quotation   no": "25-0042", "SALES  PERSON": ""}"#;
        let record = parse_response(reply).unwrap();

        // exact key present, so it wins even when empty
        assert_eq!(record.sales_person, "");
        assert_eq!(record.quotation_number, "25-0042");

        let record = parse_response(r#"{"SALES PERSON": "Meera"}"#).unwrap();
        assert_eq!(record.sales_person, "Meera");
    }

    #[test]
    fn test_enum_values_parsed_leniently() {
        let record = parse_response(r#"{"STATUS": "invoiced", "NEW/OLD": " old "}"#).unwrap();
        assert_eq!(record.status, QuotationStatus::Invoiced);
        assert_eq!(record.client_type, ClientType::Old);
    }

    #[test]
    fn test_unknown_enum_coerced_with_warning() {
        let result = ResponseParser::new()
            .parse(r#"{"STATUS": "CANCELLED", "NEW/OLD": "EXISTING"}"#)
            .unwrap();

        assert_eq!(result.record.status, QuotationStatus::Pending);
        assert_eq!(result.record.client_type, ClientType::New);
        assert_eq!(result.warnings.len(), 2);
    }

    #[test]
    fn test_unknown_enum_rejected() {
        let parser = ResponseParser::new().with_enum_policy(EnumPolicy::Reject);
        let err = parser.parse(r#"{"STATUS": "CANCELLED"}"#).unwrap_err();

        assert_eq!(
            err,
            ExtractionError::UnrecognizedValue {
                field: keys::STATUS,
                value: "CANCELLED".into()
            }
        );
        // blank values still fall back to the default
        assert!(parser.parse(r#"{"STATUS": ""}"#).is_ok());
    }

    #[test]
    fn test_date_normalization() {
        let reply = r#"{"QUOTATION DATE": "14/02/2025"}"#;
        assert_eq!(parse_response(reply).unwrap().quotation_date, "14-Feb-25");

        let raw = ResponseParser::new()
            .with_date_normalization(false)
            .parse(reply)
            .unwrap();
        assert_eq!(raw.record.quotation_date, "14/02/2025");
    }

    #[test]
    fn test_nested_values_ignored_with_warning() {
        let result = ResponseParser::new()
            .parse(r#"{"CLIENT": {"name": "Acme"}}"#)
            .unwrap();
        assert_eq!(result.record.client, "");
        assert_eq!(result.warnings, vec!["CLIENT: nested value ignored".to_string()]);
    }
}
