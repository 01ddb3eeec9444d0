//! WASM bindings for quotation tracking.
//!
//! Exposes filtering, statistics, field rules, extraction-reply parsing and
//! the manual entry form to browser front-ends. Records cross the boundary
//! as plain objects keyed by the schema's wire keys.

use rust_decimal::Decimal;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use quotr_core::extraction::{QuotationParser, ResponseParser};
use quotr_core::filter::{FacetValues, FilterCriteria, FilterParams, Page, apply_filters, paginate};
use quotr_core::models::config::EnumPolicy;
use quotr_core::models::draft::{QuotationDraft, TotalProvenance};
use quotr_core::models::quotation::{ClientType, QuotationRecord, QuotationStatus, keys};
use quotr_core::stats::QuotationStats;

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(js_error)
}

fn records_from(records: JsValue) -> Result<Vec<QuotationRecord>, JsValue> {
    serde_wasm_bindgen::from_value(records).map_err(js_error)
}

// `undefined` or `null` means no filtering.
fn criteria_from(params: JsValue) -> Result<FilterCriteria, JsValue> {
    if params.is_undefined() || params.is_null() {
        return Ok(FilterCriteria::default());
    }
    let params: FilterParams = serde_wasm_bindgen::from_value(params).map_err(js_error)?;
    FilterCriteria::try_from(params).map_err(js_error)
}

/// Filter records with query-style parameters (`"all"` disables a facet).
#[wasm_bindgen]
pub fn filter_quotations(records: JsValue, params: JsValue) -> Result<JsValue, JsValue> {
    let records = records_from(records)?;
    let criteria = criteria_from(params)?;
    to_js(&apply_filters(&records, &criteria))
}

/// Filter, then return one 1-based page with paging totals.
#[wasm_bindgen]
pub fn query_quotations(
    records: JsValue,
    params: JsValue,
    page: usize,
    page_size: usize,
) -> Result<JsValue, JsValue> {
    let records = records_from(records)?;
    let criteria = criteria_from(params)?;
    let matches = apply_filters(&records, &criteria);
    let page: Page<&QuotationRecord> = paginate(&matches, page, page_size);
    to_js(&page)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsView {
    count: usize,
    total_amount: String,
    total_amount_formatted: String,
    invoiced_count: usize,
    regret_count: usize,
    conversion_rate: String,
}

impl From<QuotationStats> for StatsView {
    fn from(stats: QuotationStats) -> Self {
        Self {
            count: stats.count,
            total_amount: stats.total_amount.to_string(),
            total_amount_formatted: stats.formatted_total(),
            invoiced_count: stats.invoiced_count,
            regret_count: stats.regret_count,
            conversion_rate: stats.conversion_rate().to_string(),
        }
    }
}

/// Count, total amount and status counts of the filtered records.
#[wasm_bindgen]
pub fn compute_stats(records: JsValue, params: JsValue) -> Result<JsValue, JsValue> {
    let records = records_from(records)?;
    let criteria = criteria_from(params)?;
    let stats = quotr_core::compute_stats(apply_filters(&records, &criteria));
    to_js(&StatsView::from(stats))
}

/// Sorted distinct clients, statuses and sales persons.
#[wasm_bindgen]
pub fn facet_values(records: JsValue) -> Result<JsValue, JsValue> {
    let records = records_from(records)?;
    to_js(&FacetValues::collect(&records))
}

/// Parse a model reply into a record.
///
/// Returns `{ record, warnings }`; throws when no JSON object is found or,
/// with `reject_unknown`, when STATUS or NEW/OLD hold unknown values.
#[wasm_bindgen]
pub fn parse_extraction_response(text: &str, reject_unknown: bool) -> Result<JsValue, JsValue> {
    let policy = if reject_unknown {
        EnumPolicy::Reject
    } else {
        EnumPolicy::Coerce
    };
    let result = ResponseParser::new()
        .with_enum_policy(policy)
        .parse(text)
        .map_err(js_error)?;

    #[derive(Serialize)]
    struct ParsedReply {
        record: QuotationRecord,
        warnings: Vec<String>,
    }

    to_js(&ParsedReply {
        record: result.record,
        warnings: result.warnings,
    })
}

/// Parse amount text such as `"1,234.50"`; non-numeric text yields 0.
#[wasm_bindgen]
pub fn parse_amount(amount: &str) -> f64 {
    f64::try_from(quotr_core::parse_amount(amount)).unwrap_or(0.0)
}

/// Format an amount as `1,234.50`.
#[wasm_bindgen]
pub fn format_amount(amount: f64) -> String {
    quotr_core::format_amount(Decimal::try_from(amount).unwrap_or_default())
}

/// Total amount text for quantity and unit cost, empty unless positive.
#[wasm_bindgen]
pub fn compute_total(quantity: &str, unit_cost: &str) -> String {
    quotr_core::compute_total(quantity, unit_cost)
}

/// Parse a `DD-Mon-YY` date, returning `YYYY-MM-DD`.
#[wasm_bindgen]
pub fn parse_business_date(date: &str) -> Option<String> {
    quotr_core::parse_business_date(date).map(|d| d.format("%Y-%m-%d").to_string())
}

/// Manual entry form with automatic total derivation.
#[wasm_bindgen]
pub struct QuotationForm {
    draft: QuotationDraft,
}

#[wasm_bindgen]
impl QuotationForm {
    /// Create an empty form.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            draft: QuotationDraft::new(),
        }
    }

    /// Start from an existing record, e.g. an extraction result.
    pub fn from_record(record: JsValue) -> Result<QuotationForm, JsValue> {
        let record: QuotationRecord = serde_wasm_bindgen::from_value(record).map_err(js_error)?;
        Ok(Self {
            draft: QuotationDraft::from_record(record),
        })
    }

    /// Set a field by wire key. Editing QTY or UNIT COST re-derives the total.
    pub fn set_field(&mut self, key: &str, value: &str) -> Result<(), JsValue> {
        let draft = &mut self.draft;
        match key {
            keys::QUOTATION_NO => draft.set_quotation_number(value),
            keys::QUOTATION_DATE => draft.set_quotation_date(value),
            keys::CLIENT => draft.set_client(value),
            keys::CLIENT_TYPE => draft.set_client_type(
                ClientType::parse(value).ok_or_else(|| js_error(format!("unknown NEW/OLD value: {value}")))?,
            ),
            keys::DESCRIPTION_1 => draft.set_description1(value),
            keys::DESCRIPTION_2 => draft.set_description2(value),
            keys::QTY => draft.set_quantity(value),
            keys::UNIT_COST => draft.set_unit_cost(value),
            keys::TOTAL_AMOUNT => draft.set_total_amount(value),
            keys::SALES_PERSON => draft.set_sales_person(value),
            keys::INVOICE_NO => draft.set_invoice_number(value),
            keys::STATUS => draft.set_status(
                QuotationStatus::parse(value).ok_or_else(|| js_error(format!("unknown STATUS value: {value}")))?,
            ),
            _ => return Err(js_error(format!("unknown field: {key}"))),
        }
        Ok(())
    }

    /// Current record as a plain object.
    pub fn record(&self) -> Result<JsValue, JsValue> {
        to_js(self.draft.record())
    }

    /// `"derived"` or `"manual"`.
    pub fn total_provenance(&self) -> String {
        match self.draft.total_provenance() {
            TotalProvenance::Derived => "derived",
            TotalProvenance::ManuallyOverridden => "manual",
        }
        .to_string()
    }

    /// Wire keys of required fields that are still blank.
    pub fn missing_fields(&self) -> Vec<String> {
        self.draft
            .record()
            .missing_required_fields()
            .into_iter()
            .map(String::from)
            .collect()
    }

    /// Validate and return the finished record; throws listing missing fields.
    pub fn submit(&self) -> Result<JsValue, JsValue> {
        let record = self.draft.clone().submit().map_err(js_error)?;
        to_js(&record)
    }
}

impl Default for QuotationForm {
    fn default() -> Self {
        Self::new()
    }
}
