//! Request and response bodies.

use serde::{Deserialize, Serialize};

use quotr_core::stats::QuotationStats;

/// `{ "success": bool, "data"?: T, "error"?: string }`
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Body of `POST /extract-quotation`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractRequest {
    pub image_data: Option<String>,
}

/// Paging half of the `GET /quotations` query string.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
    #[serde(alias = "pageSize")]
    pub page_size: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: QuotationStats,
    pub total_amount_formatted: String,
    pub conversion_rate: String,
}

impl From<QuotationStats> for StatsResponse {
    fn from(stats: QuotationStats) -> Self {
        Self {
            stats,
            total_amount_formatted: stats.formatted_total(),
            conversion_rate: stats.conversion_rate().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub quotations: usize,
    pub model: String,
}
