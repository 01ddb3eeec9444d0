//! Endpoint handlers.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use tracing::{info, warn};

use quotr_core::extraction::{ExtractionFailure, ExtractionState};
use quotr_core::filter::{FacetValues, FilterCriteria, FilterParams, Page, apply_filters, paginate};
use quotr_core::models::draft::QuotationDraft;
use quotr_core::models::quotation::QuotationRecord;
use quotr_core::stats::compute_stats;
use quotr_inference::ImagePayload;

use super::error::ApiError;
use super::state::AppState;
use super::types::{Envelope, ExtractRequest, HealthResponse, PageQuery, StatsResponse};

type ApiResult<T> = Result<Json<Envelope<T>>, ApiError>;

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<Envelope<HealthResponse>> {
    Json(Envelope::success(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        quotations: state.quotations.len(),
        model: state.extractor.model_name().to_string(),
    }))
}

/// POST /extract-quotation
///
/// The extracted record is returned only; it is not added to the working set.
pub async fn extract_quotation(
    State(state): State<AppState>,
    body: Result<Json<ExtractRequest>, JsonRejection>,
) -> ApiResult<QuotationRecord> {
    let Json(request) = body.map_err(|rejection| {
        ApiError::internal(format!("Invalid request body: {}", rejection.body_text()))
    })?;

    let image_data = request.image_data.unwrap_or_default();
    let image = ImagePayload::from_data_url(&image_data).map_err(|err| {
        warn!("Rejected extraction request: {}", err);
        ExtractionFailure::from(err)
    })?;

    match state.extractor.extract(&image).await {
        ExtractionState::Succeeded(record) => {
            info!("Extracted quotation {:?}", record.quotation_number);
            Ok(Json(Envelope::success(record)))
        }
        ExtractionState::Failed(failure) => Err(failure.into()),
        other => Err(ApiError::internal(format!(
            "Extraction ended in unexpected state {}",
            other.name()
        ))),
    }
}

/// OPTIONS /extract-quotation for clients that skip CORS pre-flight headers.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

fn criteria_from(params: Result<Query<FilterParams>, QueryRejection>) -> Result<FilterCriteria, ApiError> {
    let Query(params) = params?;
    Ok(FilterCriteria::try_from(params)?)
}

/// GET /quotations
pub async fn list_quotations(
    State(state): State<AppState>,
    params: Result<Query<FilterParams>, QueryRejection>,
    paging: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<Page<QuotationRecord>> {
    let criteria = criteria_from(params)?;
    let Query(paging) = paging?;

    let snapshot = state.quotations.snapshot();
    let matches = apply_filters(&snapshot, &criteria);
    let page = paginate(
        &matches,
        paging.page.unwrap_or(1),
        paging.page_size.unwrap_or(state.page_size),
    );

    Ok(Json(Envelope::success(page.map(QuotationRecord::clone))))
}

/// GET /quotations/stats
pub async fn quotation_stats(
    State(state): State<AppState>,
    params: Result<Query<FilterParams>, QueryRejection>,
) -> ApiResult<StatsResponse> {
    let criteria = criteria_from(params)?;

    let snapshot = state.quotations.snapshot();
    let stats = compute_stats(apply_filters(&snapshot, &criteria));

    Ok(Json(Envelope::success(stats.into())))
}

/// GET /quotations/facets
pub async fn quotation_facets(State(state): State<AppState>) -> Json<Envelope<FacetValues>> {
    let snapshot = state.quotations.snapshot();
    Json(Envelope::success(FacetValues::collect(snapshot.iter())))
}

/// POST /quotations
///
/// Validates a manually entered record and appends it to the working set.
pub async fn add_quotation(
    State(state): State<AppState>,
    body: Result<Json<QuotationRecord>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<QuotationRecord>>), ApiError> {
    let Json(record) = body?;

    let record = QuotationDraft::from_record(record).submit()?;
    let count = state.quotations.append(record.clone());
    info!("Added quotation {} ({} total)", record.quotation_number, count);

    Ok((StatusCode::CREATED, Json(Envelope::success(record))))
}

