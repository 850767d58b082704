//! REST API handlers for prediction, optimization, and data endpoints.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use uuid::Uuid;

use bidder_allocation::types::PredictionResponse;
use bidder_core::types::{Ad, AllMarketingData, Campaign, CampaignInput};
use bidder_core::BidderError;
use bidder_optimizer::models::{
    ComparisonRequest, GaParams, OptimizationRequest, TabuParams, TabuSearchRequest,
};
use bidder_optimizer::{OptimizerClient, ResolvedOptimization, SubmissionBatch};

use crate::store::MarketingStore;

/// Shared application state for REST handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MarketingStore>,
    pub optimizer: Arc<OptimizerClient>,
    pub node_id: String,
    pub start_time: Instant,
    pub prediction_seed: Option<u64>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

// ─── Request / response bodies ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GaOptimizeBody {
    pub campaigns: Vec<Campaign>,
    pub ads: Vec<Ad>,
    pub total_budget: f64,
    #[serde(default)]
    pub risk_factor: f64,
    #[serde(flatten)]
    pub ga: GaParams,
}

#[derive(Debug, Deserialize)]
pub struct TabuOptimizeBody {
    pub campaigns: Vec<Campaign>,
    pub ads: Vec<Ad>,
    pub total_budget: f64,
    #[serde(default)]
    pub risk_factor: f64,
    #[serde(flatten)]
    pub tabu: TabuParams,
}

#[derive(Debug, Deserialize)]
pub struct CompareBody {
    pub campaigns: Vec<Campaign>,
    pub ads: Vec<Ad>,
    pub total_budget: f64,
    #[serde(default)]
    pub risk_factor: f64,
    #[serde(flatten)]
    pub ga: GaParams,
    #[serde(flatten)]
    pub tabu: TabuParams,
}

#[derive(Debug, Serialize)]
pub struct ComparisonResponse {
    pub ga: Option<ResolvedOptimization>,
    pub ts: Option<ResolvedOptimization>,
    pub comparison: serde_json::Value,
    pub winner: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub node_id: String,
    pub uptime_secs: u64,
}

// ─── Validation ─────────────────────────────────────────────────────────────

/// Validate an optimization submission at the API boundary.
fn validate_submission(
    campaigns: &[Campaign],
    ads: &[Ad],
    total_budget: f64,
) -> Result<(), String> {
    if campaigns.is_empty() || ads.is_empty() {
        return Err("Campaigns and Ads lists cannot be empty.".to_string());
    }

    let total_approved: f64 = campaigns.iter().map(|c| c.approved_budget).sum();
    if total_budget < total_approved {
        return Err(format!(
            "Total budget (${}) is less than the sum of approved budgets (${}). \
             Please increase the total budget to at least ${}.",
            fmt_usd(total_budget),
            fmt_usd(total_approved),
            fmt_usd(total_approved)
        ));
    }

    Ok(())
}

/// Two-decimal amount with thousands separators, e.g. `1234567.8` →
/// `"1,234,567.80"`.
fn fmt_usd(amount: f64) -> String {
    let formatted = format!("{:.2}", amount);
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some(parts) => parts,
        None => (formatted.as_str(), "00"),
    };
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}.{}", sign, grouped, frac_part)
}

fn validation_error(message: String) -> ApiError {
    warn!(error = %message, "Optimization request validation failed");
    metrics::counter!("api.validation_errors").increment(1);
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: "invalid_request".to_string(),
            message,
        }),
    )
}

/// Map domain errors to HTTP responses.
fn error_response(err: BidderError) -> ApiError {
    let (status, code) = match &err {
        BidderError::Validation(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
        BidderError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
        BidderError::Backend(_) => (StatusCode::BAD_GATEWAY, "optimizer_error"),
        BidderError::Unreachable(_) => (StatusCode::SERVICE_UNAVAILABLE, "optimizer_unreachable"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
    };

    if status.is_server_error() {
        error!(error = %err, "Request failed");
        metrics::counter!("api.errors").increment(1);
    } else {
        warn!(error = %err, "Request rejected");
        metrics::counter!("api.validation_errors").increment(1);
    }

    (
        status,
        Json(ErrorResponse {
            error: code.to_string(),
            message: err.to_string(),
        }),
    )
}

// ─── Prediction ─────────────────────────────────────────────────────────────

/// POST /v1/predict — per-segment performance prediction and budget split.
pub async fn handle_predict(
    State(state): State<AppState>,
    Json(input): Json<CampaignInput>,
) -> Result<Json<PredictionResponse>, ApiError> {
    if let Err(e) = bidder_allocation::validate(&input) {
        return Err(error_response(e));
    }

    state
        .optimizer
        .predict_or_mock(&input, state.prediction_seed)
        .await
        .map(Json)
        .map_err(error_response)
}

// ─── Optimization ───────────────────────────────────────────────────────────

/// POST /v1/optimize/ga — genetic-algorithm allocation via the backend.
pub async fn handle_optimize_ga(
    State(state): State<AppState>,
    Json(body): Json<GaOptimizeBody>,
) -> Result<Json<ResolvedOptimization>, ApiError> {
    validate_submission(&body.campaigns, &body.ads, body.total_budget)
        .map_err(validation_error)?;

    let batch = SubmissionBatch::new(&body.campaigns, &body.ads);
    let request = OptimizationRequest {
        campaigns: batch.campaigns().to_vec(),
        ads: batch.ads().to_vec(),
        total_budget: body.total_budget,
        risk_factor: body.risk_factor,
        ga: body.ga,
    };

    let outcome = state
        .optimizer
        .optimize_ga(&request)
        .await
        .map_err(error_response)?;

    batch.resolve(outcome).map(Json).map_err(error_response)
}

/// POST /v1/optimize/tabu — tabu-search allocation via the backend.
pub async fn handle_optimize_tabu(
    State(state): State<AppState>,
    Json(body): Json<TabuOptimizeBody>,
) -> Result<Json<ResolvedOptimization>, ApiError> {
    validate_submission(&body.campaigns, &body.ads, body.total_budget)
        .map_err(validation_error)?;

    let batch = SubmissionBatch::new(&body.campaigns, &body.ads);
    let request = TabuSearchRequest {
        campaigns: batch.campaigns().to_vec(),
        ads: batch.ads().to_vec(),
        total_budget: body.total_budget,
        risk_factor: body.risk_factor,
        tabu: body.tabu,
    };

    let outcome = state
        .optimizer
        .optimize_tabu(&request)
        .await
        .map_err(error_response)?;

    batch.resolve(outcome).map(Json).map_err(error_response)
}

/// POST /v1/optimize/compare — run both algorithms and report the winner.
pub async fn handle_compare(
    State(state): State<AppState>,
    Json(body): Json<CompareBody>,
) -> Result<Json<ComparisonResponse>, ApiError> {
    validate_submission(&body.campaigns, &body.ads, body.total_budget)
        .map_err(validation_error)?;

    let batch = SubmissionBatch::new(&body.campaigns, &body.ads);
    let request = ComparisonRequest {
        campaigns: batch.campaigns().to_vec(),
        ads: batch.ads().to_vec(),
        total_budget: body.total_budget,
        risk_factor: body.risk_factor,
        ga: body.ga,
        tabu: body.tabu,
    };

    let comparison = state
        .optimizer
        .compare(&request)
        .await
        .map_err(error_response)?;

    let ga = comparison
        .ga_result
        .map(|outcome| batch.resolve(outcome))
        .transpose()
        .map_err(error_response)?;
    let ts = comparison
        .ts_result
        .map(|outcome| batch.resolve(outcome))
        .transpose()
        .map_err(error_response)?;

    Ok(Json(ComparisonResponse {
        ga,
        ts,
        comparison: comparison.comparison,
        winner: comparison.winner,
    }))
}

// ─── Data endpoints ─────────────────────────────────────────────────────────

/// GET /campaigns
pub async fn list_campaigns(State(state): State<AppState>) -> Json<Vec<Campaign>> {
    Json(state.store.list_campaigns())
}

/// GET /campaigns/:key
pub async fn get_campaign(
    State(state): State<AppState>,
    Path(key): Path<Uuid>,
) -> Result<Json<Campaign>, ApiError> {
    state
        .store
        .get_campaign(key)
        .map(Json)
        .ok_or_else(|| error_response(BidderError::NotFound("Campaign not found".to_string())))
}

/// GET /ads
pub async fn list_ads(State(state): State<AppState>) -> Json<Vec<Ad>> {
    Json(state.store.list_ads())
}

/// GET /ads/:key
pub async fn get_ad(
    State(state): State<AppState>,
    Path(key): Path<Uuid>,
) -> Result<Json<Ad>, ApiError> {
    state
        .store
        .get_ad(key)
        .map(Json)
        .ok_or_else(|| error_response(BidderError::NotFound("Ad not found".to_string())))
}

/// GET /all-data — combined store snapshot, the shape optimization bodies take.
pub async fn all_data(State(state): State<AppState>) -> Json<AllMarketingData> {
    Json(state.store.all_data())
}

// ─── Operational endpoints ──────────────────────────────────────────────────

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        node_id: state.node_id.clone(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// GET /ready — readiness probe.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.start_time.elapsed().as_secs() > 0 {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /live — liveness probe.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}
