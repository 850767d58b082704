//! HTTP client for the optimizer backend.
//!
//! Thin reqwest wrapper: JSON in, JSON out, no retries. Failures split into
//! two families the REST layer maps to different status codes: the backend
//! answered with an error (its `detail` payload is surfaced verbatim), or the
//! backend could not be reached at all.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use bidder_allocation::types::PredictionResponse;
use bidder_core::config::OptimizerConfig;
use bidder_core::types::{Ad, Campaign, CampaignInput};
use bidder_core::{BidderError, BidderResult};

use crate::models::{
    AlgorithmComparison, ComparisonRequest, OptimizationOutcome, OptimizationRequest,
    TabuSearchRequest,
};

/// Note attached to responses produced by the local fallback path.
const MOCK_FALLBACK_NOTE: &str = "Using mock data - backend unavailable";

pub struct OptimizerClient {
    http: reqwest::Client,
    base_url: String,
    fallback_to_mock: bool,
}

impl OptimizerClient {
    pub fn new(config: &OptimizerConfig) -> BidderResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| BidderError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            fallback_to_mock: config.fallback_to_mock,
        })
    }

    pub async fn optimize_ga(
        &self,
        request: &OptimizationRequest,
    ) -> BidderResult<OptimizationOutcome> {
        self.post_json("optimize_marketing_allocation", request)
            .await
    }

    pub async fn optimize_tabu(
        &self,
        request: &TabuSearchRequest,
    ) -> BidderResult<OptimizationOutcome> {
        self.post_json("optimize_tabu_search", request).await
    }

    pub async fn compare(
        &self,
        request: &ComparisonRequest,
    ) -> BidderResult<AlgorithmComparison> {
        self.post_json("compare_algorithms", request).await
    }

    pub async fn fetch_campaigns(&self) -> BidderResult<Vec<Campaign>> {
        self.get_json("campaigns").await
    }

    pub async fn fetch_ads(&self) -> BidderResult<Vec<Ad>> {
        self.get_json("ads").await
    }

    /// Campaign performance prediction with a transparent local fallback.
    ///
    /// Tries the backend first. If it cannot be reached (and fallback is
    /// enabled) the local heuristic engine answers instead, with the response
    /// annotated so callers can tell the two apart. Backend-side errors are
    /// never masked by the fallback.
    pub async fn predict_or_mock(
        &self,
        input: &CampaignInput,
        seed: Option<u64>,
    ) -> BidderResult<PredictionResponse> {
        match self.post_json("predict", input).await {
            Ok(response) => Ok(response),
            Err(BidderError::Unreachable(reason)) if self.fallback_to_mock => {
                warn!(%reason, "Optimizer backend unreachable, using local predictions");
                let mut rng = match seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };
                let mut response = bidder_allocation::run_prediction(input, &mut rng)?;
                response.note = Some(MOCK_FALLBACK_NOTE.to_string());
                Ok(response)
            }
            Err(other) => Err(other),
        }
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> BidderResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, path);
        debug!(%url, "Calling optimizer backend");

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| classify_transport_error(&url, e))?;

        Self::read_response(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> BidderResult<T> {
        let url = format!("{}/{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| classify_transport_error(&url, e))?;

        Self::read_response(response).await
    }

    async fn read_response<T: DeserializeOwned>(response: reqwest::Response) -> BidderResult<T> {
        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| BidderError::Backend(format!("malformed response body: {}", e)));
        }

        let body = response.text().await.unwrap_or_default();
        Err(BidderError::Backend(extract_error_message(
            status.as_u16(),
            &body,
        )))
    }
}

fn classify_transport_error(url: &str, error: reqwest::Error) -> BidderError {
    if error.is_connect() || error.is_timeout() {
        BidderError::Unreachable(format!("{}: {}", url, error))
    } else {
        BidderError::Backend(error.to_string())
    }
}

/// Reduce a FastAPI error body to one display string.
///
/// The backend sends `{"detail": ...}` where `detail` is either a plain
/// string or a list of `{loc, msg, type}` validation entries. Entries become
/// one line each: the `loc` path joined with `" -> "`, then `": "` and the
/// message.
pub fn extract_error_message(status: u16, body: &str) -> String {
    let fallback = || format!("optimizer backend returned HTTP {}", status);

    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(_) => return fallback(),
    };

    match value.get("detail") {
        Some(serde_json::Value::String(detail)) => detail.clone(),
        Some(serde_json::Value::Array(entries)) => {
            let lines: Vec<String> = entries
                .iter()
                .filter_map(|entry| {
                    let msg = entry.get("msg")?.as_str()?;
                    let path = entry
                        .get("loc")
                        .and_then(|loc| loc.as_array())
                        .map(|parts| {
                            parts
                                .iter()
                                .map(|part| match part {
                                    serde_json::Value::String(s) => s.clone(),
                                    other => other.to_string(),
                                })
                                .collect::<Vec<_>>()
                                .join(" -> ")
                        })
                        .unwrap_or_default();
                    if path.is_empty() {
                        Some(msg.to_string())
                    } else {
                        Some(format!("{}: {}", path, msg))
                    }
                })
                .collect();
            if lines.is_empty() {
                fallback()
            } else {
                lines.join("\n")
            }
        }
        _ => fallback(),
    }
}
