//! Wire types for the GA/Tabu-Search optimizer backend.
//!
//! Field names and defaults follow the backend's request models verbatim;
//! anything it may omit on the way back deserializes leniently.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ─── Hyperparameters ────────────────────────────────────────────────────────

/// Genetic-algorithm knobs. Semantics live entirely on the backend side; we
/// carry the backend's own defaults and pass overrides through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaParams {
    #[serde(default = "default_population_size")]
    pub population_size: u32,
    #[serde(default = "default_max_generations")]
    pub max_generations: u32,
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f64,
    #[serde(default = "default_crossover_rate")]
    pub crossover_rate: f64,
    #[serde(default = "default_verbose")]
    pub ga_verbose: bool,
}

fn default_population_size() -> u32 {
    100
}
fn default_max_generations() -> u32 {
    250
}
fn default_mutation_rate() -> f64 {
    0.15
}
fn default_crossover_rate() -> f64 {
    0.85
}
fn default_verbose() -> bool {
    true
}

impl Default for GaParams {
    fn default() -> Self {
        Self {
            population_size: default_population_size(),
            max_generations: default_max_generations(),
            mutation_rate: default_mutation_rate(),
            crossover_rate: default_crossover_rate(),
            ga_verbose: default_verbose(),
        }
    }
}

/// Tabu-search knobs, same pass-through treatment as [`GaParams`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabuParams {
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    #[serde(default = "default_tabu_tenure")]
    pub tabu_tenure: u32,
    #[serde(default = "default_neighborhood_size")]
    pub neighborhood_size: u32,
    #[serde(default = "default_use_aspiration")]
    pub use_aspiration: bool,
    #[serde(default = "default_intensification_threshold")]
    pub intensification_threshold: u32,
    #[serde(default = "default_diversification_threshold")]
    pub diversification_threshold: u32,
    #[serde(default = "default_verbose")]
    pub ts_verbose: bool,
}

fn default_max_iterations() -> u32 {
    200
}
fn default_tabu_tenure() -> u32 {
    10
}
fn default_neighborhood_size() -> u32 {
    30
}
fn default_use_aspiration() -> bool {
    true
}
fn default_intensification_threshold() -> u32 {
    50
}
fn default_diversification_threshold() -> u32 {
    100
}

impl Default for TabuParams {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            tabu_tenure: default_tabu_tenure(),
            neighborhood_size: default_neighborhood_size(),
            use_aspiration: default_use_aspiration(),
            intensification_threshold: default_intensification_threshold(),
            diversification_threshold: default_diversification_threshold(),
            ts_verbose: default_verbose(),
        }
    }
}

// ─── Payloads ───────────────────────────────────────────────────────────────

/// Campaign as the backend expects it: integer id, no local handle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignPayload {
    pub id: u32,
    pub name: String,
    pub no_of_days: u32,
    pub time: NaiveDate,
    pub approved_budget: f64,
    pub impressions: u64,
    pub clicks: u64,
    pub media_cost_usd: f64,
    pub ext_service_name: String,
    pub channel_name: String,
    pub search_tag_cat: String,
    #[serde(default)]
    pub overcost: f64,
}

/// Ad as the backend expects it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdPayload {
    pub id: u32,
    pub name: String,
    pub click_through_rate: f64,
    pub view_time: u32,
    pub cost_per_click: f64,
    pub roi: f64,
    pub timestamp: DateTime<Utc>,
    pub age_group: String,
    pub engagement_level: String,
    pub device_type: String,
    pub location: String,
    pub gender: String,
    pub content_type: String,
    pub ad_topic: String,
    pub ad_target_audience: String,
    #[serde(default)]
    pub conversion_rate: f64,
}

// ─── Requests ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct OptimizationRequest {
    pub campaigns: Vec<CampaignPayload>,
    pub ads: Vec<AdPayload>,
    pub total_budget: f64,
    pub risk_factor: f64,
    #[serde(flatten)]
    pub ga: GaParams,
}

#[derive(Debug, Clone, Serialize)]
pub struct TabuSearchRequest {
    pub campaigns: Vec<CampaignPayload>,
    pub ads: Vec<AdPayload>,
    pub total_budget: f64,
    pub risk_factor: f64,
    #[serde(flatten)]
    pub tabu: TabuParams,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparisonRequest {
    pub campaigns: Vec<CampaignPayload>,
    pub ads: Vec<AdPayload>,
    pub total_budget: f64,
    pub risk_factor: f64,
    #[serde(flatten)]
    pub ga: GaParams,
    #[serde(flatten)]
    pub tabu: TabuParams,
}

// ─── Responses ──────────────────────────────────────────────────────────────

/// Per-campaign breakdown the backend computes for its winning individual.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CampaignMetrics {
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub roi: f64,
    #[serde(default)]
    pub overcost: f64,
    #[serde(default)]
    pub budget_cost: f64,
    #[serde(default)]
    pub ads_cost: f64,
    #[serde(default)]
    pub approved_budget: f64,
    #[serde(default)]
    pub avg_conversion_rate: f64,
    #[serde(default)]
    pub n_ads: u32,
}

/// The backend's best individual: which ads go to which campaign, plus the
/// fitness breakdown. Allocation keys are the backend's integer campaign ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationOutcome {
    pub allocation: HashMap<u32, Vec<u32>>,
    #[serde(default)]
    pub fitness: f64,
    #[serde(default)]
    pub total_roi: f64,
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default)]
    pub total_revenue: f64,
    #[serde(default)]
    pub campaign_metrics: HashMap<u32, CampaignMetrics>,
}

/// Side-by-side GA vs Tabu-Search run. `comparison` is backend-defined and
/// passed through opaque.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmComparison {
    pub ga_result: Option<OptimizationOutcome>,
    pub ts_result: Option<OptimizationOutcome>,
    #[serde(default)]
    pub comparison: serde_json::Value,
    pub winner: String,
}
