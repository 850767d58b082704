use bidder_core::types::{AgeGroup, DeviceType, Gender};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ordinal ROI bucket derived from a 0-100 score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum RoiLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RoiLevel {
    /// Step function over the score: <40 low, <60 medium, <80 high,
    /// otherwise very_high.
    pub fn from_score(score: u32) -> Self {
        if score >= 80 {
            Self::VeryHigh
        } else if score >= 60 {
            Self::High
        } else if score >= 40 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Same thresholds applied to an unrounded mean score, so an average
    /// of 39.5 stays low even though it rounds to 40.
    pub fn from_average(average: f64) -> Self {
        if average >= 80.0 {
            Self::VeryHigh
        } else if average >= 60.0 {
            Self::High
        } else if average >= 40.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Predicted performance for one demographic/device bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentPrediction {
    pub segment_id: String,
    pub age_group: AgeGroup,
    pub gender: Gender,
    pub device_type: DeviceType,
    /// Click-through rate in [0, 0.15].
    pub predicted_ctr: f64,
    pub predicted_conversion_rate: f64,
    pub estimated_reach: u64,
    /// Equal-split baseline cost, not the final allocation.
    pub estimated_cost: f64,
    pub roi_score: u32,
    pub roi_level: RoiLevel,
}

/// Final budget share for one segment, in rank order (highest ROI first).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetAllocation {
    pub segment_id: String,
    pub allocated_budget: f64,
    /// allocated / total × 100, one decimal.
    pub percentage_of_total: f64,
    pub expected_impressions: u64,
    pub expected_clicks: u64,
    pub expected_conversions: u64,
}

/// Portfolio-level rollup across all segments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignSummary {
    pub overall_roi: RoiLevel,
    pub optimization_score: u32,
    pub estimated_total_reach: u64,
    pub estimated_total_clicks: u64,
    pub estimated_total_conversions: u64,
    /// Mean predicted CTR × 100, two decimals.
    pub average_ctr: f64,
    pub average_cpm: f64,
    pub top_performing_segment: String,
    pub recommendations: Vec<String>,
}

/// Full output of one prediction/allocation run. Created fresh on every
/// call and never merged with prior results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub success: bool,
    pub campaign_id: String,
    pub created_at: DateTime<Utc>,
    pub predictions: Vec<SegmentPrediction>,
    pub budget_allocation: Vec<BudgetAllocation>,
    pub summary: CampaignSummary,
    /// Set when the response was computed locally because the backend was
    /// unreachable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}
