//! End-to-end heuristic prediction pipeline: validate, expand, predict,
//! allocate, summarize. Pure apart from the injected RNG; no I/O, no shared
//! state between runs.

use bidder_core::types::CampaignInput;
use bidder_core::{BidderError, BidderResult};
use chrono::Utc;
use rand::Rng;
use tracing::debug;

use crate::allocator;
use crate::predictor;
use crate::segments;
use crate::summary;
use crate::types::PredictionResponse;

/// Validate a campaign input before any prediction work.
///
/// Collects every field failure so the caller can surface them together.
pub fn validate(input: &CampaignInput) -> BidderResult<()> {
    let mut problems = Vec::new();

    if input.campaign_name.trim().is_empty() {
        problems.push("campaign_name: must not be empty");
    }
    if input.budget <= 0.0 {
        problems.push("budget: must be greater than zero");
    }
    if input.max_bid_cpm <= 0.0 {
        problems.push("max_bid_cpm: must be greater than zero");
    }
    if input.target_age_groups.is_empty() {
        problems.push("target_age_groups: select at least one age group");
    }
    if input.target_genders.is_empty() {
        problems.push("target_genders: select at least one gender");
    }
    if input.device_types.is_empty() {
        problems.push("device_types: select at least one device type");
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(BidderError::Validation(problems.join("; ")))
    }
}

/// Run the full heuristic allocation for one campaign.
///
/// With a seeded RNG two runs over identical input produce identical segment
/// ids, ordering, and allocations.
pub fn run_prediction<R: Rng>(
    input: &CampaignInput,
    rng: &mut R,
) -> BidderResult<PredictionResponse> {
    validate(input)?;

    let specs = segments::expand(input);
    debug!(
        campaign = %input.campaign_name,
        segments = specs.len(),
        budget = input.budget,
        "Running heuristic allocation"
    );

    let predictions: Vec<_> = specs
        .iter()
        .map(|spec| predictor::predict_segment(spec, input, specs.len(), rng))
        .collect();

    let budget_allocation = allocator::allocate(&predictions, input.budget, input.max_bid_cpm);
    let summary = summary::summarize(input, &predictions, &budget_allocation);

    Ok(PredictionResponse {
        success: true,
        campaign_id: format!("camp_{}", Utc::now().timestamp_millis()),
        created_at: Utc::now(),
        predictions,
        budget_allocation,
        summary,
        note: None,
    })
}
