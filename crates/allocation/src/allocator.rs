//! Greedy proportional budget allocation.
//!
//! Segments are ranked by ROI score and each receives the equal-split base
//! share scaled by `0.5 + score/100`, clamped to whatever budget remains.
//! Rounding residue goes entirely to the top-ranked segment, so the full
//! budget is always spent. This trades true knapsack optimality for
//! O(n log n) cost and predictable output; the combinatorial optimizer
//! behind `bidder-optimizer` is the heavyweight alternative.

use crate::types::{BudgetAllocation, SegmentPrediction};

/// Distribute `total_budget` across the given segments.
///
/// Returns allocations in rank order (highest ROI score first; ties keep the
/// original segment order). Whole-currency budgets are conserved exactly:
/// the allocated amounts sum to `total_budget`.
///
/// Callers must validate `total_budget > 0` and `max_bid_cpm > 0` first.
pub fn allocate(
    predictions: &[SegmentPrediction],
    total_budget: f64,
    max_bid_cpm: f64,
) -> Vec<BudgetAllocation> {
    if predictions.is_empty() {
        return Vec::new();
    }

    let mut ranked: Vec<&SegmentPrediction> = predictions.iter().collect();
    // Stable sort: equal scores keep generation order.
    ranked.sort_by(|a, b| b.roi_score.cmp(&a.roi_score));

    let base_share = total_budget / predictions.len() as f64;
    let mut remaining = total_budget;
    let mut allocations = Vec::with_capacity(ranked.len());

    for segment in &ranked {
        let bonus = segment.roi_score as f64 / 100.0;
        let mut allocated = (base_share * (0.5 + bonus)).round();
        allocated = allocated.min(remaining);
        remaining -= allocated;

        let impressions = (allocated / max_bid_cpm * 1000.0).round();
        allocations.push(BudgetAllocation {
            segment_id: segment.segment_id.clone(),
            allocated_budget: allocated,
            percentage_of_total: percentage(allocated, total_budget),
            expected_impressions: impressions as u64,
            expected_clicks: (impressions * segment.predicted_ctr).round() as u64,
            expected_conversions: (impressions
                * segment.predicted_ctr
                * segment.predicted_conversion_rate)
                .round() as u64,
        });
    }

    // Rounding residue goes to the top performer; only its budget and
    // percentage change.
    if remaining > 0.0 {
        let top = &mut allocations[0];
        top.allocated_budget += remaining;
        top.percentage_of_total = percentage(top.allocated_budget, total_budget);
    }

    allocations
}

/// Share of the total at one decimal place.
fn percentage(allocated: f64, total: f64) -> f64 {
    (allocated / total * 1000.0).round() / 10.0
}
