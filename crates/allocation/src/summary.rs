//! Portfolio-level aggregation across segments and allocations.

use bidder_core::types::CampaignInput;

use crate::recommend;
use crate::types::{BudgetAllocation, CampaignSummary, RoiLevel, SegmentPrediction};

/// Roll the per-segment results up into one campaign summary.
///
/// Callers guarantee `predictions` is non-empty (the engine rejects empty
/// targeting before prediction runs).
pub fn summarize(
    input: &CampaignInput,
    predictions: &[SegmentPrediction],
    allocations: &[BudgetAllocation],
) -> CampaignSummary {
    let n = predictions.len() as f64;

    let total_reach: u64 = predictions.iter().map(|p| p.estimated_reach).sum();
    let avg_ctr = predictions.iter().map(|p| p.predicted_ctr).sum::<f64>() / n;
    let total_clicks: u64 = allocations.iter().map(|a| a.expected_clicks).sum();
    let total_conversions: u64 = allocations.iter().map(|a| a.expected_conversions).sum();
    let avg_roi = predictions.iter().map(|p| p.roi_score as f64).sum::<f64>() / n;
    let optimization_score = avg_roi.round() as u32;

    CampaignSummary {
        overall_roi: RoiLevel::from_average(avg_roi),
        optimization_score,
        estimated_total_reach: total_reach,
        estimated_total_clicks: total_clicks,
        estimated_total_conversions: total_conversions,
        average_ctr: (avg_ctr * 10_000.0).round() / 100.0,
        average_cpm: input.max_bid_cpm,
        top_performing_segment: top_segment_label(predictions),
        recommendations: recommend::recommendations(predictions, input),
    }
}

/// Label of the highest-scoring segment; ties resolve to the earliest one.
fn top_segment_label(predictions: &[SegmentPrediction]) -> String {
    let mut top = &predictions[0];
    for p in &predictions[1..] {
        if p.roi_score > top.roi_score {
            top = p;
        }
    }
    format!("{} {} on {}", top.age_group, top.gender, top.device_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bidder_core::types::{AdTopic, AgeGroup, DeviceType, Gender};

    fn prediction(id: &str, score: u32, ctr: f64, reach: u64) -> SegmentPrediction {
        SegmentPrediction {
            segment_id: id.to_string(),
            age_group: AgeGroup::Age25To34,
            gender: Gender::All,
            device_type: DeviceType::Mobile,
            predicted_ctr: ctr,
            predicted_conversion_rate: ctr * 0.1,
            estimated_reach: reach,
            estimated_cost: 0.0,
            roi_score: score,
            roi_level: RoiLevel::from_score(score),
        }
    }

    fn allocation(id: &str, clicks: u64, conversions: u64) -> BudgetAllocation {
        BudgetAllocation {
            segment_id: id.to_string(),
            allocated_budget: 0.0,
            percentage_of_total: 0.0,
            expected_impressions: 0,
            expected_clicks: clicks,
            expected_conversions: conversions,
        }
    }

    fn input() -> CampaignInput {
        CampaignInput {
            campaign_name: "q4".to_string(),
            budget: 10_000.0,
            max_bid_cpm: 6.5,
            target_age_groups: vec![AgeGroup::Age25To34],
            target_genders: vec![Gender::All],
            device_types: vec![DeviceType::Mobile],
            ad_topic: AdTopic::Food,
            search_tags: vec!["a".into(), "b".into(), "c".into(), "d".into(), "e".into()],
        }
    }

    // 1. Totals and means ----------------------------------------------------

    #[test]
    fn test_totals_and_averages() {
        let predictions = vec![
            prediction("seg_0", 80, 0.04, 1_000),
            prediction("seg_1", 60, 0.02, 3_000),
        ];
        let allocations = vec![allocation("seg_0", 120, 12), allocation("seg_1", 80, 8)];

        let s = summarize(&input(), &predictions, &allocations);
        assert_eq!(s.estimated_total_reach, 4_000);
        assert_eq!(s.estimated_total_clicks, 200);
        assert_eq!(s.estimated_total_conversions, 20);
        assert_eq!(s.optimization_score, 70);
        assert_eq!(s.average_ctr, 3.0);
        assert_eq!(s.average_cpm, 6.5);
    }

    // 2. Overall tier uses the same thresholds as per-segment tiers -------------

    #[test]
    fn test_overall_roi_tier_thresholds() {
        let cases = [
            (39, RoiLevel::Low),
            (40, RoiLevel::Medium),
            (60, RoiLevel::High),
            (80, RoiLevel::VeryHigh),
        ];
        for (score, expected) in cases {
            let predictions = vec![prediction("seg_0", score, 0.03, 100)];
            let s = summarize(&input(), &predictions, &[]);
            assert_eq!(s.overall_roi, expected, "score {}", score);
        }
    }

    #[test]
    fn test_overall_tier_uses_the_unrounded_average() {
        // Scores 39 and 40 average to 39.5: the score rounds to 40 but the
        // tier stays low.
        let predictions = vec![
            prediction("seg_0", 39, 0.03, 100),
            prediction("seg_1", 40, 0.03, 100),
        ];
        let s = summarize(&input(), &predictions, &[]);
        assert_eq!(s.optimization_score, 40);
        assert_eq!(s.overall_roi, RoiLevel::Low);
    }

    // 3. Top segment label --------------------------------------------------------

    #[test]
    fn test_top_segment_is_first_on_ties() {
        let mut a = prediction("seg_0", 70, 0.03, 100);
        a.device_type = DeviceType::Desktop;
        let b = prediction("seg_1", 70, 0.03, 100);
        let s = summarize(&input(), &[a, b], &[]);
        assert_eq!(s.top_performing_segment, "25-34 all on desktop");
    }
}
