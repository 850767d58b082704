//! Rule-based campaign recommendations.
//!
//! Fixed rules evaluated in order, truncated to four suggestions. Each rule
//! is independent of the others so they can be tested in isolation.

use bidder_core::types::{CampaignInput, DeviceType};

use crate::types::SegmentPrediction;

/// How many suggestions a response may carry.
const MAX_RECOMMENDATIONS: usize = 4;

/// Minimum score below which a segment is worth dropping.
const WEAK_SEGMENT_SCORE: u32 = 40;

/// Build up to four suggestions from the predicted segment set.
pub fn recommendations(predictions: &[SegmentPrediction], input: &CampaignInput) -> Vec<String> {
    if predictions.is_empty() {
        return Vec::new();
    }

    let mut ranked: Vec<&SegmentPrediction> = predictions.iter().collect();
    ranked.sort_by(|a, b| b.roi_score.cmp(&a.roi_score));
    let best = ranked[0];
    let worst = ranked[ranked.len() - 1];

    let mut out = Vec::new();

    out.push(format!(
        "Focus on {} {} users on {} - highest predicted ROI",
        best.age_group, best.gender, best.device_type
    ));

    if worst.roi_score < WEAK_SEGMENT_SCORE && predictions.len() > 3 {
        out.push(format!(
            "Consider removing {} {} on {} - low predicted performance",
            worst.age_group, worst.gender, worst.device_type
        ));
    }

    if !input.device_types.contains(&DeviceType::Mobile) {
        out.push("Consider adding mobile targeting - typically has higher engagement".to_string());
    }

    if input.search_tags.len() < 5 {
        out.push("Add more search keywords to improve targeting precision".to_string());
    }

    if input.budget > 50_000.0 && predictions.len() < 5 {
        out.push("With your budget, consider expanding to more demographic segments".to_string());
    }

    out.truncate(MAX_RECOMMENDATIONS);
    out
}
