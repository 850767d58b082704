//! Per-segment performance prediction.
//!
//! CTR is the product of three independent factors (topic base rate, age
//! multiplier, device multiplier) plus a uniform jitter. The jitter source is
//! an injected `rand::Rng` so callers can seed a `StdRng` and reproduce runs
//! exactly; nothing in this module touches a thread-local generator.

use bidder_core::types::{AdTopic, AgeGroup, CampaignInput, DeviceType};
use rand::Rng;

use crate::segments::SegmentSpec;
use crate::types::{RoiLevel, SegmentPrediction};

/// Hard ceiling on predicted CTR.
pub const MAX_CTR: f64 = 0.15;

/// Base click-through rate by creative topic.
fn base_ctr(topic: AdTopic) -> f64 {
    match topic {
        AdTopic::Technology => 0.035,
        AdTopic::Finance => 0.028,
        AdTopic::Healthcare => 0.032,
        AdTopic::Education => 0.038,
        AdTopic::Entertainment => 0.045,
        AdTopic::Travel => 0.042,
        AdTopic::Food => 0.040,
        AdTopic::Fashion => 0.038,
        AdTopic::Sports => 0.041,
        AdTopic::Automotive => 0.030,
    }
}

/// Engagement multiplier by age bracket; younger cohorts click more.
fn age_multiplier(age_group: AgeGroup) -> f64 {
    match age_group {
        AgeGroup::Age18To24 => 1.20,
        AgeGroup::Age25To34 => 1.15,
        AgeGroup::Age35To44 => 1.00,
        AgeGroup::Age45To54 => 0.90,
        AgeGroup::Age55Plus => 0.85,
    }
}

fn device_multiplier(device: DeviceType) -> f64 {
    match device {
        DeviceType::Mobile => 1.10,
        DeviceType::Desktop => 0.95,
        DeviceType::Tablet => 0.90,
    }
}

/// Uniform draw in [lo, hi).
fn jitter<R: Rng>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    lo + rng.gen::<f64>() * (hi - lo)
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Predict one segment's performance.
///
/// `segment_count` is the total number of segments in the run; reach and the
/// pre-allocation cost baseline are equal splits across it.
pub fn predict_segment<R: Rng>(
    spec: &SegmentSpec,
    input: &CampaignInput,
    segment_count: usize,
    rng: &mut R,
) -> SegmentPrediction {
    let raw_ctr = base_ctr(input.ad_topic)
        * age_multiplier(spec.age_group)
        * device_multiplier(spec.device_type)
        * jitter(rng, 0.8, 1.2);
    let predicted_ctr = round4(raw_ctr.min(MAX_CTR));

    let predicted_conversion_rate = round4(predicted_ctr * jitter(rng, 0.05, 0.15));

    let raw_score = 50.0
        + (predicted_ctr * 100.0 + predicted_conversion_rate * 500.0) * jitter(rng, 0.7, 1.3);
    let roi_score = raw_score.round().clamp(0.0, 100.0) as u32;

    let per_segment = 1.0 / segment_count as f64;
    let estimated_reach = ((input.budget / input.max_bid_cpm)
        * 1000.0
        * per_segment
        * jitter(rng, 0.7, 1.3))
    .round() as u64;
    let estimated_cost = (input.budget * per_segment).round();

    SegmentPrediction {
        segment_id: spec.segment_id.clone(),
        age_group: spec.age_group,
        gender: spec.gender,
        device_type: spec.device_type,
        predicted_ctr,
        predicted_conversion_rate,
        estimated_reach,
        estimated_cost,
        roi_score,
        roi_level: RoiLevel::from_score(roi_score),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bidder_core::types::Gender;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn spec(age: AgeGroup, device: DeviceType) -> SegmentSpec {
        SegmentSpec {
            segment_id: "seg_0".to_string(),
            age_group: age,
            gender: Gender::All,
            device_type: device,
        }
    }

    fn input(topic: AdTopic) -> CampaignInput {
        CampaignInput {
            campaign_name: "t".to_string(),
            budget: 20_000.0,
            max_bid_cpm: 8.0,
            target_age_groups: vec![AgeGroup::Age18To24],
            target_genders: vec![Gender::All],
            device_types: vec![DeviceType::Mobile],
            ad_topic: topic,
            search_tags: vec![],
        }
    }

    const ALL_TOPICS: [AdTopic; 10] = [
        AdTopic::Technology,
        AdTopic::Finance,
        AdTopic::Healthcare,
        AdTopic::Education,
        AdTopic::Entertainment,
        AdTopic::Travel,
        AdTopic::Food,
        AdTopic::Fashion,
        AdTopic::Sports,
        AdTopic::Automotive,
    ];

    const ALL_AGES: [AgeGroup; 5] = [
        AgeGroup::Age18To24,
        AgeGroup::Age25To34,
        AgeGroup::Age35To44,
        AgeGroup::Age45To54,
        AgeGroup::Age55Plus,
    ];

    const ALL_DEVICES: [DeviceType; 3] =
        [DeviceType::Mobile, DeviceType::Desktop, DeviceType::Tablet];

    // 1. CTR bounds across the whole input space -----------------------------

    #[test]
    fn test_ctr_bounded_for_all_inputs() {
        let mut rng = StdRng::seed_from_u64(7);
        for topic in ALL_TOPICS {
            for age in ALL_AGES {
                for device in ALL_DEVICES {
                    for _ in 0..50 {
                        let p = predict_segment(&spec(age, device), &input(topic), 4, &mut rng);
                        assert!(
                            (0.0..=MAX_CTR).contains(&p.predicted_ctr),
                            "ctr {} out of range for {:?}/{:?}/{:?}",
                            p.predicted_ctr,
                            topic,
                            age,
                            device
                        );
                        assert!(p.predicted_conversion_rate >= 0.0);
                        assert!(p.roi_score <= 100);
                    }
                }
            }
        }
    }

    // 2. Determinism under a fixed seed ---------------------------------------

    #[test]
    fn test_same_seed_same_prediction() {
        let s = spec(AgeGroup::Age25To34, DeviceType::Mobile);
        let i = input(AdTopic::Entertainment);

        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);
        let a = predict_segment(&s, &i, 6, &mut rng_a);
        let b = predict_segment(&s, &i, 6, &mut rng_b);

        assert_eq!(a.predicted_ctr, b.predicted_ctr);
        assert_eq!(a.predicted_conversion_rate, b.predicted_conversion_rate);
        assert_eq!(a.roi_score, b.roi_score);
        assert_eq!(a.estimated_reach, b.estimated_reach);
    }

    // 3. Derived fields --------------------------------------------------------

    #[test]
    fn test_roi_level_matches_score() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let p = predict_segment(
                &spec(AgeGroup::Age18To24, DeviceType::Mobile),
                &input(AdTopic::Entertainment),
                2,
                &mut rng,
            );
            assert_eq!(p.roi_level, RoiLevel::from_score(p.roi_score));
        }
    }

    #[test]
    fn test_estimated_cost_is_equal_split() {
        let mut rng = StdRng::seed_from_u64(11);
        let p = predict_segment(
            &spec(AgeGroup::Age35To44, DeviceType::Desktop),
            &input(AdTopic::Finance),
            4,
            &mut rng,
        );
        assert_eq!(p.estimated_cost, 5_000.0);
    }

    #[test]
    fn test_rates_rounded_to_four_decimals() {
        let mut rng = StdRng::seed_from_u64(19);
        let p = predict_segment(
            &spec(AgeGroup::Age45To54, DeviceType::Tablet),
            &input(AdTopic::Travel),
            3,
            &mut rng,
        );
        assert_eq!(p.predicted_ctr, round4(p.predicted_ctr));
        assert_eq!(
            p.predicted_conversion_rate,
            round4(p.predicted_conversion_rate)
        );
    }
}
