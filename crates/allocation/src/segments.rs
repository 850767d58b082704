//! Demographic segment expansion.
//!
//! A segment is one {age group, gender, device type} combination. Expansion
//! produces the full cartesian product of the selected dimensions, with ids
//! assigned sequentially in generation order (age outer, gender middle,
//! device inner). The index is request-scoped; nothing here is global.

use bidder_core::types::{AgeGroup, CampaignInput, DeviceType, Gender};

/// One targeting bucket awaiting prediction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentSpec {
    pub segment_id: String,
    pub age_group: AgeGroup,
    pub gender: Gender,
    pub device_type: DeviceType,
}

impl SegmentSpec {
    /// Human-readable label, e.g. `"25-34 female on mobile"`.
    pub fn label(&self) -> String {
        format!("{} {} on {}", self.age_group, self.gender, self.device_type)
    }
}

/// Expand the selected dimensions into |A|×|G|×|D| segments.
///
/// An empty selection in any dimension yields zero segments; callers are
/// expected to reject that upstream.
pub fn expand(input: &CampaignInput) -> Vec<SegmentSpec> {
    let mut segments = Vec::with_capacity(
        input.target_age_groups.len() * input.target_genders.len() * input.device_types.len(),
    );

    let mut index = 0usize;
    for age_group in &input.target_age_groups {
        for gender in &input.target_genders {
            for device_type in &input.device_types {
                segments.push(SegmentSpec {
                    segment_id: format!("seg_{}", index),
                    age_group: *age_group,
                    gender: *gender,
                    device_type: *device_type,
                });
                index += 1;
            }
        }
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(ages: Vec<AgeGroup>, genders: Vec<Gender>, devices: Vec<DeviceType>) -> CampaignInput {
        CampaignInput {
            campaign_name: "spring-launch".to_string(),
            budget: 10_000.0,
            max_bid_cpm: 5.0,
            target_age_groups: ages,
            target_genders: genders,
            device_types: devices,
            ad_topic: bidder_core::types::AdTopic::Technology,
            search_tags: vec!["laptops".to_string()],
        }
    }

    // 1. Cartesian product size ----------------------------------------------

    #[test]
    fn test_two_ages_one_gender_two_devices_gives_four_segments() {
        let input = input(
            vec![AgeGroup::Age25To34, AgeGroup::Age35To44],
            vec![Gender::All],
            vec![DeviceType::Mobile, DeviceType::Desktop],
        );
        let segments = expand(&input);
        assert_eq!(segments.len(), 4);
    }

    #[test]
    fn test_full_product_size() {
        let input = input(
            vec![
                AgeGroup::Age18To24,
                AgeGroup::Age25To34,
                AgeGroup::Age35To44,
            ],
            vec![Gender::Male, Gender::Female],
            vec![DeviceType::Mobile, DeviceType::Desktop, DeviceType::Tablet],
        );
        assert_eq!(expand(&input).len(), 18);
    }

    // 2. Id assignment and ordering ------------------------------------------

    #[test]
    fn test_ids_are_sequential_in_generation_order() {
        let input = input(
            vec![AgeGroup::Age25To34, AgeGroup::Age35To44],
            vec![Gender::All],
            vec![DeviceType::Mobile, DeviceType::Desktop],
        );
        let segments = expand(&input);

        let ids: Vec<&str> = segments.iter().map(|s| s.segment_id.as_str()).collect();
        assert_eq!(ids, vec!["seg_0", "seg_1", "seg_2", "seg_3"]);

        // Device is the inner loop: first two segments share the age group.
        assert_eq!(segments[0].age_group, AgeGroup::Age25To34);
        assert_eq!(segments[0].device_type, DeviceType::Mobile);
        assert_eq!(segments[1].age_group, AgeGroup::Age25To34);
        assert_eq!(segments[1].device_type, DeviceType::Desktop);
        assert_eq!(segments[2].age_group, AgeGroup::Age35To44);
    }

    #[test]
    fn test_expansion_is_stable_for_identical_input() {
        let a = input(
            vec![AgeGroup::Age18To24],
            vec![Gender::Male, Gender::Female],
            vec![DeviceType::Tablet],
        );
        assert_eq!(expand(&a), expand(&a));
    }

    // 3. Degenerate input ------------------------------------------------------

    #[test]
    fn test_empty_dimension_yields_no_segments() {
        let input = input(vec![], vec![Gender::All], vec![DeviceType::Mobile]);
        assert!(expand(&input).is_empty());
    }

    #[test]
    fn test_label_format() {
        let input = input(
            vec![AgeGroup::Age25To34],
            vec![Gender::Female],
            vec![DeviceType::Mobile],
        );
        assert_eq!(expand(&input)[0].label(), "25-34 female on mobile");
    }
}
