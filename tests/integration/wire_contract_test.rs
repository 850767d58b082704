//! Integration test for the prediction and optimization wire contracts.
//! Exercises the JSON shapes end to end without a running optimizer backend.

#[cfg(test)]
mod tests {
    use bidder_core::types::*;
    use bidder_optimizer::models::*;
    use bidder_optimizer::SubmissionBatch;
    use chrono::{NaiveDate, Utc};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use uuid::Uuid;

    fn sample_input() -> CampaignInput {
        serde_json::from_str(
            r#"{
                "campaign_name": "Holiday Launch",
                "budget": 30000.0,
                "max_bid_cpm": 6.0,
                "target_age_groups": ["18-24", "25-34"],
                "target_genders": ["all"],
                "device_types": ["mobile", "desktop"],
                "ad_topic": "entertainment",
                "search_tags": ["streaming", "movies", "series"]
            }"#,
        )
        .unwrap()
    }

    fn sample_campaign(name: &str, approved_budget: f64) -> Campaign {
        Campaign {
            key: Uuid::new_v4(),
            id: None,
            name: name.to_string(),
            no_of_days: 45,
            time: NaiveDate::from_ymd_opt(2025, 11, 1).unwrap(),
            approved_budget,
            impressions: 2_500_000,
            clicks: 60_000,
            media_cost_usd: 52_000.0,
            ext_service_name: "Google Ads".to_string(),
            channel_name: "search".to_string(),
            search_tag_cat: "media".to_string(),
            overcost: 1_200.0,
        }
    }

    fn sample_ad(name: &str) -> Ad {
        Ad {
            key: Uuid::new_v4(),
            id: None,
            name: name.to_string(),
            click_through_rate: 0.027,
            view_time: 22,
            cost_per_click: 2.1,
            roi: 3.0,
            timestamp: Utc::now(),
            age_group: "18-24".to_string(),
            engagement_level: "high".to_string(),
            device_type: "mobile".to_string(),
            location: "BR".to_string(),
            gender: "all".to_string(),
            content_type: "video".to_string(),
            ad_topic: "entertainment".to_string(),
            ad_target_audience: "streamers".to_string(),
            conversion_rate: 0.14,
        }
    }

    #[test]
    fn test_prediction_response_wire_shape() {
        let input = sample_input();
        let mut rng = StdRng::seed_from_u64(2024);
        let response = bidder_allocation::run_prediction(&input, &mut rng).unwrap();

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], serde_json::json!(true));
        assert_eq!(json["predictions"].as_array().unwrap().len(), 4);
        assert_eq!(json["budget_allocation"].as_array().unwrap().len(), 4);
        // The note field stays off the wire unless the fallback set it.
        assert!(json.get("note").is_none());

        let first = &json["predictions"][0];
        assert_eq!(first["segment_id"], serde_json::json!("seg_0"));
        assert_eq!(first["age_group"], serde_json::json!("18-24"));
        assert_eq!(first["device_type"], serde_json::json!("mobile"));
        assert!(first["roi_level"].is_string());

        let summary = &json["summary"];
        assert!(summary["optimization_score"].is_u64());
        assert!(summary["top_performing_segment"].is_string());
    }

    #[test]
    fn test_optimization_request_wire_shape() {
        let campaigns = vec![
            sample_campaign("Holiday Launch", 40_000.0),
            sample_campaign("Brand Push", 25_000.0),
        ];
        let ads = vec![sample_ad("Teaser"), sample_ad("Trailer"), sample_ad("CTA")];
        let batch = SubmissionBatch::new(&campaigns, &ads);

        let request = OptimizationRequest {
            campaigns: batch.campaigns().to_vec(),
            ads: batch.ads().to_vec(),
            total_budget: 100_000.0,
            risk_factor: 0.0,
            ga: GaParams::default(),
        };

        let json = serde_json::to_value(&request).unwrap();

        // Integer ids on the wire, local keys nowhere in sight.
        assert_eq!(json["campaigns"][0]["id"], serde_json::json!(1));
        assert_eq!(json["campaigns"][1]["id"], serde_json::json!(2));
        assert_eq!(json["ads"][2]["id"], serde_json::json!(3));
        assert!(json["campaigns"][0].get("key").is_none());

        // Hyperparameters sit flat next to the budget.
        assert_eq!(json["population_size"], serde_json::json!(100));
        assert_eq!(json["max_generations"], serde_json::json!(250));
        assert_eq!(json["total_budget"], serde_json::json!(100_000.0));
    }

    #[test]
    fn test_outcome_round_trip_back_to_local_keys() {
        let campaigns = vec![
            sample_campaign("Holiday Launch", 40_000.0),
            sample_campaign("Brand Push", 25_000.0),
        ];
        let ads = vec![sample_ad("Teaser"), sample_ad("Trailer")];
        let batch = SubmissionBatch::new(&campaigns, &ads);

        // Allocation as the backend would return it.
        let outcome: OptimizationOutcome = serde_json::from_str(
            r#"{
                "allocation": {"1": [2], "2": [1]},
                "fitness": 0.92,
                "total_roi": 0.31,
                "total_cost": 70000.0,
                "total_revenue": 91700.0,
                "campaign_metrics": {
                    "1": {"cost": 41000.0, "revenue": 55000.0, "roi": 0.34, "n_ads": 1},
                    "2": {"cost": 29000.0, "revenue": 36700.0, "roi": 0.27, "n_ads": 1}
                }
            }"#,
        )
        .unwrap();

        let resolved = batch.resolve(outcome).unwrap();
        assert_eq!(resolved.assignments.len(), 2);

        for assignment in &resolved.assignments {
            assert!(campaigns.iter().any(|c| c.key == assignment.campaign_key));
            assert_eq!(assignment.ad_keys.len(), 1);
            assert!(ads.iter().any(|a| a.key == assignment.ad_keys[0]));
            let metrics = assignment.metrics.as_ref().unwrap();
            assert_eq!(metrics.n_ads, 1);
        }
        assert_eq!(resolved.total_revenue, 91_700.0);
    }

    #[test]
    fn test_comparison_wire_shape() {
        let comparison: AlgorithmComparison = serde_json::from_str(
            r#"{
                "ga_result": {"allocation": {"1": [1]}, "fitness": 1.0},
                "ts_result": {"allocation": {"1": [1]}, "fitness": 1.2},
                "comparison": {"fitness_difference": 0.2},
                "winner": "Tabu Search"
            }"#,
        )
        .unwrap();

        assert_eq!(comparison.winner, "Tabu Search");
        assert_eq!(comparison.ts_result.unwrap().fitness, 1.2);
        assert_eq!(
            comparison.comparison["fitness_difference"],
            serde_json::json!(0.2)
        );
    }
}
