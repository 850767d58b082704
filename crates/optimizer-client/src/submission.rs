//! Id handoff between the local store and the optimizer backend.
//!
//! Locally every campaign and ad is addressed by an opaque `Uuid` key. The
//! backend only understands small integer ids, so each submission reassigns
//! ids sequentially starting at 1, in the order the records are submitted,
//! and remembers the mapping so the response allocation can be translated
//! back. Ids are batch-scoped; nothing about them survives the call.

use std::collections::HashMap;

use uuid::Uuid;

use bidder_core::types::{Ad, Campaign};
use bidder_core::{BidderError, BidderResult};

use crate::models::{AdPayload, CampaignMetrics, CampaignPayload, OptimizationOutcome};

/// One optimization call's worth of records, with backend ids assigned.
#[derive(Debug, Clone)]
pub struct SubmissionBatch {
    campaigns: Vec<CampaignPayload>,
    ads: Vec<AdPayload>,
    campaign_keys: HashMap<u32, Uuid>,
    ad_keys: HashMap<u32, Uuid>,
}

impl SubmissionBatch {
    pub fn new(campaigns: &[Campaign], ads: &[Ad]) -> Self {
        let mut campaign_keys = HashMap::with_capacity(campaigns.len());
        let campaign_payloads = campaigns
            .iter()
            .enumerate()
            .map(|(index, campaign)| {
                let id = index as u32 + 1;
                campaign_keys.insert(id, campaign.key);
                CampaignPayload {
                    id,
                    name: campaign.name.clone(),
                    no_of_days: campaign.no_of_days,
                    time: campaign.time,
                    approved_budget: campaign.approved_budget,
                    impressions: campaign.impressions,
                    clicks: campaign.clicks,
                    media_cost_usd: campaign.media_cost_usd,
                    ext_service_name: campaign.ext_service_name.clone(),
                    channel_name: campaign.channel_name.clone(),
                    search_tag_cat: campaign.search_tag_cat.clone(),
                    overcost: campaign.overcost,
                }
            })
            .collect();

        let mut ad_keys = HashMap::with_capacity(ads.len());
        let ad_payloads = ads
            .iter()
            .enumerate()
            .map(|(index, ad)| {
                let id = index as u32 + 1;
                ad_keys.insert(id, ad.key);
                AdPayload {
                    id,
                    name: ad.name.clone(),
                    click_through_rate: ad.click_through_rate,
                    view_time: ad.view_time,
                    cost_per_click: ad.cost_per_click,
                    roi: ad.roi,
                    timestamp: ad.timestamp,
                    age_group: ad.age_group.clone(),
                    engagement_level: ad.engagement_level.clone(),
                    device_type: ad.device_type.clone(),
                    location: ad.location.clone(),
                    gender: ad.gender.clone(),
                    content_type: ad.content_type.clone(),
                    ad_topic: ad.ad_topic.clone(),
                    ad_target_audience: ad.ad_target_audience.clone(),
                    conversion_rate: ad.conversion_rate,
                }
            })
            .collect();

        Self {
            campaigns: campaign_payloads,
            ads: ad_payloads,
            campaign_keys,
            ad_keys,
        }
    }

    pub fn campaigns(&self) -> &[CampaignPayload] {
        &self.campaigns
    }

    pub fn ads(&self) -> &[AdPayload] {
        &self.ads
    }

    pub fn total_approved_budget(&self) -> f64 {
        self.campaigns.iter().map(|c| c.approved_budget).sum()
    }

    /// Translate a backend outcome back to local `Uuid` handles.
    ///
    /// Rejects outcomes that reference ids this batch never issued; a mapping
    /// the backend invented would otherwise be silently misattributed.
    pub fn resolve(&self, outcome: OptimizationOutcome) -> BidderResult<ResolvedOptimization> {
        let mut assignments = Vec::with_capacity(outcome.allocation.len());

        for (campaign_id, ad_ids) in &outcome.allocation {
            let campaign_key = self.campaign_keys.get(campaign_id).ok_or_else(|| {
                BidderError::Backend(format!(
                    "allocation references unknown campaign id {}",
                    campaign_id
                ))
            })?;

            let mut ad_keys = Vec::with_capacity(ad_ids.len());
            for ad_id in ad_ids {
                let key = self.ad_keys.get(ad_id).ok_or_else(|| {
                    BidderError::Backend(format!("allocation references unknown ad id {}", ad_id))
                })?;
                ad_keys.push(*key);
            }

            assignments.push(CampaignAssignment {
                campaign_key: *campaign_key,
                ad_keys,
                metrics: outcome.campaign_metrics.get(campaign_id).cloned(),
            });
        }

        // Stable output order regardless of backend map iteration.
        assignments.sort_by_key(|a| a.campaign_key);

        Ok(ResolvedOptimization {
            fitness: outcome.fitness,
            total_roi: outcome.total_roi,
            total_cost: outcome.total_cost,
            total_revenue: outcome.total_revenue,
            assignments,
        })
    }
}

/// Backend outcome with every id mapped back to a local handle.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ResolvedOptimization {
    pub fitness: f64,
    pub total_roi: f64,
    pub total_cost: f64,
    pub total_revenue: f64,
    pub assignments: Vec<CampaignAssignment>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct CampaignAssignment {
    pub campaign_key: Uuid,
    pub ad_keys: Vec<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<CampaignMetrics>,
}
