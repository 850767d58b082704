//! In-memory marketing data store backed by DashMap.
//!
//! Seeded from JSON files at startup; records live only for the process
//! lifetime. Everything is addressed by the local `Uuid` key — backend
//! integer ids are assigned per optimization call and never stored here.

use std::path::Path;

use dashmap::DashMap;
use tracing::{info, warn};
use uuid::Uuid;

use bidder_core::types::{Ad, AllMarketingData, Campaign};
use bidder_core::BidderResult;

/// Thread-safe store for campaigns and ads.
pub struct MarketingStore {
    campaigns: DashMap<Uuid, Campaign>,
    ads: DashMap<Uuid, Ad>,
}

impl MarketingStore {
    pub fn new() -> Self {
        Self {
            campaigns: DashMap::new(),
            ads: DashMap::new(),
        }
    }

    /// Seed the store from the configured JSON files.
    ///
    /// A missing or unreadable file logs a warning and leaves that half of
    /// the store empty; the server still starts.
    pub fn load_from_json(&self, campaigns_path: &str, ads_path: &str) {
        match read_json::<Vec<Campaign>>(campaigns_path) {
            Ok(campaigns) => {
                let count = campaigns.len();
                for campaign in campaigns {
                    self.campaigns.insert(campaign.key, campaign);
                }
                info!(path = campaigns_path, count, "Loaded campaigns");
            }
            Err(e) => warn!(path = campaigns_path, error = %e, "Skipping campaign seed data"),
        }

        match read_json::<Vec<Ad>>(ads_path) {
            Ok(ads) => {
                let count = ads.len();
                for ad in ads {
                    self.ads.insert(ad.key, ad);
                }
                info!(path = ads_path, count, "Loaded ads");
            }
            Err(e) => warn!(path = ads_path, error = %e, "Skipping ad seed data"),
        }
    }

    /// Insert records fetched elsewhere, e.g. from the optimizer backend.
    /// Keyed by the local handle, so re-seeding the same records overwrites
    /// rather than duplicates.
    pub fn insert_campaigns(&self, campaigns: Vec<Campaign>) {
        for campaign in campaigns {
            self.campaigns.insert(campaign.key, campaign);
        }
    }

    pub fn insert_ads(&self, ads: Vec<Ad>) {
        for ad in ads {
            self.ads.insert(ad.key, ad);
        }
    }

    // ─── Campaigns ─────────────────────────────────────────────────────────

    pub fn list_campaigns(&self) -> Vec<Campaign> {
        let mut campaigns: Vec<Campaign> =
            self.campaigns.iter().map(|r| r.value().clone()).collect();
        campaigns.sort_by(|a, b| a.name.cmp(&b.name).then(a.key.cmp(&b.key)));
        campaigns
    }

    pub fn get_campaign(&self, key: Uuid) -> Option<Campaign> {
        self.campaigns.get(&key).map(|r| r.value().clone())
    }

    // ─── Ads ───────────────────────────────────────────────────────────────

    pub fn list_ads(&self) -> Vec<Ad> {
        let mut ads: Vec<Ad> = self.ads.iter().map(|r| r.value().clone()).collect();
        ads.sort_by(|a, b| a.name.cmp(&b.name).then(a.key.cmp(&b.key)));
        ads
    }

    pub fn get_ad(&self, key: Uuid) -> Option<Ad> {
        self.ads.get(&key).map(|r| r.value().clone())
    }

    pub fn all_data(&self) -> AllMarketingData {
        AllMarketingData {
            campaigns: self.list_campaigns(),
            ads: self.list_ads(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.campaigns.is_empty() && self.ads.is_empty()
    }
}

impl Default for MarketingStore {
    fn default() -> Self {
        Self::new()
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> BidderResult<T> {
    let contents = std::fs::read_to_string(Path::new(path))?;
    Ok(serde_json::from_str(&contents)?)
}
