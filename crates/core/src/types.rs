use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Age bracket used for demographic targeting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AgeGroup {
    #[serde(rename = "18-24")]
    Age18To24,
    #[serde(rename = "25-34")]
    Age25To34,
    #[serde(rename = "35-44")]
    Age35To44,
    #[serde(rename = "45-54")]
    Age45To54,
    #[serde(rename = "55+")]
    Age55Plus,
}

impl AgeGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Age18To24 => "18-24",
            Self::Age25To34 => "25-34",
            Self::Age35To44 => "35-44",
            Self::Age45To54 => "45-54",
            Self::Age55Plus => "55+",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    All,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::All => "all",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    Mobile,
    Desktop,
    Tablet,
}

impl DeviceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Desktop => "desktop",
            Self::Tablet => "tablet",
        }
    }
}

/// Creative topic; drives the base CTR lookup in the predictor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AdTopic {
    Technology,
    Finance,
    Healthcare,
    Education,
    Entertainment,
    Travel,
    Food,
    Fashion,
    Sports,
    Automotive,
}

impl AdTopic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Technology => "technology",
            Self::Finance => "finance",
            Self::Healthcare => "healthcare",
            Self::Education => "education",
            Self::Entertainment => "entertainment",
            Self::Travel => "travel",
            Self::Food => "food",
            Self::Fashion => "fashion",
            Self::Sports => "sports",
            Self::Automotive => "automotive",
        }
    }
}

impl std::fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for DeviceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for AdTopic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A funded channel placement with observed delivery history.
///
/// `key` is the local handle used to identify the record in memory; `id` is
/// the integer the optimizer backend knows the campaign by, assigned at
/// submission time. The two are never interchangeable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Campaign {
    #[serde(default = "Uuid::new_v4")]
    pub key: Uuid,
    #[serde(default)]
    pub id: Option<u32>,
    pub name: String,
    pub no_of_days: u32,
    pub time: NaiveDate,
    pub approved_budget: f64,
    pub impressions: u64,
    pub clicks: u64,
    pub media_cost_usd: f64,
    pub ext_service_name: String,
    pub channel_name: String,
    pub search_tag_cat: String,
    /// Actual minus approved budget; set by the backend's cost predictor.
    #[serde(default)]
    pub overcost: f64,
}

/// An ad creative targeting a demographic/device/content combination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ad {
    #[serde(default = "Uuid::new_v4")]
    pub key: Uuid,
    #[serde(default)]
    pub id: Option<u32>,
    pub name: String,
    pub click_through_rate: f64,
    pub view_time: u32,
    pub cost_per_click: f64,
    pub roi: f64,
    pub timestamp: DateTime<Utc>,
    pub age_group: String,
    pub engagement_level: String,
    pub device_type: String,
    pub location: String,
    pub gender: String,
    pub content_type: String,
    pub ad_topic: String,
    pub ad_target_audience: String,
    /// Set by the backend's conversion predictor.
    #[serde(default)]
    pub conversion_rate: f64,
}

/// Combined snapshot of everything in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllMarketingData {
    pub campaigns: Vec<Campaign>,
    pub ads: Vec<Ad>,
}

/// Input to the heuristic prediction pipeline: one campaign's budget and
/// targeting selections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignInput {
    pub campaign_name: String,
    pub budget: f64,
    pub max_bid_cpm: f64,
    pub target_age_groups: Vec<AgeGroup>,
    pub target_genders: Vec<Gender>,
    pub device_types: Vec<DeviceType>,
    pub ad_topic: AdTopic,
    pub search_tags: Vec<String>,
}
