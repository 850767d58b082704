use serde::Deserialize;

/// Root application configuration. Loaded from environment variables
/// with the prefix `AD_BIDDER__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_node_id")]
    pub node_id: String,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub optimizer: OptimizerConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub prediction: PredictionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

/// Connection settings for the external GA / Tabu-Search optimizer.
#[derive(Debug, Clone, Deserialize)]
pub struct OptimizerConfig {
    #[serde(default = "default_optimizer_url")]
    pub base_url: String,
    #[serde(default = "default_optimizer_timeout_ms")]
    pub timeout_ms: u64,
    /// When true, `/v1/predict` falls back to the local heuristic allocator
    /// if the backend is unreachable instead of failing the request.
    #[serde(default = "default_fallback_to_mock")]
    pub fallback_to_mock: bool,
}

/// Seed data for the in-memory campaign/ad store.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_campaigns_path")]
    pub campaigns_path: String,
    #[serde(default = "default_ads_path")]
    pub ads_path: String,
    /// When true, also pull campaigns and ads from the optimizer backend at
    /// startup, on top of whatever the JSON files provided.
    #[serde(default)]
    pub seed_from_backend: bool,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct PredictionConfig {
    /// Fixed RNG seed for the heuristic predictor. Unset means entropy-seeded;
    /// set it to make allocation runs reproducible.
    #[serde(default)]
    pub seed: Option<u64>,
}

// Default functions
fn default_node_id() -> String {
    "bidder-01".to_string()
}
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_http_port() -> u16 {
    8080
}
fn default_metrics_port() -> u16 {
    9091
}
fn default_optimizer_url() -> String {
    "http://localhost:8000".to_string()
}
fn default_optimizer_timeout_ms() -> u64 {
    120_000
}
fn default_fallback_to_mock() -> bool {
    true
}
fn default_campaigns_path() -> String {
    "db/campaigns.json".to_string()
}
fn default_ads_path() -> String {
    "db/ads.json".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            http_port: default_http_port(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            port: default_metrics_port(),
        }
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            base_url: default_optimizer_url(),
            timeout_ms: default_optimizer_timeout_ms(),
            fallback_to_mock: default_fallback_to_mock(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            campaigns_path: default_campaigns_path(),
            ads_path: default_ads_path(),
            seed_from_backend: false,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            node_id: default_node_id(),
            api: ApiConfig::default(),
            metrics: MetricsConfig::default(),
            optimizer: OptimizerConfig::default(),
            data: DataConfig::default(),
            prediction: PredictionConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("AD_BIDDER")
                .separator("__")
                .try_parsing(true)
                .list_separator(","),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
