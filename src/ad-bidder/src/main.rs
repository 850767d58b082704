//! Ad Bidder — demographic targeting and budget optimization service.
//!
//! Main entry point: loads configuration, seeds the in-memory store, wires
//! the optimizer client, and starts the HTTP server.

use bidder_api::{ApiServer, MarketingStore};
use bidder_core::config::AppConfig;
use bidder_optimizer::OptimizerClient;
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(name = "ad-bidder")]
#[command(about = "Demographic targeting and budget optimization service")]
#[command(version)]
struct Cli {
    /// Node identifier (overrides config)
    #[arg(long, env = "AD_BIDDER__NODE_ID")]
    node_id: Option<String>,

    /// HTTP port (overrides config)
    #[arg(long, env = "AD_BIDDER__API__HTTP_PORT")]
    http_port: Option<u16>,

    /// Campaign seed-data file (overrides config)
    #[arg(long, env = "AD_BIDDER__DATA__CAMPAIGNS_PATH")]
    campaigns_path: Option<String>,

    /// Ad seed-data file (overrides config)
    #[arg(long, env = "AD_BIDDER__DATA__ADS_PATH")]
    ads_path: Option<String>,

    /// Optimizer backend base URL (overrides config)
    #[arg(long, env = "AD_BIDDER__OPTIMIZER__BASE_URL")]
    optimizer_url: Option<String>,

    /// Fixed RNG seed for reproducible predictions (overrides config)
    #[arg(long, env = "AD_BIDDER__PREDICTION__SEED")]
    seed: Option<u64>,

    /// Also pull campaigns and ads from the optimizer backend at startup
    #[arg(long, env = "AD_BIDDER__DATA__SEED_FROM_BACKEND", default_value_t = false)]
    seed_from_backend: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ad_bidder=info,bidder_api=info,tower_http=info".into()),
        )
        .json()
        .init();

    let cli = Cli::parse();

    info!("Ad Bidder starting up");

    // Load configuration
    let mut config = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(node_id) = cli.node_id {
        config.node_id = node_id;
    }
    if let Some(port) = cli.http_port {
        config.api.http_port = port;
    }
    if let Some(path) = cli.campaigns_path {
        config.data.campaigns_path = path;
    }
    if let Some(path) = cli.ads_path {
        config.data.ads_path = path;
    }
    if let Some(url) = cli.optimizer_url {
        config.optimizer.base_url = url;
    }
    if let Some(seed) = cli.seed {
        config.prediction.seed = Some(seed);
    }
    if cli.seed_from_backend {
        config.data.seed_from_backend = true;
    }

    info!(
        node_id = %config.node_id,
        http_port = config.api.http_port,
        optimizer_url = %config.optimizer.base_url,
        "Configuration loaded"
    );

    // Optimizer backend client
    let optimizer = Arc::new(OptimizerClient::new(&config.optimizer)?);

    // Seed the in-memory store
    let store = Arc::new(MarketingStore::new());
    store.load_from_json(&config.data.campaigns_path, &config.data.ads_path);

    if config.data.seed_from_backend {
        match optimizer.fetch_campaigns().await {
            Ok(campaigns) => {
                info!(count = campaigns.len(), "Loaded campaigns from optimizer backend");
                store.insert_campaigns(campaigns);
            }
            Err(e) => warn!(error = %e, "Skipping backend campaign seed"),
        }
        match optimizer.fetch_ads().await {
            Ok(ads) => {
                info!(count = ads.len(), "Loaded ads from optimizer backend");
                store.insert_ads(ads);
            }
            Err(e) => warn!(error = %e, "Skipping backend ad seed"),
        }
    }

    if store.is_empty() {
        warn!("Store is empty; data endpoints will serve nothing until seeded");
    }

    // Start API server
    let api_server = ApiServer::new(config.clone(), store, optimizer);

    // Start metrics exporter
    if let Err(e) = api_server.start_metrics().await {
        error!(error = %e, "Failed to start metrics exporter");
    }

    info!("Ad Bidder is ready to serve traffic");

    // Start HTTP server (blocks until shutdown)
    api_server.start_http().await?;

    Ok(())
}
