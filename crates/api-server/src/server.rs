//! API server — HTTP router plus the standalone metrics exporter.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::routing::{get, post};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use bidder_core::config::AppConfig;
use bidder_optimizer::OptimizerClient;

use crate::rest::{self, AppState};
use crate::store::MarketingStore;

pub struct ApiServer {
    config: AppConfig,
    store: Arc<MarketingStore>,
    optimizer: Arc<OptimizerClient>,
}

impl ApiServer {
    pub fn new(
        config: AppConfig,
        store: Arc<MarketingStore>,
        optimizer: Arc<OptimizerClient>,
    ) -> Self {
        Self {
            config,
            store,
            optimizer,
        }
    }

    pub fn router(&self) -> Router {
        let state = AppState {
            store: self.store.clone(),
            optimizer: self.optimizer.clone(),
            node_id: self.config.node_id.clone(),
            start_time: Instant::now(),
            prediction_seed: self.config.prediction.seed,
        };

        Router::new()
            // Prediction and optimization
            .route("/v1/predict", post(rest::handle_predict))
            .route("/v1/optimize/ga", post(rest::handle_optimize_ga))
            .route("/v1/optimize/tabu", post(rest::handle_optimize_tabu))
            .route("/v1/optimize/compare", post(rest::handle_compare))
            // Marketing data
            .route("/campaigns", get(rest::list_campaigns))
            .route("/campaigns/:key", get(rest::get_campaign))
            .route("/ads", get(rest::list_ads))
            .route("/ads/:key", get(rest::get_ad))
            .route("/all-data", get(rest::all_data))
            // Operational endpoints
            .route("/health", get(rest::health_check))
            .route("/ready", get(rest::readiness))
            .route("/live", get(rest::liveness))
            // Middleware
            .layer(CompressionLayer::new())
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Start the HTTP REST server.
    pub async fn start_http(&self) -> anyhow::Result<()> {
        let app = self.router();

        let addr = SocketAddr::new(self.config.api.host.parse()?, self.config.api.http_port);
        info!(addr = %addr, "Starting HTTP server");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    /// Start the Prometheus metrics exporter on its own port.
    pub async fn start_metrics(&self) -> anyhow::Result<()> {
        let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
        let handle = builder
            .with_http_listener(SocketAddr::new(
                self.config.api.host.parse()?,
                self.config.metrics.port,
            ))
            .install_recorder()?;

        info!(port = self.config.metrics.port, "Metrics exporter started");

        // Keep the handle alive
        std::mem::forget(handle);
        Ok(())
    }
}
