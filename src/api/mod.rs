use axum::{Router, http::HeaderValue, middleware, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::clients::NasaClient;
use crate::config::Config;
use crate::db::PhotoStore;
use crate::services::PhotoService;
use crate::state::SharedState;

mod error;
mod nasa;
mod observability;
mod system;
mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn nasa(&self) -> &Arc<NasaClient> {
        &self.shared.nasa
    }

    #[must_use]
    pub fn store(&self) -> Option<&Arc<dyn PhotoStore>> {
        self.shared.store.as_ref()
    }

    #[must_use]
    pub fn photo_service(&self) -> &Arc<PhotoService> {
        &self.shared.photo_service
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config().server.cors_allowed_origins.clone();

    let cors_layer = if cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .route("/", get(system::welcome))
        .route("/health", get(system::health))
        .route("/metrics", get(observability::get_metrics))
        .nest("/nasa", nasa_router())
        .nest("/api/nasa", nasa_router())
        .with_state(state)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::track_requests))
}

fn nasa_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/apod", get(nasa::get_apod))
        .route("/mars-photos", get(nasa::get_mars_photos))
        .route("/mars-photo", get(nasa::get_mars_photo))
        .route("/rover-manifest", get(nasa::get_rover_manifest))
}
