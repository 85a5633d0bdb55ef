use axum::{Json, extract::State};
use std::sync::Arc;
use tracing::warn;

use super::{AppState, HealthDto, WelcomeDto};

pub async fn welcome() -> Json<WelcomeDto> {
    Json(WelcomeDto {
        message: "Welcome to the Space Exploration API!",
    })
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthDto> {
    let store = match state.store() {
        None => "disabled",
        Some(store) => match store.ping().await {
            Ok(()) => "ok",
            Err(e) => {
                warn!(error = %e, "Store health check failed");
                "error"
            }
        },
    };

    let cached_queries = state
        .photo_service()
        .cache()
        .map_or(0, crate::services::PhotoCache::len);

    Json(HealthDto {
        status: "ok",
        store,
        cached_queries,
        uptime_seconds: state.start_time.elapsed().as_secs(),
        version: env!("CARGO_PKG_VERSION"),
    })
}
