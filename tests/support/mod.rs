//! Test fixtures: a fake NASA API served by axum on an ephemeral port and
//! config/state builders pointing at it.

#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use space_explorer::config::Config;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const TEST_API_KEY: &str = "TEST_KEY";

/// How the fake rover photos endpoint answers.
#[derive(Clone)]
pub enum Upstream {
    Photos(Value),
    Status(u16),
    Slow(Duration, Value),
}

#[derive(Clone)]
struct FakeState {
    mode: Upstream,
    apod: Value,
    photo_calls: Arc<AtomicUsize>,
    last_params: Arc<Mutex<Option<(String, HashMap<String, String>)>>>,
}

pub struct FakeNasa {
    pub addr: SocketAddr,
    photo_calls: Arc<AtomicUsize>,
    last_params: Arc<Mutex<Option<(String, HashMap<String, String>)>>>,
}

impl FakeNasa {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn photo_calls(&self) -> usize {
        self.photo_calls.load(Ordering::SeqCst)
    }

    /// Rover path segment and query parameters of the last photos request.
    pub fn last_request(&self) -> Option<(String, HashMap<String, String>)> {
        self.last_params.lock().unwrap().clone()
    }
}

pub fn one_photo() -> Value {
    json!({
        "photos": [{
            "id": 1,
            "img_src": "http://example.com/photo.jpg",
            "earth_date": "2024-01-01",
            "rover": {"name": "Curiosity"}
        }]
    })
}

pub fn many_photos(count: i64) -> Value {
    let photos: Vec<Value> = (1..=count)
        .map(|id| {
            json!({
                "id": id,
                "sol": 1000,
                "img_src": format!("http://example.com/{id}.jpg"),
                "earth_date": "2015-05-30",
                "camera": {"id": 20, "name": "FHAZ", "rover_id": 5, "full_name": "Front Hazard Avoidance Camera"},
                "rover": {"id": 5, "name": "Curiosity", "status": "active"}
            })
        })
        .collect();
    json!({ "photos": photos })
}

pub fn default_apod() -> Value {
    json!({
        "title": "The Horsehead Nebula",
        "explanation": "A dark nebula in Orion.",
        "url": "https://apod.nasa.gov/apod/image/horsehead.jpg",
        "hdurl": "https://apod.nasa.gov/apod/image/horsehead_big.jpg",
        "date": "2024-03-01",
        "media_type": "image",
        "service_version": "v1"
    })
}

pub async fn spawn_fake_nasa(mode: Upstream) -> FakeNasa {
    spawn_fake_nasa_with_apod(mode, default_apod()).await
}

pub async fn spawn_fake_nasa_with_apod(mode: Upstream, apod_body: Value) -> FakeNasa {
    let state = FakeState {
        mode,
        apod: apod_body,
        photo_calls: Arc::new(AtomicUsize::new(0)),
        last_params: Arc::new(Mutex::new(None)),
    };

    let photo_calls = state.photo_calls.clone();
    let last_params = state.last_params.clone();

    let app = Router::new()
        .route("/planetary/apod", get(apod))
        .route("/mars-photos/api/v1/rovers/{rover}/photos", get(rover_photos))
        .route("/mars-photos/api/v1/manifests/{rover}", get(manifest))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeNasa {
        addr,
        photo_calls,
        last_params,
    }
}

async fn apod(
    State(state): State<FakeState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if params.get("api_key").map(String::as_str) != Some(TEST_API_KEY) {
        return StatusCode::FORBIDDEN.into_response();
    }

    Json(state.apod).into_response()
}

async fn rover_photos(
    State(state): State<FakeState>,
    Path(rover): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.photo_calls.fetch_add(1, Ordering::SeqCst);
    *state.last_params.lock().unwrap() = Some((rover, params));

    match state.mode {
        Upstream::Photos(body) => Json(body).into_response(),
        Upstream::Status(code) => {
            let status = StatusCode::from_u16(code).unwrap();
            (status, Json(json!({"error": {"code": "UPSTREAM"}}))).into_response()
        }
        Upstream::Slow(delay, body) => {
            tokio::time::sleep(delay).await;
            Json(body).into_response()
        }
    }
}

async fn manifest(Path(rover): Path<String>) -> Response {
    if rover != "curiosity" {
        return (StatusCode::NOT_FOUND, Json(json!({"errors": "Invalid Rover Name"})))
            .into_response();
    }

    Json(json!({
        "photo_manifest": {
            "name": "Curiosity",
            "landing_date": "2012-08-06",
            "status": "active",
            "max_sol": 4102,
            "max_date": "2024-02-19",
            "total_photos": 695670,
            "photos": []
        }
    }))
    .into_response()
}

/// Config pointing at `upstream`, with a fresh temp-file SQLite database.
pub fn test_config(upstream: &FakeNasa) -> Config {
    let db_path = std::env::temp_dir().join(format!(
        "space-explorer-test-{}.db",
        uuid::Uuid::new_v4()
    ));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.nasa.base_url = Some(upstream.base_url());
    config.nasa.api_key = Some(TEST_API_KEY.to_string());
    config.observability.metrics_enabled = false;
    config
}
