mod support;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::Value;
use space_explorer::config::Config;
use support::{
    FakeNasa, Upstream, many_photos, one_photo, spawn_fake_nasa, spawn_fake_nasa_with_apod,
    test_config,
};
use tower::ServiceExt;

async fn spawn_app(config: Config) -> Router {
    let state = space_explorer::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    space_explorer::api::router(state)
}

async fn spawn_app_with(upstream: &FakeNasa) -> Router {
    spawn_app(test_config(upstream)).await
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_welcome_message() {
    let upstream = spawn_fake_nasa(Upstream::Photos(one_photo())).await;
    let app = spawn_app_with(&upstream).await;

    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to the Space Exploration API!");
}

#[tokio::test]
async fn test_health_reports_store() {
    let upstream = spawn_fake_nasa(Upstream::Photos(one_photo())).await;
    let app = spawn_app_with(&upstream).await;

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "ok");
    assert_eq!(body["cached_queries"], 0);
}

#[tokio::test]
async fn test_health_without_store() {
    let upstream = spawn_fake_nasa(Upstream::Photos(one_photo())).await;
    let mut config = test_config(&upstream);
    config.store.enabled = false;
    let app = spawn_app(config).await;

    let (_, body) = get(&app, "/health").await;
    assert_eq!(body["store"], "disabled");
}

#[tokio::test]
async fn test_apod_passes_record_through() {
    let upstream = spawn_fake_nasa(Upstream::Photos(one_photo())).await;
    let app = spawn_app_with(&upstream).await;

    let (status, body) = get(&app, "/nasa/apod").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "The Horsehead Nebula");
    assert_eq!(body["media_type"], "image");
    assert_eq!(body["service_version"], "v1");
}

#[tokio::test]
async fn test_apod_without_url_is_forwarded() {
    let payload = serde_json::json!({
        "date": "2021-03-02",
        "explanation": "An interactive feature.",
        "media_type": "other",
        "service_version": "v1",
        "title": "Interactive"
    });
    let upstream = spawn_fake_nasa_with_apod(Upstream::Photos(one_photo()), payload.clone()).await;
    let app = spawn_app_with(&upstream).await;

    let (status, body) = get(&app, "/nasa/apod").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, payload);
}

#[tokio::test]
async fn test_apod_without_api_key_is_configuration_error() {
    let upstream = spawn_fake_nasa(Upstream::Photos(one_photo())).await;
    let mut config = test_config(&upstream);
    config.nasa.api_key = None;
    let app = spawn_app(config).await;

    let (status, body) = get(&app, "/nasa/apod").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Server is missing NASA API configuration");
}

#[tokio::test]
async fn test_apod_upstream_rejection_is_generic_error() {
    let upstream = spawn_fake_nasa(Upstream::Photos(one_photo())).await;
    let mut config = test_config(&upstream);
    config.nasa.api_key = Some("WRONG".to_string());
    let app = spawn_app(config).await;

    let (status, body) = get(&app, "/nasa/apod").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch data from NASA API");
}

#[tokio::test]
async fn test_mars_photos_first_page() {
    let upstream = spawn_fake_nasa(Upstream::Photos(one_photo())).await;
    let app = spawn_app_with(&upstream).await;

    let (status, body) = get(&app, "/nasa/mars-photos?sol=1000&page=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["photos"][0]["img_src"], "http://example.com/photo.jpg");
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 25);
    assert_eq!(body["total"], 1);
    assert_eq!(body["source"], "upstream");

    let (rover, params) = upstream.last_request().unwrap();
    assert_eq!(rover, "curiosity");
    assert_eq!(params.get("sol").map(String::as_str), Some("1000"));
    assert_eq!(params.get("api_key").map(String::as_str), Some(support::TEST_API_KEY));
}

#[tokio::test]
async fn test_mars_photos_second_request_is_cached() {
    let upstream = spawn_fake_nasa(Upstream::Photos(many_photos(3))).await;
    let app = spawn_app_with(&upstream).await;

    let (_, first) = get(&app, "/nasa/mars-photos?sol=1000").await;
    let (status, second) = get(&app, "/nasa/mars-photos?sol=1000").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["source"], "upstream");
    assert_eq!(second["source"], "cache");
    assert_eq!(first["photos"], second["photos"]);
    assert_eq!(upstream.photo_calls(), 1);
}

#[tokio::test]
async fn test_mars_photos_pagination() {
    let upstream = spawn_fake_nasa(Upstream::Photos(many_photos(5))).await;
    let app = spawn_app_with(&upstream).await;

    let (status, body) = get(&app, "/nasa/mars-photos?sol=1000&page=2&limit=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 5);
    let ids: Vec<i64> = body["photos"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![3, 4]);

    let (status, body) = get(&app, "/nasa/mars-photos?sol=1000&page=3&limit=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["photos"].as_array().unwrap().len(), 1);

    let (status, body) = get(&app, "/nasa/mars-photos?sol=1000&page=4&limit=2").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());

    assert_eq!(upstream.photo_calls(), 1);
}

#[tokio::test]
async fn test_mars_photos_empty_result_is_not_found() {
    let upstream = spawn_fake_nasa(Upstream::Photos(serde_json::json!({"photos": []}))).await;
    let app = spawn_app_with(&upstream).await;

    let (status, body) = get(&app, "/nasa/mars-photos?sol=1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_mars_photos_rate_limited_is_not_found() {
    let upstream = spawn_fake_nasa(Upstream::Status(429)).await;
    let app = spawn_app_with(&upstream).await;

    let (status, body) = get(&app, "/nasa/mars-photos?sol=1000").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_mars_photos_upstream_error_is_internal() {
    let upstream = spawn_fake_nasa(Upstream::Status(500)).await;
    let app = spawn_app_with(&upstream).await;

    let (status, body) = get(&app, "/nasa/mars-photos?sol=1000").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_mars_photos_missing_api_key() {
    let upstream = spawn_fake_nasa(Upstream::Photos(one_photo())).await;
    let mut config = test_config(&upstream);
    config.nasa.api_key = None;
    let app = spawn_app(config).await;

    let (status, body) = get(&app, "/nasa/mars-photos?sol=1000").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Server is missing NASA API configuration");
    assert_eq!(upstream.photo_calls(), 0);
}

#[tokio::test]
async fn test_mars_photos_rejects_bad_params() {
    let upstream = spawn_fake_nasa(Upstream::Photos(one_photo())).await;
    let app = spawn_app_with(&upstream).await;

    let (status, _) = get(&app, "/nasa/mars-photos?sol=-3").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(&app, "/nasa/mars-photos?sol=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(&app, "/nasa/mars-photos?rover=../etc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(upstream.photo_calls(), 0);
}

#[tokio::test]
async fn test_api_prefix_serves_same_routes() {
    let upstream = spawn_fake_nasa(Upstream::Photos(one_photo())).await;
    let app = spawn_app_with(&upstream).await;

    let (status, body) = get(&app, "/api/nasa/mars-photos?sol=1000").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["photos"][0]["img_src"], "http://example.com/photo.jpg");

    let (status, _) = get(&app, "/api/nasa/apod").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_single_photo_by_page() {
    let upstream = spawn_fake_nasa(Upstream::Photos(many_photos(3))).await;
    let app = spawn_app_with(&upstream).await;

    let (status, body) = get(&app, "/nasa/mars-photo?sol=1000&page=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["photo"]["id"], 2);
    assert_eq!(body["page"], 2);

    let (status, _) = get(&app, "/nasa/mars-photo?sol=1000&page=9").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rover_manifest() {
    let upstream = spawn_fake_nasa(Upstream::Photos(one_photo())).await;
    let app = spawn_app_with(&upstream).await;

    let (status, body) = get(&app, "/nasa/rover-manifest?rover=Curiosity").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rover"], "Curiosity");
    assert_eq!(body["total_photos"], 695670);
    assert_eq!(body["max_sol"], 4102);

    let (status, _) = get(&app, "/nasa/rover-manifest?rover=sojourner").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let upstream = spawn_fake_nasa(Upstream::Photos(one_photo())).await;
    let app = spawn_app_with(&upstream).await;

    let (status, _) = get(&app, "/nasa/does-not-exist").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
