use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;
use tracing::info;

use super::validation::{validate_camera, validate_rover, validate_sol};
use super::{
    ApiError, AppState, ManifestDto, ManifestParams, PhotoPageDto, PhotoParams, SinglePhotoDto,
};
use crate::models::{ApodRecord, PhotoQuery};
use crate::services::{Pagination, Persistence, PhotoLookup};

pub async fn get_apod(State(state): State<Arc<AppState>>) -> Result<Json<ApodRecord>, ApiError> {
    let apod = state
        .nasa()
        .fetch_apod()
        .await
        .map_err(|e| {
            if e.is_config() {
                ApiError::from_nasa("APOD", e)
            } else {
                ApiError::ExternalApiError {
                    service: "NASA".to_string(),
                    message: "Failed to fetch data from NASA API".to_string(),
                }
            }
        })?;

    Ok(Json(apod))
}

fn photo_query(state: &AppState, params: &PhotoParams) -> Result<PhotoQuery, ApiError> {
    let defaults = &state.config().nasa;
    let sol = validate_sol(params.sol.as_deref(), defaults.default_sol)?;
    let rover = validate_rover(params.rover.as_deref(), &defaults.default_rover)?;
    let camera = validate_camera(params.camera.as_deref())?;
    Ok(PhotoQuery::new(rover, sol, camera))
}

pub async fn get_mars_photos(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PhotoParams>,
) -> Result<Json<PhotoPageDto>, ApiError> {
    let query = photo_query(&state, &params)?;
    let pagination = Pagination::from_params(
        params.page.as_deref(),
        params.limit.as_deref(),
        state.config().nasa.default_limit,
    );

    let set = match state.photo_service().lookup(&query).await {
        PhotoLookup::Found(set) => set,
        PhotoLookup::NotFound => {
            return Err(ApiError::not_found(format!(
                "No photos found for {} on sol {}",
                query.rover, query.sol
            )));
        }
        PhotoLookup::UpstreamFailed(e) => return Err(ApiError::from_nasa("Mars Rover photos", e)),
    };

    if let Persistence::Failed(reason) = &set.persistence {
        info!(query = %query.cache_key(), reason = %reason, "Serving photos that could not be stored");
    }

    let total = set.photos.len();
    let Some(photos) = pagination.slice(&set.photos) else {
        return Err(ApiError::not_found(format!(
            "Page {} is out of range ({} photos)",
            pagination.page, total
        )));
    };

    Ok(Json(PhotoPageDto {
        photos: photos.to_vec(),
        page: pagination.page,
        limit: pagination.limit,
        total,
        source: set.source,
    }))
}

/// One photo per page: `page` N returns the N-th photo of the result set.
pub async fn get_mars_photo(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PhotoParams>,
) -> Result<Json<SinglePhotoDto>, ApiError> {
    let query = photo_query(&state, &params)?;
    let page = Pagination::from_params(params.page.as_deref(), None, 1).page;

    match state.photo_service().lookup_one(&query, page).await {
        PhotoLookup::Found(mut set) => match set.photos.pop() {
            Some(photo) => Ok(Json(SinglePhotoDto { photo, page })),
            None => Err(ApiError::not_found("No photo found")),
        },
        PhotoLookup::NotFound => Err(ApiError::not_found(format!(
            "No photo found for {} on sol {} at page {}",
            query.rover, query.sol, page
        ))),
        PhotoLookup::UpstreamFailed(e) => Err(ApiError::from_nasa("Mars Rover photo", e)),
    }
}

pub async fn get_rover_manifest(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ManifestParams>,
) -> Result<Json<ManifestDto>, ApiError> {
    let rover = validate_rover(params.rover.as_deref(), &state.config().nasa.default_rover)?
        .to_lowercase();

    let manifest = state
        .photo_service()
        .manifest(&rover)
        .await
        .map_err(|e| ApiError::from_nasa("rover manifest", e))?;

    Ok(Json(ManifestDto {
        rover: manifest.name,
        total_photos: manifest.total_photos,
        max_sol: manifest.max_sol,
        max_date: manifest.max_date,
        status: manifest.status,
    }))
}
