use serde::{Deserialize, Serialize};

use crate::models::Photo;
use crate::services::PhotoSource;

/// Error body shared by every endpoint: `{ "error": "..." }`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Raw query values; parsing is lenient and done by the handlers.
#[derive(Debug, Default, Deserialize)]
pub struct PhotoParams {
    pub sol: Option<String>,
    pub rover: Option<String>,
    pub camera: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ManifestParams {
    pub rover: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PhotoPageDto {
    pub photos: Vec<Photo>,
    pub page: u32,
    pub limit: u32,
    pub total: usize,
    pub source: PhotoSource,
}

#[derive(Debug, Serialize)]
pub struct SinglePhotoDto {
    pub photo: Photo,
    pub page: u32,
}

#[derive(Debug, Serialize)]
pub struct ManifestDto {
    pub rover: String,
    pub total_photos: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_sol: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct WelcomeDto {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthDto {
    pub status: &'static str,
    pub store: &'static str,
    pub cached_queries: usize,
    pub uptime_seconds: u64,
    pub version: &'static str,
}
