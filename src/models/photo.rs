use serde::{Deserialize, Serialize};
use std::fmt;

/// A Mars Rover photograph as returned by the rover photos endpoint.
///
/// Unknown upstream fields (rover landing dates, camera ids, ...) are dropped
/// on deserialization; the shape that is serialized back to the dashboard keeps
/// the nested `rover` / `camera` objects it expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: i64,
    pub img_src: String,
    pub earth_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sol: Option<i32>,
    pub rover: RoverRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<CameraRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoverRef {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraRef {
    pub name: String,
    #[serde(default)]
    pub full_name: String,
}

impl Photo {
    #[must_use]
    pub fn camera_name(&self) -> Option<&str> {
        self.camera.as_ref().map(|c| c.name.as_str())
    }
}

/// Parameters that select one upstream rover photo result set.
///
/// Rover and camera names are normalized to lowercase so that `Curiosity` and
/// `curiosity` share a cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhotoQuery {
    pub rover: String,
    pub sol: i32,
    pub camera: Option<String>,
}

impl PhotoQuery {
    pub fn new(rover: impl AsRef<str>, sol: i32, camera: Option<&str>) -> Self {
        Self {
            rover: rover.as_ref().trim().to_lowercase(),
            sol,
            camera: camera
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_lowercase),
        }
    }

    #[must_use]
    pub fn cache_key(&self) -> CacheKey {
        CacheKey::from(self)
    }
}

/// Composite string key `rover:sol:camera` (`*` for "all cameras").
///
/// The same key is used for the in-memory cache and for the persisted query
/// markers, and it covers every parameter sent upstream.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&PhotoQuery> for CacheKey {
    fn from(query: &PhotoQuery) -> Self {
        Self(format!(
            "{}:{}:{}",
            query.rover,
            query.sol,
            query.camera.as_deref().unwrap_or("*")
        ))
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PhotosEnvelope {
    #[serde(default)]
    pub photos: Vec<Photo>,
}
