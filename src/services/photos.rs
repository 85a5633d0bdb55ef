//! Rover photo lookup: in-memory cache, then durable store, then upstream.
//!
//! Each lookup reports where its photos came from and what happened to
//! persistence, so callers can tell an empty result from an upstream failure
//! and see storage errors that never reach the HTTP response.

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::clients::{NasaClient, NasaError};
use crate::db::PhotoStore;
use crate::models::{Photo, PhotoQuery, RoverManifest};
use crate::services::PhotoCache;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotoSource {
    Cache,
    Store,
    Upstream,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persistence {
    /// Photos did not come from upstream, or no store is configured.
    Skipped,
    Stored { inserted: usize },
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct PhotoSet {
    pub photos: Vec<Photo>,
    pub source: PhotoSource,
    pub persistence: Persistence,
}

#[derive(Debug)]
pub enum PhotoLookup {
    Found(PhotoSet),
    NotFound,
    UpstreamFailed(NasaError),
}

impl PhotoLookup {
    #[must_use]
    pub const fn found(&self) -> Option<&PhotoSet> {
        match self {
            Self::Found(set) => Some(set),
            _ => None,
        }
    }
}

pub struct PhotoService {
    nasa: Arc<NasaClient>,
    cache: Option<PhotoCache>,
    store: Option<Arc<dyn PhotoStore>>,
}

impl PhotoService {
    #[must_use]
    pub fn new(
        nasa: Arc<NasaClient>,
        cache: Option<PhotoCache>,
        store: Option<Arc<dyn PhotoStore>>,
    ) -> Self {
        Self { nasa, cache, store }
    }

    #[must_use]
    pub const fn cache(&self) -> Option<&PhotoCache> {
        self.cache.as_ref()
    }

    pub async fn lookup(&self, query: &PhotoQuery) -> PhotoLookup {
        let key = query.cache_key();

        if let Some(cache) = &self.cache {
            if let Some(photos) = cache.get(&key) {
                metrics::counter!("photo_cache_hits_total").increment(1);
                debug!(query = %key, count = photos.len(), "Photo cache hit");
                return found(photos, PhotoSource::Cache, Persistence::Skipped);
            }
            metrics::counter!("photo_cache_misses_total").increment(1);
        }

        if let Some(store) = &self.store {
            match store.find_photos(query).await {
                Ok(Some(photos)) => {
                    metrics::counter!("photo_store_hits_total").increment(1);
                    debug!(query = %key, count = photos.len(), "Photo store hit");
                    if let Some(cache) = &self.cache {
                        cache.set(key, photos.clone());
                    }
                    return found(photos, PhotoSource::Store, Persistence::Skipped);
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(query = %key, error = %e, "Photo store lookup failed, falling back to NASA API");
                }
            }
        }

        let photos = match self.nasa.fetch_rover_photos(query).await {
            Ok(photos) => photos,
            Err(e) => return PhotoLookup::UpstreamFailed(e),
        };

        if photos.is_empty() {
            info!(query = %key, "NASA API returned no photos");
            return PhotoLookup::NotFound;
        }

        let persistence = self.persist(query, &photos).await;

        if let Some(cache) = &self.cache {
            cache.set(key, photos.clone());
        }

        found(photos, PhotoSource::Upstream, persistence)
    }

    /// Single-photo variant: the photo at index `page - 1` of the result set.
    pub async fn lookup_one(&self, query: &PhotoQuery, page: u32) -> PhotoLookup {
        match self.lookup(query).await {
            PhotoLookup::Found(set) => {
                let index = page.saturating_sub(1) as usize;
                match set.photos.into_iter().nth(index) {
                    Some(photo) => PhotoLookup::Found(PhotoSet {
                        photos: vec![photo],
                        source: set.source,
                        persistence: set.persistence,
                    }),
                    None => PhotoLookup::NotFound,
                }
            }
            other => other,
        }
    }

    pub async fn manifest(&self, rover: &str) -> Result<RoverManifest, NasaError> {
        self.nasa.fetch_manifest(rover).await
    }

    /// Writes every photo, then the query marker. Failures are logged and
    /// reported, never propagated.
    ///
    /// Every photo is attempted even after a failed insert; the query marker
    /// is only written when all inserts succeeded, so an incomplete set is
    /// never served from the store.
    async fn persist(&self, query: &PhotoQuery, photos: &[Photo]) -> Persistence {
        let Some(store) = &self.store else {
            return Persistence::Skipped;
        };

        let mut inserted = 0;
        let mut first_error = None;
        for photo in photos {
            match store.upsert_ignore(photo).await {
                Ok(true) => inserted += 1,
                Ok(false) => {}
                Err(e) => {
                    warn!(photo_id = photo.id, error = %e, "Failed to store rover photo");
                    first_error.get_or_insert_with(|| e.to_string());
                }
            }
        }

        if let Some(reason) = first_error {
            warn!(query = %query.cache_key(), inserted, "Skipping query marker after failed inserts");
            return Persistence::Failed(reason);
        }

        if let Err(e) = store.record_query(query, photos).await {
            warn!(query = %query.cache_key(), error = %e, "Failed to record stored photo query");
            return Persistence::Failed(e.to_string());
        }

        debug!(query = %query.cache_key(), inserted, "Stored rover photos");
        Persistence::Stored { inserted }
    }
}

fn found(photos: Vec<Photo>, source: PhotoSource, persistence: Persistence) -> PhotoLookup {
    PhotoLookup::Found(PhotoSet {
        photos,
        source,
        persistence,
    })
}
