use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use crate::models::{CacheKey, Photo};

struct CacheEntry {
    photos: Vec<Photo>,
    stored_at: Instant,
}

/// In-memory TTL cache of rover photo result sets.
///
/// Created once at startup and handed to the services that need it. Expired
/// entries are treated as absent and overwritten by the next `set`; nothing is
/// ever evicted, so the map grows with the number of distinct queries.
#[derive(Clone)]
pub struct PhotoCache {
    entries: Arc<RwLock<HashMap<CacheKey, CacheEntry>>>,
    ttl: Duration,
}

impl PhotoCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<Vec<Photo>> {
        let guard = self.entries.read().ok()?;
        let entry = guard.get(key)?;

        if entry.stored_at.elapsed() < self.ttl {
            Some(entry.photos.clone())
        } else {
            None
        }
    }

    /// Stores `photos` under `key`, replacing any previous entry.
    pub fn set(&self, key: CacheKey, photos: Vec<Photo>) {
        if let Ok(mut guard) = self.entries.write() {
            guard.insert(
                key,
                CacheEntry {
                    photos,
                    stored_at: Instant::now(),
                },
            );
        }
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.read().map(|g| g.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
