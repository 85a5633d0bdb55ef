use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use crate::clients::NasaClient;
use crate::config::Config;
use crate::db::{PhotoStore, Store};
use crate::services::{PhotoCache, PhotoService};

/// Build a shared HTTP client with reasonable defaults for API calls.
fn build_shared_http_client(timeout: Duration) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("space-explorer/", env!("CARGO_PKG_VERSION")))
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Option<Arc<dyn PhotoStore>>,

    pub nasa: Arc<NasaClient>,

    pub photo_service: Arc<PhotoService>,
}

impl SharedState {
    /// Opens the store (when enabled) and wires the photo pipeline.
    ///
    /// A store that cannot be opened is logged and left out; the service
    /// then runs cache + upstream only.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store: Option<Arc<dyn PhotoStore>> = if config.store.enabled {
            match Store::with_pool_options(
                &config.general.database_path,
                config.general.max_db_connections,
                config.general.min_db_connections,
            )
            .await
            {
                Ok(store) => Some(Arc::new(store)),
                Err(e) => {
                    error!(
                        error = %e,
                        database = %config.general.database_path,
                        "Failed to open photo store, continuing without persistence"
                    );
                    None
                }
            }
        } else {
            info!("Photo store disabled");
            None
        };

        Self::from_parts(config, store)
    }

    /// Wires the pipeline around an already constructed store.
    pub fn from_parts(config: Config, store: Option<Arc<dyn PhotoStore>>) -> anyhow::Result<Self> {
        let http_client = build_shared_http_client(config.nasa.request_timeout())?;
        let nasa = Arc::new(NasaClient::with_shared_client(
            http_client,
            config.nasa.clone(),
        ));

        let cache = if config.cache.enabled {
            Some(PhotoCache::new(config.cache.ttl()))
        } else {
            info!("Photo cache disabled");
            None
        };

        let photo_service = Arc::new(PhotoService::new(nasa.clone(), cache, store.clone()));

        Ok(Self {
            config: Arc::new(config),
            store,
            nasa,
            photo_service,
        })
    }
}
