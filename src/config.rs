use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub nasa: NasaConfig,

    pub cache: CacheConfig,

    pub store: StoreConfig,

    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    pub log_format: LogFormat,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/space-explorer.db".to_string(),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,

    pub port: u16,

    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 5000,
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

/// Upstream NASA API settings.
///
/// Everything that identifies the upstream is optional: a missing value is
/// reported per request as a configuration error instead of aborting startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NasaConfig {
    pub base_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    pub apod_endpoint: Option<String>,

    /// Path template, `{rover}` is replaced by the rover name.
    pub mars_rover_endpoint: Option<String>,

    /// Path template, `{rover}` is replaced by the rover name.
    pub manifest_endpoint: Option<String>,

    /// Request timeout in seconds, clamped to 10..=60 (default: 30)
    pub request_timeout_seconds: u64,

    pub default_rover: String,

    pub default_sol: i32,

    pub default_limit: u32,
}

impl Default for NasaConfig {
    fn default() -> Self {
        Self {
            base_url: Some("https://api.nasa.gov".to_string()),
            api_key: None,
            apod_endpoint: Some("/planetary/apod".to_string()),
            mars_rover_endpoint: Some("/mars-photos/api/v1/rovers/{rover}/photos".to_string()),
            manifest_endpoint: Some("/mars-photos/api/v1/manifests/{rover}".to_string()),
            request_timeout_seconds: 30,
            default_rover: "curiosity".to_string(),
            default_sol: 1000,
            default_limit: 25,
        }
    }
}

impl NasaConfig {
    pub const MIN_TIMEOUT_SECONDS: u64 = 10;
    pub const MAX_TIMEOUT_SECONDS: u64 = 60;

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_seconds
                .clamp(Self::MIN_TIMEOUT_SECONDS, Self::MAX_TIMEOUT_SECONDS),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,

    /// Time-to-live of a cached photo result set (default: 1 hour)
    pub ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_seconds: 60 * 60,
        }
    }
}

impl CacheConfig {
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub enabled: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: true,
        }
    }
}

impl Config {
    /// Loads the first config file found, then applies `.env` and process
    /// environment overrides.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::load_file()?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        for path in &Self::config_paths() {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    /// Overrides file values with the variables the dashboard deployment
    /// has always used (`NASA_API_KEY`, `MARS_ROVER_ENDPOINT`, ...).
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = non_empty("NASA_API_BASE_URL") {
            self.nasa.base_url = Some(v);
        }
        if let Some(v) = non_empty("NASA_API_KEY") {
            self.nasa.api_key = Some(v);
        }
        if let Some(v) = non_empty("APOD_ENDPOINT") {
            self.nasa.apod_endpoint = Some(v);
        }
        if let Some(v) = non_empty("MARS_ROVER_ENDPOINT") {
            self.nasa.mars_rover_endpoint = Some(v);
        }
        if let Some(v) = non_empty("ROVER_MANIFEST_ENDPOINT") {
            self.nasa.manifest_endpoint = Some(v);
        }
        if let Some(v) = non_empty("DATABASE_URL") {
            self.general.database_path = v;
        }
        if let Some(port) = non_empty("PORT").and_then(|v| v.parse().ok()) {
            self.server.port = port;
        }
        if let Some(ttl) = non_empty("PHOTO_CACHE_TTL_SECONDS").and_then(|v| v.parse().ok()) {
            self.cache.ttl_seconds = ttl;
        }
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("space-explorer").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".space-explorer").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    /// Rejects structurally invalid settings. Missing NASA settings are not
    /// an error here.
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be > 0");
        }

        if self.cache.enabled && self.cache.ttl_seconds == 0 {
            anyhow::bail!("Cache TTL must be > 0 when the cache is enabled");
        }

        if self.general.min_db_connections > self.general.max_db_connections {
            anyhow::bail!("min_db_connections cannot exceed max_db_connections");
        }

        if self.nasa.default_limit == 0 {
            anyhow::bail!("Default page limit must be > 0");
        }

        Ok(())
    }
}
