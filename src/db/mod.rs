use crate::models::{Photo, PhotoQuery};
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

pub mod migrator;
pub mod repositories;

/// Durable photo storage as seen by the photo pipeline.
#[async_trait::async_trait]
pub trait PhotoStore: Send + Sync {
    /// Photos previously persisted for `query`, or `None` if the query was
    /// never fully stored.
    async fn find_photos(&self, query: &PhotoQuery) -> Result<Option<Vec<Photo>>>;

    /// Insert-or-ignore keyed by photo id. Returns `true` if a row was written.
    async fn upsert_ignore(&self, photo: &Photo) -> Result<bool>;

    /// Marks `query` as fully persisted with the given photos.
    async fn record_query(&self, query: &PhotoQuery, photos: &[Photo]) -> Result<()>;

    async fn ping(&self) -> Result<()>;
}

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite://").trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent()
                && !parent.as_os_str().is_empty()
            {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    fn photo_repo(&self) -> repositories::photos::PhotoRepository {
        repositories::photos::PhotoRepository::new(self.conn.clone())
    }

    fn query_repo(&self) -> repositories::queries::QueryRepository {
        repositories::queries::QueryRepository::new(self.conn.clone())
    }

    pub async fn count_photos(&self) -> Result<u64> {
        self.photo_repo().count().await
    }

    pub async fn count_queries(&self) -> Result<u64> {
        self.query_repo().count().await
    }
}

#[async_trait::async_trait]
impl PhotoStore for Store {
    async fn find_photos(&self, query: &PhotoQuery) -> Result<Option<Vec<Photo>>> {
        let key = query.cache_key();
        let Some(marker) = self.query_repo().get(&key).await? else {
            return Ok(None);
        };

        let ids: Vec<i64> = serde_json::from_str(&marker.photo_ids)?;
        if ids.is_empty() {
            return Ok(None);
        }

        let photos = self.photo_repo().get_by_ids(&ids).await?;
        if photos.len() != ids.len() {
            warn!(
                query = %key,
                expected = ids.len(),
                found = photos.len(),
                "Stored photo set is incomplete, ignoring it"
            );
            return Ok(None);
        }

        Ok(Some(photos))
    }

    async fn upsert_ignore(&self, photo: &Photo) -> Result<bool> {
        self.photo_repo().insert_ignore(photo).await
    }

    async fn record_query(&self, query: &PhotoQuery, photos: &[Photo]) -> Result<()> {
        let ids: Vec<i64> = photos.iter().map(|p| p.id).collect();
        self.query_repo().record(query, &ids).await
    }

    async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }
}
