use crate::entities::{photo_queries, prelude::*};
use crate::models::{CacheKey, PhotoQuery};
use anyhow::Result;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, Set};

pub struct QueryRepository {
    conn: DatabaseConnection,
}

impl QueryRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, key: &CacheKey) -> Result<Option<photo_queries::Model>> {
        Ok(PhotoQueries::find_by_id(key.as_str().to_string())
            .one(&self.conn)
            .await?)
    }

    /// Records that every photo of `query` is stored, replacing an older
    /// marker for the same key.
    pub async fn record(&self, query: &PhotoQuery, photo_ids: &[i64]) -> Result<()> {
        let active_model = photo_queries::ActiveModel {
            query_key: Set(query.cache_key().as_str().to_string()),
            rover: Set(query.rover.clone()),
            sol: Set(query.sol),
            camera: Set(query.camera.clone()),
            photo_ids: Set(serde_json::to_string(photo_ids)?),
            photo_count: Set(i32::try_from(photo_ids.len()).unwrap_or(i32::MAX)),
            fetched_at: Set(chrono::Utc::now().to_rfc3339()),
        };

        PhotoQueries::insert(active_model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(photo_queries::Column::QueryKey)
                    .update_columns([
                        photo_queries::Column::PhotoIds,
                        photo_queries::Column::PhotoCount,
                        photo_queries::Column::FetchedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        Ok(())
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(PhotoQueries::find().count(&self.conn).await?)
    }
}
