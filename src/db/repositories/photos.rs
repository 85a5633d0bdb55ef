use crate::entities::{prelude::*, rover_photos};
use crate::models::{CameraRef, Photo, RoverRef};
use anyhow::Result;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set};
use std::collections::HashMap;

pub struct PhotoRepository {
    conn: DatabaseConnection,
}

impl PhotoRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Inserts `photo` unless a row with the same id exists.
    /// Returns `true` when a row was written.
    pub async fn insert_ignore(&self, photo: &Photo) -> Result<bool> {
        let active_model = rover_photos::ActiveModel {
            id: Set(photo.id),
            img_src: Set(photo.img_src.clone()),
            earth_date: Set(photo.earth_date.clone()),
            rover_name: Set(photo.rover.name.clone()),
            sol: Set(photo.sol),
            camera_name: Set(photo.camera.as_ref().map(|c| c.name.clone())),
            camera_full_name: Set(photo.camera.as_ref().map(|c| c.full_name.clone())),
            fetched_at: Set(chrono::Utc::now().to_rfc3339()),
        };

        let rows = RoverPhotos::insert(active_model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(rover_photos::Column::Id)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        Ok(rows > 0)
    }

    /// Loads photos by id, in the order of `ids`. Unknown ids are skipped.
    pub async fn get_by_ids(&self, ids: &[i64]) -> Result<Vec<Photo>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = RoverPhotos::find()
            .filter(rover_photos::Column::Id.is_in(ids.iter().copied()))
            .all(&self.conn)
            .await?;

        let mut by_id: HashMap<i64, rover_photos::Model> =
            rows.into_iter().map(|m| (m.id, m)).collect();

        Ok(ids
            .iter()
            .filter_map(|id| by_id.remove(id))
            .map(Photo::from)
            .collect())
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(RoverPhotos::find().count(&self.conn).await?)
    }
}

impl From<rover_photos::Model> for Photo {
    fn from(m: rover_photos::Model) -> Self {
        Self {
            id: m.id,
            img_src: m.img_src,
            earth_date: m.earth_date,
            sol: m.sol,
            rover: RoverRef { name: m.rover_name },
            camera: m.camera_name.map(|name| CameraRef {
                name,
                full_name: m.camera_full_name.unwrap_or_default(),
            }),
        }
    }
}
