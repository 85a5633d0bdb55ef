use sea_orm::entity::prelude::*;

/// Marks an upstream query whose full result set has been persisted.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "photo_queries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub query_key: String,
    pub rover: String,
    pub sol: i32,
    pub camera: Option<String>,
    /// JSON array of `rover_photos.id`, in upstream order
    #[sea_orm(column_type = "Text")]
    pub photo_ids: String,
    pub photo_count: i32,
    pub fetched_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
