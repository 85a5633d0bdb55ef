pub use super::photo_queries::Entity as PhotoQueries;
pub use super::rover_photos::Entity as RoverPhotos;
