pub mod prelude;

pub mod photo_queries;
pub mod rover_photos;
