mod apod;
mod photo;
mod photos;

pub use apod::cmd_apod;
pub use photo::cmd_photo;
pub use photos::cmd_photos;
