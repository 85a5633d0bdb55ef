pub mod apod;
pub mod photo;

pub use apod::{ApodRecord, RoverManifest};
pub use photo::{CacheKey, CameraRef, Photo, PhotoQuery, RoverRef};
