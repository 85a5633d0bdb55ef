pub mod pagination;
pub use pagination::Pagination;

pub mod photo_cache;
pub use photo_cache::PhotoCache;

pub mod photos;
pub use photos::{Persistence, PhotoLookup, PhotoService, PhotoSet, PhotoSource};
