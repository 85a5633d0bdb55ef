pub mod photos;
pub mod queries;
