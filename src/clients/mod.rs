pub mod nasa;

pub use nasa::{NasaClient, NasaError};
