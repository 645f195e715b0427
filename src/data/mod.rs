//! Data module - CSV loading and the typed dataset

mod dataset;
mod loader;

pub use dataset::{Dataset, QuakeRecord, UNKNOWN_STATE};
pub use loader::{DataLoader, LoaderError};
