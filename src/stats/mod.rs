//! Stats module - aggregation and filtering

mod aggregator;

pub use aggregator::{Aggregator, FrequencyTable};
