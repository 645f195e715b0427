//! CSV Data Loader Module
//! Handles CSV file loading and record extraction using Polars.

use crate::data::{Dataset, QuakeRecord};
use log::warn;
use polars::prelude::*;
use thiserror::Error;

/// Required columns.
pub const COL_LATITUDE: &str = "Latitude";
pub const COL_LONGITUDE: &str = "Longitude";
pub const COL_MAGNITUDE: &str = "Magnitude";
/// Optional pre-resolved state column.
pub const COL_STATE: &str = "State";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Dataset is missing required column '{0}'")]
    MissingColumn(String),
    #[error("No usable records in dataset")]
    NoData,
}

/// Handles CSV file loading with Polars for high performance.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file and extract typed earthquake records.
    ///
    /// Requires `Latitude`, `Longitude` and `Magnitude` columns; a `State`
    /// column is picked up when present. Rows with missing coordinates or
    /// magnitude are skipped and counted on the returned dataset.
    pub fn load_csv(file_path: &str) -> Result<Dataset, LoaderError> {
        // Use lazy evaluation for memory efficiency, then collect
        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        if df.height() == 0 {
            return Err(LoaderError::NoData);
        }

        Self::extract_records(&df, file_path)
    }

    fn extract_records(df: &DataFrame, source: &str) -> Result<Dataset, LoaderError> {
        let latitudes = Self::numeric_column(df, COL_LATITUDE)?;
        let longitudes = Self::numeric_column(df, COL_LONGITUDE)?;
        let magnitudes = Self::numeric_column(df, COL_MAGNITUDE)?;
        let states = Self::text_column(df, COL_STATE);

        let mut records = Vec::with_capacity(df.height());
        let mut skipped = 0usize;

        for i in 0..df.height() {
            match (latitudes[i], longitudes[i], magnitudes[i]) {
                (Some(latitude), Some(longitude), Some(magnitude)) => {
                    let record = match states.as_ref().and_then(|col| col[i].clone()) {
                        Some(state) => QuakeRecord::with_state(latitude, longitude, magnitude, state),
                        None => QuakeRecord::new(latitude, longitude, magnitude),
                    };
                    records.push(record);
                }
                _ => skipped += 1,
            }
        }

        if skipped > 0 {
            warn!("{source}: skipped {skipped} rows with missing coordinates or magnitude");
        }

        if records.is_empty() {
            return Err(LoaderError::NoData);
        }

        Ok(Dataset::new(source, records, skipped))
    }

    /// Extract a required column as f64 values.
    fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, LoaderError> {
        let column = df
            .column(name)
            .map_err(|_| LoaderError::MissingColumn(name.to_string()))?;
        let values_f64 = column.cast(&DataType::Float64)?;
        let values_ca = values_f64.f64()?;

        Ok(values_ca.into_iter().collect())
    }

    /// Extract an optional column as trimmed strings; None if absent.
    fn text_column(df: &DataFrame, name: &str) -> Option<Vec<Option<String>>> {
        let column = df.column(name).ok()?;
        let series = column.as_materialized_series();

        Some(
            (0..series.len())
                .map(|i| {
                    let val = series.get(i).ok()?;
                    if val.is_null() {
                        return None;
                    }
                    let text = val.to_string().trim_matches('"').trim().to_string();
                    if text.is_empty() {
                        None
                    } else {
                        Some(text)
                    }
                })
                .collect(),
        )
    }
}
