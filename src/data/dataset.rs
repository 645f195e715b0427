//! Core Dataset Types
//! Typed earthquake records and the in-memory dataset handle.

use std::path::{Path, PathBuf};

/// Sentinel state assigned when a lookup fails or returns no state.
pub const UNKNOWN_STATE: &str = "Unknown";

/// One earthquake observation.
///
/// Immutable after load except `state`, which the resolver fills exactly
/// once when absent.
#[derive(Debug, Clone, PartialEq)]
pub struct QuakeRecord {
    pub latitude: f64,
    pub longitude: f64,
    pub magnitude: f64,
    pub state: Option<String>,
}

impl QuakeRecord {
    pub fn new(latitude: f64, longitude: f64, magnitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            magnitude,
            state: None,
        }
    }

    pub fn with_state(
        latitude: f64,
        longitude: f64,
        magnitude: f64,
        state: impl Into<String>,
    ) -> Self {
        Self {
            latitude,
            longitude,
            magnitude,
            state: Some(state.into()),
        }
    }
}

/// The loaded dataset, keyed by the file it came from.
///
/// Loaded once per run and passed explicitly into filter/aggregation calls;
/// never invalidated within a run.
#[derive(Debug, Clone)]
pub struct Dataset {
    source: PathBuf,
    records: Vec<QuakeRecord>,
    skipped_rows: usize,
}

impl Dataset {
    pub fn new(source: impl Into<PathBuf>, records: Vec<QuakeRecord>, skipped_rows: usize) -> Self {
        Self {
            source: source.into(),
            records,
            skipped_rows,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn records(&self) -> &[QuakeRecord] {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut [QuakeRecord] {
        &mut self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows dropped at load time for missing coordinates or magnitude.
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    /// True once every record carries a state value.
    pub fn is_resolved(&self) -> bool {
        self.records.iter().all(|r| r.state.is_some())
    }

    /// Largest magnitude in the dataset, used to bound the filter slider.
    pub fn max_magnitude(&self) -> f64 {
        self.records
            .iter()
            .map(|r| r.magnitude)
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolved_only_when_every_record_has_state() {
        let mut dataset = Dataset::new(
            "quakes.csv",
            vec![
                QuakeRecord::with_state(34.05, -118.24, 4.2, "California"),
                QuakeRecord::new(61.21, -149.90, 5.1),
            ],
            0,
        );
        assert!(!dataset.is_resolved());

        dataset.records_mut()[1].state = Some("Alaska".to_string());
        assert!(dataset.is_resolved());
    }

    #[test]
    fn max_magnitude_spans_all_records() {
        let dataset = Dataset::new(
            "quakes.csv",
            vec![
                QuakeRecord::new(34.05, -118.24, 4.2),
                QuakeRecord::new(61.21, -149.90, 6.7),
                QuakeRecord::new(36.17, -115.14, 3.0),
            ],
            0,
        );
        assert_eq!(dataset.max_magnitude(), 6.7);
    }
}
