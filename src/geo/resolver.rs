//! State Resolver Module
//! Ensures every record in a dataset carries a state value, either by
//! trusting the pre-existing State column or by reverse-geocoding each
//! record's coordinates.

use crate::data::{Dataset, UNKNOWN_STATE};
use log::{debug, warn};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolverError {
    #[error("Dataset has no usable 'State' column: {missing} of {total} records lack a state")]
    MissingColumn { missing: usize, total: usize },
}

/// Errors from a single reverse-geocoding lookup.
///
/// These never abort the run; the resolver masks them as "Unknown" but
/// counts and logs every one.
#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("Reverse geocoding request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Reverse geocoding service returned HTTP {0}")]
    Status(u16),
}

/// Reverse-geocoding lookup seam.
///
/// `Ok(Some(state))` on success, `Ok(None)` when the address carries no
/// state field. The caller decides what a failure defaults to.
pub trait ReverseGeocoder {
    fn reverse(&self, latitude: f64, longitude: f64) -> Result<Option<String>, GeocodeError>;
}

/// How the resolver obtains state values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveMode {
    /// Require a complete State column; fail the run otherwise.
    RequireColumn,
    /// Reverse-geocode records whose state is missing.
    Geocode,
}

impl Default for ResolveMode {
    fn default() -> Self {
        ResolveMode::RequireColumn
    }
}

/// Outcome of a resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveReport {
    /// Records whose state came from the input column.
    pub from_column: usize,
    /// Records resolved by a successful lookup.
    pub geocoded: usize,
    /// Records assigned the "Unknown" sentinel.
    pub defaulted_unknown: usize,
    /// Lookups that failed outright (subset of `defaulted_unknown`).
    pub lookup_failures: usize,
}

impl ResolveReport {
    pub fn total(&self) -> usize {
        self.from_column + self.geocoded + self.defaulted_unknown
    }
}

/// Fills in missing state values, one record at a time.
pub struct StateResolver;

impl StateResolver {
    /// Strict variant: the dataset must already carry a state for every
    /// record. No lookups are performed.
    pub fn require_column(dataset: &Dataset) -> Result<ResolveReport, ResolverError> {
        let total = dataset.len();
        let missing = dataset
            .records()
            .iter()
            .filter(|r| r.state.is_none())
            .count();

        if missing > 0 {
            return Err(ResolverError::MissingColumn { missing, total });
        }

        Ok(ResolveReport {
            from_column: total,
            ..ResolveReport::default()
        })
    }

    /// Derive variant: look up each record with no state, sequentially in
    /// dataset order. Records that already carry a state are left untouched,
    /// so re-running on a resolved dataset performs no lookups.
    ///
    /// A failed or stateless lookup assigns "Unknown"; failures are counted
    /// in the report instead of aborting the run. `on_progress` is called
    /// after each lookup with (done, pending).
    pub fn geocode_missing<G: ReverseGeocoder>(
        dataset: &mut Dataset,
        geocoder: &G,
        mut on_progress: impl FnMut(usize, usize),
    ) -> ResolveReport {
        let mut report = ResolveReport::default();
        let pending = dataset
            .records()
            .iter()
            .filter(|r| r.state.is_none())
            .count();
        let mut done = 0usize;

        for record in dataset.records_mut() {
            if record.state.is_some() {
                report.from_column += 1;
                continue;
            }

            match geocoder.reverse(record.latitude, record.longitude) {
                Ok(Some(state)) => {
                    debug!(
                        "resolved ({:.4}, {:.4}) -> {state}",
                        record.latitude, record.longitude
                    );
                    record.state = Some(state);
                    report.geocoded += 1;
                }
                Ok(None) => {
                    debug!(
                        "no state in address for ({:.4}, {:.4})",
                        record.latitude, record.longitude
                    );
                    record.state = Some(UNKNOWN_STATE.to_string());
                    report.defaulted_unknown += 1;
                }
                Err(err) => {
                    warn!(
                        "lookup failed for ({:.4}, {:.4}): {err}",
                        record.latitude, record.longitude
                    );
                    record.state = Some(UNKNOWN_STATE.to_string());
                    report.defaulted_unknown += 1;
                    report.lookup_failures += 1;
                }
            }

            done += 1;
            on_progress(done, pending);
        }

        if report.lookup_failures > 0 {
            warn!(
                "{} of {} lookups failed; affected records set to '{UNKNOWN_STATE}'",
                report.lookup_failures, pending
            );
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::QuakeRecord;

    struct StaticGeocoder(Option<&'static str>);

    impl ReverseGeocoder for StaticGeocoder {
        fn reverse(&self, _latitude: f64, _longitude: f64) -> Result<Option<String>, GeocodeError> {
            Ok(self.0.map(str::to_string))
        }
    }

    struct FailingGeocoder;

    impl ReverseGeocoder for FailingGeocoder {
        fn reverse(&self, _latitude: f64, _longitude: f64) -> Result<Option<String>, GeocodeError> {
            Err(GeocodeError::Status(503))
        }
    }

    /// Trips the test if any lookup happens at all.
    struct PanickingGeocoder;

    impl ReverseGeocoder for PanickingGeocoder {
        fn reverse(&self, _latitude: f64, _longitude: f64) -> Result<Option<String>, GeocodeError> {
            panic!("unexpected reverse-geocoding lookup");
        }
    }

    fn unresolved_dataset() -> Dataset {
        Dataset::new(
            "quakes.csv",
            vec![
                QuakeRecord::new(34.05, -118.24, 4.2),
                QuakeRecord::new(61.21, -149.90, 5.1),
            ],
            0,
        )
    }

    fn resolved_dataset() -> Dataset {
        Dataset::new(
            "quakes.csv",
            vec![
                QuakeRecord::with_state(34.05, -118.24, 4.2, "California"),
                QuakeRecord::with_state(61.21, -149.90, 5.1, "Alaska"),
            ],
            0,
        )
    }

    #[test]
    fn geocode_fills_missing_states() {
        let mut dataset = unresolved_dataset();
        let report =
            StateResolver::geocode_missing(&mut dataset, &StaticGeocoder(Some("Nevada")), |_, _| {});

        assert!(dataset.is_resolved());
        assert_eq!(report.geocoded, 2);
        assert_eq!(report.lookup_failures, 0);
        assert_eq!(report.total(), dataset.len());
        assert_eq!(dataset.records()[0].state.as_deref(), Some("Nevada"));
    }

    #[test]
    fn lookup_failure_defaults_to_unknown_and_is_counted() {
        let mut dataset = unresolved_dataset();
        let report = StateResolver::geocode_missing(&mut dataset, &FailingGeocoder, |_, _| {});

        assert!(dataset.is_resolved());
        assert_eq!(report.geocoded, 0);
        assert_eq!(report.defaulted_unknown, 2);
        assert_eq!(report.lookup_failures, 2);
        assert!(dataset
            .records()
            .iter()
            .all(|r| r.state.as_deref() == Some(UNKNOWN_STATE)));
    }

    #[test]
    fn stateless_address_defaults_to_unknown_without_failure() {
        let mut dataset = unresolved_dataset();
        let report = StateResolver::geocode_missing(&mut dataset, &StaticGeocoder(None), |_, _| {});

        assert_eq!(report.defaulted_unknown, 2);
        assert_eq!(report.lookup_failures, 0);
        assert_eq!(dataset.records()[0].state.as_deref(), Some(UNKNOWN_STATE));
    }

    #[test]
    fn existing_states_are_never_looked_up_again() {
        let mut dataset = resolved_dataset();
        let before = dataset.clone();
        let report = StateResolver::geocode_missing(&mut dataset, &PanickingGeocoder, |_, _| {});

        assert_eq!(report.from_column, 2);
        assert_eq!(report.geocoded, 0);
        assert_eq!(dataset.records(), before.records());
    }

    #[test]
    fn geocode_is_idempotent() {
        let mut dataset = unresolved_dataset();
        StateResolver::geocode_missing(&mut dataset, &StaticGeocoder(Some("Nevada")), |_, _| {});
        let first_pass = dataset.clone();

        // Second pass must not re-query or mutate anything.
        StateResolver::geocode_missing(&mut dataset, &PanickingGeocoder, |_, _| {});
        assert_eq!(dataset.records(), first_pass.records());
    }

    #[test]
    fn strict_mode_rejects_incomplete_column() {
        let dataset = unresolved_dataset();
        let err = StateResolver::require_column(&dataset).unwrap_err();
        assert!(matches!(
            err,
            ResolverError::MissingColumn { missing: 2, total: 2 }
        ));
    }

    #[test]
    fn strict_mode_accepts_complete_column() {
        let dataset = resolved_dataset();
        let report = StateResolver::require_column(&dataset).unwrap();
        assert_eq!(report.from_column, 2);
        assert_eq!(report.total(), dataset.len());
    }

    #[test]
    fn progress_is_reported_per_lookup() {
        let mut dataset = unresolved_dataset();
        let mut calls = Vec::new();
        StateResolver::geocode_missing(&mut dataset, &StaticGeocoder(Some("Nevada")), |d, p| {
            calls.push((d, p))
        });
        assert_eq!(calls, vec![(1, 2), (2, 2)]);
    }
}
