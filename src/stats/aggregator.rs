//! Aggregator Module
//! Per-state occurrence counting and magnitude filtering.

use crate::data::{QuakeRecord, UNKNOWN_STATE};
use std::collections::HashMap;

/// State -> occurrence count mapping.
///
/// Derived, never mutated in place; recomputed fully on each request. The
/// iteration order carries no meaning, display layers sort as needed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn get(&self, state: &str) -> usize {
        self.counts.get(state).copied().unwrap_or(0)
    }

    /// Number of distinct states.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Sum of all counts; always equals the number of aggregated records.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Entries ordered by descending count, ties broken by state name.
    pub fn sorted_by_count(&self) -> Vec<(String, usize)> {
        let mut entries: Vec<(String, usize)> = self
            .counts
            .iter()
            .map(|(state, count)| (state.clone(), *count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries
    }
}

/// Counts records per state and filters by magnitude.
pub struct Aggregator;

impl Aggregator {
    /// Count occurrences of each distinct state value.
    ///
    /// Records still lacking a state are counted under "Unknown" so the
    /// table total always matches the input length.
    pub fn count_by_state<'a, I>(records: I) -> FrequencyTable
    where
        I: IntoIterator<Item = &'a QuakeRecord>,
    {
        let mut counts: HashMap<String, usize> = HashMap::new();

        for record in records {
            let state = record.state.as_deref().unwrap_or(UNKNOWN_STATE);
            *counts.entry(state.to_string()).or_insert(0) += 1;
        }

        FrequencyTable { counts }
    }

    /// Records whose magnitude is at least `threshold`. Pure; an empty
    /// result is valid and aggregates to an empty table.
    pub fn filter_by_magnitude(records: &[QuakeRecord], threshold: f64) -> Vec<&QuakeRecord> {
        records
            .iter()
            .filter(|r| r.magnitude >= threshold)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(state: &str, magnitude: f64) -> QuakeRecord {
        QuakeRecord::with_state(34.05, -118.24, magnitude, state)
    }

    #[test]
    fn counts_occurrences_per_state() {
        let records = vec![record("CA", 4.2), record("CA", 5.1), record("TX", 3.3)];
        let table = Aggregator::count_by_state(&records);

        assert_eq!(table.get("CA"), 2);
        assert_eq!(table.get("TX"), 1);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn table_total_equals_record_count() {
        let records = vec![
            record("CA", 4.2),
            record("CA", 5.1),
            record("TX", 3.3),
            record("AK", 6.0),
        ];
        let table = Aggregator::count_by_state(&records);
        assert_eq!(table.total(), records.len());
    }

    #[test]
    fn unresolved_records_count_as_unknown() {
        let records = vec![record("CA", 4.2), QuakeRecord::new(61.21, -149.90, 5.1)];
        let table = Aggregator::count_by_state(&records);

        assert_eq!(table.get(UNKNOWN_STATE), 1);
        assert_eq!(table.total(), records.len());
    }

    #[test]
    fn filter_keeps_records_at_or_above_threshold() {
        let records = vec![record("CA", 3.0), record("TX", 5.0), record("AK", 6.2)];
        let passed = Aggregator::filter_by_magnitude(&records, 5.0);

        assert_eq!(passed.len(), 2);
        assert!(passed.iter().all(|r| r.magnitude >= 5.0));
    }

    #[test]
    fn filtered_aggregation_total_matches_filtered_length() {
        let records = vec![record("CA", 3.0), record("TX", 5.0), record("AK", 6.2)];
        let passed = Aggregator::filter_by_magnitude(&records, 5.0);
        let table = Aggregator::count_by_state(passed.iter().copied());

        assert_eq!(table.total(), passed.len());
        assert_eq!(table.get("TX"), 1);
        assert_eq!(table.get("AK"), 1);
        assert_eq!(table.get("CA"), 0);
    }

    #[test]
    fn filter_is_monotonic_in_threshold() {
        let records = vec![
            record("CA", 3.0),
            record("TX", 5.0),
            record("AK", 6.2),
            record("NV", 4.4),
        ];

        let loose = Aggregator::filter_by_magnitude(&records, 3.5);
        let tight = Aggregator::filter_by_magnitude(&records, 5.5);

        assert!(tight.len() <= loose.len());
        for r in &tight {
            assert!(loose.iter().any(|l| l == r));
        }
    }

    #[test]
    fn threshold_above_all_magnitudes_yields_empty_table() {
        let records = vec![record("CA", 3.0), record("TX", 5.0)];
        let passed = Aggregator::filter_by_magnitude(&records, 9.9);
        let table = Aggregator::count_by_state(passed.iter().copied());

        assert!(passed.is_empty());
        assert_eq!(table.len(), 0);
        assert_eq!(table.total(), 0);
    }

    #[test]
    fn sorted_entries_are_deterministic() {
        let records = vec![
            record("TX", 4.0),
            record("CA", 4.0),
            record("CA", 4.0),
            record("AK", 4.0),
        ];
        let table = Aggregator::count_by_state(&records);

        assert_eq!(
            table.sorted_by_count(),
            vec![
                ("CA".to_string(), 2),
                ("AK".to_string(), 1),
                ("TX".to_string(), 1),
            ]
        );
    }
}
