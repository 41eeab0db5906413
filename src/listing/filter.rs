//! Range selection over extracted records.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::LinkRecord;
use crate::sequence::SequenceInference;

/// Inclusive window of sequence numbers to select.
///
/// `start <= end` is assumed; an inverted range selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceRange {
    /// First accepted sequence number.
    pub start: u64,
    /// Last accepted sequence number.
    pub end: u64,
}

impl SequenceRange {
    /// Creates an inclusive range.
    #[must_use]
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    /// Returns whether `value` lies within the range.
    #[must_use]
    pub fn contains(&self, value: u64) -> bool {
        self.start <= value && value <= self.end
    }
}

impl std::fmt::Display for SequenceRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Keeps records whose inferred number lies in `range`, sorted ascending.
///
/// The number is recomputed from the filename and overwrites any value
/// already attached, so running this on its own output is a no-op. Ties keep
/// extraction order.
#[instrument(level = "debug", skip_all, fields(records = records.len(), range = %range))]
#[must_use]
pub fn filter_and_sort(
    records: Vec<LinkRecord>,
    range: SequenceRange,
    inference: &SequenceInference,
) -> Vec<LinkRecord> {
    let mut selected: Vec<LinkRecord> = records
        .into_iter()
        .filter_map(|mut record| {
            let number = inference.infer(&record.filename)?;
            if !range.contains(number) {
                return None;
            }
            record.sequence_number = Some(number);
            Some(record)
        })
        .collect();

    // Vec::sort_by_key is stable
    selected.sort_by_key(|record| record.sequence_number);

    debug!(selected = selected.len(), "filtered records by range");
    selected
}

/// Attaches the inferred number (or `None`) to every record without filtering.
#[must_use]
pub fn annotate(records: Vec<LinkRecord>, inference: &SequenceInference) -> Vec<LinkRecord> {
    records
        .into_iter()
        .map(|mut record| {
            record.sequence_number = inference.infer(&record.filename);
            record
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> LinkRecord {
        LinkRecord::new(name, format!("https://example.com/{name}"), name)
    }

    fn names(records: &[LinkRecord]) -> Vec<&str> {
        records.iter().map(|r| r.filename.as_str()).collect()
    }

    #[test]
    fn test_filter_single_survivor_in_range() {
        let records = vec![
            record("01a-jan.csv"),
            record("15b-feb.csv"),
            record("246a-sep.csv"),
            record("387a-oct.csv"),
        ];
        let selected = filter_and_sort(
            records,
            SequenceRange::new(246, 386),
            &SequenceInference::new(),
        );
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].filename, "246a-sep.csv");
        assert_eq!(selected[0].sequence_number, Some(246));
    }

    #[test]
    fn test_filter_sorts_ascending_with_stable_ties() {
        let mut first_dup = record("300a-x.csv");
        first_dup.display_text = "first".to_string();
        let mut second_dup = record("300a-x.csv");
        second_dup.display_text = "second".to_string();
        let records = vec![
            record("310a-z.csv"),
            first_dup,
            record("250a-y.csv"),
            second_dup,
        ];
        let selected = filter_and_sort(
            records,
            SequenceRange::new(246, 386),
            &SequenceInference::new(),
        );
        assert_eq!(
            names(&selected),
            ["250a-y.csv", "300a-x.csv", "300a-x.csv", "310a-z.csv"]
        );
        assert_eq!(selected[1].display_text, "first");
        assert_eq!(selected[2].display_text, "second");
    }

    #[test]
    fn test_filter_range_bounds_are_inclusive() {
        let records = vec![
            record("245a.csv"),
            record("246a.csv"),
            record("386a.csv"),
            record("387a.csv"),
        ];
        let selected = filter_and_sort(
            records,
            SequenceRange::new(246, 386),
            &SequenceInference::new(),
        );
        assert_eq!(names(&selected), ["246a.csv", "386a.csv"]);
    }

    #[test]
    fn test_filter_drops_records_without_number() {
        let records = vec![record("readme.csv"), record("report-1500.csv")];
        let selected = filter_and_sort(
            records,
            SequenceRange::new(0, u64::MAX),
            &SequenceInference::new(),
        );
        assert!(selected.is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let records = vec![
            record("330a.csv"),
            record("data-2024-260.csv"),
            record("12a.csv"),
            record("280a.csv"),
        ];
        let inference = SequenceInference::new();
        let range = SequenceRange::new(246, 386);
        let once = filter_and_sort(records, range, &inference);
        let twice = filter_and_sort(once.clone(), range, &inference);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_overwrites_stale_sequence_number() {
        let mut stale = record("250a.csv");
        stale.sequence_number = Some(9999);
        let selected = filter_and_sort(
            vec![stale],
            SequenceRange::new(246, 386),
            &SequenceInference::new(),
        );
        assert_eq!(selected[0].sequence_number, Some(250));
    }

    #[test]
    fn test_filter_inverted_range_selects_nothing() {
        let selected = filter_and_sort(
            vec![record("300a.csv")],
            SequenceRange::new(386, 246),
            &SequenceInference::new(),
        );
        assert!(selected.is_empty());
    }

    #[test]
    fn test_annotate_keeps_every_record() {
        let annotated = annotate(
            vec![record("7a.csv"), record("readme.csv")],
            &SequenceInference::new(),
        );
        assert_eq!(annotated.len(), 2);
        assert_eq!(annotated[0].sequence_number, Some(7));
        assert_eq!(annotated[1].sequence_number, None);
    }

    #[test]
    fn test_range_display() {
        assert_eq!(SequenceRange::new(246, 386).to_string(), "246-386");
    }
}
