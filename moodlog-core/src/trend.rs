//! Time-ordered projection of journal entries into chartable series.

use crate::emotion::Emotion;
use crate::entry::JournalEntry;
use chrono::{DateTime, FixedOffset};

/// Series charted when nothing else is configured.
pub const DEFAULT_TREND_COLUMNS: [Emotion; 2] = [Emotion::Joy, Emotion::Sadness];

/// Result of [`render`]. An empty journal is `NoData`, never an empty series.
#[derive(Debug, Clone, PartialEq)]
pub enum Trend {
    NoData,
    Series(TrendSeries),
}

/// A time-indexed table: one row per entry, one value per selected column.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSeries {
    pub columns: Vec<Emotion>,
    pub points: Vec<TrendPoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendPoint {
    pub timestamp: DateTime<FixedOffset>,
    /// Values in the same order as [`TrendSeries::columns`].
    pub values: Vec<f64>,
}

impl TrendSeries {
    /// The `(timestamp, value)` line for one emotion, if it was selected.
    ///
    /// Points that carry fewer values than there are columns are skipped.
    pub fn series(&self, emotion: Emotion) -> Option<Vec<(DateTime<FixedOffset>, f64)>> {
        let index = self.columns.iter().position(|c| *c == emotion)?;
        Some(
            self.points
                .iter()
                .filter_map(|point| Some((point.timestamp, *point.values.get(index)?)))
                .collect(),
        )
    }

    /// Mean of one selected emotion across all points.
    pub fn average(&self, emotion: Emotion) -> Option<f64> {
        let line = self.series(emotion)?;
        if line.is_empty() {
            return None;
        }
        let total: f64 = line.iter().map(|(_, value)| value).sum();
        Some(total / line.len() as f64)
    }
}

/// Sorts `entries` by time (stable, ties keep input order) and projects `columns`.
///
/// An empty `columns` slice selects [`DEFAULT_TREND_COLUMNS`].
pub fn render(entries: &[JournalEntry], columns: &[Emotion]) -> Trend {
    if entries.is_empty() {
        return Trend::NoData;
    }
    let columns = if columns.is_empty() {
        DEFAULT_TREND_COLUMNS.to_vec()
    } else {
        columns.to_vec()
    };

    let mut ordered: Vec<&JournalEntry> = entries.iter().collect();
    ordered.sort_by_key(|entry| entry.timestamp);

    let points = ordered
        .into_iter()
        .map(|entry| TrendPoint {
            timestamp: entry.timestamp,
            values: columns.iter().map(|c| entry.scores.get(*c)).collect(),
        })
        .collect();

    Trend::Series(TrendSeries { columns, points })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emotion::EmotionScores;

    fn ts(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn mk_entry(stamp: &str, text: &str, joy: f64, sadness: f64) -> JournalEntry {
        let scores = EmotionScores::new()
            .with(Emotion::Joy, joy)
            .with(Emotion::Sadness, sadness)
            .with(Emotion::Anger, 0.9);
        JournalEntry::at(ts(stamp), text, scores).unwrap()
    }

    fn series(trend: Trend) -> TrendSeries {
        match trend {
            Trend::Series(series) => series,
            Trend::NoData => panic!("expected a series"),
        }
    }

    #[test]
    fn empty_input_is_no_data() {
        assert_eq!(render(&[], &DEFAULT_TREND_COLUMNS), Trend::NoData);
    }

    #[test]
    fn output_is_sorted_ascending_regardless_of_input_order() {
        let entries = vec![
            mk_entry("2025-08-03T10:00:00Z", "t3", 0.3, 0.0),
            mk_entry("2025-08-01T10:00:00Z", "t1", 0.1, 0.0),
            mk_entry("2025-08-02T10:00:00Z", "t2", 0.2, 0.0),
        ];
        let s = series(render(&entries, &DEFAULT_TREND_COLUMNS));
        let stamps: Vec<_> = s.points.iter().map(|p| p.timestamp).collect();
        assert_eq!(
            stamps,
            [
                ts("2025-08-01T10:00:00Z"),
                ts("2025-08-02T10:00:00Z"),
                ts("2025-08-03T10:00:00Z")
            ]
        );
        let joy: Vec<f64> = s.points.iter().map(|p| p.values[0]).collect();
        assert_eq!(joy, [0.1, 0.2, 0.3]);
    }

    #[test]
    fn ordering_compares_instants_across_offsets() {
        let entries = vec![
            mk_entry("2025-08-01T10:00:00+00:00", "later", 0.2, 0.0),
            mk_entry("2025-08-01T11:00:00+02:00", "earlier", 0.1, 0.0),
        ];
        let s = series(render(&entries, &[Emotion::Joy]));
        assert_eq!(s.points[0].values, [0.1]);
        assert_eq!(s.points[1].values, [0.2]);
    }

    #[test]
    fn ties_keep_input_order() {
        let entries = vec![
            mk_entry("2025-08-01T10:00:00Z", "a", 0.7, 0.0),
            mk_entry("2025-08-01T10:00:00Z", "b", 0.4, 0.0),
        ];
        let s = series(render(&entries, &[Emotion::Joy]));
        assert_eq!(s.points[0].values, [0.7]);
        assert_eq!(s.points[1].values, [0.4]);
    }

    #[test]
    fn projects_only_selected_columns_in_order() {
        let entries = vec![mk_entry("2025-08-01T10:00:00Z", "a", 0.8, 0.05)];
        let s = series(render(&entries, &[Emotion::Sadness, Emotion::Joy]));
        assert_eq!(s.columns, [Emotion::Sadness, Emotion::Joy]);
        assert_eq!(s.points[0].values, [0.05, 0.8]);
        assert!(s.series(Emotion::Anger).is_none());
    }

    #[test]
    fn empty_column_selection_uses_defaults() {
        let entries = vec![mk_entry("2025-08-01T10:00:00Z", "a", 0.8, 0.05)];
        let s = series(render(&entries, &[]));
        assert_eq!(s.columns, DEFAULT_TREND_COLUMNS);
    }

    #[test]
    fn render_is_idempotent() {
        let entries = vec![
            mk_entry("2025-08-02T10:00:00Z", "b", 0.2, 0.5),
            mk_entry("2025-08-01T10:00:00Z", "a", 0.6, 0.1),
        ];
        let first = render(&entries, &DEFAULT_TREND_COLUMNS);
        let second = render(&entries, &DEFAULT_TREND_COLUMNS);
        assert_eq!(first, second);
    }

    #[test]
    fn average_and_series_follow_sorted_points() {
        let entries = vec![
            mk_entry("2025-08-02T10:00:00Z", "b", 0.2, 0.5),
            mk_entry("2025-08-01T10:00:00Z", "a", 0.6, 0.1),
        ];
        let s = series(render(&entries, &DEFAULT_TREND_COLUMNS));
        let joy = s.series(Emotion::Joy).unwrap();
        assert_eq!(joy[0], (ts("2025-08-01T10:00:00Z"), 0.6));
        let avg = s.average(Emotion::Sadness).unwrap();
        assert!((avg - 0.3).abs() < 1e-12);
    }

    #[test]
    fn short_points_are_skipped_not_indexed() {
        let s = TrendSeries {
            columns: vec![Emotion::Joy, Emotion::Sadness],
            points: vec![
                TrendPoint {
                    timestamp: ts("2025-08-01T10:00:00Z"),
                    values: vec![0.4],
                },
                TrendPoint {
                    timestamp: ts("2025-08-02T10:00:00Z"),
                    values: vec![0.6, 0.2],
                },
            ],
        };
        assert_eq!(
            s.series(Emotion::Sadness).unwrap(),
            [(ts("2025-08-02T10:00:00Z"), 0.2)]
        );
        assert_eq!(s.series(Emotion::Joy).unwrap().len(), 2);
        assert_eq!(s.average(Emotion::Sadness), Some(0.2));

        let empty = TrendSeries {
            columns: vec![Emotion::Joy],
            points: vec![TrendPoint {
                timestamp: ts("2025-08-01T10:00:00Z"),
                values: vec![],
            }],
        };
        assert_eq!(empty.average(Emotion::Joy), None);
    }
}
