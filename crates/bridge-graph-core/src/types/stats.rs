//! Run statistics: expansion counters and the fixed-bucket degree histogram.

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Histogram bucket labels, in bucket order.
pub const DEGREE_BUCKETS: [&str; 7] = [
    "1-5", "6-10", "11-50", "51-100", "101-500", "501-1000", "1000+",
];

/// Degree histogram over expanded nodes, keyed by fixed buckets.
///
/// Serializes as a `label -> count` map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DegreeHistogram {
    counts: [u64; 7],
}

impl DegreeHistogram {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one node of the given degree.
    ///
    /// Degrees of 0 land in the `"1-5"` bucket.
    pub fn record(&mut self, degree: usize) {
        self.counts[Self::bucket_index(degree)] += 1;
    }

    /// Count for a bucket label, 0 for unknown labels.
    pub fn count(&self, label: &str) -> u64 {
        DEGREE_BUCKETS
            .iter()
            .position(|bucket| *bucket == label)
            .map(|i| self.counts[i])
            .unwrap_or(0)
    }

    /// Total nodes recorded across all buckets.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    fn bucket_index(degree: usize) -> usize {
        match degree {
            0..=5 => 0,
            6..=10 => 1,
            11..=50 => 2,
            51..=100 => 3,
            101..=500 => 4,
            501..=1000 => 5,
            _ => 6,
        }
    }
}

impl Serialize for DegreeHistogram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(DEGREE_BUCKETS.len()))?;
        for (label, count) in DEGREE_BUCKETS.iter().zip(self.counts.iter()) {
            map.serialize_entry(label, count)?;
        }
        map.end()
    }
}

/// Counters for one expansion run.
#[derive(Debug, Clone, Serialize)]
pub struct ExpansionStats {
    /// Nodes popped and expanded.
    pub nodes_expanded: u64,

    /// Edges recorded into the output graph (one per traversed edge).
    pub edges_traversed: u64,

    /// Main-loop iterations completed.
    pub iterations: u64,

    /// When the run started.
    pub started_at: DateTime<Utc>,

    /// Wall-clock duration of the run in milliseconds.
    pub elapsed_ms: u64,

    /// Degrees of expanded nodes, bucketed.
    pub degree_histogram: DegreeHistogram,
}

impl ExpansionStats {
    /// Fresh counters stamped with the current time.
    pub fn start() -> Self {
        Self {
            nodes_expanded: 0,
            edges_traversed: 0,
            iterations: 0,
            started_at: Utc::now(),
            elapsed_ms: 0,
            degree_histogram: DegreeHistogram::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_boundaries() {
        let mut histogram = DegreeHistogram::new();
        for degree in [0, 1, 5, 6, 10, 11, 50, 51, 100, 101, 500, 501, 1000, 1001] {
            histogram.record(degree);
        }

        assert_eq!(histogram.count("1-5"), 3); // 0, 1, 5
        assert_eq!(histogram.count("6-10"), 2);
        assert_eq!(histogram.count("11-50"), 2);
        assert_eq!(histogram.count("51-100"), 2);
        assert_eq!(histogram.count("101-500"), 2);
        assert_eq!(histogram.count("501-1000"), 2);
        assert_eq!(histogram.count("1000+"), 1);
        assert_eq!(histogram.total(), 14);
    }

    #[test]
    fn test_unknown_label_counts_zero() {
        let histogram = DegreeHistogram::new();
        assert_eq!(histogram.count("0-0"), 0);
    }

    #[test]
    fn test_histogram_serializes_all_buckets() {
        let mut histogram = DegreeHistogram::new();
        histogram.record(7);

        let json = serde_json::to_value(&histogram).unwrap();
        assert_eq!(json["6-10"], 1);
        assert_eq!(json["1000+"], 0);
    }
}
