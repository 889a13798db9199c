//! Tolerance-truncated views over metric matrix rows.

use crate::suggest::metrics::MetricMatrix;
use crate::suggest::types::{MetricEntry, Suggestion};

/// The longest prefix of a sorted metric row whose values are within
/// `tolerance`.
///
/// Rows are sorted ascending, so the cut point is found by binary search
/// rather than a full scan; interactive tolerance sliders re-truncate
/// large rows without rebuilding anything. A zero tolerance admits only
/// exact duplicates.
pub fn tolerance_window(row: &[MetricEntry], tolerance: f64) -> &[MetricEntry] {
    let end = row.partition_point(|entry| entry.value <= tolerance);
    &row[..end]
}

/// Tolerance-truncated candidate lists for every subject of a matrix.
/// Subjects with no candidate inside the window are omitted.
pub fn truncate(matrix: &MetricMatrix, tolerance: f64) -> Vec<Suggestion> {
    matrix
        .iter()
        .filter_map(|(subject, row)| {
            let window = tolerance_window(row, tolerance);
            if window.is_empty() {
                None
            } else {
                Some(Suggestion { subject, candidates: window.to_vec() })
            }
        })
        .collect()
}
