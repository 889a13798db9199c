//! Pairwise metric matrix for one relation kind.

use crate::geometry::{direction_delta_deg, distance};
use crate::sketch::GeoId;
use crate::suggest::types::{MetricEntry, PrimitiveSample, RelationKind, SampleValue};
use std::cmp::Ordering;

/// Symmetric difference metric between two samples of one relation kind.
///
/// Total over the data model: mixed sample variants (which per-kind
/// extraction never produces) report an infinite distance and therefore
/// never enter a tolerance window.
fn pair_metric(kind: RelationKind, a: &SampleValue, b: &SampleValue) -> f64 {
    match (kind, a, b) {
        (RelationKind::Coincidence, SampleValue::Point(p), SampleValue::Point(q)) => distance(p, q),
        (RelationKind::XyDistance, SampleValue::Point(p), SampleValue::Point(q)) => {
            (p.x - q.x).abs().min((p.y - q.y).abs())
        }
        (RelationKind::EqualLength, SampleValue::Length(la), SampleValue::Length(lb)) => {
            (la - lb).abs()
        }
        (
            RelationKind::RadiusDiameter,
            SampleValue::Radius { radius: ra, .. },
            SampleValue::Radius { radius: rb, .. },
        ) => (ra - rb).abs(),
        (
            RelationKind::Parallel | RelationKind::HorizontalVertical,
            SampleValue::Direction(da),
            SampleValue::Direction(db),
        ) => direction_delta_deg(*da, *db),
        _ => f64::INFINITY,
    }
}

/// For each primitive, the metric to every other primitive of the same
/// relation kind, sorted ascending.
///
/// `metric(i, j) == metric(j, i)`, so only the lower triangle is computed
/// and mirrored. O(n^2) time and space over the primitive count of one
/// sketch.
#[derive(Debug, Clone)]
pub struct MetricMatrix {
    kind: RelationKind,
    subjects: Vec<GeoId>,
    rows: Vec<Vec<MetricEntry>>,
}

impl MetricMatrix {
    pub fn build(kind: RelationKind, samples: &[PrimitiveSample]) -> Self {
        let n = samples.len();
        let mut rows: Vec<Vec<MetricEntry>> =
            (0..n).map(|_| Vec::with_capacity(n.saturating_sub(1))).collect();

        for i in 0..n {
            for j in (i + 1)..n {
                let value = pair_metric(kind, &samples[i].value, &samples[j].value);
                rows[i].push(MetricEntry { other: samples[j].geo, value });
                rows[j].push(MetricEntry { other: samples[i].geo, value });
            }
        }

        // Stable ascending sort; GeoId order breaks ties so equal metrics
        // always list in the same order.
        for row in &mut rows {
            row.sort_by(|a, b| {
                a.value
                    .partial_cmp(&b.value)
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| a.other.cmp(&b.other))
            });
        }

        Self { kind, subjects: samples.iter().map(|s| s.geo).collect(), rows }
    }

    pub fn kind(&self) -> RelationKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    pub fn subjects(&self) -> &[GeoId] {
        &self.subjects
    }

    /// The sorted candidate row for one subject.
    pub fn row(&self, subject: GeoId) -> Option<&[MetricEntry]> {
        self.subjects
            .iter()
            .position(|&g| g == subject)
            .map(|i| self.rows[i].as_slice())
    }

    /// Iterate subjects with their sorted candidate rows.
    pub fn iter(&self) -> impl Iterator<Item = (GeoId, &[MetricEntry])> {
        self.subjects.iter().copied().zip(self.rows.iter().map(|r| r.as_slice()))
    }
}
