use crate::geometry::Point2;
use crate::sketch::{GeoId, SnapshotId};
use crate::suggest::dirty::DirtyFlags;
use serde::{Deserialize, Serialize};

/// The relation kinds the engine can suggest constraints for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationKind {
    Coincidence,
    EqualLength,
    Parallel,
    HorizontalVertical,
    RadiusDiameter,
    XyDistance,
}

impl RelationKind {
    pub const ALL: [RelationKind; 6] = [
        RelationKind::Coincidence,
        RelationKind::EqualLength,
        RelationKind::Parallel,
        RelationKind::HorizontalVertical,
        RelationKind::RadiusDiameter,
        RelationKind::XyDistance,
    ];

    /// The invalidation bit owned by this kind's session.
    pub fn dirty_bit(self) -> DirtyFlags {
        match self {
            RelationKind::Coincidence => DirtyFlags::COINCIDENT_POINTS,
            RelationKind::EqualLength => DirtyFlags::EQUAL_EDGES,
            RelationKind::Parallel => DirtyFlags::PARALLEL_EDGES,
            RelationKind::HorizontalVertical => DirtyFlags::HV_EDGES,
            RelationKind::RadiusDiameter => DirtyFlags::RADIUS_CIRCLES,
            RelationKind::XyDistance => DirtyFlags::XY_EDGES,
        }
    }

    /// Value attached to constraint requests of this kind.
    ///
    /// X/Y-distance suggestions pin nearly-aligned points to an exact zero
    /// axis offset; every other kind is a value-free relation.
    pub fn apply_value(self) -> Option<f64> {
        match self {
            RelationKind::XyDistance => Some(0.0),
            _ => None,
        }
    }
}

/// Relation-specific attribute extracted from one primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SampleValue {
    /// A constrainable vertex (coincidence, X/Y-distance).
    Point(Point2),
    /// Edge length (equal-length).
    Length(f64),
    /// Undirected edge angle in degrees, normalized into [0, 180)
    /// (parallel, horizontal/vertical).
    Direction(f64),
    /// Circle or arc center plus radius (radius/diameter).
    Radius { center: Point2, radius: f64 },
}

/// One primitive's extracted attribute, paired with its identity and
/// provenance flags. Rebuilt wholesale on every re-analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveSample {
    pub geo: GeoId,
    pub value: SampleValue,
    pub is_construction: bool,
    pub is_external: bool,
}

impl PrimitiveSample {
    pub fn new(geo: GeoId, value: SampleValue) -> Self {
        Self { geo, value, is_construction: false, is_external: false }
    }
}

/// One candidate partner for a subject primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricEntry {
    pub other: GeoId,
    pub value: f64,
}

/// Tolerance-filtered, redundancy-filtered candidates for one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub subject: GeoId,
    /// Ascending by metric value; ties broken by GeoId order.
    pub candidates: Vec<MetricEntry>,
}

/// A complete suggestion result for one relation kind.
///
/// The snapshot and tolerance tags record exactly which inputs the result
/// was computed from; a caller sequencing recompute requests compares them
/// to discard results that a newer request has superseded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionSet {
    pub kind: RelationKind,
    pub snapshot: SnapshotId,
    pub tolerance: f64,
    pub items: Vec<Suggestion>,
}

/// One constraint the engine asks the host to create. Batched so the host
/// can wrap a whole user-approved selection in a single transaction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConstraintRequest {
    pub a: GeoId,
    pub b: GeoId,
    pub value: Option<f64>,
}
