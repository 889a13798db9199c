use crate::geometry::Point2;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Position on a curve a constraint may reference.
///
/// `Mid` doubles as the center of circles and arcs, matching the usual
/// sketcher vertex numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SubPosition {
    None,
    Start,
    End,
    Mid,
}

/// Identity of a sketch geometry element plus the sub-position a relation
/// refers to. Ordered and hashable so it can serve as the vertex identity
/// in every relation graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GeoId {
    pub index: i32,
    pub sub: SubPosition,
}

impl GeoId {
    /// The sketch's horizontal axis. Negative indices are reserved for
    /// geometry the sketch itself provides rather than the user.
    pub const H_AXIS: GeoId = GeoId { index: -1, sub: SubPosition::None };
    /// The sketch's vertical axis.
    pub const V_AXIS: GeoId = GeoId { index: -2, sub: SubPosition::None };

    /// Identity of a whole element (edge-level reference).
    pub fn new(index: i32) -> Self {
        Self { index, sub: SubPosition::None }
    }

    /// Identity of a specific vertex on an element.
    pub fn at(index: i32, sub: SubPosition) -> Self {
        Self { index, sub }
    }
}

impl fmt::Display for GeoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sub {
            SubPosition::None => write!(f, "{}", self.index),
            SubPosition::Start => write!(f, "{}.start", self.index),
            SubPosition::End => write!(f, "{}.end", self.index),
            SubPosition::Mid => write!(f, "{}.mid", self.index),
        }
    }
}

/// Identity of one pulled geometry snapshot.
///
/// Suggestion sets are tagged with the snapshot they were computed from, so
/// a caller juggling in-flight recomputes can discard results that belong
/// to a superseded snapshot instead of mixing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnapshotId(pub Uuid);

impl SnapshotId {
    /// Generate a fresh random snapshot identity.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The nil identity, used before any snapshot has been pulled.
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// Create an identity from a specific UUID (useful for restoration).
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Create a deterministic identity from a string seed, for hosts that
    /// derive snapshot identity from a document revision.
    pub fn new_deterministic(seed: &str) -> Self {
        Self(Uuid::new_v5(&Uuid::NAMESPACE_OID, seed.as_bytes()))
    }
}

impl Default for SnapshotId {
    fn default() -> Self {
        Self::nil()
    }
}

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Geometry of a single sketch primitive, in sketch-plane coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PrimitiveGeometry {
    Line { start: Point2, end: Point2 },
    Circle { center: Point2, radius: f64 },
    Arc { center: Point2, radius: f64, start_angle: f64, end_angle: f64 },
    Point { pos: Point2 },
}

/// One primitive of a geometry snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SketchPrimitive {
    pub index: i32,
    pub geometry: PrimitiveGeometry,
    /// Reference geometry, drawn to guide other elements rather than to
    /// become part of the profile.
    #[serde(default)]
    pub is_construction: bool,
    /// Geometry projected in from outside the sketch; read-only.
    #[serde(default)]
    pub is_external: bool,
}

/// An immutable snapshot of a sketch's geometry, ordered by stable
/// geometry index. Derived data only: rebuilt wholesale whenever the host
/// signals a change, never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SketchSnapshot {
    pub id: SnapshotId,
    pub primitives: Vec<SketchPrimitive>,
}

impl SketchSnapshot {
    pub fn new() -> Self {
        Self { id: SnapshotId::new(), primitives: Vec::new() }
    }

    /// Append a primitive, assigning the next geometry index.
    pub fn add(&mut self, geometry: PrimitiveGeometry) -> i32 {
        self.add_flagged(geometry, false, false)
    }

    /// Append a primitive with explicit provenance flags.
    pub fn add_flagged(
        &mut self,
        geometry: PrimitiveGeometry,
        is_construction: bool,
        is_external: bool,
    ) -> i32 {
        let index = self.primitives.len() as i32;
        self.primitives.push(SketchPrimitive { index, geometry, is_construction, is_external });
        index
    }

    pub fn primitive(&self, index: i32) -> Option<&SketchPrimitive> {
        self.primitives.iter().find(|p| p.index == index)
    }
}

impl Default for SketchSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

/// Participant layout of a constraint that already exists in the sketch.
///
/// A tagged union so every consumer matches exhaustively; the loose
/// attribute-bag probing this replaces is where unrecognized layouts used
/// to slip through silently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExistingConstraint {
    Coincident { a: GeoId, b: GeoId },
    Horizontal { edge: GeoId },
    Vertical { edge: GeoId },
    Parallel { a: GeoId, b: GeoId },
    Equal { a: GeoId, b: GeoId },
    Radius { entity: GeoId, value: f64 },
    Diameter { entity: GeoId, value: f64 },
    DistanceX { a: GeoId, b: GeoId, value: f64 },
    DistanceY { a: GeoId, b: GeoId, value: f64 },
}

impl ExistingConstraint {
    /// Short name of the participant layout, for error reporting.
    pub fn shape_name(&self) -> &'static str {
        match self {
            ExistingConstraint::Coincident { .. } => "Coincident",
            ExistingConstraint::Horizontal { .. } => "Horizontal",
            ExistingConstraint::Vertical { .. } => "Vertical",
            ExistingConstraint::Parallel { .. } => "Parallel",
            ExistingConstraint::Equal { .. } => "Equal",
            ExistingConstraint::Radius { .. } => "Radius",
            ExistingConstraint::Diameter { .. } => "Diameter",
            ExistingConstraint::DistanceX { .. } => "DistanceX",
            ExistingConstraint::DistanceY { .. } => "DistanceY",
        }
    }
}
