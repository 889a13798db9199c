//! Sample and constraint-pair extraction from a geometry snapshot.
//!
//! Each relation kind looks at a different attribute of a primitive: a
//! vertex position, an edge length, an undirected direction angle, or a
//! radius. Extraction turns one `SketchSnapshot` into the flat sample list
//! the metric matrix is built from, and turns the existing constraint set
//! into the participant pairs the equivalence classes are built from.

use super::types::{ExistingConstraint, GeoId, PrimitiveGeometry, SketchSnapshot, SubPosition};
use crate::geometry::{direction_angle_deg, line_length, Point2};
use crate::suggest::{EngineError, EngineResult, PrimitiveSample, RelationKind, SampleValue};

fn arc_endpoint(center: &Point2, radius: f64, angle: f64) -> Point2 {
    Point2::new(center.x + radius * angle.cos(), center.y + radius * angle.sin())
}

/// Extract the relation-specific samples for `kind` from a snapshot.
///
/// Coincidence and X/Y-distance enumerate constrainable vertices (line
/// endpoints, arc endpoints and centers, circle centers, points);
/// equal-length and the direction kinds enumerate line edges;
/// radius/diameter enumerates circles and arcs.
pub fn samples_for(snapshot: &SketchSnapshot, kind: RelationKind) -> Vec<PrimitiveSample> {
    let mut samples = Vec::new();

    for prim in &snapshot.primitives {
        let push = |samples: &mut Vec<PrimitiveSample>, geo: GeoId, value: SampleValue| {
            samples.push(PrimitiveSample {
                geo,
                value,
                is_construction: prim.is_construction,
                is_external: prim.is_external,
            });
        };

        match kind {
            RelationKind::Coincidence | RelationKind::XyDistance => match &prim.geometry {
                PrimitiveGeometry::Line { start, end } => {
                    push(&mut samples, GeoId::at(prim.index, SubPosition::Start), SampleValue::Point(*start));
                    push(&mut samples, GeoId::at(prim.index, SubPosition::End), SampleValue::Point(*end));
                }
                PrimitiveGeometry::Arc { center, radius, start_angle, end_angle } => {
                    push(
                        &mut samples,
                        GeoId::at(prim.index, SubPosition::Start),
                        SampleValue::Point(arc_endpoint(center, *radius, *start_angle)),
                    );
                    push(
                        &mut samples,
                        GeoId::at(prim.index, SubPosition::End),
                        SampleValue::Point(arc_endpoint(center, *radius, *end_angle)),
                    );
                    push(&mut samples, GeoId::at(prim.index, SubPosition::Mid), SampleValue::Point(*center));
                }
                PrimitiveGeometry::Circle { center, .. } => {
                    push(&mut samples, GeoId::at(prim.index, SubPosition::Mid), SampleValue::Point(*center));
                }
                PrimitiveGeometry::Point { pos } => {
                    push(&mut samples, GeoId::at(prim.index, SubPosition::Start), SampleValue::Point(*pos));
                }
            },

            RelationKind::EqualLength => {
                if let PrimitiveGeometry::Line { start, end } = &prim.geometry {
                    push(&mut samples, GeoId::new(prim.index), SampleValue::Length(line_length(start, end)));
                }
            }

            RelationKind::Parallel | RelationKind::HorizontalVertical => {
                if let PrimitiveGeometry::Line { start, end } = &prim.geometry {
                    push(
                        &mut samples,
                        GeoId::new(prim.index),
                        SampleValue::Direction(direction_angle_deg(start, end)),
                    );
                }
            }

            RelationKind::RadiusDiameter => match &prim.geometry {
                PrimitiveGeometry::Circle { center, radius }
                | PrimitiveGeometry::Arc { center, radius, .. } => {
                    push(
                        &mut samples,
                        GeoId::new(prim.index),
                        SampleValue::Radius { center: *center, radius: *radius },
                    );
                }
                _ => {}
            },
        }
    }

    samples
}

/// Extract the participant pairs of existing constraints relevant to `kind`.
///
/// Single-edge horizontal/vertical constraints fold into pairs against the
/// reserved axis identities, so "both edges are horizontal" lands in the
/// same equivalence class as an explicit parallel chain. Radius and
/// diameter value constraints fix a value rather than equating two
/// elements, so they are recognized but contribute no pair.
///
/// A record whose layout does not belong to `kind` aborts the extraction:
/// dropping it silently would leave the redundancy filter suggesting
/// relations the sketch already has.
pub fn constraint_pairs(
    kind: RelationKind,
    records: &[ExistingConstraint],
) -> EngineResult<Vec<(GeoId, GeoId)>> {
    let mut pairs = Vec::new();

    for record in records {
        let pair = match (kind, record) {
            (RelationKind::Coincidence, ExistingConstraint::Coincident { a, b }) => Some((*a, *b)),

            (RelationKind::EqualLength, ExistingConstraint::Equal { a, b }) => Some((*a, *b)),

            (
                RelationKind::Parallel | RelationKind::HorizontalVertical,
                ExistingConstraint::Parallel { a, b },
            ) => Some((*a, *b)),
            (
                RelationKind::Parallel | RelationKind::HorizontalVertical,
                ExistingConstraint::Horizontal { edge },
            ) => Some((*edge, GeoId::H_AXIS)),
            (
                RelationKind::Parallel | RelationKind::HorizontalVertical,
                ExistingConstraint::Vertical { edge },
            ) => Some((*edge, GeoId::V_AXIS)),

            (RelationKind::RadiusDiameter, ExistingConstraint::Equal { a, b }) => Some((*a, *b)),
            (RelationKind::RadiusDiameter, ExistingConstraint::Radius { .. })
            | (RelationKind::RadiusDiameter, ExistingConstraint::Diameter { .. }) => None,

            (RelationKind::XyDistance, ExistingConstraint::DistanceX { a, b, .. })
            | (RelationKind::XyDistance, ExistingConstraint::DistanceY { a, b, .. })
            | (RelationKind::XyDistance, ExistingConstraint::Coincident { a, b }) => Some((*a, *b)),

            _ => {
                return Err(EngineError::UnrecognizedConstraintShape {
                    kind,
                    shape: record.shape_name().to_string(),
                })
            }
        };

        if let Some(pair) = pair {
            pairs.push(pair);
        }
    }

    Ok(pairs)
}
