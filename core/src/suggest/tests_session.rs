use crate::geometry::Point2;
use crate::sketch::{
    extract, ExistingConstraint, GeoId, PrimitiveGeometry, SketchSnapshot, SnapshotId, SubPosition,
};
use crate::suggest::dirty::{DirtyCache, DirtyFlags};
use crate::suggest::session::SuggestionSession;
use crate::suggest::types::{ConstraintRequest, PrimitiveSample, RelationKind};
use crate::suggest::{EngineError, HostError, SketchHost};
use std::cell::Cell;

/// Host double: serves samples from a snapshot, records applied batches,
/// and counts how often geometry is re-pulled.
struct TestHost {
    snapshot: SketchSnapshot,
    constraints: Vec<ExistingConstraint>,
    sample_pulls: Cell<usize>,
    applied: Vec<(RelationKind, Vec<ConstraintRequest>)>,
    fail_apply: bool,
}

impl TestHost {
    fn new(snapshot: SketchSnapshot) -> Self {
        Self {
            snapshot,
            constraints: Vec::new(),
            sample_pulls: Cell::new(0),
            applied: Vec::new(),
            fail_apply: false,
        }
    }
}

impl SketchHost for TestHost {
    fn snapshot_id(&self) -> SnapshotId {
        self.snapshot.id
    }

    fn primitive_samples(&self, kind: RelationKind) -> Vec<PrimitiveSample> {
        self.sample_pulls.set(self.sample_pulls.get() + 1);
        extract::samples_for(&self.snapshot, kind)
    }

    fn existing_constraints(&self, _kind: RelationKind) -> Vec<ExistingConstraint> {
        self.constraints.clone()
    }

    fn apply_constraints(
        &mut self,
        kind: RelationKind,
        batch: &[ConstraintRequest],
    ) -> Result<(), HostError> {
        if self.fail_apply {
            return Err(HostError("injected transaction failure".to_string()));
        }
        self.applied.push((kind, batch.to_vec()));
        Ok(())
    }
}

/// Two near-coincident line endpoints plus one far-away point.
fn near_points_snapshot() -> SketchSnapshot {
    let mut snapshot = SketchSnapshot::new();
    snapshot.add(PrimitiveGeometry::Line {
        start: Point2::new(0.0, 0.0),
        end: Point2::new(10.0, 0.0),
    });
    snapshot.add(PrimitiveGeometry::Line {
        start: Point2::new(10.05, 0.0),
        end: Point2::new(20.0, 0.0),
    });
    snapshot.add(PrimitiveGeometry::Point { pos: Point2::new(50.0, 50.0) });
    snapshot
}

#[test]
fn test_suggestions_basic_coincidence() {
    let host = TestHost::new(near_points_snapshot());
    let mut session = SuggestionSession::new(RelationKind::Coincidence, 0.1);
    let mut dirty = DirtyCache::new();

    let set = session.suggestions(&host, &mut dirty).unwrap();
    assert_eq!(set.kind, RelationKind::Coincidence);
    assert_eq!(set.snapshot, host.snapshot.id);

    let line0_end = GeoId::at(0, SubPosition::End);
    let line1_start = GeoId::at(1, SubPosition::Start);
    let for_end = set.items.iter().find(|s| s.subject == line0_end).unwrap();
    assert_eq!(for_end.candidates.len(), 1);
    assert_eq!(for_end.candidates[0].other, line1_start);

    // The far point has no candidates and is absent
    assert!(!set.items.iter().any(|s| s.subject == GeoId::at(2, SubPosition::Start)));
}

#[test]
fn test_metrics_cached_until_marked_dirty() {
    let host = TestHost::new(near_points_snapshot());
    let mut session = SuggestionSession::new(RelationKind::Coincidence, 0.1);
    let mut dirty = DirtyCache::new();

    session.suggestions(&host, &mut dirty).unwrap();
    session.suggestions(&host, &mut dirty).unwrap();
    assert_eq!(host.sample_pulls.get(), 1, "second request must reuse the matrix");

    dirty.mark(DirtyFlags::COINCIDENT_POINTS);
    session.suggestions(&host, &mut dirty).unwrap();
    assert_eq!(host.sample_pulls.get(), 2, "dirty bit must force a re-pull");
}

#[test]
fn test_other_kinds_dirty_bit_does_not_invalidate() {
    let host = TestHost::new(near_points_snapshot());
    let mut session = SuggestionSession::new(RelationKind::Coincidence, 0.1);
    let mut dirty = DirtyCache::new();

    session.suggestions(&host, &mut dirty).unwrap();
    dirty.mark(DirtyFlags::EQUAL_EDGES | DirtyFlags::RADIUS_CIRCLES);
    session.suggestions(&host, &mut dirty).unwrap();
    assert_eq!(host.sample_pulls.get(), 1);
}

#[test]
fn test_tolerance_change_rebuilds_window_without_repull() {
    let host = TestHost::new(near_points_snapshot());
    let mut session = SuggestionSession::new(RelationKind::Coincidence, 0.1);
    let mut dirty = DirtyCache::new();

    let wide = session.suggestions(&host, &mut dirty).unwrap();
    assert!(!wide.items.is_empty());

    session.set_tolerance(0.01).unwrap();
    let tight = session.suggestions(&host, &mut dirty).unwrap();
    assert!(tight.items.is_empty(), "0.05 gap is outside a 0.01 tolerance");
    assert_eq!(tight.tolerance, 0.01);
    assert_eq!(host.sample_pulls.get(), 1, "tolerance change must not re-pull geometry");
}

#[test]
fn test_invalid_tolerance_rejected_and_previous_retained() {
    let host = TestHost::new(near_points_snapshot());
    let mut session = SuggestionSession::new(RelationKind::Coincidence, 0.1);
    let mut dirty = DirtyCache::new();

    for bad in [-0.5, f64::NAN, f64::INFINITY] {
        match session.set_tolerance(bad) {
            Err(EngineError::ToleranceOutOfRange(_)) => {}
            other => panic!("Expected ToleranceOutOfRange, got {:?}", other),
        }
    }
    assert_eq!(session.tolerance(), 0.1);

    let set = session.suggestions(&host, &mut dirty).unwrap();
    assert!(!set.items.is_empty(), "previous tolerance must stay in effect");
}

#[test]
fn test_redundancy_completeness() {
    let mut host = TestHost::new(near_points_snapshot());
    let line0_end = GeoId::at(0, SubPosition::End);
    let line1_start = GeoId::at(1, SubPosition::Start);
    host.constraints.push(ExistingConstraint::Coincident { a: line0_end, b: line1_start });

    let mut session = SuggestionSession::new(RelationKind::Coincidence, 0.1);
    let mut dirty = DirtyCache::new();
    let set = session.suggestions(&host, &mut dirty).unwrap();

    for suggestion in &set.items {
        for candidate in &suggestion.candidates {
            assert!(
                !(suggestion.subject == line0_end && candidate.other == line1_start),
                "already-constrained pair must be filtered"
            );
        }
    }
}

#[test]
fn test_apply_empty_selection_is_a_no_op() {
    let mut host = TestHost::new(near_points_snapshot());
    let mut session = SuggestionSession::new(RelationKind::Coincidence, 0.1);
    let mut dirty = DirtyCache::new();

    session.suggestions(&host, &mut dirty).unwrap();
    session.apply(&mut host, &[], &mut dirty).unwrap();

    assert!(host.applied.is_empty(), "no host transaction may be opened");
    session.suggestions(&host, &mut dirty).unwrap();
    assert_eq!(host.sample_pulls.get(), 1, "dirty flags must stay untouched");
}

#[test]
fn test_apply_batches_once_and_dedupes_mirrored_pairs() {
    let mut host = TestHost::new(near_points_snapshot());
    let mut session = SuggestionSession::new(RelationKind::Coincidence, 0.1);
    let mut dirty = DirtyCache::new();

    let line0_end = GeoId::at(0, SubPosition::End);
    let line1_start = GeoId::at(1, SubPosition::Start);
    // Both directions of the same pair selected
    session.apply(&mut host, &[line0_end, line1_start], &mut dirty).unwrap();

    assert_eq!(host.applied.len(), 1, "one transaction per approved batch");
    let (kind, batch) = &host.applied[0];
    assert_eq!(*kind, RelationKind::Coincidence);
    assert_eq!(batch.len(), 1, "mirrored pair must be created once");
    assert_eq!(batch[0].value, None);
}

#[test]
fn test_apply_invalidates_all_kinds_after_success() {
    let mut host = TestHost::new(near_points_snapshot());
    let mut session = SuggestionSession::new(RelationKind::Coincidence, 0.1);
    let mut dirty = DirtyCache::new();

    session.apply(&mut host, &[GeoId::at(0, SubPosition::End)], &mut dirty).unwrap();
    assert!(dirty.is_set(DirtyFlags::EQUAL_EDGES));
    assert!(dirty.is_set(DirtyFlags::PARALLEL_EDGES));

    session.suggestions(&host, &mut dirty).unwrap();
    // apply pulled once for its own suggestion pass, the invalidated
    // request pulls again
    assert_eq!(host.sample_pulls.get(), 2);
}

#[test]
fn test_apply_host_failure_leaves_caches_valid() {
    let mut host = TestHost::new(near_points_snapshot());
    host.fail_apply = true;
    let mut session = SuggestionSession::new(RelationKind::Coincidence, 0.1);
    let mut dirty = DirtyCache::new();

    session.suggestions(&host, &mut dirty).unwrap();
    let err = session.apply(&mut host, &[GeoId::at(0, SubPosition::End)], &mut dirty).unwrap_err();
    match err {
        EngineError::Host(_) => {}
        other => panic!("Expected host passthrough, got {:?}", other),
    }

    assert!(!dirty.is_set(DirtyFlags::COINCIDENT_POINTS), "failed apply must not invalidate");
    session.suggestions(&host, &mut dirty).unwrap();
    assert_eq!(host.sample_pulls.get(), 1);
}

#[test]
fn test_unrecognized_constraint_shape_aborts_recompute() {
    let mut host = TestHost::new(near_points_snapshot());
    host.constraints.push(ExistingConstraint::Radius { entity: GeoId::new(0), value: 1.0 });

    let mut session = SuggestionSession::new(RelationKind::Coincidence, 0.1);
    let mut dirty = DirtyCache::new();
    let err = session.suggestions(&host, &mut dirty).unwrap_err();
    match err {
        EngineError::UnrecognizedConstraintShape { kind, .. } => {
            assert_eq!(kind, RelationKind::Coincidence);
        }
        other => panic!("Expected UnrecognizedConstraintShape, got {:?}", other),
    }
}

#[test]
fn test_snapshot_tag_tracks_geometry_pull() {
    let host = TestHost::new(near_points_snapshot());
    let mut session = SuggestionSession::new(RelationKind::Coincidence, 0.1);
    let mut dirty = DirtyCache::new();

    let first = session.suggestions(&host, &mut dirty).unwrap();
    assert_eq!(first.snapshot, host.snapshot.id);

    // Host re-snapshots after a geometry edit
    let mut host = host;
    host.snapshot = near_points_snapshot();
    dirty.mark(DirtyFlags::COINCIDENT_POINTS);
    let second = session.suggestions(&host, &mut dirty).unwrap();
    assert_eq!(second.snapshot, host.snapshot.id);
    assert_ne!(first.snapshot, second.snapshot);
}
