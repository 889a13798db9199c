//! Per-relation-kind suggestion session and its cache lifecycle.

use crate::sketch::{extract, GeoId, SnapshotId};
use crate::suggest::dirty::{DirtyCache, DirtyFlags};
use crate::suggest::equivalence::EquivalenceClasses;
use crate::suggest::filter::drop_redundant;
use crate::suggest::metrics::MetricMatrix;
use crate::suggest::types::{ConstraintRequest, RelationKind, Suggestion, SuggestionSet};
use crate::suggest::{window, EngineError, EngineResult, SketchHost};
use std::collections::HashSet;
use tracing::{debug, info};

/// Orchestrates one relation kind: extraction, metric matrix, tolerance
/// window, redundancy filter.
///
/// Two artifacts are cached: the metric matrix (rebuilt when the kind's
/// dirty bit is set) and the tolerance window (rebuilt when the matrix was
/// rebuilt or the tolerance changed). The final suggestion list is cheap
/// relative to both and is recomputed on every request against a freshly
/// pulled existing-constraint snapshot, so it is never stale with respect
/// to the constraint set.
pub struct SuggestionSession {
    kind: RelationKind,
    tolerance: f64,
    snapshot: SnapshotId,
    metrics: Option<MetricMatrix>,
    window: Option<Vec<Suggestion>>,
}

impl SuggestionSession {
    pub fn new(kind: RelationKind, tolerance: f64) -> Self {
        Self {
            kind,
            tolerance,
            snapshot: SnapshotId::nil(),
            metrics: None,
            window: None,
        }
    }

    pub fn kind(&self) -> RelationKind {
        self.kind
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Change the tolerance, invalidating the cached window.
    ///
    /// Negative or non-finite values are rejected and the previous
    /// tolerance is retained.
    pub fn set_tolerance(&mut self, value: f64) -> EngineResult<()> {
        if !value.is_finite() || value < 0.0 {
            return Err(EngineError::ToleranceOutOfRange(value));
        }
        if value != self.tolerance {
            self.tolerance = value;
            self.window = None;
        }
        Ok(())
    }

    /// Current suggestions, recomputing stale artifacts lazily.
    ///
    /// The returned set is tagged with the snapshot and tolerance it was
    /// computed from; matrix and window always derive from the same
    /// snapshot because a matrix rebuild discards the window.
    pub fn suggestions<H: SketchHost>(
        &mut self,
        host: &H,
        dirty: &mut DirtyCache,
    ) -> EngineResult<SuggestionSet> {
        let bit = self.kind.dirty_bit();
        if self.metrics.is_none() || dirty.is_set(bit) {
            let samples = host.primitive_samples(self.kind);
            debug!(kind = ?self.kind, primitives = samples.len(), "rebuilding metric matrix");
            self.metrics = Some(MetricMatrix::build(self.kind, &samples));
            self.snapshot = host.snapshot_id();
            self.window = None;
            dirty.clear(bit);
        }

        if self.window.is_none() {
            if let Some(matrix) = self.metrics.as_ref() {
                self.window = Some(window::truncate(matrix, self.tolerance));
            }
        }

        let records = host.existing_constraints(self.kind);
        let pairs = extract::constraint_pairs(self.kind, &records)?;
        let classes = EquivalenceClasses::build(&pairs);
        dirty.clear(DirtyFlags::CONSTRAINTS);

        let items = drop_redundant(self.window.clone().unwrap_or_default(), &classes);
        Ok(SuggestionSet {
            kind: self.kind,
            snapshot: self.snapshot,
            tolerance: self.tolerance,
            items,
        })
    }

    /// Apply the current suggestions for the selected subjects.
    ///
    /// One batched host call covers the whole selection so the host can
    /// wrap it in a single transaction. An empty selection is a no-op and
    /// must not open a transaction. All caches are invalidated only after
    /// the host reports success; the solver may move any geometry to
    /// satisfy the new constraints, so every relation kind goes stale.
    pub fn apply<H: SketchHost>(
        &mut self,
        host: &mut H,
        selection: &[GeoId],
        dirty: &mut DirtyCache,
    ) -> EngineResult<()> {
        if selection.is_empty() {
            return Ok(());
        }

        let set = self.suggestions(host, dirty)?;
        let mut seen: HashSet<(GeoId, GeoId)> = HashSet::new();
        let mut batch = Vec::new();
        for suggestion in &set.items {
            if !selection.contains(&suggestion.subject) {
                continue;
            }
            for candidate in &suggestion.candidates {
                // Both directions of a pair may be listed; create each
                // constraint once.
                let key = if suggestion.subject <= candidate.other {
                    (suggestion.subject, candidate.other)
                } else {
                    (candidate.other, suggestion.subject)
                };
                if seen.insert(key) {
                    batch.push(ConstraintRequest {
                        a: suggestion.subject,
                        b: candidate.other,
                        value: self.kind.apply_value(),
                    });
                }
            }
        }

        if batch.is_empty() {
            return Ok(());
        }

        info!(kind = ?self.kind, count = batch.len(), "applying suggested constraints");
        host.apply_constraints(self.kind, &batch)?;
        dirty.mark(DirtyFlags::all());
        Ok(())
    }
}
