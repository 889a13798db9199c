//! The engine aggregate: one session per relation kind plus the shared
//! dirty cache.

use crate::sketch::GeoId;
use crate::suggest::config::EngineConfig;
use crate::suggest::dirty::{DirtyCache, DirtyFlags};
use crate::suggest::session::SuggestionSession;
use crate::suggest::types::{RelationKind, SuggestionSet};
use crate::suggest::{EngineResult, SketchHost};

/// Caller-owned suggestion engine for one sketch-edit session.
///
/// Holds a `SuggestionSession` per relation kind and the invalidation
/// cache they share. All state is derived from host snapshots; discarding
/// the engine loses nothing but cached computation.
pub struct SuggestionEngine {
    dirty: DirtyCache,
    // Indexed by the RelationKind discriminant; construction from
    // RelationKind::ALL keeps the two in step.
    sessions: Vec<SuggestionSession>,
}

impl SuggestionEngine {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            dirty: DirtyCache::new(),
            sessions: RelationKind::ALL
                .iter()
                .map(|&kind| SuggestionSession::new(kind, config.tolerance(kind)))
                .collect(),
        }
    }

    fn session_mut(&mut self, kind: RelationKind) -> &mut SuggestionSession {
        &mut self.sessions[kind as usize]
    }

    /// The tolerance currently in effect for one relation kind.
    pub fn tolerance(&self, kind: RelationKind) -> f64 {
        self.sessions[kind as usize].tolerance()
    }

    /// Change one kind's tolerance; its window and suggestions recompute
    /// on the next request.
    pub fn set_tolerance(&mut self, kind: RelationKind, value: f64) -> EngineResult<()> {
        self.session_mut(kind).set_tolerance(value)
    }

    /// Host notification that geometry or constraints changed.
    pub fn mark_dirty(&mut self, flags: DirtyFlags) {
        self.dirty.mark(flags);
    }

    /// Wholesale invalidation, e.g. on an edit-session switch.
    pub fn mark_all_dirty(&mut self) {
        self.dirty.mark_all();
    }

    /// Current suggestions for one relation kind, computed lazily.
    pub fn suggestions<H: SketchHost>(
        &mut self,
        kind: RelationKind,
        host: &H,
    ) -> EngineResult<SuggestionSet> {
        let dirty = &mut self.dirty;
        self.sessions[kind as usize].suggestions(host, dirty)
    }

    /// Apply the current suggestions for the selected subjects of one
    /// relation kind in a single host transaction.
    pub fn apply<H: SketchHost>(
        &mut self,
        kind: RelationKind,
        host: &mut H,
        selection: &[GeoId],
    ) -> EngineResult<()> {
        let dirty = &mut self.dirty;
        self.sessions[kind as usize].apply(host, selection, dirty)
    }
}
