//! Constraint-suggestion engine for 2D parametric sketches.
//!
//! Inspects a sketch snapshot and proposes geometric constraints the user
//! may want to apply: coincident points, equal-length edges, parallel
//! edges, horizontal/vertical edges, equal radii, and axis-aligned point
//! spacing. For each relation kind the pipeline is
//!
//!   extraction -> metric matrix -> tolerance window -> redundancy filter
//!
//! where the redundancy filter drops every candidate pair that existing
//! constraints already tie together, directly or transitively. The engine
//! only ever reads snapshots handed to it; constraints are written back
//! through a single batched host call.

pub mod config;
pub mod dirty;
pub mod engine;
pub mod equivalence;
pub mod filter;
pub mod metrics;
pub mod session;
pub mod types;
pub mod window;

#[cfg(test)]
mod tests_session;

pub use config::EngineConfig;
pub use dirty::{DirtyCache, DirtyFlags};
pub use engine::SuggestionEngine;
pub use equivalence::EquivalenceClasses;
pub use metrics::MetricMatrix;
pub use session::SuggestionSession;
pub use types::*;

use crate::sketch::{ExistingConstraint, SnapshotId};
use thiserror::Error;

/// Opaque failure reported by the host while creating constraints. The
/// engine does not interpret host transaction failures.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("host error: {0}")]
pub struct HostError(pub String);

/// Errors surfaced at the snapshot-extraction and host-interaction
/// boundary. The core algorithms themselves are total over well-formed
/// input and never fail.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    /// An existing constraint's participant layout does not belong to the
    /// relation kind being recomputed. Silently dropping it would corrupt
    /// the redundancy filter, so the recompute aborts instead.
    #[error("constraint shape {shape} does not belong to the {kind:?} relation")]
    UnrecognizedConstraintShape { kind: RelationKind, shape: String },

    /// Negative or non-finite tolerance requested; the previous tolerance
    /// is retained.
    #[error("tolerance must be finite and non-negative, got {0}")]
    ToleranceOutOfRange(f64),

    #[error(transparent)]
    Host(#[from] HostError),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// The host sketch boundary.
///
/// The host owns the sketch and its constraint solver; the engine consumes
/// consistent snapshots through this trait and writes constraints back via
/// one `apply_constraints` call per user-approved batch.
pub trait SketchHost {
    /// Identity of the geometry snapshot the sample data is derived from.
    /// Must change whenever the geometry changes.
    fn snapshot_id(&self) -> SnapshotId;

    /// Extracted primitive attributes for one relation kind, ordered by
    /// stable geometry index.
    fn primitive_samples(&self, kind: RelationKind) -> Vec<PrimitiveSample>;

    /// Existing constraints of the matching kind only.
    fn existing_constraints(&self, kind: RelationKind) -> Vec<ExistingConstraint>;

    /// Create the requested constraints in a single transaction.
    fn apply_constraints(
        &mut self,
        kind: RelationKind,
        batch: &[ConstraintRequest],
    ) -> Result<(), HostError>;
}
