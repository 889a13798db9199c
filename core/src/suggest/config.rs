//! Caller-owned engine configuration.

use crate::suggest::types::RelationKind;
use serde::{Deserialize, Serialize};

/// Per-relation-kind tolerance defaults.
///
/// Explicitly constructed and owned by the caller; the host persists its
/// own values (per-kind user settings) and hands them over at engine
/// construction. Distances are in sketch units, angles in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum point separation for coincidence candidates.
    pub coincidence_tolerance: f64,
    /// Maximum length difference for equal-length candidates.
    pub equal_length_tolerance: f64,
    /// Maximum direction difference for parallel candidates, degrees.
    pub parallel_tolerance_deg: f64,
    /// Maximum direction difference for horizontal/vertical candidates, degrees.
    pub horizontal_vertical_tolerance_deg: f64,
    /// Maximum radius difference for equal-radius candidates.
    pub radius_tolerance: f64,
    /// Maximum axis offset for X/Y-alignment candidates.
    pub xy_distance_tolerance: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            coincidence_tolerance: 0.1,
            equal_length_tolerance: 0.05,
            parallel_tolerance_deg: 2.0,
            horizontal_vertical_tolerance_deg: 2.0,
            radius_tolerance: 0.05,
            xy_distance_tolerance: 0.1,
        }
    }
}

impl EngineConfig {
    /// The configured tolerance for one relation kind.
    pub fn tolerance(&self, kind: RelationKind) -> f64 {
        match kind {
            RelationKind::Coincidence => self.coincidence_tolerance,
            RelationKind::EqualLength => self.equal_length_tolerance,
            RelationKind::Parallel => self.parallel_tolerance_deg,
            RelationKind::HorizontalVertical => self.horizontal_vertical_tolerance_deg,
            RelationKind::RadiusDiameter => self.radius_tolerance,
            RelationKind::XyDistance => self.xy_distance_tolerance,
        }
    }

    /// Load configuration from a host-persisted JSON blob.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
