//! Ghost preview deltas.
//!
//! While a slider is being dragged, the UI needs instant approximate
//! feedback long before the authoritative recompute commits. A
//! [`GhostDelta`] is a cheap linear comparison of the pending parameter
//! snapshot against the last committed one: scale/skew factors the
//! renderer can apply to the existing preview. It shares the drafting
//! engine's displacement constants so the approximation tracks the real
//! math; it is never persisted and never replaces a recompute.

use patternkit_core::DesignParameters;
use patternkit_drafting::deform::{GRAVITY_DROP_MM, NOISE_AMPLITUDE_MM};

/// Approximate visual delta between two parameter snapshots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostDelta {
    /// Horizontal scale factor to apply to fitted seams.
    pub scale_x: f64,
    /// Additional vertical drop in mm at gravity-tagged points.
    pub drop_y: f64,
    /// Displacement amplitude change in mm.
    pub wobble: f64,
}

impl GhostDelta {
    /// Linear delta from `committed` to `pending`.
    pub fn between(committed: &DesignParameters, pending: &DesignParameters) -> Self {
        Self {
            scale_x: pending.fit_scale() / committed.fit_scale(),
            drop_y: ((pending.gravity - committed.gravity) / 100.0) * GRAVITY_DROP_MM,
            wobble: ((pending.distortion - committed.distortion) / 100.0) * NOISE_AMPLITUDE_MM,
        }
    }

    /// Whether the delta would move nothing.
    pub fn is_neutral(&self) -> bool {
        (self.scale_x - 1.0).abs() < 1e-9 && self.drop_y.abs() < 1e-9 && self.wobble.abs() < 1e-9
    }
}

impl Default for GhostDelta {
    fn default() -> Self {
        Self {
            scale_x: 1.0,
            drop_y: 0.0,
            wobble: 0.0,
        }
    }
}
