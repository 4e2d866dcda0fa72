//! Design parameters, brand styles, and garment classification.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Neutral fit tension: the block's drafted ease, neither compressed nor
/// oversized.
pub const NEUTRAL_FIT_TENSION: f64 = 50.0;

/// The three semantic sliders driving a draft.
///
/// All values are clamped to `[0, 100]` at construction. 50 is neutral
/// for `fit_tension`; 0 is neutral for `gravity` and `distortion`.
///
/// Parameter snapshots are versioned by the recompute pipeline as
/// *committed* (last set accepted by the engine) vs *pending* (the value
/// currently being dragged). The two snapshots stay separate structs
/// until a commit event fires.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignParameters {
    /// Ease at the fit-scaling seams: 0 = skin-tight, 50 = as drafted,
    /// 100 = oversized.
    pub fit_tension: f64,
    /// Downward droop applied to hems, waists and wrists: 0..100.
    pub gravity: f64,
    /// Brand-dependent displacement intensity: 0..100.
    pub distortion: f64,
}

impl DesignParameters {
    /// Creates a parameter set, clamping each value into `[0, 100]`.
    pub fn new(fit_tension: f64, gravity: f64, distortion: f64) -> Self {
        Self {
            fit_tension: fit_tension.clamp(0.0, 100.0),
            gravity: gravity.clamp(0.0, 100.0),
            distortion: distortion.clamp(0.0, 100.0),
        }
    }

    /// The neutral parameter set `{50, 0, 0}` under which deformation is
    /// the identity.
    pub fn neutral() -> Self {
        Self {
            fit_tension: NEUTRAL_FIT_TENSION,
            gravity: 0.0,
            distortion: 0.0,
        }
    }

    /// Fit scale factor about the local origin: 0.6 at tension 0, 1.0 at
    /// 50, 1.4 at 100.
    pub fn fit_scale(&self) -> f64 {
        1.0 + ((self.fit_tension - NEUTRAL_FIT_TENSION) / 100.0) * 0.8
    }

    /// Ease relative to the drafted block, as a signed percentage.
    pub fn ease_percent(&self) -> f64 {
        (self.fit_scale() - 1.0) * 100.0
    }
}

impl Default for DesignParameters {
    fn default() -> Self {
        Self::neutral()
    }
}

/// How a brand's paths are synthesized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SynthesisMethod {
    /// Straight segments, closed with `Z`.
    Linear,
    /// Quadratic Beziers with sag/wobble control points.
    Curved,
}

impl SynthesisMethod {
    /// Method name as used in document metadata.
    pub fn as_str(&self) -> &'static str {
        match self {
            SynthesisMethod::Linear => "linear",
            SynthesisMethod::Curved => "curved",
        }
    }
}

/// Brand aesthetic. A closed set of exactly two houses; each fixes the
/// path-synthesis strategy and the shape of the distortion term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BrandStyle {
    /// Rigid, architectural displacement; angular silhouettes.
    Atelier,
    /// Organic deterministic pseudo-noise; curved silhouettes.
    Flux,
}

impl BrandStyle {
    /// The path-synthesis strategy this brand uses.
    pub fn synthesis_method(&self) -> SynthesisMethod {
        match self {
            BrandStyle::Atelier => SynthesisMethod::Linear,
            BrandStyle::Flux => SynthesisMethod::Curved,
        }
    }

    /// Brand name as a display string.
    pub fn as_str(&self) -> &'static str {
        match self {
            BrandStyle::Atelier => "atelier",
            BrandStyle::Flux => "flux",
        }
    }

    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "atelier" => Some(BrandStyle::Atelier),
            "flux" => Some(BrandStyle::Flux),
            _ => None,
        }
    }
}

/// Garment family selecting which blocks a draft uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GarmentFamily {
    /// Upper-body garment: bodice front plus sleeve.
    Bodice,
    /// Lower-body garment: pant front.
    Pant,
}

impl GarmentFamily {
    /// Classifies a free-text garment description.
    ///
    /// This is the single place the engine inspects the description
    /// string. Matching is case-insensitive substring: "pant" or
    /// "trouser" selects [`GarmentFamily::Pant`]; anything else,
    /// including an empty or garbled description, falls back to
    /// [`GarmentFamily::Bodice`]. The fallback is intentional and
    /// logged rather than an error: a live-editing session should keep
    /// drafting something while the operator types.
    pub fn classify(description: &str) -> Self {
        let trimmed = description.trim();
        if trimmed.is_empty() {
            warn!("Empty garment description, defaulting to bodice family");
            return GarmentFamily::Bodice;
        }
        let lower = trimmed.to_ascii_lowercase();
        if lower.contains("pant") || lower.contains("trouser") {
            GarmentFamily::Pant
        } else {
            GarmentFamily::Bodice
        }
    }

    /// Family name as a display string.
    pub fn as_str(&self) -> &'static str {
        match self {
            GarmentFamily::Bodice => "bodice",
            GarmentFamily::Pant => "pant",
        }
    }
}
