//! Pattern pieces and the assembled output document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{bounding_box, ControlPoint, Grainline, VectorPath};
use crate::params::{BrandStyle, DesignParameters, SynthesisMethod};

/// Engine-authored advisory note tied to a piece.
///
/// `anchor` is an index into the owning piece's `raw_points`. Blocks are
/// append-only ordered sets, so indices stay valid across versions;
/// operator-authored annotations (a UI concern, not modeled here) key on
/// the same indices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// The advisory text, e.g. "ease +24% at side seams".
    pub text: String,
    /// Optional raw-point index the note is pinned to.
    pub anchor: Option<usize>,
}

impl Annotation {
    /// Creates a free-floating annotation.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            anchor: None,
        }
    }

    /// Creates an annotation pinned to a raw-point index.
    pub fn anchored(text: impl Into<String>, anchor: usize) -> Self {
        Self {
            text: text.into(),
            anchor: Some(anchor),
        }
    }
}

/// One drafted pattern piece.
///
/// `raw_points` is the authoritative geometry; `path` is the derived
/// render cache produced by the synthesizer. Exporters work from
/// `raw_points`, live preview from `path`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternPiece {
    /// Piece name, e.g. "Bodice Front".
    pub name: String,
    /// Cutting instruction printed on the piece, e.g. "CUT 1 ON FOLD".
    pub cut_instruction: String,
    /// Derived vector path for rendering.
    pub path: VectorPath,
    /// Authoritative deformed geometry in sheet coordinates (mm, Y down).
    pub raw_points: Vec<ControlPoint>,
    /// Fabric grain reference line.
    pub grainline: Grainline,
    /// Engine-authored advisory notes.
    pub annotations: Vec<Annotation>,
}

impl PatternPiece {
    /// Axis-aligned bounding box of the authoritative geometry, or
    /// `None` when the piece has no points.
    pub fn bounding_box(&self) -> Option<(f64, f64, f64, f64)> {
        bounding_box(&self.raw_points)
    }

    /// Whether the piece carries any geometry.
    pub fn has_geometry(&self) -> bool {
        !self.raw_points.is_empty()
    }
}

/// The assembled output of one recompute.
///
/// A document is created fresh on every successful recompute and never
/// mutated afterwards; the recompute pipeline owns the current document
/// and exporters borrow it read-only for the duration of one export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternDocument {
    /// Unique id for this draft.
    pub id: Uuid,
    /// Human-readable style name, derived from the garment description.
    pub style_name: String,
    /// Brand aesthetic the draft was made for.
    pub brand: BrandStyle,
    /// Path-synthesis strategy used for all pieces.
    pub synthesis_method: SynthesisMethod,
    /// The drafted pieces, already offset onto one virtual sheet.
    pub pieces: Vec<PatternPiece>,
    /// Estimated fabric requirement, e.g. "1.4 m of 150 cm fabric".
    pub fabric_yield: String,
    /// The committed parameter set this draft reflects.
    pub params: DesignParameters,
    /// When the draft was assembled.
    pub generated_at: DateTime<Utc>,
}

impl PatternDocument {
    /// Derives a filesystem-safe file stem from the style name.
    ///
    /// Non-alphanumeric runs collapse to single underscores; an empty
    /// style name yields "pattern".
    pub fn file_stem(&self) -> String {
        let mut stem = String::new();
        let mut last_was_sep = true;
        for c in self.style_name.chars() {
            if c.is_ascii_alphanumeric() {
                stem.push(c.to_ascii_lowercase());
                last_was_sep = false;
            } else if !last_was_sep {
                stem.push('_');
                last_was_sep = true;
            }
        }
        let stem = stem.trim_end_matches('_').to_string();
        if stem.is_empty() {
            "pattern".to_string()
        } else {
            stem
        }
    }

    /// Total point count across all pieces.
    pub fn point_count(&self) -> usize {
        self.pieces.iter().map(|p| p.raw_points.len()).sum()
    }
}
