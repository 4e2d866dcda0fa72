//! DXF export for pattern documents.
//!
//! Emits ASCII DXF R12 (group-code/value pairs) with three fixed
//! layers:
//! - `CUT_LINE`: one closed POLYLINE per piece, vertex loop repeated
//!   with an explicit closing vertex equal to the first;
//! - `GRAIN_LINE`: one LINE per piece for the grainline;
//! - `INTERNAL`: reserved for internal markings.
//!
//! Coordinates are exported exactly as drafted (millimeters, Y down).
//! No Y flip is performed: DXF consumers conventionally expect Y up,
//! but pattern tooling in the field already compensates, so flipping
//! here would silently double-correct. Output is deterministic for a
//! given document.

use std::fmt::Display;
use std::path::Path;

use tracing::debug;

use patternkit_core::{ExportError, PatternDocument};

/// Layer carrying the piece cut lines.
pub const LAYER_CUT_LINE: &str = "CUT_LINE";
/// Layer carrying the grainline segments.
pub const LAYER_GRAIN_LINE: &str = "GRAIN_LINE";
/// Layer reserved for internal markings.
pub const LAYER_INTERNAL: &str = "INTERNAL";

/// Serializes a document as an ASCII DXF R12 string.
///
/// Pieces without geometry are skipped rather than erroring; a document
/// with no drawable pieces still yields a valid drawing with an empty
/// ENTITIES section.
pub fn to_dxf(doc: &PatternDocument) -> String {
    let mut w = DxfWriter::new();

    // HEADER: R12, millimeter units
    w.pair(0, "SECTION");
    w.pair(2, "HEADER");
    w.pair(9, "$ACADVER");
    w.pair(1, "AC1009");
    w.pair(9, "$INSUNITS");
    w.pair(70, 4);
    w.pair(0, "ENDSEC");

    // TABLES: the three fixed layers
    w.pair(0, "SECTION");
    w.pair(2, "TABLES");
    w.pair(0, "TABLE");
    w.pair(2, "LAYER");
    w.pair(70, 3);
    w.layer(LAYER_CUT_LINE, 1);
    w.layer(LAYER_GRAIN_LINE, 3);
    w.layer(LAYER_INTERNAL, 5);
    w.pair(0, "ENDTAB");
    w.pair(0, "ENDSEC");

    // ENTITIES
    w.pair(0, "SECTION");
    w.pair(2, "ENTITIES");
    let mut exported = 0;
    for piece in doc.pieces.iter().filter(|p| p.has_geometry()) {
        w.cut_polyline(piece);
        w.grain_line(piece);
        exported += 1;
    }
    w.pair(0, "ENDSEC");
    w.pair(0, "EOF");

    debug!(
        style = %doc.style_name,
        pieces = exported,
        bytes = w.out.len(),
        "dxf serialized"
    );
    w.out
}

/// Serializes and writes `<file_stem>.dxf` into `dir`, returning the
/// written path.
pub fn write_dxf(doc: &PatternDocument, dir: &Path) -> Result<std::path::PathBuf, ExportError> {
    let path = dir.join(format!("{}.dxf", doc.file_stem()));
    std::fs::write(&path, to_dxf(doc))?;
    Ok(path)
}

struct DxfWriter {
    out: String,
}

impl DxfWriter {
    fn new() -> Self {
        Self { out: String::new() }
    }

    fn pair(&mut self, code: i32, value: impl Display) {
        self.out.push_str(&format!("{}\n{}\n", code, value));
    }

    fn coord(&mut self, code: i32, value: f64) {
        self.out.push_str(&format!("{}\n{:.3}\n", code, value));
    }

    fn layer(&mut self, name: &str, color: i32) {
        self.pair(0, "LAYER");
        self.pair(2, name);
        self.pair(70, 0);
        self.pair(62, color);
        self.pair(6, "CONTINUOUS");
    }

    /// One closed POLYLINE on CUT_LINE. The vertex loop repeats the
    /// first point as an explicit closing vertex, so consumers that
    /// ignore the closed flag still see a closed loop.
    fn cut_polyline(&mut self, piece: &patternkit_core::PatternPiece) {
        self.pair(0, "POLYLINE");
        self.pair(8, LAYER_CUT_LINE);
        self.pair(66, 1);
        self.pair(70, 1);
        let closing = piece.raw_points.first().copied();
        for p in piece.raw_points.iter().chain(closing.iter()) {
            self.pair(0, "VERTEX");
            self.pair(8, LAYER_CUT_LINE);
            self.coord(10, p.x);
            self.coord(20, p.y);
            self.coord(30, 0.0);
        }
        self.pair(0, "SEQEND");
    }

    fn grain_line(&mut self, piece: &patternkit_core::PatternPiece) {
        let grain = piece.grainline;
        let (end_x, end_y) = grain.end();
        self.pair(0, "LINE");
        self.pair(8, LAYER_GRAIN_LINE);
        self.coord(10, grain.x);
        self.coord(20, grain.y);
        self.coord(30, 0.0);
        self.coord(11, end_x);
        self.coord(21, end_y);
        self.coord(31, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use patternkit_core::{
        BrandStyle, ControlPoint, DesignParameters, Grainline, PatternPiece, SynthesisMethod,
        VectorPath,
    };
    use uuid::Uuid;

    fn triangle_doc() -> PatternDocument {
        PatternDocument {
            id: Uuid::new_v4(),
            style_name: "Triangle".to_string(),
            brand: BrandStyle::Atelier,
            synthesis_method: SynthesisMethod::Linear,
            pieces: vec![PatternPiece {
                name: "Tri".to_string(),
                cut_instruction: "CUT 1".to_string(),
                path: VectorPath::new(),
                raw_points: vec![
                    ControlPoint::new(0.0, 0.0),
                    ControlPoint::new(100.0, 0.0),
                    ControlPoint::new(50.0, 80.0),
                ],
                grainline: Grainline::new(50.0, 10.0, 60.0),
                annotations: Vec::new(),
            }],
            fabric_yield: String::new(),
            params: DesignParameters::neutral(),
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn header_declares_r12_millimeters() {
        let out = to_dxf(&triangle_doc());
        assert!(out.contains("$ACADVER\n1\nAC1009"));
        assert!(out.contains("$INSUNITS\n70\n4"));
        assert!(out.trim_end().ends_with("0\nEOF"));
    }

    #[test]
    fn declares_exactly_three_layers() {
        let out = to_dxf(&triangle_doc());
        for layer in [LAYER_CUT_LINE, LAYER_GRAIN_LINE, LAYER_INTERNAL] {
            assert!(out.contains(&format!("LAYER\n2\n{}", layer)), "missing {}", layer);
        }
        assert_eq!(out.matches("0\nLAYER\n").count(), 3);
    }

    #[test]
    fn polyline_repeats_first_vertex() {
        let out = to_dxf(&triangle_doc());
        assert_eq!(out.matches("0\nPOLYLINE\n").count(), 1);
        // 3 raw points + explicit closing vertex
        assert_eq!(out.matches("0\nVERTEX\n").count(), 4);
        assert_eq!(out.matches("0\nSEQEND\n").count(), 1);
        // closing vertex duplicates the first coordinates
        assert_eq!(out.matches("10\n0.000\n20\n0.000").count(), 2);
    }

    #[test]
    fn grainline_becomes_a_line_entity() {
        let out = to_dxf(&triangle_doc());
        assert_eq!(out.matches("0\nLINE\n").count(), 1);
        assert!(out.contains("11\n50.000\n21\n70.000"));
    }

    #[test]
    fn empty_pieces_are_skipped() {
        let mut doc = triangle_doc();
        doc.pieces[0].raw_points.clear();
        let out = to_dxf(&doc);
        assert_eq!(out.matches("0\nPOLYLINE\n").count(), 0);
        assert!(out.contains("ENTITIES"));
        assert!(out.trim_end().ends_with("0\nEOF"));
    }

    #[test]
    fn output_is_deterministic() {
        let doc = triangle_doc();
        assert_eq!(to_dxf(&doc), to_dxf(&doc));
    }
}
