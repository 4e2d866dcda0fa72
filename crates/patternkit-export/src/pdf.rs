//! Tiled print-at-home PDF export.
//!
//! One cover page (title, piece count, a 50 mm calibration square for
//! verifying print scale), then one tile page per grid cell per piece.
//! Oversized pieces are split across standard pages with a fixed
//! overlap; tiles that share an edge get registration marks at the
//! shared-edge midpoint so the printout can be reassembled. No exact
//! vector clipping is performed; each tile translates the full piece
//! geometry and lets the page boundary act as a soft clip.
//!
//! Page order is piece-major, then row-major, then column-major.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use patternkit_core::{ExportError, PatternDocument, PatternPiece};

use crate::pdf_writer::{escape_text, mm, PdfWriter};

/// Printable margin on every page edge, in mm.
pub const PAGE_MARGIN_MM: f64 = 10.0;

/// Overlap between adjacent tiles, in mm.
pub const TILE_OVERLAP_MM: f64 = 15.0;

/// Side length of the cover page's calibration square, in mm.
pub const CALIBRATION_SQUARE_MM: f64 = 50.0;

/// Supported output page formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFormat {
    A4,
    Letter,
}

impl PageFormat {
    /// Page size in millimeters (width, height), portrait.
    pub fn size_mm(&self) -> (f64, f64) {
        match self {
            PageFormat::A4 => (210.0, 297.0),
            PageFormat::Letter => (215.9, 279.4),
        }
    }

    /// Printable area in millimeters after margins.
    pub fn printable_mm(&self) -> (f64, f64) {
        let (w, h) = self.size_mm();
        (w - 2.0 * PAGE_MARGIN_MM, h - 2.0 * PAGE_MARGIN_MM)
    }

    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "a4" => Some(PageFormat::A4),
            "letter" => Some(PageFormat::Letter),
            _ => None,
        }
    }

    /// Format name as a display string.
    pub fn as_str(&self) -> &'static str {
        match self {
            PageFormat::A4 => "a4",
            PageFormat::Letter => "letter",
        }
    }
}

/// Tile grid for one piece on the given format: `(cols, rows)`.
///
/// `None` when the piece has no geometry. A degenerate but non-empty
/// bounding box still occupies one tile.
pub fn tile_counts(piece: &PatternPiece, format: PageFormat) -> Option<(usize, usize)> {
    let (min_x, min_y, max_x, max_y) = piece.bounding_box()?;
    let (stride_x, stride_y) = strides(format);
    let cols = ((max_x - min_x) / stride_x).ceil().max(1.0) as usize;
    let rows = ((max_y - min_y) / stride_y).ceil().max(1.0) as usize;
    Some((cols, rows))
}

/// Tile stride in mm: printable area minus the shared overlap.
fn strides(format: PageFormat) -> (f64, f64) {
    let (pw, ph) = format.printable_mm();
    (pw - TILE_OVERLAP_MM, ph - TILE_OVERLAP_MM)
}

/// Serializes a document as a multi-page tiled PDF.
///
/// Fails with [`ExportError::EmptyDocument`] when no piece carries
/// geometry, and with [`ExportError::Encode`] if the geometry is not
/// finite; neither failure touches the document itself.
pub fn to_tiled_pdf(doc: &PatternDocument, format: PageFormat) -> Result<Vec<u8>, ExportError> {
    let drawable: Vec<&PatternPiece> = doc.pieces.iter().filter(|p| p.has_geometry()).collect();
    if drawable.is_empty() {
        return Err(ExportError::EmptyDocument {
            style_name: doc.style_name.clone(),
        });
    }
    for piece in &drawable {
        if piece
            .raw_points
            .iter()
            .any(|p| !p.x.is_finite() || !p.y.is_finite())
        {
            return Err(ExportError::Encode {
                format: "pdf",
                reason: format!("piece '{}' contains non-finite coordinates", piece.name),
            });
        }
    }

    let (page_w, page_h) = format.size_mm();
    let (page_w_pt, page_h_pt) = (mm(page_w), mm(page_h));

    let mut w = PdfWriter::new();
    let pages_id = w.reserve();
    let font_id = w.add_object(
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_vec(),
    );

    let mut page_ids = Vec::new();
    let mut add_page = |w: &mut PdfWriter, content: String| {
        let stream_id = w.add_stream(&content);
        let page_id = w.add_object(
            format!(
                "<< /Type /Page /Parent {} 0 R /MediaBox [0 0 {:.2} {:.2}] \
                 /Resources << /Font << /F1 {} 0 R >> >> /Contents {} 0 R >>",
                pages_id, page_w_pt, page_h_pt, font_id, stream_id
            )
            .into_bytes(),
        );
        page_ids.push(page_id);
    };

    add_page(&mut w, cover_content(doc, format));

    for piece in &drawable {
        // drawable pieces all carry geometry, so tile_counts is Some here
        let Some((cols, rows)) = tile_counts(piece, format) else {
            continue;
        };
        debug!(piece = %piece.name, cols, rows, "tiling piece");
        for row in 0..rows {
            for col in 0..cols {
                add_page(&mut w, tile_content(piece, format, row, col, rows, cols));
            }
        }
    }

    let kids: Vec<String> = page_ids.iter().map(|id| format!("{} 0 R", id)).collect();
    w.set_object(
        pages_id,
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            page_ids.len()
        )
        .into_bytes(),
    );
    let catalog_id =
        w.add_object(format!("<< /Type /Catalog /Pages {} 0 R >>", pages_id).into_bytes());

    let bytes = w.finish(catalog_id);
    info!(
        style = %doc.style_name,
        format = format.as_str(),
        pages = page_ids.len(),
        bytes = bytes.len(),
        "tiled pdf serialized"
    );
    Ok(bytes)
}

/// Serializes and writes `<file_stem>.pdf` into `dir`, returning the
/// written path.
pub fn write_tiled_pdf(
    doc: &PatternDocument,
    format: PageFormat,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    let bytes = to_tiled_pdf(doc, format)?;
    let path = dir.join(format!("{}.pdf", doc.file_stem()));
    std::fs::write(&path, bytes)?;
    Ok(path)
}

/// Cover page: title block plus the print-scale calibration square.
fn cover_content(doc: &PatternDocument, format: PageFormat) -> String {
    let (_, page_h) = format.size_mm();
    let page_h_pt = mm(page_h);
    let left = mm(PAGE_MARGIN_MM + 10.0);

    let mut ops = String::new();
    let mut text_line = |y_pt: f64, size: u32, text: &str| {
        ops.push_str(&format!(
            "BT /F1 {} Tf {:.2} {:.2} Td ({}) Tj ET\n",
            size,
            left,
            y_pt,
            escape_text(text)
        ));
    };

    let p = &doc.params;
    text_line(page_h_pt - mm(30.0), 24, &doc.style_name);
    text_line(
        page_h_pt - mm(42.0),
        12,
        &format!(
            "{} house - {} synthesis - {} pieces",
            doc.brand.as_str(),
            doc.synthesis_method.as_str(),
            doc.pieces.len()
        ),
    );
    text_line(
        page_h_pt - mm(50.0),
        12,
        &format!(
            "fit tension {:.0} / gravity {:.0} / distortion {:.0}",
            p.fit_tension, p.gravity, p.distortion
        ),
    );
    text_line(page_h_pt - mm(58.0), 12, &format!("fabric: {}", doc.fabric_yield));

    // Calibration square: must print at exactly 50 mm x 50 mm.
    let sq = mm(CALIBRATION_SQUARE_MM);
    let sq_x = left;
    let sq_y = page_h_pt - mm(80.0) - sq;
    ops.push_str(&format!("1 w {:.2} {:.2} {:.2} {:.2} re S\n", sq_x, sq_y, sq, sq));
    ops.push_str(&format!(
        "BT /F1 10 Tf {:.2} {:.2} Td ({}) Tj ET\n",
        sq_x,
        sq_y - mm(6.0),
        escape_text("calibration square: verify 50 mm x 50 mm before cutting")
    ));

    ops
}

/// One tile page: the translated cut-line polyline, the grainline, the
/// tile label, and registration marks on edges with a neighbor.
fn tile_content(
    piece: &PatternPiece,
    format: PageFormat,
    row: usize,
    col: usize,
    rows: usize,
    cols: usize,
) -> String {
    let (_, page_h) = format.size_mm();
    let page_h_pt = mm(page_h);
    let (printable_w, printable_h) = format.printable_mm();
    let (stride_x, stride_y) = strides(format);

    // Piece geometry is in sheet mm; shift this tile's cell origin onto
    // the page's top-left printable corner.
    let (min_x, min_y, ..) = piece.bounding_box().unwrap_or((0.0, 0.0, 0.0, 0.0));
    let offset_x = PAGE_MARGIN_MM - min_x - col as f64 * stride_x;
    let offset_y = PAGE_MARGIN_MM - min_y - row as f64 * stride_y;

    // Page mm (Y down from top edge) -> PDF points (Y up).
    let to_pt = |x_mm: f64, y_mm: f64| (mm(x_mm), page_h_pt - mm(y_mm));

    let mut ops = String::new();

    // Cut line
    if let Some(first) = piece.raw_points.first() {
        let (x, y) = to_pt(first.x + offset_x, first.y + offset_y);
        ops.push_str(&format!("0.6 w {:.2} {:.2} m\n", x, y));
        for p in &piece.raw_points[1..] {
            let (x, y) = to_pt(p.x + offset_x, p.y + offset_y);
            ops.push_str(&format!("{:.2} {:.2} l\n", x, y));
        }
        ops.push_str("h S\n");
    }

    // Grainline, dashed
    let grain = piece.grainline;
    let (gx1, gy1) = to_pt(grain.x + offset_x, grain.y + offset_y);
    let (gx2, gy2) = to_pt(grain.x + offset_x, grain.y + grain.length + offset_y);
    ops.push_str(&format!(
        "[6 4] 0 d 0.4 w {:.2} {:.2} m {:.2} {:.2} l S [] 0 d\n",
        gx1, gy1, gx2, gy2
    ));

    // Registration marks on shared edges only
    let center_x = PAGE_MARGIN_MM + printable_w / 2.0;
    let center_y = PAGE_MARGIN_MM + printable_h / 2.0;
    if col > 0 {
        registration_mark(&mut ops, to_pt(PAGE_MARGIN_MM, center_y));
    }
    if col + 1 < cols {
        registration_mark(&mut ops, to_pt(PAGE_MARGIN_MM + printable_w, center_y));
    }
    if row > 0 {
        registration_mark(&mut ops, to_pt(center_x, PAGE_MARGIN_MM));
    }
    if row + 1 < rows {
        registration_mark(&mut ops, to_pt(center_x, PAGE_MARGIN_MM + printable_h));
    }

    // Tile label
    let (lx, ly) = to_pt(PAGE_MARGIN_MM, PAGE_MARGIN_MM - 3.0);
    ops.push_str(&format!(
        "BT /F1 8 Tf {:.2} {:.2} Td ({}) Tj ET\n",
        lx,
        ly,
        escape_text(&format!(
            "{} - tile {}/{} across, {}/{} down - {}",
            piece.name,
            col + 1,
            cols,
            row + 1,
            rows,
            piece.cut_instruction
        ))
    ));

    ops
}

/// Cross plus diamond centered on a shared-edge midpoint.
fn registration_mark(ops: &mut String, center: (f64, f64)) {
    let (cx, cy) = center;
    let arm = mm(5.0);
    let half = mm(3.0);
    ops.push_str(&format!(
        "0.4 w {:.2} {:.2} m {:.2} {:.2} l S {:.2} {:.2} m {:.2} {:.2} l S\n",
        cx - arm,
        cy,
        cx + arm,
        cy,
        cx,
        cy - arm,
        cx,
        cy + arm
    ));
    ops.push_str(&format!(
        "{:.2} {:.2} m {:.2} {:.2} l {:.2} {:.2} l {:.2} {:.2} l h S\n",
        cx + half,
        cy,
        cx,
        cy + half,
        cx - half,
        cy,
        cx,
        cy - half
    ));
}
