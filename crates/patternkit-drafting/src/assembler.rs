//! The pattern assembler: garment description in, `PatternDocument` out.
//!
//! Orchestrates classification, block selection, deformation, sheet
//! layout, path synthesis, and annotation into one fresh document per
//! call. Pure apart from logging; the recompute pipeline wraps this
//! behind its debounce/cancellation contract.

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use patternkit_core::{
    Annotation, BrandStyle, ControlPoint, DesignParameters, DraftError, GarmentFamily,
    PatternDocument, PatternPiece,
};

use crate::blocks::{blocks_for, Block};
use crate::deform::{deform, effective_distortion};
use crate::synthesis::synthesize;

/// Fixed sheet offsets per piece index, in mm. The piece count is small
/// and fixed per family, so constant spacing beats computed packing.
const SHEET_OFFSETS: [(f64, f64); 4] = [(0.0, 0.0), (480.0, 0.0), (960.0, 0.0), (1440.0, 0.0)];

/// Usable fabric width assumed when estimating yield, in mm.
const FABRIC_WIDTH_MM: f64 = 1500.0;

/// Drafts a complete pattern document.
///
/// Classification falls back to the bodice family for unknown or empty
/// descriptions (logged, never an error). Each selected block is
/// deformed in its local space, translated onto the shared virtual
/// sheet, synthesized into a path, and annotated with the active
/// deformation state.
pub fn assemble(
    description: &str,
    brand: BrandStyle,
    params: &DesignParameters,
) -> Result<PatternDocument, DraftError> {
    let family = GarmentFamily::classify(description);
    let method = brand.synthesis_method();
    debug!(
        family = family.as_str(),
        brand = brand.as_str(),
        method = method.as_str(),
        "assembling pattern"
    );

    let blocks = blocks_for(family);
    let mut pieces = Vec::with_capacity(blocks.len());
    for (index, block) in blocks.into_iter().enumerate() {
        pieces.push(draft_piece(&block, index, brand, params)?);
    }

    let fabric_yield = estimate_fabric_yield(&pieces);
    let style_name = style_name_from(description, family);
    let doc = PatternDocument {
        id: Uuid::new_v4(),
        style_name,
        brand,
        synthesis_method: method,
        pieces,
        fabric_yield,
        params: *params,
        generated_at: Utc::now(),
    };
    info!(
        style = %doc.style_name,
        pieces = doc.pieces.len(),
        points = doc.point_count(),
        "pattern assembled"
    );
    Ok(doc)
}

fn draft_piece(
    block: &Block,
    index: usize,
    brand: BrandStyle,
    params: &DesignParameters,
) -> Result<PatternPiece, DraftError> {
    if block.points.is_empty() {
        return Err(DraftError::EmptyBlock {
            block: block.name.to_string(),
        });
    }

    let deformed = deform(&block.points, params, brand);
    if deformed.len() != block.points.len() {
        return Err(DraftError::PointCountMismatch {
            block: block.name.to_string(),
            before: block.points.len(),
            after: deformed.len(),
        });
    }

    let (dx, dy) = SHEET_OFFSETS[index.min(SHEET_OFFSETS.len() - 1)];
    let raw_points: Vec<ControlPoint> = deformed.iter().map(|p| p.offset(dx, dy)).collect();

    let (path, grainline) = synthesize(&raw_points, params, brand.synthesis_method());
    let annotations = annotate(&raw_points, brand, params);

    Ok(PatternPiece {
        name: block.name.to_string(),
        cut_instruction: block.cut_instruction.to_string(),
        path,
        raw_points,
        grainline,
        annotations,
    })
}

/// Engine annotations summarizing the active deformation state. Every
/// piece gets at least the ease note; the others appear only when their
/// slider is doing something.
fn annotate(
    raw_points: &[ControlPoint],
    brand: BrandStyle,
    params: &DesignParameters,
) -> Vec<Annotation> {
    let mut notes = Vec::new();

    let fit_anchor = raw_points
        .iter()
        .position(|p| p.tag.map(|t| t.scales_with_fit()).unwrap_or(false));
    let ease_text = format!("ease {:+.0}% at fitted seams", params.ease_percent());
    notes.push(match fit_anchor {
        Some(i) => Annotation::anchored(ease_text, i),
        None => Annotation::new(ease_text),
    });

    if params.gravity > 0.0 {
        let drop = (params.gravity / 100.0) * 40.0;
        let anchor = raw_points
            .iter()
            .position(|p| p.tag.map(|t| t.drops_with_gravity()).unwrap_or(false));
        let text = format!("hem drop {:.0} mm", drop);
        notes.push(match anchor {
            Some(i) => Annotation::anchored(text, i),
            None => Annotation::new(text),
        });
    }

    let distortion = effective_distortion(params);
    if distortion > 0.0 {
        let text = match brand {
            BrandStyle::Atelier => format!(
                "architectural shift: {:.0} mm rise, {:.0} mm advance",
                distortion * 30.0,
                distortion * 20.0
            ),
            BrandStyle::Flux => {
                format!("organic displacement amplitude {:.0} mm", distortion * 40.0)
            }
        };
        notes.push(Annotation::new(text));
    }

    notes
}

/// Fabric estimate: total piece bounding area spread over the standard
/// fabric width, rounded up to the next 0.1 m.
fn estimate_fabric_yield(pieces: &[PatternPiece]) -> String {
    let total_area_mm2: f64 = pieces
        .iter()
        .filter_map(|p| p.bounding_box())
        .map(|(min_x, min_y, max_x, max_y)| (max_x - min_x) * (max_y - min_y))
        .sum();
    let length_m = total_area_mm2 / FABRIC_WIDTH_MM / 1000.0;
    let rounded = (length_m * 10.0).ceil() / 10.0;
    format!("{:.1} m of 150 cm fabric", rounded)
}

fn style_name_from(description: &str, family: GarmentFamily) -> String {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        format!("Untitled {}", capitalize(family.as_str()))
    } else {
        trimmed.to_string()
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_piece_is_annotated() {
        let doc = assemble("shirt", BrandStyle::Atelier, &DesignParameters::neutral()).unwrap();
        for piece in &doc.pieces {
            assert!(!piece.annotations.is_empty());
        }
    }

    #[test]
    fn empty_description_gets_untitled_bodice() {
        let doc = assemble("", BrandStyle::Atelier, &DesignParameters::neutral()).unwrap();
        assert_eq!(doc.style_name, "Untitled Bodice");
        assert_eq!(doc.pieces.len(), 2);
    }

    #[test]
    fn pieces_do_not_overlap_on_sheet() {
        let doc = assemble("jacket", BrandStyle::Atelier, &DesignParameters::neutral()).unwrap();
        let (.., max_x0, _) = doc.pieces[0].bounding_box().unwrap();
        let (min_x1, ..) = doc.pieces[1].bounding_box().unwrap();
        assert!(max_x0 < min_x1, "sheet offsets must separate pieces");
    }

    #[test]
    fn fabric_yield_is_formatted() {
        let doc = assemble("dress", BrandStyle::Flux, &DesignParameters::neutral()).unwrap();
        assert!(doc.fabric_yield.ends_with("m of 150 cm fabric"));
    }
}
