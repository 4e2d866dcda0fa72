//! Master pattern blocks.
//!
//! Each block is a named, ordered control-point set in a local mm
//! coordinate space: origin near the piece's functional center
//! (center-front neck for the bodice, cap center for the sleeve,
//! center-front waist for the pant), Y down.
//!
//! Ordering is load-bearing twice over: it defines the polygon winding
//! used to close the path, and annotation anchors are raw-point indices.
//! Point lists are therefore append-only: never reorder or remove
//! entries from an existing block.

use patternkit_core::{ControlPoint, GarmentFamily, SemanticTag};

/// A named master shape from the block library.
#[derive(Debug, Clone)]
pub struct Block {
    /// Piece name as printed on the pattern.
    pub name: &'static str,
    /// Cutting instruction for the piece.
    pub cut_instruction: &'static str,
    /// Ordered control points in local coordinates.
    pub points: Vec<ControlPoint>,
}

/// Front bodice block: half-front drafted from the center-front line,
/// so fit tension moves the side seam while center front stays fixed.
pub fn bodice_front() -> Block {
    Block {
        name: "Bodice Front",
        cut_instruction: "CUT 1 ON FOLD",
        points: vec![
            ControlPoint::tagged(0.0, 0.0, SemanticTag::CenterFront),
            ControlPoint::tagged(55.0, -12.0, SemanticTag::Neckline),
            ControlPoint::tagged(150.0, 10.0, SemanticTag::Shoulder),
            ControlPoint::tagged(185.0, 25.0, SemanticTag::ShoulderTip),
            ControlPoint::tagged(195.0, 110.0, SemanticTag::Armhole),
            ControlPoint::tagged(175.0, 190.0, SemanticTag::Side),
            ControlPoint::tagged(165.0, 330.0, SemanticTag::Waist),
            ControlPoint::tagged(178.0, 440.0, SemanticTag::Hip),
            ControlPoint::tagged(170.0, 540.0, SemanticTag::Hem),
            ControlPoint::tagged(0.0, 540.0, SemanticTag::Hem),
        ],
    }
}

/// One-piece sleeve block, symmetric about the cap center.
pub fn sleeve() -> Block {
    Block {
        name: "Sleeve",
        cut_instruction: "CUT 2",
        points: vec![
            ControlPoint::tagged(0.0, -20.0, SemanticTag::Shoulder),
            ControlPoint::tagged(105.0, 30.0, SemanticTag::Armhole),
            ControlPoint::tagged(125.0, 70.0, SemanticTag::Bicep),
            ControlPoint::tagged(95.0, 290.0, SemanticTag::Side),
            ControlPoint::tagged(80.0, 430.0, SemanticTag::Wrist),
            ControlPoint::tagged(-80.0, 430.0, SemanticTag::Wrist),
            ControlPoint::tagged(-95.0, 290.0, SemanticTag::Side),
            ControlPoint::tagged(-125.0, 70.0, SemanticTag::Bicep),
            ControlPoint::tagged(-105.0, 30.0, SemanticTag::Armhole),
        ],
    }
}

/// Front pant-leg block: center-front waist at the origin, side seam on
/// the +X side, inseam returning through the crotch curve.
pub fn pant_front() -> Block {
    Block {
        name: "Pant Front",
        cut_instruction: "CUT 2",
        points: vec![
            ControlPoint::tagged(0.0, 0.0, SemanticTag::CenterFront),
            ControlPoint::tagged(135.0, 10.0, SemanticTag::Waist),
            ControlPoint::tagged(160.0, 220.0, SemanticTag::Hip),
            ControlPoint::tagged(150.0, 560.0, SemanticTag::Knee),
            ControlPoint::tagged(140.0, 950.0, SemanticTag::Hem),
            ControlPoint::tagged(25.0, 950.0, SemanticTag::HemInseam),
            ControlPoint::tagged(55.0, 560.0, SemanticTag::Knee),
            ControlPoint::tagged(75.0, 300.0, SemanticTag::Crotch),
            ControlPoint::tagged(12.0, 270.0, SemanticTag::Crotch),
        ],
    }
}

/// The blocks a garment family drafts with, in piece order.
pub fn blocks_for(family: GarmentFamily) -> Vec<Block> {
    match family {
        GarmentFamily::Bodice => vec![bodice_front(), sleeve()],
        GarmentFamily::Pant => vec![pant_front()],
    }
}
