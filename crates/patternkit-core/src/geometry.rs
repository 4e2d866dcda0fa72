//! Geometric primitives for pattern drafting.
//!
//! Coordinates are millimeters in a Y-down drafting space: the origin of
//! each block sits near the piece's functional center (center front, cap
//! center) and Y grows toward the hem.

use serde::{Deserialize, Serialize};

/// Anatomical role of a control point.
///
/// Tags drive which deformation rules apply to a point. The set is
/// closed: blocks only ever use these roles, and the deformation engine
/// matches on the predicate methods rather than on individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SemanticTag {
    /// Center-front line; never displaced horizontally.
    CenterFront,
    /// Neckline curve point.
    Neckline,
    /// Shoulder seam point.
    Shoulder,
    /// Outer shoulder tip at the armhole.
    ShoulderTip,
    /// Armhole curve point.
    Armhole,
    /// Side seam point.
    Side,
    /// Upper-arm circumference point on a sleeve.
    Bicep,
    /// Hip line point.
    Hip,
    /// Waistline point.
    Waist,
    /// Sleeve wrist point.
    Wrist,
    /// Outer hemline point.
    Hem,
    /// Hemline point on the inseam side of a pant leg.
    HemInseam,
    /// Crotch curve point on a pant block.
    Crotch,
    /// Knee line point on a pant block.
    Knee,
}

impl SemanticTag {
    /// Whether fit tension scales this point's X about the local origin.
    pub fn scales_with_fit(&self) -> bool {
        matches!(
            self,
            SemanticTag::Side
                | SemanticTag::ShoulderTip
                | SemanticTag::Armhole
                | SemanticTag::Bicep
                | SemanticTag::Hip
        )
    }

    /// Whether gravity drops this point's Y.
    pub fn drops_with_gravity(&self) -> bool {
        matches!(
            self,
            SemanticTag::Hem | SemanticTag::HemInseam | SemanticTag::Waist | SemanticTag::Wrist
        )
    }

    /// Whether the architectural (rigid) distortion displaces this point.
    pub fn shifts_with_distortion(&self) -> bool {
        matches!(
            self,
            SemanticTag::Shoulder | SemanticTag::Hem | SemanticTag::HemInseam
        )
    }

    /// Tag as a lowercase string, for annotations and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticTag::CenterFront => "center-front",
            SemanticTag::Neckline => "neckline",
            SemanticTag::Shoulder => "shoulder",
            SemanticTag::ShoulderTip => "shoulder-tip",
            SemanticTag::Armhole => "armhole",
            SemanticTag::Side => "side",
            SemanticTag::Bicep => "bicep",
            SemanticTag::Hip => "hip",
            SemanticTag::Waist => "waist",
            SemanticTag::Wrist => "wrist",
            SemanticTag::Hem => "hem",
            SemanticTag::HemInseam => "hem-inseam",
            SemanticTag::Crotch => "crotch",
            SemanticTag::Knee => "knee",
        }
    }
}

/// A single drafted control point.
///
/// Control points are immutable once produced: every transform stage
/// yields a new point set, so ghost/historical states can coexist.
/// Block ordering is significant and append-only: the index of a point
/// within its block is what downstream annotations key on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub x: f64,
    pub y: f64,
    /// Anatomical role; untagged points pass through all deformations.
    pub tag: Option<SemanticTag>,
}

impl ControlPoint {
    /// Creates an untagged control point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, tag: None }
    }

    /// Creates a tagged control point.
    pub fn tagged(x: f64, y: f64, tag: SemanticTag) -> Self {
        Self { x, y, tag: Some(tag) }
    }

    /// Returns a copy displaced by the given deltas, tag preserved.
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            tag: self.tag,
        }
    }

    /// Calculates the distance to another point.
    pub fn distance_to(&self, other: &ControlPoint) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// One command in a vector path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    /// Move the pen without drawing.
    MoveTo { x: f64, y: f64 },
    /// Straight segment to the given point.
    LineTo { x: f64, y: f64 },
    /// Quadratic Bezier to `(x, y)` with control point `(cx, cy)`.
    QuadTo { cx: f64, cy: f64, x: f64, y: f64 },
    /// Close the current subpath.
    Close,
}

/// A drawable vector path: an ordered command sequence.
///
/// This is the derived, render-ready form of a piece's geometry; the
/// authoritative geometry stays in the piece's `raw_points`. Live
/// preview consumes the SVG rendering; exporters go back to the raw
/// points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorPath {
    pub commands: Vec<PathCommand>,
}

impl VectorPath {
    /// Creates an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a command.
    pub fn push(&mut self, cmd: PathCommand) {
        self.commands.push(cmd);
    }

    /// Whether the path ends with a close command.
    pub fn is_closed(&self) -> bool {
        matches!(self.commands.last(), Some(PathCommand::Close))
    }

    /// Number of quadratic segments in the path.
    pub fn quad_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, PathCommand::QuadTo { .. }))
            .count()
    }

    /// Renders the path as an SVG path-data string.
    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        for cmd in &self.commands {
            match cmd {
                PathCommand::MoveTo { x, y } => {
                    out.push_str(&format!("M {:.2} {:.2} ", x, y));
                }
                PathCommand::LineTo { x, y } => {
                    out.push_str(&format!("L {:.2} {:.2} ", x, y));
                }
                PathCommand::QuadTo { cx, cy, x, y } => {
                    out.push_str(&format!("Q {:.2} {:.2} {:.2} {:.2} ", cx, cy, x, y));
                }
                PathCommand::Close => out.push_str("Z "),
            }
        }
        out.trim_end().to_string()
    }
}

/// Grainline reference for a piece: a vertical line from `(x, y)` of the
/// given length, indicating fabric thread direction for cutting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grainline {
    pub x: f64,
    pub y: f64,
    pub length: f64,
}

impl Grainline {
    /// Creates a grainline anchored at `(x, y)`.
    pub fn new(x: f64, y: f64, length: f64) -> Self {
        Self { x, y, length }
    }

    /// End point of the grainline segment.
    pub fn end(&self) -> (f64, f64) {
        (self.x, self.y + self.length)
    }
}

/// Axis-aligned bounding box over a point set.
///
/// Returns `None` for an empty set; exporters use this to skip
/// zero-geometry pieces instead of erroring.
pub fn bounding_box(points: &[ControlPoint]) -> Option<(f64, f64, f64, f64)> {
    let first = points.first()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    Some((min_x, min_y, max_x, max_y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_predicates_partition_roles() {
        assert!(SemanticTag::Side.scales_with_fit());
        assert!(SemanticTag::Bicep.scales_with_fit());
        assert!(!SemanticTag::CenterFront.scales_with_fit());

        assert!(SemanticTag::Hem.drops_with_gravity());
        assert!(SemanticTag::Wrist.drops_with_gravity());
        assert!(!SemanticTag::Shoulder.drops_with_gravity());

        assert!(SemanticTag::Shoulder.shifts_with_distortion());
        assert!(SemanticTag::HemInseam.shifts_with_distortion());
        assert!(!SemanticTag::Armhole.shifts_with_distortion());
    }

    #[test]
    fn offset_preserves_tag() {
        let p = ControlPoint::tagged(10.0, 20.0, SemanticTag::Hem);
        let q = p.offset(5.0, -3.0);
        assert_eq!(q.x, 15.0);
        assert_eq!(q.y, 17.0);
        assert_eq!(q.tag, Some(SemanticTag::Hem));
    }

    #[test]
    fn svg_rendering() {
        let mut path = VectorPath::new();
        path.push(PathCommand::MoveTo { x: 0.0, y: 0.0 });
        path.push(PathCommand::LineTo { x: 10.0, y: 0.0 });
        path.push(PathCommand::QuadTo {
            cx: 15.0,
            cy: 5.0,
            x: 10.0,
            y: 10.0,
        });
        path.push(PathCommand::Close);
        assert_eq!(path.to_svg(), "M 0.00 0.00 L 10.00 0.00 Q 15.00 5.00 10.00 10.00 Z");
        assert!(path.is_closed());
        assert_eq!(path.quad_count(), 1);
    }

    #[test]
    fn bounding_box_of_points() {
        let pts = vec![
            ControlPoint::new(0.0, 0.0),
            ControlPoint::new(30.0, -5.0),
            ControlPoint::new(12.0, 40.0),
        ];
        assert_eq!(bounding_box(&pts), Some((0.0, -5.0, 30.0, 40.0)));
        assert_eq!(bounding_box(&[]), None);
    }
}
