//! The deformation engine.
//!
//! Pure per-point scalar transforms driven by the three design sliders.
//! Deformation operates on raw body-relative coordinates; the display
//! ease scale applied by the curved synthesizer is a separate later
//! stage and never leaks in here.

use patternkit_core::{BrandStyle, ControlPoint, DesignParameters};

/// Distortion values at or below this are a strict no-op.
///
/// A deliberate deadband, not a ramp: slider noise near zero must not
/// perturb the draft at all.
pub const DISTORTION_DEADBAND: f64 = 5.0;

/// Gravity at 100 drops gravity-tagged points by this many mm.
pub const GRAVITY_DROP_MM: f64 = 40.0;

/// Full-distortion rise/advance of the architectural shift, in mm.
const SHIFT_RISE_MM: f64 = 30.0;
const SHIFT_ADVANCE_MM: f64 = 20.0;

/// Full-distortion amplitude of the organic pseudo-noise, in mm.
pub const NOISE_AMPLITUDE_MM: f64 = 40.0;

/// Applies the three slider rules to a block's points.
///
/// Pure: same length, same order, new vector. Rules apply additively
/// per point according to its tag:
///
/// - **Fit tension** scales X about the local origin for fit-tagged
///   points (x0.6 skin-tight .. x1.4 oversized), so center front stays
///   put while side seams move.
/// - **Gravity** drops hem/waist/wrist points by up to 40 mm.
/// - **Distortion** is brand-keyed: [`BrandStyle::Atelier`] rigidly
///   shifts shoulder and hem points up and outward;
///   [`BrandStyle::Flux`] adds a deterministic pseudo-noise offset to
///   every point. Reproducible by construction, so any animation jitter
///   belongs to a presentation layer, never here.
pub fn deform(
    points: &[ControlPoint],
    params: &DesignParameters,
    brand: BrandStyle,
) -> Vec<ControlPoint> {
    let fit_scale = params.fit_scale();
    let gravity_drop = (params.gravity / 100.0) * GRAVITY_DROP_MM;
    let distortion = effective_distortion(params);

    points
        .iter()
        .map(|p| {
            let mut x = p.x;
            let mut y = p.y;

            if let Some(tag) = p.tag {
                if tag.scales_with_fit() {
                    x *= fit_scale;
                }
                if tag.drops_with_gravity() {
                    y += gravity_drop;
                }
            }

            if distortion > 0.0 {
                match brand {
                    BrandStyle::Atelier => {
                        if p.tag.map(|t| t.shifts_with_distortion()).unwrap_or(false) {
                            y -= distortion * SHIFT_RISE_MM;
                            x += distortion * SHIFT_ADVANCE_MM;
                        }
                    }
                    BrandStyle::Flux => {
                        let n = organic_offset(x, distortion);
                        x += n;
                        y += n;
                    }
                }
            }

            ControlPoint { x, y, tag: p.tag }
        })
        .collect()
}

/// Distortion as a 0..1 factor, zero inside the deadband.
pub fn effective_distortion(params: &DesignParameters) -> f64 {
    if params.distortion <= DISTORTION_DEADBAND {
        0.0
    } else {
        params.distortion / 100.0
    }
}

/// Deterministic pseudo-noise used by the Flux brand. Keyed on the
/// point's X alone, so identical inputs always displace identically.
fn organic_offset(x: f64, distortion: f64) -> f64 {
    (x * 0.1).sin() * (x * 0.1).cos() * NOISE_AMPLITUDE_MM * distortion
}

#[cfg(test)]
mod tests {
    use super::*;
    use patternkit_core::SemanticTag;

    fn sample_points() -> Vec<ControlPoint> {
        vec![
            ControlPoint::tagged(0.0, 0.0, SemanticTag::CenterFront),
            ControlPoint::tagged(180.0, 25.0, SemanticTag::ShoulderTip),
            ControlPoint::tagged(170.0, 540.0, SemanticTag::Hem),
            ControlPoint::new(90.0, 270.0),
        ]
    }

    #[test]
    fn neutral_params_are_identity() {
        let points = sample_points();
        for brand in [BrandStyle::Atelier, BrandStyle::Flux] {
            let out = deform(&points, &DesignParameters::neutral(), brand);
            assert_eq!(out, points);
        }
    }

    #[test]
    fn fit_scales_only_fit_tags() {
        let points = sample_points();
        let out = deform(&points, &DesignParameters::new(100.0, 0.0, 0.0), BrandStyle::Atelier);
        // shoulder tip scaled x1.4, everything else untouched
        assert!((out[1].x - 180.0 * 1.4).abs() < 1e-9);
        assert_eq!(out[0].x, 0.0);
        assert_eq!(out[2].x, 170.0);
        assert_eq!(out[3].x, 90.0);
    }

    #[test]
    fn gravity_drops_hem() {
        let points = sample_points();
        let out = deform(&points, &DesignParameters::new(50.0, 60.0, 0.0), BrandStyle::Atelier);
        assert!((out[2].y - (540.0 + 24.0)).abs() < 1e-9);
        assert_eq!(out[1].y, 25.0);
    }

    #[test]
    fn distortion_deadband_is_a_noop() {
        let points = sample_points();
        for brand in [BrandStyle::Atelier, BrandStyle::Flux] {
            let at_zero = deform(&points, &DesignParameters::new(50.0, 0.0, 0.0), brand);
            let at_five = deform(&points, &DesignParameters::new(50.0, 0.0, 5.0), brand);
            assert_eq!(at_zero, at_five);
        }
    }

    #[test]
    fn atelier_shift_is_rigid() {
        let points = sample_points();
        let out = deform(&points, &DesignParameters::new(50.0, 0.0, 100.0), BrandStyle::Atelier);
        // hem point rises 30mm and advances 20mm
        assert!((out[2].y - (540.0 - 30.0)).abs() < 1e-9);
        assert!((out[2].x - (170.0 + 20.0)).abs() < 1e-9);
        // untagged point untouched
        assert_eq!(out[3], points[3]);
    }

    #[test]
    fn flux_noise_is_reproducible() {
        let points = sample_points();
        let params = DesignParameters::new(50.0, 0.0, 40.0);
        let a = deform(&points, &params, BrandStyle::Flux);
        let b = deform(&points, &params, BrandStyle::Flux);
        assert_eq!(a, b);
        // and it touches every point, tagged or not
        assert_ne!(a[3], points[3]);
    }
}
