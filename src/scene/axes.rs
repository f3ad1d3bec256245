//! Equators and coordinate axes of the sphere, for the primary frame
//! and the optional overlay frame.

use crate::error::Result;
use crate::math::{Point2, Point3};
use crate::scene::primitive::{Primitive, Stroke};
use crate::style::RenderStyle;
use crate::trajectory::Anchor;
use crate::view::{project_with_angles, ViewState};

/// Whiteness of the equator strokes (0.45 toward black).
const EQUATOR_WHITENESS: f64 = 0.55;

/// Whiteness of the dashed in-sphere axis segments (0.85 toward black).
const INSIDE_AXIS_WHITENESS: f64 = 0.15;

/// Sample count for one equator half-ellipse.
const EQUATOR_SAMPLES: usize = 48;

/// The projected equators `S1 = 0`, `S2 = 0` and `S3 = 0` for the frame
/// rotated by `(psi, phi)`.
///
/// Each equator projects to a half ellipse: a unit half circle y-scaled
/// by the foreshortening of its plane and rotated into place, using
/// `alpha = atan(sin phi * tan psi)` and `beta = atan(sin phi / tan psi)`.
#[must_use]
pub fn equators(psi: f64, phi: f64, style: &RenderStyle) -> Vec<Primitive> {
    let alpha = (phi.sin() * psi.tan()).atan();
    let beta = {
        let b = (phi.sin() / psi.tan()).atan();
        if b.is_nan() {
            0.0
        } else {
            b
        }
    };
    let arcs = [
        // S3 = 0.
        (phi.sin(), 180.0f64.to_radians()),
        // S2 = 0.
        (phi.cos() * psi.sin(), 270.0f64.to_radians() + alpha),
        // S1 = 0.
        (phi.cos() * psi.cos(), 270.0f64.to_radians() - beta),
    ];
    arcs.iter()
        .map(|&(yscale, rotation)| {
            Primitive::Stroke(Stroke {
                points: half_ellipse(yscale, rotation),
                thickness: style.arrow_thickness,
                whiteness: EQUATOR_WHITENESS,
                dashed: false,
                smooth: true,
                arrow: false,
                head_angle: None,
            })
        })
        .collect()
}

/// Samples the upper unit half circle, y-scaled then rotated.
fn half_ellipse(yscale: f64, rotation: f64) -> Vec<Point2> {
    let (sin_rot, cos_rot) = rotation.sin_cos();
    (0..=EQUATOR_SAMPLES)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let angle = std::f64::consts::PI * i as f64 / EQUATOR_SAMPLES as f64;
            let (x, y) = (angle.cos(), yscale * angle.sin());
            Point2::new(x * cos_rot - y * sin_rot, x * sin_rot + y * cos_rot)
        })
        .collect()
}

/// The three coordinate axes of the frame rotated by `(psi, phi)`.
///
/// Each axis is an arrow stroke from the sphere intersection to the tip
/// at `pos_len` sphere radii, preceded (when enabled) by a dashed gray
/// segment from `-neg_len` through the sphere, and followed by its
/// label. For the overlay frame only axes with an explicit label are
/// drawn, so a frame sharing an axis with the primary one does not
/// draw it twice.
///
/// # Errors
///
/// Propagates projection failures from degenerate axis directions; unit
/// axes cannot trigger them in practice.
pub fn coordinate_axes(
    psi: f64,
    phi: f64,
    view: &ViewState,
    style: &RenderStyle,
    overlay: bool,
) -> Result<Vec<Primitive>> {
    let mut primitives = Vec::new();
    let overlay_anchors = [Anchor::Bottom, Anchor::Bottom, Anchor::Top];

    for k in 0..3 {
        let label = if overlay {
            match &style.overlay_axis_labels[k] {
                Some(text) => text.clone(),
                None => continue,
            }
        } else {
            style.axis_label(k, view.normalize)
        };

        let mut axis = Point3::origin();
        axis[k] = 1.0;
        let tip = project_with_angles(&axis, psi, phi, false)?;
        let (neg_len, pos_len) = if overlay {
            style.overlay_axis_lengths[k]
        } else {
            style.axis_lengths[k]
        };

        if style.axes_inside_sphere {
            primitives.push(Primitive::Stroke(Stroke {
                points: vec![Point2::new(-neg_len * tip.x, -neg_len * tip.y), tip],
                thickness: style.arrow_thickness,
                whiteness: INSIDE_AXIS_WHITENESS,
                dashed: true,
                smooth: false,
                arrow: false,
                head_angle: None,
            }));
        }

        primitives.push(Primitive::Stroke(Stroke {
            points: vec![tip, Point2::new(pos_len * tip.x, pos_len * tip.y)],
            thickness: style.arrow_thickness,
            whiteness: 0.0,
            dashed: false,
            smooth: false,
            arrow: true,
            head_angle: None,
        }));

        let anchor = if overlay {
            overlay_anchors[k]
        } else {
            Anchor::UpperRight
        };
        primitives.push(Primitive::Text {
            text: label,
            anchor,
            at: Point2::new(pos_len * tip.x, pos_len * tip.y),
        });
    }
    Ok(primitives)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn three_equators_per_frame() {
        let style = RenderStyle::default();
        let arcs = equators(0.3, 0.2, &style);
        assert_eq!(arcs.len(), 3);
        for arc in &arcs {
            let Primitive::Stroke(stroke) = arc else {
                panic!("expected a stroke");
            };
            assert!(stroke.smooth);
            assert_eq!(stroke.points.len(), EQUATOR_SAMPLES + 1);
        }
    }

    #[test]
    fn outline_equator_at_frontal_view() {
        // With psi = phi = 0 the S1 = 0 equator is the sphere outline:
        // yscale 1, so every sample sits on the unit circle.
        let style = RenderStyle::default();
        let arcs = equators(0.0, 0.0, &style);
        let Primitive::Stroke(outline) = &arcs[2] else {
            panic!("expected a stroke");
        };
        for p in &outline.points {
            assert_relative_eq!(p.coords.norm(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn flat_equators_collapse_to_segments() {
        // At the frontal view the S3 = 0 and S2 = 0 planes are seen
        // edge-on: yscale 0, all samples on a diameter.
        let style = RenderStyle::default();
        let arcs = equators(0.0, 0.0, &style);
        for arc in &arcs[0..2] {
            let Primitive::Stroke(stroke) = arc else {
                panic!("expected a stroke");
            };
            for p in &stroke.points {
                assert!(p.coords.norm() <= 1.0 + 1e-12);
            }
        }
    }

    #[test]
    fn primary_axes_have_strokes_and_labels() {
        let view = ViewState::default();
        let style = RenderStyle::default();
        let prims = coordinate_axes(view.psi, view.phi, &view, &style, false).unwrap();
        // Per axis: arrow stroke + label (inside segment disabled).
        assert_eq!(prims.len(), 6);
        let texts: Vec<_> = prims
            .iter()
            .filter_map(|p| match p {
                Primitive::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["S_1", "S_2", "S_3"]);
    }

    #[test]
    fn inside_segments_are_dashed_gray() {
        let view = ViewState::default();
        let style = RenderStyle {
            axes_inside_sphere: true,
            ..RenderStyle::default()
        };
        let prims = coordinate_axes(view.psi, view.phi, &view, &style, false).unwrap();
        assert_eq!(prims.len(), 9);
        let Primitive::Stroke(inside) = &prims[0] else {
            panic!("expected a stroke");
        };
        assert!(inside.dashed);
        assert_relative_eq!(inside.whiteness, INSIDE_AXIS_WHITENESS);
    }

    #[test]
    fn overlay_draws_only_labelled_axes() {
        let view = ViewState {
            overlay: Some((0.1, 0.05)),
            ..ViewState::default()
        };
        let style = RenderStyle {
            overlay_axis_labels: [Some("w_1".into()), None, Some("w_3".into())],
            ..RenderStyle::default()
        };
        let (psi, phi) = view.overlay_angles().unwrap();
        let prims = coordinate_axes(psi, phi, &view, &style, true).unwrap();
        // Two labelled axes, arrow stroke + label each.
        assert_eq!(prims.len(), 4);
        let texts: Vec<_> = prims
            .iter()
            .filter_map(|p| match p {
                Primitive::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["w_1", "w_3"]);
    }

    #[test]
    fn axis_tip_matches_projection() {
        let view = ViewState::default();
        let style = RenderStyle::default();
        let prims = coordinate_axes(view.psi, view.phi, &view, &style, false).unwrap();
        let Primitive::Stroke(s1_arrow) = &prims[0] else {
            panic!("expected a stroke");
        };
        let expected = project_with_angles(
            &Point3::new(1.0, 0.0, 0.0),
            view.psi,
            view.phi,
            false,
        )
        .unwrap();
        assert_relative_eq!(s1_arrow.points[0].x, expected.x);
        assert_relative_eq!(s1_arrow.points[0].y, expected.y);
    }
}
