use crate::error::{GeometryError, Result};
use crate::math::{Point2, Point3, TOLERANCE};

/// Orientation and illumination of the sphere, fixed for the whole run.
///
/// The sphere is rotated by the Euler angles `psi` (about the z-axis,
/// first) and `phi` (about the y-axis, second), then projected in
/// parallel onto the view plane. An optional second frame, rotated by
/// `(psi + delta_psi, phi + delta_phi)`, shares the same sphere.
#[derive(Debug, Clone)]
pub struct ViewState {
    /// First rotation angle, about the z-axis (radians).
    pub psi: f64,
    /// Second rotation angle, about the y-axis (radians).
    pub phi: f64,
    /// Extra rotation of the overlay frame, `None` if no overlay is drawn.
    pub overlay: Option<(f64, f64)>,
    /// Divide projected coordinates by `|p|` (plot `S_k/S_0`).
    pub normalize: bool,
    /// Azimuth of the light source, counterclockwise from three o'clock
    /// as seen by the observer (radians).
    pub light_phi: f64,
    /// Angle between light source and observer, seen from the sphere
    /// center (radians).
    pub light_theta: f64,
    /// Whiteness of the deepest shadow, in `[0, 1]`.
    pub lower_whiteness: f64,
    /// Whiteness of the brightest highlight, in `[0, 1]`.
    pub upper_whiteness: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            psi: (-40.0f64).to_radians(),
            phi: 15.0f64.to_radians(),
            overlay: None,
            normalize: false,
            light_phi: 30.0f64.to_radians(),
            light_theta: 30.0f64.to_radians(),
            lower_whiteness: 0.75,
            upper_whiteness: 0.99,
        }
    }
}

impl ViewState {
    /// Angles of the overlay frame, `(psi + delta_psi, phi + delta_phi)`.
    ///
    /// Returns `None` when no overlay frame was requested.
    #[must_use]
    pub fn overlay_angles(&self) -> Option<(f64, f64)> {
        self.overlay
            .map(|(dpsi, dphi)| (self.psi + dpsi, self.phi + dphi))
    }
}

/// Projects a Stokes-space point onto the 2D view plane.
///
/// `x = s1 sin(psi) + s2 cos(psi)`,
/// `y = -s1 cos(psi) sin(phi) + s2 sin(psi) sin(phi) + s3 cos(phi)`.
///
/// With normalization enabled both coordinates are divided by `|p|`,
/// placing the projection on the unit sphere.
///
/// Every consumer of screen coordinates (trajectories, tick marks,
/// arrows, axes) must go through this single definition.
///
/// # Errors
///
/// Returns [`GeometryError::ZeroMagnitude`] when normalization is
/// requested for a zero-length point, whose direction is undefined.
pub fn project(p: &Point3, view: &ViewState) -> Result<Point2> {
    project_with_angles(p, view.psi, view.phi, view.normalize)
}

/// [`project`] with explicit frame angles, used by the overlay frame.
///
/// # Errors
///
/// Same contract as [`project`].
pub fn project_with_angles(p: &Point3, psi: f64, phi: f64, normalize: bool) -> Result<Point2> {
    let (sin_psi, cos_psi) = psi.sin_cos();
    let (sin_phi, cos_phi) = phi.sin_cos();
    let mut x = p.x * sin_psi + p.y * cos_psi;
    let mut y = -p.x * cos_psi * sin_phi + p.y * sin_psi * sin_phi + p.z * cos_phi;
    if normalize {
        let norm = p.coords.norm();
        if norm < TOLERANCE {
            return Err(GeometryError::ZeroMagnitude.into());
        }
        x /= norm;
        y /= norm;
    }
    Ok(Point2::new(x, y))
}

/// Classifies a Stokes-space point against the visible hemisphere.
///
/// The point is visible iff its signed projection onto the outward
/// normal toward the viewer is non-negative:
/// `s1 cos(psi) cos(phi) - s2 sin(psi) cos(phi) + s3 sin(phi) >= 0`.
///
/// Points exactly on the terminator classify as visible; this tie-break
/// keeps the segmentation deterministic and must not change.
#[must_use]
pub fn is_visible(p: &Point3, view: &ViewState) -> bool {
    visibility_score(p, view) >= 0.0
}

/// The signed scalar behind [`is_visible`], exposed for diagnostics.
#[must_use]
pub fn visibility_score(p: &Point3, view: &ViewState) -> f64 {
    let (sin_psi, cos_psi) = view.psi.sin_cos();
    let (sin_phi, cos_phi) = view.phi.sin_cos();
    p.x * cos_psi * cos_phi - p.y * sin_psi * cos_phi + p.z * sin_phi
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn frontal_view() -> ViewState {
        ViewState {
            psi: 0.0,
            phi: 0.0,
            ..ViewState::default()
        }
    }

    #[test]
    fn project_canonical_points_no_rotation() {
        let view = frontal_view();
        let p = project(&Point3::new(0.0, 1.0, 0.0), &view).unwrap();
        assert_relative_eq!(p.x, 1.0);
        assert_relative_eq!(p.y, 0.0);

        let p = project(&Point3::new(0.0, 0.0, 1.0), &view).unwrap();
        assert_relative_eq!(p.x, 0.0);
        assert_relative_eq!(p.y, 1.0);

        // The s1 axis points straight at the viewer and collapses to origin.
        let p = project(&Point3::new(1.0, 0.0, 0.0), &view).unwrap();
        assert_relative_eq!(p.x, 0.0);
        assert_relative_eq!(p.y, 0.0);
    }

    #[test]
    fn project_rotated_matches_formula() {
        let view = ViewState {
            psi: 0.7,
            phi: -0.3,
            ..ViewState::default()
        };
        let s = Point3::new(0.2, -1.1, 0.4);
        let p = project(&s, &view).unwrap();
        assert_relative_eq!(p.x, 0.2 * 0.7f64.sin() + (-1.1) * 0.7f64.cos());
        assert_relative_eq!(
            p.y,
            -0.2 * 0.7f64.cos() * (-0.3f64).sin()
                + (-1.1) * 0.7f64.sin() * (-0.3f64).sin()
                + 0.4 * (-0.3f64).cos()
        );
    }

    #[test]
    fn project_normalized_lands_on_unit_circle() {
        let view = ViewState {
            psi: 0.0,
            phi: 0.0,
            normalize: true,
            ..ViewState::default()
        };
        let p = project(&Point3::new(0.0, 5.0, 0.0), &view).unwrap();
        assert_relative_eq!(p.x, 1.0);
        assert_relative_eq!(p.y, 0.0);
    }

    #[test]
    fn project_zero_point_with_normalization_fails() {
        let view = ViewState {
            normalize: true,
            ..frontal_view()
        };
        assert!(project(&Point3::origin(), &view).is_err());
    }

    #[test]
    fn terminator_ties_classify_visible() {
        // With psi = phi = 0 the score reduces to s1, so any point in the
        // s2/s3 plane sits exactly on the terminator.
        let view = frontal_view();
        assert!(is_visible(&Point3::new(0.0, 0.3, -0.8), &view));
        assert!(is_visible(&Point3::new(0.0, 0.0, 0.0), &view));
    }

    #[test]
    fn flipping_score_sign_flips_classification() {
        let view = ViewState {
            psi: 0.4,
            phi: 0.9,
            ..ViewState::default()
        };
        let p = Point3::new(0.3, -0.2, 0.5);
        let score = visibility_score(&p, &view);
        assert!(score.abs() > TOLERANCE);
        let mirrored = Point3::new(-p.x, -p.y, -p.z);
        assert_ne!(is_visible(&p, &view), is_visible(&mirrored, &view));
    }

    #[test]
    fn overlay_angles_sum() {
        let view = ViewState {
            psi: 0.5,
            phi: 0.25,
            overlay: Some((0.1, -0.05)),
            ..ViewState::default()
        };
        let (psi, phi) = view.overlay_angles().unwrap();
        assert_relative_eq!(psi, 0.6);
        assert_relative_eq!(phi, 0.2);
    }
}
