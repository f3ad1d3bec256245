//! Phong-shaded background sphere.
//!
//! The projected disk is covered by a regular polar grid; each cell is
//! filled with a whiteness from a dot-product illumination model against
//! a fixed point light. Cells whose normal faces away from the light
//! clamp to the deep-shadow bound.

use crate::math::{Point2, Vector3};
use crate::scene::primitive::Primitive;
use crate::style::RenderStyle;
use crate::view::ViewState;

/// Unit vector from the sphere center toward the light source.
#[must_use]
pub fn light_direction(view: &ViewState) -> Vector3 {
    let (sin_theta, cos_theta) = view.light_theta.sin_cos();
    let (sin_phi, cos_phi) = view.light_phi.sin_cos();
    Vector3::new(sin_theta * cos_phi, sin_theta * sin_phi, cos_theta)
}

/// Illumination whiteness of the surface point over disk position
/// `(rho, phi)`, with `rho` in sphere-radius units and `phi` in radians.
///
/// The outward surface normal is `(rho cos phi, rho sin phi,
/// sqrt(1 - rho^2))`; its dot product with the light direction maps to
/// `lower + (upper - lower) * dot^2`, clamped to `lower` for negative
/// dot products.
#[must_use]
pub fn shade(rho: f64, phi: f64, view: &ViewState) -> f64 {
    let normal = Vector3::new(
        rho * phi.cos(),
        rho * phi.sin(),
        (1.0 - rho * rho).max(0.0).sqrt(),
    );
    let dot = normal.dot(&light_direction(view));
    if dot < 0.0 {
        view.lower_whiteness
    } else {
        view.lower_whiteness + (view.upper_whiteness - view.lower_whiteness) * dot * dot
    }
}

/// Generates the filled shading cells of the whole disk, inner ring
/// first, each ring swept counterclockwise.
#[must_use]
pub fn shading_cells(view: &ViewState, style: &RenderStyle) -> Vec<Primitive> {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let rho_cells = style.rho_steps.round().max(1.0) as usize;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let phi_cells = style.phi_steps.round().max(1.0) as usize;
    let delta_rho = 1.0 / style.rho_steps.round().max(1.0);
    let delta_phi = std::f64::consts::TAU / style.phi_steps.round().max(1.0);

    let polar = |rho: f64, phi: f64| Point2::new(rho * phi.cos(), rho * phi.sin());

    let mut cells = Vec::with_capacity(rho_cells * phi_cells);
    for i in 0..rho_cells {
        #[allow(clippy::cast_precision_loss)]
        let rho = i as f64 * delta_rho;
        for j in 0..phi_cells {
            #[allow(clippy::cast_precision_loss)]
            let phi = j as f64 * delta_phi;
            let whiteness = shade(rho + delta_rho / 2.0, phi + delta_phi / 2.0, view);
            cells.push(Primitive::FilledQuad {
                corners: [
                    polar(rho, phi),
                    polar(rho + delta_rho, phi),
                    polar(rho + delta_rho, phi + delta_phi),
                    polar(rho, phi + delta_phi),
                ],
                whiteness,
            });
        }
    }
    cells
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn light_direction_is_unit() {
        let view = ViewState::default();
        assert_relative_eq!(light_direction(&view).norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn highlight_under_the_light() {
        // Light straight along +z: the disk center faces it head-on.
        let view = ViewState {
            light_phi: 0.0,
            light_theta: 0.0,
            ..ViewState::default()
        };
        assert_relative_eq!(shade(0.0, 0.0, &view), view.upper_whiteness);
    }

    #[test]
    fn back_facing_cells_clamp_to_lower_bound() {
        // Light in the view plane from three o'clock: cells on the far
        // side of the disk face away from it.
        let view = ViewState {
            light_phi: 0.0,
            light_theta: std::f64::consts::FRAC_PI_2,
            ..ViewState::default()
        };
        let w = shade(0.9, std::f64::consts::PI, &view);
        assert_relative_eq!(w, view.lower_whiteness);
    }

    #[test]
    fn shade_is_quadratic_in_the_dot_product() {
        let view = ViewState {
            light_phi: 0.0,
            light_theta: std::f64::consts::FRAC_PI_2,
            ..ViewState::default()
        };
        // Normal at (rho, 0) is (rho, 0, sqrt(1-rho^2)); dot = rho.
        let rho = 0.6;
        let expected =
            view.lower_whiteness + (view.upper_whiteness - view.lower_whiteness) * rho * rho;
        assert_relative_eq!(shade(rho, 0.0, &view), expected, epsilon = 1e-12);
    }

    #[test]
    fn grid_has_expected_cell_count() {
        let view = ViewState::default();
        let style = RenderStyle {
            rho_steps: 10.0,
            phi_steps: 16.0,
            ..RenderStyle::default()
        };
        let cells = shading_cells(&view, &style);
        assert_eq!(cells.len(), 160);
    }

    #[test]
    fn outer_ring_touches_the_rim() {
        let view = ViewState::default();
        let style = RenderStyle {
            rho_steps: 10.0,
            phi_steps: 8.0,
            ..RenderStyle::default()
        };
        let cells = shading_cells(&view, &style);
        let Primitive::FilledQuad { corners, .. } = cells.last().unwrap() else {
            panic!("expected a filled quad");
        };
        assert_relative_eq!(corners[1].coords.norm(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn whiteness_stays_within_bounds() {
        let view = ViewState::default();
        let style = RenderStyle::default();
        for cell in shading_cells(&view, &style) {
            let Primitive::FilledQuad { whiteness, .. } = cell else {
                panic!("expected a filled quad");
            };
            assert!(whiteness >= view.lower_whiteness - 1e-12);
            assert!(whiteness <= view.upper_whiteness + 1e-12);
        }
    }
}
