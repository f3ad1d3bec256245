//! Transverse tick-mark geometry.
//!
//! A tick is a short segment through a trajectory sample, perpendicular
//! to the local tangent and tangential to the sphere. The transverse
//! offset is a fixed fraction of the sphere radius, independent of the
//! configured visual tick size.

use super::Trajectory;
use crate::error::{GeometryError, Result};
use crate::math::{Point2, Point3, TOLERANCE};
use crate::view::{project, ViewState};

/// Half-length of a tick mark in Stokes space, in sphere-radius units.
pub const TICK_OFFSET: f64 = 0.028213;

/// Computes the two projected endpoints of the tick at sample `k`.
///
/// The tangent is a central difference of the neighboring samples (a
/// one-sided difference at the first and last sample). The in-plane
/// normal is the normalized cross product of the unit Stokes vector with
/// the unit tangent. Endpoints are offset from the unit vector by
/// [`TICK_OFFSET`] along that normal, re-scaled by the sample's original
/// magnitude so the tick sits on the sampled trajectory rather than the
/// idealized sphere, then projected.
///
/// # Errors
///
/// Fails with [`GeometryError::ZeroMagnitudePoint`] for a zero-length
/// sample, [`GeometryError::DegenerateTangent`] when the tangent is
/// zero-length or parallel to the radius vector, and
/// [`GeometryError::NonFiniteProjection`] if a projected coordinate is
/// not finite.
pub fn tick_segment(
    trajectory: &Trajectory,
    k: usize,
    view: &ViewState,
) -> Result<(Point2, Point2)> {
    let points = trajectory.points();
    let n = points.len();
    if n < 2 {
        return Err(GeometryError::DegenerateTangent { index: k }.into());
    }

    let tangent = if k == 0 {
        points[1] - points[0]
    } else if k == n - 1 {
        points[n - 1] - points[n - 2]
    } else {
        points[k + 1] - points[k - 1]
    };
    let tangent_len = tangent.norm();
    if tangent_len < TOLERANCE {
        return Err(GeometryError::DegenerateTangent { index: k }.into());
    }
    let tangent = tangent / tangent_len;

    let magnitude = points[k].coords.norm();
    if magnitude < TOLERANCE {
        return Err(GeometryError::ZeroMagnitudePoint { index: k }.into());
    }
    let unit = points[k].coords / magnitude;

    let normal = unit.cross(&tangent);
    let normal_len = normal.norm();
    if normal_len < TOLERANCE {
        return Err(GeometryError::DegenerateTangent { index: k }.into());
    }
    let normal = normal / normal_len;

    let a = Point3::from((unit + TICK_OFFSET * normal) * magnitude);
    let b = Point3::from((unit - TICK_OFFSET * normal) * magnitude);
    let pa = project(&a, view)?;
    let pb = project(&b, view)?;
    for p in [&pa, &pb] {
        if !p.x.is_finite() || !p.y.is_finite() {
            return Err(GeometryError::NonFiniteProjection { index: k }.into());
        }
    }
    Ok((pa, pb))
}
