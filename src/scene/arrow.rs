//! Great-circle arrow geometry.
//!
//! The shortest arc between two sphere-normalized points is approximated
//! by linear interpolation followed by renormalization onto the unit
//! sphere. The arc is split at `t = 0.5` so the emitter can attach an
//! arrow head at the true midpoint of the first half.

use crate::error::{GeometryError, Result};
use crate::math::{Point3, TOLERANCE};

/// Number of interpolation intervals per arc half.
pub const HALF_STEPS: usize = 25;

/// Computes the two halves of the geodesic arc from `a` to `b`, as
/// ordered unit-sphere point lists sharing the midpoint sample.
///
/// Both endpoints are normalized onto the unit sphere first; every
/// interpolated point is renormalized before use.
///
/// # Errors
///
/// Fails with [`GeometryError::ZeroMagnitude`] if either endpoint has
/// zero length, or if an interpolated point does (antipodal endpoints,
/// whose midpoint direction is undefined).
pub fn geodesic_halves(
    a: &Point3,
    b: &Point3,
    steps: usize,
) -> Result<(Vec<Point3>, Vec<Point3>)> {
    let a = normalized(a)?;
    let b = normalized(b)?;

    let sample = |t: f64| -> Result<Point3> {
        let p = Point3::from(a.coords * (1.0 - t) + b.coords * t);
        normalized(&p)
    };

    let mut first = Vec::with_capacity(steps + 1);
    let mut second = Vec::with_capacity(steps + 1);
    #[allow(clippy::cast_precision_loss)]
    for i in 0..=steps {
        let fraction = i as f64 / steps as f64;
        first.push(sample(0.5 * fraction)?);
        second.push(sample(0.5 + 0.5 * fraction)?);
    }
    Ok((first, second))
}

fn normalized(p: &Point3) -> Result<Point3> {
    let norm = p.coords.norm();
    if norm < TOLERANCE {
        return Err(GeometryError::ZeroMagnitude.into());
    }
    Ok(Point3::from(p.coords / norm))
}
