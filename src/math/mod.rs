/// 2D point type (projected screen coordinates, sphere-radius units).
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type (Stokes-parameter space).
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for zero-vector and degeneracy guards.
pub const TOLERANCE: f64 = 1e-10;

/// Converts an angle given in radians to degrees.
#[must_use]
pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / std::f64::consts::PI
}
