//! The drawing-primitive model handed to the emission layer.
//!
//! All coordinates are in sphere-radius units on the 2D view plane; the
//! emitter scales by the configured radius. Whiteness values run from
//! `0.0` (black) to `1.0` (white).

use crate::math::Point2;
use crate::trajectory::Anchor;

/// A single drawing operation. The order of primitives in a scene is
/// the order in which they reach the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// A filled quadrilateral, used for the sphere shading cells.
    FilledQuad {
        corners: [Point2; 4],
        whiteness: f64,
    },
    /// A stroked polyline or curve.
    Stroke(Stroke),
    /// A text label anchored at a point.
    Text {
        text: String,
        anchor: Anchor,
        at: Point2,
    },
}

/// A stroked sub-path with its style attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub points: Vec<Point2>,
    /// Pen thickness in points.
    pub thickness: f64,
    /// `0.0` black to `1.0` white.
    pub whiteness: f64,
    pub dashed: bool,
    /// Smooth (C1-continuous) joins instead of straight segments.
    pub smooth: bool,
    /// Terminate the stroke with an arrow head.
    pub arrow: bool,
    /// Arrow-head opening angle in degrees; `None` keeps the emitter's
    /// default.
    pub head_angle: Option<f64>,
}

impl Stroke {
    /// A plain solid black stroke through `points`.
    #[must_use]
    pub fn solid(points: Vec<Point2>, thickness: f64) -> Self {
        Self {
            points,
            thickness,
            whiteness: 0.0,
            dashed: false,
            smooth: false,
            arrow: false,
            head_angle: None,
        }
    }
}
