use crate::math::Point3;

/// Maximum number of user-specified arrows per invocation.
pub const MAX_ARROWS: usize = 24;

/// Stroke pattern of a path or arrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
}

/// Presentation parameters, fixed for the whole run.
///
/// Purely visual: nothing here changes which geometry is produced, only
/// how the emitted primitives are styled.
#[derive(Debug, Clone)]
pub struct RenderStyle {
    /// Sphere radius in millimetres.
    pub radius_mm: f64,
    /// Pen thickness for trajectory paths, in points.
    pub path_thickness: f64,
    /// Pen thickness for arrows and coordinate axes, in points.
    pub arrow_thickness: f64,
    /// Opening angle of arrow heads, in degrees.
    pub arrow_head_angle: f64,
    /// Visual tick-mark size in points. Configurable, but the transverse
    /// tick offset in Stokes space is a fixed constant; see
    /// `trajectory::tick`.
    pub tick_size: f64,
    /// Draw hidden sub-paths dashed black instead of solid gray.
    pub hidden_dashed: bool,
    /// Whiteness of solid hidden strokes and of hidden tick marks,
    /// `0.0` black to `1.0` white.
    pub hidden_graytone: f64,
    /// Smooth (C1-continuous) joins instead of straight segments.
    pub bezier: bool,
    /// Render the last run of each trajectory as a directional arrow.
    pub paths_as_arrows: bool,
    /// Reverse the direction of trajectory arrows.
    pub reverse_arrows: bool,
    /// Shading grid resolution: radial bin count.
    pub rho_steps: f64,
    /// Shading grid resolution: angular bin count.
    pub phi_steps: f64,
    /// Negative and positive axis lengths, per axis, in sphere radii.
    pub axis_lengths: [(f64, f64); 3],
    /// Axis labels; `None` selects `S_k` (or `S_k/S_0` when normalizing).
    pub axis_labels: Option<[String; 3]>,
    /// Draw the dashed in-sphere part of each coordinate axis.
    pub axes_inside_sphere: bool,
    /// Overlay-frame axis lengths, in sphere radii.
    pub overlay_axis_lengths: [(f64, f64); 3],
    /// Overlay-frame axis labels; only axes with a label are drawn.
    pub overlay_axis_labels: [Option<String>; 3],
}

impl Default for RenderStyle {
    fn default() -> Self {
        const AXIS_LENGTH: (f64, f64) = (0.1, 1.5);
        Self {
            radius_mm: 6.0,
            path_thickness: 1.0,
            arrow_thickness: 0.6,
            arrow_head_angle: 30.0,
            tick_size: 4.0,
            hidden_dashed: false,
            hidden_graytone: 0.65,
            bezier: false,
            paths_as_arrows: false,
            reverse_arrows: false,
            rho_steps: 50.0,
            phi_steps: 80.0,
            axis_lengths: [AXIS_LENGTH; 3],
            axis_labels: None,
            axes_inside_sphere: false,
            overlay_axis_lengths: [AXIS_LENGTH; 3],
            overlay_axis_labels: [None, None, None],
        }
    }
}

impl RenderStyle {
    /// Label text for primary axis `k` (0-based), honoring the
    /// user-supplied labels and the normalization flag.
    #[must_use]
    pub fn axis_label(&self, k: usize, normalize: bool) -> String {
        match &self.axis_labels {
            Some(labels) => labels[k].clone(),
            None if normalize => format!("S_{}/S_0", k + 1),
            None => format!("S_{}", k + 1),
        }
    }
}

/// One user-specified arrow between two Stokes-space points.
#[derive(Debug, Clone)]
pub struct ArrowSpec {
    pub from: Point3,
    pub to: Point3,
    pub line_style: LineStyle,
    /// `0.0` white to `1.0` black.
    pub blackness: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_axis_labels() {
        let style = RenderStyle::default();
        assert_eq!(style.axis_label(0, false), "S_1");
        assert_eq!(style.axis_label(2, false), "S_3");
        assert_eq!(style.axis_label(1, true), "S_2/S_0");
    }

    #[test]
    fn user_axis_labels_win_over_normalization() {
        let style = RenderStyle {
            axis_labels: Some(["a".into(), "b".into(), "c".into()]),
            ..RenderStyle::default()
        };
        assert_eq!(style.axis_label(1, true), "b");
    }
}
