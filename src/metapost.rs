//! MetaPost emission backend.
//!
//! Renders the ordered primitive sequence into a MetaPost source
//! document. Primitives carry unit-sphere coordinates; every drawn path
//! is scaled by `radius` at the draw site, so the numeric preamble is
//! the only place where the physical size appears.

use std::io::{self, Write};

use crate::math::rad_to_deg;
use crate::scene::primitive::{Primitive, Stroke};
use crate::scene::Scene;
use crate::style::RenderStyle;
use crate::view::ViewState;

/// MetaPost's built-in default arrow-head angle, restored after any
/// stroke that overrides it.
const DEFAULT_AHANGLE: f64 = 45.0;

/// Coordinate pairs written per output line in path statements.
const COORDS_PER_LINE: usize = 3;

/// Writes the complete MetaPost document for a scene.
///
/// # Errors
///
/// Propagates I/O errors from the sink.
pub fn write_document<W: Write>(
    out: &mut W,
    scene: &Scene,
    view: &ViewState,
    style: &RenderStyle,
    aux_source: Option<&str>,
) -> io::Result<()> {
    write_header(out, view, style)?;
    writeln!(out, "beginfig(1);")?;
    writeln!(out, "  path p;")?;

    let mut thickness: Option<f64> = None;
    for primitive in &scene.primitives {
        match primitive {
            Primitive::FilledQuad { corners, whiteness } => {
                write!(out, "  fill (")?;
                for corner in corners {
                    write!(out, "({:.4},{:.4})--", corner.x, corner.y)?;
                }
                writeln!(
                    out,
                    "cycle) scaled radius withcolor {whiteness:.6}[black,white];"
                )?;
            }
            Primitive::Stroke(stroke) => {
                if thickness != Some(stroke.thickness) {
                    writeln!(
                        out,
                        "  pickup pencircle scaled {:.4}pt;",
                        stroke.thickness
                    )?;
                    thickness = Some(stroke.thickness);
                }
                write_stroke(out, stroke)?;
            }
            Primitive::Text { text, anchor, at } => {
                writeln!(
                    out,
                    "  label.{}(btex {text} etex, ({:.4},{:.4})*radius);",
                    anchor.code(),
                    at.x,
                    at.y
                )?;
            }
        }
    }

    if let Some(name) = aux_source {
        writeln!(out, "  % auxiliary source included verbatim:")?;
        writeln!(out, "  input {name}")?;
    }
    writeln!(out, "endfig;")?;
    writeln!(out, "end")?;
    Ok(())
}

fn write_header<W: Write>(out: &mut W, view: &ViewState, style: &RenderStyle) -> io::Result<()> {
    writeln!(out, "% MetaPost source generated by stokesmap")?;
    writeln!(
        out,
        "% rot_psi = {:.6} deg (first rotation, about the z-axis)",
        rad_to_deg(view.psi)
    )?;
    writeln!(
        out,
        "% rot_phi = {:.6} deg (second rotation, about the y-axis)",
        rad_to_deg(view.phi)
    )?;
    if let Some((dpsi, dphi)) = view.overlay {
        writeln!(
            out,
            "% overlay frame: delta_psi = {:.6} deg, delta_phi = {:.6} deg",
            rad_to_deg(dpsi),
            rad_to_deg(dphi)
        )?;
    }
    writeln!(
        out,
        "% light source: phi = {:.6} deg, theta = {:.6} deg",
        rad_to_deg(view.light_phi),
        rad_to_deg(view.light_theta)
    )?;
    writeln!(
        out,
        "% whiteness range: [{:.6}, {:.6}]",
        view.lower_whiteness, view.upper_whiteness
    )?;
    writeln!(out, "scalefactor := {:.6}mm;", style.radius_mm)?;
    writeln!(out, "radius := scalefactor;")?;
    Ok(())
}

fn write_stroke<W: Write>(out: &mut W, stroke: &Stroke) -> io::Result<()> {
    let join = if stroke.smooth { ".." } else { "--" };
    write!(out, "  p := ")?;
    for (i, point) in stroke.points.iter().enumerate() {
        if i > 0 {
            write!(out, "{join}")?;
            if i % COORDS_PER_LINE == 0 {
                write!(out, "\n    ")?;
            }
        }
        write!(out, "({:.4},{:.4})", point.x, point.y)?;
    }
    writeln!(out, ";")?;

    if let Some(angle) = stroke.head_angle {
        writeln!(out, "  ahangle := {angle:.4};")?;
    }
    let verb = if stroke.arrow { "drawarrow" } else { "draw" };
    write!(out, "  {verb} p scaled radius")?;
    if stroke.dashed {
        write!(out, " dashed evenly")?;
    }
    if stroke.whiteness.abs() < f64::EPSILON {
        writeln!(out, " withcolor black;")?;
    } else {
        writeln!(out, " withcolor {:.6}[black,white];", stroke.whiteness)?;
    }
    if stroke.head_angle.is_some() {
        writeln!(out, "  ahangle := {DEFAULT_AHANGLE:.4};")?;
    }
    Ok(())
}
