//! Command-line option parsing.
//!
//! A hand-rolled argument loop building the immutable configuration
//! values consumed by the rest of the pipeline. All angles are given in
//! degrees on the command line and stored in radians.

use std::path::PathBuf;

use crate::error::{CapacityError, Result, UsageError};
use crate::math::Point3;
use crate::style::{ArrowSpec, LineStyle, RenderStyle, MAX_ARROWS};
use crate::view::ViewState;

/// Usage text printed for `-h`/`--help`.
pub const USAGE: &str = "\
usage: stokesmap [options]
  --inputfile <file>          trajectory records to map (none: sphere only)
  --outputfile <file>         MetaPost destination (default aout.mp)
  -v, --verbose               report progress on stderr
  -n, --normalize             plot S_k/S_0 instead of S_k
  --rotatepsi <deg>           first rotation, about the z-axis (default -40)
  --rotatephi <deg>           second rotation, about the y-axis (default 15)
  --bezier                    smooth sub-paths instead of straight joins
  --draw_hidden_dashed        dash hidden sub-paths instead of graying them
  --hiddengraytone <w>        whiteness of solid hidden strokes (default 0.65)
  --draw_paths_as_arrows      arrow head on the final sub-path of each path
  --reverse_arrow_paths       reverse the direction of those arrows
  --paththickness <pt>        trajectory pen (default 1.0)
  --arrowthickness <pt>       arrow and axis pen (default 0.6)
  --arrowheadangle <deg>      arrow-head opening angle (default 30)
  --ticksize <pt>             visual tick-mark size (default 4.0)
  --scalefactor <mm>          sphere radius (default 6)
  --shading <lo> <hi>         whiteness bounds of the shading (default 0.75 0.99)
  --lightphi <deg>            light azimuth (default 30)
  --lighttheta <deg>          light-to-observer angle (default 30)
  --rhodivisor <n>            radial shading cells (default 50)
  --phidivisor <n>            angular shading cells (default 80)
  --axislengths <n1 p1 n2 p2 n3 p3>  negative/positive axis lengths
  --axislabels <l1> <l2> <l3> axis label texts
  --draw_axes_inside_sphere   dashed axis segments through the sphere
  --arrow <s1a s2a s3a s1b s2b s3b style blackness>
                              extra arrow; style 0 solid, 1 dashed (max 24)
  --xtracoordsys <dpsi dphi>  overlay frame rotated by these extra angles
  --xtracoordsys_axislabel_x <label>  draw the overlay x-axis, so labelled
  --xtracoordsys_axislabel_y <label>  draw the overlay y-axis, so labelled
  --xtracoordsys_axislabel_z <label>  draw the overlay z-axis, so labelled
  --xtracoordsys_axislengths <n1 p1 n2 p2 n3 p3>  overlay axis lengths
  --auxsource <file>          MetaPost source appended via an input statement
  -h, --help                  print this text
";

/// Everything configured on the command line.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub verbose: bool,
    pub help: bool,
    pub view: ViewState,
    pub style: RenderStyle,
    pub arrows: Vec<ArrowSpec>,
    pub aux_source: Option<String>,
}

impl Options {
    /// Destination path, defaulting to `aout.mp`.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| "aout.mp".into())
    }
}

/// Parses the argument list (without the program name).
///
/// # Errors
///
/// Fails with a [`UsageError`] on unknown options, missing or
/// non-numeric values, and with [`CapacityError::Arrows`] past the
/// arrow maximum.
pub fn parse(args: &[String]) -> Result<Options> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => options.help = true,
            "-v" | "--verbose" => options.verbose = true,
            "-n" | "--normalize" => options.view.normalize = true,
            "--bezier" => options.style.bezier = true,
            "--draw_hidden_dashed" => options.style.hidden_dashed = true,
            "--draw_paths_as_arrows" => options.style.paths_as_arrows = true,
            "--reverse_arrow_paths" => options.style.reverse_arrows = true,
            "--draw_axes_inside_sphere" => options.style.axes_inside_sphere = true,
            "--inputfile" => options.input = Some(next_value(&mut iter, arg)?.into()),
            "--outputfile" => options.output = Some(next_value(&mut iter, arg)?.into()),
            "--auxsource" => options.aux_source = Some(next_value(&mut iter, arg)?),
            "--rotatepsi" => options.view.psi = next_f64(&mut iter, arg)?.to_radians(),
            "--rotatephi" => options.view.phi = next_f64(&mut iter, arg)?.to_radians(),
            "--lightphi" => options.view.light_phi = next_f64(&mut iter, arg)?.to_radians(),
            "--lighttheta" => options.view.light_theta = next_f64(&mut iter, arg)?.to_radians(),
            "--shading" => {
                options.view.lower_whiteness = next_f64(&mut iter, arg)?;
                options.view.upper_whiteness = next_f64(&mut iter, arg)?;
            }
            "--hiddengraytone" => options.style.hidden_graytone = next_f64(&mut iter, arg)?,
            "--rhodivisor" => options.style.rho_steps = next_f64(&mut iter, arg)?,
            "--phidivisor" => options.style.phi_steps = next_f64(&mut iter, arg)?,
            "--scalefactor" => options.style.radius_mm = next_f64(&mut iter, arg)?,
            "--paththickness" => options.style.path_thickness = next_f64(&mut iter, arg)?,
            "--arrowthickness" => options.style.arrow_thickness = next_f64(&mut iter, arg)?,
            "--arrowheadangle" => options.style.arrow_head_angle = next_f64(&mut iter, arg)?,
            "--ticksize" => options.style.tick_size = next_f64(&mut iter, arg)?,
            "--axislengths" => {
                options.style.axis_lengths = next_axis_lengths(&mut iter, arg)?;
            }
            "--xtracoordsys_axislengths" => {
                options.style.overlay_axis_lengths = next_axis_lengths(&mut iter, arg)?;
            }
            "--axislabels" => {
                options.style.axis_labels = Some([
                    next_value(&mut iter, arg)?,
                    next_value(&mut iter, arg)?,
                    next_value(&mut iter, arg)?,
                ]);
            }
            "--xtracoordsys" => {
                let dpsi = next_f64(&mut iter, arg)?.to_radians();
                let dphi = next_f64(&mut iter, arg)?.to_radians();
                options.view.overlay = Some((dpsi, dphi));
            }
            "--xtracoordsys_axislabel_x" => {
                options.style.overlay_axis_labels[0] = Some(next_value(&mut iter, arg)?);
            }
            "--xtracoordsys_axislabel_y" => {
                options.style.overlay_axis_labels[1] = Some(next_value(&mut iter, arg)?);
            }
            "--xtracoordsys_axislabel_z" => {
                options.style.overlay_axis_labels[2] = Some(next_value(&mut iter, arg)?);
            }
            "--arrow" => {
                if options.arrows.len() >= MAX_ARROWS {
                    return Err(CapacityError::Arrows { max: MAX_ARROWS }.into());
                }
                let mut values = [0.0f64; 8];
                for value in &mut values {
                    *value = next_f64(&mut iter, arg)?;
                }
                let line_style = if (0.5..1.5).contains(&values[6]) {
                    LineStyle::Dashed
                } else {
                    LineStyle::Solid
                };
                options.arrows.push(ArrowSpec {
                    from: Point3::new(values[0], values[1], values[2]),
                    to: Point3::new(values[3], values[4], values[5]),
                    line_style,
                    blackness: values[7],
                });
            }
            unknown => return Err(UsageError::UnknownOption(unknown.to_string()).into()),
        }
    }

    Ok(options)
}

fn next_value<'a, I>(iter: &mut I, option: &str) -> Result<String>
where
    I: Iterator<Item = &'a String>,
{
    iter.next().map(String::clone).ok_or_else(|| {
        UsageError::MissingValue {
            option: option.to_string(),
            expected: "a value",
        }
        .into()
    })
}

fn next_f64<'a, I>(iter: &mut I, option: &str) -> Result<f64>
where
    I: Iterator<Item = &'a String>,
{
    let value = iter.next().ok_or_else(|| UsageError::MissingValue {
        option: option.to_string(),
        expected: "a numeric value",
    })?;
    value.parse().map_err(|_| {
        UsageError::BadNumber {
            option: option.to_string(),
            value: value.clone(),
        }
        .into()
    })
}

fn next_axis_lengths<'a, I>(iter: &mut I, option: &str) -> Result<[(f64, f64); 3]>
where
    I: Iterator<Item = &'a String>,
{
    let mut lengths = [(0.0, 0.0); 3];
    for pair in &mut lengths {
        pair.0 = next_f64(iter, option)?;
        pair.1 = next_f64(iter, option)?;
    }
    Ok(lengths)
}
