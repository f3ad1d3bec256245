//! Assembles the full drawing-primitive sequence for one map.
//!
//! Everything is computed into memory first, then ordered: shading
//! cells, equators, every trajectory's hidden strokes, every
//! trajectory's visible strokes, labels, user arrows, coordinate axes.
//! The global hidden-before-visible order guarantees that a hidden
//! stroke of a later trajectory can never overpaint a visible stroke of
//! an earlier one.

pub mod arrow;
pub mod axes;
pub mod primitive;
pub mod shading;

use log::{debug, info};

use crate::error::{CapacityError, Result};
use crate::style::{ArrowSpec, LineStyle, RenderStyle, MAX_ARROWS};
use crate::trajectory::{segment, tick, Trajectory};
use crate::view::{project, ViewState};

use primitive::{Primitive, Stroke};

/// The ordered primitive sequence of one complete map.
#[derive(Debug, Clone)]
pub struct Scene {
    pub primitives: Vec<Primitive>,
}

/// Computes the whole scene.
///
/// # Errors
///
/// Fails on arrow-count overruns, degenerate tick or arrow geometry,
/// and projection failures; nothing is emitted on failure.
pub fn build_scene(
    trajectories: &[Trajectory],
    arrows: &[ArrowSpec],
    view: &ViewState,
    style: &RenderStyle,
) -> Result<Scene> {
    if arrows.len() > MAX_ARROWS {
        return Err(CapacityError::Arrows { max: MAX_ARROWS }.into());
    }

    let mut primitives = shading::shading_cells(view, style);
    primitives.extend(axes::equators(view.psi, view.phi, style));
    if let Some((psi, phi)) = view.overlay_angles() {
        primitives.extend(axes::equators(psi, phi, style));
    }

    let (hidden, visible) = trajectory_passes(trajectories, view, style)?;
    primitives.extend(hidden);
    primitives.extend(visible);

    primitives.extend(arrow_primitives(arrows, view, style)?);

    primitives.extend(axes::coordinate_axes(
        view.psi, view.phi, view, style, false,
    )?);
    if let Some((psi, phi)) = view.overlay_angles() {
        primitives.extend(axes::coordinate_axes(psi, phi, view, style, true)?);
    }

    info!(
        "scene assembled: {} trajectories, {} arrows, {} primitives",
        trajectories.len(),
        arrows.len(),
        primitives.len()
    );
    Ok(Scene { primitives })
}

/// Computes the hidden-pass and visible-pass primitives of all
/// trajectories, each pass in input order.
///
/// Hidden runs keep exact boundaries; visible runs are extended one
/// sample past each end. Tick marks follow the classification of their
/// sample; labels are emitted once, at the end of the visible pass of
/// their trajectory.
///
/// # Errors
///
/// Propagates projection and tick-geometry failures.
pub fn trajectory_passes(
    trajectories: &[Trajectory],
    view: &ViewState,
    style: &RenderStyle,
) -> Result<(Vec<Primitive>, Vec<Primitive>)> {
    let classified: Vec<Vec<bool>> = trajectories
        .iter()
        .map(|t| segment::classify(t.points(), view))
        .collect();

    let mut hidden = Vec::new();
    for (trajectory, flags) in trajectories.iter().zip(&classified) {
        for run in segment::runs(flags) {
            if !run.visible && run.drawable(trajectory.len()) {
                debug!(
                    "hidden sub-path over samples {}..={}",
                    run.start, run.end
                );
                hidden.push(run_stroke(trajectory, run, view, style)?);
            }
        }
        hidden.extend(tick_strokes(trajectory, flags, view, style, false)?);
    }

    let mut visible = Vec::new();
    for (trajectory, flags) in trajectories.iter().zip(&classified) {
        for run in segment::runs(flags) {
            if run.visible && run.drawable(trajectory.len()) {
                let (start, end) = run.draw_range(trajectory.len());
                debug!("visible sub-path over samples {start}..={end}");
                visible.push(run_stroke(trajectory, run, view, style)?);
            }
        }
        visible.extend(tick_strokes(trajectory, flags, view, style, true)?);
        if trajectory.is_empty() {
            continue;
        }
        for label in trajectory.labels() {
            let at = project(&trajectory.points()[trajectory.site_index(label.site)], view)?;
            visible.push(Primitive::Text {
                text: label.text.clone(),
                anchor: label.anchor,
                at,
            });
        }
    }

    Ok((hidden, visible))
}

/// Builds the stroke for one drawable run.
fn run_stroke(
    trajectory: &Trajectory,
    run: segment::Run,
    view: &ViewState,
    style: &RenderStyle,
) -> Result<Primitive> {
    let (start, end) = run.draw_range(trajectory.len());
    let mut points = Vec::with_capacity(end - start + 1);
    for p in &trajectory.points()[start..=end] {
        points.push(project(p, view)?);
    }

    // Only a run reaching the final sample can carry the trajectory's
    // direction arrow.
    let arrow = style.paths_as_arrows && end == trajectory.len() - 1;
    if arrow && style.reverse_arrows {
        points.reverse();
    }

    let (whiteness, dashed) = if run.visible {
        (0.0, false)
    } else if style.hidden_dashed {
        (0.0, true)
    } else {
        (style.hidden_graytone, false)
    };

    Ok(Primitive::Stroke(Stroke {
        points,
        thickness: style.path_thickness,
        whiteness,
        dashed,
        smooth: style.bezier,
        arrow,
        head_angle: arrow.then_some(style.arrow_head_angle),
    }))
}

/// Builds the tick strokes of one pass. Visible ticks are solid black;
/// hidden ticks use the hidden gray tone even when hidden paths are
/// drawn dashed.
fn tick_strokes(
    trajectory: &Trajectory,
    flags: &[bool],
    view: &ViewState,
    style: &RenderStyle,
    visible_pass: bool,
) -> Result<Vec<Primitive>> {
    let mut strokes = Vec::new();
    for &k in trajectory.ticks() {
        if flags[k] != visible_pass {
            continue;
        }
        let (a, b) = tick::tick_segment(trajectory, k, view)?;
        strokes.push(Primitive::Stroke(Stroke {
            points: vec![a, b],
            thickness: style.path_thickness / 2.0,
            whiteness: if visible_pass {
                0.0
            } else {
                style.hidden_graytone
            },
            dashed: false,
            smooth: false,
            arrow: false,
            head_angle: None,
        }));
    }
    Ok(strokes)
}

/// Builds the two stroke halves of every user arrow, the first half
/// carrying the head so it lands on the arc midpoint.
///
/// # Errors
///
/// Propagates degenerate-arc failures.
pub fn arrow_primitives(
    arrows: &[ArrowSpec],
    view: &ViewState,
    style: &RenderStyle,
) -> Result<Vec<Primitive>> {
    let mut primitives = Vec::new();
    for spec in arrows {
        let (first, second) = arrow::geodesic_halves(&spec.from, &spec.to, arrow::HALF_STEPS)?;
        let dashed = spec.line_style == LineStyle::Dashed;
        for (half, with_head) in [(first, true), (second, false)] {
            let mut points = Vec::with_capacity(half.len());
            for p in &half {
                points.push(project(p, view)?);
            }
            primitives.push(Primitive::Stroke(Stroke {
                points,
                thickness: style.arrow_thickness,
                whiteness: 1.0 - spec.blackness,
                dashed,
                smooth: true,
                arrow: with_head,
                head_angle: None,
            }));
        }
    }
    Ok(primitives)
}
