pub mod parse;
pub mod segment;
pub mod tick;

use crate::error::{CapacityError, Result};
use crate::math::Point3;

/// Maximum number of points per trajectory.
pub const MAX_POINTS: usize = 5000;

/// Maximum number of tick marks per trajectory.
pub const MAX_TICKS: usize = MAX_POINTS / 10;

/// Maximum number of point-anchored labels per trajectory. Begin and end
/// labels occupy reserved slots and do not count against this limit.
pub const MAX_LABELS: usize = MAX_TICKS / 10;

/// Maximum number of characters per label text.
pub const MAX_LABEL_TEXT: usize = 256;

/// Compass-style placement of a text label relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Top,
    Bottom,
    Left,
    Right,
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

impl Anchor {
    /// Parses an input position code. Invalid codes are a hard parse
    /// error at the call site.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "top" => Some(Self::Top),
            "bot" => Some(Self::Bottom),
            "lft" => Some(Self::Left),
            "rt" => Some(Self::Right),
            "ulft" => Some(Self::UpperLeft),
            "urt" => Some(Self::UpperRight),
            "llft" => Some(Self::LowerLeft),
            "lrt" => Some(Self::LowerRight),
            _ => None,
        }
    }

    /// The position code, identical on input and output.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bot",
            Self::Left => "lft",
            Self::Right => "rt",
            Self::UpperLeft => "ulft",
            Self::UpperRight => "urt",
            Self::LowerLeft => "llft",
            Self::LowerRight => "lrt",
        }
    }
}

/// Which sample of the trajectory a label is bound to.
///
/// `Begin` and `End` are the reserved slots for the labels scanned from
/// the `p`/`q` markers; they can never collide with a `Point` label, no
/// matter which indices carry ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSite {
    Begin,
    Point(usize),
    End,
}

/// A text label bound to one trajectory sample.
#[derive(Debug, Clone)]
pub struct Label {
    pub site: LabelSite,
    pub anchor: Anchor,
    pub text: String,
}

/// One ordered Stokes-parameter trajectory with its tick marks and
/// labels, fully materialized before segmentation.
///
/// Built incrementally by the input scanner while one `p`…`q` record
/// block is consumed, then classified, segmented, flushed and dropped.
#[derive(Debug, Clone, Default)]
pub struct Trajectory {
    points: Vec<Point3>,
    ticks: Vec<usize>,
    labels: Vec<Label>,
}

impl Trajectory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sample point.
    ///
    /// # Errors
    ///
    /// Fails with [`CapacityError::Points`] past [`MAX_POINTS`].
    pub fn push_point(&mut self, p: Point3) -> Result<()> {
        if self.points.len() >= MAX_POINTS {
            return Err(CapacityError::Points { max: MAX_POINTS }.into());
        }
        self.points.push(p);
        Ok(())
    }

    /// Marks the most recently pushed point with a tick.
    ///
    /// # Errors
    ///
    /// Fails with [`CapacityError::Ticks`] past [`MAX_TICKS`].
    pub fn mark_tick(&mut self) -> Result<()> {
        if self.ticks.len() >= MAX_TICKS {
            return Err(CapacityError::Ticks { max: MAX_TICKS }.into());
        }
        self.ticks.push(self.points.len().saturating_sub(1));
        Ok(())
    }

    /// Attaches a label.
    ///
    /// # Errors
    ///
    /// Fails with [`CapacityError::Labels`] when a point-anchored label
    /// would exceed [`MAX_LABELS`], or [`CapacityError::LabelText`] when
    /// the text is longer than [`MAX_LABEL_TEXT`].
    pub fn push_label(&mut self, site: LabelSite, anchor: Anchor, text: String) -> Result<()> {
        if text.chars().count() > MAX_LABEL_TEXT {
            return Err(CapacityError::LabelText {
                max: MAX_LABEL_TEXT,
            }
            .into());
        }
        if matches!(site, LabelSite::Point(_)) {
            let point_labels = self
                .labels
                .iter()
                .filter(|l| matches!(l.site, LabelSite::Point(_)))
                .count();
            if point_labels >= MAX_LABELS {
                return Err(CapacityError::Labels { max: MAX_LABELS }.into());
            }
        }
        self.labels.push(Label { site, anchor, text });
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    #[must_use]
    pub fn ticks(&self) -> &[usize] {
        &self.ticks
    }

    #[must_use]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Resolves a label site to the index of the sample it anchors to.
    ///
    /// Empty trajectories have no resolvable sites; callers only invoke
    /// this for trajectories with at least one point.
    #[must_use]
    pub fn site_index(&self, site: LabelSite) -> usize {
        match site {
            LabelSite::Begin => 0,
            LabelSite::Point(k) => k,
            LabelSite::End => self.points.len().saturating_sub(1),
        }
    }
}
