//! Splits a classified trajectory into maximal runs of one visibility
//! class.
//!
//! Hidden strokes of every trajectory must reach the page before any
//! visible stroke, so the segmenter only computes runs; the scene walks
//! them twice, once per class.

use crate::math::Point3;
use crate::view::{self, ViewState};

/// A maximal contiguous sub-sequence of samples sharing one
/// classification. `start..=end` is the core range; the one-sample
/// boundary extension for visible runs is applied by [`Run::draw_range`]
/// only, so the cores always partition the trajectory exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub visible: bool,
    pub start: usize,
    pub end: usize,
}

impl Run {
    /// Number of samples in the core range.
    #[must_use]
    pub fn core_len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Inclusive index range to draw, for a trajectory of `len` samples.
    ///
    /// Visible runs are extended by one sample on each side (clamped to
    /// the trajectory bounds) so the stroke joins seamlessly with the
    /// adjacent hidden stroke behind the sphere rim. Hidden runs keep
    /// their exact boundaries: they are drawn in a different style and
    /// must not bleed past the terminator.
    #[must_use]
    pub fn draw_range(&self, len: usize) -> (usize, usize) {
        if self.visible {
            let start = self.start.saturating_sub(1);
            let end = (self.end + 1).min(len - 1);
            (start, end)
        } else {
            (self.start, self.end)
        }
    }

    /// Whether the drawn sub-path has at least two points.
    #[must_use]
    pub fn drawable(&self, len: usize) -> bool {
        let (start, end) = self.draw_range(len);
        end > start
    }
}

/// Computes the per-sample visibility flags for a point sequence.
#[must_use]
pub fn classify(points: &[Point3], view: &ViewState) -> Vec<bool> {
    points.iter().map(|p| view::is_visible(p, view)).collect()
}

/// Partitions classification flags into maximal runs, in increasing
/// index order.
///
/// A run of class `C` starts at index `k` when sample `k` has class `C`
/// and either `k == 0` or sample `k - 1` has the other class; it ends at
/// the last consecutive index of class `C`.
#[must_use]
pub fn runs(flags: &[bool]) -> Vec<Run> {
    let mut result = Vec::new();
    let mut iter = flags.iter().copied().enumerate();
    let Some((_, mut class)) = iter.next() else {
        return result;
    };
    let mut start = 0;
    for (k, flag) in iter {
        if flag != class {
            result.push(Run {
                visible: class,
                start,
                end: k - 1,
            });
            class = flag;
            start = k;
        }
    }
    result.push(Run {
        visible: class,
        start,
        end: flags.len() - 1,
    });
    result
}
