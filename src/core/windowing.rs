use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::core::axis::AxisState;
use crate::core::types::DoubleRange;

/// Contiguous inclusive index range selected for projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexWindow {
    pub start: usize,
    pub end: usize,
}

impl IndexWindow {
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    #[must_use]
    pub fn full(count: usize) -> Option<Self> {
        count.checked_sub(1).map(|last| Self::new(0, last))
    }

    /// Number of indices covered; a window is never empty.
    #[must_use]
    pub fn point_count(self) -> usize {
        self.end - self.start + 1
    }

    #[must_use]
    pub fn contains(self, index: usize) -> bool {
        index >= self.start && index <= self.end
    }

    #[must_use]
    pub fn indices(self) -> RangeInclusive<usize> {
        self.start..=self.end
    }
}

/// Selects the index range to project for one series.
///
/// - indexed series: `[floor(start), ceil(end)]` clamped to the data;
/// - linearly ordered series: the in-range indices plus one neighbour on each side;
/// - unordered series: everything.
///
/// Returns `None` only when there is no data.
#[must_use]
pub fn visible_window(
    x_values: &[f64],
    visible_range: DoubleRange,
    is_indexed: bool,
    is_linearly_ordered: bool,
) -> Option<IndexWindow> {
    if is_indexed {
        indexed_window(x_values.len(), visible_range)
    } else if is_linearly_ordered {
        linear_window(x_values, visible_range)
    } else {
        IndexWindow::full(x_values.len())
    }
}

/// Window for category data where the x value of a point is its index.
#[must_use]
pub fn indexed_window(count: usize, visible_range: DoubleRange) -> Option<IndexWindow> {
    let full = IndexWindow::full(count)?;
    let (min, max) = (visible_range.min(), visible_range.max());
    if !min.is_finite() || !max.is_finite() {
        return Some(full);
    }

    let last = full.end as f64;
    let start = min.floor().clamp(0.0, last) as usize;
    let end = max.ceil().clamp(0.0, last) as usize;
    Some(IndexWindow::new(start, end.max(start)))
}

/// Window for x-sorted data.
///
/// One forward scan finds the first and last indices inside the range and
/// stops at the first value past its end. The neighbours just outside the
/// range are kept so lines crossing the viewport edge still reach it.
#[must_use]
pub fn linear_window(x_values: &[f64], visible_range: DoubleRange) -> Option<IndexWindow> {
    let full = IndexWindow::full(x_values.len())?;
    let (min, max) = (visible_range.min(), visible_range.max());
    if !min.is_finite() || !max.is_finite() {
        return Some(full);
    }

    let mut first_inside = None;
    let mut last_inside = None;
    let mut first_after = None;
    for (index, &x) in x_values.iter().enumerate() {
        if x > max {
            first_after = Some(index);
            break;
        }
        if x >= min {
            first_inside.get_or_insert(index);
            last_inside = Some(index);
        }
    }

    let window = match (first_inside, last_inside, first_after) {
        (Some(first), Some(last), _) => {
            IndexWindow::new(first.saturating_sub(1), (last + 1).min(full.end))
        }
        (_, _, Some(after)) => IndexWindow::new(after.saturating_sub(1), after),
        _ => IndexWindow::new(full.end, full.end),
    };
    Some(window)
}

/// Per-axis distance below which consecutive points are visually coincident.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecimationTolerance {
    pub x: f64,
    pub y: f64,
}

impl DecimationTolerance {
    /// One rendered pixel expressed in each axis' (transformed) units.
    #[must_use]
    pub fn from_axes(x_axis: &AxisState, y_axis: &AxisState) -> Self {
        Self {
            x: x_axis.units_per_pixel(),
            y: y_axis.units_per_pixel(),
        }
    }
}

/// Writes into `out` the indices of `window` that survive decimation.
///
/// A point is dropped when both deltas to the last kept point are below
/// tolerance. The window ends and the points bordering a non-finite value
/// are always kept so gaps stay where they are.
pub fn decimate_window(
    x_values: &[f64],
    y_values: &[f64],
    window: IndexWindow,
    tolerance: DecimationTolerance,
    x_axis: &AxisState,
    y_axis: &AxisState,
    out: &mut Vec<usize>,
) {
    out.clear();
    let transformed = |index: usize| {
        (
            x_axis.transform_value(x_values[index]),
            y_axis.transform_value(y_values[index]),
        )
    };

    let mut last_kept: Option<(f64, f64)> = None;
    for index in window.indices() {
        let (x, y) = transformed(index);
        if !x.is_finite() || !y.is_finite() {
            out.push(index);
            last_kept = None;
            continue;
        }

        let is_edge = index == window.start || index == window.end;
        let next_is_gap = index < window.end && {
            let (next_x, next_y) = transformed(index + 1);
            !next_x.is_finite() || !next_y.is_finite()
        };
        if let Some((last_x, last_y)) = last_kept {
            let coincident = (x - last_x).abs() < tolerance.x && (y - last_y).abs() < tolerance.y;
            if coincident && !is_edge && !next_is_gap {
                continue;
            }
        }

        out.push(index);
        last_kept = Some((x, y));
    }
}

#[cfg(test)]
mod tests {
    use super::{IndexWindow, linear_window};
    use crate::core::DoubleRange;

    #[test]
    fn range_between_two_samples_keeps_both_neighbours() {
        let window = linear_window(&[0.0, 10.0, 20.0], DoubleRange::new(3.0, 4.0));
        assert_eq!(window, Some(IndexWindow::new(0, 1)));
    }

    #[test]
    fn data_left_of_view_collapses_to_last_point() {
        let window = linear_window(&[0.0, 1.0, 2.0], DoubleRange::new(5.0, 9.0));
        assert_eq!(window, Some(IndexWindow::new(2, 2)));
    }
}
