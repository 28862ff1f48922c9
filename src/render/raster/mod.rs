//! Scan conversion into a [`PixelSurface`].
//!
//! Every primitive takes `f64` pixel coordinates, where pixel `(i, j)` covers
//! `[i, i + 1) x [j, j + 1)`. A non-finite coordinate anywhere in a primitive
//! skips the whole primitive. Writes are limited to the surface and to the
//! optional clip rectangle.

mod dash;
mod ellipse;
mod line;
mod polygon;
mod rect;
mod thick;

pub use dash::{DashStyle, draw_dashed_polyline};
pub use ellipse::{fill_ellipse, stroke_ellipse};
pub use line::{draw_line, draw_line_aa, draw_polyline};
pub use polygon::fill_polygon;
pub use rect::{fill_rect, stroke_rect};
pub use thick::{MITER_LIMIT, draw_thick_line, draw_thick_polyline, thick_polyline_quads};

use crate::core::{PixelPoint, PixelRect};
use crate::render::PixelSurface;

/// Integer write bounds: surface intersected with the clip rectangle.
/// `right` and `bottom` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ClipBounds {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

impl ClipBounds {
    /// `None` when nothing can be written (empty intersection or non-finite clip).
    pub(crate) fn resolve(surface: &PixelSurface, clip: Option<PixelRect>) -> Option<Self> {
        let mut bounds = Self {
            left: 0,
            top: 0,
            right: i64::from(surface.width()),
            bottom: i64::from(surface.height()),
        };

        if let Some(clip) = clip {
            if !clip.left.is_finite()
                || !clip.top.is_finite()
                || !clip.width.is_finite()
                || !clip.height.is_finite()
            {
                return None;
            }
            let (left, right) = ordered(clip.left, clip.right());
            let (top, bottom) = ordered(clip.top, clip.bottom());
            bounds.left = bounds.left.max(left.floor() as i64);
            bounds.top = bounds.top.max(top.floor() as i64);
            bounds.right = bounds.right.min(right.ceil() as i64);
            bounds.bottom = bounds.bottom.min(bottom.ceil() as i64);
        }

        if bounds.left >= bounds.right || bounds.top >= bounds.bottom {
            None
        } else {
            Some(bounds)
        }
    }

    #[inline]
    pub(crate) fn contains(self, x: i64, y: i64) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

pub(crate) fn all_finite(points: &[PixelPoint]) -> bool {
    points.iter().all(|point| point.is_finite())
}

/// Magnitude past which coordinates are pinned before integer conversion,
/// keeping index arithmetic far away from `i64` overflow.
const COORDINATE_LIMIT: f64 = 1.0e12;

/// Pixel index containing coordinate `value`; pinned for huge inputs.
#[inline]
pub(crate) fn pixel_index(value: f64) -> i64 {
    value.floor().clamp(-COORDINATE_LIMIT, COORDINATE_LIMIT) as i64
}

/// Smallest pixel index not below `value`; pinned for huge inputs.
#[inline]
pub(crate) fn pixel_ceil(value: f64) -> i64 {
    value.ceil().clamp(-COORDINATE_LIMIT, COORDINATE_LIMIT) as i64
}
