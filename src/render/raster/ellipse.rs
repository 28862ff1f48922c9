use crate::core::{PixelPoint, PixelRect};
use crate::render::{Color, PixelSurface};

use super::{ClipBounds, pixel_ceil, pixel_index};

/// Keeps the midpoint decision terms inside `i64`.
const MAX_STROKE_RADIUS: f64 = 16_384.0;

/// Fills the axis-aligned ellipse centered at `center`.
///
/// Rows are sampled at pixel centers; a radius under half a pixel still
/// marks the center pixel.
pub fn fill_ellipse(
    surface: &mut PixelSurface,
    center: PixelPoint,
    radius_x: f64,
    radius_y: f64,
    color: Color,
    clip: Option<PixelRect>,
) {
    if !center.is_finite() || !radius_x.is_finite() || !radius_y.is_finite() {
        return;
    }
    let Some(bounds) = ClipBounds::resolve(surface, clip) else {
        return;
    };
    let (radius_x, radius_y) = (radius_x.abs(), radius_y.abs());

    if radius_x < 0.5 || radius_y < 0.5 {
        let (x, y) = (pixel_index(center.x), pixel_index(center.y));
        if bounds.contains(x, y) {
            surface.blend(x, y, color);
        }
        return;
    }

    let first_row = pixel_ceil(center.y - radius_y - 0.5).max(bounds.top);
    let last_row = (pixel_ceil(center.y + radius_y - 0.5) - 1).min(bounds.bottom - 1);
    for row in first_row..=last_row {
        let dy = (row as f64 + 0.5 - center.y) / radius_y;
        let extent = 1.0 - dy * dy;
        if extent < 0.0 {
            continue;
        }
        let half_width = radius_x * extent.sqrt();
        let start = pixel_ceil(center.x - half_width - 0.5).max(bounds.left);
        let end = pixel_ceil(center.x + half_width - 0.5).min(bounds.right);
        if start < end {
            surface.blend_span(row, start, end, color);
        }
    }
}

/// Outlines the axis-aligned ellipse centered at `center` with the midpoint
/// algorithm on integer radii.
pub fn stroke_ellipse(
    surface: &mut PixelSurface,
    center: PixelPoint,
    radius_x: f64,
    radius_y: f64,
    color: Color,
    clip: Option<PixelRect>,
) {
    if !center.is_finite() || !radius_x.is_finite() || !radius_y.is_finite() {
        return;
    }
    let Some(bounds) = ClipBounds::resolve(surface, clip) else {
        return;
    };

    let cx = pixel_index(center.x);
    let cy = pixel_index(center.y);
    let rx = radius_x.abs().round().min(MAX_STROKE_RADIUS) as i64;
    let ry = radius_y.abs().round().min(MAX_STROKE_RADIUS) as i64;

    let mut plot_quadrants = |dx: i64, dy: i64| {
        let mut points = [
            (cx + dx, cy + dy),
            (cx - dx, cy + dy),
            (cx + dx, cy - dy),
            (cx - dx, cy - dy),
        ];
        // Collapse mirrored duplicates on the axes.
        let count = match (dx == 0, dy == 0) {
            (true, true) => 1,
            (true, false) => {
                points[1] = points[2];
                2
            }
            (false, true) => 2,
            (false, false) => 4,
        };
        for &(x, y) in &points[..count] {
            if bounds.contains(x, y) {
                surface.blend(x, y, color);
            }
        }
    };

    if rx == 0 || ry == 0 {
        for dx in 0..=rx {
            plot_quadrants(dx, 0);
        }
        for dy in 1..=ry {
            plot_quadrants(0, dy);
        }
        return;
    }

    let rx2 = rx * rx;
    let ry2 = ry * ry;
    let mut x = 0;
    let mut y = ry;

    // Region 1: slope magnitude below one.
    let mut decision = ry2 - rx2 * ry + rx2 / 4;
    while ry2 * x <= rx2 * y {
        plot_quadrants(x, y);
        if decision < 0 {
            decision += ry2 * (2 * x + 3);
        } else {
            decision += ry2 * (2 * x + 3) + rx2 * (2 - 2 * y);
            y -= 1;
        }
        x += 1;
    }

    // Region 2: slope magnitude above one.
    let mut decision = ry2 * (2 * x + 1) * (2 * x + 1) / 4 + rx2 * (y - 1) * (y - 1) - rx2 * ry2;
    while y >= 0 {
        plot_quadrants(x, y);
        if decision > 0 {
            decision += rx2 * (3 - 2 * y);
        } else {
            decision += ry2 * (2 * x + 2) + rx2 * (3 - 2 * y);
            x += 1;
        }
        y -= 1;
    }
}
