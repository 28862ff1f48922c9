use crate::core::{PixelPoint, PixelRect};
use crate::render::{Color, PixelSurface};

use super::{ClipBounds, all_finite, pixel_index};

/// Draws a one pixel wide aliased line, both endpoints included.
pub fn draw_line(
    surface: &mut PixelSurface,
    from: PixelPoint,
    to: PixelPoint,
    color: Color,
    clip: Option<PixelRect>,
) {
    if !from.is_finite() || !to.is_finite() {
        return;
    }
    let Some(bounds) = ClipBounds::resolve(surface, clip) else {
        return;
    };
    aliased_segment(surface, from, to, color, bounds, true);
}

/// Draws a one pixel wide line with coverage-based anti-aliasing.
pub fn draw_line_aa(
    surface: &mut PixelSurface,
    from: PixelPoint,
    to: PixelPoint,
    color: Color,
    clip: Option<PixelRect>,
) {
    if !from.is_finite() || !to.is_finite() {
        return;
    }
    let Some(bounds) = ClipBounds::resolve(surface, clip) else {
        return;
    };
    coverage_segment(surface, from, to, color, bounds);
}

/// Draws connected one pixel wide segments.
///
/// In aliased mode each segment leaves out its last pixel, except the final
/// segment, so interior vertices are composited exactly once.
pub fn draw_polyline(
    surface: &mut PixelSurface,
    points: &[PixelPoint],
    color: Color,
    anti_aliased: bool,
    clip: Option<PixelRect>,
) {
    let Some(bounds) = ClipBounds::resolve(surface, clip) else {
        return;
    };
    polyline(surface, points, color, anti_aliased, bounds, true);
}

pub(crate) fn polyline(
    surface: &mut PixelSurface,
    points: &[PixelPoint],
    color: Color,
    anti_aliased: bool,
    bounds: ClipBounds,
    include_final_pixel: bool,
) {
    if points.len() < 2 || !all_finite(points) {
        return;
    }

    let last_segment = points.len() - 2;
    for (index, pair) in points.windows(2).enumerate() {
        if anti_aliased {
            coverage_segment(surface, pair[0], pair[1], color, bounds);
        } else {
            let include_last = include_final_pixel && index == last_segment;
            aliased_segment(surface, pair[0], pair[1], color, bounds, include_last);
        }
    }
}

pub(crate) fn aliased_segment(
    surface: &mut PixelSurface,
    from: PixelPoint,
    to: PixelPoint,
    color: Color,
    bounds: ClipBounds,
    include_last: bool,
) {
    let Some((from, to, end_clipped)) = clip_segment(from, to, bounds) else {
        return;
    };
    let include_last = include_last || end_clipped;

    let (mut x, mut y) = (pixel_index(from.x), pixel_index(from.y));
    let (end_x, end_y) = (pixel_index(to.x), pixel_index(to.y));
    let dx = (end_x - x).abs();
    let dy = -(end_y - y).abs();
    let step_x = if x < end_x { 1 } else { -1 };
    let step_y = if y < end_y { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        let at_end = x == end_x && y == end_y;
        if at_end && !include_last {
            break;
        }
        if bounds.contains(x, y) {
            surface.blend(x, y, color);
        }
        if at_end {
            break;
        }
        let doubled = 2 * err;
        if doubled >= dy {
            err += dy;
            x += step_x;
        }
        if doubled <= dx {
            err += dx;
            y += step_y;
        }
    }
}

/// Xiaolin Wu line over pixel centers.
fn coverage_segment(
    surface: &mut PixelSurface,
    from: PixelPoint,
    to: PixelPoint,
    color: Color,
    bounds: ClipBounds,
) {
    let Some((from, to, _)) = clip_segment(from, to, bounds) else {
        return;
    };

    // Shift so integer coordinates land on pixel centers.
    let (mut x0, mut y0) = (from.x - 0.5, from.y - 0.5);
    let (mut x1, mut y1) = (to.x - 0.5, to.y - 0.5);
    let steep = (y1 - y0).abs() > (x1 - x0).abs();
    if steep {
        std::mem::swap(&mut x0, &mut y0);
        std::mem::swap(&mut x1, &mut y1);
    }
    if x0 > x1 {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
    }

    let mut plot = |major: i64, minor: i64, coverage: f64| {
        let (x, y) = if steep { (minor, major) } else { (major, minor) };
        if bounds.contains(x, y) {
            surface.blend_coverage(x, y, color, coverage);
        }
    };

    let dx = x1 - x0;
    let gradient = if dx == 0.0 { 1.0 } else { (y1 - y0) / dx };

    let x_start = x0.round();
    let y_start = y0 + gradient * (x_start - x0);
    let gap = 1.0 - fractional(x0 + 0.5);
    let major_start = x_start as i64;
    let minor_start = y_start.floor();
    plot(major_start, minor_start as i64, (1.0 - (y_start - minor_start)) * gap);
    plot(major_start, minor_start as i64 + 1, (y_start - minor_start) * gap);

    let x_end = x1.round();
    let y_end = y1 + gradient * (x_end - x1);
    let gap = fractional(x1 + 0.5);
    let major_end = x_end as i64;
    let minor_end = y_end.floor();
    plot(major_end, minor_end as i64, (1.0 - (y_end - minor_end)) * gap);
    plot(major_end, minor_end as i64 + 1, (y_end - minor_end) * gap);

    let mut intersect = y_start + gradient;
    for major in (major_start + 1)..major_end {
        let minor = intersect.floor();
        let fraction = intersect - minor;
        plot(major, minor as i64, 1.0 - fraction);
        plot(major, minor as i64 + 1, fraction);
        intersect += gradient;
    }
}

fn fractional(value: f64) -> f64 {
    value - value.floor()
}

/// Liang-Barsky clip against the bounds grown by one pixel.
///
/// Returns the clipped endpoints and whether the end point moved.
fn clip_segment(
    from: PixelPoint,
    to: PixelPoint,
    bounds: ClipBounds,
) -> Option<(PixelPoint, PixelPoint, bool)> {
    let (t_enter, t_exit) = visible_span(from, to, bounds, 1.0)?;
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let clipped_from = PixelPoint::new(from.x + t_enter * dx, from.y + t_enter * dy);
    let clipped_to = PixelPoint::new(from.x + t_exit * dx, from.y + t_exit * dy);
    Some((clipped_from, clipped_to, t_exit < 1.0))
}

/// Parameter interval `[t_enter, t_exit]` of the segment inside the bounds
/// grown by `margin` pixels on every side, `None` when it misses them.
pub(crate) fn visible_span(
    from: PixelPoint,
    to: PixelPoint,
    bounds: ClipBounds,
    margin: f64,
) -> Option<(f64, f64)> {
    let x_min = bounds.left as f64 - margin;
    let x_max = bounds.right as f64 + margin;
    let y_min = bounds.top as f64 - margin;
    let y_max = bounds.bottom as f64 + margin;
    let dx = to.x - from.x;
    let dy = to.y - from.y;

    let mut t_enter = 0.0_f64;
    let mut t_exit = 1.0_f64;
    for (p, q) in [
        (-dx, from.x - x_min),
        (dx, x_max - from.x),
        (-dy, from.y - y_min),
        (dy, y_max - from.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let ratio = q / p;
        if p < 0.0 {
            if ratio > t_exit {
                return None;
            }
            t_enter = t_enter.max(ratio);
        } else {
            if ratio < t_enter {
                return None;
            }
            t_exit = t_exit.min(ratio);
        }
    }
    Some((t_enter, t_exit))
}

#[cfg(test)]
mod tests {
    use super::clip_segment;
    use crate::core::PixelPoint;
    use crate::render::raster::ClipBounds;

    #[test]
    fn segment_far_outside_is_rejected() {
        let bounds = ClipBounds {
            left: 0,
            top: 0,
            right: 10,
            bottom: 10,
        };
        let clipped = clip_segment(
            PixelPoint::new(-100.0, -50.0),
            PixelPoint::new(-20.0, -5.0),
            bounds,
        );
        assert!(clipped.is_none());
    }

    #[test]
    fn long_segment_is_trimmed_to_the_grown_bounds() {
        let bounds = ClipBounds {
            left: 0,
            top: 0,
            right: 10,
            bottom: 10,
        };
        let (from, to, end_clipped) = clip_segment(
            PixelPoint::new(-1.0e9, 5.0),
            PixelPoint::new(1.0e9, 5.0),
            bounds,
        )
        .expect("crosses bounds");
        assert!((from.x + 1.0).abs() <= 1e-6);
        assert!((to.x - 11.0).abs() <= 1e-6);
        assert!(end_clipped);
    }
}
