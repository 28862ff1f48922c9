use crate::core::{PixelPoint, PixelRect};
use crate::render::{Color, PixelSurface};

use super::polygon::fill_polygon;
use super::all_finite;

/// Longest allowed miter, in multiples of the half stroke width. Joins past
/// it fall back to the plain vertex offset.
pub const MITER_LIMIT: f64 = 4.0;

const PARALLEL_EPSILON: f64 = 1e-9;

/// Draws one segment as a `width` pixel wide quad.
pub fn draw_thick_line(
    surface: &mut PixelSurface,
    from: PixelPoint,
    to: PixelPoint,
    width: f64,
    color: Color,
    clip: Option<PixelRect>,
) {
    draw_thick_polyline(surface, &[from, to], width, color, clip);
}

/// Draws a polyline `width` pixels wide with mitered joins.
///
/// Consecutive quads share their join edge exactly, so join pixels are
/// composited once.
pub fn draw_thick_polyline(
    surface: &mut PixelSurface,
    points: &[PixelPoint],
    width: f64,
    color: Color,
    clip: Option<PixelRect>,
) {
    if !width.is_finite() || width <= 0.0 || !all_finite(points) {
        return;
    }
    for quad in thick_polyline_quads(points, width) {
        fill_polygon(surface, &quad, color, clip);
    }
}

/// Expands a polyline into one quad per segment: `[left_start, left_end,
/// right_end, right_start]`.
///
/// Each segment's offset is the half width rotated by the segment angle.
/// Interior joins use the intersection of the neighbouring outer (and inner)
/// edges, or the vertex offset when the edges are parallel or the miter is
/// too long. Zero-length segments are dropped.
#[must_use]
pub fn thick_polyline_quads(points: &[PixelPoint], width: f64) -> Vec<[PixelPoint; 4]> {
    let half = width * 0.5;
    let mut vertices: Vec<PixelPoint> = Vec::with_capacity(points.len());
    for &point in points {
        if vertices.last() != Some(&point) {
            vertices.push(point);
        }
    }
    if vertices.len() < 2 {
        return Vec::new();
    }

    let segments: Vec<SegmentFrame> = vertices
        .windows(2)
        .map(|pair| SegmentFrame::new(pair[0], pair[1], half))
        .collect();

    let mut left = Vec::with_capacity(vertices.len());
    let mut right = Vec::with_capacity(vertices.len());
    left.push(offset(vertices[0], segments[0].normal, 1.0));
    right.push(offset(vertices[0], segments[0].normal, -1.0));
    for (index, pair) in segments.windows(2).enumerate() {
        let vertex = vertices[index + 1];
        let (before, after) = (pair[0], pair[1]);
        left.push(join(vertex, before, after, 1.0, half));
        right.push(join(vertex, before, after, -1.0, half));
    }
    let last_segment = segments[segments.len() - 1];
    let last_vertex = vertices[vertices.len() - 1];
    left.push(offset(last_vertex, last_segment.normal, 1.0));
    right.push(offset(last_vertex, last_segment.normal, -1.0));

    (0..segments.len())
        .map(|index| [left[index], left[index + 1], right[index + 1], right[index]])
        .collect()
}

#[derive(Debug, Clone, Copy)]
struct SegmentFrame {
    start: PixelPoint,
    direction: PixelPoint,
    normal: PixelPoint,
}

impl SegmentFrame {
    fn new(start: PixelPoint, end: PixelPoint, half: f64) -> Self {
        let angle = (end.y - start.y).atan2(end.x - start.x);
        let (sin, cos) = angle.sin_cos();
        Self {
            start,
            direction: PixelPoint::new(cos, sin),
            normal: PixelPoint::new(-sin * half, cos * half),
        }
    }
}

fn offset(point: PixelPoint, normal: PixelPoint, side: f64) -> PixelPoint {
    PixelPoint::new(point.x + normal.x * side, point.y + normal.y * side)
}

fn join(
    vertex: PixelPoint,
    before: SegmentFrame,
    after: SegmentFrame,
    side: f64,
    half: f64,
) -> PixelPoint {
    let fallback = offset(vertex, after.normal, side);
    let origin_before = offset(before.start, before.normal, side);
    let origin_after = offset(after.start, after.normal, side);

    let cross = before.direction.x * after.direction.y - before.direction.y * after.direction.x;
    if cross.abs() < PARALLEL_EPSILON {
        return fallback;
    }

    let delta_x = origin_after.x - origin_before.x;
    let delta_y = origin_after.y - origin_before.y;
    let t = (delta_x * after.direction.y - delta_y * after.direction.x) / cross;
    let miter = PixelPoint::new(
        origin_before.x + t * before.direction.x,
        origin_before.y + t * before.direction.y,
    );

    let miter_length = (miter.x - vertex.x).hypot(miter.y - vertex.y);
    if !miter.is_finite() || miter_length > MITER_LIMIT * half {
        fallback
    } else {
        miter
    }
}

#[cfg(test)]
mod tests {
    use super::thick_polyline_quads;
    use crate::core::PixelPoint;

    #[test]
    fn right_angle_join_meets_at_offset_corner() {
        let quads = thick_polyline_quads(
            &[
                PixelPoint::new(10.0, 10.0),
                PixelPoint::new(30.0, 10.0),
                PixelPoint::new(30.0, 30.0),
            ],
            3.0,
        );
        assert_eq!(quads.len(), 2);
        let join_left = quads[0][1];
        let join_right = quads[0][2];
        assert!((join_left.x - 28.5).abs() <= 1e-9 && (join_left.y - 11.5).abs() <= 1e-9);
        assert!((join_right.x - 31.5).abs() <= 1e-9 && (join_right.y - 8.5).abs() <= 1e-9);
        assert_eq!(quads[1][0], join_left);
        assert_eq!(quads[1][3], join_right);
    }
}
