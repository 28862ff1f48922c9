use ordered_float::OrderedFloat;
use smallvec::SmallVec;

use crate::core::{PixelPoint, PixelRect};
use crate::render::{Color, PixelSurface};

use super::{ClipBounds, all_finite, pixel_ceil};

/// Even-odd scanline fill of a closed polygon.
///
/// The point list is closed implicitly; an explicit repeat of the first
/// vertex is accepted. Pixels are sampled at their centers with half-open
/// spans and half-open edge rows, so two polygons sharing an edge never
/// cover the same pixel.
pub fn fill_polygon(
    surface: &mut PixelSurface,
    points: &[PixelPoint],
    color: Color,
    clip: Option<PixelRect>,
) {
    if points.len() < 3 || !all_finite(points) {
        return;
    }
    let Some(bounds) = ClipBounds::resolve(surface, clip) else {
        return;
    };

    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    let mut edges: Vec<Edge> = Vec::with_capacity(points.len());
    for (index, &start) in points.iter().enumerate() {
        let end = points[(index + 1) % points.len()];
        min_y = min_y.min(start.y);
        max_y = max_y.max(start.y);
        if let Some(edge) = Edge::new(start, end) {
            edges.push(edge);
        }
    }
    if edges.is_empty() {
        return;
    }

    // Rows whose center lies in [min_y, max_y).
    let first_row = pixel_ceil(min_y - 0.5).max(bounds.top);
    let last_row = (pixel_ceil(max_y - 0.5) - 1).min(bounds.bottom - 1);

    let mut crossings: SmallVec<[f64; 16]> = SmallVec::new();
    for row in first_row..=last_row {
        let center = row as f64 + 0.5;
        crossings.clear();
        crossings.extend(edges.iter().filter_map(|edge| edge.crossing(center)));
        crossings.sort_unstable_by_key(|x| OrderedFloat(*x));

        for pair in crossings.chunks_exact(2) {
            let start = span_start(pair[0]).max(bounds.left);
            let end = span_start(pair[1]).min(bounds.right);
            if start < end {
                surface.blend_span(row, start, end, color);
            }
        }
    }
}

/// First pixel whose center is at or right of `x`.
fn span_start(x: f64) -> i64 {
    pixel_ceil(x - 0.5)
}

/// Non-horizontal polygon edge stored top to bottom.
#[derive(Debug, Clone, Copy)]
struct Edge {
    top: PixelPoint,
    bottom: PixelPoint,
}

impl Edge {
    fn new(a: PixelPoint, b: PixelPoint) -> Option<Self> {
        if a.y == b.y {
            return None;
        }
        // Orientation-independent storage keeps the crossing bit-identical
        // for polygons that share this edge in opposite directions.
        let (top, bottom) = if a.y < b.y { (a, b) } else { (b, a) };
        Some(Self { top, bottom })
    }

    fn crossing(self, center_y: f64) -> Option<f64> {
        if center_y < self.top.y || center_y >= self.bottom.y {
            return None;
        }
        let t = (center_y - self.top.y) / (self.bottom.y - self.top.y);
        Some(self.top.x + t * (self.bottom.x - self.top.x))
    }
}
