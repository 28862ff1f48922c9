use crate::core::PixelRect;
use crate::render::{Color, PixelSurface};

use super::{ClipBounds, pixel_index};

/// Fills the inclusive pixel range spanned by two opposite corners.
///
/// Corners may be given in any order; coincident corners still fill one pixel.
pub fn fill_rect(
    surface: &mut PixelSurface,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    color: Color,
    clip: Option<PixelRect>,
) {
    let Some(span) = PixelSpan::resolve(surface, x0, y0, x1, y1, clip) else {
        return;
    };
    span.fill(surface, color);
}

/// Outlines the inclusive pixel range spanned by two opposite corners with a
/// one pixel border. Each border pixel is written once.
pub fn stroke_rect(
    surface: &mut PixelSurface,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    color: Color,
    clip: Option<PixelRect>,
) {
    if ![x0, y0, x1, y1].iter().all(|value| value.is_finite()) {
        return;
    }
    let Some(bounds) = ClipBounds::resolve(surface, clip) else {
        return;
    };

    let left = pixel_index(x0.min(x1));
    let right = pixel_index(x0.max(x1));
    let top = pixel_index(y0.min(y1));
    let bottom = pixel_index(y0.max(y1));

    let mut fill = |left: i64, top: i64, right: i64, bottom: i64| {
        if let Some(span) = PixelSpan::clamped(left, top, right, bottom, bounds) {
            span.fill(surface, color);
        }
    };
    fill(left, top, right, top);
    if bottom > top {
        fill(left, bottom, right, bottom);
    }
    if bottom - top >= 2 {
        fill(left, top + 1, left, bottom - 1);
        if right > left {
            fill(right, top + 1, right, bottom - 1);
        }
    }
}

/// Inclusive, already clamped pixel rectangle.
#[derive(Debug, Clone, Copy)]
struct PixelSpan {
    left: i64,
    top: i64,
    right: i64,
    bottom: i64,
}

impl PixelSpan {
    fn resolve(
        surface: &PixelSurface,
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        clip: Option<PixelRect>,
    ) -> Option<Self> {
        if ![x0, y0, x1, y1].iter().all(|value| value.is_finite()) {
            return None;
        }
        let bounds = ClipBounds::resolve(surface, clip)?;
        Self::clamped(
            pixel_index(x0.min(x1)),
            pixel_index(y0.min(y1)),
            pixel_index(x0.max(x1)),
            pixel_index(y0.max(y1)),
            bounds,
        )
    }

    fn clamped(left: i64, top: i64, right: i64, bottom: i64, bounds: ClipBounds) -> Option<Self> {
        let span = Self {
            left: left.max(bounds.left),
            top: top.max(bounds.top),
            right: right.min(bounds.right - 1),
            bottom: bottom.min(bounds.bottom - 1),
        };
        (span.left <= span.right && span.top <= span.bottom).then_some(span)
    }

    fn fill(self, surface: &mut PixelSurface, color: Color) {
        for y in self.top..=self.bottom {
            surface.blend_span(y, self.left, self.right + 1, color);
        }
    }
}
