use tracing::debug;

use crate::core::Viewport;
use crate::render::primitives::{Color, blend_argb};

/// Shared raster target for every fast series of one plot area.
///
/// Pixels are packed `0xAARRGGBB`, row-major, `width * height` entries.
/// Writes go through bounds-checked helpers; segments never index the
/// backing store directly.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelSurface {
    pixels: Vec<u32>,
    width: u32,
    height: u32,
    dirty: bool,
    generation: u64,
}

impl PixelSurface {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            pixels: vec![0; pixel_count(viewport)],
            width: viewport.width,
            height: viewport.height,
            dirty: false,
            generation: 0,
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    /// Incremented every time the backing store is reallocated.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Reallocates the backing store when the size changes. Content is discarded.
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport == self.viewport() {
            return;
        }
        debug!(
            width = viewport.width,
            height = viewport.height,
            "reallocate pixel surface"
        );
        self.pixels = vec![0; pixel_count(viewport)];
        self.width = viewport.width;
        self.height = viewport.height;
        self.generation += 1;
        self.dirty = true;
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color.to_argb());
    }

    #[must_use]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Packed pixel at `(x, y)`, `None` outside the surface.
    #[must_use]
    pub fn argb(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.argb(x, y).map(Color::from_argb)
    }

    /// Number of pixels currently holding exactly `color`.
    #[must_use]
    pub fn count_color(&self, color: Color) -> usize {
        let argb = color.to_argb();
        self.pixels.iter().filter(|&&pixel| pixel == argb).count()
    }

    /// Backing store as little-endian bytes (`B, G, R, A` per pixel).
    #[must_use]
    pub fn raw_bytes(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|pixel| pixel.to_le_bytes())
            .collect()
    }

    /// Signals the host that a frame finished drawing.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    #[must_use]
    pub fn can_render(&self) -> bool {
        self.dirty
    }

    /// Returns the pending dirty signal and resets it.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    #[inline]
    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Composites one pixel; out-of-bounds coordinates are ignored.
    #[inline]
    pub(crate) fn blend(&mut self, x: i64, y: i64, color: Color) {
        if let Some(index) = self.index(x, y) {
            let pixel = &mut self.pixels[index];
            *pixel = blend_argb(*pixel, color, u32::from(color.alpha));
        }
    }

    /// Composites one pixel with fractional coverage in `[0, 1]`.
    #[inline]
    pub(crate) fn blend_coverage(&mut self, x: i64, y: i64, color: Color, coverage: f64) {
        let coverage = coverage.clamp(0.0, 1.0);
        let alpha = (f64::from(color.alpha) * coverage).round() as u32;
        if let Some(index) = self.index(x, y) {
            let pixel = &mut self.pixels[index];
            *pixel = blend_argb(*pixel, color, alpha);
        }
    }

    /// Composites the half-open span `[x_start, x_end)` on row `y`, clamped to the surface.
    pub(crate) fn blend_span(&mut self, y: i64, x_start: i64, x_end: i64, color: Color) {
        if y < 0 || y >= i64::from(self.height) {
            return;
        }
        let start = x_start.max(0);
        let end = x_end.min(i64::from(self.width));
        if start >= end {
            return;
        }

        let row = y as usize * self.width as usize;
        let span = &mut self.pixels[row + start as usize..row + end as usize];
        if color.is_opaque() {
            span.fill(color.to_argb());
        } else {
            let alpha = u32::from(color.alpha);
            for pixel in span {
                *pixel = blend_argb(*pixel, color, alpha);
            }
        }
    }
}

fn pixel_count(viewport: Viewport) -> usize {
    viewport.width as usize * viewport.height as usize
}
