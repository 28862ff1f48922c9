use serde::{Deserialize, Serialize};

use crate::core::{DoubleRange, PixelPoint, PixelRect, SeriesData};
use crate::error::ChartResult;
use crate::render::{Color, PixelSurface, draw_line_aa, fill_rect};

use super::projection::collect_indices;
use super::segment::{SegmentState, SegmentStats, UpdateContext};
use super::style::{default_stroke_width, validate_stroke_width};

const KIND: &str = "step_line";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepLineStyle {
    pub color: Color,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    #[serde(default)]
    pub anti_aliased: bool,
    #[serde(default)]
    pub decimate: bool,
}

impl StepLineStyle {
    #[must_use]
    pub fn new(color: Color) -> Self {
        Self {
            color,
            stroke_width: default_stroke_width(),
            anti_aliased: false,
            decimate: false,
        }
    }

    #[must_use]
    pub fn with_stroke_width(mut self, stroke_width: f64) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    #[must_use]
    pub fn with_anti_aliased(mut self, anti_aliased: bool) -> Self {
        self.anti_aliased = anti_aliased;
        self
    }

    #[must_use]
    pub fn with_decimation(mut self, decimate: bool) -> Self {
        self.decimate = decimate;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_stroke_width(self.stroke_width)
    }
}

/// Step line: for each pair of points a run along x at the first value,
/// then a run along y to the second value. Both runs are built in data
/// space, so a transposed plot steps the other way on screen.
#[derive(Debug, Clone)]
pub struct StepLineSegment {
    style: StepLineStyle,
    pub(crate) state: SegmentState,
}

impl StepLineSegment {
    #[must_use]
    pub fn new(style: StepLineStyle) -> Self {
        Self {
            style,
            state: SegmentState::default(),
        }
    }

    #[must_use]
    pub fn style(&self) -> &StepLineStyle {
        &self.style
    }

    pub(crate) fn set_data(&mut self, data: SeriesData) -> ChartResult<()> {
        let (_, y) = data.require_xy(KIND)?;
        let y_range = DoubleRange::from_finite_values(y);
        self.state.attach(data, y_range);
        Ok(())
    }

    pub(crate) fn update(&mut self, ctx: &mut UpdateContext<'_>) -> SegmentStats {
        let mut stats = SegmentStats::default();
        self.state.clear_scratch();

        let Some(window) = self.state.window(ctx.transformer) else {
            return stats;
        };
        let Some(Ok((x, y))) = self.state.data.as_ref().map(|data| data.require_xy(KIND)) else {
            return stats;
        };

        let transformer = ctx.transformer;
        collect_indices(
            x,
            y,
            window,
            self.style.decimate,
            transformer.x_axis(),
            transformer.y_axis(),
            &mut self.state.indices,
        );
        stats.windowed = self.state.indices.len();
        self.state.colors.reset(window);
        let clip = ctx.clip_rect();
        let half = (self.style.stroke_width - 1.0).max(0.0) * 0.5;

        for pair in self.state.indices.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            let start = transformer.transform_to_visible(x[from], y[from]);
            let corner = transformer.transform_to_visible(x[to], y[from]);
            let end = transformer.transform_to_visible(x[to], y[to]);
            if !start.is_finite() || !corner.is_finite() || !end.is_finite() {
                stats.skipped += 1;
                continue;
            }
            let color = self
                .state
                .colors
                .resolve(&ctx.colors, from, Some(self.style.color));
            for (a, b) in [(start, corner), (corner, end)] {
                let rect = StepRect::around(a, b, half);
                fill_rect(
                    ctx.surface,
                    rect.left,
                    rect.top,
                    rect.right,
                    rect.bottom,
                    color,
                    Some(clip),
                );
                if self.style.anti_aliased {
                    frame_rect(ctx.surface, rect, color, clip);
                }
            }
            stats.drawn += 1;
        }

        self.state.clear_scratch();
        stats
    }
}

/// Axis-aligned run between two pixel points, grown by `half` on all sides.
#[derive(Debug, Clone, Copy, PartialEq)]
struct StepRect {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

impl StepRect {
    fn around(a: PixelPoint, b: PixelPoint, half: f64) -> Self {
        Self {
            left: a.x.min(b.x) - half,
            top: a.y.min(b.y) - half,
            right: a.x.max(b.x) + half,
            bottom: a.y.max(b.y) + half,
        }
    }
}

/// Four anti-aliased strokes along the outer pixel edges of `rect`.
fn frame_rect(surface: &mut PixelSurface, rect: StepRect, color: Color, clip: PixelRect) {
    let left = rect.left.floor();
    let top = rect.top.floor();
    let right = rect.right.floor() + 1.0;
    let bottom = rect.bottom.floor() + 1.0;
    let corners = [
        PixelPoint::new(left, top),
        PixelPoint::new(right, top),
        PixelPoint::new(right, bottom),
        PixelPoint::new(left, bottom),
    ];
    for (side, &corner) in corners.iter().enumerate() {
        let next = corners[(side + 1) % corners.len()];
        draw_line_aa(surface, corner, next, color, Some(clip));
    }
}
