use serde::{Deserialize, Serialize};

use crate::core::{DoubleRange, PixelPoint, PixelRect, SeriesData};
use crate::error::ChartResult;
use crate::render::{Color, PixelSurface, draw_polyline, draw_thick_polyline, fill_polygon};

use super::projection::project_indices;
use super::segment::{SegmentState, SegmentStats, UpdateContext};
use super::style::StrokeStyle;

const KIND: &str = "range_area";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeAreaStyle {
    pub color: Color,
    /// Drawn along the high and the low boundary.
    #[serde(default)]
    pub stroke: Option<StrokeStyle>,
}

impl RangeAreaStyle {
    #[must_use]
    pub fn new(color: Color) -> Self {
        Self {
            color,
            stroke: None,
        }
    }

    #[must_use]
    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        match self.stroke {
            Some(stroke) => stroke.validate(),
            None => Ok(()),
        }
    }
}

/// Band between the high and the low channel.
///
/// The polygon walks high forward and low backward and closes on its first
/// vertex. A point with any non-finite value splits the band.
#[derive(Debug, Clone)]
pub struct RangeAreaSegment {
    style: RangeAreaStyle,
    pub(crate) state: SegmentState,
    high_points: Vec<PixelPoint>,
    low_points: Vec<PixelPoint>,
    polygon: Vec<PixelPoint>,
}

impl RangeAreaSegment {
    #[must_use]
    pub fn new(style: RangeAreaStyle) -> Self {
        Self {
            style,
            state: SegmentState::default(),
            high_points: Vec::new(),
            low_points: Vec::new(),
            polygon: Vec::new(),
        }
    }

    #[must_use]
    pub fn style(&self) -> &RangeAreaStyle {
        &self.style
    }

    pub(crate) fn set_data(&mut self, data: SeriesData) -> ChartResult<()> {
        let (_, high, low) = data.require_high_low(KIND)?;
        let y_range = DoubleRange::from_finite_values(high.iter().chain(low));
        self.state.attach(data, y_range);
        Ok(())
    }

    pub(crate) fn update(&mut self, ctx: &mut UpdateContext<'_>) -> SegmentStats {
        let mut stats = SegmentStats::default();
        self.clear_scratch();

        let Some(window) = self.state.window(ctx.transformer) else {
            return stats;
        };
        let Some(Ok((x, high, low))) = self
            .state
            .data
            .as_ref()
            .map(|data| data.require_high_low(KIND))
        else {
            return stats;
        };

        let transformer = ctx.transformer;
        self.state.indices.extend(window.indices());
        stats.windowed = self.state.indices.len();
        project_indices(transformer, x, high, 0.0, &self.state.indices, &mut self.high_points);
        project_indices(transformer, x, low, 0.0, &self.state.indices, &mut self.low_points);
        self.state.colors.reset(window);
        let clip = ctx.clip_rect();

        let mut run_start = 0;
        for slot in 0..=self.state.indices.len() {
            let finite = slot < self.state.indices.len()
                && self.high_points[slot].is_finite()
                && self.low_points[slot].is_finite();
            if finite {
                continue;
            }
            if slot < self.state.indices.len() {
                stats.skipped += 1;
            }
            if slot - run_start >= 2 {
                let color = self.state.colors.resolve(
                    &ctx.colors,
                    self.state.indices[run_start],
                    Some(self.style.color),
                );
                let high_run = &self.high_points[run_start..slot];
                let low_run = &self.low_points[run_start..slot];
                self.polygon.clear();
                self.polygon.extend_from_slice(high_run);
                self.polygon.extend(low_run.iter().rev());
                fill_polygon(ctx.surface, &self.polygon, color, Some(clip));
                if let Some(stroke) = self.style.stroke {
                    stroke_boundary(ctx.surface, high_run, stroke, clip);
                    stroke_boundary(ctx.surface, low_run, stroke, clip);
                }
                stats.drawn += 1;
            }
            run_start = slot + 1;
        }

        self.clear_scratch();
        stats
    }

    fn clear_scratch(&mut self) {
        self.state.clear_scratch();
        self.high_points.clear();
        self.low_points.clear();
        self.polygon.clear();
    }
}

fn stroke_boundary(
    surface: &mut PixelSurface,
    boundary: &[PixelPoint],
    stroke: StrokeStyle,
    clip: PixelRect,
) {
    if stroke.width > 1.0 {
        draw_thick_polyline(surface, boundary, stroke.width, stroke.color, Some(clip));
    } else {
        draw_polyline(surface, boundary, stroke.color, false, Some(clip));
    }
}
