use serde::{Deserialize, Serialize};

use crate::core::{DoubleRange, SeriesData};
use crate::error::ChartResult;
use crate::render::Color;

use super::segment::{SegmentState, SegmentStats, UpdateContext};
use super::style::{default_stroke_width, draw_stroke, validate_stroke_width};

const KIND: &str = "hi_lo";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HiLoStyle {
    pub color: Color,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
}

impl HiLoStyle {
    #[must_use]
    pub fn new(color: Color) -> Self {
        Self {
            color,
            stroke_width: default_stroke_width(),
        }
    }

    #[must_use]
    pub fn with_stroke_width(mut self, stroke_width: f64) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_stroke_width(self.stroke_width)
    }
}

/// One wick per point, from high to low at the slot median.
#[derive(Debug, Clone)]
pub struct HiLoSegment {
    style: HiLoStyle,
    pub(crate) state: SegmentState,
}

impl HiLoSegment {
    #[must_use]
    pub fn new(style: HiLoStyle) -> Self {
        Self {
            style,
            state: SegmentState::default(),
        }
    }

    #[must_use]
    pub fn style(&self) -> &HiLoStyle {
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
        self.state.clear_scratch();

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
        let median = self.state.side_by_side.median;
        let clip = ctx.clip_rect();
        stats.windowed = window.point_count();
        self.state.colors.reset(window);

        for index in window.indices() {
            let high_point = transformer.transform_to_visible(x[index] + median, high[index]);
            let low_point = transformer.transform_to_visible(x[index] + median, low[index]);
            if !high_point.is_finite() || !low_point.is_finite() {
                stats.skipped += 1;
                continue;
            }
            let color = self
                .state
                .colors
                .resolve(&ctx.colors, index, Some(self.style.color));
            draw_stroke(ctx.surface, high_point, low_point, self.style.stroke_width, color, clip);
            stats.drawn += 1;
        }

        self.state.clear_scratch();
        stats
    }
}
