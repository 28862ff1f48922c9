use serde::{Deserialize, Serialize};

use crate::core::{AxisState, DoubleRange, PixelPoint, PixelRect, SeriesData};
use crate::error::ChartResult;
use crate::render::{Color, PixelSurface, fill_rect, stroke_rect};

use super::layout::validate_spacing;
use super::segment::{SegmentState, SegmentStats, UpdateContext};
use super::style::{SeriesKind, StrokeStyle};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnStyle {
    pub color: Color,
    /// Share of the slot left empty, split evenly on both sides.
    #[serde(default)]
    pub spacing: f64,
    #[serde(default)]
    pub border: Option<StrokeStyle>,
}

impl ColumnStyle {
    #[must_use]
    pub fn new(color: Color) -> Self {
        Self {
            color,
            spacing: 0.0,
            border: None,
        }
    }

    #[must_use]
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    #[must_use]
    pub fn with_border(mut self, border: StrokeStyle) -> Self {
        self.border = Some(border);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_spacing(self.spacing)?;
        if let Some(border) = self.border {
            border.validate()?;
        }
        Ok(())
    }
}

/// Columns from the value down (or up) to the origin.
#[derive(Debug, Clone)]
pub struct ColumnSegment {
    kind: SeriesKind,
    style: ColumnStyle,
    pub(crate) state: SegmentState,
}

impl ColumnSegment {
    #[must_use]
    pub fn new(style: ColumnStyle) -> Self {
        Self {
            kind: SeriesKind::Column,
            style,
            state: SegmentState::default(),
        }
    }

    /// Column geometry reported as a bar series; the host draws it with the
    /// plot axes swapped.
    #[must_use]
    pub fn bar(style: ColumnStyle) -> Self {
        Self {
            kind: SeriesKind::Bar,
            ..Self::new(style)
        }
    }

    #[must_use]
    pub fn kind(&self) -> SeriesKind {
        self.kind
    }

    #[must_use]
    pub fn style(&self) -> &ColumnStyle {
        &self.style
    }

    pub(crate) fn set_data(&mut self, data: SeriesData) -> ChartResult<()> {
        let (_, y) = data.require_xy(self.kind.as_str())?;
        let y_range = DoubleRange::from_finite_values(y).union(DoubleRange::zero());
        self.state.attach(data, y_range);
        Ok(())
    }

    pub(crate) fn update(&mut self, ctx: &mut UpdateContext<'_>) -> SegmentStats {
        let mut stats = SegmentStats::default();
        self.state.clear_scratch();

        let Some(window) = self.state.window(ctx.transformer) else {
            return stats;
        };
        let kind = self.kind.as_str();
        let Some(Ok((x, y))) = self.state.data.as_ref().map(|data| data.require_xy(kind)) else {
            return stats;
        };

        let transformer = ctx.transformer;
        let (start, end) = self.state.side_by_side.with_spacing(self.style.spacing);
        let origin = column_origin(transformer.y_axis());
        let clip = ctx.clip_rect();
        stats.windowed = window.point_count();
        self.state.colors.reset(window);

        for index in window.indices() {
            let (x_value, y_value) = (x[index], y[index]);
            if !x_value.is_finite() || !y_value.is_finite() {
                stats.skipped += 1;
                continue;
            }
            let value_corner = transformer.transform_to_visible(x_value + start, y_value);
            let origin_corner = transformer.transform_to_visible(x_value + end, origin);
            if !value_corner.is_finite() || !origin_corner.is_finite() {
                stats.skipped += 1;
                continue;
            }

            let color = self
                .state
                .colors
                .resolve(&ctx.colors, index, Some(self.style.color));
            fill_rect(
                ctx.surface,
                value_corner.x,
                value_corner.y,
                origin_corner.x,
                origin_corner.y,
                color,
                Some(clip),
            );
            if let Some(border) = self.style.border {
                stroke_border(ctx.surface, value_corner, origin_corner, border, clip);
            }
            stats.drawn += 1;
        }

        self.state.clear_scratch();
        stats
    }
}

/// Value the columns grow from: zero clamped into the visible range, or the
/// visible start on a logarithmic axis.
#[must_use]
pub fn column_origin(y_axis: &AxisState) -> f64 {
    let visible = y_axis.visible_value_range();
    if y_axis.logarithmic {
        visible.min()
    } else {
        0.0_f64.max(visible.min()).min(visible.max())
    }
}

/// Nested one pixel outlines, `width` of them, growing inwards.
fn stroke_border(
    surface: &mut PixelSurface,
    a: PixelPoint,
    b: PixelPoint,
    border: StrokeStyle,
    clip: PixelRect,
) {
    let (left, right) = (a.x.min(b.x), a.x.max(b.x));
    let (top, bottom) = (a.y.min(b.y), a.y.max(b.y));
    let rings = border.width.round().max(1.0) as usize;
    for ring in 0..rings {
        let inset = ring as f64;
        if left + inset > right - inset || top + inset > bottom - inset {
            break;
        }
        stroke_rect(
            surface,
            left + inset,
            top + inset,
            right - inset,
            bottom - inset,
            border.color,
            Some(clip),
        );
    }
}
