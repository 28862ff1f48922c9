use serde::{Deserialize, Serialize};

use crate::core::{DoubleRange, PixelPoint, PixelRect, SeriesData};
use crate::error::ChartResult;
use crate::render::{
    Color, DashStyle, PixelSurface, draw_dashed_polyline, draw_polyline, draw_thick_polyline,
};

use super::projection::{collect_indices, project_indices};
use super::segment::{SegmentState, SegmentStats, UpdateContext};
use super::style::{default_stroke_width, validate_stroke_width};

const KIND: &str = "line";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: Color,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    #[serde(default)]
    pub anti_aliased: bool,
    /// On/off lengths in multiples of `stroke_width`; solid when `None`.
    #[serde(default)]
    pub dash_pattern: Option<Vec<f64>>,
    /// Drop points closer than one pixel to the last kept point.
    #[serde(default)]
    pub decimate: bool,
}

impl LineStyle {
    #[must_use]
    pub fn new(color: Color) -> Self {
        Self {
            color,
            stroke_width: default_stroke_width(),
            anti_aliased: false,
            dash_pattern: None,
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
    pub fn with_dash_pattern(mut self, pattern: Vec<f64>) -> Self {
        self.dash_pattern = Some(pattern);
        self
    }

    #[must_use]
    pub fn with_decimation(mut self, decimate: bool) -> Self {
        self.decimate = decimate;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_stroke_width(self.stroke_width)?;
        if let Some(dash) = self.dash_style() {
            dash.validate()?;
        }
        Ok(())
    }

    fn dash_style(&self) -> Option<DashStyle> {
        self.dash_pattern.as_ref().map(|pattern| DashStyle {
            pattern: pattern.clone(),
            stroke_width: self.stroke_width,
            anti_aliased: self.anti_aliased,
        })
    }
}

/// Polyline through the windowed points.
///
/// Runs break at non-finite points (a gap) and wherever the resolved color
/// changes; each segment takes the color of its start point.
#[derive(Debug, Clone)]
pub struct LineSegment {
    style: LineStyle,
    dash: Option<DashStyle>,
    pub(crate) state: SegmentState,
    points: Vec<PixelPoint>,
    run: Vec<PixelPoint>,
}

impl LineSegment {
    #[must_use]
    pub fn new(style: LineStyle) -> Self {
        Self {
            dash: style.dash_style(),
            style,
            state: SegmentState::default(),
            points: Vec::new(),
            run: Vec::new(),
        }
    }

    #[must_use]
    pub fn style(&self) -> &LineStyle {
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
        self.points.clear();
        self.run.clear();

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
        project_indices(transformer, x, y, 0.0, &self.state.indices, &mut self.points);

        self.state.colors.reset(window);
        let clip = ctx.clip_rect();
        let pen = Pen {
            style: &self.style,
            dash: self.dash.as_ref(),
            clip,
        };
        let mut run_color: Option<Color> = None;
        for (&index, &point) in self.state.indices.iter().zip(&self.points) {
            if !point.is_finite() {
                stats.skipped += 1;
                if let Some(color) = run_color.take() {
                    stats.drawn += pen.draw(ctx.surface, &self.run, color);
                }
                self.run.clear();
                continue;
            }

            let color = self
                .state
                .colors
                .resolve(&ctx.colors, index, Some(self.style.color));
            self.run.push(point);
            match run_color {
                Some(current) if current != color => {
                    stats.drawn += pen.draw(ctx.surface, &self.run, current);
                    self.run.clear();
                    self.run.push(point);
                    run_color = Some(color);
                }
                Some(_) => {}
                None => run_color = Some(color),
            }
        }
        if let Some(color) = run_color {
            stats.drawn += pen.draw(ctx.surface, &self.run, color);
        }

        self.run.clear();
        self.points.clear();
        self.state.clear_scratch();
        stats
    }
}

struct Pen<'a> {
    style: &'a LineStyle,
    dash: Option<&'a DashStyle>,
    clip: PixelRect,
}

impl Pen<'_> {
    /// Draws one run; returns the number of runs drawn.
    fn draw(&self, surface: &mut PixelSurface, run: &[PixelPoint], color: Color) -> usize {
        if run.len() < 2 || color.is_transparent() {
            return 0;
        }
        let clip = Some(self.clip);
        match self.dash {
            Some(dash) => draw_dashed_polyline(surface, run, dash, color, clip),
            None if self.style.stroke_width > 1.0 => {
                draw_thick_polyline(surface, run, self.style.stroke_width, color, clip);
            }
            None => draw_polyline(surface, run, color, self.style.anti_aliased, clip),
        }
        1
    }
}
