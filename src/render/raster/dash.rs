use serde::{Deserialize, Serialize};

use crate::core::{PixelPoint, PixelRect};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, PixelSurface};

use super::line::{polyline, visible_span};
use super::thick::{MITER_LIMIT, draw_thick_polyline};
use super::{ClipBounds, all_finite};

/// Dash pattern for stroked polylines.
///
/// `pattern` alternates on and off lengths, starting with on, in multiples of
/// `stroke_width`. The phase carries across vertices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashStyle {
    pub pattern: Vec<f64>,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    #[serde(default)]
    pub anti_aliased: bool,
}

fn default_stroke_width() -> f64 {
    1.0
}

impl DashStyle {
    #[must_use]
    pub fn new(pattern: Vec<f64>) -> Self {
        Self {
            pattern,
            stroke_width: default_stroke_width(),
            anti_aliased: false,
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

    pub fn validate(&self) -> ChartResult<()> {
        if self.pattern.is_empty() {
            return Err(ChartError::InvalidData(
                "dash pattern must not be empty".to_owned(),
            ));
        }
        if self
            .pattern
            .iter()
            .any(|length| !length.is_finite() || *length < 0.0)
        {
            return Err(ChartError::InvalidData(
                "dash lengths must be finite and non-negative".to_owned(),
            ));
        }
        if self.pattern.iter().sum::<f64>() <= 0.0 {
            return Err(ChartError::InvalidData(
                "dash pattern must have a positive total length".to_owned(),
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(ChartError::InvalidData(
                "dash stroke width must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Strokes `points` with a dash pattern. Each dash is drawn as its own
/// polyline with flat ends; invalid styles draw nothing.
pub fn draw_dashed_polyline(
    surface: &mut PixelSurface,
    points: &[PixelPoint],
    style: &DashStyle,
    color: Color,
    clip: Option<PixelRect>,
) {
    if points.len() < 2 || !all_finite(points) || style.validate().is_err() {
        return;
    }
    let Some(bounds) = ClipBounds::resolve(surface, clip) else {
        return;
    };

    let mut flush = |run: &[PixelPoint]| {
        if run.len() < 2 {
            return;
        }
        if style.stroke_width > 1.0 {
            draw_thick_polyline(surface, run, style.stroke_width, color, clip);
        } else {
            polyline(surface, run, color, style.anti_aliased, bounds, false);
        }
    };

    // Joins of thick dashes may reach past the stroke by the miter limit.
    let margin = style.stroke_width * MITER_LIMIT + 2.0;
    let mut walker = DashWalker::new(style);
    let mut run: Vec<PixelPoint> = Vec::new();
    if walker.on {
        run.push(points[0]);
    }

    for pair in points.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        let length = (end.x - start.x).hypot(end.y - start.y);
        if length == 0.0 {
            continue;
        }
        let at = |distance: f64| {
            let t = distance / length;
            PixelPoint::new(
                start.x + (end.x - start.x) * t,
                start.y + (end.y - start.y) * t,
            )
        };
        let (enter, exit) = visible_span(start, end, bounds, margin)
            .map_or((length, length), |(t_enter, t_exit)| {
                (t_enter * length, t_exit * length)
            });

        // Off-screen stretches only move the dash phase.
        if enter > 0.0 {
            if walker.on {
                flush(&run);
            }
            run.clear();
            walker.skip(enter);
            if walker.on && enter < length {
                run.push(at(enter));
            }
        }

        let mut travelled = enter;
        while exit - travelled > walker.remaining {
            travelled += walker.remaining;
            let split = at(travelled);
            if walker.on {
                run.push(split);
                flush(&run);
                run.clear();
            }
            walker.advance();
            if walker.on {
                run.push(split);
            }
        }
        walker.remaining -= (exit - travelled).max(0.0);

        if exit < length {
            if walker.on {
                run.push(at(exit));
                flush(&run);
            }
            run.clear();
            walker.skip(length - exit);
        }
        if walker.on {
            run.push(end);
        }
    }
    if walker.on {
        flush(&run);
    }
}

struct DashWalker<'a> {
    lengths: &'a [f64],
    scale: f64,
    index: usize,
    on: bool,
    remaining: f64,
    /// Distance after which index and phase repeat.
    period: f64,
}

impl<'a> DashWalker<'a> {
    fn new(style: &'a DashStyle) -> Self {
        let lengths = style.pattern.as_slice();
        // Odd patterns swap on and off every other cycle.
        let cycles = if lengths.len() % 2 == 0 { 1.0 } else { 2.0 };
        let mut walker = Self {
            lengths,
            scale: style.stroke_width,
            index: 0,
            on: true,
            remaining: lengths[0] * style.stroke_width,
            period: lengths.iter().sum::<f64>() * style.stroke_width * cycles,
        };
        walker.skip_empty();
        walker
    }

    fn advance(&mut self) {
        self.step();
        self.skip_empty();
    }

    /// Moves the phase `distance` along the pattern without visiting every
    /// dash in between.
    fn skip(&mut self, distance: f64) {
        if distance < self.remaining {
            self.remaining -= distance;
            return;
        }
        let mut distance = distance - self.remaining;
        self.advance();
        distance = distance.rem_euclid(self.period);
        while distance >= self.remaining {
            distance -= self.remaining;
            self.advance();
        }
        self.remaining -= distance;
    }

    fn step(&mut self) {
        self.index = (self.index + 1) % self.lengths.len();
        self.on = !self.on;
        self.remaining = self.lengths[self.index] * self.scale;
    }

    /// Zero-length entries only flip the phase. A positive total length
    /// guarantees termination.
    fn skip_empty(&mut self) {
        while self.remaining <= 0.0 {
            self.step();
        }
    }
}
