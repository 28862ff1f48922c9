use std::f64::consts::{FRAC_1_SQRT_2, PI};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{DoubleRange, PixelPoint, SeriesData};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, fill_ellipse, fill_polygon};

use super::projection::project_indices;
use super::segment::{SegmentState, SegmentStats, UpdateContext};

const KIND: &str = "scatter";

/// Half thickness of the plus and cross arms, relative to the half size.
const ARM: f64 = 1.0 / 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerShape {
    #[default]
    Ellipse,
    Square,
    Diamond,
    Triangle,
    InvertedTriangle,
    Pentagon,
    Hexagon,
    Plus,
    Cross,
}

pub type MarkerVertices = SmallVec<[PixelPoint; 12]>;

impl MarkerShape {
    /// Polygon vertices on the unit square `[-1, 1]^2`, screen y down.
    /// Empty for `Ellipse`, which is scan converted directly.
    #[must_use]
    pub fn unit_vertices(self) -> MarkerVertices {
        let mut vertices = MarkerVertices::new();
        match self {
            Self::Ellipse => {}
            Self::Square => {
                vertices.extend(points(&[(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)]));
            }
            Self::Diamond => {
                vertices.extend(points(&[(0.0, -1.0), (1.0, 0.0), (0.0, 1.0), (-1.0, 0.0)]));
            }
            Self::Triangle => vertices.extend(points(&[(0.0, -1.0), (1.0, 1.0), (-1.0, 1.0)])),
            Self::InvertedTriangle => {
                vertices.extend(points(&[(-1.0, -1.0), (1.0, -1.0), (0.0, 1.0)]));
            }
            Self::Pentagon => vertices.extend(regular(5, -PI / 2.0)),
            Self::Hexagon => vertices.extend(regular(6, 0.0)),
            Self::Plus => vertices.extend(plus()),
            Self::Cross => vertices.extend(plus().map(|point| {
                PixelPoint::new(
                    (point.x - point.y) * FRAC_1_SQRT_2,
                    (point.x + point.y) * FRAC_1_SQRT_2,
                )
            })),
        }
        vertices
    }
}

fn points(coordinates: &[(f64, f64)]) -> impl Iterator<Item = PixelPoint> + '_ {
    coordinates.iter().map(|&(x, y)| PixelPoint::new(x, y))
}

fn regular(sides: usize, start_angle: f64) -> impl Iterator<Item = PixelPoint> {
    (0..sides).map(move |side| {
        let angle = start_angle + 2.0 * PI * side as f64 / sides as f64;
        PixelPoint::new(angle.cos(), angle.sin())
    })
}

fn plus() -> impl Iterator<Item = PixelPoint> {
    [
        (-ARM, -1.0),
        (ARM, -1.0),
        (ARM, -ARM),
        (1.0, -ARM),
        (1.0, ARM),
        (ARM, ARM),
        (ARM, 1.0),
        (-ARM, 1.0),
        (-ARM, ARM),
        (-1.0, ARM),
        (-1.0, -ARM),
        (-ARM, -ARM),
    ]
    .into_iter()
    .map(|(x, y)| PixelPoint::new(x, y))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterStyle {
    pub color: Color,
    #[serde(default)]
    pub shape: MarkerShape,
    #[serde(default = "default_marker_size")]
    pub marker_width: f64,
    #[serde(default = "default_marker_size")]
    pub marker_height: f64,
}

fn default_marker_size() -> f64 {
    6.0
}

impl ScatterStyle {
    #[must_use]
    pub fn new(color: Color) -> Self {
        Self {
            color,
            shape: MarkerShape::Ellipse,
            marker_width: default_marker_size(),
            marker_height: default_marker_size(),
        }
    }

    #[must_use]
    pub fn with_shape(mut self, shape: MarkerShape) -> Self {
        self.shape = shape;
        self
    }

    #[must_use]
    pub fn with_marker_size(mut self, width: f64, height: f64) -> Self {
        self.marker_width = width;
        self.marker_height = height;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        for (name, size) in [("width", self.marker_width), ("height", self.marker_height)] {
            if !size.is_finite() || size <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "marker {name} must be finite and > 0"
                )));
            }
        }
        Ok(())
    }
}

/// Places the unit marker around `center`. Transposed plots swap the x and
/// y role of every vertex offset.
#[must_use]
pub fn marker_polygon(
    shape: MarkerShape,
    center: PixelPoint,
    width: f64,
    height: f64,
    transposed: bool,
) -> MarkerVertices {
    let (half_width, half_height) = (width * 0.5, height * 0.5);
    shape
        .unit_vertices()
        .into_iter()
        .map(|unit| {
            let (dx, dy) = (unit.x * half_width, unit.y * half_height);
            if transposed {
                PixelPoint::new(center.x + dy, center.y + dx)
            } else {
                PixelPoint::new(center.x + dx, center.y + dy)
            }
        })
        .collect()
}

/// One filled marker per point.
#[derive(Debug, Clone)]
pub struct ScatterSegment {
    style: ScatterStyle,
    pub(crate) state: SegmentState,
    points: Vec<PixelPoint>,
}

impl ScatterSegment {
    #[must_use]
    pub fn new(style: ScatterStyle) -> Self {
        Self {
            style,
            state: SegmentState::default(),
            points: Vec::new(),
        }
    }

    #[must_use]
    pub fn style(&self) -> &ScatterStyle {
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

        let Some(window) = self.state.window(ctx.transformer) else {
            return stats;
        };
        let Some(Ok((x, y))) = self.state.data.as_ref().map(|data| data.require_xy(KIND)) else {
            return stats;
        };

        let transformer = ctx.transformer;
        let transposed = transformer.is_transposed();
        let (width, height) = (self.style.marker_width, self.style.marker_height);
        let margin = width.max(height);
        let clip = Some(ctx.clip_rect());
        self.state.indices.extend(window.indices());
        stats.windowed = self.state.indices.len();
        project_indices(transformer, x, y, 0.0, &self.state.indices, &mut self.points);
        self.state.colors.reset(window);

        for (&index, &center) in self.state.indices.iter().zip(&self.points) {
            if !center.is_finite() || self.state.is_culled(center.x, center.y, margin) {
                stats.skipped += 1;
                continue;
            }
            let color = self
                .state
                .colors
                .resolve(&ctx.colors, index, Some(self.style.color));
            if self.style.shape == MarkerShape::Ellipse {
                let (radius_x, radius_y) = if transposed {
                    (height * 0.5, width * 0.5)
                } else {
                    (width * 0.5, height * 0.5)
                };
                fill_ellipse(ctx.surface, center, radius_x, radius_y, color, clip);
            } else {
                let polygon = marker_polygon(self.style.shape, center, width, height, transposed);
                fill_polygon(ctx.surface, &polygon, color, clip);
            }
            stats.drawn += 1;
        }

        self.points.clear();
        self.state.clear_scratch();
        stats
    }
}
