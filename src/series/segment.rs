use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{
    DoubleRange, IndexWindow, PixelRect, SeriesData, Transformer, Viewport, visible_window,
};
use crate::error::ChartResult;
use crate::render::PixelSurface;

use super::candle::CandleSegment;
use super::color::{ColorCache, ColorSource};
use super::column::ColumnSegment;
use super::hilo::HiLoSegment;
use super::hilo_open_close::HiLoOpenCloseSegment;
use super::layout::SideBySideInfo;
use super::line::LineSegment;
use super::range_area::RangeAreaSegment;
use super::scatter::ScatterSegment;
use super::step_line::StepLineSegment;
use super::style::{SeriesKind, SeriesStyle};

/// Per-frame inputs of `FastSegment::update`.
///
/// The surface is borrowed for the duration of one segment update; the host
/// hands the same surface to every series in z-order.
pub struct UpdateContext<'a> {
    pub transformer: &'a dyn Transformer,
    pub surface: &'a mut PixelSurface,
    pub colors: ColorSource<'a>,
    /// Extra clip on top of the transformer's rendered rect.
    pub clip: Option<PixelRect>,
}

impl<'a> UpdateContext<'a> {
    #[must_use]
    pub fn new(transformer: &'a dyn Transformer, surface: &'a mut PixelSurface) -> Self {
        Self {
            transformer,
            surface,
            colors: ColorSource::default(),
            clip: None,
        }
    }

    #[must_use]
    pub fn with_colors(mut self, colors: ColorSource<'a>) -> Self {
        self.colors = colors;
        self
    }

    #[must_use]
    pub fn with_clip(mut self, clip: PixelRect) -> Self {
        self.clip = Some(clip);
        self
    }

    /// Clip handed to the rasterizer: the explicit clip when set, else the
    /// plot area.
    #[must_use]
    pub fn clip_rect(&self) -> PixelRect {
        self.clip
            .unwrap_or_else(|| self.transformer.rendered_rect())
    }
}

/// What one `update` did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentStats {
    /// Indices selected by windowing (after decimation).
    pub windowed: usize,
    /// Marks or runs handed to the rasterizer.
    pub drawn: usize,
    /// Points dropped for non-finite values or culled off the plot.
    pub skipped: usize,
}

impl SegmentStats {
    pub fn accumulate(&mut self, other: Self) {
        self.windowed += other.windowed;
        self.drawn += other.drawn;
        self.skipped += other.skipped;
    }
}

/// State every segment kind carries between frames.
#[derive(Debug, Clone, Default)]
pub(crate) struct SegmentState {
    pub data: Option<SeriesData>,
    pub x_range: DoubleRange,
    pub y_range: DoubleRange,
    pub plot_size: Viewport,
    pub side_by_side: SideBySideInfo,
    pub colors: ColorCache,
    pub indices: Vec<usize>,
}

impl SegmentState {
    /// Stores `data` with its y extent; the x extent comes from the finite
    /// x values.
    pub fn attach(&mut self, data: SeriesData, y_range: DoubleRange) {
        self.x_range = DoubleRange::from_finite_values(data.x_values());
        self.y_range = y_range;
        debug!(
            points = data.len(),
            x_min = self.x_range.min(),
            x_max = self.x_range.max(),
            y_min = self.y_range.min(),
            y_max = self.y_range.max(),
            "attach segment data"
        );
        self.data = Some(data);
    }

    pub fn window(&self, transformer: &dyn Transformer) -> Option<IndexWindow> {
        let data = self.data.as_ref()?;
        visible_window(
            data.x_values(),
            transformer.x_axis().visible_value_range(),
            data.is_indexed(),
            data.is_linearly_ordered(),
        )
    }

    /// `true` when the point can not reach the plot even with a `margin`
    /// pixel wide mark.
    pub fn is_culled(&self, x: f64, y: f64, margin: f64) -> bool {
        if self.plot_size.width == 0 || self.plot_size.height == 0 {
            return false;
        }
        let width = f64::from(self.plot_size.width);
        let height = f64::from(self.plot_size.height);
        x < -margin || y < -margin || x > width + margin || y > height + margin
    }

    pub fn clear_scratch(&mut self) {
        self.colors.clear();
        self.indices.clear();
    }
}

/// One series' raster renderer. Closed set of kinds dispatched by `match`.
#[derive(Debug, Clone)]
pub enum FastSegment {
    Line(LineSegment),
    /// Columns; also used for bars, which draw the same geometry on a
    /// transposed plot.
    Column(ColumnSegment),
    Candle(CandleSegment),
    HiLo(HiLoSegment),
    HiLoOpenClose(HiLoOpenCloseSegment),
    Scatter(ScatterSegment),
    StepLine(StepLineSegment),
    RangeArea(RangeAreaSegment),
}

macro_rules! dispatch {
    ($segment:expr, $inner:ident => $body:expr) => {
        match $segment {
            FastSegment::Line($inner) => $body,
            FastSegment::Column($inner) => $body,
            FastSegment::Candle($inner) => $body,
            FastSegment::HiLo($inner) => $body,
            FastSegment::HiLoOpenClose($inner) => $body,
            FastSegment::Scatter($inner) => $body,
            FastSegment::StepLine($inner) => $body,
            FastSegment::RangeArea($inner) => $body,
        }
    };
}

impl FastSegment {
    /// Builds an empty segment of the kind named by `style`.
    pub fn from_style(style: SeriesStyle) -> ChartResult<Self> {
        style.validate()?;
        let segment = match style {
            SeriesStyle::Line(style) => Self::Line(LineSegment::new(style)),
            SeriesStyle::Column(style) => Self::Column(ColumnSegment::new(style)),
            SeriesStyle::Bar(style) => Self::Column(ColumnSegment::bar(style)),
            SeriesStyle::Candle(style) => Self::Candle(CandleSegment::new(style)),
            SeriesStyle::HiLo(style) => Self::HiLo(HiLoSegment::new(style)),
            SeriesStyle::HiLoOpenClose(style) => {
                Self::HiLoOpenClose(HiLoOpenCloseSegment::new(style))
            }
            SeriesStyle::Scatter(style) => Self::Scatter(ScatterSegment::new(style)),
            SeriesStyle::StepLine(style) => Self::StepLine(StepLineSegment::new(style)),
            SeriesStyle::RangeArea(style) => Self::RangeArea(RangeAreaSegment::new(style)),
        };
        Ok(segment)
    }

    #[must_use]
    pub fn kind(&self) -> SeriesKind {
        match self {
            Self::Line(_) => SeriesKind::Line,
            Self::Column(segment) => segment.kind(),
            Self::Candle(_) => SeriesKind::Candle,
            Self::HiLo(_) => SeriesKind::HiLo,
            Self::HiLoOpenClose(_) => SeriesKind::HiLoOpenClose,
            Self::Scatter(_) => SeriesKind::Scatter,
            Self::StepLine(_) => SeriesKind::StepLine,
            Self::RangeArea(_) => SeriesKind::RangeArea,
        }
    }

    /// Attaches or replaces the data; rejects channel shapes the kind can
    /// not draw.
    pub fn set_data(&mut self, data: SeriesData) -> ChartResult<()> {
        dispatch!(self, segment => segment.set_data(data))
    }

    /// Projects, colors and rasterizes the visible window into
    /// `ctx.surface`. Never fails: bad points are skipped.
    pub fn update(&mut self, ctx: &mut UpdateContext<'_>) -> SegmentStats {
        let kind = self.kind();
        let stats = dispatch!(self, segment => segment.update(ctx));
        trace!(
            kind = kind.as_str(),
            windowed = stats.windowed,
            drawn = stats.drawn,
            skipped = stats.skipped,
            "segment update"
        );
        stats
    }

    /// Records the new plot size; the next `update` re-projects.
    pub fn on_size_changed(&mut self, size: Viewport) {
        self.state_mut().plot_size = size;
    }

    pub fn set_side_by_side(&mut self, info: SideBySideInfo) {
        self.state_mut().side_by_side = info;
    }

    #[must_use]
    pub fn side_by_side(&self) -> SideBySideInfo {
        self.state().side_by_side
    }

    /// X extent of the data, widened by the side-by-side offsets for kinds
    /// that draw marks across a slot.
    #[must_use]
    pub fn x_range(&self) -> DoubleRange {
        let state = self.state();
        if self.kind().uses_side_by_side() && state.data.is_some() {
            DoubleRange::new(
                state.x_range.min() + state.side_by_side.start,
                state.x_range.max() + state.side_by_side.end,
            )
        } else {
            state.x_range
        }
    }

    #[must_use]
    pub fn y_range(&self) -> DoubleRange {
        self.state().y_range
    }

    #[must_use]
    pub fn data(&self) -> Option<&SeriesData> {
        self.state().data.as_ref()
    }

    #[must_use]
    pub fn style(&self) -> SeriesStyle {
        match self {
            Self::Line(segment) => SeriesStyle::Line(segment.style().clone()),
            Self::Column(segment) if segment.kind() == SeriesKind::Bar => {
                SeriesStyle::Bar(segment.style().clone())
            }
            Self::Column(segment) => SeriesStyle::Column(segment.style().clone()),
            Self::Candle(segment) => SeriesStyle::Candle(segment.style().clone()),
            Self::HiLo(segment) => SeriesStyle::HiLo(segment.style().clone()),
            Self::HiLoOpenClose(segment) => SeriesStyle::HiLoOpenClose(segment.style().clone()),
            Self::Scatter(segment) => SeriesStyle::Scatter(segment.style().clone()),
            Self::StepLine(segment) => SeriesStyle::StepLine(segment.style().clone()),
            Self::RangeArea(segment) => SeriesStyle::RangeArea(segment.style().clone()),
        }
    }

    fn state(&self) -> &SegmentState {
        dispatch!(self, segment => &segment.state)
    }

    fn state_mut(&mut self) -> &mut SegmentState {
        dispatch!(self, segment => &mut segment.state)
    }
}
