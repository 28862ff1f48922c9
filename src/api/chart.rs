use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{
    AxisState, CartesianTransformer, DoubleRange, Observable, PixelPoint, SeriesData, Viewport,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, PixelSurface};
use crate::series::{
    ColorSource, FastSegment, Palette, SegmentStats, SelectionState, SeriesStyle, SideBySideInfo,
    UpdateContext,
};

use super::{ChartConfig, DirtyFlag};

/// Totals of one rendered frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameStats {
    /// Sequence number of the frame, starting at 1.
    pub frame: u64,
    /// Series whose segment ran an update.
    pub series: usize,
    pub windowed: usize,
    pub drawn: usize,
    pub skipped: usize,
}

#[derive(Debug)]
struct SeriesEntry {
    segment: FastSegment,
    point_colors: IndexMap<usize, Color>,
    visible: bool,
}

/// Plot host: owns the pixel surface, the projection state, the series
/// registry (z-order is insertion order) and selection, and runs frames.
///
/// Every mutation raises the dirty flag; `render_if_dirty` consumes it.
#[derive(Debug)]
pub struct RasterChart {
    surface: PixelSurface,
    background: Color,
    transformer: Observable<CartesianTransformer>,
    selection: Observable<SelectionState>,
    palette: Option<Palette>,
    side_by_side: bool,
    slot_width: f64,
    series: IndexMap<String, SeriesEntry>,
    dirty: DirtyFlag,
    frames: u64,
}

impl RasterChart {
    pub fn new(config: ChartConfig) -> ChartResult<Self> {
        config.validate()?;

        let viewport = config.viewport;
        let base = CartesianTransformer::new(config.x_axis, config.y_axis)
            .with_transposed(config.transposed);
        let dirty = DirtyFlag::new(true);

        let mut transformer = Observable::new(fit_to_viewport(base, viewport));
        let flag = dirty.clone();
        transformer.subscribe(move |_| flag.mark());
        let mut selection = Observable::new(SelectionState::default());
        let flag = dirty.clone();
        selection.subscribe(move |_| flag.mark());

        let mut chart = Self {
            surface: PixelSurface::new(viewport),
            background: config.background,
            transformer,
            selection,
            palette: config.palette,
            side_by_side: config.side_by_side,
            slot_width: config.slot_width,
            series: IndexMap::new(),
            dirty,
            frames: 0,
        };
        for (id, style) in config.series {
            chart.add_series(id, style)?;
        }

        debug!(
            width = viewport.width,
            height = viewport.height,
            series = chart.series.len(),
            "create raster chart"
        );
        Ok(chart)
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.surface.viewport()
    }

    #[must_use]
    pub fn surface(&self) -> &PixelSurface {
        &self.surface
    }

    /// Consumes the surface's "frame ready" signal.
    pub fn take_frame_ready(&mut self) -> bool {
        self.surface.take_dirty()
    }

    #[must_use]
    pub fn transformer(&self) -> CartesianTransformer {
        *self.transformer.get()
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        self.selection.get()
    }

    #[must_use]
    pub fn palette(&self) -> Option<&Palette> {
        self.palette.as_ref()
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty.is_dirty()
    }

    /// Requests a frame without changing any state.
    pub fn invalidate(&self) {
        self.dirty.mark();
    }

    /// Series ids in z-order.
    pub fn series_ids(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    #[must_use]
    pub fn series(&self, id: &str) -> Option<&FastSegment> {
        self.series.get(id).map(|entry| &entry.segment)
    }

    pub fn add_series(&mut self, id: impl Into<String>, style: SeriesStyle) -> ChartResult<()> {
        let id = id.into();
        if self.series.contains_key(&id) {
            return Err(ChartError::DuplicateSeries(id));
        }
        let kind = style.kind();
        let mut segment = FastSegment::from_style(style)?;
        segment.on_size_changed(self.viewport());
        self.series.insert(
            id.clone(),
            SeriesEntry {
                segment,
                point_colors: IndexMap::new(),
                visible: true,
            },
        );
        self.relayout_side_by_side()?;
        self.dirty.mark();
        debug!(series_id = %id, kind = kind.as_str(), "add series");
        Ok(())
    }

    /// Removes a series and its selection entries.
    pub fn remove_series(&mut self, id: &str) -> ChartResult<FastSegment> {
        let entry = self
            .series
            .shift_remove(id)
            .ok_or_else(|| ChartError::UnknownSeries(id.to_owned()))?;
        self.selection.update(|selection| selection.forget_series(id));
        self.relayout_side_by_side()?;
        self.dirty.mark();
        debug!(series_id = %id, "remove series");
        Ok(entry.segment)
    }

    pub fn set_series_data(&mut self, id: &str, data: SeriesData) -> ChartResult<()> {
        let points = data.len();
        self.entry_mut(id)?.segment.set_data(data)?;
        self.dirty.mark();
        debug!(series_id = %id, points, "set series data");
        Ok(())
    }

    /// Applies several data updates; failing entries are logged and
    /// skipped. Returns how many were applied.
    pub fn set_series_data_batch(
        &mut self,
        updates: impl IntoIterator<Item = (String, SeriesData)>,
    ) -> usize {
        let mut applied = 0;
        for (id, data) in updates {
            match self.set_series_data(&id, data) {
                Ok(()) => applied += 1,
                Err(err) => warn!(series_id = %id, error = %err, "skip series data update"),
            }
        }
        applied
    }

    pub fn set_series_visible(&mut self, id: &str, visible: bool) -> ChartResult<()> {
        self.entry_mut(id)?.visible = visible;
        self.relayout_side_by_side()?;
        self.dirty.mark();
        Ok(())
    }

    /// Explicit color of one point; outranks the palette and series brush.
    pub fn set_point_color(&mut self, id: &str, index: usize, color: Color) -> ChartResult<()> {
        self.entry_mut(id)?.point_colors.insert(index, color);
        self.dirty.mark();
        Ok(())
    }

    pub fn clear_point_colors(&mut self, id: &str) -> ChartResult<()> {
        self.entry_mut(id)?.point_colors.clear();
        self.dirty.mark();
        Ok(())
    }

    pub fn set_palette(&mut self, palette: Option<Palette>) -> ChartResult<()> {
        if let Some(palette) = &palette {
            palette.validate()?;
        }
        self.palette = palette;
        self.dirty.mark();
        Ok(())
    }

    pub fn set_background(&mut self, background: Color) {
        self.background = background;
        self.dirty.mark();
    }

    pub fn set_x_visible_range(&mut self, start: f64, end: f64) -> ChartResult<()> {
        let axis = self.transformer.get().x_axis.with_visible_range(start, end);
        axis.validate()?;
        self.transformer.update(|transformer| transformer.x_axis = axis);
        trace!(start, end, "set x visible range");
        Ok(())
    }

    pub fn set_y_visible_range(&mut self, start: f64, end: f64) -> ChartResult<()> {
        let axis = self.transformer.get().y_axis.with_visible_range(start, end);
        axis.validate()?;
        self.transformer.update(|transformer| transformer.y_axis = axis);
        trace!(start, end, "set y visible range");
        Ok(())
    }

    /// Replaces an axis; rendered size and offset are refit to the viewport.
    pub fn set_x_axis(&mut self, axis: AxisState) -> ChartResult<()> {
        axis.validate()?;
        let viewport = self.viewport();
        self.transformer.update(|transformer| {
            transformer.x_axis = axis;
            *transformer = fit_to_viewport(*transformer, viewport);
        });
        Ok(())
    }

    pub fn set_y_axis(&mut self, axis: AxisState) -> ChartResult<()> {
        axis.validate()?;
        let viewport = self.viewport();
        self.transformer.update(|transformer| {
            transformer.y_axis = axis;
            *transformer = fit_to_viewport(*transformer, viewport);
        });
        Ok(())
    }

    pub fn set_transposed(&mut self, transposed: bool) {
        let viewport = self.viewport();
        self.transformer.update(|transformer| {
            *transformer = fit_to_viewport(transformer.with_transposed(transposed), viewport);
        });
    }

    pub fn set_series_selection_enabled(&mut self, enabled: bool) {
        self.selection
            .update(|selection| selection.series.enabled = enabled);
    }

    pub fn set_series_selection_color(&mut self, color: Color) {
        self.selection
            .update(|selection| selection.series.color = color);
    }

    pub fn select_series(&mut self, id: &str) -> ChartResult<()> {
        self.ensure_series(id)?;
        self.selection.update(|selection| selection.select_series(id));
        Ok(())
    }

    pub fn deselect_series(&mut self, id: &str) -> ChartResult<()> {
        self.ensure_series(id)?;
        self.selection.update(|selection| {
            selection.deselect_series(id);
        });
        Ok(())
    }

    pub fn set_point_selection_enabled(&mut self, id: &str, enabled: bool) -> ChartResult<()> {
        self.ensure_series(id)?;
        self.selection
            .update(|selection| selection.set_point_selection_enabled(id, enabled));
        Ok(())
    }

    pub fn set_point_selection_color(&mut self, id: &str, color: Color) -> ChartResult<()> {
        self.ensure_series(id)?;
        self.selection.update(|selection| {
            selection.points.entry(id.to_owned()).or_default().color = color;
        });
        Ok(())
    }

    pub fn select_point(&mut self, id: &str, index: usize) -> ChartResult<()> {
        self.ensure_series(id)?;
        self.selection
            .update(|selection| selection.select_point(id, index));
        Ok(())
    }

    pub fn deselect_point(&mut self, id: &str, index: usize) -> ChartResult<()> {
        self.ensure_series(id)?;
        self.selection.update(|selection| {
            selection.deselect_point(id, index);
        });
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection.update(SelectionState::clear);
    }

    /// Reallocates the surface and refits the axes. Segments re-project on
    /// the next frame.
    pub fn resize(&mut self, viewport: Viewport) -> ChartResult<()> {
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if viewport == self.viewport() {
            return Ok(());
        }
        self.surface.resize(viewport);
        self.transformer
            .update(|transformer| *transformer = fit_to_viewport(*transformer, viewport));
        for entry in self.series.values_mut() {
            entry.segment.on_size_changed(viewport);
        }
        debug!(
            width = viewport.width,
            height = viewport.height,
            generation = self.surface.generation(),
            "resize raster chart"
        );
        Ok(())
    }

    /// Clears the surface and draws every visible series in z-order, then
    /// signals the surface as ready.
    pub fn render_frame(&mut self) -> FrameStats {
        self.dirty.take();
        self.frames += 1;
        self.surface.clear(self.background);

        let base = *self.transformer.get();
        let viewport = self.surface.viewport();
        let selection = self.selection.get();
        let mut totals = SegmentStats::default();
        let mut drawn_series = 0;

        for (series_index, (id, entry)) in self.series.iter_mut().enumerate() {
            if !entry.visible {
                continue;
            }
            let transformer = if entry.segment.kind().flips_transposition() {
                fit_to_viewport(base.with_transposed(!base.transposed), viewport)
            } else {
                base
            };
            let colors = ColorSource {
                series_selection: selection.series_color(id),
                point_selection: selection.point_selection(id),
                point_colors: Some(&entry.point_colors),
                palette: self.palette.as_ref(),
                series_index,
            };
            let mut ctx = UpdateContext::new(&transformer, &mut self.surface).with_colors(colors);
            totals.accumulate(entry.segment.update(&mut ctx));
            drawn_series += 1;
        }

        self.surface.mark_dirty();
        let stats = FrameStats {
            frame: self.frames,
            series: drawn_series,
            windowed: totals.windowed,
            drawn: totals.drawn,
            skipped: totals.skipped,
        };
        trace!(
            frame = stats.frame,
            series = stats.series,
            windowed = stats.windowed,
            drawn = stats.drawn,
            skipped = stats.skipped,
            "render frame"
        );
        stats
    }

    /// Renders only when something changed since the last frame.
    pub fn render_if_dirty(&mut self) -> Option<FrameStats> {
        if self.dirty.is_dirty() {
            Some(self.render_frame())
        } else {
            None
        }
    }

    /// Union of the x extents of every visible series with data, for the
    /// external axis range computation.
    #[must_use]
    pub fn combined_x_range(&self) -> Option<DoubleRange> {
        self.combined_range(FastSegment::x_range)
    }

    #[must_use]
    pub fn combined_y_range(&self) -> Option<DoubleRange> {
        self.combined_range(FastSegment::y_range)
    }

    /// Data values under a pixel of the plot.
    #[must_use]
    pub fn pixel_to_value(&self, point: PixelPoint) -> (f64, f64) {
        self.transformer.get().pixel_to_value(point)
    }

    fn combined_range(&self, range: impl Fn(&FastSegment) -> DoubleRange) -> Option<DoubleRange> {
        self.series
            .values()
            .filter(|entry| entry.visible && entry.segment.data().is_some())
            .map(|entry| range(&entry.segment))
            .reduce(DoubleRange::union)
    }

    fn ensure_series(&self, id: &str) -> ChartResult<()> {
        if self.series.contains_key(id) {
            Ok(())
        } else {
            Err(ChartError::UnknownSeries(id.to_owned()))
        }
    }

    fn entry_mut(&mut self, id: &str) -> ChartResult<&mut SeriesEntry> {
        self.series
            .get_mut(id)
            .ok_or_else(|| ChartError::UnknownSeries(id.to_owned()))
    }

    /// Shares each category slot between the visible side-by-side series,
    /// in z-order.
    fn relayout_side_by_side(&mut self) -> ChartResult<()> {
        let participants = self
            .series
            .values()
            .filter(|entry| entry.visible && entry.segment.kind().uses_side_by_side())
            .count();

        let mut position = 0;
        for entry in self.series.values_mut() {
            if !entry.segment.kind().uses_side_by_side() {
                continue;
            }
            let info = if self.side_by_side && entry.visible && participants > 1 {
                let info = SideBySideInfo::for_slot(self.slot_width, position, participants)?;
                position += 1;
                info
            } else {
                SideBySideInfo::centered(self.slot_width)
            };
            entry.segment.set_side_by_side(info);
        }
        Ok(())
    }
}

/// Sizes the horizontal axis to the viewport width and the vertical axis
/// to its height.
fn fit_to_viewport(transformer: CartesianTransformer, viewport: Viewport) -> CartesianTransformer {
    let width = f64::from(viewport.width);
    let height = f64::from(viewport.height);
    let (x_size, y_size) = if transformer.transposed {
        (height, width)
    } else {
        (width, height)
    };
    let mut fitted = transformer;
    fitted.x_axis.rendered_size = x_size;
    fitted.x_axis.rendered_offset = 0.0;
    fitted.y_axis.rendered_size = y_size;
    fitted.y_axis.rendered_offset = 0.0;
    fitted
}
