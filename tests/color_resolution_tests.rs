use chart_raster::core::IndexWindow;
use chart_raster::render::Color;
use chart_raster::series::{
    ColorCache, ColorSource, Palette, PaletteMode, PointSelection, SelectionState, resolve_color,
};
use indexmap::IndexMap;

const RED: Color = Color::rgb(255, 0, 0);
const GREEN: Color = Color::rgb(0, 255, 0);
const BLUE: Color = Color::rgb(0, 0, 255);
const GREY: Color = Color::rgb(128, 128, 128);
const ORANGE: Color = Color::rgb(255, 140, 0);

fn point_colors(entries: &[(usize, Color)]) -> IndexMap<usize, Color> {
    entries.iter().copied().collect()
}

#[test]
fn series_selection_dominates_every_other_source() {
    let explicit = point_colors(&[(0, GREEN)]);
    let palette = Palette::new(vec![BLUE]);
    let source = ColorSource {
        series_selection: Some(RED),
        point_colors: Some(&explicit),
        palette: Some(&palette),
        ..ColorSource::default()
    };
    assert_eq!(resolve_color(&source, 0, Some(GREY)), RED);
}

#[test]
fn point_selection_beats_explicit_and_palette_colors() {
    let explicit = point_colors(&[(3, GREEN)]);
    let palette = Palette::new(vec![BLUE]);
    let mut selection = PointSelection {
        enabled: true,
        color: ORANGE,
        ..PointSelection::default()
    };
    selection.selected.insert(3);
    let source = ColorSource {
        point_selection: Some(&selection),
        point_colors: Some(&explicit),
        palette: Some(&palette),
        ..ColorSource::default()
    };

    assert_eq!(resolve_color(&source, 3, Some(GREY)), ORANGE);
    assert_eq!(resolve_color(&source, 2, Some(GREY)), BLUE);
}

#[test]
fn disabled_point_selection_is_ignored() {
    let mut selection = PointSelection {
        color: ORANGE,
        ..PointSelection::default()
    };
    selection.selected.insert(1);
    let source = ColorSource {
        point_selection: Some(&selection),
        ..ColorSource::default()
    };
    assert_eq!(resolve_color(&source, 1, Some(GREY)), GREY);
}

#[test]
fn explicit_color_beats_palette() {
    let explicit = point_colors(&[(1, GREEN)]);
    let palette = Palette::new(vec![BLUE, RED]);
    let source = ColorSource {
        point_colors: Some(&explicit),
        palette: Some(&palette),
        ..ColorSource::default()
    };
    assert_eq!(resolve_color(&source, 1, Some(GREY)), GREEN);
    assert_eq!(resolve_color(&source, 2, Some(GREY)), BLUE);
}

#[test]
fn palette_cycles_by_point_or_series_index() {
    let per_point = Palette::new(vec![RED, GREEN, BLUE]);
    let source = ColorSource {
        palette: Some(&per_point),
        series_index: 1,
        ..ColorSource::default()
    };
    assert_eq!(resolve_color(&source, 4, None), GREEN);

    let per_series = Palette::new(vec![RED, GREEN, BLUE]).with_mode(PaletteMode::PerSeries);
    let source = ColorSource {
        palette: Some(&per_series),
        series_index: 5,
        ..ColorSource::default()
    };
    assert_eq!(resolve_color(&source, 0, None), BLUE);
    assert_eq!(resolve_color(&source, 7, None), BLUE);
}

#[test]
fn fallback_then_transparent_end_the_chain() {
    let source = ColorSource::default();
    assert_eq!(resolve_color(&source, 0, Some(GREY)), GREY);
    assert_eq!(resolve_color(&source, 0, None), Color::TRANSPARENT);
}

#[test]
fn empty_palette_fails_validation() {
    assert!(Palette::new(Vec::new()).validate().is_err());
    assert!(Palette::new(vec![RED]).validate().is_ok());
}

#[test]
fn color_cache_resolves_each_point_once_per_frame() {
    let explicit = point_colors(&[(11, GREEN)]);
    let source = ColorSource {
        point_colors: Some(&explicit),
        ..ColorSource::default()
    };
    let mut cache = ColorCache::default();
    cache.reset(IndexWindow::new(10, 14));

    assert_eq!(cache.resolve(&source, 11, Some(GREY)), GREEN);
    assert_eq!(cache.resolve(&source, 12, Some(GREY)), GREY);
    assert_eq!(cache.resolved_count(), 2);

    // Cached entries win over a changed source within the frame.
    let other = ColorSource::default();
    assert_eq!(cache.resolve(&other, 11, Some(GREY)), GREEN);
    // Indices outside the window resolve without caching.
    assert_eq!(cache.resolve(&source, 30, Some(RED)), RED);
    assert_eq!(cache.resolved_count(), 2);

    cache.clear();
    assert_eq!(cache.resolved_count(), 0);
}

#[test]
fn selection_state_tracks_series_and_points() {
    let mut state = SelectionState::default();
    state.select_series("close");
    assert_eq!(state.series_color("close"), None);

    state.series.enabled = true;
    assert_eq!(state.series_color("close"), Some(state.series.color));
    assert_eq!(state.series_color("open"), None);
    assert!(state.deselect_series("close"));
    assert_eq!(state.series_color("close"), None);

    state.set_point_selection_enabled("close", true);
    state.select_point("close", 4);
    let points = state.point_selection("close").expect("point selection");
    assert!(points.is_selected(4));
    assert!(!points.is_selected(5));
    assert!(state.deselect_point("close", 4));
    assert!(!state.deselect_point("close", 4));

    state.select_point("open", 1);
    state.forget_series("open");
    assert!(state.point_selection("open").is_none());

    state.clear();
    assert!(state.series.selected.is_empty());
    assert!(
        state
            .points
            .values()
            .all(|selection| selection.selected.is_empty())
    );
    // Enabled flags survive a clear.
    assert!(state.point_selection("close").is_some_and(|points| points.enabled));
}
