use chart_raster::core::{PixelPoint, PixelRect, Viewport};
use chart_raster::render::{
    Color, DashStyle, PixelSurface, draw_dashed_polyline, draw_line, draw_line_aa, draw_polyline,
    draw_thick_polyline, fill_ellipse, fill_polygon, fill_rect, stroke_ellipse, stroke_rect,
};
use std::collections::HashSet;

const INK: Color = Color::rgb(20, 40, 200);
const HALF_INK: Color = Color::rgba(20, 40, 200, 128);

fn white_surface(width: u32, height: u32) -> PixelSurface {
    let mut surface = PixelSurface::new(Viewport::new(width, height));
    surface.clear(Color::WHITE);
    surface
}

fn distinct_pixels(surface: &PixelSurface) -> HashSet<u32> {
    surface.pixels().iter().copied().collect()
}

#[test]
fn fill_rect_partially_outside_writes_only_surface_rows() {
    let mut surface = white_surface(100, 20);
    fill_rect(&mut surface, 50.0, -10.0, 60.0, 30.0, INK, None);

    assert_eq!(surface.count_color(INK), 11 * 20);
    assert_eq!(surface.pixel(50, 0), Some(INK));
    assert_eq!(surface.pixel(60, 19), Some(INK));
    assert_eq!(surface.pixel(49, 0), Some(Color::WHITE));
    assert_eq!(surface.pixel(61, 10), Some(Color::WHITE));
}

#[test]
fn fill_rect_accepts_corners_in_any_order() {
    let mut a = white_surface(30, 30);
    let mut b = white_surface(30, 30);
    fill_rect(&mut a, 5.0, 5.0, 12.0, 9.0, INK, None);
    fill_rect(&mut b, 12.0, 9.0, 5.0, 5.0, INK, None);
    assert_eq!(a, b);
    assert_eq!(a.count_color(INK), 8 * 5);
}

#[test]
fn stroke_rect_writes_every_border_pixel_once() {
    let mut surface = white_surface(20, 20);
    stroke_rect(&mut surface, 2.0, 3.0, 9.0, 8.0, HALF_INK, None);

    let blended = surface.pixel(2, 3).expect("inside");
    assert_ne!(blended, Color::WHITE);
    // 8 x 6 outline: two rows of 8 plus two columns of 4.
    assert_eq!(surface.count_color(blended), 8 * 2 + 4 * 2);
    assert_eq!(surface.pixel(5, 5), Some(Color::WHITE));
}

#[test]
fn non_finite_coordinates_skip_the_primitive() {
    let mut surface = white_surface(10, 10);
    let before = surface.clone();

    fill_rect(&mut surface, f64::NAN, 0.0, 5.0, 5.0, INK, None);
    draw_line(
        &mut surface,
        PixelPoint::new(0.0, 0.0),
        PixelPoint::new(f64::INFINITY, 4.0),
        INK,
        None,
    );
    fill_polygon(
        &mut surface,
        &[
            PixelPoint::new(0.0, 0.0),
            PixelPoint::new(8.0, f64::NAN),
            PixelPoint::new(0.0, 8.0),
        ],
        INK,
        None,
    );
    fill_ellipse(&mut surface, PixelPoint::new(5.0, 5.0), f64::NAN, 3.0, INK, None);

    assert_eq!(surface, before);
}

#[test]
fn horizontal_line_covers_both_endpoints() {
    let mut surface = white_surface(20, 10);
    draw_line(
        &mut surface,
        PixelPoint::new(0.5, 5.5),
        PixelPoint::new(9.5, 5.5),
        INK,
        None,
    );
    assert_eq!(surface.count_color(INK), 10);
    assert_eq!(surface.pixel(9, 5), Some(INK));
    assert_eq!(surface.pixel(10, 5), Some(Color::WHITE));
}

#[test]
fn clip_rect_limits_line_writes() {
    let mut surface = white_surface(40, 10);
    draw_line(
        &mut surface,
        PixelPoint::new(0.5, 2.5),
        PixelPoint::new(39.5, 2.5),
        INK,
        Some(PixelRect::new(10.0, 0.0, 10.0, 10.0)),
    );
    assert_eq!(surface.count_color(INK), 10);
    assert_eq!(surface.pixel(9, 2), Some(Color::WHITE));
    assert_eq!(surface.pixel(10, 2), Some(INK));
    assert_eq!(surface.pixel(19, 2), Some(INK));
    assert_eq!(surface.pixel(20, 2), Some(Color::WHITE));
}

#[test]
fn aliased_polyline_composites_corner_once() {
    let mut surface = white_surface(30, 30);
    draw_polyline(
        &mut surface,
        &[
            PixelPoint::new(2.5, 2.5),
            PixelPoint::new(10.5, 2.5),
            PixelPoint::new(10.5, 10.5),
        ],
        HALF_INK,
        false,
        None,
    );

    let once = surface.pixel(5, 2).expect("inside");
    assert_eq!(surface.pixel(10, 2), Some(once));
    assert_eq!(surface.count_color(once), 8 + 9);
    assert_eq!(distinct_pixels(&surface).len(), 2);
}

#[test]
fn anti_aliased_line_stays_near_its_path() {
    let mut surface = white_surface(40, 40);
    draw_line_aa(
        &mut surface,
        PixelPoint::new(2.0, 2.0),
        PixelPoint::new(30.0, 16.0),
        INK,
        None,
    );

    let touched: Vec<(u32, u32)> = (0..40)
        .flat_map(|y| (0..40).map(move |x| (x, y)))
        .filter(|&(x, y)| surface.pixel(x, y) != Some(Color::WHITE))
        .collect();
    assert!(!touched.is_empty());
    for (x, y) in touched {
        let expected = 2.0 + (f64::from(x) + 0.5 - 2.0) * 0.5;
        assert!(
            (f64::from(y) + 0.5 - expected).abs() <= 2.0,
            "pixel ({x}, {y}) far from the line"
        );
    }
}

#[test]
fn polygons_sharing_an_edge_never_overlap() {
    let mut surface = white_surface(40, 40);
    let a = PixelPoint::new(5.0, 5.0);
    let b = PixelPoint::new(33.3, 7.1);
    let c = PixelPoint::new(21.7, 35.2);
    let d = PixelPoint::new(4.2, 30.0);
    fill_polygon(&mut surface, &[a, b, c], HALF_INK, None);
    fill_polygon(&mut surface, &[a, c, d], HALF_INK, None);

    assert_eq!(distinct_pixels(&surface).len(), 2);
}

#[test]
fn polygon_fill_samples_pixel_centers() {
    let mut surface = white_surface(20, 20);
    fill_polygon(
        &mut surface,
        &[
            PixelPoint::new(2.0, 2.0),
            PixelPoint::new(6.0, 2.0),
            PixelPoint::new(6.0, 5.0),
            PixelPoint::new(2.0, 5.0),
        ],
        INK,
        None,
    );
    assert_eq!(surface.count_color(INK), 4 * 3);
    assert_eq!(surface.pixel(2, 2), Some(INK));
    assert_eq!(surface.pixel(6, 2), Some(Color::WHITE));
    assert_eq!(surface.pixel(2, 5), Some(Color::WHITE));
}

#[test]
fn ellipse_fill_is_symmetric_and_contained() {
    let mut surface = white_surface(40, 40);
    fill_ellipse(&mut surface, PixelPoint::new(20.0, 20.0), 8.0, 5.0, INK, None);

    assert_eq!(surface.pixel(20, 20), Some(INK));
    assert_eq!(surface.pixel(11, 20), Some(Color::WHITE));
    assert_eq!(surface.pixel(20, 14), Some(Color::WHITE));
    for y in 0..40 {
        for x in 0..20 {
            assert_eq!(surface.pixel(x, y), surface.pixel(39 - x, y));
        }
    }
}

#[test]
fn tiny_ellipse_marks_center_pixel() {
    let mut surface = white_surface(10, 10);
    fill_ellipse(&mut surface, PixelPoint::new(4.5, 6.5), 0.2, 0.2, INK, None);
    assert_eq!(surface.count_color(INK), 1);
    assert_eq!(surface.pixel(4, 6), Some(INK));
}

#[test]
fn stroke_ellipse_outlines_without_filling() {
    let mut surface = white_surface(40, 40);
    stroke_ellipse(&mut surface, PixelPoint::new(20.0, 20.0), 10.0, 6.0, INK, None);
    assert_eq!(surface.pixel(20, 14), Some(INK));
    assert_eq!(surface.pixel(20, 26), Some(INK));
    assert_eq!(surface.pixel(20, 20), Some(Color::WHITE));
}

#[test]
fn thick_right_angle_composites_join_once() {
    let mut surface = white_surface(50, 50);
    draw_thick_polyline(
        &mut surface,
        &[
            PixelPoint::new(10.0, 10.0),
            PixelPoint::new(30.0, 10.0),
            PixelPoint::new(30.0, 30.0),
        ],
        3.0,
        HALF_INK,
        None,
    );

    assert_eq!(distinct_pixels(&surface).len(), 2);
    assert_ne!(surface.pixel(30, 10), Some(Color::WHITE));
    assert_ne!(surface.pixel(20, 10), Some(Color::WHITE));
    assert_ne!(surface.pixel(30, 20), Some(Color::WHITE));
}

#[test]
fn thick_polyline_ignores_non_positive_width() {
    let mut surface = white_surface(20, 20);
    let before = surface.clone();
    let points = [PixelPoint::new(1.0, 1.0), PixelPoint::new(15.0, 15.0)];
    draw_thick_polyline(&mut surface, &points, 0.0, INK, None);
    draw_thick_polyline(&mut surface, &points, f64::NAN, INK, None);
    assert_eq!(surface, before);
}

#[test]
fn dash_pattern_splits_line_into_equal_on_off_runs() {
    let mut surface = white_surface(128, 10);
    draw_dashed_polyline(
        &mut surface,
        &[PixelPoint::new(0.0, 5.5), PixelPoint::new(128.0, 5.5)],
        &DashStyle::new(vec![2.0, 2.0]),
        INK,
        None,
    );

    assert_eq!(surface.count_color(INK), 64);
    assert_eq!(surface.pixel(0, 5), Some(INK));
    assert_eq!(surface.pixel(1, 5), Some(INK));
    assert_eq!(surface.pixel(2, 5), Some(Color::WHITE));
    assert_eq!(surface.pixel(4, 5), Some(INK));
}

#[test]
fn dash_phase_carries_across_vertices_and_corner_is_drawn_once() {
    let mut surface = white_surface(30, 30);
    draw_dashed_polyline(
        &mut surface,
        &[
            PixelPoint::new(10.5, 2.5),
            PixelPoint::new(13.5, 2.5),
            PixelPoint::new(13.5, 10.5),
        ],
        &DashStyle::new(vec![4.0, 2.0]),
        HALF_INK,
        None,
    );

    let once = surface.pixel(11, 2).expect("inside");
    assert_ne!(once, Color::WHITE);
    assert_eq!(surface.pixel(13, 2), Some(once));
    // The first dash ends one pixel past the corner; the gap follows.
    assert_eq!(surface.pixel(13, 4), Some(Color::WHITE));
    assert_eq!(surface.pixel(13, 6), Some(once));
    assert_eq!(distinct_pixels(&surface).len(), 2);
}

#[test]
fn far_off_screen_dash_vertex_keeps_the_phase() {
    let style = DashStyle::new(vec![2.0, 2.0]);
    let mut far = white_surface(100, 100);
    draw_dashed_polyline(
        &mut far,
        &[
            PixelPoint::new(50.5, -199_999_999.5),
            PixelPoint::new(50.5, 100.0),
        ],
        &style,
        INK,
        None,
    );

    // The far start sits a whole number of periods above y = 0.5.
    let mut near = white_surface(100, 100);
    draw_dashed_polyline(
        &mut near,
        &[PixelPoint::new(50.5, 0.5), PixelPoint::new(50.5, 100.0)],
        &style,
        INK,
        None,
    );

    assert_eq!(far.pixel(50, 0), Some(INK));
    assert_eq!(far.pixel(50, 2), Some(Color::WHITE));
    assert_eq!(far.pixels(), near.pixels());
}

#[test]
fn invalid_dash_style_draws_nothing() {
    let mut surface = white_surface(20, 20);
    let before = surface.clone();
    draw_dashed_polyline(
        &mut surface,
        &[PixelPoint::new(0.0, 5.0), PixelPoint::new(20.0, 5.0)],
        &DashStyle::new(vec![0.0, 0.0]),
        INK,
        None,
    );
    assert_eq!(surface, before);
}

#[test]
fn raw_bytes_are_little_endian_bgra() {
    let mut surface = PixelSurface::new(Viewport::new(1, 1));
    surface.clear(Color::rgba(0x10, 0x20, 0x30, 0xff));
    assert_eq!(surface.raw_bytes(), vec![0x30, 0x20, 0x10, 0xff]);
}

#[test]
fn resize_bumps_generation_and_signals_dirty() {
    let mut surface = PixelSurface::new(Viewport::new(4, 4));
    assert!(!surface.can_render());
    surface.resize(Viewport::new(8, 2));
    assert_eq!(surface.generation(), 1);
    assert_eq!(surface.pixels().len(), 16);
    assert!(surface.take_dirty());
    assert!(!surface.can_render());

    surface.resize(Viewport::new(8, 2));
    assert_eq!(surface.generation(), 1);
}
