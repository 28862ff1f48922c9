use chart_raster::core::{PixelPoint, PixelRect, Viewport};
use chart_raster::render::{
    Color, DashStyle, PixelSurface, draw_dashed_polyline, draw_line_aa, draw_polyline,
    draw_thick_polyline, fill_ellipse, fill_polygon, fill_rect, stroke_ellipse, stroke_rect,
};
use proptest::prelude::*;

const INK: Color = Color::rgb(200, 30, 30);

fn coordinate() -> impl Strategy<Value = f64> {
    prop_oneof![
        4 => -40.0f64..80.0,
        1 => -1.0e9f64..1.0e9,
    ]
}

fn point() -> impl Strategy<Value = PixelPoint> {
    (coordinate(), coordinate()).prop_map(|(x, y)| PixelPoint::new(x, y))
}

fn clip() -> impl Strategy<Value = PixelRect> {
    (0u32..16, 0u32..12, 1u32..16, 1u32..12).prop_map(|(left, top, width, height)| {
        PixelRect::new(
            f64::from(left),
            f64::from(top),
            f64::from(width),
            f64::from(height),
        )
    })
}

fn surface() -> PixelSurface {
    let mut surface = PixelSurface::new(Viewport::new(32, 24));
    surface.clear(Color::WHITE);
    surface
}

/// Pixels outside `clip` that were written.
fn writes_outside(surface: &PixelSurface, clip: PixelRect) -> usize {
    let mut count = 0;
    for y in 0..surface.height() {
        for x in 0..surface.width() {
            let inside = f64::from(x) >= clip.left
                && f64::from(x) < clip.right()
                && f64::from(y) >= clip.top
                && f64::from(y) < clip.bottom();
            if !inside && surface.pixel(x, y) != Some(Color::WHITE) {
                count += 1;
            }
        }
    }
    count
}

proptest! {
    #[test]
    fn lines_never_write_outside_the_clip(
        points in prop::collection::vec(point(), 2..6),
        clip in clip(),
        anti_aliased in any::<bool>()
    ) {
        let mut surface = surface();
        draw_polyline(&mut surface, &points, INK, anti_aliased, Some(clip));
        draw_line_aa(&mut surface, points[0], points[1], INK, Some(clip));
        prop_assert_eq!(writes_outside(&surface, clip), 0);
    }

    #[test]
    fn thick_and_dashed_strokes_never_write_outside_the_clip(
        points in prop::collection::vec(point(), 2..5),
        clip in clip(),
        width in 0.5f64..8.0,
        on in 0.5f64..6.0,
        off in 0.0f64..6.0
    ) {
        let mut surface = surface();
        draw_thick_polyline(&mut surface, &points, width, INK, Some(clip));
        let dash = DashStyle::new(vec![on, off]);
        draw_dashed_polyline(&mut surface, &points, &dash, INK, Some(clip));
        prop_assert_eq!(writes_outside(&surface, clip), 0);
    }

    #[test]
    fn fills_never_write_outside_the_clip(
        polygon in prop::collection::vec(point(), 3..8),
        corner_a in point(),
        corner_b in point(),
        center in point(),
        radius_x in 0.0f64..200.0,
        radius_y in 0.0f64..200.0,
        clip in clip()
    ) {
        let mut surface = surface();
        fill_polygon(&mut surface, &polygon, INK, Some(clip));
        fill_rect(&mut surface, corner_a.x, corner_a.y, corner_b.x, corner_b.y, INK, Some(clip));
        stroke_rect(&mut surface, corner_a.x, corner_a.y, corner_b.x, corner_b.y, INK, Some(clip));
        fill_ellipse(&mut surface, center, radius_x, radius_y, INK, Some(clip));
        stroke_ellipse(&mut surface, center, radius_x, radius_y, INK, Some(clip));
        prop_assert_eq!(writes_outside(&surface, clip), 0);
    }

    #[test]
    fn non_finite_vertices_draw_nothing(
        mut points in prop::collection::vec(point(), 3..6),
        slot in 0usize..3,
        bad in prop_oneof![Just(f64::NAN), Just(f64::INFINITY), Just(f64::NEG_INFINITY)]
    ) {
        points[slot].y = bad;
        let mut surface = surface();
        draw_polyline(&mut surface, &points, INK, false, None);
        draw_thick_polyline(&mut surface, &points, 3.0, INK, None);
        fill_polygon(&mut surface, &points, INK, None);
        fill_ellipse(&mut surface, points[slot], 4.0, 4.0, INK, None);
        prop_assert_eq!(surface.count_color(Color::WHITE), 32 * 24);
    }

    #[test]
    fn polygons_sharing_an_edge_never_overlap(
        a in point(),
        b in point(),
        left in point(),
        right in point()
    ) {
        let side = |p: PixelPoint| (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
        prop_assume!(side(left) * side(right) < 0.0);

        let tint = Color::rgba(0, 0, 255, 128);
        let mut surface = surface();
        fill_polygon(&mut surface, &[a, b, left], tint, None);
        fill_polygon(&mut surface, &[a, b, right], tint, None);

        let mut reference = self::surface();
        fill_rect(&mut reference, 0.0, 0.0, 0.0, 0.0, tint, None);
        let once = reference.pixel(0, 0).expect("pixel");
        prop_assert!(
            surface
                .pixels()
                .iter()
                .all(|&argb| argb == Color::WHITE.to_argb() || argb == once.to_argb())
        );
    }
}
