use chart_raster::core::{
    AxisOrientation, AxisState, CartesianTransformer, DoubleRange, Transformer, indexed_window,
    linear_window,
};
use chart_raster::series::align_high_low;
use proptest::prelude::*;

fn sorted_values() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1_000.0f64..1_000.0, 1..64).prop_map(|mut values| {
        values.sort_by(f64::total_cmp);
        values
    })
}

proptest! {
    #[test]
    fn linear_window_covers_every_in_range_point(
        x in sorted_values(),
        a in -1_200.0f64..1_200.0,
        b in -1_200.0f64..1_200.0
    ) {
        let range = DoubleRange::new(a, b);
        let window = linear_window(&x, range).expect("window");

        prop_assert!(window.start <= window.end);
        prop_assert!(window.end < x.len());
        let inside = x.iter().filter(|&&value| range.contains(value)).count();
        for (index, &value) in x.iter().enumerate() {
            if range.contains(value) {
                prop_assert!(window.contains(index));
            }
        }
        prop_assert!(window.point_count() <= inside + 2);
    }

    #[test]
    fn indexed_window_stays_inside_the_data(
        count in 1usize..500,
        a in -100.0f64..600.0,
        b in -100.0f64..600.0
    ) {
        let window = indexed_window(count, DoubleRange::new(a, b)).expect("window");
        prop_assert!(window.start <= window.end);
        prop_assert!(window.end < count);
    }

    #[test]
    fn axis_projection_roundtrips(
        start in -1_000.0f64..1_000.0,
        span in 1.0f64..1_000.0,
        size in 10.0f64..4_000.0,
        offset in -50.0f64..50.0,
        inverted in any::<bool>(),
        vertical in any::<bool>(),
        ratio in -0.5f64..1.5
    ) {
        let axis = AxisState::new(start, start + span, size)
            .with_inverted(inverted)
            .with_rendered_offset(offset);
        let orientation = if vertical {
            AxisOrientation::Vertical
        } else {
            AxisOrientation::Horizontal
        };
        let value = start + span * ratio;
        let pixel = axis.value_to_pixel(value, orientation);
        let restored = axis.pixel_to_value(pixel, orientation);
        prop_assert!((restored - value).abs() <= 1e-6 * span.max(value.abs()).max(1.0));
    }

    #[test]
    fn transposed_projection_roundtrips(
        x in -100.0f64..100.0,
        y in -100.0f64..100.0,
        transposed in any::<bool>()
    ) {
        let transformer = CartesianTransformer::new(
            AxisState::new(-120.0, 120.0, 800.0),
            AxisState::new(-150.0, 150.0, 600.0).with_inverted(true),
        )
        .with_transposed(transposed);
        let point = transformer.transform_to_visible(x, y);
        let (restored_x, restored_y) = transformer.pixel_to_value(point);
        prop_assert!((restored_x - x).abs() <= 1e-9);
        prop_assert!((restored_y - y).abs() <= 1e-9);
    }

    #[test]
    fn aligned_bar_encloses_its_body(
        open in -1_000.0f64..1_000.0,
        high in -1_000.0f64..1_000.0,
        low in -1_000.0f64..1_000.0,
        close in -1_000.0f64..1_000.0
    ) {
        let (aligned_high, aligned_low) = align_high_low(open, high, low, close);
        prop_assert!(aligned_high >= open.max(close));
        prop_assert!(aligned_low <= open.min(close));
        if high >= open.max(close) && low <= open.min(close) {
            prop_assert_eq!((aligned_high, aligned_low), (high, low));
        }
    }
}
