#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::{
    AxisState, DecimationTolerance, IndexWindow, PixelPoint, Transformer, decimate_window,
};

/// Windows at least this large are projected on the rayon pool.
#[cfg(feature = "parallel-projection")]
const PARALLEL_THRESHOLD: usize = 4_096;

/// Writes the indices to draw into `out`: the whole window, or the
/// decimated subset when `decimate` is set.
pub(crate) fn collect_indices(
    x_values: &[f64],
    y_values: &[f64],
    window: IndexWindow,
    decimate: bool,
    x_axis: &AxisState,
    y_axis: &AxisState,
    out: &mut Vec<usize>,
) {
    if decimate {
        let tolerance = DecimationTolerance::from_axes(x_axis, y_axis);
        decimate_window(x_values, y_values, window, tolerance, x_axis, y_axis, out);
    } else {
        out.clear();
        out.extend(window.indices());
    }
}

/// Projects `(x[i] + x_offset, y[i])` for every index, preserving order.
pub(crate) fn project_indices(
    transformer: &dyn Transformer,
    x_values: &[f64],
    y_values: &[f64],
    x_offset: f64,
    indices: &[usize],
    out: &mut Vec<PixelPoint>,
) {
    out.clear();
    let project =
        |&index: &usize| transformer.transform_to_visible(x_values[index] + x_offset, y_values[index]);

    #[cfg(feature = "parallel-projection")]
    {
        if indices.len() >= PARALLEL_THRESHOLD {
            out.par_extend(indices.par_iter().map(project));
            return;
        }
    }

    out.extend(indices.iter().map(project));
}
