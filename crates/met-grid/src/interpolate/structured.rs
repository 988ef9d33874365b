//! Interpolation from a regular lat × lon source mesh.
//!
//! Target points are first located on the source axes as fractional
//! indices, clamped to the axis ends so that points outside the source
//! domain take edge values. The kernels then read the source slice.

use super::InterpolationOrder;

/// Fractional index of `value` on an ascending `axis`, clamped to `[0, n - 1]`.
pub fn axis_position(axis: &[f64], value: f64) -> f64 {
    let n = axis.len();
    if value.is_nan() {
        return f64::NAN;
    }
    if n < 2 || value <= axis[0] {
        return 0.0;
    }
    if value >= axis[n - 1] {
        return (n - 1) as f64;
    }

    // First index whose value exceeds `value`; 1 <= upper <= n - 1 here
    let upper = axis.partition_point(|&a| a <= value);
    let i = upper - 1;
    let span = axis[i + 1] - axis[i];
    if span <= 0.0 {
        return i as f64;
    }
    i as f64 + (value - axis[i]) / span
}

/// Nearest neighbor interpolation.
///
/// Returns the value of the grid point closest in index space. Exact
/// midpoints go to the even index.
pub fn nearest_interpolate(data: &[f64], width: usize, height: usize, x: f64, y: f64) -> f64 {
    if x.is_nan() || y.is_nan() {
        return f64::NAN;
    }
    let col = x.round_ties_even() as usize;
    let row = y.round_ties_even() as usize;

    if col >= width || row >= height {
        return f64::NAN;
    }

    data[row * width + col]
}

/// Bilinear interpolation.
///
/// Weights the four surrounding grid points. A NaN corner poisons the
/// result only if it carries weight.
pub fn bilinear_interpolate(data: &[f64], width: usize, height: usize, x: f64, y: f64) -> f64 {
    if x.is_nan() || y.is_nan() {
        return f64::NAN;
    }
    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;

    if x0 >= width || y0 >= height {
        return f64::NAN;
    }

    let x1 = (x0 + 1).min(width - 1);
    let y1 = (y0 + 1).min(height - 1);

    let xf = x - x0 as f64;
    let yf = y - y0 as f64;

    let corners = [
        (data[y0 * width + x0], (1.0 - xf) * (1.0 - yf)),
        (data[y0 * width + x1], xf * (1.0 - yf)),
        (data[y1 * width + x0], (1.0 - xf) * yf),
        (data[y1 * width + x1], xf * yf),
    ];

    let mut value = 0.0;
    for (v, w) in corners {
        if w == 0.0 {
            continue;
        }
        if v.is_nan() {
            return f64::NAN;
        }
        value += v * w;
    }
    value
}

/// Precomputed sample positions of target points on a source mesh.
#[derive(Debug, Clone)]
pub struct StructuredSampler {
    width: usize,
    height: usize,
    /// `(x, y)` fractional indices per target point.
    positions: Vec<(f64, f64)>,
    order: InterpolationOrder,
}

impl StructuredSampler {
    /// Locate every `(lat, lon)` target on ascending source axes.
    pub fn new(
        lat_axis: &[f64],
        lon_axis: &[f64],
        targets: &[(f64, f64)],
        order: InterpolationOrder,
    ) -> Self {
        let positions = targets
            .iter()
            .map(|&(lat, lon)| (axis_position(lon_axis, lon), axis_position(lat_axis, lat)))
            .collect();

        Self {
            width: lon_axis.len(),
            height: lat_axis.len(),
            positions,
            order,
        }
    }

    /// Sample one row-major `(height, width)` source slice at every target.
    pub fn sample(&self, slice: &[f64]) -> Vec<f64> {
        self.positions
            .iter()
            .map(|&(x, y)| match self.order {
                InterpolationOrder::Nearest => nearest_interpolate(slice, self.width, self.height, x, y),
                InterpolationOrder::Bilinear => bilinear_interpolate(slice, self.width, self.height, x, y),
            })
            .collect()
    }
}
