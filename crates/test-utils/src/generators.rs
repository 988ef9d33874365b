//! Field generators for creating synthetic weather-like data.
//!
//! These generators create predictable, verifiable test data patterns
//! that can be used across the test suite.

use ndarray::{ArrayD, Dimension, IxDyn};

/// Creates a field whose value encodes its own index.
///
/// Each value is `sum(index[k] * 10^(2 * (ndim - 1 - k)))`, so for a
/// `(time, row, col)` field the value at `[t, r, c]` is `t * 10000 + r * 100 + c`.
/// Dimensions must stay below 100 for the encoding to be unique.
///
/// # Example
///
/// ```
/// use test_utils::index_field;
///
/// let field = index_field(&[2, 3, 4]);
/// assert_eq!(field[[1, 2, 3]], 10203.0);
/// ```
pub fn index_field(shape: &[usize]) -> ArrayD<f64> {
    ArrayD::from_shape_fn(IxDyn(shape), |ix| {
        ix.as_array_view()
            .iter()
            .fold(0.0, |acc, &i| acc * 100.0 + i as f64)
    })
}

/// Creates a field holding each element's row-major flat index.
///
/// Unique for any shape; use it instead of [`index_field`] when a
/// dimension reaches 100.
pub fn flat_index_field(shape: &[usize]) -> ArrayD<f64> {
    let len: usize = shape.iter().product();
    ArrayD::from_shape_vec(IxDyn(shape), (0..len).map(|i| i as f64).collect())
        .expect("element count matches shape")
}

/// Creates a field that is linear in latitude and longitude.
///
/// `value = a * lat + b * lon + c`; bilinear and barycentric interpolation
/// reproduce such a field exactly inside the source domain.
pub fn plane_field(lat: &ArrayD<f64>, lon: &ArrayD<f64>, a: f64, b: f64, c: f64) -> ArrayD<f64> {
    ndarray::Zip::from(lat)
        .and(lon)
        .map_collect(|&la, &lo| a * la + b * lo + c)
}

/// Creates a temperature-like field in Kelvin.
///
/// Values decrease poleward from about 300K at the equator, with a small
/// offset per leading slice.
pub fn temperature_field(leading: &[usize], lat: &ArrayD<f64>) -> ArrayD<f64> {
    let mut shape = leading.to_vec();
    shape.extend_from_slice(lat.shape());
    let n_grid = lat.ndim();

    ArrayD::from_shape_fn(IxDyn(&shape), |ix| {
        let ix = ix.as_array_view();
        let n_lead = ix.len() - n_grid;
        let slice_offset: f64 = ix.iter().take(n_lead).map(|&i| i as f64).sum();
        let grid_ix: Vec<usize> = ix.iter().skip(n_lead).copied().collect();
        let latitude = lat[IxDyn(&grid_ix)];
        300.0 - 0.5 * latitude.abs() + slice_offset
    })
}

/// Creates a field with NaN values at the specified flat grid indices.
pub fn field_with_nans(shape: &[usize], value: f64, nan_indices: &[usize]) -> ArrayD<f64> {
    let mut field = ArrayD::from_elem(IxDyn(shape), value);
    if let Some(flat) = field.as_slice_mut() {
        for &i in nan_indices {
            if i < flat.len() {
                flat[i] = f64::NAN;
            }
        }
    }
    field
}
