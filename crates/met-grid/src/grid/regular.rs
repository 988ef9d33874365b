//! Regular lon/lat grids: the outer product of a latitude and a longitude axis.

use ndarray::{ArrayD, Axis, IxDyn};

use crate::coords::AngleUnit;
use crate::descriptor::{AxisValues, GridDescriptor, RegularAxis, RegularDescriptor};
use crate::error::{GridError, Result};
use crate::grid::LatLonField;
use crate::slicing::LonLatBox;

/// Latitude and longitude axes converted to degrees.
pub fn axes_in_degrees(d: &RegularDescriptor, y_unit: AngleUnit, x_unit: AngleUnit) -> (Vec<f64>, Vec<f64>) {
    let lat = d.y.values.values().into_iter().map(|v| y_unit.to_degrees(v)).collect();
    let lon = d.x.values.values().into_iter().map(|v| x_unit.to_degrees(v)).collect();
    (lat, lon)
}

/// Mesh the two axes: rows vary by latitude, columns by longitude.
pub fn lat_lon(d: &RegularDescriptor, y_unit: AngleUnit, x_unit: AngleUnit) -> LatLonField {
    let (lat_axis, lon_axis) = axes_in_degrees(d, y_unit, x_unit);
    let shape = IxDyn(&[lat_axis.len(), lon_axis.len()]);

    LatLonField {
        lat: ArrayD::from_shape_fn(shape.clone(), |ix| lat_axis[ix[0]]),
        lon: ArrayD::from_shape_fn(shape, |ix| lon_axis[ix[1]]),
    }
}

/// Slice along both axes independently.
///
/// Rows whose latitude and columns whose longitude fall inside `bbox` are
/// kept. The result is a regular grid with literal axis values in degrees.
pub fn box_slice(
    d: &RegularDescriptor,
    y_unit: AngleUnit,
    x_unit: AngleUnit,
    data: &ArrayD<f64>,
    bbox: &LonLatBox,
) -> Result<(ArrayD<f64>, GridDescriptor)> {
    let (lat_axis, lon_axis) = axes_in_degrees(d, y_unit, x_unit);

    let rows: Vec<usize> = (0..lat_axis.len()).filter(|&i| bbox.contains_lat(lat_axis[i])).collect();
    let cols: Vec<usize> = (0..lon_axis.len()).filter(|&j| bbox.contains_lon(lon_axis[j])).collect();

    if rows.is_empty() || cols.is_empty() {
        return Err(GridError::EmptySliceResult(bbox.to_string()));
    }

    let nd = data.ndim();
    let sliced = data.select(Axis(nd - 2), &rows).select(Axis(nd - 1), &cols);

    let descriptor = RegularDescriptor {
        y: RegularAxis {
            label: d.y.label.in_degrees(),
            values: AxisValues::explicit(rows.iter().map(|&i| lat_axis[i]).collect()),
        },
        x: RegularAxis {
            label: d.x.label.in_degrees(),
            values: AxisValues::explicit(cols.iter().map(|&j| lon_axis[j]).collect()),
        },
    };

    tracing::debug!(
        rows = rows.len(),
        cols = cols.len(),
        "sliced regular grid along axes"
    );

    Ok((sliced, descriptor.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::Array2;

    #[test]
    fn test_axes_radians_converted() {
        let mut d = RegularDescriptor::new(0.0, std::f64::consts::FRAC_PI_2, 2, 0.0, std::f64::consts::PI, 2);
        d.y.label.units = "radians".into();
        d.x.label.units = "radians".into();
        let (lat, lon) = axes_in_degrees(&d, AngleUnit::Radians, AngleUnit::Radians);
        assert_relative_eq!(lat[1], 90.0, epsilon = 1e-12);
        assert_relative_eq!(lon[1], 180.0, epsilon = 1e-12);
    }

    #[test]
    fn test_box_slice_masks_rows_then_cols() {
        let d = RegularDescriptor::new(50.0, 1.0, 3, 10.0, 0.5, 3);
        let data = Array2::from_shape_fn((3, 3), |(r, c)| (r * 10 + c) as f64).into_dyn();
        let bbox = LonLatBox::new(10.0, 51.0, 10.5, 50.0).unwrap();

        let (sliced, desc) = box_slice(&d, AngleUnit::Degrees, AngleUnit::Degrees, &data, &bbox).unwrap();

        assert_eq!(sliced.shape(), &[2, 2]);
        assert_eq!(sliced.iter().copied().collect::<Vec<_>>(), vec![0.0, 1.0, 10.0, 11.0]);
        assert_eq!(
            desc,
            GridDescriptor::Regular(RegularDescriptor::from_axes(vec![50.0, 51.0], vec![10.0, 10.5]))
        );
    }

    #[test]
    fn test_box_slice_empty() {
        let d = RegularDescriptor::new(50.0, 1.0, 3, 10.0, 0.5, 3);
        let data = ArrayD::<f64>::zeros(IxDyn(&[3, 3]));
        let bbox = LonLatBox::new(20.0, 51.0, 21.0, 50.0).unwrap();
        assert!(matches!(
            box_slice(&d, AngleUnit::Degrees, AngleUnit::Degrees, &data, &bbox),
            Err(GridError::EmptySliceResult(_))
        ));
    }
}
