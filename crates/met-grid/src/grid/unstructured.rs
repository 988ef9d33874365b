//! Unstructured grids: flat lists of scattered `(lat, lon)` points.

use ndarray::{Array1, ArrayD};

use crate::coords::AngleUnit;
use crate::descriptor::{GridDescriptor, UnstructuredDescriptor};
use crate::error::Result;
use crate::grid::LatLonField;
use crate::slicing::{self, LonLatBox};

pub fn lat_lon(d: &UnstructuredDescriptor, y_unit: AngleUnit, x_unit: AngleUnit) -> LatLonField {
    LatLonField {
        lat: Array1::from_iter(d.yvals.iter().map(|&v| y_unit.to_degrees(v))).into_dyn(),
        lon: Array1::from_iter(d.xvals.iter().map(|&v| x_unit.to_degrees(v))).into_dyn(),
    }
}

pub fn box_slice(
    field: &LatLonField,
    data: &ArrayD<f64>,
    bbox: &LonLatBox,
) -> Result<(ArrayD<f64>, GridDescriptor)> {
    slicing::slice_points(field, data, bbox)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GridError;
    use ndarray::arr1;

    #[test]
    fn test_lat_lon_is_flat() {
        let d = UnstructuredDescriptor::new(vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]);
        let field = lat_lon(&d, AngleUnit::Degrees, AngleUnit::Degrees);
        assert_eq!(field.shape(), &[3]);
        assert_eq!(field.lon, arr1(&[4.0, 5.0, 6.0]).into_dyn());
    }

    #[test]
    fn test_box_slice_all_bounds_apply() {
        let d = UnstructuredDescriptor::new(vec![0.0, 5.0, 5.0, 10.0], vec![5.0, 0.0, 5.0, 5.0]);
        let field = lat_lon(&d, AngleUnit::Degrees, AngleUnit::Degrees);
        let data = arr1(&[1.0, 2.0, 3.0, 4.0]).into_dyn();
        let bbox = LonLatBox::new(1.0, 9.0, 9.0, 1.0).unwrap();

        let (sliced, desc) = box_slice(&field, &data, &bbox).unwrap();
        assert_eq!(sliced, arr1(&[3.0]).into_dyn());
        assert_eq!(desc.shape(), vec![1]);
    }

    #[test]
    fn test_box_slice_empty() {
        let d = UnstructuredDescriptor::new(vec![0.0], vec![0.0]);
        let field = lat_lon(&d, AngleUnit::Degrees, AngleUnit::Degrees);
        let data = arr1(&[1.0]).into_dyn();
        let bbox = LonLatBox::new(10.0, 20.0, 20.0, 10.0).unwrap();
        assert!(matches!(
            box_slice(&field, &data, &bbox),
            Err(GridError::EmptySliceResult(_))
        ));
    }
}
