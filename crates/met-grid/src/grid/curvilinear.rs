//! Curvilinear grids: per-point coordinates on a two-dimensional index mesh.
//!
//! There is no separable axis to slice along, so box slices always come out
//! as unstructured point sets.

use ndarray::{ArrayD, IxDyn};

use crate::coords::AngleUnit;
use crate::descriptor::{CurvilinearDescriptor, GridDescriptor};
use crate::error::Result;
use crate::grid::LatLonField;
use crate::slicing::{self, LonLatBox};

/// Reshape the flat coordinate lists into the `(ysize, xsize)` mesh.
pub fn lat_lon(d: &CurvilinearDescriptor, y_unit: AngleUnit, x_unit: AngleUnit) -> LatLonField {
    let nx = d.xsize;
    let shape = IxDyn(&[d.ysize, d.xsize]);
    LatLonField {
        lat: ArrayD::from_shape_fn(shape.clone(), |ix| y_unit.to_degrees(d.yvals[ix[0] * nx + ix[1]])),
        lon: ArrayD::from_shape_fn(shape, |ix| x_unit.to_degrees(d.xvals[ix[0] * nx + ix[1]])),
    }
}

pub fn box_slice(
    field: &LatLonField,
    data: &ArrayD<f64>,
    bbox: &LonLatBox,
) -> Result<(ArrayD<f64>, GridDescriptor)> {
    slicing::slice_points(field, data, bbox)
}
