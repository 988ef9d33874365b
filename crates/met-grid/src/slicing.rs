//! Longitude/latitude box extraction.
//!
//! Regular grids are cut along their two axes and stay regular; curvilinear
//! and unstructured grids are masked point by point and come back as
//! unstructured grids. Either way a brand-new grid is built from the sliced
//! descriptor and returned next to the sliced data.

use ndarray::{Array2, ArrayD, Axis, IxDyn};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::descriptor::{GridDescriptor, UnstructuredDescriptor};
use crate::error::{GridError, Result};
use crate::factory::GridFactory;
use crate::grid::{curvilinear, regular, unstructured, Grid, LatLonField};

/// A lon/lat box in degrees, given as `(west, north, east, south)`.
///
/// Latitude bounds are order-insensitive. A box with `west > east` crosses
/// the antimeridian and runs eastward from `west` through 180 to `east`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LonLatBox {
    pub west: f64,
    pub north: f64,
    pub east: f64,
    pub south: f64,
}

impl LonLatBox {
    pub fn new(west: f64, north: f64, east: f64, south: f64) -> Result<Self> {
        let bbox = Self {
            west,
            north,
            east,
            south,
        };
        if [west, north, east, south].iter().any(|v| v.is_nan()) {
            return Err(GridError::invalid_box(format!("{} contains NaN", bbox)));
        }
        Ok(bbox)
    }

    /// Build from a `[west, north, east, south]` sequence.
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        match values {
            [west, north, east, south] => Self::new(*west, *north, *east, *south),
            _ => Err(GridError::invalid_box(format!(
                "expected 4 entries (west, north, east, south), got {}",
                values.len()
            ))),
        }
    }

    pub fn crosses_dateline(&self) -> bool {
        self.west > self.east
    }

    #[inline]
    pub fn contains_lat(&self, lat: f64) -> bool {
        lat >= self.south.min(self.north) && lat <= self.south.max(self.north)
    }

    /// Eastward extent of the box in degrees.
    pub fn lon_span(&self) -> f64 {
        if self.crosses_dateline() {
            self.east - self.west + 360.0
        } else {
            self.east - self.west
        }
    }

    /// Longitudes are compared modulo 360, so grids stored in 0..360 and
    /// -180..180 select the same points.
    #[inline]
    pub fn contains_lon(&self, lon: f64) -> bool {
        let span = self.lon_span();
        if span >= 360.0 {
            return lon.is_finite();
        }
        (lon - self.west).rem_euclid(360.0) <= span
    }

    #[inline]
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        self.contains_lat(lat) && self.contains_lon(lon)
    }
}

impl TryFrom<&[f64]> for LonLatBox {
    type Error = GridError;

    fn try_from(values: &[f64]) -> Result<Self> {
        Self::from_slice(values)
    }
}

impl std::fmt::Display for LonLatBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "(west={}, north={}, east={}, south={})",
            self.west, self.north, self.east, self.south
        )
    }
}

/// Cut `bbox` out of `data` laid out on `grid`.
///
/// Returns the sliced data (leading dimensions untouched) and the grid of
/// the surviving points.
#[instrument(skip(data, grid), fields(grid_type = grid.grid_type(), shape = ?data.shape()))]
pub fn lonlatbox(data: &ArrayD<f64>, grid: &Grid, bbox: &LonLatBox) -> Result<(ArrayD<f64>, Grid)> {
    grid.check_data_shape(data.shape())?;

    let (y_unit, x_unit) = grid.units();
    let (sliced, descriptor) = match grid.descriptor() {
        GridDescriptor::Regular(d) => regular::box_slice(d, y_unit, x_unit, data, bbox)?,
        GridDescriptor::Curvilinear(_) => curvilinear::box_slice(grid.lat_lon(), data, bbox)?,
        GridDescriptor::Unstructured(_) => unstructured::box_slice(grid.lat_lon(), data, bbox)?,
    };

    let sliced_grid = GridFactory::build(descriptor)?;
    debug!(
        points = sliced_grid.num_points(),
        sliced_type = sliced_grid.grid_type(),
        "box slice complete"
    );
    Ok((sliced, sliced_grid))
}

/// Keep the points of `field` inside `bbox` as an unstructured point set.
///
/// `data` must end with the field's shape; the grid dimensions are
/// flattened and masked in row-major order.
pub(crate) fn slice_points(
    field: &LatLonField,
    data: &ArrayD<f64>,
    bbox: &LonLatBox,
) -> Result<(ArrayD<f64>, GridDescriptor)> {
    let points: Vec<(f64, f64)> = field.points().collect();
    let keep: Vec<usize> = (0..points.len())
        .filter(|&i| bbox.contains(points[i].0, points[i].1))
        .collect();

    if keep.is_empty() {
        return Err(GridError::EmptySliceResult(bbox.to_string()));
    }

    let coord_ndim = field.shape().len();
    let leading = &data.shape()[..data.ndim() - coord_ndim];
    let n_slices: usize = leading.iter().product();

    let flat = Array2::from_shape_vec((n_slices, field.len()), data.iter().copied().collect())?;
    let masked = flat.select(Axis(1), &keep);

    let mut out_shape = leading.to_vec();
    out_shape.push(keep.len());
    let sliced = ArrayD::from_shape_vec(IxDyn(&out_shape), masked.iter().copied().collect())?;

    let (lat, lon): (Vec<f64>, Vec<f64>) = keep.iter().map(|&i| points[i]).unzip();

    Ok((sliced, UnstructuredDescriptor::new(lat, lon).into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_from_slice_len() {
        assert!(LonLatBox::from_slice(&[1.0, 2.0, 3.0, 4.0]).is_ok());
        assert!(matches!(
            LonLatBox::from_slice(&[1.0, 2.0, 3.0]),
            Err(GridError::InvalidBox(_))
        ));
        assert!(matches!(
            LonLatBox::try_from(&[1.0, 2.0, 3.0, 4.0, 5.0][..]),
            Err(GridError::InvalidBox(_))
        ));
    }

    #[test]
    fn test_box_rejects_nan() {
        assert!(LonLatBox::new(f64::NAN, 1.0, 2.0, 0.0).is_err());
    }

    #[test]
    fn test_lat_bounds_order_insensitive() {
        let a = LonLatBox::new(0.0, 10.0, 5.0, -10.0).unwrap();
        let b = LonLatBox::new(0.0, -10.0, 5.0, 10.0).unwrap();
        for lat in [-10.0, 0.0, 10.0, 10.1] {
            assert_eq!(a.contains_lat(lat), b.contains_lat(lat));
        }
        assert!(a.contains_lat(-10.0));
        assert!(!a.contains_lat(10.1));
    }

    #[test]
    fn test_dateline_crossing_box() {
        let bbox = LonLatBox::new(170.0, 10.0, -170.0, -10.0).unwrap();
        assert!(bbox.crosses_dateline());
        assert!(bbox.contains_lon(175.0));
        assert!(bbox.contains_lon(-175.0));
        assert!(bbox.contains_lon(170.0));
        assert!(!bbox.contains_lon(0.0));
    }

    #[test]
    fn test_dateline_box_on_0_360_longitudes() {
        let bbox = LonLatBox::new(160.0, 1.0, -140.0, -1.0).unwrap();
        assert_eq!(bbox.lon_span(), 60.0);

        let kept: Vec<f64> = (0..360).map(f64::from).filter(|&lon| bbox.contains_lon(lon)).collect();
        assert_eq!(kept.len(), 61);
        assert_eq!(kept.first(), Some(&160.0));
        assert_eq!(kept.last(), Some(&220.0));
        assert!(!bbox.contains_lon(359.0));
    }

    #[test]
    fn test_plain_box_matches_either_longitude_convention() {
        let bbox = LonLatBox::new(-10.0, 10.0, 10.0, -10.0).unwrap();
        assert!(bbox.contains_lon(-5.0));
        assert!(bbox.contains_lon(355.0));
        assert!(bbox.contains_lon(10.0));
        assert!(!bbox.contains_lon(11.0));
        assert!(!bbox.contains_lon(349.0));
    }

    #[test]
    fn test_full_circle_box_contains_everything() {
        let bbox = LonLatBox::new(-180.0, 90.0, 180.0, -90.0).unwrap();
        for lon in [-180.0, 0.0, 179.5, 359.0] {
            assert!(bbox.contains_lon(lon));
        }
    }
}
