//! Coordinate math shared by every grid variant.
//!
//! Great-circle distances, longitude wrapping, reordering of lat/lon meshes
//! into ascending order and angular unit conversion. Everything here is pure.

use ndarray::{ArrayD, Axis, Zip};

use crate::error::{GridError, Result};

/// Mean Earth radius in metres used for great-circle distances.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Angular unit of a coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleUnit {
    Degrees,
    Radians,
}

impl AngleUnit {
    /// Resolve a unit string such as `degrees_north` or `radian`.
    ///
    /// Matching is by substring, `deg` before `rad`, case-insensitive.
    pub fn parse(unit: &str) -> Result<Self> {
        let lower = unit.to_lowercase();
        if lower.contains("deg") {
            Ok(Self::Degrees)
        } else if lower.contains("rad") {
            Ok(Self::Radians)
        } else {
            Err(GridError::UnsupportedUnit(unit.to_string()))
        }
    }

    /// Convert a single value in this unit to degrees.
    #[inline]
    pub fn to_degrees(self, value: f64) -> f64 {
        match self {
            Self::Degrees => value,
            Self::Radians => value.to_degrees(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Degrees => "degrees",
            Self::Radians => "radians",
        }
    }
}

impl std::fmt::Display for AngleUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Convert coordinate values given in `unit` to degrees.
pub fn convert_to_degrees(values: &[f64], unit: &str) -> Result<Vec<f64>> {
    let unit = AngleUnit::parse(unit)?;
    Ok(values.iter().map(|&v| unit.to_degrees(v)).collect())
}

/// Great-circle distance in metres between two `(lat, lon)` points in degrees.
pub fn haversine_distance(p1: (f64, f64), p2: (f64, f64)) -> f64 {
    let (lat1, lon1) = (p1.0.to_radians(), p1.1.to_radians());
    let (lat2, lon2) = (p2.0.to_radians(), p2.1.to_radians());

    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair above 1 for antipodal points
    2.0 * EARTH_RADIUS_M * a.sqrt().min(1.0).asin()
}

/// Pointwise great-circle distances from `point` to every `(lat, lon)` pair.
///
/// `lat` and `lon` must have the same shape; the result has that shape too.
pub fn haversine_distances(point: (f64, f64), lat: &ArrayD<f64>, lon: &ArrayD<f64>) -> Result<ArrayD<f64>> {
    if lat.shape() != lon.shape() {
        return Err(GridError::shape_mismatch(lat.shape(), lon.shape()));
    }
    Ok(Zip::from(lat)
        .and(lon)
        .map_collect(|&la, &lo| haversine_distance(point, (la, lo))))
}

/// Wrap a longitude above 180° back into `[-180, 180]`.
///
/// Values already at or below 180° are returned untouched.
#[inline]
pub fn wrap_longitude(lon: f64) -> f64 {
    if !lon.is_finite() {
        return lon;
    }
    let mut wrapped = lon;
    while wrapped > 180.0 {
        wrapped -= 360.0;
    }
    wrapped
}

/// Wrap every longitude of an array, see [`wrap_longitude`].
pub fn wrap_longitudes(lon: &ArrayD<f64>) -> ArrayD<f64> {
    lon.mapv(wrap_longitude)
}

/// Latitudes, longitudes and optionally data after [`normalize_lon_lat`].
#[derive(Debug, Clone)]
pub struct NormalizedField {
    pub lat: ArrayD<f64>,
    pub lon: ArrayD<f64>,
    pub data: Option<ArrayD<f64>>,
}

/// Wrap longitudes and reorder a lat/lon mesh into ascending order.
///
/// For 2-D meshes rows are sorted by the latitude of the first column and
/// columns by the longitude of the first row; the trailing two axes of `data`
/// are permuted identically. 1-D point sets only have their longitudes
/// wrapped since they carry no axis ordering. Sorting is stable, so the
/// operation is idempotent.
pub fn normalize_lon_lat(
    lat: &ArrayD<f64>,
    lon: &ArrayD<f64>,
    data: Option<&ArrayD<f64>>,
) -> Result<NormalizedField> {
    if lat.shape() != lon.shape() {
        return Err(GridError::shape_mismatch(lat.shape(), lon.shape()));
    }
    let coord_ndim = lat.ndim();
    if let Some(data) = data {
        check_trailing_shape(lat.shape(), data.shape())?;
    }

    let lon = wrap_longitudes(lon);

    match coord_ndim {
        1 => Ok(NormalizedField {
            lat: lat.clone(),
            lon,
            data: data.cloned(),
        }),
        2 if lat.len() > 0 => {
            let row_order = argsort(lat.index_axis(Axis(1), 0).iter().copied());
            let col_order = argsort(lon.index_axis(Axis(0), 0).iter().copied());

            let reorder = |arr: &ArrayD<f64>| -> ArrayD<f64> {
                let nd = arr.ndim();
                arr.select(Axis(nd - 2), &row_order)
                    .select(Axis(nd - 1), &col_order)
            };

            Ok(NormalizedField {
                lat: reorder(lat),
                lon: reorder(&lon),
                data: data.map(reorder),
            })
        }
        _ => Err(GridError::shape_mismatch(&[0, 0], lat.shape())),
    }
}

/// Ensure `data_shape` ends with `grid_shape`.
pub(crate) fn check_trailing_shape(grid_shape: &[usize], data_shape: &[usize]) -> Result<()> {
    let n = grid_shape.len();
    if data_shape.len() < n || &data_shape[data_shape.len() - n..] != grid_shape {
        return Err(GridError::shape_mismatch(grid_shape, data_shape));
    }
    Ok(())
}

/// Stable ascending argsort; NaN sorts last.
fn argsort(values: impl Iterator<Item = f64>) -> Vec<usize> {
    let values: Vec<f64> = values.collect();
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
    order
}
