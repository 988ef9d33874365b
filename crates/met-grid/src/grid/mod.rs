//! The grid abstraction.
//!
//! A [`Grid`] wraps a validated [`GridDescriptor`] and lazily derives the
//! latitude/longitude of every grid point. The variant-specific parts
//! (deriving coordinates, box-slicing strategy) live in the `regular`,
//! `curvilinear` and `unstructured` submodules and are dispatched on the
//! descriptor tag; everything else is shared.

pub mod curvilinear;
pub mod regular;
pub mod unstructured;

use std::sync::OnceLock;

use ndarray::{ArrayD, Axis, IxDyn};
use serde::{Deserialize, Serialize};

use crate::coords::{check_trailing_shape, haversine_distances, AngleUnit};
use crate::descriptor::GridDescriptor;
use crate::error::{GridError, Result};
use crate::interpolate::{InterpolationOrder, Remapper};
use crate::labeled::LabeledArray;
use crate::slicing::{self, LonLatBox};

/// Name of the single dimension of unstructured grids.
pub const CELL_DIMENSION: &str = "ncells";

/// Latitude and longitude in degrees for every grid point.
///
/// Both arrays share the grid's coordinate shape.
#[derive(Debug, Clone, PartialEq)]
pub struct LatLonField {
    pub lat: ArrayD<f64>,
    pub lon: ArrayD<f64>,
}

impl LatLonField {
    pub fn shape(&self) -> &[usize] {
        self.lat.shape()
    }

    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.lat.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lat.is_empty()
    }

    /// `(lat, lon)` pairs in row-major order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.lat.iter().copied().zip(self.lon.iter().copied())
    }
}

/// Construction values of a grid before lat/lon expansion, in native units.
#[derive(Debug, Clone, PartialEq)]
pub enum RawAxisValues {
    /// The separable latitude (y) and longitude (x) axes of a regular grid.
    Axes { y: Vec<f64>, x: Vec<f64> },
    /// Flat per-point latitudes (y) and longitudes (x).
    Points { y: Vec<f64>, x: Vec<f64> },
}

/// Position of a grid point in the grid's index space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GridIndex {
    /// Index into a flat (unstructured) grid.
    Point(usize),
    /// Row/column of a two-dimensional grid.
    Cell { row: usize, col: usize },
}

/// A horizontal grid.
///
/// Immutable after construction apart from the lat/lon cache, which is
/// filled at most once and can be read from many threads.
#[derive(Debug, Clone)]
pub struct Grid {
    descriptor: GridDescriptor,
    y_unit: AngleUnit,
    x_unit: AngleUnit,
    lat_lon: OnceLock<LatLonField>,
}

impl Grid {
    /// Validate `descriptor` and wrap it in a grid.
    pub fn new(descriptor: GridDescriptor) -> Result<Self> {
        descriptor.validate()?;
        let (ylabel, xlabel) = descriptor.labels();
        let y_unit = ylabel.unit()?;
        let x_unit = xlabel.unit()?;
        Ok(Self {
            descriptor,
            y_unit,
            x_unit,
            lat_lon: OnceLock::new(),
        })
    }

    pub fn descriptor(&self) -> &GridDescriptor {
        &self.descriptor
    }

    pub fn grid_type(&self) -> &'static str {
        self.descriptor.grid_type()
    }

    /// Number of trailing array dimensions addressed by this grid.
    pub fn coordinate_count(&self) -> usize {
        match self.descriptor {
            GridDescriptor::Unstructured(_) => 1,
            _ => 2,
        }
    }

    /// Lengths of the grid dimensions.
    pub fn coordinate_shape(&self) -> Vec<usize> {
        self.descriptor.shape()
    }

    /// Total number of grid points.
    pub fn num_points(&self) -> usize {
        self.coordinate_shape().iter().product()
    }

    /// Latitudes and longitudes in degrees, computed on first access.
    pub fn lat_lon(&self) -> &LatLonField {
        self.lat_lon.get_or_init(|| match &self.descriptor {
            GridDescriptor::Regular(d) => regular::lat_lon(d, self.y_unit, self.x_unit),
            GridDescriptor::Curvilinear(d) => curvilinear::lat_lon(d, self.y_unit, self.x_unit),
            GridDescriptor::Unstructured(d) => unstructured::lat_lon(d, self.y_unit, self.x_unit),
        })
    }

    /// Names of the grid dimensions, `(y, x)` or `ncells`.
    pub fn coordinate_names(&self) -> Vec<String> {
        match &self.descriptor {
            GridDescriptor::Unstructured(_) => vec![CELL_DIMENSION.to_string()],
            d => {
                let (y, x) = d.labels();
                vec![y.name.clone(), x.name.clone()]
            }
        }
    }

    /// The values the grid is constructed from.
    pub fn raw_axis_values(&self) -> RawAxisValues {
        match &self.descriptor {
            GridDescriptor::Regular(d) => RawAxisValues::Axes {
                y: d.y.values.values(),
                x: d.x.values.values(),
            },
            GridDescriptor::Curvilinear(d) => RawAxisValues::Points {
                y: d.yvals.clone(),
                x: d.xvals.clone(),
            },
            GridDescriptor::Unstructured(d) => RawAxisValues::Points {
                y: d.yvals.clone(),
                x: d.xvals.clone(),
            },
        }
    }

    /// One labelled coordinate per grid dimension, in dimension order.
    ///
    /// Regular grids label their dimensions with the axis values in degrees,
    /// the other variants with plain indices.
    pub fn coords(&self) -> Vec<(String, Vec<f64>)> {
        let names = self.coordinate_names();
        match &self.descriptor {
            GridDescriptor::Regular(d) => {
                let (lat, lon) = regular::axes_in_degrees(d, self.y_unit, self.x_unit);
                names.into_iter().zip([lat, lon]).collect()
            }
            _ => names
                .into_iter()
                .zip(self.coordinate_shape())
                .map(|(name, len)| (name, (0..len).map(|i| i as f64).collect()))
                .collect(),
        }
    }

    /// Fail with `ShapeMismatch` unless `shape` ends with the grid shape.
    pub fn check_data_shape(&self, shape: &[usize]) -> Result<()> {
        check_trailing_shape(&self.coordinate_shape(), shape)
    }

    /// Index of the grid point closest to `target` (`(lat, lon)` in degrees).
    ///
    /// Distance is great-circle; ties resolve to the first point in
    /// row-major order.
    pub fn nearest_index(&self, target: (f64, f64)) -> Result<GridIndex> {
        let field = self.lat_lon();
        let distances = haversine_distances(target, &field.lat, &field.lon)?;

        let mut best: Option<(usize, f64)> = None;
        for (i, &d) in distances.iter().enumerate() {
            if d.is_nan() {
                continue;
            }
            match best {
                Some((_, best_d)) if d >= best_d => {}
                _ => best = Some((i, d)),
            }
        }
        let (flat, _) = best.ok_or_else(|| {
            GridError::invalid_target(format!("no finite distance to {:?}", target))
        })?;

        Ok(match field.shape() {
            [_, ncols] => GridIndex::Cell {
                row: flat / ncols,
                col: flat % ncols,
            },
            _ => GridIndex::Point(flat),
        })
    }

    /// Coordinates of the grid point at `index`.
    pub fn point_at(&self, index: GridIndex) -> Option<(f64, f64)> {
        let field = self.lat_lon();
        let ix: Vec<usize> = match index {
            GridIndex::Point(i) => vec![i],
            GridIndex::Cell { row, col } => vec![row, col],
        };
        let lat = field.lat.get(IxDyn(&ix))?;
        let lon = field.lon.get(IxDyn(&ix))?;
        Some((*lat, *lon))
    }

    /// Values of `data` at the grid point nearest to `target`.
    ///
    /// The grid dimensions are removed; leading dimensions are kept and the
    /// result has at least one dimension.
    pub fn nearest_value(&self, data: &ArrayD<f64>, target: (f64, f64)) -> Result<ArrayD<f64>> {
        self.check_data_shape(data.shape())?;
        let nd = data.ndim();

        let selected = match self.nearest_index(target)? {
            GridIndex::Point(i) => data.index_axis(Axis(nd - 1), i).to_owned(),
            GridIndex::Cell { row, col } => data
                .index_axis(Axis(nd - 1), col)
                .index_axis(Axis(nd - 2), row)
                .to_owned(),
        };

        if selected.ndim() == 0 {
            let value = selected.iter().copied().collect::<Vec<f64>>();
            return Ok(ArrayD::from_shape_vec(IxDyn(&[1]), value)?);
        }
        Ok(selected)
    }

    /// Remap `data` from this grid onto `target`.
    pub fn interpolate(
        &self,
        data: &ArrayD<f64>,
        target: &Grid,
        order: InterpolationOrder,
    ) -> Result<ArrayD<f64>> {
        Remapper::default().remap(data, self, target, order)
    }

    /// Remap a labelled array, keeping leading dimensions and attributes.
    pub fn interpolate_labeled(
        &self,
        data: &LabeledArray,
        target: &Grid,
        order: InterpolationOrder,
    ) -> Result<LabeledArray> {
        let values = self.interpolate(&data.values, target, order)?;
        data.regridded(values, self, target)
    }

    /// Cut `bbox` out of `data`, returning the sliced data and its new grid.
    pub fn lonlatbox(&self, data: &ArrayD<f64>, bbox: &LonLatBox) -> Result<(ArrayD<f64>, Grid)> {
        slicing::lonlatbox(data, self, bbox)
    }

    /// Box-slice a labelled array, keeping leading dimensions and attributes.
    pub fn lonlatbox_labeled(
        &self,
        data: &LabeledArray,
        bbox: &LonLatBox,
    ) -> Result<(LabeledArray, Grid)> {
        let (values, grid) = self.lonlatbox(&data.values, bbox)?;
        let labeled = data.regridded(values, self, &grid)?;
        Ok((labeled, grid))
    }

    /// Independent deep copy.
    pub fn copy(&self) -> Grid {
        self.clone()
    }

    pub(crate) fn units(&self) -> (AngleUnit, AngleUnit) {
        (self.y_unit, self.x_unit)
    }
}

/// Grids are equal when their computed lat/lon fields are identical.
impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.lat_lon() == other.lat_lon()
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self.descriptor {
            GridDescriptor::Regular(_) => "RegularLonLatGrid",
            GridDescriptor::Curvilinear(_) => "CurvilinearGrid",
            GridDescriptor::Unstructured(_) => "UnstructuredGrid",
        };
        writeln!(f, "{}", name)?;
        write!(f, "{}", "-".repeat(name.len()))?;
        for (key, value) in self.descriptor.to_raw() {
            if key.ends_with("vals") {
                continue;
            }
            write!(f, "\n{} = {}", key, value)?;
        }
        Ok(())
    }
}
