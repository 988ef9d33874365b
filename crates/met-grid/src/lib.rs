//! Horizontal grids for meteorological fields.
//!
//! This crate models the grids that model output and observations live on
//! and the operations that move data between them:
//!
//! - **Grid variants**: regular lon/lat, curvilinear and unstructured point sets
//! - **Remapping**: nearest neighbor and bilinear between any pair of grids
//! - **Box slicing**: cut a lon/lat box out of a field and get its grid back
//! - **Point lookup**: nearest grid point by great-circle distance
//!
//! # Architecture
//!
//! ```text
//! grid description (text, file, mapping)
//!      │
//!      ▼
//! GridFactory::build ──► GridDescriptor::from_raw ──► Grid
//!                                                     │
//!                    ┌────────────────────────────────┼───────────────────┐
//!                    ▼                                ▼                   ▼
//!            Grid::interpolate               Grid::lonlatbox     Grid::nearest_value
//!            (Remapper: structured           (axis cut or        (haversine over
//!             or scattered sampler)           point mask)         lat/lon field)
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use met_grid::{GridFactory, InterpolationOrder, LonLatBox};
//!
//! let source = GridFactory::build("grids/icon-eu.txt")?;
//! let target = GridFactory::build("grids/stations.txt")?;
//!
//! let remapped = source.interpolate(&field, &target, InterpolationOrder::Bilinear)?;
//!
//! let bbox = LonLatBox::new(5.0, 55.0, 15.0, 47.0)?;
//! let (germany, germany_grid) = source.lonlatbox(&field, &bbox)?;
//! ```

pub mod config;
pub mod coords;
pub mod descriptor;
pub mod error;
pub mod factory;
pub mod grid;
pub mod griddes;
pub mod interpolate;
pub mod labeled;
pub mod slicing;

// Re-export commonly used types at crate root
pub use config::GridEngineConfig;
pub use coords::{haversine_distance, normalize_lon_lat, wrap_longitude, AngleUnit, NormalizedField};
pub use descriptor::{
    AxisLabel, AxisValues, CurvilinearDescriptor, DescriptorValue, GridDescriptor, RawDescriptor,
    RegularAxis, RegularDescriptor, UnstructuredDescriptor,
};
pub use error::{GridError, Result};
pub use factory::{GridFactory, GridSource};
pub use grid::{Grid, GridIndex, LatLonField, RawAxisValues};
pub use griddes::parse_griddes;
pub use interpolate::{InterpolationOrder, Remapper};
pub use labeled::LabeledArray;
pub use slicing::LonLatBox;
