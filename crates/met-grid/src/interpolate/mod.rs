//! Remapping of gridded data between grids.
//!
//! ```text
//! data on source grid
//!      │
//!      ├─► check trailing shape against the source grid
//!      ├─► normalize source lat/lon (wrap, sort) and reorder data alike
//!      ├─► wrap target longitudes (target order is kept)
//!      │
//!      ├─► structured source and target ─► StructuredSampler (axis lookup)
//!      └─► any unstructured side         ─► ScatteredSampler (R*-tree, Delaunay)
//!               │
//!               ▼
//!      one sample per leading slice (rayon above a slice threshold)
//! ```

pub mod scattered;
pub mod structured;

use std::str::FromStr;

use ndarray::{ArrayD, Axis, IxDyn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::GridEngineConfig;
use crate::coords::{normalize_lon_lat, wrap_longitude};
use crate::error::{GridError, Result};
use crate::grid::Grid;

pub use scattered::ScatteredSampler;
pub use structured::{axis_position, bilinear_interpolate, nearest_interpolate, StructuredSampler};

/// Interpolation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterpolationOrder {
    /// Nearest neighbor (order 0, preserves exact values).
    #[default]
    Nearest,
    /// Bilinear on structured grids, barycentric on scattered ones (order 1).
    Bilinear,
}

impl InterpolationOrder {
    /// Numeric order.
    pub fn order(&self) -> u8 {
        match self {
            Self::Nearest => 0,
            Self::Bilinear => 1,
        }
    }
}

impl TryFrom<u8> for InterpolationOrder {
    type Error = GridError;

    fn try_from(order: u8) -> Result<Self> {
        match order {
            0 => Ok(Self::Nearest),
            1 => Ok(Self::Bilinear),
            other => Err(GridError::UnsupportedInterpolationOrder(other.to_string())),
        }
    }
}

impl FromStr for InterpolationOrder {
    type Err = GridError;

    /// Parse from string (case-insensitive).
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "nearest" | "nn" | "0" => Ok(Self::Nearest),
            "bilinear" | "linear" | "1" => Ok(Self::Bilinear),
            _ => Err(GridError::UnsupportedInterpolationOrder(s.to_string())),
        }
    }
}

impl std::fmt::Display for InterpolationOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nearest => write!(f, "nearest"),
            Self::Bilinear => write!(f, "bilinear"),
        }
    }
}

enum Sampler {
    Structured(StructuredSampler),
    Scattered(ScatteredSampler),
}

impl Sampler {
    fn sample(&self, slice: &[f64]) -> Vec<f64> {
        match self {
            Self::Structured(s) => s.sample(slice),
            Self::Scattered(s) => s.sample(slice),
        }
    }
}

/// Remaps data between grids.
#[derive(Debug, Clone, Default)]
pub struct Remapper {
    config: GridEngineConfig,
}

impl Remapper {
    pub fn new(config: GridEngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GridEngineConfig {
        &self.config
    }

    /// Remap with the configured default order.
    pub fn remap_default(&self, data: &ArrayD<f64>, source: &Grid, target: &Grid) -> Result<ArrayD<f64>> {
        self.remap(data, source, target, self.config.default_order)
    }

    /// Remap `data` from `source` onto `target`.
    ///
    /// Leading dimensions are kept; the trailing grid dimensions are replaced
    /// by the target's coordinate shape. Targets outside a structured source
    /// take the nearest edge values; targets outside the hull of a scattered
    /// source get NaN for linear interpolation.
    #[instrument(
        skip(self, data, source, target),
        fields(source = source.grid_type(), target = target.grid_type(), shape = ?data.shape())
    )]
    pub fn remap(
        &self,
        data: &ArrayD<f64>,
        source: &Grid,
        target: &Grid,
        order: InterpolationOrder,
    ) -> Result<ArrayD<f64>> {
        source.check_data_shape(data.shape())?;

        let target_field = target.lat_lon();
        if let Some((lat, lon)) = target_field
            .points()
            .find(|(lat, lon)| !lat.is_finite() || !lon.is_finite())
        {
            return Err(GridError::invalid_target(format!(
                "non-finite target coordinate (lat={}, lon={})",
                lat, lon
            )));
        }
        let targets: Vec<(f64, f64)> = target_field
            .points()
            .map(|(lat, lon)| (lat, wrap_longitude(lon)))
            .collect();

        let source_field = source.lat_lon();
        let normalized = normalize_lon_lat(&source_field.lat, &source_field.lon, Some(data))?;
        let source_data = normalized.data.as_ref().unwrap_or(data);

        let sampler = if source.coordinate_count() == 1 || target.coordinate_count() == 1 {
            let lat: Vec<f64> = normalized.lat.iter().copied().collect();
            let lon: Vec<f64> = normalized.lon.iter().copied().collect();
            Sampler::Scattered(ScatteredSampler::new(&lat, &lon, &targets, order))
        } else {
            let lat_axis: Vec<f64> = normalized.lat.index_axis(Axis(1), 0).iter().copied().collect();
            let lon_axis: Vec<f64> = normalized.lon.index_axis(Axis(0), 0).iter().copied().collect();
            Sampler::Structured(StructuredSampler::new(&lat_axis, &lon_axis, &targets, order))
        };

        let n_points = source.num_points();
        let leading = &data.shape()[..data.ndim() - source.coordinate_count()];
        let n_slices: usize = leading.iter().product();
        let flat: Vec<f64> = source_data.iter().copied().collect();

        let remapped: Vec<Vec<f64>> = if n_slices >= self.config.parallel_min_slices && n_slices > 1 {
            debug!(n_slices, "remapping slices in parallel");
            flat.par_chunks(n_points).map(|slice| sampler.sample(slice)).collect()
        } else {
            flat.chunks(n_points).map(|slice| sampler.sample(slice)).collect()
        };

        let mut out_shape = leading.to_vec();
        out_shape.extend(target.coordinate_shape());
        Ok(ArrayD::from_shape_vec(IxDyn(&out_shape), remapped.concat())?)
    }
}
