//! Subcommand implementations.
//!
//! Each command builds a grid from its description and returns a JSON
//! report; printing is left to `main`.

use anyhow::{Context, Result};
use ndarray::{ArrayD, IxDyn};
use serde_json::{json, Value};
use tracing::info;

use met_grid::{haversine_distance, Grid, GridFactory, LonLatBox};

/// Build a grid from a description path or inline text.
pub fn load_grid(source: &str) -> Result<Grid> {
    GridFactory::build(source).with_context(|| {
        let shown: String = source.lines().next().unwrap_or_default().chars().take(60).collect();
        format!("failed to build grid from '{}'", shown)
    })
}

/// Summary, shape and descriptor of a grid.
pub fn describe(source: &str) -> Result<Value> {
    let grid = load_grid(source)?;
    info!(grid_type = grid.grid_type(), "describing grid");

    Ok(json!({
        "summary": grid.to_string(),
        "grid_type": grid.grid_type(),
        "shape": grid.coordinate_shape(),
        "dimensions": grid.coordinate_names(),
        "descriptor": serde_json::to_value(grid.descriptor())?,
    }))
}

/// Descriptor of the grid left after cutting `bbox` out of the grid.
pub fn lonlatbox(source: &str, bbox: LonLatBox) -> Result<Value> {
    let grid = load_grid(source)?;
    let field = ArrayD::<f64>::zeros(IxDyn(&grid.coordinate_shape()));

    let (_, sliced) = grid
        .lonlatbox(&field, &bbox)
        .with_context(|| format!("failed to slice box {}", bbox))?;
    info!(
        from = ?grid.coordinate_shape(),
        to = ?sliced.coordinate_shape(),
        "sliced grid"
    );

    Ok(json!({
        "grid_type": sliced.grid_type(),
        "shape": sliced.coordinate_shape(),
        "descriptor": serde_json::to_value(sliced.descriptor())?,
    }))
}

/// Grid point closest to `(lat, lon)` and its great-circle distance.
pub fn nearest(source: &str, lat: f64, lon: f64) -> Result<Value> {
    let grid = load_grid(source)?;
    let index = grid.nearest_index((lat, lon))?;
    let (point_lat, point_lon) = grid
        .point_at(index)
        .context("nearest index outside the grid")?;

    Ok(json!({
        "index": serde_json::to_value(index)?,
        "lat": point_lat,
        "lon": point_lon,
        "distance_m": haversine_distance((lat, lon), (point_lat, point_lon)),
    }))
}
