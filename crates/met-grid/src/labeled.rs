//! Arrays carrying dimension names, coordinate labels and attributes.

use std::collections::BTreeMap;

use ndarray::ArrayD;
use serde_json::Value;

use crate::error::{GridError, Result};
use crate::grid::Grid;

/// An n-dimensional field with metadata.
///
/// The trailing dimensions are the grid dimensions; leading ones (time,
/// level, ensemble member) are carried through grid operations unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledArray {
    pub values: ArrayD<f64>,
    pub dims: Vec<String>,
    pub coords: BTreeMap<String, Vec<f64>>,
    pub attrs: BTreeMap<String, Value>,
}

impl LabeledArray {
    /// Wrap `values` with one name per dimension.
    pub fn new(values: ArrayD<f64>, dims: Vec<String>) -> Result<Self> {
        if dims.len() != values.ndim() {
            return Err(GridError::invalid_field(
                "dims",
                format!("{} names for {} dimensions", dims.len(), values.ndim()),
            ));
        }
        Ok(Self {
            values,
            dims,
            coords: BTreeMap::new(),
            attrs: BTreeMap::new(),
        })
    }

    /// Wrap `values` laid out on `grid`, naming and labelling the grid dimensions.
    pub fn on_grid(values: ArrayD<f64>, leading_dims: &[&str], grid: &Grid) -> Result<Self> {
        grid.check_data_shape(values.shape())?;
        let mut dims: Vec<String> = leading_dims.iter().map(|d| d.to_string()).collect();
        dims.extend(grid.coordinate_names());

        let mut labeled = Self::new(values, dims)?;
        labeled.coords.extend(grid.coords());
        Ok(labeled)
    }

    /// Attach a coordinate label to dimension `name`.
    pub fn with_coord(mut self, name: &str, labels: Vec<f64>) -> Result<Self> {
        let len = self
            .dim_len(name)
            .ok_or_else(|| GridError::invalid_field(name, "not a dimension of the array"))?;
        if labels.len() != len {
            return Err(GridError::shape_mismatch(&[len], &[labels.len()]));
        }
        self.coords.insert(name.to_string(), labels);
        Ok(self)
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Length of dimension `name`.
    pub fn dim_len(&self, name: &str) -> Option<usize> {
        let axis = self.dims.iter().position(|d| d == name)?;
        Some(self.values.shape()[axis])
    }

    /// Replace the grid dimensions of `from` with those of `to`.
    ///
    /// `values` is the result of a grid operation on `self.values`.
    pub(crate) fn regridded(&self, values: ArrayD<f64>, from: &Grid, to: &Grid) -> Result<Self> {
        let n_leading = self.dims.len().saturating_sub(from.coordinate_count());
        let mut dims: Vec<String> = self.dims[..n_leading].to_vec();

        let mut coords: BTreeMap<String, Vec<f64>> = self
            .coords
            .iter()
            .filter(|(name, _)| dims.contains(name))
            .map(|(name, labels)| (name.clone(), labels.clone()))
            .collect();

        dims.extend(to.coordinate_names());
        coords.extend(to.coords());

        if dims.len() != values.ndim() {
            return Err(GridError::shape_mismatch(&[dims.len()], &[values.ndim()]));
        }

        Ok(Self {
            values,
            dims,
            coords,
            attrs: self.attrs.clone(),
        })
    }
}
