//! Grid descriptors.
//!
//! A descriptor is the validated, closed configuration of one grid variant.
//! Collaborators hand us loose key/value mappings ([`RawDescriptor`], as read
//! from a grid description file or from `grid_*` attributes of a dataset);
//! [`GridDescriptor::from_raw`] rejects unknown grid types and missing or
//! inconsistent fields up front.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::coords::AngleUnit;
use crate::error::{GridError, Result};

/// Prefix used when a descriptor is stored as dataset attributes.
pub const ATTRIBUTE_PREFIX: &str = "grid_";

/// A single value of a loose descriptor mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DescriptorValue {
    Number(f64),
    List(Vec<f64>),
    Text(String),
}

impl DescriptorValue {
    fn kind(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::List(_) => "list",
            Self::Text(_) => "text",
        }
    }
}

impl From<f64> for DescriptorValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<usize> for DescriptorValue {
    fn from(v: usize) -> Self {
        Self::Number(v as f64)
    }
}

impl From<Vec<f64>> for DescriptorValue {
    fn from(v: Vec<f64>) -> Self {
        Self::List(v)
    }
}

impl From<&str> for DescriptorValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for DescriptorValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl std::fmt::Display for DescriptorValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
            Self::List(values) => {
                let joined: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "{}", joined.join(" "))
            }
        }
    }
}

/// Loose key/value grid description, ordered by key.
pub type RawDescriptor = BTreeMap<String, DescriptorValue>;

/// Name, long name and angular unit of one coordinate axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisLabel {
    pub name: String,
    pub long_name: String,
    pub units: String,
}

impl AxisLabel {
    pub fn new(name: impl Into<String>, long_name: impl Into<String>, units: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            long_name: long_name.into(),
            units: units.into(),
        }
    }

    /// Default label of the longitude axis.
    pub fn longitude() -> Self {
        Self::new("lon", "longitude", "degrees")
    }

    /// Default label of the latitude axis.
    pub fn latitude() -> Self {
        Self::new("lat", "latitude", "degrees")
    }

    pub fn unit(&self) -> Result<AngleUnit> {
        AngleUnit::parse(&self.units)
    }

    /// Same label with the units replaced by degrees.
    pub fn in_degrees(&self) -> Self {
        Self {
            units: AngleUnit::Degrees.as_str().to_string(),
            ..self.clone()
        }
    }
}

/// Values of a regular grid axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AxisValues {
    /// Evenly spaced: `first + i * inc` for `i` in `0..size`.
    Range { first: f64, inc: f64, size: usize },
    /// Literal values, e.g. gaussian latitudes or a box-sliced axis.
    Explicit { vals: Vec<f64> },
}

impl AxisValues {
    pub fn range(first: f64, inc: f64, size: usize) -> Self {
        Self::Range { first, inc, size }
    }

    pub fn explicit(vals: Vec<f64>) -> Self {
        Self::Explicit { vals }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Range { size, .. } => *size,
            Self::Explicit { vals } => vals.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Expand to the axis values in the axis' native unit.
    pub fn values(&self) -> Vec<f64> {
        match self {
            Self::Range { first, inc, size } => {
                (0..*size).map(|i| first + i as f64 * inc).collect()
            }
            Self::Explicit { vals } => vals.clone(),
        }
    }
}

/// One axis of a regular lon/lat grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegularAxis {
    pub label: AxisLabel,
    pub values: AxisValues,
}

/// Grid whose points are the outer product of a latitude and a longitude axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegularDescriptor {
    pub y: RegularAxis,
    pub x: RegularAxis,
}

impl RegularDescriptor {
    /// Evenly spaced grid in degrees with default axis names.
    pub fn new(yfirst: f64, yinc: f64, ysize: usize, xfirst: f64, xinc: f64, xsize: usize) -> Self {
        Self {
            y: RegularAxis {
                label: AxisLabel::latitude(),
                values: AxisValues::range(yfirst, yinc, ysize),
            },
            x: RegularAxis {
                label: AxisLabel::longitude(),
                values: AxisValues::range(xfirst, xinc, xsize),
            },
        }
    }

    /// Grid from literal axis values in degrees.
    pub fn from_axes(lat: Vec<f64>, lon: Vec<f64>) -> Self {
        Self {
            y: RegularAxis {
                label: AxisLabel::latitude(),
                values: AxisValues::explicit(lat),
            },
            x: RegularAxis {
                label: AxisLabel::longitude(),
                values: AxisValues::explicit(lon),
            },
        }
    }
}

/// Grid with per-point coordinates arranged in a `(ysize, xsize)` mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurvilinearDescriptor {
    pub y: AxisLabel,
    pub x: AxisLabel,
    pub ysize: usize,
    pub xsize: usize,
    /// Row-major latitudes.
    pub yvals: Vec<f64>,
    /// Row-major longitudes.
    pub xvals: Vec<f64>,
    /// Corners per cell; informational only.
    pub nvertex: usize,
}

impl CurvilinearDescriptor {
    pub fn new(ysize: usize, xsize: usize, yvals: Vec<f64>, xvals: Vec<f64>) -> Self {
        Self {
            y: AxisLabel::latitude(),
            x: AxisLabel::longitude(),
            ysize,
            xsize,
            yvals,
            xvals,
            nvertex: 4,
        }
    }
}

/// Flat set of scattered points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnstructuredDescriptor {
    pub y: AxisLabel,
    pub x: AxisLabel,
    pub yvals: Vec<f64>,
    pub xvals: Vec<f64>,
}

impl UnstructuredDescriptor {
    pub fn new(yvals: Vec<f64>, xvals: Vec<f64>) -> Self {
        Self {
            y: AxisLabel::latitude(),
            x: AxisLabel::longitude(),
            yvals,
            xvals,
        }
    }

    pub fn gridsize(&self) -> usize {
        self.yvals.len()
    }
}

/// Validated description of one grid, tagged by `gridtype`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "gridtype", rename_all = "lowercase")]
pub enum GridDescriptor {
    Regular(RegularDescriptor),
    Curvilinear(CurvilinearDescriptor),
    Unstructured(UnstructuredDescriptor),
}

impl From<RegularDescriptor> for GridDescriptor {
    fn from(d: RegularDescriptor) -> Self {
        Self::Regular(d)
    }
}

impl From<CurvilinearDescriptor> for GridDescriptor {
    fn from(d: CurvilinearDescriptor) -> Self {
        Self::Curvilinear(d)
    }
}

impl From<UnstructuredDescriptor> for GridDescriptor {
    fn from(d: UnstructuredDescriptor) -> Self {
        Self::Unstructured(d)
    }
}

impl GridDescriptor {
    /// Canonical `gridtype` name.
    pub fn grid_type(&self) -> &'static str {
        match self {
            Self::Regular(_) => "regular",
            Self::Curvilinear(_) => "curvilinear",
            Self::Unstructured(_) => "unstructured",
        }
    }

    /// Labels of the (y, x) axes.
    pub fn labels(&self) -> (&AxisLabel, &AxisLabel) {
        match self {
            Self::Regular(d) => (&d.y.label, &d.x.label),
            Self::Curvilinear(d) => (&d.y, &d.x),
            Self::Unstructured(d) => (&d.y, &d.x),
        }
    }

    /// Shape of the grid's index space.
    pub fn shape(&self) -> Vec<usize> {
        match self {
            Self::Regular(d) => vec![d.y.values.len(), d.x.values.len()],
            Self::Curvilinear(d) => vec![d.ysize, d.xsize],
            Self::Unstructured(d) => vec![d.gridsize()],
        }
    }

    /// Check every invariant of the variant.
    pub fn validate(&self) -> Result<()> {
        let (ylabel, xlabel) = self.labels();
        ylabel.unit()?;
        xlabel.unit()?;

        match self {
            Self::Regular(d) => {
                validate_axis('y', &d.y.values)?;
                validate_axis('x', &d.x.values)?;
            }
            Self::Curvilinear(d) => {
                if d.ysize == 0 || d.xsize == 0 {
                    return Err(GridError::invalid_field("ysize/xsize", "grid has no points"));
                }
                let expected = d.ysize.checked_mul(d.xsize).ok_or_else(|| {
                    GridError::invalid_field("ysize/xsize", "ysize * xsize overflows")
                })?;
                if d.xvals.len() != expected {
                    return Err(GridError::invalid_field(
                        "xvals",
                        format!("expected {} values (ysize * xsize), got {}", expected, d.xvals.len()),
                    ));
                }
                if d.yvals.len() != expected {
                    return Err(GridError::invalid_field(
                        "yvals",
                        format!("expected {} values (ysize * xsize), got {}", expected, d.yvals.len()),
                    ));
                }
            }
            Self::Unstructured(d) => {
                if d.xvals.len() != d.yvals.len() {
                    return Err(GridError::invalid_field(
                        "xvals",
                        format!("{} longitudes for {} latitudes", d.xvals.len(), d.yvals.len()),
                    ));
                }
                if d.yvals.is_empty() {
                    return Err(GridError::invalid_field("gridsize", "grid has no points"));
                }
            }
        }
        Ok(())
    }

    /// Build and validate a descriptor from a loose mapping.
    pub fn from_raw(raw: &RawDescriptor) -> Result<Self> {
        let gridtype = match raw.get("gridtype") {
            Some(DescriptorValue::Text(t)) => t.trim().to_lowercase(),
            Some(other) => return Err(GridError::UnknownGridType(other.to_string())),
            None => return Err(GridError::missing_field("gridtype")),
        };

        let descriptor = match gridtype.as_str() {
            "regular" | "lonlat" | "gaussian" => Self::Regular(RegularDescriptor {
                y: RegularAxis {
                    label: label_from_raw(raw, 'y')?,
                    values: axis_from_raw(raw, 'y')?,
                },
                x: RegularAxis {
                    label: label_from_raw(raw, 'x')?,
                    values: axis_from_raw(raw, 'x')?,
                },
            }),
            "curvilinear" => Self::Curvilinear(CurvilinearDescriptor {
                y: label_from_raw(raw, 'y')?,
                x: label_from_raw(raw, 'x')?,
                ysize: required_count(raw, "ysize")?,
                xsize: required_count(raw, "xsize")?,
                yvals: required_list(raw, "yvals")?,
                xvals: required_list(raw, "xvals")?,
                nvertex: optional_count(raw, "nvertex")?.unwrap_or(4),
            }),
            "unstructured" => Self::Unstructured(UnstructuredDescriptor {
                y: label_from_raw(raw, 'y')?,
                x: label_from_raw(raw, 'x')?,
                yvals: required_list(raw, "yvals")?,
                xvals: required_list(raw, "xvals")?,
            }),
            other => return Err(GridError::UnknownGridType(other.to_string())),
        };

        descriptor.validate()?;

        if let Some(gridsize) = optional_count(raw, "gridsize")? {
            let points: usize = descriptor.shape().iter().product();
            if gridsize != points {
                return Err(GridError::invalid_field(
                    "gridsize",
                    format!("gridsize {} but grid has {} points", gridsize, points),
                ));
            }
        }

        Ok(descriptor)
    }

    /// Canonical loose mapping of this descriptor.
    pub fn to_raw(&self) -> RawDescriptor {
        let mut raw = RawDescriptor::new();
        raw.insert("gridtype".into(), self.grid_type().into());
        raw.insert("gridsize".into(), self.shape().iter().product::<usize>().into());

        let (ylabel, xlabel) = self.labels();
        insert_label(&mut raw, 'y', ylabel);
        insert_label(&mut raw, 'x', xlabel);

        match self {
            Self::Regular(d) => {
                insert_axis(&mut raw, 'y', &d.y.values);
                insert_axis(&mut raw, 'x', &d.x.values);
            }
            Self::Curvilinear(d) => {
                raw.insert("ysize".into(), d.ysize.into());
                raw.insert("xsize".into(), d.xsize.into());
                raw.insert("yvals".into(), d.yvals.clone().into());
                raw.insert("xvals".into(), d.xvals.clone().into());
                raw.insert("nvertex".into(), d.nvertex.into());
            }
            Self::Unstructured(d) => {
                raw.insert("yvals".into(), d.yvals.clone().into());
                raw.insert("xvals".into(), d.xvals.clone().into());
            }
        }
        raw
    }

    /// The descriptor as `grid_`-prefixed dataset attributes.
    pub fn to_attributes(&self) -> RawDescriptor {
        self.to_raw()
            .into_iter()
            .map(|(k, v)| (format!("{}{}", ATTRIBUTE_PREFIX, k), v))
            .collect()
    }

    /// Recover a descriptor from dataset attributes.
    ///
    /// Attributes without the `grid_` prefix are ignored.
    pub fn from_attributes<'a, I>(attrs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a String, &'a DescriptorValue)>,
    {
        let raw: RawDescriptor = attrs
            .into_iter()
            .filter_map(|(k, v)| {
                k.strip_prefix(ATTRIBUTE_PREFIX)
                    .map(|stripped| (stripped.to_string(), v.clone()))
            })
            .collect();
        Self::from_raw(&raw)
    }
}

fn validate_axis(dim: char, values: &AxisValues) -> Result<()> {
    match values {
        AxisValues::Range { first, inc, size } => {
            if *size == 0 {
                return Err(GridError::invalid_field(format!("{}size", dim), "axis has no points"));
            }
            if !first.is_finite() || !inc.is_finite() {
                return Err(GridError::invalid_field(
                    format!("{}first/{}inc", dim, dim),
                    "must be finite",
                ));
            }
        }
        AxisValues::Explicit { vals } => {
            if vals.is_empty() {
                return Err(GridError::invalid_field(format!("{}vals", dim), "axis has no points"));
            }
        }
    }
    Ok(())
}

fn label_from_raw(raw: &RawDescriptor, dim: char) -> Result<AxisLabel> {
    let default = if dim == 'x' {
        AxisLabel::longitude()
    } else {
        AxisLabel::latitude()
    };
    Ok(AxisLabel {
        name: optional_text(raw, &format!("{}name", dim))?.unwrap_or(default.name),
        long_name: optional_text(raw, &format!("{}longname", dim))?.unwrap_or(default.long_name),
        units: optional_text(raw, &format!("{}units", dim))?.unwrap_or(default.units),
    })
}

fn axis_from_raw(raw: &RawDescriptor, dim: char) -> Result<AxisValues> {
    let size_key = format!("{}size", dim);
    let vals_key = format!("{}vals", dim);

    if raw.contains_key(&vals_key) {
        let vals = required_list(raw, &vals_key)?;
        if let Some(size) = optional_count(raw, &size_key)? {
            if size != vals.len() {
                return Err(GridError::invalid_field(
                    size_key,
                    format!("size {} but {} has {} values", size, vals_key, vals.len()),
                ));
            }
        }
        return Ok(AxisValues::Explicit { vals });
    }

    Ok(AxisValues::Range {
        first: required_number(raw, &format!("{}first", dim))?,
        inc: required_number(raw, &format!("{}inc", dim))?,
        size: required_count(raw, &size_key)?,
    })
}

fn insert_label(raw: &mut RawDescriptor, dim: char, label: &AxisLabel) {
    raw.insert(format!("{}name", dim), label.name.clone().into());
    raw.insert(format!("{}longname", dim), label.long_name.clone().into());
    raw.insert(format!("{}units", dim), label.units.clone().into());
}

fn insert_axis(raw: &mut RawDescriptor, dim: char, values: &AxisValues) {
    match values {
        AxisValues::Range { first, inc, size } => {
            raw.insert(format!("{}first", dim), (*first).into());
            raw.insert(format!("{}inc", dim), (*inc).into());
            raw.insert(format!("{}size", dim), (*size).into());
        }
        AxisValues::Explicit { vals } => {
            raw.insert(format!("{}size", dim), vals.len().into());
            raw.insert(format!("{}vals", dim), vals.clone().into());
        }
    }
}

fn optional_text(raw: &RawDescriptor, key: &str) -> Result<Option<String>> {
    match raw.get(key) {
        None => Ok(None),
        Some(DescriptorValue::Text(t)) => Ok(Some(t.clone())),
        Some(other) => Err(GridError::invalid_field(
            key,
            format!("expected text, got {}", other.kind()),
        )),
    }
}

fn required_number(raw: &RawDescriptor, key: &str) -> Result<f64> {
    match raw.get(key) {
        None => Err(GridError::missing_field(key)),
        Some(DescriptorValue::Number(n)) => Ok(*n),
        Some(DescriptorValue::List(l)) if l.len() == 1 => Ok(l[0]),
        Some(other) => Err(GridError::invalid_field(
            key,
            format!("expected number, got {}", other.kind()),
        )),
    }
}

fn optional_count(raw: &RawDescriptor, key: &str) -> Result<Option<usize>> {
    if !raw.contains_key(key) {
        return Ok(None);
    }
    let n = required_number(raw, key)?;
    if n < 0.0 || n.fract() != 0.0 || !n.is_finite() || n >= usize::MAX as f64 {
        return Err(GridError::invalid_field(
            key,
            format!("expected a non-negative integer, got {}", n),
        ));
    }
    Ok(Some(n as usize))
}

fn required_count(raw: &RawDescriptor, key: &str) -> Result<usize> {
    optional_count(raw, key)?.ok_or_else(|| GridError::missing_field(key))
}

fn required_list(raw: &RawDescriptor, key: &str) -> Result<Vec<f64>> {
    match raw.get(key) {
        None => Err(GridError::missing_field(key)),
        Some(DescriptorValue::List(l)) => Ok(l.clone()),
        Some(DescriptorValue::Number(n)) => Ok(vec![*n]),
        Some(other) => Err(GridError::invalid_field(
            key,
            format!("expected list, got {}", other.kind()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(entries: &[(&str, DescriptorValue)]) -> RawDescriptor {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_regular_from_raw() {
        let d = GridDescriptor::from_raw(&raw(&[
            ("gridtype", "lonlat".into()),
            ("xfirst", 10.0.into()),
            ("xinc", 1.0.into()),
            ("xsize", 2usize.into()),
            ("yfirst", 50.0.into()),
            ("yinc", 1.0.into()),
            ("ysize", 3usize.into()),
        ]))
        .unwrap();

        assert_eq!(d, GridDescriptor::Regular(RegularDescriptor::new(50.0, 1.0, 3, 10.0, 1.0, 2)));
        assert_eq!(d.shape(), vec![3, 2]);
    }

    #[test]
    fn test_gaussian_accepts_explicit_axis() {
        let d = GridDescriptor::from_raw(&raw(&[
            ("gridtype", "gaussian".into()),
            ("yvals", vec![-45.0, 0.0, 45.0].into()),
            ("xfirst", 0.0.into()),
            ("xinc", 90.0.into()),
            ("xsize", 4usize.into()),
        ]))
        .unwrap();
        assert_eq!(d.shape(), vec![3, 4]);
    }

    #[test]
    fn test_missing_gridtype() {
        let err = GridDescriptor::from_raw(&raw(&[("xsize", 2usize.into())])).unwrap_err();
        assert!(matches!(err, GridError::MissingField(f) if f == "gridtype"));
    }

    #[test]
    fn test_unknown_gridtype() {
        let err = GridDescriptor::from_raw(&raw(&[("gridtype", "projection".into())])).unwrap_err();
        assert!(matches!(err, GridError::UnknownGridType(t) if t == "projection"));
    }

    #[test]
    fn test_regular_missing_inc() {
        let err = GridDescriptor::from_raw(&raw(&[
            ("gridtype", "regular".into()),
            ("xfirst", 0.0.into()),
            ("xsize", 2usize.into()),
            ("yfirst", 0.0.into()),
            ("yinc", 1.0.into()),
            ("ysize", 2usize.into()),
        ]))
        .unwrap_err();
        assert!(matches!(err, GridError::MissingField(f) if f == "xinc"));
    }

    #[test]
    fn test_explicit_size_mismatch() {
        let err = GridDescriptor::from_raw(&raw(&[
            ("gridtype", "regular".into()),
            ("xvals", vec![0.0, 1.0].into()),
            ("xsize", 3usize.into()),
            ("yvals", vec![0.0].into()),
        ]))
        .unwrap_err();
        assert!(matches!(err, GridError::InvalidField { field, .. } if field == "xsize"));
    }

    #[test]
    fn test_curvilinear_length_invariant() {
        let err = GridDescriptor::from_raw(&raw(&[
            ("gridtype", "curvilinear".into()),
            ("xsize", 2usize.into()),
            ("ysize", 2usize.into()),
            ("xvals", vec![0.0, 1.0, 0.0].into()),
            ("yvals", vec![0.0, 0.0, 1.0, 1.0].into()),
        ]))
        .unwrap_err();
        assert!(matches!(err, GridError::InvalidField { field, .. } if field == "xvals"));
    }

    #[test]
    fn test_unstructured_length_invariant() {
        let err = GridDescriptor::from_raw(&raw(&[
            ("gridtype", "unstructured".into()),
            ("xvals", vec![0.0, 1.0].into()),
            ("yvals", vec![0.0].into()),
        ]))
        .unwrap_err();
        assert!(matches!(err, GridError::InvalidField { .. }));
    }

    #[test]
    fn test_unsupported_unit() {
        let err = GridDescriptor::from_raw(&raw(&[
            ("gridtype", "unstructured".into()),
            ("xvals", vec![0.0].into()),
            ("yvals", vec![0.0].into()),
            ("xunits", "m".into()),
        ]))
        .unwrap_err();
        assert!(matches!(err, GridError::UnsupportedUnit(u) if u == "m"));
    }

    #[test]
    fn test_curvilinear_size_overflow_is_error() {
        let err = GridDescriptor::from_raw(&raw(&[
            ("gridtype", "curvilinear".into()),
            ("xsize", 1e19.into()),
            ("ysize", 4usize.into()),
            ("xvals", vec![0.0].into()),
            ("yvals", vec![0.0].into()),
        ]))
        .unwrap_err();
        assert!(matches!(err, GridError::InvalidField { field, .. } if field == "ysize/xsize"));
    }

    #[test]
    fn test_count_beyond_usize_rejected() {
        let err = GridDescriptor::from_raw(&raw(&[
            ("gridtype", "curvilinear".into()),
            ("xsize", 1e30.into()),
            ("ysize", 1usize.into()),
            ("xvals", vec![0.0].into()),
            ("yvals", vec![0.0].into()),
        ]))
        .unwrap_err();
        assert!(matches!(err, GridError::InvalidField { field, .. } if field == "xsize"));
    }

    #[test]
    fn test_gridsize_checked() {
        let err = GridDescriptor::from_raw(&raw(&[
            ("gridtype", "unstructured".into()),
            ("gridsize", 3usize.into()),
            ("xvals", vec![0.0, 1.0].into()),
            ("yvals", vec![0.0, 1.0].into()),
        ]))
        .unwrap_err();
        assert!(matches!(err, GridError::InvalidField { field, .. } if field == "gridsize"));
    }

    #[test]
    fn test_attribute_roundtrip() {
        let original: GridDescriptor = CurvilinearDescriptor::new(
            2,
            2,
            vec![50.0, 50.1, 51.0, 51.1],
            vec![10.0, 11.0, 10.1, 11.1],
        )
        .into();

        let mut attrs = original.to_attributes();
        attrs.insert("units".into(), "K".into());
        assert!(attrs.keys().filter(|k| *k != "units").all(|k| k.starts_with("grid_")));

        let restored = GridDescriptor::from_attributes(&attrs).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn test_json_tagged_by_gridtype() {
        let d: GridDescriptor = UnstructuredDescriptor::new(vec![1.0], vec![2.0]).into();
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["gridtype"], "unstructured");
        let back: GridDescriptor = serde_json::from_value(json).unwrap();
        assert_eq!(back, d);
    }
}
