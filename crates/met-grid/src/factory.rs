//! Construction of grids from descriptions.
//!
//! `GridFactory::build` accepts a typed descriptor, a loose key/value mapping
//! or grid description text (inline or a path to a file holding it) and
//! dispatches on `gridtype` to the matching grid variant.
//!
//! ```rust,ignore
//! use met_grid::GridFactory;
//!
//! let grid = GridFactory::build("gridtype = lonlat\nxsize = 2\nysize = 2\n...")?;
//! let grid = GridFactory::build(std::path::Path::new("grids/europe.txt"))?;
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::descriptor::{GridDescriptor, RawDescriptor};
use crate::error::Result;
use crate::grid::Grid;
use crate::griddes::parse_griddes;

/// Anything a grid can be built from.
#[derive(Debug, Clone)]
pub enum GridSource {
    /// An already typed descriptor.
    Descriptor(GridDescriptor),
    /// A loose key/value mapping.
    Raw(RawDescriptor),
    /// Grid description text, or a path to a file with it.
    Text(String),
    /// A file holding grid description text.
    File(PathBuf),
}

impl From<GridDescriptor> for GridSource {
    fn from(d: GridDescriptor) -> Self {
        Self::Descriptor(d)
    }
}

impl From<RawDescriptor> for GridSource {
    fn from(raw: RawDescriptor) -> Self {
        Self::Raw(raw)
    }
}

impl From<&RawDescriptor> for GridSource {
    fn from(raw: &RawDescriptor) -> Self {
        Self::Raw(raw.clone())
    }
}

impl From<String> for GridSource {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for GridSource {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<&Path> for GridSource {
    fn from(path: &Path) -> Self {
        Self::File(path.to_path_buf())
    }
}

impl From<PathBuf> for GridSource {
    fn from(path: PathBuf) -> Self {
        Self::File(path)
    }
}

impl GridSource {
    /// Resolve into a validated descriptor.
    pub fn into_descriptor(self) -> Result<GridDescriptor> {
        match self {
            Self::Descriptor(d) => Ok(d),
            Self::Raw(raw) => GridDescriptor::from_raw(&raw),
            Self::File(path) => read_description(&path),
            Self::Text(text) => {
                let path = Path::new(text.trim());
                if !text.contains('\n') && path.is_file() {
                    read_description(path)
                } else {
                    GridDescriptor::from_raw(&parse_griddes(&text)?)
                }
            }
        }
    }
}

fn read_description(path: &Path) -> Result<GridDescriptor> {
    debug!(path = %path.display(), "reading grid description file");
    let text = std::fs::read_to_string(path)?;
    GridDescriptor::from_raw(&parse_griddes(&text)?)
}

/// Builds grids from descriptions.
pub struct GridFactory;

impl GridFactory {
    /// Build the grid variant named by `gridtype`.
    ///
    /// Fails with `UnknownGridType` for unrecognised types and `MissingField`
    /// when a field required by the type is absent.
    #[instrument(skip(source))]
    pub fn build(source: impl Into<GridSource>) -> Result<Grid> {
        let descriptor = source.into().into_descriptor()?;
        let grid = Grid::new(descriptor)?;
        debug!(
            grid_type = grid.grid_type(),
            shape = ?grid.coordinate_shape(),
            "built grid"
        );
        Ok(grid)
    }
}
