//! Error types for grid construction, slicing and remapping.

use thiserror::Error;

/// Errors that can occur while building or operating on grids.
#[derive(Error, Debug)]
pub enum GridError {
    /// The trailing dimensions of a data array do not match the grid.
    #[error("data shape {actual:?} does not end with grid shape {expected:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// Malformed longitude/latitude box.
    #[error("invalid lon/lat box: {0}")]
    InvalidBox(String),

    /// The box excludes every grid point.
    #[error("no grid point remains inside box {0}")]
    EmptySliceResult(String),

    /// The descriptor names a grid type without a constructor.
    #[error("unknown grid type: {0}")]
    UnknownGridType(String),

    /// A field required by the grid type is absent.
    #[error("missing descriptor field: {0}")]
    MissingField(String),

    /// A field is present but violates a descriptor invariant.
    #[error("invalid descriptor field '{field}': {message}")]
    InvalidField { field: String, message: String },

    /// The angular unit is neither degrees nor radians.
    #[error("no conversion rule for unit '{0}'")]
    UnsupportedUnit(String),

    /// Only nearest (0) and bilinear (1) are supported.
    #[error("unsupported interpolation order: {0}")]
    UnsupportedInterpolationOrder(String),

    /// The target grid cannot be sampled.
    #[error("invalid target grid: {0}")]
    InvalidTargetGrid(String),

    /// Grid description text could not be parsed.
    #[error("failed to parse grid description: {0}")]
    ParseError(String),

    /// An array could not be reshaped into the requested layout.
    #[error("array layout error: {0}")]
    Layout(String),

    /// Reading a grid description file failed.
    #[error("io error: {0}")]
    Io(String),
}

impl GridError {
    /// Create a ShapeMismatch error.
    pub fn shape_mismatch(expected: &[usize], actual: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        }
    }

    /// Create a MissingField error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField(field.into())
    }

    /// Create an InvalidField error.
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an InvalidBox error.
    pub fn invalid_box(msg: impl Into<String>) -> Self {
        Self::InvalidBox(msg.into())
    }

    /// Create an InvalidTargetGrid error.
    pub fn invalid_target(msg: impl Into<String>) -> Self {
        Self::InvalidTargetGrid(msg.into())
    }

    /// Create a ParseError.
    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }
}

impl From<std::io::Error> for GridError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for GridError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}

impl From<ndarray::ShapeError> for GridError {
    fn from(err: ndarray::ShapeError) -> Self {
        Self::Layout(err.to_string())
    }
}

/// Result type for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;
