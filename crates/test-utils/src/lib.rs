//! Shared test utilities for the met-grid workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Grid description fixtures (regular, curvilinear, station sets)
//! - Synthetic field generators on top of `ndarray`
//! - Temporary grid description files
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{fixtures, index_field, write_griddes};
//! ```

pub mod files;
pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use files::*;
pub use fixtures::*;
pub use generators::*;

/// Macro for element-wise approximate equality of two fields.
///
/// NaN matches NaN. Shapes must agree.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_fields_approx_eq;
///
/// assert_fields_approx_eq!(remapped, expected, 1e-9);
/// ```
#[macro_export]
macro_rules! assert_fields_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left = &$left;
        let right = &$right;
        let epsilon: f64 = $epsilon as f64;
        assert_eq!(left.shape(), right.shape(), "field shapes differ");
        for (i, (l, r)) in left.iter().zip(right.iter()).enumerate() {
            let (l, r): (f64, f64) = (*l, *r);
            if l.is_nan() && r.is_nan() {
                continue;
            }
            let diff = (l - r).abs();
            if !(diff <= epsilon) {
                panic!(
                    "assertion failed: `(left ≈ right)` at flat index {}\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                    i, l, r, diff, epsilon
                );
            }
        }
    }};
}
