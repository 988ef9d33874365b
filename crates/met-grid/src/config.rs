//! Configuration for the grid engine.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GridError, Result};
use crate::interpolate::InterpolationOrder;

/// Configuration for remapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridEngineConfig {
    /// Interpolation order used when none is given explicitly.
    pub default_order: InterpolationOrder,

    /// Minimum number of leading slices before remapping fans out over rayon.
    pub parallel_min_slices: usize,
}

impl Default for GridEngineConfig {
    fn default() -> Self {
        Self {
            default_order: InterpolationOrder::Nearest,
            parallel_min_slices: 4,
        }
    }
}

impl GridEngineConfig {
    /// Load configuration from environment variables.
    ///
    /// Unparseable values are ignored and the default kept.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("GRID_INTERPOLATION_ORDER") {
            match val.parse() {
                Ok(order) => config.default_order = order,
                Err(e) => tracing::warn!(value = %val, error = %e, "ignoring GRID_INTERPOLATION_ORDER"),
            }
        }

        if let Ok(val) = std::env::var("GRID_PARALLEL_MIN_SLICES") {
            if let Ok(n) = val.parse() {
                config.parallel_min_slices = n;
            }
        }

        config
    }

    /// Parse a YAML document; missing keys take their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| GridError::parse_error(format!("invalid engine config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&text)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.parallel_min_slices == 0 {
            return Err(GridError::invalid_field("parallel_min_slices", "must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = GridEngineConfig::default();
        assert_eq!(config.default_order, InterpolationOrder::Nearest);
        assert_eq!(config.parallel_min_slices, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let config = GridEngineConfig {
            parallel_min_slices: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_yaml_partial() {
        let config = GridEngineConfig::from_yaml_str("default_order: bilinear\n").unwrap();
        assert_eq!(config.default_order, InterpolationOrder::Bilinear);
        assert_eq!(config.parallel_min_slices, 4);

        assert!(GridEngineConfig::from_yaml_str("default_order: cubic\n").is_err());
        assert!(GridEngineConfig::from_yaml_str("parallel_min_slices: 0\n").is_err());
    }

    #[test]
    fn test_from_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "parallel_min_slices: 16").unwrap();

        let config = GridEngineConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(config.parallel_min_slices, 16);
    }
}
