//! Inversion parameters
//!
//! Every field has a default, so a JSON file only needs the values it changes:
//!
//! ```json
//! { "compensation_depth_m": 35000.0, "constants": { "density_crust": 2700.0 } }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::constants::{
    PhysicalConstants, DEFAULT_COMPENSATION_DEPTH_M, DEFAULT_NUM_ITERATIONS,
    DEFAULT_STRIKE_HALF_WIDTH_M,
};
use crate::error::InversionError;
use crate::filters::CosineTaper;
use crate::profile::{validate_tolerance, DEFAULT_SPACING_TOLERANCE};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] InversionError),
}

/// Parameters of one inversion run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InversionConfig {
    /// Reference depth of the crust-mantle boundary (m)
    pub compensation_depth_m: f64,

    /// Number of correction passes
    pub num_iterations: usize,

    /// Gravitational constant and densities
    pub constants: PhysicalConstants,

    /// Low-pass wavelength thresholds
    pub filter: CosineTaper,

    /// Across-strike half extent of each prism (m)
    pub strike_half_width_m: f64,

    /// Relative tolerance for the uniform-spacing check
    pub spacing_tolerance: f64,
}

impl Default for InversionConfig {
    fn default() -> Self {
        Self {
            compensation_depth_m: DEFAULT_COMPENSATION_DEPTH_M,
            num_iterations: DEFAULT_NUM_ITERATIONS,
            constants: PhysicalConstants::default(),
            filter: CosineTaper::default(),
            strike_half_width_m: DEFAULT_STRIKE_HALF_WIDTH_M,
            spacing_tolerance: DEFAULT_SPACING_TOLERANCE,
        }
    }
}

impl InversionConfig {
    /// Load and validate a JSON config file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Parse and validate a JSON config
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), InversionError> {
        validate_depth(self.compensation_depth_m)?;
        self.filter.validate()?;

        let c = &self.constants;
        if !(c.gravitational_constant > 0.0 && c.gravitational_constant.is_finite()) {
            return Err(InversionError::InvalidParameter(format!(
                "gravitational constant must be positive (got {})",
                c.gravitational_constant
            )));
        }
        if !(c.density_crust > 0.0 && c.density_contrast() > 0.0) {
            return Err(InversionError::InvalidParameter(format!(
                "mantle density must exceed a positive crustal density (crust {}, mantle {})",
                c.density_crust, c.density_mantle
            )));
        }
        if !(self.strike_half_width_m > 0.0) {
            return Err(InversionError::InvalidParameter(format!(
                "strike half width must be positive (got {} m)",
                self.strike_half_width_m
            )));
        }
        validate_tolerance(self.spacing_tolerance)
    }
}

pub(crate) fn validate_depth(depth_m: f64) -> Result<(), InversionError> {
    if depth_m > 0.0 && depth_m.is_finite() {
        Ok(())
    } else {
        Err(InversionError::InvalidParameter(format!(
            "compensation depth must be positive (got {depth_m} m)"
        )))
    }
}
