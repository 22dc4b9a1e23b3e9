//! Physical constants and default inversion parameters
//!
//! Densities follow the standard crust/mantle pair used for Airy isostasy.

use serde::{Deserialize, Serialize};

/// Universal gravitational constant (m^3 kg^-1 s^-2)
pub const GRAVITATIONAL_CONSTANT: f64 = 6.674_30e-11;

/// Standard crustal density (kg/m^3)
pub const DENSITY_CRUST: f64 = 2670.0;

/// Standard upper-mantle density (kg/m^3)
pub const DENSITY_MANTLE: f64 = 3200.0;

/// Wavelengths above this pass the low-pass filter unchanged (km)
pub const FILTER_WL_START_KM: f64 = 50.0;

/// Wavelengths below this are removed by the low-pass filter (km)
pub const FILTER_WL_END_KM: f64 = 33.0;

/// Milligal to SI acceleration (m/s^2)
pub const MGAL_TO_MS2: f64 = 1e-5;

/// Kilometres to metres
pub const KM_TO_M: f64 = 1000.0;

/// Reference depth of the crust-mantle boundary (m)
pub const DEFAULT_COMPENSATION_DEPTH_M: f64 = 30_000.0;

/// Fixed number of correction passes
pub const DEFAULT_NUM_ITERATIONS: usize = 4;

/// Across-strike half extent of every prism (m), approximating infinite strike
pub const DEFAULT_STRIKE_HALF_WIDTH_M: f64 = 500_000.0;

/// Physical constants for one inversion run
///
/// Passed by value into the engine so runs with different density
/// assumptions never share state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalConstants {
    /// Gravitational constant G (m^3 kg^-1 s^-2)
    pub gravitational_constant: f64,

    /// Crustal density ρ_crust (kg/m^3)
    pub density_crust: f64,

    /// Mantle density ρ_mantle (kg/m^3)
    pub density_mantle: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            density_crust: DENSITY_CRUST,
            density_mantle: DENSITY_MANTLE,
        }
    }
}

impl PhysicalConstants {
    /// Create constants with custom densities and the standard G
    pub fn with_densities(density_crust: f64, density_mantle: f64) -> Self {
        Self {
            density_crust,
            density_mantle,
            ..Self::default()
        }
    }

    /// Density contrast Δρ = ρ_mantle − ρ_crust
    pub fn density_contrast(&self) -> f64 {
        self.density_mantle - self.density_crust
    }

    /// Parker's linearization constant 2πGΔρ
    ///
    /// Converts a gravity anomaly (m/s^2) into an equivalent root thickness (m).
    pub fn sheet_constant(&self) -> f64 {
        2.0 * std::f64::consts::PI * self.gravitational_constant * self.density_contrast()
    }

    /// Ratio ρ_crust / Δρ used for the Airy root estimate
    pub fn airy_ratio(&self) -> f64 {
        self.density_crust / self.density_contrast()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_contrast() {
        let constants = PhysicalConstants::default();
        assert!((constants.density_contrast() - 530.0).abs() < 1e-12);
    }

    #[test]
    fn test_airy_ratio() {
        let constants = PhysicalConstants::default();
        // 2 km of topography supports roughly a 10 km root
        let root = 2000.0 * constants.airy_ratio();
        assert!((root - 10_075.471_698).abs() < 1e-3);
    }

    #[test]
    fn test_sheet_constant() {
        let constants = PhysicalConstants::with_densities(2700.0, 3300.0);
        let expected = 2.0 * std::f64::consts::PI * GRAVITATIONAL_CONSTANT * 600.0;
        assert!((constants.sheet_constant() - expected).abs() < 1e-20);
    }
}
