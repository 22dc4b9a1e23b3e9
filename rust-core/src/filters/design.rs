//! Low-pass gain design with a raised-cosine taper in wavelength
//!
//! Three bands (wavelengths in km, start > end):
//! - λ > start: unity gain
//! - end ≤ λ ≤ start: 0.5 * (1 + cos(π (start − λ) / (start − end)))
//! - λ < end: zero gain

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::constants::{FILTER_WL_END_KM, FILTER_WL_START_KM};
use crate::error::InversionError;
use crate::spectrum::wavenumber::{fft_frequencies, wavelength_km};

/// Wavelength thresholds of the cosine taper
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CosineTaper {
    /// Longest wavelength of the transition band (km); longer passes unchanged
    pub wavelength_start_km: f64,

    /// Shortest wavelength of the transition band (km); shorter is removed
    pub wavelength_end_km: f64,
}

impl Default for CosineTaper {
    fn default() -> Self {
        Self {
            wavelength_start_km: FILTER_WL_START_KM,
            wavelength_end_km: FILTER_WL_END_KM,
        }
    }
}

impl CosineTaper {
    /// Create a taper, checking `start > end > 0`
    pub fn new(wavelength_start_km: f64, wavelength_end_km: f64) -> Result<Self, InversionError> {
        let taper = Self {
            wavelength_start_km,
            wavelength_end_km,
        };
        taper.validate()?;
        Ok(taper)
    }

    pub fn validate(&self) -> Result<(), InversionError> {
        let (start, end) = (self.wavelength_start_km, self.wavelength_end_km);
        if !(end > 0.0 && start > end && start.is_finite()) {
            return Err(InversionError::InvalidParameter(format!(
                "filter band needs start > end > 0 (start {start} km, end {end} km)"
            )));
        }
        Ok(())
    }

    /// Gain for a single wavelength (km)
    pub fn gain_at_wavelength(&self, wavelength: f64) -> f64 {
        let (start, end) = (self.wavelength_start_km, self.wavelength_end_km);

        if wavelength > start {
            1.0
        } else if wavelength >= end {
            0.5 * (1.0 + (PI * (start - wavelength) / (start - end)).cos())
        } else {
            0.0
        }
    }
}

/// Per-bin low-pass gain for a length-N profile
///
/// Immutable once built; bins follow the layout of [`fft_frequencies`].
#[derive(Debug, Clone, PartialEq)]
pub struct FilterGain {
    values: Vec<f64>,
}

impl FilterGain {
    /// Gain of 1 in every bin (identity filter)
    pub fn unity(len: usize) -> Self {
        Self {
            values: vec![1.0; len],
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Builds [`FilterGain`] curves from a [`CosineTaper`]
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterDesigner {
    taper: CosineTaper,
}

impl FilterDesigner {
    pub fn new(taper: CosineTaper) -> Result<Self, InversionError> {
        taper.validate()?;
        Ok(Self { taper })
    }

    pub fn taper(&self) -> &CosineTaper {
        &self.taper
    }

    /// Design the gain curve for `n` samples spaced `dx_m` metres apart
    pub fn build(&self, n: usize, dx_m: f64) -> Result<FilterGain, InversionError> {
        if !(dx_m > 0.0 && dx_m.is_finite()) {
            return Err(InversionError::InvalidParameter(format!(
                "sample spacing must be positive (got {dx_m} m)"
            )));
        }
        Ok(design_lowpass_gain(n, dx_m, &self.taper))
    }
}

/// Design the low-pass gain curve
///
/// # Arguments
/// * `n` - Number of profile samples (and frequency bins)
/// * `dx_m` - Sample spacing in metres
/// * `taper` - Wavelength thresholds
pub fn design_lowpass_gain(n: usize, dx_m: f64, taper: &CosineTaper) -> FilterGain {
    let values = fft_frequencies(n, dx_m)
        .into_iter()
        .map(|f| taper.gain_at_wavelength(wavelength_km(f)))
        .collect();

    FilterGain { values }
}
