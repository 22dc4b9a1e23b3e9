//! Equally spaced 2-D terrain profile
//!
//! All values are SI: distance and topography in metres, Bouguer anomaly in m/s^2.

use crate::constants::{KM_TO_M, MGAL_TO_MS2};
use crate::error::InversionError;

/// Relative tolerance for the uniform-grid check
pub const DEFAULT_SPACING_TOLERANCE: f64 = 1e-6;

/// Profile of (distance, topography, anomaly) samples on a uniform grid
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    distance_m: Vec<f64>,
    topography_m: Vec<f64>,
    bouguer_ms2: Vec<f64>,
    dx_m: f64,
}

impl Profile {
    /// Build a profile from SI columns
    ///
    /// Fails before any computation if the columns disagree in length, contain
    /// non-finite values, or are not sampled on a uniform increasing grid.
    pub fn new(
        distance_m: Vec<f64>,
        topography_m: Vec<f64>,
        bouguer_ms2: Vec<f64>,
    ) -> Result<Self, InversionError> {
        Self::with_tolerance(distance_m, topography_m, bouguer_ms2, DEFAULT_SPACING_TOLERANCE)
    }

    /// Build a profile with a custom relative spacing tolerance
    pub fn with_tolerance(
        distance_m: Vec<f64>,
        topography_m: Vec<f64>,
        bouguer_ms2: Vec<f64>,
        tolerance: f64,
    ) -> Result<Self, InversionError> {
        check_columns(
            &distance_m,
            &[
                ("topography_m", topography_m.as_slice()),
                ("bouguer_ms2", bouguer_ms2.as_slice()),
            ],
        )?;
        let dx_m = uniform_spacing(&distance_m, tolerance)?;

        Ok(Self {
            distance_m,
            topography_m,
            bouguer_ms2,
            dx_m,
        })
    }

    /// Build a profile from survey units (km, m, mGal)
    pub fn from_survey_units(
        distance_km: &[f64],
        topography_m: &[f64],
        bouguer_mgal: &[f64],
    ) -> Result<Self, InversionError> {
        Self::new(
            distance_km.iter().map(|&d| d * KM_TO_M).collect(),
            topography_m.to_vec(),
            bouguer_mgal.iter().map(|&g| g * MGAL_TO_MS2).collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.distance_m.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distance_m.is_empty()
    }

    /// Sample spacing (m)
    pub fn dx_m(&self) -> f64 {
        self.dx_m
    }

    pub fn distance_m(&self) -> &[f64] {
        &self.distance_m
    }

    pub fn topography_m(&self) -> &[f64] {
        &self.topography_m
    }

    pub fn bouguer_ms2(&self) -> &[f64] {
        &self.bouguer_ms2
    }
}

/// Check column lengths and finiteness against the distance column
pub(crate) fn check_columns(
    distance_m: &[f64],
    columns: &[(&'static str, &[f64])],
) -> Result<(), InversionError> {
    if distance_m.len() < 2 {
        return Err(InversionError::TooFewSamples(distance_m.len()));
    }

    for &(column, values) in columns {
        if values.len() != distance_m.len() {
            return Err(InversionError::ColumnLengthMismatch {
                column,
                expected: distance_m.len(),
                found: values.len(),
            });
        }
    }

    let all = std::iter::once(("distance_m", distance_m)).chain(columns.iter().copied());
    for (column, values) in all {
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(InversionError::NonFiniteValue { column, index });
        }
    }

    Ok(())
}

/// Return the grid step, or an error if spacing is not uniform
///
/// The step is taken from the first pair of samples; every later step must
/// match it within `tolerance * step`.
pub(crate) fn uniform_spacing(distance_m: &[f64], tolerance: f64) -> Result<f64, InversionError> {
    validate_tolerance(tolerance)?;
    if distance_m.len() < 2 {
        return Err(InversionError::TooFewSamples(distance_m.len()));
    }

    let dx = distance_m[1] - distance_m[0];
    if !(dx > 0.0) {
        return Err(InversionError::NonIncreasingDistance(dx));
    }

    let limit = tolerance * dx;
    for (i, pair) in distance_m.windows(2).enumerate().skip(1) {
        let step = pair[1] - pair[0];
        if (step - dx).abs() > limit {
            return Err(InversionError::NonUniformSpacing {
                index: i + 1,
                expected: dx,
                found: step,
            });
        }
    }

    Ok(dx)
}

/// Spacing tolerance must be a non-negative number
pub(crate) fn validate_tolerance(tolerance: f64) -> Result<(), InversionError> {
    if tolerance >= 0.0 {
        Ok(())
    } else {
        Err(InversionError::InvalidParameter(format!(
            "spacing tolerance must be non-negative (got {tolerance})"
        )))
    }
}
