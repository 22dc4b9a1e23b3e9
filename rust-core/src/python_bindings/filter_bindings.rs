//! Python bindings for low-pass gain design and spectral filtering

use pyo3::prelude::*;
use numpy::{PyArray1, PyReadonlyArray1};

use crate::constants::{FILTER_WL_END_KM, FILTER_WL_START_KM};
use crate::filters::{CosineTaper, FilterDesigner, SpectralFilter};
use super::to_py_err;

/// Design the cosine-tapered low-pass gain
///
/// Args:
///     n: Number of profile samples
///     dx_m: Sample spacing in metres
///     wl_start_km: Wavelength above which gain is 1
///     wl_end_km: Wavelength below which gain is 0
///
/// Returns:
///     Gain per FFT bin as numpy array
#[pyfunction]
#[pyo3(signature = (n, dx_m, wl_start_km = FILTER_WL_START_KM, wl_end_km = FILTER_WL_END_KM))]
pub fn design_lowpass_gain<'py>(
    py: Python<'py>,
    n: usize,
    dx_m: f64,
    wl_start_km: f64,
    wl_end_km: f64,
) -> PyResult<&'py PyArray1<f64>> {
    let taper = CosineTaper::new(wl_start_km, wl_end_km).map_err(to_py_err)?;
    let gain = FilterDesigner::new(taper)
        .and_then(|designer| designer.build(n, dx_m))
        .map_err(to_py_err)?;

    Ok(PyArray1::from_slice(py, gain.as_slice()))
}

/// Apply a per-bin gain to a signal
///
/// Args:
///     signal: Input samples as numpy array
///     gain: Gain per FFT bin, same length as signal
///
/// Returns:
///     Filtered signal as numpy array
#[pyfunction]
pub fn apply_filter<'py>(
    py: Python<'py>,
    signal: PyReadonlyArray1<f64>,
    gain: PyReadonlyArray1<f64>,
) -> PyResult<&'py PyArray1<f64>> {
    let signal = signal.as_slice().map_err(to_py_err)?;
    let gain = gain.as_slice().map_err(to_py_err)?;

    let filtered = SpectralFilter::new(signal.len())
        .apply_operator(signal, gain)
        .map_err(to_py_err)?;

    Ok(PyArray1::from_vec(py, filtered))
}
