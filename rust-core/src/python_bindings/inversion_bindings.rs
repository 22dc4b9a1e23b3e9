//! Python bindings for the Moho inversion engine

use pyo3::prelude::*;
use numpy::{PyArray1, PyReadonlyArray1};

use crate::constants::{
    PhysicalConstants, DEFAULT_COMPENSATION_DEPTH_M, DEFAULT_NUM_ITERATIONS, DENSITY_CRUST,
    DENSITY_MANTLE,
};
use crate::gravity::PrismGravity;
use crate::inversion::{InversionConfig, InversionEngine};
use super::to_py_err;

/// Inversion engine exposed to Python, backed by the analytical prism model
#[pyclass(name = "InversionEngine")]
pub struct PyInversionEngine {
    engine: InversionEngine<PrismGravity>,
}

#[pymethods]
impl PyInversionEngine {
    /// Create an engine
    ///
    /// Args:
    ///     density_crust: Crustal density (kg/m^3)
    ///     density_mantle: Mantle density (kg/m^3)
    #[new]
    #[pyo3(signature = (density_crust = DENSITY_CRUST, density_mantle = DENSITY_MANTLE))]
    fn new(density_crust: f64, density_mantle: f64) -> PyResult<Self> {
        let constants = PhysicalConstants::with_densities(density_crust, density_mantle);
        let config = InversionConfig {
            constants,
            ..InversionConfig::default()
        };
        let model = PrismGravity::new(constants.gravitational_constant);
        let engine = InversionEngine::new(config, model).map_err(to_py_err)?;

        Ok(Self { engine })
    }

    /// Run the inversion
    ///
    /// Args:
    ///     bouguer_ms2: Bouguer anomaly in m/s^2
    ///     topography_m: Topography in metres
    ///     distance_m: Uniformly spaced distances in metres
    ///     compensation_depth_m: Reference Moho depth in metres
    ///     num_iterations: Number of correction passes
    ///
    /// Returns:
    ///     (moho_depth, root snapshots) as numpy arrays
    #[pyo3(signature = (
        bouguer_ms2,
        topography_m,
        distance_m,
        compensation_depth_m = DEFAULT_COMPENSATION_DEPTH_M,
        num_iterations = DEFAULT_NUM_ITERATIONS
    ))]
    fn invert<'py>(
        &self,
        py: Python<'py>,
        bouguer_ms2: PyReadonlyArray1<f64>,
        topography_m: PyReadonlyArray1<f64>,
        distance_m: PyReadonlyArray1<f64>,
        compensation_depth_m: f64,
        num_iterations: usize,
    ) -> PyResult<(&'py PyArray1<f64>, Vec<&'py PyArray1<f64>>)> {
        let result = self
            .engine
            .invert(
                bouguer_ms2.as_slice().map_err(to_py_err)?,
                topography_m.as_slice().map_err(to_py_err)?,
                distance_m.as_slice().map_err(to_py_err)?,
                compensation_depth_m,
                num_iterations,
            )
            .map_err(to_py_err)?;

        let history = result
            .history
            .roots()
            .iter()
            .map(|root| PyArray1::from_slice(py, root))
            .collect();

        Ok((PyArray1::from_vec(py, result.moho_depth_m), history))
    }
}
