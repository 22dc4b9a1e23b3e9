//! PyO3 bindings for Python integration

use pyo3::prelude::*;

mod filter_bindings;
mod inversion_bindings;

/// Python module definition
#[pymodule]
fn moho_inversion(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<inversion_bindings::PyInversionEngine>()?;
    m.add_function(wrap_pyfunction!(filter_bindings::design_lowpass_gain, m)?)?;
    m.add_function(wrap_pyfunction!(filter_bindings::apply_filter, m)?)?;

    Ok(())
}

/// Map library errors onto `ValueError`
pub(crate) fn to_py_err(err: impl std::fmt::Display) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(err.to_string())
}
