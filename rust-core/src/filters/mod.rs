//! Low-pass gain design and spectral filtering

pub mod design;
pub mod spectral;

pub use design::{CosineTaper, FilterDesigner, FilterGain, design_lowpass_gain};
pub use spectral::{SpectralFilter, apply_filter};
