//! Spectral tools: FFT engine, wavenumber grid, amplitude spectra

pub mod fft;
pub mod wavenumber;
pub mod analysis;

pub use fft::FftEngine;
pub use wavenumber::{angular_wavenumbers, continuation_operator, fft_frequencies, wavelength_km};
pub use analysis::{AmplitudeSpectrum, SpectrumAnalyzer};
