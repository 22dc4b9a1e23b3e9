//! Frequency-domain filtering of whole profiles
//!
//! Forward FFT, per-bin multiply by a [`FilterGain`], inverse FFT, real part.

use crate::error::InversionError;
use crate::spectrum::FftEngine;
use super::design::FilterGain;

/// Zero-phase spectral filter bound to one profile length
pub struct SpectralFilter {
    engine: FftEngine,
}

impl SpectralFilter {
    /// Create a filter for signals of `len` samples
    pub fn new(len: usize) -> Self {
        Self {
            engine: FftEngine::new(len),
        }
    }

    /// Shared FFT plan, reused by callers that apply their own per-bin operator
    pub fn engine(&self) -> &FftEngine {
        &self.engine
    }

    /// Filter `signal` through `gain`
    ///
    /// # Returns
    /// Real part of IFFT(FFT(signal) · gain), same length and units as `signal`
    pub fn apply(&self, signal: &[f64], gain: &FilterGain) -> Result<Vec<f64>, InversionError> {
        self.apply_operator(signal, gain.as_slice())
    }

    /// Filter `signal` through an arbitrary real per-bin operator
    pub fn apply_operator(&self, signal: &[f64], operator: &[f64]) -> Result<Vec<f64>, InversionError> {
        if signal.len() != self.engine.len() {
            return Err(InversionError::GainLengthMismatch {
                expected: self.engine.len(),
                found: signal.len(),
            });
        }
        if operator.len() != signal.len() {
            return Err(InversionError::GainLengthMismatch {
                expected: operator.len(),
                found: signal.len(),
            });
        }

        let mut spectrum = self.engine.forward(signal);
        for (bin, &g) in spectrum.iter_mut().zip(operator.iter()) {
            *bin *= g;
        }

        let (filtered, residue) = self.engine.inverse_real(spectrum);
        log::debug!("spectral filter discarded imaginary residue {:.3e}", residue);

        Ok(filtered)
    }
}

/// One-shot convenience wrapper around [`SpectralFilter::apply`]
pub fn apply_filter(signal: &[f64], gain: &FilterGain) -> Result<Vec<f64>, InversionError> {
    SpectralFilter::new(gain.len()).apply(signal, gain)
}
