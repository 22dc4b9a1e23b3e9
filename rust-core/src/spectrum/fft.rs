//! FFT engine for real-valued profiles
//!
//! Full-length complex transforms so per-bin operators can be applied on the
//! standard `[0, +f..., -f...]` frequency layout.

use rustfft::{Fft, FftPlanner};
use num_complex::Complex64;
use std::sync::Arc;

/// Forward/inverse DFT pair of fixed length
pub struct FftEngine {
    /// Transform length (number of profile samples)
    len: usize,

    /// Forward FFT plan
    fft: Arc<dyn Fft<f64>>,

    /// Inverse FFT plan
    ifft: Arc<dyn Fft<f64>>,
}

impl FftEngine {
    /// Plan forward and inverse transforms of length `len`
    ///
    /// Any length is accepted; rustfft picks a mixed-radix or Bluestein plan
    /// for non powers of two.
    pub fn new(len: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(len);
        let ifft = planner.plan_fft_inverse(len);

        Self { len, fft, ifft }
    }

    /// Transform a real signal to its complex spectrum
    ///
    /// # Panics
    /// Panics if `signal.len()` differs from the planned length.
    pub fn forward(&self, signal: &[f64]) -> Vec<Complex64> {
        assert_eq!(signal.len(), self.len, "signal length does not match FFT plan");

        let mut buffer: Vec<Complex64> = signal.iter().map(|&x| Complex64::new(x, 0.0)).collect();
        self.fft.process(&mut buffer);
        buffer
    }

    /// Inverse-transform a spectrum and keep the real part
    ///
    /// Returns the real signal (scaled by 1/N) and the largest imaginary
    /// magnitude that was discarded. For a Hermitian spectrum that residue is
    /// roundoff only.
    ///
    /// # Panics
    /// Panics if `spectrum.len()` differs from the planned length.
    pub fn inverse_real(&self, mut spectrum: Vec<Complex64>) -> (Vec<f64>, f64) {
        assert_eq!(spectrum.len(), self.len, "spectrum length does not match FFT plan");

        self.ifft.process(&mut spectrum);

        let scale = 1.0 / self.len as f64;
        let mut residue = 0.0_f64;
        let real = spectrum
            .iter()
            .map(|c| {
                residue = residue.max((c.im * scale).abs());
                c.re * scale
            })
            .collect();

        (real, residue)
    }

    /// Transform length
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_round_trip_identity() {
        let n = 251;
        let engine = FftEngine::new(n);
        let signal: Vec<f64> = (0..n)
            .map(|i| (2.0 * PI * i as f64 / 37.0).sin() + 0.3 * i as f64)
            .collect();

        let (restored, residue) = engine.inverse_real(engine.forward(&signal));

        for (a, b) in signal.iter().zip(restored.iter()) {
            assert!((a - b).abs() < 1e-9, "round trip drifted: {} vs {}", a, b);
        }
        assert!(residue < 1e-9);
    }

    #[test]
    fn test_dc_bin() {
        let engine = FftEngine::new(64);
        let spectrum = engine.forward(&vec![2.0; 64]);

        assert!((spectrum[0].re - 128.0).abs() < 1e-10);
        assert!(spectrum[5].norm() < 1e-10);
    }

    #[test]
    fn test_sine_peak_bin() {
        let n = 128;
        let engine = FftEngine::new(n);
        let signal: Vec<f64> = (0..n).map(|i| (2.0 * PI * 8.0 * i as f64 / n as f64).cos()).collect();
        let spectrum = engine.forward(&signal);

        // Energy splits between +f and -f
        assert!((spectrum[8].norm() - 64.0).abs() < 1e-9);
        assert!((spectrum[n - 8].norm() - 64.0).abs() < 1e-9);
    }
}
