//! One-sided amplitude spectra of profiles
//!
//! Diagnostic view of how much of a signal lives at each wavelength, used to
//! check what the low-pass gate lets through.

use realfft::{RealFftPlanner, RealToComplex};
use std::sync::Arc;

use super::wavenumber::wavelength_km;

/// Amplitude spectrum of a real profile
#[derive(Debug, Clone)]
pub struct AmplitudeSpectrum {
    /// Wavelength per bin (km), DC first as infinity
    pub wavelengths_km: Vec<f64>,

    /// |X[k]| per bin, k = 0..N/2
    pub amplitudes: Vec<f64>,
}

impl AmplitudeSpectrum {
    /// Fraction of spectral energy at wavelengths shorter than `cutoff_km`
    ///
    /// Returns 0 for an all-zero signal.
    pub fn energy_fraction_below(&self, cutoff_km: f64) -> f64 {
        let mut total = 0.0;
        let mut below = 0.0;

        for (&wl, &amp) in self.wavelengths_km.iter().zip(self.amplitudes.iter()) {
            let energy = amp * amp;
            total += energy;
            if wl < cutoff_km {
                below += energy;
            }
        }

        if total > 0.0 {
            below / total
        } else {
            0.0
        }
    }

    /// Wavelength (km) of the strongest non-DC bin, if any
    pub fn dominant_wavelength_km(&self) -> Option<f64> {
        self.amplitudes
            .iter()
            .enumerate()
            .skip(1)
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(bin, _)| self.wavelengths_km[bin])
    }
}

/// Real-FFT spectrum analyzer for a fixed profile geometry
pub struct SpectrumAnalyzer {
    /// Number of profile samples
    len: usize,

    /// Sample spacing (m)
    dx_m: f64,

    /// Real FFT processor
    r2c: Arc<dyn RealToComplex<f64>>,
}

impl SpectrumAnalyzer {
    /// Create analyzer for `len` samples spaced `dx_m` metres apart
    pub fn new(len: usize, dx_m: f64) -> Self {
        let mut planner = RealFftPlanner::<f64>::new();
        let r2c = planner.plan_fft_forward(len);

        Self { len, dx_m, r2c }
    }

    /// Number of one-sided bins (N/2 + 1)
    pub fn num_bins(&self) -> usize {
        self.len / 2 + 1
    }

    /// Wavelength axis in kilometres
    pub fn wavelength_axis_km(&self) -> Vec<f64> {
        let span = self.len as f64 * self.dx_m;
        (0..self.num_bins())
            .map(|bin| wavelength_km(bin as f64 / span))
            .collect()
    }

    /// Compute the amplitude spectrum of `signal`
    ///
    /// Signals shorter than the planned length are zero-padded, longer ones truncated.
    pub fn analyze(&self, signal: &[f64]) -> AmplitudeSpectrum {
        let mut input = self.r2c.make_input_vec();
        let copy_len = signal.len().min(self.len);
        input[..copy_len].copy_from_slice(&signal[..copy_len]);

        let mut output = self.r2c.make_output_vec();
        let amplitudes = match self.r2c.process(&mut input, &mut output) {
            Ok(()) => output.iter().map(|c| c.norm()).collect(),
            // Buffers come from the plan itself, so sizes always match
            Err(_) => vec![0.0; self.num_bins()],
        };

        AmplitudeSpectrum {
            wavelengths_km: self.wavelength_axis_km(),
            amplitudes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_wavelength_axis() {
        let analyzer = SpectrumAnalyzer::new(100, 1000.0);
        let axis = analyzer.wavelength_axis_km();

        assert_eq!(axis.len(), 51);
        assert!(axis[0].is_infinite());
        assert!((axis[1] - 100.0).abs() < 1e-9);
        assert!((axis[50] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_dominant_wavelength() {
        let n = 200;
        let dx = 1000.0;
        // 40 km sinusoid: 5 cycles over 200 km
        let signal: Vec<f64> = (0..n).map(|i| (2.0 * PI * i as f64 * dx / 40_000.0).sin()).collect();
        let spectrum = SpectrumAnalyzer::new(n, dx).analyze(&signal);

        let dominant = spectrum.dominant_wavelength_km().unwrap();
        assert!((dominant - 40.0).abs() < 1e-6);
    }

    #[test]
    fn test_energy_fraction() {
        let n = 200;
        let dx = 1000.0;
        let long: Vec<f64> = (0..n).map(|i| (2.0 * PI * i as f64 * dx / 100_000.0).sin()).collect();
        let short: Vec<f64> = (0..n).map(|i| (2.0 * PI * i as f64 * dx / 10_000.0).sin()).collect();
        let mixed: Vec<f64> = long.iter().zip(short.iter()).map(|(a, b)| a + b).collect();

        let analyzer = SpectrumAnalyzer::new(n, dx);
        assert!(analyzer.analyze(&long).energy_fraction_below(33.0) < 1e-12);
        assert!((analyzer.analyze(&mixed).energy_fraction_below(33.0) - 0.5).abs() < 1e-9);
        assert_eq!(analyzer.analyze(&vec![0.0; n]).energy_fraction_below(33.0), 0.0);
    }
}
