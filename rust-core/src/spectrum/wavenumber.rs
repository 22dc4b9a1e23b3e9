//! Frequency grid and downward continuation operator

use std::f64::consts::PI;

/// Sample frequencies (cycles per metre) of a length-`n` DFT
///
/// Layout: `[0, 1, ..., ceil(n/2)-1, -floor(n/2), ..., -1] / (n * dx_m)`.
pub fn fft_frequencies(n: usize, dx_m: f64) -> Vec<f64> {
    let positive = (n + 1) / 2;
    let span = n as f64 * dx_m;

    (0..n)
        .map(|k| {
            if k < positive {
                k as f64 / span
            } else {
                (k as f64 - n as f64) / span
            }
        })
        .collect()
}

/// Angular wavenumbers k = 2πf (rad/m)
pub fn angular_wavenumbers(n: usize, dx_m: f64) -> Vec<f64> {
    fft_frequencies(n, dx_m)
        .into_iter()
        .map(|f| 2.0 * PI * f)
        .collect()
}

/// Wavelength in kilometres for a frequency in cycles per metre
///
/// The DC bin maps to `f64::INFINITY`.
pub fn wavelength_km(frequency: f64) -> f64 {
    if frequency == 0.0 {
        f64::INFINITY
    } else {
        1.0 / frequency.abs() / 1000.0
    }
}

/// Combined gain × exp(|k| depth) operator for downward continuation
///
/// Bins with zero gain are exactly zero. Their continuation factor can
/// overflow to infinity on fine grids, and 0 × ∞ would poison the
/// spectrum with NaN.
pub fn continuation_operator(gain: &[f64], dx_m: f64, depth_m: f64) -> Vec<f64> {
    angular_wavenumbers(gain.len(), dx_m)
        .iter()
        .zip(gain.iter())
        .map(|(&k, &g)| if g == 0.0 { 0.0 } else { g * (k.abs() * depth_m).exp() })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequencies_odd_length() {
        let f = fft_frequencies(5, 0.1);
        let expected = [0.0, 2.0, 4.0, -4.0, -2.0];
        for (a, b) in f.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_frequencies_even_length() {
        let f = fft_frequencies(4, 1.0);
        let expected = [0.0, 0.25, -0.5, -0.25];
        for (a, b) in f.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_wavelength_conversion() {
        assert!(wavelength_km(0.0).is_infinite());
        assert!((wavelength_km(1.0 / 40_000.0) - 40.0).abs() < 1e-9);
        assert!((wavelength_km(-1.0 / 40_000.0) - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_continuation_operator() {
        let n = 8;
        let dx = 1000.0;
        let gain = vec![1.0, 1.0, 0.5, 0.0, 0.0, 0.0, 0.5, 1.0];
        let op = continuation_operator(&gain, dx, 30_000.0);
        let k = angular_wavenumbers(n, dx);

        assert!((op[0] - 1.0).abs() < 1e-12);
        assert!((op[1] - (k[1].abs() * 30_000.0).exp()).abs() < 1e-9);
        assert!((op[2] - 0.5 * (k[2].abs() * 30_000.0).exp()).abs() < 1e-6);
        assert_eq!(op[3], 0.0);
        assert!((op[2] - op[6]).abs() < 1e-6);
    }

    #[test]
    fn test_overflowing_factor_is_gated() {
        // exp(|k| d) overflows for 10 m spacing at 30 km depth
        let gain = vec![1.0, 0.0, 0.0, 0.0];
        let op = continuation_operator(&gain, 10.0, 30_000.0);
        assert!(op.iter().all(|v| v.is_finite()));
        assert_eq!(op[2], 0.0);
    }
}
