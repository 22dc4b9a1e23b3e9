//! Synthetic profile with a known crustal root
//!
//! A flat-topped plateau sits over a blocky root that is smoothed with a
//! Gaussian kernel; the Bouguer anomaly is forward-modelled from that root.

use serde::{Deserialize, Serialize};

use crate::constants::{
    PhysicalConstants, DEFAULT_COMPENSATION_DEPTH_M, DEFAULT_STRIKE_HALF_WIDTH_M, MGAL_TO_MS2,
};
use crate::error::InversionError;
use crate::gravity::{ForwardGravityModel, ObservationPoint, Prism, PrismSet};
use crate::profile::Profile;

/// Root thinner than this (m) gets no prism
const ROOT_PRESENCE_THRESHOLD_M: f64 = 1e-3;

/// Gaussian kernel radius in standard deviations
const GAUSSIAN_TRUNCATE: f64 = 4.0;

/// Geometry of the synthetic model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntheticSpec {
    pub num_points: usize,
    pub dx_m: f64,
    pub plateau_start_m: f64,
    pub plateau_end_m: f64,
    pub plateau_height_m: f64,
    pub root_thickness_m: f64,
    pub smoothing_sigma_m: f64,
    pub compensation_depth_m: f64,
    pub strike_half_width_m: f64,
}

impl Default for SyntheticSpec {
    fn default() -> Self {
        Self {
            num_points: 501,
            dx_m: 1000.0,
            plateau_start_m: 200_000.0,
            plateau_end_m: 300_000.0,
            plateau_height_m: 2000.0,
            root_thickness_m: 20_000.0,
            smoothing_sigma_m: 15_000.0,
            compensation_depth_m: DEFAULT_COMPENSATION_DEPTH_M,
            strike_half_width_m: DEFAULT_STRIKE_HALF_WIDTH_M,
        }
    }
}

/// Generated profile plus the root it was built from
#[derive(Debug, Clone)]
pub struct SyntheticProfile {
    pub profile: Profile,
    pub true_root_m: Vec<f64>,
}

/// Build the synthetic profile using `model` for the Bouguer anomaly
pub fn generate<M: ForwardGravityModel>(
    spec: &SyntheticSpec,
    model: &M,
    constants: &PhysicalConstants,
) -> Result<SyntheticProfile, InversionError> {
    if spec.num_points < 2 {
        return Err(InversionError::TooFewSamples(spec.num_points));
    }
    if !(spec.dx_m > 0.0) {
        return Err(InversionError::InvalidParameter(format!(
            "synthetic spacing must be positive (got {} m)",
            spec.dx_m
        )));
    }

    let distance_m: Vec<f64> = (0..spec.num_points).map(|i| i as f64 * spec.dx_m).collect();
    let inside = |d: f64| d >= spec.plateau_start_m && d <= spec.plateau_end_m;

    let topography_m: Vec<f64> = distance_m
        .iter()
        .map(|&d| if inside(d) { spec.plateau_height_m } else { 0.0 })
        .collect();
    let blocky_root: Vec<f64> = distance_m
        .iter()
        .map(|&d| if inside(d) { spec.root_thickness_m } else { 0.0 })
        .collect();
    let true_root_m = gaussian_smooth(&blocky_root, spec.smoothing_sigma_m / spec.dx_m);

    let mut prisms = Vec::new();
    for (j, pair) in distance_m.windows(2).enumerate() {
        if true_root_m[j] > ROOT_PRESENCE_THRESHOLD_M {
            prisms.push(Prism {
                west: -spec.strike_half_width_m,
                east: spec.strike_half_width_m,
                south: pair[0],
                north: pair[1],
                bottom: -spec.compensation_depth_m - true_root_m[j],
                top: -spec.compensation_depth_m,
            });
        }
    }
    let densities = vec![-constants.density_contrast(); prisms.len()];
    let prisms = PrismSet::new(prisms, densities)?;

    let observations = ObservationPoint::along_profile(&distance_m);
    let bouguer_mgal = model.gravity(&observations, &prisms)?;
    if bouguer_mgal.len() != observations.len() {
        return Err(InversionError::ForwardModelLength {
            expected: observations.len(),
            found: bouguer_mgal.len(),
        });
    }
    let bouguer_ms2 = bouguer_mgal.iter().map(|g| g * MGAL_TO_MS2).collect();

    log::info!(
        "Generated synthetic profile: {} points, {} root prisms",
        spec.num_points,
        prisms.len()
    );

    Ok(SyntheticProfile {
        profile: Profile::new(distance_m, topography_m, bouguer_ms2)?,
        true_root_m,
    })
}

/// Gaussian smoothing with mirrored edges
///
/// `sigma` is in samples; the kernel is truncated at 4σ and normalised.
/// Edges reflect as `d c b a | a b c d | d c b a`.
pub fn gaussian_smooth(values: &[f64], sigma: f64) -> Vec<f64> {
    if !(sigma > 0.0) || values.is_empty() {
        return values.to_vec();
    }

    let radius = (GAUSSIAN_TRUNCATE * sigma + 0.5) as isize;
    let mut kernel: Vec<f64> = (-radius..=radius)
        .map(|i| (-0.5 * (i as f64 / sigma).powi(2)).exp())
        .collect();
    let norm: f64 = kernel.iter().sum();
    for w in kernel.iter_mut() {
        *w /= norm;
    }

    let n = values.len() as isize;
    (0..n)
        .map(|i| {
            kernel
                .iter()
                .enumerate()
                .map(|(k, &w)| w * values[reflect_index(i + k as isize - radius, n)])
                .sum()
        })
        .collect()
}

fn reflect_index(mut i: isize, n: isize) -> usize {
    while i < 0 || i >= n {
        if i < 0 {
            i = -i - 1;
        }
        if i >= n {
            i = 2 * n - i - 1;
        }
    }
    i as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gravity::PrismGravity;

    #[test]
    fn test_smoothing_preserves_constant() {
        let smoothed = gaussian_smooth(&[3.0; 20], 2.5);
        assert!(smoothed.iter().all(|v| (v - 3.0).abs() < 1e-12));
    }

    #[test]
    fn test_smoothing_preserves_mass_away_from_edges() {
        let mut block = vec![0.0; 200];
        for v in block.iter_mut().skip(80).take(40) {
            *v = 1.0;
        }
        let smoothed = gaussian_smooth(&block, 5.0);

        let before: f64 = block.iter().sum();
        let after: f64 = smoothed.iter().sum();
        assert!((before - after).abs() < 1e-9);
        assert!(smoothed[100] < 1.0 && smoothed[100] > 0.9);
        assert!(smoothed[79] > 0.0);
    }

    #[test]
    fn test_reflect_index() {
        assert_eq!(reflect_index(-1, 4), 0);
        assert_eq!(reflect_index(-2, 4), 1);
        assert_eq!(reflect_index(4, 4), 3);
        assert_eq!(reflect_index(5, 4), 2);
        assert_eq!(reflect_index(-9, 4), 0);
    }

    #[test]
    fn test_zero_sigma_is_identity() {
        assert_eq!(gaussian_smooth(&[1.0, 2.0], 0.0), vec![1.0, 2.0]);
    }

    #[test]
    fn test_generate_small_profile() {
        let spec = SyntheticSpec {
            num_points: 101,
            dx_m: 5000.0,
            ..SyntheticSpec::default()
        };
        let synthetic = generate(
            &spec,
            &PrismGravity::default(),
            &PhysicalConstants::default(),
        )
        .unwrap();

        let profile = &synthetic.profile;
        assert_eq!(profile.len(), 101);
        assert_eq!(profile.topography_m()[50], 2000.0);
        assert_eq!(profile.topography_m()[10], 0.0);

        // Peak of the smoothed root sits mid-plateau, below the block height
        let peak = synthetic.true_root_m[50];
        assert!(peak > 15_000.0 && peak < 20_000.0);

        // Mass deficit gives the largest anomaly over the root
        let bouguer = profile.bouguer_ms2();
        let max_index = bouguer
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(i, _)| i)
            .unwrap();
        assert!((45..=55).contains(&max_index));
        assert!(bouguer[max_index] > 0.0);
    }
}
