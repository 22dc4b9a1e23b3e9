//! Closed-form vertical attraction of right rectangular prisms
//!
//! Sums the analytical kernel
//! `x ln(y + r) + y ln(x + r) − z atan(xy / (z r))`
//! over the eight prism corners with alternating signs (Nagy et al., 2000).
//! With the `parallel` feature observation points are evaluated on the rayon
//! pool; each point still sums its prisms in set order.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::{ForwardGravityModel, ObservationPoint, Prism, PrismSet};
use crate::constants::{GRAVITATIONAL_CONSTANT, MGAL_TO_MS2};
use crate::error::InversionError;

/// Analytical prism gravity model
#[derive(Debug, Clone, Copy)]
pub struct PrismGravity {
    /// Gravitational constant (m^3 kg^-1 s^-2)
    gravitational_constant: f64,
}

impl Default for PrismGravity {
    fn default() -> Self {
        Self {
            gravitational_constant: GRAVITATIONAL_CONSTANT,
        }
    }
}

impl PrismGravity {
    pub fn new(gravitational_constant: f64) -> Self {
        Self {
            gravitational_constant,
        }
    }

    /// Upward attraction (mGal) of the whole set at one point
    ///
    /// Prisms are summed in set order.
    pub fn gravity_at(&self, point: &ObservationPoint, prisms: &PrismSet) -> f64 {
        let mut sum = 0.0;
        for (prism, density) in prisms.iter() {
            if prism.thickness() == 0.0 {
                continue;
            }
            sum += density * corner_sum(point, prism);
        }
        // corner_sum is the downward attraction per unit Gρ
        -self.gravitational_constant * sum / MGAL_TO_MS2
    }
}

impl ForwardGravityModel for PrismGravity {
    fn gravity(
        &self,
        observations: &[ObservationPoint],
        prisms: &PrismSet,
    ) -> Result<Vec<f64>, InversionError> {
        if let Some(index) = prisms.prisms().iter().position(|p| !p.is_well_formed()) {
            return Err(InversionError::ForwardModel(format!(
                "prism {index} has invalid bounds {:?}",
                prisms.prisms()[index].bounds()
            )));
        }

        #[cfg(feature = "parallel")]
        let values: Vec<f64> = observations
            .par_iter()
            .map(|point| self.gravity_at(point, prisms))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let values: Vec<f64> = observations
            .iter()
            .map(|point| self.gravity_at(point, prisms))
            .collect();

        Ok(values)
    }
}

/// Signed corner sum Σ (−1)^(i+j+k) K(x_i, y_j, z_k) for one prism
fn corner_sum(point: &ObservationPoint, prism: &Prism) -> f64 {
    let east = [prism.east - point.easting, prism.west - point.easting];
    let north = [prism.north - point.northing, prism.south - point.northing];
    let up = [prism.top - point.upward, prism.bottom - point.upward];

    let mut sum = 0.0;
    for (i, &x) in east.iter().enumerate() {
        for (j, &y) in north.iter().enumerate() {
            for (k, &z) in up.iter().enumerate() {
                let kernel = corner_kernel(x, y, z);
                if (i + j + k) % 2 == 0 {
                    sum += kernel;
                } else {
                    sum -= kernel;
                }
            }
        }
    }
    sum
}

fn corner_kernel(x: f64, y: f64, z: f64) -> f64 {
    let r = (x * x + y * y + z * z).sqrt();
    let arctan = if z == 0.0 { 0.0 } else { z * (x * y / (z * r)).atan() };
    x * safe_ln(y + r) + y * safe_ln(x + r) - arctan
}

/// ln(x), with the removable singularity at 0 mapped to 0
#[inline]
fn safe_ln(x: f64) -> f64 {
    if x > 0.0 {
        x.ln()
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn origin() -> ObservationPoint {
        ObservationPoint {
            easting: 0.0,
            northing: 0.0,
            upward: 0.0,
        }
    }

    fn single(prism: Prism, density: f64) -> PrismSet {
        PrismSet::new(vec![prism], vec![density]).unwrap()
    }

    #[test]
    fn test_small_prism_matches_point_mass() {
        // 20 m cube 1 km below the observer
        let prism = Prism::from_bounds([-10.0, 10.0, -10.0, 10.0, -1010.0, -990.0]);
        let density = 1000.0;
        let model = PrismGravity::default();

        let mass = density * 20.0_f64.powi(3);
        let downward_mgal = GRAVITATIONAL_CONSTANT * mass / 1000.0_f64.powi(2) / MGAL_TO_MS2;
        let g = model.gravity_at(&origin(), &single(prism, density));

        // Positive mass below pulls down, so the upward component is negative
        assert!(g < 0.0);
        assert!((g + downward_mgal).abs() / downward_mgal < 1e-3);
    }

    #[test]
    fn test_mass_deficit_gives_positive_value() {
        let prism = Prism::from_bounds([-500.0, 500.0, -500.0, 500.0, -3000.0, -2000.0]);
        let g = PrismGravity::default().gravity_at(&origin(), &single(prism, -530.0));
        assert!(g > 0.0);
    }

    #[test]
    fn test_wide_slab_matches_bouguer_plate() {
        // Very wide thin slab approaches 2πGρt
        let prism = Prism::from_bounds([-5.0e6, 5.0e6, -5.0e6, 5.0e6, -31_000.0, -30_000.0]);
        let density = -530.0;
        let g = PrismGravity::default().gravity_at(&origin(), &single(prism, density));

        let plate = -2.0 * PI * GRAVITATIONAL_CONSTANT * density * 1000.0 / MGAL_TO_MS2;
        assert!((g - plate).abs() / plate < 0.01, "slab {} vs plate {}", g, plate);
    }

    #[test]
    fn test_zero_thickness_contributes_nothing() {
        let flat = Prism::from_bounds([-1.0e5, 1.0e5, 0.0, 1000.0, -30_000.0, -30_000.0]);
        let g = PrismGravity::default().gravity_at(&origin(), &single(flat, -530.0));
        assert_eq!(g, 0.0);
    }

    #[test]
    fn test_batch_matches_pointwise_loop() {
        let distance: Vec<f64> = (0..301).map(|i| i as f64 * 1000.0).collect();
        let root: Vec<f64> = distance
            .iter()
            .map(|&d| 8000.0 * (-((d - 150_000.0) / 40_000.0).powi(2)).exp())
            .collect();
        let prisms = PrismSet::crustal_root(&distance, &root, 30_000.0, 500_000.0, -530.0);
        let points = ObservationPoint::along_profile(&distance);

        let model = PrismGravity::default();

        let batch = model.gravity(&points, &prisms).unwrap();
        let pointwise: Vec<f64> = points.iter().map(|p| model.gravity_at(p, &prisms)).collect();

        assert_eq!(batch.len(), points.len());
        assert_eq!(batch, pointwise);
    }

    #[test]
    fn test_rejects_inverted_prism() {
        let bad = Prism::from_bounds([0.0, 1.0, 0.0, 1.0, 0.0, -1.0]);
        let err = PrismGravity::default()
            .gravity(&[origin()], &single(bad, 1.0))
            .unwrap_err();
        assert!(err.is_forward_model());
    }
}
