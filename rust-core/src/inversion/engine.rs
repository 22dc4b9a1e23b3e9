//! Iterative Moho inversion (Parker-Oldenburg style)
//!
//! Each pass forward-models the current root as a prism stack, continues the
//! unexplained gravity down to the compensation depth in the frequency domain,
//! converts it to a thickness correction with Parker's 2πGΔρ linearization and
//! re-smooths the updated root with the same low-pass gain.

use crate::constants::MGAL_TO_MS2;
use crate::error::InversionError;
use crate::filters::{FilterDesigner, SpectralFilter};
use crate::gravity::{ForwardGravityModel, ObservationPoint, PrismSet};
use crate::profile::{check_columns, uniform_spacing, Profile};
use crate::spectrum::{continuation_operator, SpectrumAnalyzer};

use super::config::{validate_depth, InversionConfig};
use super::history::{negative_root_summary, rms, IterationHistory, NegativeRootWarning};

/// Final Moho profile plus diagnostics
#[derive(Debug, Clone, PartialEq)]
pub struct InversionResult {
    /// Moho depth (m, positive down), one value per profile point
    pub moho_depth_m: Vec<f64>,

    /// Root snapshots and per-iteration diagnostics
    pub history: IterationHistory,

    /// Compensation depth the roots are measured from (m)
    pub compensation_depth_m: f64,
}

impl InversionResult {
    /// Root thickness below the compensation depth after the last pass
    pub fn final_root_m(&self) -> Vec<f64> {
        self.moho_depth_m
            .iter()
            .map(|d| d - self.compensation_depth_m)
            .collect()
    }
}

/// Moho inversion driver
///
/// Owns its configuration and forward model; every call to [`invert`]
/// allocates its own working state, so one engine can serve many profiles.
///
/// [`invert`]: InversionEngine::invert
pub struct InversionEngine<M> {
    config: InversionConfig,
    designer: FilterDesigner,
    model: M,
}

impl<M: ForwardGravityModel> InversionEngine<M> {
    pub fn new(config: InversionConfig, model: M) -> Result<Self, InversionError> {
        config.validate()?;
        let designer = FilterDesigner::new(config.filter)?;

        Ok(Self {
            config,
            designer,
            model,
        })
    }

    pub fn config(&self) -> &InversionConfig {
        &self.config
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Invert a validated profile with the configured depth and iteration count
    pub fn invert_profile(&self, profile: &Profile) -> Result<InversionResult, InversionError> {
        self.invert(
            profile.bouguer_ms2(),
            profile.topography_m(),
            profile.distance_m(),
            self.config.compensation_depth_m,
            self.config.num_iterations,
        )
    }

    /// Run the inversion
    ///
    /// # Arguments
    /// * `bouguer_ms2` - Bouguer anomaly (m/s^2)
    /// * `topo_m` - Topography (m)
    /// * `distance_m` - Uniformly spaced, increasing distances (m)
    /// * `compensation_depth_m` - Reference Moho depth (m)
    /// * `num_iterations` - Number of correction passes; 0 returns the Airy estimate
    ///
    /// # Returns
    /// Moho depth per point and `num_iterations + 1` root snapshots
    pub fn invert(
        &self,
        bouguer_ms2: &[f64],
        topo_m: &[f64],
        distance_m: &[f64],
        compensation_depth_m: f64,
        num_iterations: usize,
    ) -> Result<InversionResult, InversionError> {
        check_columns(
            distance_m,
            &[("bouguer_ms2", bouguer_ms2), ("topography_m", topo_m)],
        )?;
        let dx_m = uniform_spacing(distance_m, self.config.spacing_tolerance)?;
        validate_depth(compensation_depth_m)?;

        let n = distance_m.len();
        let constants = self.config.constants;
        let gain = self.designer.build(n, dx_m)?;
        let filter = SpectralFilter::new(n);

        let bouguer_filtered = filter.apply(bouguer_ms2, &gain)?;
        let topo_filtered = filter.apply(topo_m, &gain)?;

        // Airy estimate: topographic load balanced by a crustal root
        let airy_ratio = constants.airy_ratio();
        let mut root: Vec<f64> = topo_filtered.iter().map(|t| t * airy_ratio).collect();

        let mut history = IterationHistory::with_capacity(num_iterations);
        history.push_root(root.clone());

        let observations = ObservationPoint::along_profile(distance_m);
        let operator = continuation_operator(gain.as_slice(), dx_m, compensation_depth_m);
        let sheet_constant = constants.sheet_constant();
        let root_density = -constants.density_contrast();

        for iteration in 1..=num_iterations {
            log::info!("Running iteration {iteration} of {num_iterations}");

            if let Some((min_root_m, count)) = negative_root_summary(&root) {
                log::warn!(
                    "Iteration {iteration}: {count} negative root values (min {min_root_m:.2} m), \
                     clamped to zero for forward modelling"
                );
                history.push_warning(NegativeRootWarning {
                    iteration,
                    min_root_m,
                    count,
                });
            }

            let prisms = PrismSet::crustal_root(
                distance_m,
                &root,
                compensation_depth_m,
                self.config.strike_half_width_m,
                root_density,
            );
            let effect_mgal = self.model.gravity(&observations, &prisms)?;
            if effect_mgal.len() != n {
                return Err(InversionError::ForwardModelLength {
                    expected: n,
                    found: effect_mgal.len(),
                });
            }

            let residual: Vec<f64> = bouguer_filtered
                .iter()
                .zip(effect_mgal.iter())
                .map(|(observed, modelled)| observed - modelled * MGAL_TO_MS2)
                .collect();
            let residual_rms = rms(&residual);
            history.push_residual_rms(residual_rms);
            log::debug!(
                "Iteration {iteration}: residual RMS {:.4} mGal",
                residual_rms / MGAL_TO_MS2
            );

            // Downward continuation and low-pass gate in one multiply
            let continued = filter.apply_operator(&residual, &operator)?;
            let updated: Vec<f64> = root
                .iter()
                .zip(continued.iter())
                .map(|(r, c)| r + c / sheet_constant)
                .collect();

            root = filter.apply(&updated, &gain)?;
            history.push_root(root.clone());
        }

        if let Some(&last) = history.residual_rms_ms2().last() {
            log::info!(
                "Inversion finished after {num_iterations} iterations, residual RMS {:.4} mGal",
                last / MGAL_TO_MS2
            );
        }
        if log::log_enabled!(log::Level::Debug) {
            let spectrum = SpectrumAnalyzer::new(n, dx_m).analyze(&root);
            log::debug!(
                "Final root: dominant wavelength {:?} km, {:.2e} of energy below {} km",
                spectrum.dominant_wavelength_km(),
                spectrum.energy_fraction_below(self.config.filter.wavelength_end_km),
                self.config.filter.wavelength_end_km
            );
        }

        let moho_depth_m = root.iter().map(|r| compensation_depth_m + r).collect();

        Ok(InversionResult {
            moho_depth_m,
            history,
            compensation_depth_m,
        })
    }
}
