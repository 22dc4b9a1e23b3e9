//! Generate a synthetic plateau profile with a known crustal root
//!
//! Usage: generate-synthetic [output.csv]

use anyhow::{Context, Result};
use env_logger::Env;
use log::info;
use std::path::PathBuf;

use moho_inversion::data::{generate, write_profile_csv, SyntheticSpec};
use moho_inversion::{PhysicalConstants, PrismGravity};

const DEFAULT_OUTPUT: &str = "data/synthetic_profile_data.csv";

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let output = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    let constants = PhysicalConstants::default();
    let model = PrismGravity::new(constants.gravitational_constant);
    let synthetic = generate(&SyntheticSpec::default(), &model, &constants)
        .context("Failed to generate synthetic profile")?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    write_profile_csv(&output, &synthetic.profile)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    let peak = synthetic.true_root_m.iter().copied().fold(0.0, f64::max);
    info!(
        "Wrote {} samples to {} (peak root {:.0} m)",
        synthetic.profile.len(),
        output.display(),
        peak
    );

    Ok(())
}
