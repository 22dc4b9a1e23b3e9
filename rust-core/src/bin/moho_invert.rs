//! Invert a gravity/topography profile CSV for Moho depth
//!
//! Usage: moho-invert <profile.csv> <output.csv> [config.json] [--history]
//!
//! The profile's `bouguer_mgal` column must be positive over a mass deficit
//! (upward-positive vertical component). Negate downward-signed anomalies first.

use anyhow::{bail, Context, Result};
use env_logger::Env;
use log::{info, warn};
use std::path::PathBuf;

use moho_inversion::data::{load_profile, write_moho_profile};
use moho_inversion::{InversionConfig, InversionEngine, PrismGravity};

struct Args {
    profile: PathBuf,
    output: PathBuf,
    config: Option<PathBuf>,
    history: bool,
}

fn parse_args() -> Result<Args> {
    let mut history = false;
    let mut positional = Vec::new();
    for arg in std::env::args().skip(1) {
        if arg == "--history" {
            history = true;
        } else if arg.starts_with("--") {
            bail!("unknown option {arg}");
        } else {
            positional.push(PathBuf::from(arg));
        }
    }

    let mut positional = positional.into_iter();
    match (positional.next(), positional.next(), positional.next(), positional.next()) {
        (Some(profile), Some(output), config, None) => Ok(Args {
            profile,
            output,
            config,
            history,
        }),
        _ => bail!("usage: moho-invert <profile.csv> <output.csv> [config.json] [--history]"),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = parse_args()?;

    let config = match &args.config {
        Some(path) => InversionConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => InversionConfig::default(),
    };

    let profile = load_profile(&args.profile)
        .with_context(|| format!("Failed to load profile {}", args.profile.display()))?;
    info!(
        "Loaded {} samples at {:.1} m spacing from {}",
        profile.len(),
        profile.dx_m(),
        args.profile.display()
    );

    let model = PrismGravity::new(config.constants.gravitational_constant);
    let engine = InversionEngine::new(config, model)?;
    let result = engine.invert_profile(&profile).context("Inversion failed")?;

    for warning in result.history.negative_root_warnings() {
        warn!(
            "Iteration {}: {} negative root values (min {:.1} m)",
            warning.iteration, warning.count, warning.min_root_m
        );
    }

    let (shallowest, deepest) = result
        .moho_depth_m
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &d| (lo.min(d), hi.max(d)));
    info!("Moho depth range: {:.0} - {:.0} m", shallowest, deepest);

    write_moho_profile(&args.output, profile.distance_m(), &result, args.history)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    info!("Wrote {}", args.output.display());

    Ok(())
}
