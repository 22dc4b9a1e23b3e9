//! Moho Inversion - Frequency-Domain Crustal Root Estimation
//!
//! Iterative Parker-Oldenburg inversion of 2-D Bouguer gravity and topography
//! profiles for Moho depth, with optional Python bindings.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

pub mod constants;
pub mod data;
pub mod error;
pub mod filters;
pub mod gravity;
pub mod inversion;
pub mod profile;
pub mod spectrum;

#[cfg(feature = "python")]
pub mod python_bindings;

pub use constants::PhysicalConstants;
pub use error::InversionError;
pub use filters::{FilterDesigner, FilterGain, SpectralFilter};
pub use gravity::{ForwardGravityModel, PrismGravity};
pub use inversion::{InversionConfig, InversionEngine, InversionResult};
pub use profile::Profile;
