//! Profile I/O and synthetic data

pub mod loader;
pub mod synthetic;

pub use loader::{DataError, load_profile, read_profile, write_moho_profile, write_profile_csv};
pub use synthetic::{SyntheticProfile, SyntheticSpec, generate, gaussian_smooth};
