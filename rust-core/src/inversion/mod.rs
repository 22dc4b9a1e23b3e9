//! Iterative Moho inversion: configuration, history and the engine loop

pub mod config;
pub mod history;
pub mod engine;

pub use config::{ConfigError, InversionConfig};
pub use history::{IterationHistory, NegativeRootWarning};
pub use engine::{InversionEngine, InversionResult};
