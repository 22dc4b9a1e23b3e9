//! Error taxonomy for the inversion core

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InversionError {
    #[error("Profile needs at least 2 samples (found {0})")]
    TooFewSamples(usize),

    #[error("Column '{column}' has {found} samples but distance has {expected}")]
    ColumnLengthMismatch {
        column: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Non-finite value in column '{column}' at index {index}")]
    NonFiniteValue { column: &'static str, index: usize },

    #[error("Distance must increase along the profile (first step is {0} m)")]
    NonIncreasingDistance(f64),

    #[error("Non-uniform sampling at index {index}: step {found} m, expected {expected} m")]
    NonUniformSpacing {
        index: usize,
        expected: f64,
        found: f64,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Filter gain has {expected} bins but signal has {found} samples")]
    GainLengthMismatch { expected: usize, found: usize },

    #[error("Forward gravity model failed: {0}")]
    ForwardModel(String),

    #[error("Forward gravity model returned {found} values for {expected} observation points")]
    ForwardModelLength { expected: usize, found: usize },
}

impl InversionError {
    /// True for errors caused by malformed profile input
    pub fn is_input_shape(&self) -> bool {
        matches!(
            self,
            InversionError::TooFewSamples(_)
                | InversionError::ColumnLengthMismatch { .. }
                | InversionError::NonFiniteValue { .. }
                | InversionError::NonIncreasingDistance(_)
                | InversionError::NonUniformSpacing { .. }
        )
    }

    /// True for failures of the external gravity model
    pub fn is_forward_model(&self) -> bool {
        matches!(
            self,
            InversionError::ForwardModel(_) | InversionError::ForwardModelLength { .. }
        )
    }
}
