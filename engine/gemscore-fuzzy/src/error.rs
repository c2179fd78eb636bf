//! Error types for the employability inference engine

use thiserror::Error;

/// Inference error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FuzzyError {
    /// A crisp input was NaN or infinite
    #[error("Invalid input for '{variable}': {value} is not a finite number")]
    InvalidInput {
        /// Input variable that received the value
        variable: String,
        /// Offending value
        value: f64,
    },

    /// Defuzzification is undefined, typically because no rule fired
    #[error("Inference failed: {0}")]
    Inference(String),
}

impl FuzzyError {
    /// True for errors caused by the caller's data rather than the model
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, FuzzyError::InvalidInput { .. })
    }
}

/// Result type for inference operations
pub type Result<T> = std::result::Result<T, FuzzyError>;
