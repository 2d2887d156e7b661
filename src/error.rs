// src/error.rs

//! Error types for the FastICA crate.

use std::fmt;

/// Errors that can occur during FastICA computation.
#[derive(Debug, Clone)]
pub enum FastIcaError {
    /// Input dimensions are invalid.
    InvalidDimensions {
        /// Description of the dimension error.
        message: String,
    },

    /// A zero or near-zero eigenvalue was encountered where an inverse
    /// square root is required (degenerate covariance or rank-deficient
    /// unmixing matrix).
    SingularMatrix,

    /// A negative eigenvalue met a fractional or negative exponent in the
    /// symmetric matrix power; the result would be not-a-number.
    NegativeEigenvalue {
        /// The offending eigenvalue.
        eigenvalue: f64,
        /// The requested exponent.
        exponent: f64,
    },

    /// General computation error.
    ComputationError {
        /// Description of what went wrong.
        message: String,
    },

    /// Invalid configuration parameter.
    InvalidConfig {
        /// Name of the invalid parameter.
        parameter: String,
        /// Description of why it's invalid.
        message: String,
    },
}

impl fmt::Display for FastIcaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FastIcaError::InvalidDimensions { message } => {
                write!(f, "Invalid dimensions: {}", message)
            }
            FastIcaError::SingularMatrix => {
                write!(f, "Singular matrix encountered during computation")
            }
            FastIcaError::NegativeEigenvalue {
                eigenvalue,
                exponent,
            } => {
                write!(
                    f,
                    "Negative eigenvalue {:.4e} cannot be raised to non-integer \
                     exponent {}; the matrix is not positive definite",
                    eigenvalue, exponent
                )
            }
            FastIcaError::ComputationError { message } => {
                write!(f, "Computation error: {}", message)
            }
            FastIcaError::InvalidConfig { parameter, message } => {
                write!(f, "Invalid configuration for '{}': {}", parameter, message)
            }
        }
    }
}

impl std::error::Error for FastIcaError {}

/// Convenience type alias for Results with FastIcaError.
pub type Result<T> = std::result::Result<T, FastIcaError>;
