// src/lib.rs

//! # FastICA
//!
//! Blind source separation with the FastICA fixed-point algorithm: recover
//! statistically independent source signals from linearly-mixed sensor
//! channels (e.g. separating maternal, fetal and noise components of an
//! ECG recording).
//!
//! The pipeline is eigen-based whitening, a cubic (kurtosis-based)
//! fixed-point iteration, and symmetric decorrelation of the unmixing
//! matrix via an inverse matrix square root.
//!
//! ## Example
//!
//! ```rust,no_run
//! use fastica::{FastIca, FastIcaConfig};
//! use ndarray::Array2;
//!
//! # fn main() -> Result<(), fastica::FastIcaError> {
//! // Mixed observations (n_channels x n_samples)
//! let x = Array2::<f64>::zeros((4, 1000));
//!
//! // Separate with default settings
//! let result = FastIca::fit(&x)?;
//!
//! // Or with custom configuration
//! let config = FastIcaConfig::builder()
//!     .n_components(2)
//!     .expand_components(false)
//!     .max_iter(1000)
//!     .tol(1e-6)
//!     .random_state(42)
//!     .build();
//! let result = FastIca::fit_with_config(&x, &config)?;
//!
//! // Access results
//! let sources = &result.sources;
//! let separation = &result.separation;
//! assert!(result.converged);
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod math;
mod result;
mod solver;
mod whitening;

pub use config::{ConfigBuilder, FastIcaConfig};
pub use error::FastIcaError;
pub use math::{matrix_delta, sym_decorrelation, sym_matrix_power};
pub use result::{FastIcaResult, SingleIcaResult};
pub use solver::FastIca;
pub use whitening::{center, whiten, Whitening};

// Utility functions
pub mod utils;

// Re-export ndarray for convenience
pub use ndarray;
