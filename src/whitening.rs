// src/whitening.rs

//! Data preprocessing: centering and eigen-based whitening.

use crate::error::{FastIcaError, Result};
use ndarray::{Array1, Array2};
use ndarray_linalg::{Eigh, UPLO};

/// Eigenvalues of the covariance matrix below this threshold make the
/// inverse-square-root step blow up and are reported as degeneracy.
const COV_EPS: f64 = 1e-10;

/// Result of the whitening transformation.
pub struct Whitening {
    /// Whitened data matrix (n_channels × n_samples); its empirical
    /// covariance is the identity up to numerical tolerance.
    pub data: Array2<f64>,
    /// Whitening matrix K = diag(1/√λ) · E^T (n_channels × n_channels).
    pub whitening: Array2<f64>,
    /// Dewhitening matrix D = E · diag(√λ), the (approximate) inverse of K.
    pub dewhitening: Array2<f64>,
}

/// Center the data by subtracting the mean of each channel (row).
///
/// # Arguments
/// * `x` - Data matrix of shape (n_channels, n_samples)
///
/// # Returns
/// * Tuple of (centered_data, mean_vector)
///
/// # Errors
///
/// [`FastIcaError::InvalidDimensions`] if the matrix has zero rows or
/// columns; a mean over zero samples has no value.
pub fn center(x: &Array2<f64>) -> Result<(Array2<f64>, Array1<f64>)> {
    let (nrows, ncols) = (x.nrows(), x.ncols());
    if nrows == 0 || ncols == 0 {
        return Err(FastIcaError::InvalidDimensions {
            message: "cannot center an empty matrix".into(),
        });
    }

    // Compute row means
    let mut mean = Array1::zeros(nrows);
    for i in 0..nrows {
        let mut sum = 0.0;
        for j in 0..ncols {
            sum += x[[i, j]];
        }
        mean[i] = sum / ncols as f64;
    }

    // Center the data
    let mut centered = Array2::zeros((nrows, ncols));
    for j in 0..ncols {
        for i in 0..nrows {
            centered[[i, j]] = x[[i, j]] - mean[i];
        }
    }

    Ok((centered, mean))
}

/// Whiten centered data via the eigen-decomposition of its covariance.
///
/// The covariance `C = X·X^T / n` is decomposed into eigenvalues λ and
/// orthonormal eigenvectors E, giving the whitening matrix
/// `K = diag(1/√λ) · E^T` and its inverse `D = E · diag(√λ)`. The returned
/// data `K·X` has identity covariance, the precondition of the fixed-point
/// solver.
///
/// # Errors
///
/// * [`FastIcaError::InvalidDimensions`] if the matrix is empty or has
///   fewer samples than channels.
/// * [`FastIcaError::SingularMatrix`] if the covariance has a zero or
///   near-zero eigenvalue (linearly dependent channels). This is reported
///   rather than letting the inverse square root produce infinities.
pub fn whiten(x: &Array2<f64>) -> Result<Whitening> {
    let (n_channels, n_samples) = (x.nrows(), x.ncols());
    if n_channels == 0 || n_samples == 0 {
        return Err(FastIcaError::InvalidDimensions {
            message: "cannot whiten an empty matrix".into(),
        });
    }
    if n_samples < n_channels {
        return Err(FastIcaError::InvalidDimensions {
            message: format!(
                "need at least as many samples as channels to whiten, got {} samples for {} channels",
                n_samples, n_channels
            ),
        });
    }

    // Covariance of the centered data
    let covariance = x.dot(&x.t()) / n_samples as f64;

    let (eigenvalues, eigenvectors) =
        covariance
            .eigh(UPLO::Lower)
            .map_err(|_| FastIcaError::ComputationError {
                message: "Eigendecomposition of the covariance matrix failed".into(),
            })?;

    // Checked per element: a NaN eigenvalue fails `>=` and is rejected,
    // where a NaN-discarding minimum would let it through
    if !eigenvalues.iter().all(|&ev| ev >= COV_EPS) {
        return Err(FastIcaError::SingularMatrix);
    }

    let sqrt_vals = eigenvalues.mapv(f64::sqrt);
    let inv_sqrt_vals = sqrt_vals.mapv(|v| 1.0 / v);

    // K = diag(1/√λ) · E^T, built as (E · diag(1/√λ))^T
    let whitening = (&eigenvectors * &inv_sqrt_vals).reversed_axes();
    // D = E · diag(√λ)
    let dewhitening = &eigenvectors * &sqrt_vals;

    let data = whitening.dot(x);

    Ok(Whitening {
        data,
        whitening,
        dewhitening,
    })
}
