// src/math.rs

//! Mathematical utilities: symmetric matrix powers, decorrelation, and the
//! convergence measures used by the fixed-point solver.

use crate::error::{FastIcaError, Result};
use ndarray::Array2;
use ndarray_linalg::{Eigh, UPLO};

/// Eigenvalues below this magnitude are treated as zero.
const EIG_EPS: f64 = 1e-10;

/// Raise a symmetric matrix to an arbitrary real power via its
/// eigen-decomposition: `M^p = E · diag(λ^p) · E^T`.
///
/// For fractional or negative exponents the matrix must be positive
/// definite; a negative eigenvalue yields [`FastIcaError::NegativeEigenvalue`]
/// and a near-zero eigenvalue yields [`FastIcaError::SingularMatrix`] rather
/// than silently producing NaN or infinite entries.
pub fn sym_matrix_power(m: &Array2<f64>, exponent: f64) -> Result<Array2<f64>> {
    let (eigenvalues, eigenvectors) =
        m.eigh(UPLO::Lower)
            .map_err(|_| FastIcaError::ComputationError {
                message: "Eigendecomposition failed in symmetric matrix power".into(),
            })?;

    let fractional = exponent.fract() != 0.0;
    for &ev in eigenvalues.iter() {
        if fractional && ev < -EIG_EPS {
            return Err(FastIcaError::NegativeEigenvalue {
                eigenvalue: ev,
                exponent,
            });
        }
        if (fractional || exponent < 0.0) && ev.abs() < EIG_EPS {
            return Err(FastIcaError::SingularMatrix);
        }
    }

    let powered = eigenvalues.mapv(|v| v.powf(exponent));

    // E · diag(λ^p) · E^T
    let scaled = &eigenvectors * &powered;
    Ok(scaled.dot(&eigenvectors.t()))
}

/// Symmetric decorrelation: W <- (W · W^T)^{-1/2} · W
///
/// This ensures the rows of W are orthonormal.
pub fn sym_decorrelation(w: &Array2<f64>) -> Result<Array2<f64>> {
    let ww_t = w.dot(&w.t());
    Ok(sym_matrix_power(&ww_t, -0.5)?.dot(w))
}

/// Mean absolute element-wise difference between two equal-shape matrices.
///
/// This is the stopping criterion of the multi-component fixed-point
/// iteration: once the decorrelated unmixing matrix stops moving, the
/// components have converged.
///
/// # Panics
///
/// Panics if the two matrices do not have the same shape.
pub fn matrix_delta(a: &Array2<f64>, b: &Array2<f64>) -> f64 {
    assert_eq!(
        a.shape(),
        b.shape(),
        "matrix_delta requires equal-shape matrices"
    );
    let mut delta = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        delta += (x - y).abs();
    }
    delta / a.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_sym_matrix_power_identity_exponent() {
        let m = array![[2.0, 1.0], [1.0, 2.0]];
        let p = sym_matrix_power(&m, 1.0).unwrap();

        for i in 0..2 {
            for j in 0..2 {
                assert!((p[[i, j]] - m[[i, j]]).abs() < 1e-10);
            }
        }
    }

    #[test]
    fn test_sym_matrix_power_inverse() {
        let m = array![[4.0, 1.0], [1.0, 3.0]];
        let inv = sym_matrix_power(&m, -1.0).unwrap();
        let prod = m.dot(&inv);

        assert!((prod[[0, 0]] - 1.0).abs() < 1e-10);
        assert!((prod[[1, 1]] - 1.0).abs() < 1e-10);
        assert!(prod[[0, 1]].abs() < 1e-10);
        assert!(prod[[1, 0]].abs() < 1e-10);
    }

    #[test]
    fn test_sym_matrix_power_inv_sqrt() {
        // M^{-1/2} · M · M^{-1/2} should be the identity
        let m = array![[5.0, 2.0], [2.0, 3.0]];
        let inv_sqrt = sym_matrix_power(&m, -0.5).unwrap();
        let prod = inv_sqrt.dot(&m).dot(&inv_sqrt);

        assert!((prod[[0, 0]] - 1.0).abs() < 1e-10);
        assert!((prod[[1, 1]] - 1.0).abs() < 1e-10);
        assert!(prod[[0, 1]].abs() < 1e-10);
    }

    #[test]
    fn test_sym_matrix_power_negative_eigenvalue() {
        // Eigenvalues are +1 and -1; a fractional power must be rejected
        let m = array![[0.0, 1.0], [1.0, 0.0]];
        let result = sym_matrix_power(&m, 0.5);

        assert!(matches!(
            result,
            Err(FastIcaError::NegativeEigenvalue { .. })
        ));
    }

    #[test]
    fn test_sym_matrix_power_singular() {
        // Rank-one matrix, one eigenvalue is exactly zero
        let m = array![[1.0, 1.0], [1.0, 1.0]];
        let result = sym_matrix_power(&m, -0.5);

        assert!(matches!(result, Err(FastIcaError::SingularMatrix)));
    }

    #[test]
    fn test_sym_decorrelation() {
        let w = array![[1.0, 0.5], [0.5, 1.0]];
        let w_dec = sym_decorrelation(&w).unwrap();
        let ww_t = w_dec.dot(&w_dec.t());

        // Should be close to identity
        assert!((ww_t[[0, 0]] - 1.0).abs() < 1e-10);
        assert!((ww_t[[1, 1]] - 1.0).abs() < 1e-10);
        assert!(ww_t[[0, 1]].abs() < 1e-10);
        assert!(ww_t[[1, 0]].abs() < 1e-10);
    }

    #[test]
    fn test_sym_decorrelation_idempotent() {
        let w = array![[0.3, 1.2, -0.4], [1.1, -0.2, 0.6]];
        let once = sym_decorrelation(&w).unwrap();
        let twice = sym_decorrelation(&once).unwrap();

        assert!(matrix_delta(&once, &twice) < 1e-10);
    }

    #[test]
    fn test_sym_decorrelation_wide_matrix() {
        // Fewer components than channels: rows must still come out orthonormal
        let w = array![[1.0, 2.0, 3.0], [-1.0, 0.5, 2.0]];
        let w_dec = sym_decorrelation(&w).unwrap();
        let ww_t = w_dec.dot(&w_dec.t());

        assert!((ww_t[[0, 0]] - 1.0).abs() < 1e-10);
        assert!((ww_t[[1, 1]] - 1.0).abs() < 1e-10);
        assert!(ww_t[[0, 1]].abs() < 1e-10);
    }

    #[test]
    fn test_matrix_delta() {
        let a = array![[1.0, 2.0], [3.0, 4.0]];
        let b = array![[1.0, 2.5], [2.0, 4.0]];

        // (0 + 0.5 + 1 + 0) / 4
        assert!((matrix_delta(&a, &b) - 0.375).abs() < 1e-12);
        assert_eq!(matrix_delta(&a, &a), 0.0);
    }

    #[test]
    #[should_panic(expected = "equal-shape")]
    fn test_matrix_delta_shape_mismatch_panics() {
        let a = array![[1.0, 2.0], [3.0, 4.0]];
        let b = array![[1.0, 2.0, 3.0]];
        matrix_delta(&a, &b);
    }
}
