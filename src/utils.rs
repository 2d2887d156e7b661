//! Utility functions for evaluating separation quality.

use ndarray::{Array1, Array2};

/// Compute the Amari distance between two matrices.
///
/// The Amari distance measures how close `W @ A` is to a permutation
/// and scaling matrix. It equals 0 when W perfectly unmixes A.
///
/// # Arguments
/// * `w` - Separation matrix
/// * `a` - Mixing matrix
///
/// # Returns
/// * Amari distance (0 = perfect separation)
pub fn amari_distance(w: &Array2<f64>, a: &Array2<f64>) -> f64 {
    let p = w.dot(a);
    let n = p.nrows() as f64;

    let s = |r: &Array2<f64>| -> f64 {
        let mut sum = 0.0;
        for i in 0..r.nrows() {
            let row_sq: Vec<f64> = r.row(i).iter().map(|&x| x * x).collect();
            let row_sum: f64 = row_sq.iter().sum();
            let row_max: f64 = row_sq.iter().cloned().fold(0.0, f64::max);
            if row_max > 1e-15 {
                sum += row_sum / row_max - 1.0;
            }
        }
        sum
    };

    let p_abs = p.mapv(|x| x.abs());
    let p_abs_t = p_abs.t().to_owned();

    (s(&p_abs) + s(&p_abs_t)) / (2.0 * n)
}

/// Normalized correlation between two signals of equal length.
///
/// Both signals are centered first; the result is in [-1, 1]. Recovered ICA
/// sources match the truth up to sign and scale, so callers usually compare
/// the absolute value against a threshold.
pub fn signal_correlation(a: &Array1<f64>, b: &Array1<f64>) -> f64 {
    debug_assert_eq!(a.len(), b.len());

    let mean_a = a.sum() / a.len() as f64;
    let mean_b = b.sum() / b.len() as f64;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        let da = x - mean_a;
        let db = y - mean_b;
        cov += da * db;
        var_a += da * da;
        var_b += db * db;
    }

    if var_a < 1e-300 || var_b < 1e-300 {
        return 0.0;
    }

    cov / (var_a * var_b).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_amari_distance_perfect() {
        // W = A^{-1} should give distance ~0
        let a = array![[2.0, 1.0], [1.0, 3.0]];
        // Inverse of a 2x2, det = 5
        let w = array![[3.0 / 5.0, -1.0 / 5.0], [-1.0 / 5.0, 2.0 / 5.0]];

        let dist = amari_distance(&w, &a);
        assert!(dist < 1e-10, "Amari distance should be ~0, got {}", dist);
    }

    #[test]
    fn test_amari_distance_permutation() {
        // A permuted and scaled inverse is still a perfect separation
        let a = array![[2.0, 1.0], [1.0, 3.0]];
        let w = array![[-2.0 / 5.0, 4.0 / 5.0], [3.0 / 5.0, -1.0 / 5.0]];

        let dist = amari_distance(&w, &a);
        assert!(dist < 1e-10, "Amari distance should be ~0, got {}", dist);
    }

    #[test]
    fn test_amari_distance_nonzero_for_mixing() {
        let a = array![[1.0, 0.5], [0.5, 1.0]];
        let w = array![[1.0, 0.0], [0.0, 1.0]];

        assert!(amari_distance(&w, &a) > 0.1);
    }

    #[test]
    fn test_signal_correlation_self_and_flip() {
        let a = Array1::from_shape_fn(200, |j| (0.3 * j as f64).sin());
        let flipped = a.mapv(|v| -2.5 * v);

        assert!((signal_correlation(&a, &a) - 1.0).abs() < 1e-12);
        assert!((signal_correlation(&a, &flipped) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_signal_correlation_constant_signal() {
        let a = Array1::from_elem(100, 3.0);
        let b = Array1::from_shape_fn(100, |j| j as f64);

        assert_eq!(signal_correlation(&a, &b), 0.0);
    }
}
