// src/solver.rs

//! Main FastICA solver interface.
//!
//! Two extraction modes are provided: [`FastIca::fit`] /
//! [`FastIca::fit_with_config`] extract several mutually decorrelated
//! components at once, and [`FastIca::fit_single`] extracts the single
//! dominant component. Both run the cubic (kurtosis-based) fixed-point
//! iteration on whitened data.

use crate::config::FastIcaConfig;
use crate::error::{FastIcaError, Result};
use crate::math::{matrix_delta, sym_decorrelation};
use crate::result::{FastIcaResult, SingleIcaResult};
use crate::whitening::{center, whiten};

use ndarray::{Array1, Array2};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::StandardNormal;

/// The FastICA blind source separation solver.
///
/// This struct provides static methods for fitting ICA models.
pub struct FastIca;

impl FastIca {
    /// Extract independent components with the default configuration.
    ///
    /// # Arguments
    /// * `x` - Data matrix of shape (n_channels, n_samples)
    ///
    /// # Returns
    /// * `FastIcaResult` containing the separation matrix, sources, etc.
    pub fn fit(x: &Array2<f64>) -> Result<FastIcaResult> {
        Self::fit_with_config(x, &FastIcaConfig::default())
    }

    /// Extract independent components with a custom configuration.
    ///
    /// The recovered sources are `B·K · x` where B is the unmixing matrix
    /// found on whitened data and K the whitening matrix; the product is
    /// applied to the raw input as supplied, matching the original ECG
    /// separation pipeline.
    ///
    /// # Errors
    ///
    /// * [`FastIcaError::InvalidDimensions`] for empty input, fewer samples
    ///   than channels, more components than channels, or a mis-shaped
    ///   `w_init`.
    /// * [`FastIcaError::SingularMatrix`] if the input covariance is
    ///   degenerate.
    ///
    /// Exhausting `max_iter` is not an error: the result carries the last
    /// estimate with `converged` set to false.
    pub fn fit_with_config(x: &Array2<f64>, config: &FastIcaConfig) -> Result<FastIcaResult> {
        config.validate()?;

        let (m, n) = (x.nrows(), x.ncols());
        check_input_shape(m, n)?;

        let mut rng = make_rng(config.random_state);

        // Determine the number of components. The original code forces the
        // count up to the channel count; `expand_components` keeps that
        // behavior switchable.
        let requested = config.n_components.unwrap_or(m);
        if requested > m {
            return Err(FastIcaError::InvalidDimensions {
                message: format!(
                    "n_components ({}) cannot exceed the number of channels ({})",
                    requested, m
                ),
            });
        }
        let n_components = if config.expand_components {
            requested.max(m)
        } else {
            requested
        };

        let (centered, mean) = center(x)?;
        let whitening = whiten(&centered)?;

        // Initialize the unmixing matrix
        let b_init = match &config.w_init {
            Some(w) => {
                if w.shape() != [n_components, m] {
                    return Err(FastIcaError::InvalidDimensions {
                        message: format!(
                            "w_init shape {:?} doesn't match expected ({}, {})",
                            w.shape(),
                            n_components,
                            m
                        ),
                    });
                }
                w.clone()
            }
            None => {
                let mut w = Array2::zeros((n_components, m));
                for i in 0..n_components {
                    for j in 0..m {
                        w[[i, j]] = rng.sample(StandardNormal);
                    }
                }
                w
            }
        };

        let (unmixing, n_iterations, converged, delta) = ica_deflation(
            &whitening.data,
            &b_init,
            config.max_iter,
            config.tol,
            config.verbose,
        )?;

        if !converged && config.verbose {
            eprintln!(
                "Warning: FastICA did not converge. \
                 Final matrix delta: {:.4e}, tolerance: {:.4e}",
                delta, config.tol
            );
        }

        let separation = unmixing.dot(&whitening.whitening);
        let sources = separation.dot(x);

        Ok(FastIcaResult {
            whitening: whitening.whitening,
            dewhitening: whitening.dewhitening,
            unmixing,
            separation,
            sources,
            mean,
            n_iterations,
            converged,
            delta,
        })
    }

    /// Extract the single dominant component.
    ///
    /// Runs the same cubic fixed-point update on a single weight vector,
    /// renormalized to unit length each iteration, with the sign-insensitive
    /// stopping rule `|w·w_prev| >= 1 - tol` (ICA components are defined up
    /// to sign).
    ///
    /// The returned source is `w^T · X_white`, reconstructed directly from
    /// the whitened data; it is deliberately not composed back through the
    /// whitening transform onto the raw input, unlike the multi-component
    /// path. `SingleIcaResult` exposes `w`, `whitening` and `mean` so
    /// callers can build the composed convention if they need it.
    ///
    /// Only `max_iter`, `tol`, `random_state` and `verbose` are read from
    /// the configuration; `n_components`, `expand_components` and `w_init`
    /// do not apply to this mode.
    pub fn fit_single(x: &Array2<f64>, config: &FastIcaConfig) -> Result<SingleIcaResult> {
        config.validate()?;

        let (m, n) = (x.nrows(), x.ncols());
        check_input_shape(m, n)?;

        let mut rng = make_rng(config.random_state);

        let (centered, mean) = center(x)?;
        let whitening = whiten(&centered)?;
        let xw = &whitening.data;

        let mut w: Array1<f64> = Array1::from_shape_fn(m, |_| rng.sample(StandardNormal));
        w = normalize(w)?;

        let mut n_iterations = 0;
        let mut converged = false;
        let mut dot = 0.0;

        for k in 1..config.max_iter {
            let prev = w.clone();

            // w <- E[(w^T x)^3 x] - 3 w, then renormalize
            let projections = xw.t().dot(&prev).mapv(|v| v.powi(3));
            let first_part = xw.dot(&projections) / n as f64;
            w = normalize(first_part - &prev * 3.0)?;

            dot = w.dot(&prev).abs();
            n_iterations = k;

            if config.verbose {
                println!("iteration {}: dot test = {:.6}", k, dot);
            }

            if dot >= 1.0 - config.tol {
                if config.verbose {
                    println!("Converged after {} iterations.", k);
                }
                converged = true;
                break;
            }
        }

        if !converged && config.verbose {
            eprintln!(
                "Warning: FastICA did not converge. \
                 Final dot test: {:.6}, tolerance: {:.4e}",
                dot, config.tol
            );
        }

        let source = w.dot(xw);

        Ok(SingleIcaResult {
            w,
            source,
            whitening: whitening.whitening,
            mean,
            n_iterations,
            converged,
            dot,
        })
    }
}

/// Multi-component fixed-point iteration with symmetric decorrelation.
///
/// Every row of the new unmixing matrix is computed from the previous
/// iteration's snapshot, so the per-row cubic update collapses to one
/// matrix expression: `B_new = (1/n)·(B·X)^3·X^T - 3·B`, decorrelated
/// after each sweep.
fn ica_deflation(
    x: &Array2<f64>,
    b_init: &Array2<f64>,
    max_iter: usize,
    tol: f64,
    verbose: bool,
) -> Result<(Array2<f64>, usize, bool, f64)> {
    let n = x.ncols() as f64;

    let mut b = sym_decorrelation(b_init)?;

    let mut n_iterations = 0;
    let mut converged = false;
    let mut delta = f64::INFINITY;

    for k in 1..max_iter {
        let old_b = b.clone();

        let gbx = old_b.dot(x).mapv(|v| v.powi(3));
        let new_b = gbx.dot(&x.t()) / n - &old_b * 3.0;

        b = sym_decorrelation(&new_b)?;

        delta = matrix_delta(&b, &old_b);
        n_iterations = k;

        if verbose {
            println!("iteration {}: matrix delta = {:.6e}", k, delta);
        }

        if delta < tol {
            if verbose {
                println!("Converged after {} iterations.", k);
            }
            converged = true;
            break;
        }
    }

    Ok((b, n_iterations, converged, delta))
}

fn check_input_shape(m: usize, n: usize) -> Result<()> {
    if m == 0 || n == 0 {
        return Err(FastIcaError::InvalidDimensions {
            message: "Input matrix cannot be empty".into(),
        });
    }
    if n < m {
        return Err(FastIcaError::InvalidDimensions {
            message: format!(
                "need at least as many samples as channels to whiten, got {} samples for {} channels",
                n, m
            ),
        });
    }
    Ok(())
}

fn make_rng(random_state: Option<u64>) -> StdRng {
    match random_state {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn normalize(w: Array1<f64>) -> Result<Array1<f64>> {
    let norm = w.dot(&w).sqrt();
    if norm < 1e-300 {
        return Err(FastIcaError::ComputationError {
            message: "weight vector collapsed to zero during iteration".into(),
        });
    }
    Ok(w / norm)
}
