//! Result types for the FastICA algorithm.

use ndarray::{Array1, Array2};

/// Result of running multi-component FastICA.
#[derive(Debug, Clone)]
pub struct FastIcaResult {
    /// Whitening matrix K (n_channels × n_channels).
    pub whitening: Array2<f64>,

    /// Dewhitening matrix D ≈ K^{-1} (n_channels × n_channels).
    pub dewhitening: Array2<f64>,

    /// Unmixing matrix B in whitened space (n_components × n_channels),
    /// rows orthonormal.
    pub unmixing: Array2<f64>,

    /// Separation matrix B·K (n_components × n_channels); applied to the
    /// raw input it yields the recovered sources.
    pub separation: Array2<f64>,

    /// Recovered source signals (n_components × n_samples), computed by
    /// applying the separation matrix to the raw (un-centered) input.
    pub sources: Array2<f64>,

    /// Per-channel mean of the input (n_channels,).
    pub mean: Array1<f64>,

    /// Number of iterations performed.
    pub n_iterations: usize,

    /// Whether the unmixing matrix delta dropped below the tolerance.
    /// A non-converged result still holds the best available estimate.
    pub converged: bool,

    /// Final mean absolute change of the unmixing matrix.
    pub delta: f64,
}

impl FastIcaResult {
    /// Get the mixing matrix, the pseudo-inverse of the separation matrix.
    ///
    /// Because the unmixing matrix B has orthonormal rows in whitened space,
    /// the pseudo-inverse of `B·K` is `D·B^T`. It transforms sources back to
    /// the original channel space.
    pub fn mixing(&self) -> Array2<f64> {
        self.dewhitening.dot(&self.unmixing.t())
    }
}

/// Result of running single-component FastICA.
#[derive(Debug, Clone)]
pub struct SingleIcaResult {
    /// Converged unit weight vector in whitened space (n_channels,).
    pub w: Array1<f64>,

    /// The extracted source signal (n_samples,), reconstructed directly
    /// from the whitened data as `w^T · X_white`. Unlike the
    /// multi-component path this is not composed back through the
    /// whitening transform onto the raw input.
    pub source: Array1<f64>,

    /// Whitening matrix K (n_channels × n_channels), exposed so callers
    /// can compose `w^T · K` and apply it to the raw input themselves.
    pub whitening: Array2<f64>,

    /// Per-channel mean of the input (n_channels,).
    pub mean: Array1<f64>,

    /// Number of iterations performed.
    pub n_iterations: usize,

    /// Whether the dot-product test reached `1 - tol`.
    pub converged: bool,

    /// Final value of `|w·w_prev|`.
    pub dot: f64,
}
