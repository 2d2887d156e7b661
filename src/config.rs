// src/config.rs

//! Configuration for the FastICA algorithm.

use crate::error::{FastIcaError, Result};
use ndarray::Array2;

/// Configuration parameters for the FastICA algorithm.
#[derive(Clone)]
pub struct FastIcaConfig {
    /// Number of components to extract. If None, uses the number of
    /// input channels.
    pub n_components: Option<usize>,

    /// If true (the default), a requested component count below the number
    /// of input channels is raised to the channel count. This reproduces the
    /// behavior of the original ECG separation code; set to false to honor
    /// a smaller request.
    pub expand_components: bool,

    /// Maximum number of iterations.
    pub max_iter: usize,

    /// Convergence tolerance: multi-component extraction stops when the
    /// mean absolute change of the unmixing matrix drops below `tol`;
    /// single-component extraction stops when `|w·w_prev| >= 1 - tol`.
    pub tol: f64,

    /// Initial unmixing matrix. If None, uses random initialization.
    pub w_init: Option<Array2<f64>>,

    /// Random seed for reproducibility.
    pub random_state: Option<u64>,

    /// If true, print per-iteration convergence information.
    pub verbose: bool,
}

impl Default for FastIcaConfig {
    fn default() -> Self {
        Self {
            n_components: None,
            expand_components: true,
            max_iter: 200,
            tol: 1e-4,
            w_init: None,
            random_state: None,
            verbose: false,
        }
    }
}

impl FastIcaConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder for constructing a configuration.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_iter == 0 {
            return Err(FastIcaError::InvalidConfig {
                parameter: "max_iter".into(),
                message: "must be greater than 0".into(),
            });
        }

        if self.tol <= 0.0 {
            return Err(FastIcaError::InvalidConfig {
                parameter: "tol".into(),
                message: "must be positive".into(),
            });
        }

        if self.n_components == Some(0) {
            return Err(FastIcaError::InvalidConfig {
                parameter: "n_components".into(),
                message: "must be at least 1".into(),
            });
        }

        Ok(())
    }
}

/// Builder for constructing `FastIcaConfig` with a fluent API.
#[derive(Default)]
pub struct ConfigBuilder {
    config: FastIcaConfig,
}

impl ConfigBuilder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self {
            config: FastIcaConfig::default(),
        }
    }

    /// Set the number of components to extract.
    pub fn n_components(mut self, n: usize) -> Self {
        self.config.n_components = Some(n);
        self
    }

    /// Enable or disable raising the component count to the channel count.
    pub fn expand_components(mut self, expand: bool) -> Self {
        self.config.expand_components = expand;
        self
    }

    /// Set the maximum number of iterations.
    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.config.max_iter = max_iter;
        self
    }

    /// Set the convergence tolerance.
    pub fn tol(mut self, tol: f64) -> Self {
        self.config.tol = tol;
        self
    }

    /// Set the initial unmixing matrix.
    pub fn w_init(mut self, w_init: Array2<f64>) -> Self {
        self.config.w_init = Some(w_init);
        self
    }

    /// Set the random seed.
    pub fn random_state(mut self, seed: u64) -> Self {
        self.config.random_state = Some(seed);
        self
    }

    /// Enable or disable verbose output.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> FastIcaConfig {
        self.config
    }

    /// Build and validate the configuration.
    pub fn build_validated(self) -> Result<FastIcaConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
