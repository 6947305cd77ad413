use serde::{Deserialize, Serialize};

use crate::Float;

/// The tuning constants of the PSO engine.
///
/// The defaults are the standard Clerc–Kennedy constriction coefficients
/// ($`\chi = 0.7298`$, $`\varphi_1 = \varphi_2 = 2.05`$). The configuration is an explicit value
/// passed into the engine at construction rather than a set of process-wide statics, so multiple
/// concurrent runs with different tuning can coexist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PsoConfig {
    /// The constriction coefficient $`\chi`$ applied to the updated velocity.
    pub chi: Float,
    /// The upper bound $`\varphi_1`$ of the personal-best bias draw.
    pub phi1: Float,
    /// The upper bound $`\varphi_2`$ of the neighborhood-best bias draw.
    pub phi2: Float,
    /// The fixed number of iterations a run performs.
    pub iterations: usize,
    /// How often (in iterations) the best value is recorded and reported.
    pub check_interval: usize,
    /// The per-iteration probability of redrawing the whole random-topology table.
    pub reset_probability: Float,
    /// The number of distinct neighbors per particle in the random topology.
    pub neighborhood_size: usize,
}

impl Default for PsoConfig {
    fn default() -> Self {
        Self {
            chi: 0.7298,
            phi1: 2.05,
            phi2: 2.05,
            iterations: 10_000,
            check_interval: 1000,
            reset_probability: 0.2,
            neighborhood_size: 5,
        }
    }
}

impl PsoConfig {
    /// Sets the constriction coefficient $`\chi`$ (default = `0.7298`).
    ///
    /// # Panics
    ///
    /// This method will panic if $`\chi \leq 0`$.
    pub fn with_chi(mut self, value: Float) -> Self {
        assert!(value > 0.0);
        self.chi = value;
        self
    }
    /// Sets the personal-best bias bound $`\varphi_1`$ (default = `2.05`).
    ///
    /// # Panics
    ///
    /// This method will panic if $`\varphi_1 < 0`$.
    pub fn with_phi1(mut self, value: Float) -> Self {
        assert!(value >= 0.0);
        self.phi1 = value;
        self
    }
    /// Sets the neighborhood-best bias bound $`\varphi_2`$ (default = `2.05`).
    ///
    /// # Panics
    ///
    /// This method will panic if $`\varphi_2 < 0`$.
    pub fn with_phi2(mut self, value: Float) -> Self {
        assert!(value >= 0.0);
        self.phi2 = value;
        self
    }
    /// Sets the number of iterations a run performs (default = `10000`).
    ///
    /// # Panics
    ///
    /// This method will panic if `value` is zero.
    pub fn with_iterations(mut self, value: usize) -> Self {
        assert!(value > 0);
        self.iterations = value;
        self
    }
    /// Sets how often the best value is recorded (default = `1000`).
    ///
    /// # Panics
    ///
    /// This method will panic if `value` is zero.
    pub fn with_check_interval(mut self, value: usize) -> Self {
        assert!(value > 0);
        self.check_interval = value;
        self
    }
    /// Sets the per-iteration probability of redrawing the random-topology table
    /// (default = `0.2`).
    ///
    /// # Panics
    ///
    /// This method will panic if `value` is outside `[0, 1]`.
    pub fn with_reset_probability(mut self, value: Float) -> Self {
        assert!((0.0..=1.0).contains(&value));
        self.reset_probability = value;
        self
    }
    /// Sets the number of distinct neighbors per particle in the random topology
    /// (default = `5`).
    ///
    /// # Panics
    ///
    /// This method will panic if `value` is zero.
    pub fn with_neighborhood_size(mut self, value: usize) -> Self {
        assert!(value > 0);
        self.neighborhood_size = value;
        self
    }
}
