//! Search configuration.
//!
//! Bounds the otherwise open-ended sampling loops of the amplification
//! engine and fixes the randomness of the adaptive search when a seed is
//! given. Loadable from JSON; missing fields take their defaults.

use serde::{Deserialize, Serialize};

use crate::error::{QaspError, QaspResult};

/// Limits and tuning for [`crate::Amplifier`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Largest number of samples drawn by the known-`m` search.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u64,

    /// Largest number of rounds of the exponential search.
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,

    /// Growth factor `c` of the exponential search; must exceed 1.
    #[serde(default = "default_growth")]
    pub growth: f64,

    /// Upper bound on the iterations drawn in one exponential-search round.
    ///
    /// Without it the bound is `ceil(sqrt(N))`, `N` the size of the
    /// augmented search space.
    #[serde(default)]
    pub max_iterations: Option<u64>,

    /// Seed of the exponential search's RNG (entropy when absent)
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            max_rounds: default_max_rounds(),
            growth: default_growth(),
            max_iterations: None,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> QaspResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the known-`m` attempt ceiling.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u64) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the exponential search round ceiling.
    #[must_use]
    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Set the growth factor.
    #[must_use]
    pub fn with_growth(mut self, growth: f64) -> Self {
        self.growth = growth;
        self
    }

    /// Cap the iterations of exponential-search circuits.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Seed the exponential search.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that every field is usable.
    pub fn validate(&self) -> QaspResult<()> {
        if self.max_attempts == 0 {
            return Err(QaspError::Config("max_attempts must be at least 1".into()));
        }
        if self.max_rounds == 0 {
            return Err(QaspError::Config("max_rounds must be at least 1".into()));
        }
        if self.max_iterations == Some(0) {
            return Err(QaspError::Config("max_iterations must be at least 1".into()));
        }
        if !self.growth.is_finite() || self.growth <= 1.0 {
            return Err(QaspError::Config(format!(
                "growth must be a finite number greater than 1, got {}",
                self.growth
            )));
        }
        Ok(())
    }
}

// Default value functions
fn default_max_attempts() -> u64 {
    1024
}

fn default_max_rounds() -> u32 {
    64
}

fn default_growth() -> f64 {
    1.5
}
