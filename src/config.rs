//! Run configuration for the generational driver.

use crate::ConfigError;
use serde::{Deserialize, Serialize};

/// How the next generation's selection pool is formed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Replacement {
    /// (μ+λ): parents compete with their offspring.
    #[default]
    Plus,
    /// (μ,λ): only offspring are eligible.
    Comma,
}

/// Configuration data for a truncation-selection run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Number of individuals kept per generation (μ).
    pub population_size: usize,
    /// Number of offspring bred per generation (λ).
    pub offspring_size: usize,
    pub replacement: Replacement,
    /// Generations performed by `run`.
    pub max_generations: usize,
    /// Seed for the run's random source.
    pub seed: u64,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 20,
            offspring_size: 20,
            replacement: Replacement::Plus,
            max_generations: 100,
            seed: 42,
        }
    }
}

impl EvolutionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::ZeroPopulation);
        }
        if self.offspring_size == 0 {
            return Err(ConfigError::ZeroOffspring);
        }
        if self.max_generations == 0 {
            return Err(ConfigError::ZeroGenerations);
        }
        if self.replacement == Replacement::Comma && self.offspring_size < self.population_size {
            return Err(ConfigError::CommaUnderflow {
                population_size: self.population_size,
                offspring_size: self.offspring_size,
            });
        }
        Ok(())
    }
}
