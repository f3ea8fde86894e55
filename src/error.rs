//! Error types.

/// Precondition violations raised by [`crate::Population`].
///
/// Both variants are caller contract violations. `NotEvaluated` means some
/// member still carries a dirty flag and has to go through an evaluator first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PopulationError {
    #[error("population not evaluated: at least one individual is dirty")]
    NotEvaluated,
    #[error("population is empty")]
    Empty,
}

/// Invalid [`crate::EvolutionConfig`] values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("population_size must be at least 1")]
    ZeroPopulation,
    #[error("offspring_size must be at least 1")]
    ZeroOffspring,
    #[error("max_generations must be at least 1")]
    ZeroGenerations,
    #[error(
        "comma replacement needs offspring_size >= population_size (got {offspring_size} < {population_size})"
    )]
    CommaUnderflow {
        population_size: usize,
        offspring_size: usize,
    },
}

/// Errors that can occur while driving a generational run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvolutionError {
    #[error("Population error: {0}")]
    Population(#[from] PopulationError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("breeder returned {produced} offspring, expected {expected}")]
    OffspringCount { expected: usize, produced: usize },
}
