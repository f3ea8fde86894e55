//! Generational loop built on truncation selection.
//!
//! Each step evaluates whatever is dirty, asks the [`Breeder`] for λ offspring,
//! pools them (with the parents under [`Replacement::Plus`], alone under
//! [`Replacement::Comma`]) and keeps the μ best as the next [`Population`].
//!
//! # Example
//!
//! ```rust
//! use rand::Rng;
//! use serde::{Deserialize, Serialize};
//! use symbios_population::{
//!     Breeder, EvolutionConfig, Evaluator, Genotype, Individual, Phenotype, Population,
//!     algorithms::truncation::TruncationGA,
//! };
//!
//! #[derive(Clone, Serialize, Deserialize)]
//! struct X(f64);
//!
//! impl Genotype for X {
//!     fn randomize<R: Rng>(&mut self, rng: &mut R) {
//!         self.0 = rng.random_range(-10.0..10.0);
//!     }
//! }
//!
//! struct Jitter;
//! impl Breeder<Phenotype<X>> for Jitter {
//!     fn breed<R: Rng>(
//!         &self,
//!         parents: &Population<Phenotype<X>>,
//!         count: usize,
//!         rng: &mut R,
//!     ) -> Vec<Phenotype<X>> {
//!         (0..count)
//!             .map(|i| {
//!                 let parent = &parents[i % parents.len()].genotype;
//!                 Phenotype::new(X(parent.0 + rng.random_range(-0.5..0.5)))
//!             })
//!             .collect()
//!     }
//! }
//!
//! struct Parabola;
//! impl Evaluator<Phenotype<X>> for Parabola {
//!     fn evaluate(&self, p: &Phenotype<X>) -> f64 {
//!         -(p.genotype.0 - 3.0).powi(2)
//!     }
//! }
//!
//! let config = EvolutionConfig {
//!     population_size: 10,
//!     offspring_size: 20,
//!     max_generations: 50,
//!     ..Default::default()
//! };
//! let mut ga = TruncationGA::new(&Phenotype::new(X(0.0)), Jitter, config).unwrap();
//! let history = ga.run(&Parabola).unwrap();
//! assert_eq!(history.len(), 50);
//! assert!(ga.best().unwrap().fitness() > -0.5);
//! ```

use crate::{
    Breeder, ConfigError, EvolutionConfig, EvolutionError, Evaluator, Evolver, GenerationReport,
    Individual, IndividualContainer, Population, PopulationError, Replacement,
};
use rand::prelude::SeedableRng;
use rand_pcg::Pcg64;
use tracing::instrument;

pub struct TruncationGA<I: Individual, B: Breeder<I>> {
    population: Population<I>,
    breeder: B,
    config: EvolutionConfig,
    generation: usize,
    history: Vec<GenerationReport>,
    /// Evaluations spent since the last recorded report.
    pending_evaluations: usize,
    rng: Pcg64,
}

impl<I: Individual, B: Breeder<I>> TruncationGA<I, B> {
    /// Validates `config` and seeds the first generation from `template`.
    pub fn new(template: &I, breeder: B, config: EvolutionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = Pcg64::seed_from_u64(config.seed);
        let population = Population::seeded(template, config.population_size, &mut rng);
        Ok(Self {
            population,
            breeder,
            config,
            generation: 0,
            history: Vec::new(),
            pending_evaluations: 0,
            rng,
        })
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Number of completed generations.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn history(&self) -> &[GenerationReport] {
        &self.history
    }

    /// Evaluates the dirty members of the current population.
    ///
    /// The count is also carried into the next generation's report.
    pub fn evaluate<E: Evaluator<I>>(&mut self, evaluator: &E) -> usize {
        let evaluated = evaluator.evaluate_dirty(self.population.iter_mut());
        self.pending_evaluations += evaluated;
        evaluated
    }

    /// Best member of the current population. Fails until it has been evaluated.
    pub fn best(&mut self) -> Result<&I, PopulationError> {
        self.population.best()
    }

    /// Steps until `max_generations` generations have completed.
    pub fn run<E: Evaluator<I>>(
        &mut self,
        evaluator: &E,
    ) -> Result<&[GenerationReport], EvolutionError> {
        while self.generation < self.config.max_generations {
            self.step(evaluator)?;
        }
        Ok(&self.history)
    }
}

impl<I: Individual, B: Breeder<I>> Evolver<I> for TruncationGA<I, B> {
    #[instrument(level = "debug", skip(self, evaluator), fields(generation = self.generation + 1))]
    fn step<E: Evaluator<I>>(&mut self, evaluator: &E) -> Result<GenerationReport, EvolutionError> {
        // Parents evaluated here stay clean even if breeding fails below, so the
        // count is parked until a report is recorded.
        self.evaluate(evaluator);

        let expected = self.config.offspring_size;
        let mut offspring = self.breeder.breed(&self.population, expected, &mut self.rng);
        if offspring.len() != expected {
            return Err(EvolutionError::OffspringCount {
                expected,
                produced: offspring.len(),
            });
        }
        for child in &mut offspring {
            child.set_dirty();
        }
        self.pending_evaluations += evaluator.evaluate_dirty(&mut offspring);

        let mut pool = match self.config.replacement {
            Replacement::Plus => {
                let mut pool = IndividualContainer::with_capacity(self.population.len() + expected);
                pool.extend(self.population.iter().cloned());
                pool
            }
            Replacement::Comma => IndividualContainer::with_capacity(expected),
        };
        pool.extend(offspring);

        let next = Population::truncated_from(pool, self.config.population_size)?;
        let stats = next.stats()?;
        self.population = next;
        self.generation += 1;
        let evaluations = std::mem::take(&mut self.pending_evaluations);

        let report = GenerationReport {
            generation: self.generation,
            stats,
            evaluations,
        };
        tracing::info!(
            generation = report.generation,
            best = stats.best,
            average = stats.average,
            stdev = stats.stdev,
            evaluations,
            "generation complete"
        );
        self.history.push(report);
        Ok(report)
    }

    fn population(&self) -> &Population<I> {
        &self.population
    }
}
