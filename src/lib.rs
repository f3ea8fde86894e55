//! Generational population management for evolutionary optimization.
//!
//! A [`Population`] holds one generation of candidate solutions. It is built
//! either by randomized seeding from a template or by truncation (elitist)
//! selection from an evaluated pool, and it answers the two questions a
//! generational loop keeps asking: who is the best individual, and what do the
//! fitness values look like overall.
//!
//! Fitness evaluation and variation stay with the caller through the
//! [`Evaluator`] and [`Breeder`] traits. [`algorithms::truncation::TruncationGA`]
//! wires them together into a (μ+λ) / (μ,λ) loop.

use rand::Rng;
use serde::{Deserialize, Serialize};

pub mod config;
pub mod container;
pub mod error;
pub mod population;
pub mod stats;

pub mod algorithms {
    pub mod truncation;
}

pub use config::{EvolutionConfig, Replacement};
pub use container::IndividualContainer;
pub use error::{ConfigError, EvolutionError, PopulationError};
pub use population::Population;
pub use stats::{FitnessStats, GenerationReport};

/// The 'DNA' of an individual.
/// Only needs to know how to scramble its own parameters.
pub trait Genotype: Clone + Serialize + for<'de> Deserialize<'de> {
    fn randomize<R: Rng>(&mut self, rng: &mut R);
}

/// A candidate solution as seen by a population.
///
/// `fitness` is only meaningful while `is_dirty` returns false.
pub trait Individual: Clone + Serialize + for<'de> Deserialize<'de> {
    fn fitness(&self) -> f64;
    fn is_dirty(&self) -> bool;
    fn set_dirty(&mut self);

    /// Stores an evaluated fitness and clears the dirty flag.
    fn set_fitness(&mut self, fitness: f64);

    /// Randomizes internal (non-structural) parameters.
    fn randomize<R: Rng>(&mut self, rng: &mut R);
}

/// A genotype together with its evaluation state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "G: Genotype")]
pub struct Phenotype<G: Genotype> {
    pub genotype: G,
    pub fitness: f64,
    pub dirty: bool,
}

impl<G: Genotype> Phenotype<G> {
    /// Wraps a genotype that still has to be evaluated.
    pub fn new(genotype: G) -> Self {
        Self {
            genotype,
            fitness: 0.0,
            dirty: true,
        }
    }
}

impl<G: Genotype> Individual for Phenotype<G> {
    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn set_dirty(&mut self) {
        self.dirty = true;
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
        self.dirty = false;
    }

    fn randomize<R: Rng>(&mut self, rng: &mut R) {
        self.genotype.randomize(rng);
        self.dirty = true;
    }
}

/// Computes fitness for individuals.
/// This is where the 'Physics' or 'Logic' happens.
pub trait Evaluator<I: Individual> {
    fn evaluate(&self, individual: &I) -> f64;

    /// Evaluates every dirty member and returns how many were visited.
    /// Clean members keep their fitness untouched.
    fn evaluate_dirty<'a>(&self, members: impl IntoIterator<Item = &'a mut I>) -> usize
    where
        I: 'a,
    {
        let mut evaluated = 0;
        for member in members {
            if member.is_dirty() {
                let fitness = self.evaluate(member);
                member.set_fitness(fitness);
                evaluated += 1;
            }
        }
        evaluated
    }
}

/// Produces offspring from an evaluated parent generation.
///
/// Selection and variation operators live behind this trait; the population
/// manager only cares that it gets back the requested number of individuals.
pub trait Breeder<I: Individual> {
    fn breed<R: Rng>(&self, parents: &Population<I>, count: usize, rng: &mut R) -> Vec<I>;
}

/// The master engine trait.
pub trait Evolver<I: Individual> {
    fn step<E: Evaluator<I>>(&mut self, evaluator: &E)
    -> Result<GenerationReport, EvolutionError>;
    fn population(&self) -> &Population<I>;
}
