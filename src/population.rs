//! One generation of individuals.
//!
//! A [`Population`] is built once per generation, either by
//! [seeding](Population::seeded) from a template or by
//! [truncation](Population::truncated) of an evaluated pool, then queried for
//! [`best`](Population::best) and [`stats`](Population::stats) and finally
//! handed to the breeder or dropped.
//!
//! # Example
//!
//! ```rust
//! use rand::{Rng, SeedableRng};
//! use rand_pcg::Pcg64;
//! use serde::{Deserialize, Serialize};
//! use symbios_population::{
//!     Evaluator, Genotype, IndividualContainer, Phenotype, Population,
//! };
//!
//! #[derive(Clone, Serialize, Deserialize)]
//! struct Weights(Vec<f64>);
//!
//! impl Genotype for Weights {
//!     fn randomize<R: Rng>(&mut self, rng: &mut R) {
//!         for w in &mut self.0 {
//!             *w = rng.random_range(-1.0..1.0);
//!         }
//!     }
//! }
//!
//! struct SumEval;
//! impl Evaluator<Phenotype<Weights>> for SumEval {
//!     fn evaluate(&self, p: &Phenotype<Weights>) -> f64 {
//!         p.genotype.0.iter().sum()
//!     }
//! }
//!
//! let mut rng = Pcg64::seed_from_u64(7);
//! let template = Phenotype::new(Weights(vec![0.0; 4]));
//! let seeded = Population::seeded(&template, 10, &mut rng);
//!
//! let mut pool = seeded.into_container();
//! SumEval.evaluate_dirty(&mut pool);
//!
//! let mut elite = Population::truncated(&pool, 3).unwrap();
//! let stats = elite.stats().unwrap();
//! assert_eq!(elite.best().unwrap().fitness, stats.best);
//! ```

use crate::container::{IndividualContainer, cmp_fitness_desc};
use crate::{FitnessStats, Individual, PopulationError};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// A fixed-size generation of independently owned individuals.
///
/// Membership never changes after construction. Mutable access to members is
/// allowed (evaluators need it) but drops the cached evaluated flag so the
/// next check rescans the dirty flags.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "I: Individual")]
pub struct Population<I: Individual> {
    members: IndividualContainer<I>,
    /// Never trusted from a snapshot; a restored population rescans its members.
    #[serde(skip)]
    evaluated: bool,
}

impl<I: Individual> Population<I> {
    /// Builds `size` randomized copies of `template`, all dirty.
    ///
    /// `rng` is consumed sequentially, one `randomize` call per individual in
    /// index order, so a deterministic source gives a reproducible population.
    pub fn seeded<R: Rng>(template: &I, size: usize, rng: &mut R) -> Self {
        let mut members = IndividualContainer::with_capacity(size);
        for _ in 0..size {
            let mut individual = template.clone();
            individual.randomize(rng);
            individual.set_dirty();
            members.push(individual);
        }
        tracing::debug!(size, "seeded population");
        Self {
            members,
            evaluated: false,
        }
    }

    /// Keeps deep copies of the `size` fittest members of `origin`, best first.
    ///
    /// Fails with [`PopulationError::NotEvaluated`] if any member of `origin`
    /// is dirty. When `origin` holds `size` members or fewer, all are kept.
    pub fn truncated(origin: &IndividualContainer<I>, size: usize) -> Result<Self, PopulationError> {
        if !origin.are_evaluated() {
            return Err(PopulationError::NotEvaluated);
        }
        Self::truncated_from(origin.clone(), size)
    }

    /// Same as [`truncated`](Self::truncated) but consumes the pool instead of
    /// copying it.
    pub fn truncated_from(
        origin: IndividualContainer<I>,
        size: usize,
    ) -> Result<Self, PopulationError> {
        if !origin.are_evaluated() {
            return Err(PopulationError::NotEvaluated);
        }
        let pooled = origin.len();
        let members: IndividualContainer<I> = select_best(origin.into_vec(), size).into();
        tracing::debug!(pooled, kept = members.len(), "truncated population");
        Ok(Self {
            members,
            evaluated: true,
        })
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// True when every member carries a valid fitness.
    pub fn is_evaluated(&self) -> bool {
        self.evaluated || self.members.are_evaluated()
    }

    pub fn get(&self, index: usize) -> Option<&I> {
        self.members.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut I> {
        self.evaluated = false;
        self.members.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, I> {
        self.members.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, I> {
        self.evaluated = false;
        self.members.iter_mut()
    }

    pub fn as_slice(&self) -> &[I] {
        self.members.as_slice()
    }

    pub fn into_container(self) -> IndividualContainer<I> {
        self.members
    }

    /// Returns the fittest member.
    ///
    /// Sorts the population best-first as a side effect. The sort is stable,
    /// so among equal fitness the member already ahead wins and repeated calls
    /// return the same individual.
    pub fn best(&mut self) -> Result<&I, PopulationError> {
        if !self.is_evaluated() {
            return Err(PopulationError::NotEvaluated);
        }
        self.members.sort();
        self.members.get(0).ok_or(PopulationError::Empty)
    }

    /// Best, mean and population standard deviation of the member fitnesses.
    pub fn stats(&self) -> Result<FitnessStats, PopulationError> {
        if !self.is_evaluated() {
            return Err(PopulationError::NotEvaluated);
        }
        let fitnesses: Vec<f64> = self.members.iter().map(|m| m.fitness()).collect();
        FitnessStats::from_fitnesses(&fitnesses).ok_or(PopulationError::Empty)
    }
}

/// Returns the `size` best members ordered best-first.
///
/// Ranks by fitness and then by original position, which is a strict total
/// order, so partial selection followed by sorting the survivors yields the
/// same sequence as a stable sort of the whole pool with the tail dropped.
fn select_best<I: Individual>(members: Vec<I>, size: usize) -> Vec<I> {
    if size == 0 {
        return Vec::new();
    }
    let mut ranked: Vec<(usize, I)> = members.into_iter().enumerate().collect();
    let by_rank = |a: &(usize, I), b: &(usize, I)| {
        cmp_fitness_desc(a.1.fitness(), b.1.fitness()).then(a.0.cmp(&b.0))
    };
    if size < ranked.len() {
        ranked.select_nth_unstable_by(size - 1, by_rank);
        ranked.truncate(size);
    }
    ranked.sort_unstable_by(by_rank);
    ranked.into_iter().map(|(_, individual)| individual).collect()
}

impl<I: Individual> Index<usize> for Population<I> {
    type Output = I;

    fn index(&self, index: usize) -> &I {
        &self.members[index]
    }
}

impl<I: Individual> From<Population<I>> for IndividualContainer<I> {
    fn from(population: Population<I>) -> Self {
        population.members
    }
}

impl<'a, I: Individual> IntoIterator for &'a Population<I> {
    type Item = &'a I;
    type IntoIter = std::slice::Iter<'a, I>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl<'a, I: Individual> IntoIterator for &'a mut Population<I> {
    type Item = &'a mut I;
    type IntoIter = std::slice::IterMut<'a, I>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
