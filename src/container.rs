//! Ordered, mutable sequence of individuals.

use crate::Individual;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::ops::Index;

/// Orders two fitness values best-first, treating NaN as worse than every
/// other value so NaN individuals end up at the tail.
pub fn cmp_fitness_desc(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}

/// A plain list of individuals in insertion order.
///
/// This is the pool a truncated [`crate::Population`] is built from: callers
/// gather parents and offspring here, evaluate them, then hand the container
/// over for selection.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "I: Individual")]
pub struct IndividualContainer<I: Individual> {
    members: Vec<I>,
}

impl<I: Individual> Default for IndividualContainer<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Individual> IndividualContainer<I> {
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            members: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&I> {
        self.members.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut I> {
        self.members.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, I> {
        self.members.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, I> {
        self.members.iter_mut()
    }

    pub fn push(&mut self, individual: I) {
        self.members.push(individual);
    }

    pub fn pop(&mut self) -> Option<I> {
        self.members.pop()
    }

    pub fn as_slice(&self) -> &[I] {
        &self.members
    }

    pub fn into_vec(self) -> Vec<I> {
        self.members
    }

    /// True iff no member is dirty. An empty container is vacuously evaluated.
    pub fn are_evaluated(&self) -> bool {
        self.members.iter().all(|m| !m.is_dirty())
    }

    /// Sorts best-first. The sort is stable: equal fitness keeps the current
    /// relative order, so sorting an already sorted container is a no-op.
    pub fn sort(&mut self) {
        self.members
            .sort_by(|a, b| cmp_fitness_desc(a.fitness(), b.fitness()));
    }
}

impl<I: Individual> From<Vec<I>> for IndividualContainer<I> {
    fn from(members: Vec<I>) -> Self {
        Self { members }
    }
}

impl<I: Individual> FromIterator<I> for IndividualContainer<I> {
    fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

impl<I: Individual> Extend<I> for IndividualContainer<I> {
    fn extend<T: IntoIterator<Item = I>>(&mut self, iter: T) {
        self.members.extend(iter);
    }
}

impl<I: Individual> Index<usize> for IndividualContainer<I> {
    type Output = I;

    fn index(&self, index: usize) -> &I {
        &self.members[index]
    }
}

impl<I: Individual> IntoIterator for IndividualContainer<I> {
    type Item = I;
    type IntoIter = std::vec::IntoIter<I>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

impl<'a, I: Individual> IntoIterator for &'a IndividualContainer<I> {
    type Item = &'a I;
    type IntoIter = std::slice::Iter<'a, I>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl<'a, I: Individual> IntoIterator for &'a mut IndividualContainer<I> {
    type Item = &'a mut I;
    type IntoIter = std::slice::IterMut<'a, I>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Tagged {
        tag: u32,
        fitness: f64,
        dirty: bool,
    }

    impl Individual for Tagged {
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
            self.tag = rng.random();
        }
    }

    fn clean(tag: u32, fitness: f64) -> Tagged {
        Tagged {
            tag,
            fitness,
            dirty: false,
        }
    }

    fn tags(c: &IndividualContainer<Tagged>) -> Vec<u32> {
        c.iter().map(|t| t.tag).collect()
    }

    #[test]
    fn test_cmp_fitness_desc_puts_nan_last() {
        assert_eq!(cmp_fitness_desc(2.0, 1.0), Ordering::Less);
        assert_eq!(cmp_fitness_desc(1.0, 2.0), Ordering::Greater);
        assert_eq!(cmp_fitness_desc(f64::NAN, -1e300), Ordering::Greater);
        assert_eq!(cmp_fitness_desc(f64::NEG_INFINITY, f64::NAN), Ordering::Less);
        assert_eq!(cmp_fitness_desc(f64::NAN, f64::NAN), Ordering::Equal);
    }

    #[test]
    fn test_sort_is_descending_and_stable() {
        let mut c: IndividualContainer<Tagged> =
            vec![clean(0, 1.0), clean(1, 3.0), clean(2, 1.0), clean(3, 3.0), clean(4, 2.0)]
                .into();
        c.sort();
        assert_eq!(tags(&c), vec![1, 3, 4, 0, 2]);

        c.sort();
        assert_eq!(tags(&c), vec![1, 3, 4, 0, 2]);
    }

    #[test]
    fn test_sort_sends_nan_to_tail() {
        let mut c: IndividualContainer<Tagged> =
            vec![clean(0, f64::NAN), clean(1, -5.0), clean(2, 7.0)].into();
        c.sort();
        assert_eq!(tags(&c), vec![2, 1, 0]);
    }

    #[test]
    fn test_are_evaluated_tracks_dirty_members() {
        let mut c = IndividualContainer::<Tagged>::new();
        assert!(c.are_evaluated(), "empty container is vacuously evaluated");

        c.push(clean(0, 1.0));
        assert!(c.are_evaluated());

        c.push(Tagged {
            tag: 1,
            fitness: 0.0,
            dirty: true,
        });
        assert!(!c.are_evaluated());

        c.pop();
        assert!(c.are_evaluated());
    }

    #[test]
    fn test_extend_and_index_preserve_insertion_order() {
        let mut c: IndividualContainer<Tagged> = (0..3).map(|i| clean(i, i as f64)).collect();
        c.extend(vec![clean(10, 0.5)]);
        assert_eq!(c.len(), 4);
        assert_eq!(c[3].tag, 10);
        assert_eq!(c.get(0).map(|t| t.tag), Some(0));
        assert!(c.get(4).is_none());
    }
}
