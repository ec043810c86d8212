//! Permutation genome
//!
//! This module provides the permutation genome type for ordering problems
//! (tours, schedules). The multiset of labels is invariant under every
//! operator in the crate.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::GenomeError;
use crate::genome::traits::{EvolutionaryGenome, PermutationGenome};

/// Permutation genome for ordering problems
///
/// Represents a permutation of indices 0..n, commonly used for:
/// - Traveling Salesman Problem tours
/// - Job ordering and scheduling
/// - Any problem where the solution is an ordering of labels
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permutation {
    perm: Vec<usize>,
}

impl Permutation {
    /// Create a new permutation from a vector of indices
    ///
    /// # Panics
    /// Panics if the input is not a valid permutation of 0..n
    pub fn new(perm: Vec<usize>) -> Self {
        let result = Self { perm };
        assert!(
            result.is_valid_permutation(),
            "Input must be a valid permutation of 0..n"
        );
        result
    }

    /// Create a permutation from a vector without validation
    ///
    /// The caller must ensure the input is a valid permutation of 0..n.
    /// Used by operators that build children position-by-position and
    /// guarantee validity by construction.
    pub fn new_unchecked(perm: Vec<usize>) -> Self {
        Self { perm }
    }

    /// Try to create a permutation, returning an error if invalid
    pub fn try_new(perm: Vec<usize>) -> Result<Self, GenomeError> {
        let result = Self { perm };
        if result.is_valid_permutation() {
            Ok(result)
        } else {
            Err(GenomeError::InvalidPermutation(
                "input is not a permutation of 0..n".to_string(),
            ))
        }
    }

    /// Create the identity permutation [0, 1, 2, ..., n-1]
    pub fn identity(n: usize) -> Self {
        Self {
            perm: (0..n).collect(),
        }
    }

    /// Create a random permutation of size n
    pub fn random<R: Rng>(n: usize, rng: &mut R) -> Self {
        let mut perm: Vec<usize> = (0..n).collect();
        perm.shuffle(rng);
        Self { perm }
    }

    /// Get the length of the permutation
    pub fn len(&self) -> usize {
        self.perm.len()
    }

    /// Check if the permutation is empty
    pub fn is_empty(&self) -> bool {
        self.perm.is_empty()
    }

    /// Get the element at index i
    pub fn get(&self, i: usize) -> Option<usize> {
        self.perm.get(i).copied()
    }

    /// Get the inverse permutation
    ///
    /// If `perm[i] = j`, then `inverse[j] = i`
    pub fn inverse(&self) -> Self {
        let n = self.perm.len();
        let mut inv = vec![0; n];
        for (i, &j) in self.perm.iter().enumerate() {
            inv[j] = i;
        }
        Self { perm: inv }
    }

    /// Compose this permutation with another of the same length
    ///
    /// Returns a permutation where `result[i] = other[self[i]]`
    pub fn compose(&self, other: &Self) -> Self {
        assert_eq!(self.perm.len(), other.perm.len(), "length mismatch");
        let composed: Vec<usize> = self.perm.iter().map(|&i| other.perm[i]).collect();
        Self { perm: composed }
    }

    /// Swap two elements at positions i and j
    pub fn swap(&mut self, i: usize, j: usize) {
        self.perm.swap(i, j);
    }

    /// Reverse a segment from start to end (inclusive)
    pub fn reverse_segment(&mut self, start: usize, end: usize) {
        if start < end && end < self.perm.len() {
            self.perm[start..=end].reverse();
        }
    }

    /// Calculate the number of inversions (disorder measure)
    ///
    /// An inversion is a pair (i, j) where i < j but `perm[i] > perm[j]`.
    /// Returns a value in `[0, n*(n-1)/2]` where 0 means sorted.
    pub fn inversions(&self) -> usize {
        let n = self.perm.len();
        let mut count = 0;
        for i in 0..n {
            for j in (i + 1)..n {
                if self.perm[i] > self.perm[j] {
                    count += 1;
                }
            }
        }
        count
    }

    /// Calculate Kendall tau distance to another permutation
    ///
    /// Counts the number of pairwise disagreements (pairs ordered
    /// differently by the two permutations).
    pub fn kendall_tau_distance(&self, other: &Self) -> usize {
        // Relative order is the composition with the other's inverse
        let other_inv = other.inverse();
        let composed = self.compose(&other_inv);
        composed.inversions()
    }

    /// Get the underlying vector
    pub fn into_inner(self) -> Vec<usize> {
        self.perm
    }

    /// Get a reference to the underlying slice
    pub fn as_slice(&self) -> &[usize] {
        &self.perm
    }
}

impl EvolutionaryGenome for Permutation {
    type Allele = usize;

    fn dimension(&self) -> usize {
        self.perm.len()
    }

    fn distance(&self, other: &Self) -> f64 {
        self.kendall_tau_distance(other) as f64
    }
}

impl PermutationGenome for Permutation {
    fn permutation(&self) -> &[usize] {
        &self.perm
    }

    fn permutation_mut(&mut self) -> &mut [usize] {
        &mut self.perm
    }

    fn from_permutation(perm: Vec<usize>) -> Result<Self, GenomeError> {
        Self::try_new(perm)
    }
}

impl std::ops::Index<usize> for Permutation {
    type Output = usize;

    fn index(&self, index: usize) -> &Self::Output {
        &self.perm[index]
    }
}

impl From<Vec<usize>> for Permutation {
    fn from(perm: Vec<usize>) -> Self {
        Self::new(perm)
    }
}

impl From<Permutation> for Vec<usize> {
    fn from(p: Permutation) -> Self {
        p.perm
    }
}

impl IntoIterator for Permutation {
    type Item = usize;
    type IntoIter = std::vec::IntoIter<usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.perm.into_iter()
    }
}

impl<'a> IntoIterator for &'a Permutation {
    type Item = &'a usize;
    type IntoIter = std::slice::Iter<'a, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.perm.iter()
    }
}
