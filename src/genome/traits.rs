//! Core genome traits
//!
//! This module defines the `EvolutionaryGenome` trait and the family traits
//! for the built-in genotype representations.

use serde::{de::DeserializeOwned, Serialize};

use crate::error::GenomeError;

/// Core genome abstraction for evolutionary search.
///
/// A genome is an ordered, fixed-length sequence of alleles. All genomes in a
/// population share one shape for the lifetime of a run. Genomes must be
/// cloneable, serializable, and thread-safe so populations can be copied,
/// persisted, and handed across threads by callers.
pub trait EvolutionaryGenome: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// The allele type for individual positions
    type Allele: Clone + Send;

    /// Number of positions in the genome
    fn dimension(&self) -> usize;

    /// Distance between two genomes of the same shape
    ///
    /// Consumed by diversity instrumentation. Implementations pick the
    /// natural metric for their representation (Hamming for bit strings,
    /// pairwise-order disagreement for permutations).
    fn distance(&self, other: &Self) -> f64;
}

/// Trait for genomes represented as bit strings
pub trait BinaryGenome: EvolutionaryGenome<Allele = bool> {
    /// Get the bits as a slice
    fn bits(&self) -> &[bool];

    /// Get the bits as a mutable slice
    fn bits_mut(&mut self) -> &mut [bool];

    /// Create from a vector of bits
    fn from_bits(bits: Vec<bool>) -> Result<Self, GenomeError>;

    /// Count the number of true bits (ones)
    fn count_ones(&self) -> usize {
        self.bits().iter().filter(|&&b| b).count()
    }

    /// Count the number of false bits (zeros)
    fn count_zeros(&self) -> usize {
        self.bits().iter().filter(|&&b| !b).count()
    }
}

/// Trait for genomes that represent permutations
pub trait PermutationGenome: EvolutionaryGenome<Allele = usize> {
    /// Get the permutation as a slice
    fn permutation(&self) -> &[usize];

    /// Get the permutation as a mutable slice
    fn permutation_mut(&mut self) -> &mut [usize];

    /// Create from a vector of indices
    fn from_permutation(perm: Vec<usize>) -> Result<Self, GenomeError>;

    /// Check if the genome holds each label in `0..n` exactly once
    fn is_valid_permutation(&self) -> bool {
        let perm = self.permutation();
        let n = perm.len();
        if n == 0 {
            return true;
        }

        let mut seen = vec![false; n];
        for &idx in perm {
            if idx >= n || seen[idx] {
                return false;
            }
            seen[idx] = true;
        }
        true
    }
}
