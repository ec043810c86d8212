//! Bit string genome
//!
//! Fixed-length bit vectors, the genotype used by the continuous-optimization
//! side of the engine (decoding to real vectors happens outside the crate).

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::GenomeError;
use crate::genome::traits::{BinaryGenome, EvolutionaryGenome};

/// Fixed-length bit string genome
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BitString {
    bits: Vec<bool>,
}

impl BitString {
    /// Create a new bit string with the given bits
    pub fn new(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Create an all-zeros bit string of the given length
    pub fn zeros(length: usize) -> Self {
        Self {
            bits: vec![false; length],
        }
    }

    /// Create an all-ones bit string of the given length
    pub fn ones(length: usize) -> Self {
        Self {
            bits: vec![true; length],
        }
    }

    /// Create a uniformly random bit string of the given length
    pub fn random<R: Rng>(rng: &mut R, length: usize) -> Self {
        Self {
            bits: (0..length).map(|_| rng.gen()).collect(),
        }
    }

    /// Create a bit string from a u64, least-significant bit first
    pub fn from_u64(value: u64, length: usize) -> Self {
        assert!(length <= 64, "Length must be <= 64 for u64 conversion");
        let bits = (0..length).map(|i| (value >> i) & 1 == 1).collect();
        Self { bits }
    }

    /// Convert to a u64, least-significant bit first (None for length > 64)
    pub fn to_u64(&self) -> Option<u64> {
        if self.bits.len() > 64 {
            return None;
        }
        let mut value = 0u64;
        for (i, &bit) in self.bits.iter().enumerate() {
            if bit {
                value |= 1 << i;
            }
        }
        Some(value)
    }

    /// Get the length of the bit string
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Check if the bit string is empty
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Get a specific bit
    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    /// Set a specific bit
    pub fn set(&mut self, index: usize, value: bool) {
        if let Some(bit) = self.bits.get_mut(index) {
            *bit = value;
        }
    }

    /// Flip a specific bit
    pub fn flip(&mut self, index: usize) {
        if let Some(bit) = self.bits.get_mut(index) {
            *bit = !*bit;
        }
    }

    /// Get the complement (all bits flipped)
    pub fn complement(&self) -> Self {
        Self {
            bits: self.bits.iter().map(|b| !b).collect(),
        }
    }

    /// Hamming distance to another bit string of the same length
    pub fn hamming_distance(&self, other: &Self) -> usize {
        assert_eq!(self.bits.len(), other.bits.len(), "length mismatch");
        self.bits
            .iter()
            .zip(other.bits.iter())
            .filter(|(a, b)| a != b)
            .count()
    }

    /// Bitwise AND with another bit string of the same length
    pub fn and(&self, other: &Self) -> Self {
        assert_eq!(self.bits.len(), other.bits.len(), "length mismatch");
        Self {
            bits: self
                .bits
                .iter()
                .zip(other.bits.iter())
                .map(|(a, b)| *a && *b)
                .collect(),
        }
    }

    /// Bitwise OR with another bit string of the same length
    pub fn or(&self, other: &Self) -> Self {
        assert_eq!(self.bits.len(), other.bits.len(), "length mismatch");
        Self {
            bits: self
                .bits
                .iter()
                .zip(other.bits.iter())
                .map(|(a, b)| *a || *b)
                .collect(),
        }
    }

    /// Bitwise XOR with another bit string of the same length
    pub fn xor(&self, other: &Self) -> Self {
        assert_eq!(self.bits.len(), other.bits.len(), "length mismatch");
        Self {
            bits: self
                .bits
                .iter()
                .zip(other.bits.iter())
                .map(|(a, b)| *a ^ *b)
                .collect(),
        }
    }
}

impl EvolutionaryGenome for BitString {
    type Allele = bool;

    fn dimension(&self) -> usize {
        self.bits.len()
    }

    fn distance(&self, other: &Self) -> f64 {
        self.hamming_distance(other) as f64
    }
}

impl BinaryGenome for BitString {
    fn bits(&self) -> &[bool] {
        &self.bits
    }

    fn bits_mut(&mut self) -> &mut [bool] {
        &mut self.bits
    }

    fn from_bits(bits: Vec<bool>) -> Result<Self, GenomeError> {
        Ok(Self { bits })
    }
}

impl std::ops::Index<usize> for BitString {
    type Output = bool;

    fn index(&self, index: usize) -> &Self::Output {
        &self.bits[index]
    }
}

impl From<Vec<bool>> for BitString {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl From<BitString> for Vec<bool> {
    fn from(genome: BitString) -> Self {
        genome.bits
    }
}

impl<const N: usize> From<[bool; N]> for BitString {
    fn from(arr: [bool; N]) -> Self {
        Self { bits: arr.to_vec() }
    }
}

impl IntoIterator for BitString {
    type Item = bool;
    type IntoIter = std::vec::IntoIter<bool>;

    fn into_iter(self) -> Self::IntoIter {
        self.bits.into_iter()
    }
}

impl<'a> IntoIterator for &'a BitString {
    type Item = &'a bool;
    type IntoIter = std::slice::Iter<'a, bool>;

    fn into_iter(self) -> Self::IntoIter {
        self.bits.iter()
    }
}

impl std::fmt::Display for BitString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for bit in &self.bits {
            write!(f, "{}", if *bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}
