//! Population diversity measurement
//!
//! Instrumentation for periodic diagnostic sampling; nothing here feeds
//! back into the evolutionary loop. Average pairwise distance is O(n²)
//! in population size, so sample it sparingly on large populations.

use crate::genome::traits::{BinaryGenome, EvolutionaryGenome};
use crate::population::population::Population;

/// Mean distance over all unordered pairs in the population
///
/// `distance` must be symmetric. Populations with fewer than two
/// individuals have zero diversity.
pub fn average_distance<G, D>(population: &Population<G>, distance: D) -> f64
where
    G: EvolutionaryGenome,
    D: Fn(&G, &G) -> f64,
{
    let n = population.len();
    if n <= 1 {
        return 0.0;
    }

    let mut total = 0.0;
    for i in 0..n {
        for j in (i + 1)..n {
            total += distance(&population[i].genome, &population[j].genome);
        }
    }
    total / ((n * (n - 1)) as f64 * 0.5)
}

/// Hamming distance between two equal-length binary genomes
pub fn hamming_distance<G: BinaryGenome>(a: &G, b: &G) -> f64 {
    let a_bits = a.bits();
    let b_bits = b.bits();
    assert_eq!(a_bits.len(), b_bits.len(), "length mismatch");

    a_bits
        .iter()
        .zip(b_bits.iter())
        .filter(|(x, y)| x != y)
        .count() as f64
}

/// Jaccard distance between two equal-length binary genomes
///
/// Treats each genome as the set of positions holding a one bit and
/// returns `(|union| - |intersection|) / |union|`. Two genomes with no
/// one bits at all have distance zero.
pub fn jaccard_distance<G: BinaryGenome>(a: &G, b: &G) -> f64 {
    let a_bits = a.bits();
    let b_bits = b.bits();
    assert_eq!(a_bits.len(), b_bits.len(), "length mismatch");
    assert!(!a_bits.is_empty(), "genomes cannot be empty");

    let mut union = 0usize;
    let mut intersection = 0usize;
    for (x, y) in a_bits.iter().zip(b_bits.iter()) {
        if *x || *y {
            union += 1;
        }
        if *x && *y {
            intersection += 1;
        }
    }

    if union == 0 {
        return 0.0;
    }
    (union - intersection) as f64 / union as f64
}

/// Mean per-locus binary entropy of a binary-genome population
///
/// At each position, `p` is the share of individuals holding a one bit
/// and the position contributes `-(p·ln p + (1-p)·ln(1-p))`. Positions
/// are averaged uniformly, so a fully converged population scores zero
/// and a maximally mixed one scores `ln 2`.
pub fn mean_locus_entropy<G: BinaryGenome>(population: &Population<G>) -> f64 {
    let n = population.len();
    assert!(n >= 2, "entropy needs at least 2 individuals");

    let length = population[0].genome.bits().len();
    assert!(
        population.iter().all(|i| i.genome.bits().len() == length),
        "genomes must share a length"
    );
    if length == 0 {
        return 0.0;
    }

    let mut total = 0.0;
    for position in 0..length {
        let ones = population
            .iter()
            .filter(|i| i.genome.bits()[position])
            .count();
        total += binary_entropy(ones as f64 / n as f64);
    }
    total / length as f64
}

/// Binary entropy in nats, zero when `p` is exactly 0 or 1
pub fn binary_entropy(p: f64) -> f64 {
    if p <= 0.0 || p >= 1.0 {
        return 0.0;
    }
    -(p * p.ln() + (1.0 - p) * (1.0 - p).ln())
}
