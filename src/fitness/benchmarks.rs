//! Benchmark fitness functions
//!
//! This module provides standard benchmark problems for exercising the
//! engine. Both follow the crate-wide convention that lower is better.

use crate::fitness::traits::Fitness;
use crate::genome::bit_string::BitString;
use crate::genome::permutation::Permutation;
use crate::genome::traits::BinaryGenome;

/// OneMax problem for bit strings
///
/// Counts the number of unset bits, so the all-ones string scores 0.
#[derive(Clone, Debug)]
pub struct OneMax {
    length: usize,
}

impl OneMax {
    /// Create a new OneMax problem over strings of the given length
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    /// Get the expected string length
    pub fn length(&self) -> usize {
        self.length
    }
}

impl Fitness for OneMax {
    type Genome = BitString;

    fn evaluate(&self, genome: &mut Self::Genome) -> f64 {
        assert_eq!(genome.len(), self.length, "bit string length mismatch");
        genome.count_zeros() as f64
    }
}

/// Closed-tour length over a fixed set of points
///
/// The genome is a permutation of point indices; the score is the total
/// Euclidean length of the tour visiting the points in that order and
/// returning to the start.
#[derive(Clone, Debug)]
pub struct TourLength {
    points: Vec<(f64, f64)>,
    distances: Vec<Vec<f64>>,
}

impl TourLength {
    /// Create a tour-length objective from a list of 2D points
    pub fn from_points(points: Vec<(f64, f64)>) -> Self {
        let n = points.len();
        let mut distances = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = points[i].0 - points[j].0;
                let dy = points[i].1 - points[j].1;
                let d = (dx * dx + dy * dy).sqrt();
                distances[i][j] = d;
                distances[j][i] = d;
            }
        }
        Self { points, distances }
    }

    /// Number of points in the tour
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// Distance between two points by index
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.distances[i][j]
    }

    /// Total wrap-around length of a tour
    pub fn tour_length(&self, tour: &Permutation) -> f64 {
        let n = self.points.len();
        assert_eq!(tour.len(), n, "permutation length mismatch");

        let perm = tour.as_slice();
        let mut total = 0.0;
        for k in 0..n {
            let from = perm[k];
            let to = perm[(k + 1) % n];
            total += self.distances[from][to];
        }
        total
    }
}

impl Fitness for TourLength {
    type Genome = Permutation;

    fn evaluate(&self, genome: &mut Self::Genome) -> f64 {
        self.tour_length(genome)
    }
}
