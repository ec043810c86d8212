//! Error types for helix-ga
//!
//! This module defines all error types used throughout the library.
//!
//! Shape violations (mismatched parent lengths, infeasible pool sizes) are
//! programmer errors and are enforced with assertions at the call sites, not
//! represented here. These enums cover construction-time misuse and the
//! explicit failure path of degenerate parent selection.

use thiserror::Error;

/// Error type for genome construction and validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GenomeError {
    /// Sequence passed to a permutation constructor is not a permutation
    #[error("Invalid permutation: {0}")]
    InvalidPermutation(String),
}

/// Top-level error type for evolution runs
#[derive(Debug, Error)]
pub enum EvolutionError {
    /// Genome error
    #[error("Genome error: {0}")]
    Genome(#[from] GenomeError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Empty population
    #[error("Empty population")]
    EmptyPopulation,

    /// Roulette selection could not produce two distinct parents
    ///
    /// Raised after a bounded number of re-tosses when the weight list is
    /// effectively concentrated on a single individual.
    #[error("Degenerate selection: no distinct parent pair after {attempts} tosses")]
    DegenerateSelection { attempts: usize },
}

/// Result type alias for evolution operations
pub type EvoResult<T> = Result<T, EvolutionError>;
