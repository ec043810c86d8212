//! Genome abstractions and implementations
//!
//! This module provides the core `EvolutionaryGenome` trait and the built-in
//! bit-string and permutation genome types.

pub mod traits;
pub mod bit_string;
pub mod permutation;

pub mod prelude {
    pub use super::traits::*;
    pub use super::bit_string::*;
    pub use super::permutation::*;
}
