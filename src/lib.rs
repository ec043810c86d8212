//! # helix-ga
//!
//! A generational genetic algorithm engine for Rust.
//!
//! The engine evolves a population of genomes through pluggable
//! selection, crossover, mutation, and replacement operators. All
//! fitness is minimized: lower scores are better, and the roulette
//! selection layer transforms raw scores into strictly positive
//! weights internally.
//!
//! ## Core Concepts
//!
//! - **Cumulative selection**: roulette draws run over a prefix-sum
//!   index that supports incremental extension and removal
//! - **Pluggable replacement**: generational, elitist, truncation, and
//!   steady-state roulette strategies share one trait
//! - **Memetic refinement**: a 2-opt local search wraps any
//!   permutation fitness to score the refined tour instead
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use helix_ga::prelude::*;
//!
//! let mut rng = rand::thread_rng();
//!
//! let result = GenerationalGa::builder()
//!     .population_size(100)
//!     .selection(RouletteSelection::new())
//!     .crossover(NPointCrossover::new(2))
//!     .mutation(BitFlipMutation::new())
//!     .replacement(ElitistReplacement::new())
//!     .fitness(OneMax::new(64))
//!     .max_generations(500)
//!     .build()?
//!     .run(|rng| BitString::random(rng, 64), &mut rng)?;
//! ```

pub mod algorithms;
pub mod diagnostics;
pub mod diversity;
pub mod error;
pub mod fitness;
pub mod genome;
pub mod local_search;
pub mod operators;
pub mod population;
pub mod termination;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::algorithms::prelude::*;
    pub use crate::diagnostics::prelude::*;
    pub use crate::diversity::*;
    pub use crate::error::*;
    pub use crate::fitness::prelude::*;
    pub use crate::genome::prelude::*;
    pub use crate::local_search::*;
    pub use crate::operators::prelude::*;
    pub use crate::population::prelude::*;
    pub use crate::termination::prelude::*;
}
