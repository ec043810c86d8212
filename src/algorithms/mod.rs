//! Evolutionary algorithms
//!
//! This module provides the generational driver that ties the operator
//! library together.

pub mod generational;

pub mod prelude {
    pub use super::generational::*;
}
