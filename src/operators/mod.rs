//! Genetic operators
//!
//! This module provides the crossover, mutation, and selection operators.

pub mod crossover;
pub mod mutation;
pub mod selection;

/// Default distribution index for SBX crossover and polynomial mutation
pub const DEFAULT_ETA: f64 = 20.0;

pub mod prelude {
    pub use super::crossover::*;
    pub use super::mutation::*;
    pub use super::selection::*;
    pub use super::DEFAULT_ETA;
}
