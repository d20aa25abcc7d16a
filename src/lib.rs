//! # evoreal
//!
//! A real-coded genetic algorithm engine with named, bounded genes.
//!
//! Candidate solutions are [`GeneVector`]s: ordered, uniquely named
//! genes constrained to the unit interval. An [`Individual`] carries one
//! gene vector through a two-phase express/evaluate lifecycle driven by
//! a pluggable [`Objective`]; a [`Population`] turns one generation into
//! the next through selection, reproduction, and elimination; the
//! [`GeneticAlgorithm`] orchestrator seeds generation 0, drives the
//! generational loop, and records per-generation history.
//!
//! ## Core concepts
//!
//! - **SBX + polynomial mutation**: the real-coded operator pair, with a
//!   configurable distribution index (η, default 20)
//! - **Injectable randomness**: every randomized operation takes a
//!   `rand::Rng`, so seeded runs reproduce exactly
//! - **Pluggable objectives**: decoding and scoring are supplied by the
//!   caller through the [`Objective`] trait
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use evoreal::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//!
//! let mut ga = GeneticAlgorithm::new(&[("x", 0.7), ("y", 0.2)], 20, &mut rng)?;
//! ga.set_objective(Arc::new(SinglePeak::new()));
//! ga.run(&RunOptions { generations: 100, ..RunOptions::default() }, &mut rng)?;
//!
//! let best = ga.result()?;
//! println!("best solution: {}", best);
//! ```
//!
//! [`GeneVector`]: genome::gene_vector::GeneVector
//! [`Individual`]: population::individual::Individual
//! [`Population`]: population::population::Population
//! [`Objective`]: fitness::traits::Objective
//! [`GeneticAlgorithm`]: algorithm::GeneticAlgorithm

pub mod algorithm;
pub mod error;
pub mod fitness;
pub mod genome;
pub mod history;
pub mod operators;
pub mod population;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::algorithm::{GeneticAlgorithm, RunOptions};
    pub use crate::error::*;
    pub use crate::fitness::prelude::*;
    pub use crate::genome::prelude::*;
    pub use crate::history::*;
    pub use crate::operators::prelude::*;
    pub use crate::population::prelude::*;
}
