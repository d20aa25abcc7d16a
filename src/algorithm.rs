//! Evolution orchestrator
//!
//! This module provides the entry point driving the generational loop:
//! seeding the first population, binding the objective, running a fixed
//! number of evolve steps, and recording run history.

use std::sync::Arc;

use log::{debug, info};
use rand::Rng;

use crate::error::{EvoResult, EvolutionError, GenomeError};
use crate::fitness::traits::Objective;
use crate::genome::gene_vector::GeneVector;
use crate::history::RunHistory;
use crate::population::individual::Individual;
use crate::population::population::{
    Population, DEFAULT_CAPACITY, DEFAULT_CROSS_PROB, DEFAULT_TOURNAMENT_SIZE,
};

/// Knobs for [`GeneticAlgorithm::run`]
#[derive(Clone, Debug)]
pub struct RunOptions {
    /// Number of generational transitions
    pub generations: usize,
    /// Probability of sexual reproduction per pool slot
    pub cross_prob: f64,
    /// Parent pool size; None defaults to half the generation
    pub pool_size: Option<usize>,
    /// Tournament candidate count
    pub tournament_size: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            generations: 40,
            cross_prob: DEFAULT_CROSS_PROB,
            pool_size: None,
            tournament_size: DEFAULT_TOURNAMENT_SIZE,
        }
    }
}

/// The evolution orchestrator
///
/// Owns the current population and the registered objective, and keeps
/// one snapshot per generation of the run.
pub struct GeneticAlgorithm {
    population: Population,
    objective: Option<Arc<dyn Objective>>,
    history: RunHistory,
}

impl std::fmt::Debug for GeneticAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneticAlgorithm")
            .field("population", &self.population)
            .field("objective", &self.objective.as_ref().map(|_| "<objective>"))
            .field("history", &self.history)
            .finish()
    }
}

impl GeneticAlgorithm {
    /// Seed generation 0 from a named gene-value mapping
    ///
    /// Builds one individual exactly matching the seed solution plus
    /// `capacity - 1` individuals with randomized gene vectors. Seed
    /// values are expected in the gene interval; out-of-bounds values
    /// go through the usual clamp-with-warning recovery.
    pub fn new<R: Rng>(seed: &[(&str, f64)], capacity: usize, rng: &mut R) -> EvoResult<Self> {
        let ancestor_plasm =
            GeneVector::from_pairs(seed.iter().map(|(name, value)| (*name, *value)))?;
        let mut ancestors = vec![Individual::new(ancestor_plasm.clone())];
        for _ in 1..capacity {
            ancestors.push(Individual::new(ancestor_plasm.random(rng)));
        }
        Ok(Self {
            population: Population::new(0, ancestors, capacity),
            objective: None,
            history: RunHistory::new(),
        })
    }

    /// Seed generation 0 with the default capacity
    pub fn with_default_capacity<R: Rng>(seed: &[(&str, f64)], rng: &mut R) -> EvoResult<Self> {
        Self::new(seed, DEFAULT_CAPACITY, rng)
    }

    /// Register the objective driving express/evaluate for the run
    ///
    /// Binds every individual currently held; offspring inherit the
    /// binding from their parents.
    pub fn set_objective(&mut self, objective: Arc<dyn Objective>) {
        self.population.bind_objective(&objective);
        self.objective = Some(objective);
    }

    /// Insert one externally supplied solution into the live population
    ///
    /// The mapping must cover the established gene-name schema exactly;
    /// the population is unchanged on error.
    pub fn append(&mut self, solution: &[(&str, f64)]) -> EvoResult<()> {
        let first = self
            .population
            .current()
            .first()
            .ok_or(EvolutionError::EmptyPopulation)?;
        let schema = first.genome().names().to_vec();

        for (i, (name, _)) in solution.iter().enumerate() {
            if solution[..i].iter().any(|(seen, _)| seen == name) {
                return Err(GenomeError::DuplicateName(name.to_string()).into());
            }
            if !schema.iter().any(|known| known == name) {
                return Err(GenomeError::UnknownName(name.to_string()).into());
            }
        }

        let mut plasm = GeneVector::new(schema.iter().cloned())?;
        for (i, name) in schema.iter().enumerate() {
            let (_, value) = solution
                .iter()
                .find(|(candidate, _)| candidate == name)
                .ok_or_else(|| GenomeError::MissingName(name.clone()))?;
            plasm.update(*value, i);
        }

        let mut newcomer = Individual::new(plasm);
        if let Some(objective) = &self.objective {
            newcomer.bind_objective(objective.clone());
        }
        self.population.append_newcomer(newcomer)
    }

    /// Drive the generational loop
    ///
    /// Fails fast when no objective was registered. Each iteration
    /// snapshots the held population, evolves it, and replaces the held
    /// reference; one final snapshot is taken after the loop, so a run
    /// of N generations leaves N + 1 snapshots behind.
    pub fn run<R: Rng>(&mut self, options: &RunOptions, rng: &mut R) -> EvoResult<()> {
        if self.objective.is_none() {
            return Err(EvolutionError::ObjectiveMissing("run"));
        }
        info!(
            "starting run: {} generations, capacity {}",
            options.generations,
            self.population.capacity()
        );

        for _ in 0..options.generations {
            self.history.record(&self.population);
            let next = self.population.evolve(
                options.pool_size,
                options.tournament_size,
                options.cross_prob,
                rng,
            )?;
            debug!(
                "generation {} evolved into generation {}",
                self.population.generation_id(),
                next.generation_id()
            );
            self.population = next;
        }
        self.history.record(&self.population);
        Ok(())
    }

    /// The population currently held
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// The recorded run history
    pub fn history(&self) -> &RunHistory {
        &self.history
    }

    /// The best-known solution: the rank-0 member of the final
    /// population
    pub fn result(&self) -> EvoResult<&Individual> {
        self.population
            .current()
            .first()
            .ok_or(EvolutionError::EmptyPopulation)
    }
}
