//! Run history recording
//!
//! This module provides the tabular per-generation snapshots retained
//! over a run.

use serde::{Deserialize, Serialize};

use crate::population::population::Population;

/// One row of a generation snapshot
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct IndividualRecord {
    /// Generation id, -1 when unassigned
    pub generation_id: i64,
    /// Position within the generation, -1 when unassigned
    pub position_id: i64,
    /// Fitness, NaN when the individual was never evaluated
    pub fitness: f64,
    /// Gene values in schema order
    pub gene_values: Vec<f64>,
}

/// The state of one generation, one row per individual
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationSnapshot {
    /// Generation id of the captured population
    pub generation_id: usize,
    /// Gene names labelling the value columns
    pub gene_names: Vec<String>,
    /// One record per member, in position order
    pub rows: Vec<IndividualRecord>,
}

impl GenerationSnapshot {
    /// Capture the current generation of a population
    pub fn capture(population: &Population) -> Self {
        let gene_names = population
            .current()
            .first()
            .map(|person| person.genome().names().to_vec())
            .unwrap_or_default();
        Self {
            generation_id: population.generation_id(),
            gene_names,
            rows: population
                .current()
                .iter()
                .map(|person| person.to_record())
                .collect(),
        }
    }

    /// Best evaluated fitness in the snapshot, NaN when nothing was
    /// evaluated
    pub fn best_fitness(&self) -> f64 {
        self.rows
            .iter()
            .map(|row| row.fitness)
            .filter(|fitness| !fitness.is_nan())
            .fold(f64::NAN, |best, fitness| {
                if best.is_nan() || fitness > best {
                    fitness
                } else {
                    best
                }
            })
    }
}

/// Ordered per-generation snapshots of a run
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RunHistory {
    snapshots: Vec<GenerationSnapshot>,
}

impl RunHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a snapshot of the population's current generation
    pub fn record(&mut self, population: &Population) {
        self.snapshots.push(GenerationSnapshot::capture(population));
    }

    /// Number of recorded snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// True when nothing was recorded yet
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// All snapshots, oldest first
    pub fn snapshots(&self) -> &[GenerationSnapshot] {
        &self.snapshots
    }

    /// The most recent snapshot
    pub fn latest(&self) -> Option<&GenerationSnapshot> {
        self.snapshots.last()
    }

    /// Best fitness per snapshot, oldest first
    pub fn best_fitness_history(&self) -> Vec<f64> {
        self.snapshots
            .iter()
            .map(|snapshot| snapshot.best_fitness())
            .collect()
    }
}
