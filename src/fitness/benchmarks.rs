//! Benchmark objectives
//!
//! This module provides simple objectives for tests and examples.

use crate::error::{EvoResult, EvolutionError};
use crate::fitness::traits::Objective;
use crate::population::individual::Individual;

/// Single-peak sine surface
///
/// `f = Π (sin(2π gᵢ) + 1)` over the genes; for two genes this is
/// `(sin(2πx) + 1)(sin(2πy) + 1)` with maximum 4 at x = y = 0.25.
/// Expression records the phase angles as the phenotype.
#[derive(Clone, Debug, Default)]
pub struct SinglePeak;

impl SinglePeak {
    /// Create the objective
    pub fn new() -> Self {
        Self
    }
}

impl Objective for SinglePeak {
    fn express(&self, individual: &mut Individual) -> EvoResult<()> {
        let phases: Vec<f64> = individual
            .genome()
            .values()
            .iter()
            .map(|v| v * std::f64::consts::TAU)
            .collect();
        individual.set_phenotype(phases);
        Ok(())
    }

    fn evaluate(&self, individual: &mut Individual) -> EvoResult<()> {
        let fitness = {
            let phases = individual.phenotype().ok_or_else(|| {
                EvolutionError::FitnessEvaluation("phenotype not expressed".to_string())
            })?;
            phases.iter().map(|p| p.sin() + 1.0).product::<f64>()
        };
        individual.set_fitness(fitness);
        Ok(())
    }
}

/// Fitness = sum of gene values
///
/// Deterministic and monotone per gene, which makes selection and
/// elimination outcomes easy to predict in tests.
#[derive(Clone, Debug, Default)]
pub struct SumGenes;

impl SumGenes {
    /// Create the objective
    pub fn new() -> Self {
        Self
    }
}

impl Objective for SumGenes {
    fn evaluate(&self, individual: &mut Individual) -> EvoResult<()> {
        let total = individual.genome().values().iter().sum();
        individual.set_fitness(total);
        Ok(())
    }
}
