//! Selection operator
//!
//! This module provides the tournament selection used for building the
//! parent pool.

use rand::Rng;

use crate::error::{EvoResult, EvolutionError};

/// Tournament selection with an exclusion list
///
/// Draws `tournament_size` distinct candidate indices uniformly from the
/// non-excluded part of the pool and returns the index with the highest
/// fitness. Ties keep the candidate drawn first.
#[derive(Clone, Debug)]
pub struct TournamentSelection {
    /// Number of candidates competing per tournament
    pub tournament_size: usize,
}

impl TournamentSelection {
    /// Create a new tournament selection with the given size
    pub fn new(tournament_size: usize) -> Self {
        assert!(tournament_size >= 1, "Tournament size must be at least 1");
        Self { tournament_size }
    }

    /// Create binary tournament selection (size = 2)
    pub fn binary() -> Self {
        Self::new(2)
    }

    /// Run one tournament over the fitness pool
    ///
    /// Indices listed in `excluded` never enter the tournament. Errors
    /// when the exclusions leave fewer than `tournament_size` indices to
    /// draw from.
    pub fn select<R: Rng>(
        &self,
        fitnesses: &[f64],
        excluded: &[usize],
        rng: &mut R,
    ) -> EvoResult<usize> {
        let available = fitnesses.len().saturating_sub(excluded.len());
        if available < self.tournament_size {
            return Err(EvolutionError::InsufficientCandidates {
                required: self.tournament_size,
                available,
            });
        }

        let mut candidates: Vec<usize> = Vec::with_capacity(self.tournament_size);
        while candidates.len() < self.tournament_size {
            let idx = rng.gen_range(0..fitnesses.len());
            if !excluded.contains(&idx) && !candidates.contains(&idx) {
                candidates.push(idx);
            }
        }

        let mut winner = candidates[0];
        for &idx in &candidates[1..] {
            if fitnesses[idx] > fitnesses[winner] {
                winner = idx;
            }
        }
        Ok(winner)
    }
}
