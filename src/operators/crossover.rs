//! Crossover operator
//!
//! This module provides the simulated binary crossover used for
//! recombining gene vectors.

use rand::Rng;

use crate::error::GenomeError;
use crate::genome::bounds::GENE_BOUNDS;
use crate::genome::gene_vector::GeneVector;

/// Simulated Binary Crossover (SBX)
///
/// SBX generates two offspring from two parents using a per-gene spread
/// factor that mimics single-point crossover on binary strings.
///
/// Reference: Deb, K., & Agrawal, R. B. (1995). Simulated Binary Crossover
/// for Continuous Search Space.
#[derive(Clone, Debug)]
pub struct SbxCrossover {
    /// Distribution index; higher values keep offspring closer to parents
    pub eta: f64,
}

impl SbxCrossover {
    /// Create a new SBX crossover with the given distribution index
    pub fn new(eta: f64) -> Self {
        assert!(eta >= 0.0, "Distribution index must be non-negative");
        Self { eta }
    }

    /// Compute the spread factor β from a uniform value on (0, 1)
    fn spread_from(&self, u: f64) -> f64 {
        let k = 1.0 / (self.eta + 1.0);
        if u <= 0.5 {
            (2.0 * u).powf(k)
        } else {
            (2.0 * (1.0 - u)).powf(-k)
        }
    }

    /// Draw a spread factor
    fn spread_factor<R: Rng>(&self, rng: &mut R) -> f64 {
        self.spread_from(open_unit(rng))
    }

    /// Recombine two parent vectors into two offspring
    ///
    /// Gene counts must match; when the first parent has checking
    /// enabled, the parents must be a couple. Offspring genes are
    /// clamped to the gene interval.
    pub fn recombine<R: Rng>(
        &self,
        parent0: &GeneVector,
        parent1: &GeneVector,
        rng: &mut R,
    ) -> Result<(GeneVector, GeneVector), GenomeError> {
        if parent0.len() != parent1.len() {
            return Err(GenomeError::CountMismatch {
                left: parent0.len(),
                right: parent1.len(),
            });
        }
        if parent0.check() {
            if let Some(err) = parent0.couple_mismatch(parent1) {
                return Err(err);
            }
        }

        let mut child0 = parent0.blank_twin();
        let mut child1 = parent0.blank_twin();
        for i in 0..parent0.len() {
            let beta = self.spread_factor(rng);
            let a = 1.0 - beta;
            let b = 1.0 + beta;
            let g0 = parent0.values()[i];
            let g1 = parent1.values()[i];
            child0.update(GENE_BOUNDS.clamp(0.5 * (a * g0 + b * g1)), i);
            child1.update(GENE_BOUNDS.clamp(0.5 * (b * g0 + a * g1)), i);
        }
        Ok((child0, child1))
    }
}

/// Uniform draw from the open interval (0, 1)
///
/// `gen` is half-open at zero; a zero draw would degenerate the spread
/// and perturbation factors, so it is rejected.
pub(crate) fn open_unit<R: Rng>(rng: &mut R) -> f64 {
    loop {
        let u: f64 = rng.gen();
        if u > 0.0 {
            return u;
        }
    }
}
