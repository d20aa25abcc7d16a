//! Mutation operator
//!
//! This module provides the polynomial mutation used for perturbing
//! gene vectors.

use rand::Rng;

use crate::genome::bounds::GENE_BOUNDS;
use crate::genome::gene_vector::GeneVector;
use crate::operators::crossover::open_unit;

/// Polynomial mutation
///
/// Perturbs every gene with a zero-mean offset drawn from the polynomial
/// distribution; offspring genes are clamped to the gene interval.
///
/// Reference: Deb, K. (2001). Multi-Objective Optimization using
/// Evolutionary Algorithms.
#[derive(Clone, Debug)]
pub struct PolynomialMutation {
    /// Distribution index; higher values mean smaller perturbations
    pub eta: f64,
}

impl PolynomialMutation {
    /// Create a new polynomial mutation with the given distribution index
    pub fn new(eta: f64) -> Self {
        assert!(eta >= 0.0, "Distribution index must be non-negative");
        Self { eta }
    }

    /// Compute the perturbation θ from a uniform value on (0, 1)
    ///
    /// θ lies in (-1, 1) with mean zero.
    fn delta_from(&self, u: f64) -> f64 {
        let k = 1.0 / (self.eta + 1.0);
        if u < 0.5 {
            (2.0 * u).powf(k) - 1.0
        } else {
            1.0 - (2.0 * (1.0 - u)).powf(k)
        }
    }

    /// Draw a perturbation
    fn perturbation<R: Rng>(&self, rng: &mut R) -> f64 {
        self.delta_from(open_unit(rng))
    }

    /// Produce one mutated offspring of the parent vector
    pub fn perturb<R: Rng>(&self, parent: &GeneVector, rng: &mut R) -> GeneVector {
        let mut child = parent.blank_twin();
        for i in 0..parent.len() {
            let theta = self.perturbation(rng);
            child.update(GENE_BOUNDS.clamp(parent.values()[i] + theta), i);
        }
        child
    }
}
