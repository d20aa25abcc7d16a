//! Named real-valued gene vector
//!
//! This module provides the gene-encoding type: an ordered sequence of
//! uniquely named genes, each constrained to the unit interval and stored
//! at a fixed decimal precision.

use std::fmt;

use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::GenomeError;
use crate::genome::bounds::{round_gene, GENE_BOUNDS};
use crate::operators::crossover::SbxCrossover;
use crate::operators::mutation::PolynomialMutation;

/// Ordered, named vector of bounded real genes
///
/// Gene order is fixed at construction and never reordered. Two vectors
/// are a "couple" (may interbreed) iff their name sequences match in
/// order and length. Operator outputs (`random`, `crossover`, `mutate`)
/// are new instances; [`GeneVector::update`] is the explicit in-place
/// opt-in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneVector {
    names: Vec<String>,
    values: Vec<f64>,
    check: bool,
}

impl GeneVector {
    /// Create a zero-valued vector with the given gene names
    ///
    /// Names must be unique; checking defaults to enabled.
    pub fn new<I, S>(names: I) -> Result<Self, GenomeError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(GenomeError::DuplicateName(name.clone()));
            }
        }
        let values = vec![0.0; names.len()];
        Ok(Self {
            names,
            values,
            check: true,
        })
    }

    /// Create a vector from name/value pairs, in pair order
    pub fn from_pairs<'a, I>(pairs: I) -> Result<Self, GenomeError>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let pairs: Vec<(&str, f64)> = pairs.into_iter().collect();
        let mut plasm = Self::new(pairs.iter().map(|(name, _)| *name))?;
        for (i, (_, value)) in pairs.iter().enumerate() {
            plasm.update(*value, i);
        }
        Ok(plasm)
    }

    /// Number of genes
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True when the vector carries no genes
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Gene names, in storage order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Gene values, in storage order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Look up a gene value by name
    pub fn get(&self, name: &str) -> Option<f64> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.values[i])
    }

    /// Whether out-of-bounds updates are clamped with a warning
    pub fn check(&self) -> bool {
        self.check
    }

    /// Enable or disable bounds checking on updates
    pub fn set_check(&mut self, active: bool) {
        self.check = active;
    }

    /// Name/value pairs in storage order
    pub fn to_pairs(&self) -> Vec<(String, f64)> {
        self.names
            .iter()
            .cloned()
            .zip(self.values.iter().copied())
            .collect()
    }

    /// Same schema and check flag, values zeroed
    pub(crate) fn blank_twin(&self) -> Self {
        Self {
            names: self.names.clone(),
            values: vec![0.0; self.names.len()],
            check: self.check,
        }
    }

    /// Store a value at a gene index, rounded to the storage precision
    ///
    /// With checking enabled an out-of-bounds value is clamped and a
    /// warning is emitted; otherwise the raw value is stored.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn update(&mut self, value: f64, index: usize) {
        let stored = if self.check && !GENE_BOUNDS.contains(value) {
            let clamped = GENE_BOUNDS.clamp(value);
            warn!(
                "gene [{}] out of bounds [{:.4}], limit to [{:.4}]",
                self.names[index], value, clamped
            );
            clamped
        } else {
            value
        };
        self.values[index] = round_gene(stored);
    }

    /// Why `other` cannot interbreed with this vector, if it cannot
    pub fn couple_mismatch(&self, other: &GeneVector) -> Option<GenomeError> {
        if self.names.len() != other.names.len() {
            return Some(GenomeError::CountMismatch {
                left: self.names.len(),
                right: other.names.len(),
            });
        }
        for (index, (left, right)) in self.names.iter().zip(other.names.iter()).enumerate() {
            if left != right {
                return Some(GenomeError::NameMismatch {
                    index,
                    left: left.clone(),
                    right: right.clone(),
                });
            }
        }
        None
    }

    /// True iff both vectors carry the same gene names in the same order
    pub fn is_couple(&self, other: &GeneVector) -> bool {
        match self.couple_mismatch(other) {
            Some(err) => {
                debug!("{}", err);
                false
            }
            None => true,
        }
    }

    /// New vector with every gene drawn uniformly from the gene interval
    pub fn random<R: Rng>(&self, rng: &mut R) -> Self {
        let mut drawn = self.blank_twin();
        for i in 0..self.len() {
            drawn.update(rng.gen_range(GENE_BOUNDS.min..=GENE_BOUNDS.max), i);
        }
        drawn
    }

    /// Two offspring via simulated binary crossover
    ///
    /// Requires `other` to be a couple of this vector when checking is
    /// enabled. `eta` is the distribution index; higher values keep
    /// offspring closer to the parents.
    pub fn crossover<R: Rng>(
        &self,
        other: &GeneVector,
        eta: f64,
        rng: &mut R,
    ) -> Result<(GeneVector, GeneVector), GenomeError> {
        SbxCrossover::new(eta).recombine(self, other, rng)
    }

    /// One offspring via polynomial mutation
    pub fn mutate<R: Rng>(&self, eta: f64, rng: &mut R) -> GeneVector {
        PolynomialMutation::new(eta).perturb(self, rng)
    }
}

impl fmt::Display for GeneVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.names.iter().zip(self.values.iter()).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {:.4}", name, value)?;
        }
        write!(f, "}}")
    }
}

impl std::ops::Index<usize> for GeneVector {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}
