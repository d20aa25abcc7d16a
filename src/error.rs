//! Error types for evoreal
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Error type for gene-encoding operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GenomeError {
    /// Duplicate gene name at construction
    #[error("duplicate gene name [{0}]")]
    DuplicateName(String),

    /// A gene name that is not part of the schema
    #[error("unknown gene name [{0}]")]
    UnknownName(String),

    /// A schema gene without a supplied value
    #[error("missing value for gene [{0}]")]
    MissingName(String),

    /// Gene counts differ, the vectors cannot interbreed
    #[error("not a couple: gene count {left} vs {right}")]
    CountMismatch { left: usize, right: usize },

    /// Gene names differ at an index, the vectors cannot interbreed
    #[error("not a couple: gene name at [{index}] is [{left}] vs [{right}]")]
    NameMismatch {
        index: usize,
        left: String,
        right: String,
    },
}

/// Top-level error type for evolution operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvolutionError {
    /// Gene-encoding error
    #[error("genome error: {0}")]
    Genome(#[from] GenomeError),

    /// Fitness read before the individual was evaluated
    #[error("fitness not available, need evaluate() in prior")]
    FitnessNotReady,

    /// express/evaluate called with no objective bound
    #[error("{0}() not bound, register an objective first")]
    ObjectiveMissing(&'static str),

    /// A probability parameter outside [0, 1]
    #[error("invalid {name}: must be in [0,1], got {value:.4}")]
    InvalidProbability { name: &'static str, value: f64 },

    /// A pipeline stage output read before the producing stage ran
    #[error("{stage} not available, need {needs}() in prior")]
    StageNotReady {
        stage: &'static str,
        needs: &'static str,
    },

    /// The objective callback did not produce a usable fitness
    #[error("fitness evaluation failed: {0}")]
    FitnessEvaluation(String),

    /// Operation on a population with no members
    #[error("empty population")]
    EmptyPopulation,

    /// Tournament draw cannot complete after exclusions
    #[error("tournament needs {required} distinct candidates, only {available} available")]
    InsufficientCandidates { required: usize, available: usize },
}

/// Result type alias for evolution operations
pub type EvoResult<T> = Result<T, EvolutionError>;
