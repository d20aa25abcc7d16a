//! Individual type
//!
//! This module provides the Individual: one gene vector plus identity
//! and a fitness lifecycle, with reproduction operators.

use std::fmt;
use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{EvoResult, EvolutionError};
use crate::fitness::traits::Objective;
use crate::genome::gene_vector::GeneVector;
use crate::history::IndividualRecord;
use crate::operators::DEFAULT_ETA;

/// Default mutation probability for direct sexual reproduction
pub const DEFAULT_SEXUAL_P_MUTATION: f64 = 0.05;
/// Default mutation probability for direct asexual reproduction
pub const DEFAULT_ASEXUAL_P_MUTATION: f64 = 0.1;

/// An individual in the population
///
/// Owns exactly one gene vector, carries generation/position identity,
/// and moves through a one-way Unevaluated → Evaluated transition driven
/// by the bound objective's express/evaluate pair.
#[derive(Clone, Serialize, Deserialize)]
pub struct Individual {
    genome: GeneVector,
    generation_id: Option<usize>,
    position_id: Option<usize>,
    fitness: Option<f64>,
    phenotype: Option<Vec<f64>>,
    #[serde(skip)]
    objective: Option<Arc<dyn Objective>>,
}

impl Individual {
    /// Create an unevaluated individual owning the given gene vector
    pub fn new(genome: GeneVector) -> Self {
        Self {
            genome,
            generation_id: None,
            position_id: None,
            fitness: None,
            phenotype: None,
            objective: None,
        }
    }

    /// The owned gene vector
    pub fn genome(&self) -> &GeneVector {
        &self.genome
    }

    /// Generation this individual belongs to, None until stamped
    pub fn generation_id(&self) -> Option<usize> {
        self.generation_id
    }

    /// Stamp the generation id
    pub fn set_generation_id(&mut self, generation_id: usize) {
        self.generation_id = Some(generation_id);
    }

    /// Position within the generation, None until stamped
    pub fn position_id(&self) -> Option<usize> {
        self.position_id
    }

    /// Stamp the position id
    pub fn set_position_id(&mut self, position_id: usize) {
        self.position_id = Some(position_id);
    }

    /// Bind the objective driving express/evaluate
    pub fn bind_objective(&mut self, objective: Arc<dyn Objective>) {
        self.objective = Some(objective);
    }

    /// Whether an objective is bound
    pub fn has_objective(&self) -> bool {
        self.objective.is_some()
    }

    /// Whether the fitness has been computed
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// The fitness value
    ///
    /// Errors until the individual has gone through evaluation.
    pub fn fitness(&self) -> EvoResult<f64> {
        self.fitness.ok_or(EvolutionError::FitnessNotReady)
    }

    /// Store the fitness value (called by the objective's `evaluate`)
    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }

    /// Phenotype state recorded by the objective's `express`, if any
    pub fn phenotype(&self) -> Option<&[f64]> {
        self.phenotype.as_deref()
    }

    /// Record phenotype state (called by the objective's `express`)
    pub fn set_phenotype(&mut self, phenotype: Vec<f64>) {
        self.phenotype = Some(phenotype);
    }

    /// Decode the genes into phenotype state via the bound objective
    pub fn express(&mut self) -> EvoResult<()> {
        let objective = self
            .objective
            .clone()
            .ok_or(EvolutionError::ObjectiveMissing("express"))?;
        objective.express(self)
    }

    /// Score the expressed phenotype via the bound objective
    ///
    /// The objective must leave a finite fitness behind; otherwise the
    /// fitness slot is cleared and the failure is surfaced.
    pub fn evaluate(&mut self) -> EvoResult<()> {
        let objective = self
            .objective
            .clone()
            .ok_or(EvolutionError::ObjectiveMissing("evaluate"))?;
        objective.evaluate(self)?;
        match self.fitness {
            Some(f) if f.is_finite() => Ok(()),
            Some(f) => {
                self.fitness = None;
                Err(EvolutionError::FitnessEvaluation(format!(
                    "non-finite fitness {}",
                    f
                )))
            }
            None => Err(EvolutionError::FitnessEvaluation(
                "evaluate() left fitness unset".to_string(),
            )),
        }
    }

    /// Run express + evaluate once; already-evaluated individuals are
    /// left untouched
    pub fn grow(&mut self) -> EvoResult<()> {
        if self.is_evaluated() {
            return Ok(());
        }
        self.express()?;
        self.evaluate()
    }

    /// A fresh individual carrying `genome`, with this individual's
    /// identity scaffolding and objective binding but no fitness or
    /// phenotype
    fn offspring(&self, genome: GeneVector) -> Individual {
        Individual {
            genome,
            generation_id: self.generation_id,
            position_id: self.position_id,
            fitness: None,
            phenotype: None,
            objective: self.objective.clone(),
        }
    }

    /// Two offspring via SBX crossover with the partner
    ///
    /// Each offspring is independently mutated with probability
    /// `p_mutation` afterwards. Identity ids are overwritten later by
    /// the owning population.
    pub fn sexual_reproduce<R: Rng>(
        &self,
        partner: &Individual,
        p_mutation: f64,
        rng: &mut R,
    ) -> EvoResult<(Individual, Individual)> {
        let (mut plasm0, mut plasm1) = self.genome.crossover(&partner.genome, DEFAULT_ETA, rng)?;
        if rng.gen::<f64>() < p_mutation {
            plasm0 = plasm0.mutate(DEFAULT_ETA, rng);
        }
        if rng.gen::<f64>() < p_mutation {
            plasm1 = plasm1.mutate(DEFAULT_ETA, rng);
        }
        Ok((self.offspring(plasm0), partner.offspring(plasm1)))
    }

    /// One offspring cloned from this individual
    ///
    /// With probability `p_mutation` the clone carries a mutated gene
    /// vector instead of an exact copy.
    pub fn asexual_reproduce<R: Rng>(&self, p_mutation: f64, rng: &mut R) -> Individual {
        let genome = if rng.gen::<f64>() < p_mutation {
            self.genome.mutate(DEFAULT_ETA, rng)
        } else {
            self.genome.clone()
        };
        self.offspring(genome)
    }

    /// Tabular form: ids (-1 when unassigned), fitness (NaN when
    /// unevaluated), and the gene values in schema order
    pub fn to_record(&self) -> IndividualRecord {
        IndividualRecord {
            generation_id: self.generation_id.map_or(-1, |g| g as i64),
            position_id: self.position_id.map_or(-1, |p| p as i64),
            fitness: self.fitness.unwrap_or(f64::NAN),
            gene_values: self.genome.values().to_vec(),
        }
    }
}

impl fmt::Debug for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Individual")
            .field("generation_id", &self.generation_id)
            .field("position_id", &self.position_id)
            .field("fitness", &self.fitness)
            .field("genome", &self.genome)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let generation = self.generation_id.map_or(-1, |g| g as i64);
        let position = self.position_id.map_or(-1, |p| p as i64);
        match self.fitness {
            Some(fitness) => write!(
                f,
                "({}, {}): [{:.4}] {}",
                generation, position, fitness, self.genome
            ),
            None => write!(f, "({}, {}): [unset] {}", generation, position, self.genome),
        }
    }
}

impl PartialEq for Individual {
    fn eq(&self, other: &Self) -> bool {
        self.genome == other.genome && self.fitness == other.fitness
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitness::benchmarks::SumGenes;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingObjective {
        calls: AtomicUsize,
    }

    impl CountingObjective {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl Objective for CountingObjective {
        fn evaluate(&self, individual: &mut Individual) -> EvoResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let total = individual.genome().values().iter().sum();
            individual.set_fitness(total);
            Ok(())
        }
    }

    struct ForgetfulObjective;

    impl Objective for ForgetfulObjective {
        fn evaluate(&self, _individual: &mut Individual) -> EvoResult<()> {
            Ok(())
        }
    }

    struct NanObjective;

    impl Objective for NanObjective {
        fn evaluate(&self, individual: &mut Individual) -> EvoResult<()> {
            individual.set_fitness(f64::NAN);
            Ok(())
        }
    }

    fn person(values: &[(&str, f64)]) -> Individual {
        Individual::new(GeneVector::from_pairs(values.iter().copied()).unwrap())
    }

    #[test]
    fn test_fresh_individual_is_unassigned() {
        let person = person(&[("x", 0.5)]);
        assert_eq!(person.generation_id(), None);
        assert_eq!(person.position_id(), None);
        assert!(!person.is_evaluated());
        assert!(!person.has_objective());
    }

    #[test]
    fn test_fitness_gate() {
        let mut person = person(&[("x", 0.3), ("y", 0.4)]);
        assert_eq!(person.fitness().unwrap_err(), EvolutionError::FitnessNotReady);

        person.bind_objective(Arc::new(SumGenes::new()));
        person.express().unwrap();
        person.evaluate().unwrap();

        assert_eq!(person.fitness().unwrap(), 0.7);
        // reads stay stable
        assert_eq!(person.fitness().unwrap(), 0.7);
    }

    #[test]
    fn test_express_without_objective() {
        let mut person = person(&[("x", 0.5)]);
        assert_eq!(
            person.express().unwrap_err(),
            EvolutionError::ObjectiveMissing("express")
        );
        assert_eq!(
            person.evaluate().unwrap_err(),
            EvolutionError::ObjectiveMissing("evaluate")
        );
    }

    #[test]
    fn test_grow_is_memoized() {
        let counting = Arc::new(CountingObjective::new());
        let mut person = person(&[("x", 0.5)]);
        person.bind_objective(counting.clone());

        person.grow().unwrap();
        person.grow().unwrap();
        person.grow().unwrap();

        assert_eq!(counting.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_evaluate_must_set_fitness() {
        let mut person = person(&[("x", 0.5)]);
        person.bind_objective(Arc::new(ForgetfulObjective));
        let err = person.evaluate().unwrap_err();
        assert!(matches!(err, EvolutionError::FitnessEvaluation(_)));
        assert!(!person.is_evaluated());
    }

    #[test]
    fn test_evaluate_rejects_non_finite_fitness() {
        let mut person = person(&[("x", 0.5)]);
        person.bind_objective(Arc::new(NanObjective));
        let err = person.evaluate().unwrap_err();
        assert!(matches!(err, EvolutionError::FitnessEvaluation(_)));
        assert!(!person.is_evaluated());
    }

    #[test]
    fn test_sexual_reproduce_crossover_only() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mut rng = StdRng::seed_from_u64(37);
        let father = person(&[("x", 0.2), ("y", 0.8)]);
        let mother = person(&[("x", 0.6), ("y", 0.4)]);

        let (c0, c1) = father.sexual_reproduce(&mother, 0.0, &mut rng).unwrap();

        assert!(!c0.is_evaluated());
        assert!(!c1.is_evaluated());
        assert!(c0.genome().is_couple(father.genome()));
        assert!(c1.genome().is_couple(mother.genome()));
        // crossover-only offspring mirror around the parent midpoint
        for i in 0..2 {
            let parent_sum = father.genome()[i] + mother.genome()[i];
            let child_sum = c0.genome()[i] + c1.genome()[i];
            assert!((parent_sum - child_sum).abs() < 3e-4);
        }
    }

    #[test]
    fn test_sexual_reproduce_rejects_non_couple() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mut rng = StdRng::seed_from_u64(37);
        let father = person(&[("x", 0.2), ("y", 0.8)]);
        let stranger = person(&[("x", 0.2), ("z", 0.8)]);

        let err = father
            .sexual_reproduce(&stranger, 0.0, &mut rng)
            .unwrap_err();
        assert!(matches!(err, EvolutionError::Genome(_)));
    }

    #[test]
    fn test_asexual_reproduce_always_mutates_at_one() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mut rng = StdRng::seed_from_u64(43);
        let parent = person(&[("x", 0.5), ("y", 0.5), ("z", 0.5), ("w", 0.5)]);

        let child = parent.asexual_reproduce(1.0, &mut rng);
        assert!(!child.is_evaluated());
        assert_ne!(child.genome().values(), parent.genome().values());
    }

    #[test]
    fn test_asexual_reproduce_clones_at_zero() {
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mut rng = StdRng::seed_from_u64(43);
        let mut parent = person(&[("x", 0.5)]);
        parent.set_generation_id(3);
        parent.set_position_id(7);

        let child = parent.asexual_reproduce(0.0, &mut rng);
        assert_eq!(child.genome().values(), parent.genome().values());
        assert_eq!(child.generation_id(), Some(3));
        assert_eq!(child.position_id(), Some(7));
        assert!(!child.is_evaluated());
    }

    #[test]
    fn test_clone_preserves_state() {
        let mut original = person(&[("x", 0.4)]);
        original.set_generation_id(2);
        original.set_position_id(5);
        original.bind_objective(Arc::new(SumGenes::new()));
        original.grow().unwrap();

        let twin = original.clone();
        assert_eq!(twin, original);
        assert_eq!(twin.generation_id(), Some(2));
        assert_eq!(twin.position_id(), Some(5));
        assert_eq!(twin.fitness().unwrap(), original.fitness().unwrap());
    }

    #[test]
    fn test_to_record_sentinels() {
        let fresh = person(&[("x", 0.4), ("y", 0.6)]);
        let record = fresh.to_record();
        assert_eq!(record.generation_id, -1);
        assert_eq!(record.position_id, -1);
        assert!(record.fitness.is_nan());
        assert_eq!(record.gene_values, vec![0.4, 0.6]);
    }

    #[test]
    fn test_display() {
        let mut person = person(&[("x", 0.4)]);
        assert_eq!(person.to_string(), "(-1, -1): [unset] {x: 0.4000}");

        person.set_generation_id(1);
        person.set_position_id(0);
        person.set_fitness(0.4);
        assert_eq!(person.to_string(), "(1, 0): [0.4000] {x: 0.4000}");
    }
}
