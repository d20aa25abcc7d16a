//! Population type
//!
//! This module provides the generational state machine: a population
//! carries one generation and produces the next through the
//! select → reproduce → eliminate pipeline.

use std::sync::Arc;

use log::debug;
use rand::Rng;

use crate::error::{EvoResult, EvolutionError};
use crate::fitness::traits::Objective;
use crate::operators::selection::TournamentSelection;
use crate::population::individual::Individual;

/// Default number of survivors per generation
pub const DEFAULT_CAPACITY: usize = 20;
/// Default tournament candidate count
pub const DEFAULT_TOURNAMENT_SIZE: usize = 2;
/// Default probability of sexual reproduction per pool slot
pub const DEFAULT_CROSS_PROB: f64 = 0.9;

/// One generation of individuals plus its pipeline stage outputs
///
/// Stage outputs (`parents`, `children`, `next_generation`) are empty
/// until the producing stage has run and reading them earlier fails. A
/// completed [`Population::evolve`] yields a brand-new population with
/// the generation id incremented; the old object keeps its stage history
/// but should be treated as exhausted.
#[derive(Clone, Debug)]
pub struct Population {
    capacity: usize,
    generation_id: usize,
    current: Vec<Individual>,
    parents: Vec<Individual>,
    children: Vec<Individual>,
    next: Vec<Individual>,
}

impl Population {
    /// Create a population from its member list
    ///
    /// Every member is stamped with this population's generation id and
    /// a sequential position id.
    pub fn new(generation_id: usize, members: Vec<Individual>, capacity: usize) -> Self {
        let mut current = members;
        for (position, person) in current.iter_mut().enumerate() {
            person.set_generation_id(generation_id);
            person.set_position_id(position);
        }
        Self {
            capacity,
            generation_id,
            current,
            parents: Vec::new(),
            children: Vec::new(),
            next: Vec::new(),
        }
    }

    /// Generation id of this population
    pub fn generation_id(&self) -> usize {
        self.generation_id
    }

    /// Maximum number of survivors per generation
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of members in the current generation
    pub fn size(&self) -> usize {
        self.current.len()
    }

    /// True when the current generation has no members
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// The current generation
    pub fn current(&self) -> &[Individual] {
        &self.current
    }

    /// Parents chosen by `select`
    pub fn parents(&self) -> EvoResult<&[Individual]> {
        if self.parents.is_empty() {
            return Err(EvolutionError::StageNotReady {
                stage: "parents",
                needs: "select",
            });
        }
        Ok(&self.parents)
    }

    /// Children produced by `reproduce`
    pub fn children(&self) -> EvoResult<&[Individual]> {
        if self.children.is_empty() {
            return Err(EvolutionError::StageNotReady {
                stage: "children",
                needs: "reproduce",
            });
        }
        Ok(&self.children)
    }

    /// Survivors kept by `eliminate`
    pub fn next_generation(&self) -> EvoResult<&[Individual]> {
        if self.next.is_empty() {
            return Err(EvolutionError::StageNotReady {
                stage: "next generation",
                needs: "eliminate",
            });
        }
        Ok(&self.next)
    }

    /// Bind an objective to every individual held by this population
    pub fn bind_objective(&mut self, objective: &Arc<dyn Objective>) {
        for person in self
            .current
            .iter_mut()
            .chain(self.parents.iter_mut())
            .chain(self.children.iter_mut())
            .chain(self.next.iter_mut())
        {
            person.bind_objective(objective.clone());
        }
    }

    /// Express and evaluate every not-yet-evaluated member of a group
    pub fn grow_all(group: &mut [Individual]) -> EvoResult<()> {
        for person in group.iter_mut() {
            person.grow()?;
        }
        Ok(())
    }

    /// Insert an externally supplied individual into the current
    /// generation
    ///
    /// When the established schema carries checking, the newcomer's gene
    /// vector must be a couple of it; the population is unchanged on
    /// error. The newcomer is stamped with the next sequential position.
    pub fn append_newcomer(&mut self, newcomer: Individual) -> EvoResult<()> {
        if let Some(first) = self.current.first() {
            if first.genome().check() {
                if let Some(err) = first.genome().couple_mismatch(newcomer.genome()) {
                    return Err(err.into());
                }
            }
        }
        let mut person = newcomer;
        person.set_generation_id(self.generation_id);
        person.set_position_id(self.current.len());
        self.current.push(person);
        Ok(())
    }

    /// Choose the parent pool by tournament
    ///
    /// Defaults `pool_size` to half the generation. Every member is
    /// evaluated first (memoized). Each tournament draws
    /// `tournament_size` distinct candidates, excluding indices already
    /// chosen as parents by earlier tournaments of this call; the winner
    /// is the candidate with strictly higher fitness, ties keeping the
    /// candidate drawn first.
    pub fn select<R: Rng>(
        &mut self,
        pool_size: Option<usize>,
        tournament_size: usize,
        rng: &mut R,
    ) -> EvoResult<&[Individual]> {
        let pool_size = pool_size.unwrap_or(self.current.len() / 2);
        Self::grow_all(&mut self.current)?;

        let fitnesses: Vec<f64> = self
            .current
            .iter()
            .map(|person| person.fitness())
            .collect::<EvoResult<_>>()?;

        let tournament = TournamentSelection::new(tournament_size);
        let mut winners: Vec<usize> = Vec::with_capacity(pool_size);
        for _ in 0..pool_size {
            let winner = tournament.select(&fitnesses, &winners, rng)?;
            winners.push(winner);
        }

        self.parents = winners
            .iter()
            .map(|&index| self.current[index].clone())
            .collect();
        debug!(
            "generation {}: selected {} parents",
            self.generation_id,
            self.parents.len()
        );
        Ok(&self.parents)
    }

    /// Produce and evaluate the children of the parent pool
    ///
    /// Per pool slot: with probability `cross_prob` two distinct random
    /// parents reproduce sexually without mutation (two children);
    /// otherwise one random parent reproduces asexually with guaranteed
    /// mutation (one child). A single-parent pool always takes the
    /// asexual branch.
    pub fn reproduce<R: Rng>(&mut self, cross_prob: f64, rng: &mut R) -> EvoResult<&[Individual]> {
        if !(0.0..=1.0).contains(&cross_prob) {
            return Err(EvolutionError::InvalidProbability {
                name: "cross_prob",
                value: cross_prob,
            });
        }
        if self.parents.is_empty() {
            return Err(EvolutionError::StageNotReady {
                stage: "parents",
                needs: "select",
            });
        }

        self.children.clear();
        let n_parents = self.parents.len();
        for _ in 0..n_parents {
            if n_parents > 1 && rng.gen::<f64>() < cross_prob {
                let p0 = rng.gen_range(0..n_parents);
                let mut p1 = p0;
                while p1 == p0 {
                    p1 = rng.gen_range(0..n_parents);
                }
                let (c0, c1) = self.parents[p0].sexual_reproduce(&self.parents[p1], 0.0, rng)?;
                self.adopt(c0);
                self.adopt(c1);
            } else {
                let p = rng.gen_range(0..n_parents);
                let child = self.parents[p].asexual_reproduce(1.0, rng);
                self.adopt(child);
            }
        }

        Self::grow_all(&mut self.children)?;
        debug!(
            "generation {}: reproduced {} children",
            self.generation_id,
            self.children.len()
        );
        Ok(&self.children)
    }

    /// Stamp a newborn and add it to the children list
    fn adopt(&mut self, mut child: Individual) {
        child.set_generation_id(self.generation_id);
        child.set_position_id(self.current.len() + self.children.len());
        self.children.push(child);
    }

    /// Keep the fittest of the current generation and its children
    ///
    /// The merged pool is sorted non-increasing by fitness (stable, so
    /// ties keep merge order); the top `capacity` survivors are
    /// restamped with `position_id = rank` and the next generation id.
    pub fn eliminate(&mut self) -> EvoResult<&[Individual]> {
        if self.children.is_empty() {
            return Err(EvolutionError::StageNotReady {
                stage: "children",
                needs: "reproduce",
            });
        }

        let mut ranked: Vec<(f64, Individual)> =
            Vec::with_capacity(self.current.len() + self.children.len());
        for person in self.current.iter().chain(self.children.iter()) {
            ranked.push((person.fitness()?, person.clone()));
        }
        // evaluated fitness is always finite, so the comparison is total
        ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

        let survivors = ranked.len().min(self.capacity);
        self.next = ranked
            .into_iter()
            .take(survivors)
            .enumerate()
            .map(|(rank, (_, mut person))| {
                person.set_position_id(rank);
                person.set_generation_id(self.generation_id + 1);
                person
            })
            .collect();
        debug!(
            "generation {}: kept {} of {} candidates",
            self.generation_id,
            self.next.len(),
            self.current.len() + self.children.len()
        );
        Ok(&self.next)
    }

    /// Run select → reproduce → eliminate and build the next population
    ///
    /// The returned population carries the survivors under the
    /// incremented generation id; this population is left in its
    /// eliminated state and should not be evolved again.
    pub fn evolve<R: Rng>(
        &mut self,
        pool_size: Option<usize>,
        tournament_size: usize,
        cross_prob: f64,
        rng: &mut R,
    ) -> EvoResult<Population> {
        self.select(pool_size, tournament_size, rng)?;
        self.reproduce(cross_prob, rng)?;
        self.eliminate()?;
        Ok(Population::new(
            self.generation_id + 1,
            self.next.clone(),
            self.capacity,
        ))
    }
}
