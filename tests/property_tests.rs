//! Property-based tests for evoreal
//!
//! Uses proptest to verify invariants of the gene encoding and the
//! genetic operators, plus statistical checks on the operator
//! distributions.

use evoreal::prelude::*;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

fn schema(dim: usize) -> GeneVector {
    GeneVector::new((0..dim).map(|i| format!("g{}", i))).unwrap()
}

proptest! {
    // ==================== Bounds invariants ====================

    #[test]
    fn random_within_bounds(seed in any::<u64>(), dim in 1usize..8) {
        let mut rng = StdRng::seed_from_u64(seed);
        let drawn = schema(dim).random(&mut rng);
        for &v in drawn.values() {
            prop_assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn crossover_within_bounds(
        seed in any::<u64>(),
        dim in 1usize..6,
        eta in 0.1f64..80.0
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let base = schema(dim);
        let p0 = base.random(&mut rng);
        let p1 = base.random(&mut rng);

        let (c0, c1) = p0.crossover(&p1, eta, &mut rng).unwrap();
        for &v in c0.values().iter().chain(c1.values()) {
            prop_assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn mutation_within_bounds(
        seed in any::<u64>(),
        dim in 1usize..6,
        eta in 0.1f64..80.0
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let parent = schema(dim).random(&mut rng);

        let child = parent.mutate(eta, &mut rng);
        prop_assert!(child.is_couple(&parent));
        for &v in child.values() {
            prop_assert!((0.0..=1.0).contains(&v));
        }
    }

    // ==================== Couple relation ====================

    #[test]
    fn couple_symmetry(dim_a in 1usize..6, dim_b in 1usize..6) {
        let a = schema(dim_a);
        let b = schema(dim_b);

        prop_assert!(a.is_couple(&a));
        prop_assert!(b.is_couple(&b));
        prop_assert_eq!(a.is_couple(&b), b.is_couple(&a));
        prop_assert_eq!(a.is_couple(&b), dim_a == dim_b);
    }

    // ==================== Reproducibility ====================

    #[test]
    fn evolve_reproducible(seed in any::<u64>()) {
        let run = |seed: u64| -> Vec<Vec<f64>> {
            let mut rng = StdRng::seed_from_u64(seed);
            let members: Vec<Individual> = (0..10)
                .map(|i| {
                    let v = i as f64 / 10.0;
                    Individual::new(
                        GeneVector::from_pairs([("x", v), ("y", 1.0 - v)]).unwrap(),
                    )
                })
                .collect();
            let mut population = Population::new(0, members, 10);
            population.bind_objective(&(Arc::new(SumGenes::new()) as Arc<dyn Objective>));
            let next = population.evolve(None, 2, 0.9, &mut rng).unwrap();
            next.current()
                .iter()
                .map(|p| p.genome().values().to_vec())
                .collect()
        };

        prop_assert_eq!(run(seed), run(seed));
    }
}

// ==================== Operator distributions ====================

#[test]
fn crossover_preserves_pair_mean() {
    let mut rng = StdRng::seed_from_u64(101);
    let p0 = GeneVector::from_pairs([("x", 0.3)]).unwrap();
    let p1 = GeneVector::from_pairs([("x", 0.8)]).unwrap();
    let parent_mean = 0.55;

    let trials = 4000;
    let mut sum = 0.0;
    for _ in 0..trials {
        let (c0, c1) = p0.crossover(&p1, 20.0, &mut rng).unwrap();
        sum += (c0[0] + c1[0]) / 2.0;
    }
    let offspring_mean = sum / trials as f64;
    assert!(
        (offspring_mean - parent_mean).abs() < 5e-3,
        "offspring mean {} drifted from parent mean {}",
        offspring_mean,
        parent_mean
    );
}

#[test]
fn mutation_mean_zero_at_interior() {
    let mut rng = StdRng::seed_from_u64(103);
    let parent = GeneVector::from_pairs([("x", 0.5)]).unwrap();

    let trials = 20_000;
    let mut sum = 0.0;
    for _ in 0..trials {
        let child = parent.mutate(20.0, &mut rng);
        sum += child[0] - parent[0];
    }
    let mean_delta = sum / trials as f64;
    assert!(
        mean_delta.abs() < 0.01,
        "mean mutation delta {} is not centered",
        mean_delta
    );
}

#[test]
fn higher_eta_tightens_crossover_spread() {
    let spread = |eta: f64, seed: u64| -> f64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let p0 = GeneVector::from_pairs([("x", 0.4)]).unwrap();
        let p1 = GeneVector::from_pairs([("x", 0.6)]).unwrap();
        let mut total = 0.0;
        for _ in 0..2000 {
            let (c0, _) = p0.crossover(&p1, eta, &mut rng).unwrap();
            total += (c0[0] - 0.5).abs();
        }
        total / 2000.0
    };

    assert!(spread(40.0, 7) < spread(2.0, 7));
}
