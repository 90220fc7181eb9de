use genesolver::engines::generation::{Candidate, GeneRng, GenerationContext, StrategyRegistry};
use genesolver::strategies::{self, Crossover, MutateUnitOfMeaning};
use genesolver::{FitnessResult, GeneticStrategy};
use std::sync::Arc;

fn parent(genes: &str) -> Candidate {
    let mut candidate = Candidate::new(genes.chars().collect(), 0, 0);
    candidate.assign_fitness(FitnessResult::new(1));
    candidate
}

#[test]
fn test_crossover_without_parents_generates_random_genes() {
    let mut rng = GeneRng::new(1, "xyz");
    let mut ctx = GenerationContext::new(&[], 12, 1, 0.5, 0, &mut rng);

    let genes = Crossover.generate(&mut ctx);

    assert_eq!(genes.len(), 12);
    assert!(genes.iter().all(|c| "xyz".contains(*c)));
}

#[test]
fn test_every_builtin_handles_empty_parents() {
    let mut rng = GeneRng::new(2, "01");
    for strategy in strategies::builtin() {
        let mut ctx = GenerationContext::new(&[], 9, 3, 0.3, 3, &mut rng);
        assert_eq!(strategy.generate(&mut ctx).len(), 9, "{}", strategy.alias());
    }
}

#[test]
fn test_builtins_never_touch_frozen_genes() {
    let parents = vec![parent("aaaabbbbbbbb"), parent("aaaacccccccc"), parent("aaaabcbcbcbc")];
    let mut rng = GeneRng::new(3, "abc");

    for strategy in strategies::builtin() {
        for _ in 0..200 {
            let mut ctx = GenerationContext::new(&parents, 12, 4, 0.9, 4, &mut rng);
            let genes = strategy.generate(&mut ctx);
            assert_eq!(genes.len(), 12);
            assert_eq!(&genes[..4], &['a'; 4], "{} changed a frozen gene", strategy.alias());
        }
    }
}

#[test]
fn test_parents_are_conformed_to_target_length() {
    let parents = vec![parent("ab"), parent("abababababab")];
    let mut rng = GeneRng::new(4, "ab");

    for strategy in strategies::builtin() {
        for _ in 0..20 {
            let mut ctx = GenerationContext::new(&parents, 6, 2, 0.5, 0, &mut rng);
            assert_eq!(strategy.generate(&mut ctx).len(), 6);
        }
    }
}

#[test]
fn test_unit_mutation_changes_a_single_unit() {
    let parents = vec![parent("000000000")];
    let mut rng = GeneRng::new(5, "01");

    for _ in 0..100 {
        let mut ctx = GenerationContext::new(&parents, 9, 3, 0.5, 0, &mut rng);
        let genes = MutateUnitOfMeaning.generate(&mut ctx);
        let touched: Vec<usize> = genes
            .chunks(3)
            .enumerate()
            .filter(|(_, unit)| unit.iter().any(|&c| c == '1'))
            .map(|(i, _)| i)
            .collect();
        assert!(touched.len() <= 1);
    }
}

#[test]
fn test_unit_mutation_prefers_hinted_unit() {
    let mut hinted = Candidate::new("000000000".chars().collect(), 0, 0);
    hinted.assign_fitness(FitnessResult::new(3).with_unit_hint(2));
    let parents = vec![hinted];
    let mut rng = GeneRng::new(6, "01");

    let mut hits = [0usize; 3];
    for _ in 0..600 {
        let mut ctx = GenerationContext::new(&parents, 9, 3, 0.5, 0, &mut rng);
        let genes = MutateUnitOfMeaning.generate(&mut ctx);
        for (i, unit) in genes.chunks(3).enumerate() {
            if unit.iter().any(|&c| c == '1') {
                hits[i] += 1;
            }
        }
    }
    assert!(hits[2] > hits[0] * 2);
    assert!(hits[2] > hits[1] * 2);
}

#[test]
fn test_weight_floor_holds_for_starved_strategy() {
    let strategies: Vec<Arc<dyn GeneticStrategy>> =
        strategies::builtin().into_iter().take(3).collect();
    let mut registry = StrategyRegistry::new(strategies, 2.0);
    let mut rng = GeneRng::new(9, "01");

    for generation in 0..100 {
        // Strategy 2 never produces a retained candidate
        let retained: Vec<Candidate> = (0..120)
            .map(|_| Candidate::new(vec!['0'], rng.next_index(2), generation))
            .collect();
        registry.rebalance(&retained);

        let weights = registry.weights();
        assert!(weights[2] >= 2.0);
        assert!((weights.iter().sum::<f64>() - 100.0).abs() < 1e-6);
    }
}
