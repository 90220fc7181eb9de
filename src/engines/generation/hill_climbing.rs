// Outer controller that grows the solved length one unit of meaning per round.

use std::collections::HashSet;

use crate::engines::evaluation::FitnessEvaluator;
use crate::engines::generation::{
    candidate::{sort_by_rank, Candidate},
    evolution_engine::{EvolutionEngine, RoundParams},
    hall_of_fame::{HallOfFame, MIN_RETAINED},
    population::PopulationPair,
    progress::ProgressCallback,
};
use crate::types::{Fitness, RoundSummary};

/// Consecutive rounds without a new best before giving up
pub const MAX_ROUND_FAILURES: usize = 5;

/// A round more than this many percent worse than the best ever aborts
pub const REGRESSION_TOLERANCE_PERCENT: u128 = 5;

/// Attempts at padding the next round's pool, per missing entry
const PADDING_ATTEMPTS: usize = 4;

pub struct HillClimbResult {
    pub best: Candidate,
    pub rounds: Vec<RoundSummary>,
}

/// Holds no state of its own; every round's state lives in locals
pub struct HillClimber;

impl HillClimber {
    pub fn run(
        engine: &mut EvolutionEngine,
        target_length: usize,
        generation: &mut usize,
        evaluator: &mut FitnessEvaluator<'_>,
        observer: &mut dyn ProgressCallback,
    ) -> HillClimbResult {
        let unit = engine.config().unit_of_meaning_size.max(1);
        let freeze_solved = engine.config().only_permute_new_genes_while_hill_climbing;

        let mut population = PopulationPair::new(engine.config().population_size);
        let mut hall = HallOfFame::new();
        let mut best_ever = Candidate::worst();
        let mut failures = 0;
        let mut rounds = Vec::new();
        let mut length = 0;

        while length < target_length {
            let solved = length;
            length = (length + unit).min(target_length);
            let params = RoundParams {
                length,
                freeze_boundary: if freeze_solved { solved } else { 0 },
            };
            log::info!(
                "Hill-climbing round at length {}/{} (frozen before {})",
                length,
                target_length,
                params.freeze_boundary
            );

            let outcome = engine.run(params, &mut population, &mut hall, generation, evaluator, observer);
            observer.on_round_complete(length, outcome.best.fitness());
            rounds.push(RoundSummary {
                length,
                freeze_boundary: params.freeze_boundary,
                best: outcome.best.clone(),
                stop_reason: outcome.stop_reason,
            });

            if !best_ever.is_scored() || outcome.best.fitness() < best_ever.fitness() {
                best_ever = outcome.best.clone();
                failures = 0;
            } else {
                failures += 1;
                if regressed(outcome.best.fitness(), best_ever.fitness()) || failures >= MAX_ROUND_FAILURES {
                    log::info!(
                        "Abandoning hill climb at length {}: round best {} vs best ever {} after {} failed rounds",
                        length,
                        outcome.best.fitness(),
                        best_ever.fitness(),
                        failures
                    );
                    break;
                }
            }

            if length < target_length {
                let next_length = (length + unit).min(target_length);
                hall = Self::seed_next_round(
                    engine,
                    &hall,
                    &outcome.best,
                    next_length - length,
                    freeze_solved,
                    *generation,
                    evaluator,
                );
            }
        }

        HillClimbResult {
            best: best_ever,
            rounds,
        }
    }

    /// Extend retained candidates by one fresh unit of meaning each and keep
    /// those that beat the round's best, padded with the best of the rest
    fn seed_next_round(
        engine: &mut EvolutionEngine,
        hall: &HallOfFame,
        round_best: &Candidate,
        added: usize,
        freeze_solved: bool,
        generation: usize,
        evaluator: &mut FitnessEvaluator<'_>,
    ) -> HallOfFame {
        // Frozen rounds only build on the exact round best
        let mut eligible: Vec<&Candidate> = hall
            .get_all()
            .iter()
            .filter(|c| !freeze_solved || c.genes == round_best.genes)
            .collect();
        if eligible.is_empty() {
            eligible.push(round_best);
        }

        let mut keys = HashSet::new();
        let mut seeds = Vec::new();
        let max_attempts = eligible.len() + MIN_RETAINED * PADDING_ATTEMPTS;
        for attempt in 0..max_attempts {
            // Every eligible candidate is extended once before any padding
            if attempt >= eligible.len() && keys.len() >= MIN_RETAINED {
                break;
            }
            let parent = eligible[attempt % eligible.len()];
            let seed = Self::extend(engine, evaluator, parent, added, generation);
            if keys.insert(seed.dedup_key()) {
                seeds.push(seed);
            }
        }

        sort_by_rank(&mut seeds);
        let beating = seeds
            .iter()
            .filter(|s| s.fitness() < round_best.fitness())
            .count();
        seeds.truncate(beating.max(MIN_RETAINED));
        log::debug!(
            "Seeded next round with {} candidates, {} beating {}",
            seeds.len(),
            beating,
            round_best.fitness()
        );

        HallOfFame::from_candidates(seeds)
    }

    fn extend(
        engine: &mut EvolutionEngine,
        evaluator: &mut FitnessEvaluator<'_>,
        parent: &Candidate,
        added: usize,
        generation: usize,
    ) -> Candidate {
        let mut genes = parent.genes.clone();
        genes.extend(engine.rng_mut().random_genes(added));
        let mut seed = Candidate::new(genes, parent.strategy, generation);
        evaluator.ensure_scored(&mut seed);
        seed
    }
}

/// Whether `round` is more than the tolerated percentage worse than `best`
fn regressed(round: Fitness, best: Fitness) -> bool {
    round as u128 * 100 > best as u128 * (100 + REGRESSION_TOLERANCE_PERCENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regression_guard_threshold() {
        assert!(!regressed(105, 100));
        assert!(regressed(106, 100));
        assert!(regressed(1, 0));
        assert!(!regressed(0, 0));
    }
}
