use std::collections::{HashSet, VecDeque};

use crate::config::SolverConfig;
use crate::engines::evaluation::FitnessEvaluator;
use crate::engines::generation::{
    candidate::{sort_by_rank, top_distinct, Candidate},
    gene_rng::GeneRng,
    hall_of_fame::HallOfFame,
    population::PopulationPair,
    progress::ProgressCallback,
    registry::StrategyRegistry,
    strategies::GenerationContext,
};
use crate::types::StopReason;

/// Parents handed to a strategy are capped at this many
pub const MAX_PARENTS: usize = 50;

/// Sliding mutation intensity lost per generation without survivors
pub const SLIDING_MUTATION_DECAY: f64 = 0.001;

/// Improvement intervals averaged for the generation budget
const INTERVAL_WINDOW: usize = 10;

/// Shape of one loop invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundParams {
    /// Number of genes per candidate
    pub length: usize,
    /// Genes before this index are never changed by a strategy
    pub freeze_boundary: usize,
}

#[derive(Debug, Clone)]
pub struct LoopOutcome {
    pub best: Candidate,
    pub stop_reason: StopReason,
    pub generations: usize,
}

/// Termination bookkeeping of one invocation
struct Counters {
    stagnation: usize,
    since_improvement: usize,
    budget: usize,
    intervals: VecDeque<usize>,
}

impl Counters {
    fn new(config: &SolverConfig) -> Self {
        Self {
            stagnation: 0,
            since_improvement: 0,
            budget: config.max_generations_without_improvement,
            intervals: VecDeque::with_capacity(INTERVAL_WINDOW),
        }
    }

    /// An improvement closes the current interval and re-derives the budget
    fn record_improvement(&mut self, stagnation_limit: usize) {
        if self.intervals.len() == INTERVAL_WINDOW {
            self.intervals.pop_front();
        }
        self.intervals.push_back(self.since_improvement + 1);

        let mean = self.intervals.iter().sum::<usize>() as f64 / self.intervals.len() as f64;
        self.budget = ((mean * 1.5).ceil() as usize).max(stagnation_limit);
        self.stagnation = 0;
        self.since_improvement = 0;
    }
}

/// The inner generational loop. Owns the strategy registry, the seeded random
/// source and the sliding mutation intensity for the whole search; everything
/// that changes per invocation is passed in explicitly.
pub struct EvolutionEngine {
    config: SolverConfig,
    registry: StrategyRegistry,
    rng: GeneRng,
    sliding_mutation: f64,
}

impl EvolutionEngine {
    pub fn new(config: SolverConfig, registry: StrategyRegistry, rng: GeneRng) -> Self {
        let sliding_mutation = config.mutation_rate;
        Self {
            config,
            registry,
            rng,
            sliding_mutation,
        }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    pub fn rng_mut(&mut self) -> &mut GeneRng {
        &mut self.rng
    }

    pub fn sliding_mutation(&self) -> f64 {
        self.sliding_mutation
    }

    /// Run generations until an optimal candidate, stagnation, or an exhausted
    /// budget. `generation` is the run-wide counter and keeps counting across
    /// invocations.
    pub fn run(
        &mut self,
        params: RoundParams,
        population: &mut PopulationPair,
        hall: &mut HallOfFame,
        generation: &mut usize,
        evaluator: &mut FitnessEvaluator<'_>,
        observer: &mut dyn ProgressCallback,
    ) -> LoopOutcome {
        evaluator.reset_round();
        self.sliding_mutation = self.config.mutation_rate;

        let stagnation_limit = self.config.stagnation_limit();
        let mut counters = Counters::new(&self.config);
        let mut best = hall.best().cloned().unwrap_or_else(Candidate::worst);
        let first_generation = *generation;

        self.seed_population(params, population, hall, *generation + 1);

        let stop_reason = loop {
            *generation += 1;

            self.evaluate_population(population, evaluator);
            sort_by_rank(population.current_mut());

            let survivors = self.select_survivors(population.current(), hall, *generation);
            log::debug!(
                "Generation {}: {} survivors, threshold {}, sliding mutation {:.3}",
                generation,
                survivors.len(),
                hall.worst_acceptable(),
                self.sliding_mutation
            );

            if survivors.is_empty() {
                counters.stagnation += 1;
                counters.since_improvement += 1;
                self.sliding_mutation = (self.sliding_mutation - SLIDING_MUTATION_DECAY).max(0.0);
                if counters.stagnation > stagnation_limit {
                    break StopReason::Stagnation;
                }
            } else {
                hall.merge(survivors);
                self.registry.rebalance(hall.get_all());

                match hall.best() {
                    Some(top) if top.fitness() < best.fitness() => {
                        best = top.clone();
                        self.report(&best, *generation, observer);
                        counters.record_improvement(stagnation_limit);
                        self.sliding_mutation = self.config.mutation_rate;
                        log::debug!("Generation budget now {}", counters.budget);
                    }
                    _ => counters.since_improvement += 1,
                }
            }

            // A zero anywhere in the population ends the loop, even when its
            // key was already retained
            if let Some(top) = population.current().first().filter(|c| c.fitness() == 0) {
                if best.fitness() > 0 {
                    best = top.clone();
                    self.report(&best, *generation, observer);
                }
                break StopReason::Optimal;
            }

            if counters.since_improvement > counters.budget {
                break StopReason::BudgetExhausted;
            }

            self.create_next_generation(params, population, hall, *generation);
            population.swap();
        };

        log::info!(
            "Stopped after generation {} ({:?}); best fitness {}",
            generation,
            stop_reason,
            best.fitness()
        );

        LoopOutcome {
            best,
            stop_reason,
            generations: *generation - first_generation,
        }
    }

    fn report(&self, best: &Candidate, generation: usize, observer: &mut dyn ProgressCallback) {
        observer.on_improvement(
            generation,
            best.fitness(),
            &best.sequence(),
            self.registry.description(best.strategy),
        );
    }

    /// Retained candidates first, then strategy output up to capacity
    fn seed_population(
        &mut self,
        params: RoundParams,
        population: &mut PopulationPair,
        hall: &HallOfFame,
        generation: usize,
    ) {
        let capacity = population.capacity();
        let parents = hall.top_distinct(MAX_PARENTS);

        let current = population.current_mut();
        current.clear();
        current.extend(hall.get_all().iter().take(capacity).cloned());
        while current.len() < capacity {
            current.push(self.spawn(&parents, params, generation));
        }
    }

    /// Every unscored candidate is scored before anything compares it
    fn evaluate_population(&mut self, population: &mut PopulationPair, evaluator: &mut FitnessEvaluator<'_>) {
        for candidate in population.current_mut().iter_mut() {
            evaluator.ensure_scored(candidate);
        }
        debug_assert!(population.current().iter().all(Candidate::is_scored));
    }

    /// Candidates at least as good as the median retained entry, not yet
    /// retained, best first, capped per generation
    fn select_survivors(&self, ranked: &[Candidate], hall: &HallOfFame, generation: usize) -> Vec<Candidate> {
        let threshold = hall.worst_acceptable();
        let mut batch_keys = HashSet::new();

        ranked
            .iter()
            .filter(|c| c.fitness() <= threshold)
            .filter(|c| {
                let key = c.dedup_key();
                !hall.contains_key(&key) && batch_keys.insert(key)
            })
            .take(self.config.survivor_cap())
            .map(|c| {
                let mut survivor = c.clone();
                survivor.generation = generation;
                survivor
            })
            .collect()
    }

    /// Elites of the ranked current generation start the next one. Retained
    /// candidates are re-injected into the current tail, then strategy
    /// output fills the rest of the next buffer from the current top ranks.
    fn create_next_generation(
        &mut self,
        params: RoundParams,
        population: &mut PopulationPair,
        hall: &HallOfFame,
        generation: usize,
    ) {
        let capacity = population.capacity();
        let elite_count = self.config.elite_count().min(capacity);

        let (current, next) = population.split();
        next.clear();
        next.extend(current.iter().take(elite_count).cloned());

        // Last slot first; the elite region is never overwritten
        let reinjected = hall.sample(&mut self.rng, elite_count);
        for (slot, candidate) in (elite_count..current.len()).rev().zip(reinjected) {
            current[slot] = candidate;
        }

        let parents = top_distinct(current, MAX_PARENTS);
        while next.len() < capacity {
            next.push(self.spawn(&parents, params, generation + 1));
        }
    }

    fn spawn(&mut self, parents: &[Candidate], params: RoundParams, generation: usize) -> Candidate {
        let index = self.registry.select(&mut self.rng);
        let mut ctx = GenerationContext::new(
            parents,
            params.length,
            self.config.unit_of_meaning_size,
            self.sliding_mutation,
            params.freeze_boundary,
            &mut self.rng,
        );
        let genes = self.registry.strategy(index).generate(&mut ctx);
        Candidate::new(genes, index, generation)
    }
}
