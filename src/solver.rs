use std::sync::Arc;

use crate::config::{ConfigSection, SolverConfig};
use crate::engines::evaluation::FitnessEvaluator;
use crate::engines::generation::{
    gene_rng::{clock_seed, GeneRng},
    Candidate, EvolutionEngine, GeneticStrategy, HallOfFame, HillClimber, NoProgress,
    PopulationPair, ProgressCallback, RoundParams, StrategyRegistry,
};
use crate::error::Result;
use crate::types::{FitnessResult, RoundSummary, SearchOutcome};

/// Top-level entry point: searches for the lowest-fitness sequence of a given
/// length over an alphabet.
///
/// ```no_run
/// use genesolver::{Solver, SolverConfig, strategies};
///
/// let target = "11110000";
/// let mut solver = Solver::new(SolverConfig::default())?
///     .with_strategies(strategies::builtin());
/// let best = solver.get_best(target.len(), "01", |genes: &str| {
///     genes.chars().zip(target.chars()).filter(|(a, b)| a != b).count() as u64
/// });
/// println!("{} ({})", best.sequence(), best.fitness());
/// # Ok::<(), genesolver::SolverError>(())
/// ```
pub struct Solver {
    config: SolverConfig,
    strategies: Vec<Arc<dyn GeneticStrategy>>,
    observer: Box<dyn ProgressCallback>,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            strategies: Vec::new(),
            observer: Box::new(NoProgress),
        })
    }

    /// Replace the strategy list; an empty list means random genes only
    pub fn with_strategies(mut self, strategies: Vec<Arc<dyn GeneticStrategy>>) -> Self {
        self.strategies = strategies;
        self
    }

    pub fn with_strategy(mut self, strategy: Arc<dyn GeneticStrategy>) -> Self {
        self.strategies.push(strategy);
        self
    }

    pub fn with_observer(mut self, observer: Box<dyn ProgressCallback>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Best candidate found
    pub fn get_best<F, R>(&mut self, length: usize, alphabet: &str, fitness: F) -> Candidate
    where
        F: FnMut(&str) -> R,
        R: Into<FitnessResult>,
    {
        self.search(length, alphabet, fitness).best
    }

    /// Run a full search and report everything it found
    pub fn search<F, R>(&mut self, length: usize, alphabet: &str, mut fitness: F) -> SearchOutcome
    where
        F: FnMut(&str) -> R,
        R: Into<FitnessResult>,
    {
        let seed = self.config.random_seed.unwrap_or_else(clock_seed);
        log::info!(
            "Searching {} genes over {} symbols with seed {}{}",
            length,
            alphabet.chars().count(),
            seed,
            if self.config.use_hill_climbing { " (hill climbing)" } else { "" }
        );

        let mut score = |genes: &str| -> FitnessResult { fitness(genes).into() };
        let mut evaluator = FitnessEvaluator::new(&mut score);

        if length == 0 || alphabet.is_empty() {
            let mut best = Candidate::new(Vec::new(), 0, 0);
            evaluator.ensure_scored(&mut best);
            return SearchOutcome {
                best,
                seed,
                generations: 0,
                evaluations: evaluator.evaluations(),
                rounds: Vec::new(),
            };
        }

        let registry = StrategyRegistry::new(self.strategies.clone(), self.config.minimum_strategy_percentage);
        let mut engine = EvolutionEngine::new(self.config.clone(), registry, GeneRng::new(seed, alphabet));
        let observer = self.observer.as_mut();
        let mut generation = 0;

        let (best, rounds) = if self.config.use_hill_climbing {
            let result = HillClimber::run(&mut engine, length, &mut generation, &mut evaluator, observer);
            (result.best, result.rounds)
        } else {
            let params = RoundParams {
                length,
                freeze_boundary: 0,
            };
            let mut population = PopulationPair::new(self.config.population_size);
            let mut hall = HallOfFame::new();
            let outcome = engine.run(params, &mut population, &mut hall, &mut generation, &mut evaluator, observer);
            let summary = RoundSummary {
                length,
                freeze_boundary: 0,
                best: outcome.best.clone(),
                stop_reason: outcome.stop_reason,
            };
            (outcome.best, vec![summary])
        };

        SearchOutcome {
            best,
            seed,
            generations: generation,
            evaluations: evaluator.evaluations(),
            rounds,
        }
    }
}
