use super::cache::FitnessCache;
use crate::engines::generation::Candidate;
use crate::types::FitnessResult;

/// Caller-supplied fitness function over a decoded sequence
pub type FitnessFn<'a> = dyn FnMut(&str) -> FitnessResult + 'a;

const CACHE_CAPACITY: usize = 1 << 20;

/// Wraps the fitness callback with per-round memoization
pub struct FitnessEvaluator<'a> {
    fitness: &'a mut FitnessFn<'a>,
    cache: FitnessCache,
    evaluations: usize,
}

impl<'a> FitnessEvaluator<'a> {
    pub fn new(fitness: &'a mut FitnessFn<'a>) -> Self {
        Self {
            fitness,
            cache: FitnessCache::new(CACHE_CAPACITY),
            evaluations: 0,
        }
    }

    /// Score a sequence, reusing an earlier result for the same sequence
    pub fn evaluate(&mut self, sequence: &str) -> FitnessResult {
        if let Some(result) = self.cache.get(sequence) {
            return result.clone();
        }
        let result = (self.fitness)(sequence);
        self.evaluations += 1;
        self.cache.set(sequence.to_string(), result.clone());
        result
    }

    /// Assign fitness to the candidate unless it already carries one
    pub fn ensure_scored(&mut self, candidate: &mut Candidate) {
        if candidate.is_scored() {
            return;
        }
        let result = self.evaluate(&candidate.sequence());
        candidate.assign_fitness(result);
    }

    /// Forget memoized results; called when a new round starts
    pub fn reset_round(&mut self) {
        self.cache.clear();
    }

    /// Number of times the callback itself ran
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }
}
