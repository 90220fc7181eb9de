use super::candidate::{sort_by_rank, top_distinct, Candidate};
use super::gene_rng::GeneRng;
use crate::types::{Fitness, WORST_FITNESS};

use std::collections::HashSet;

/// Retained-bests never shrink below this many entries
pub const MIN_RETAINED: usize = 100;

/// Fitness-sorted archive of the best distinct candidates seen so far
#[derive(Debug, Clone, Default)]
pub struct HallOfFame {
    candidates: Vec<Candidate>,
    seen_keys: HashSet<String>,
}

impl HallOfFame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from scored candidates, dropping duplicates
    pub fn from_candidates(candidates: Vec<Candidate>) -> Self {
        let mut hall = Self::new();
        hall.merge(candidates);
        hall
    }

    /// Fitness of the median entry; anything worse is not worth keeping
    pub fn worst_acceptable(&self) -> Fitness {
        self.candidates
            .get(self.candidates.len() / 2)
            .map(Candidate::fitness)
            .unwrap_or(WORST_FITNESS)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.seen_keys.contains(key)
    }

    /// Add unseen candidates, then restore ordering and size. Returns how
    /// many were added.
    pub fn merge(&mut self, survivors: Vec<Candidate>) -> usize {
        let mut added = 0;
        for candidate in survivors {
            if self.seen_keys.insert(candidate.dedup_key()) {
                self.candidates.push(candidate);
                added += 1;
            }
        }
        if added > 0 {
            self.sort_and_trim();
        }
        added
    }

    fn sort_and_trim(&mut self) {
        sort_by_rank(&mut self.candidates);

        let best = self.candidates.first().map(Candidate::fitness);
        let ties = self
            .candidates
            .iter()
            .take_while(|c| Some(c.fitness()) == best)
            .count();
        let keep = MIN_RETAINED.max(ties);

        for removed in self.candidates.drain(keep.min(self.candidates.len())..) {
            self.seen_keys.remove(&removed.dedup_key());
        }
    }

    pub fn best(&self) -> Option<&Candidate> {
        self.candidates.first()
    }

    pub fn get_all(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Up to `k` top-ranked candidates with distinct sequences
    pub fn top_distinct(&self, k: usize) -> Vec<Candidate> {
        top_distinct(&self.candidates, k)
    }

    /// Random entries, without replacement
    pub fn sample(&self, rng: &mut GeneRng, amount: usize) -> Vec<Candidate> {
        rng.sample_indices(self.candidates.len(), amount)
            .into_iter()
            .map(|i| self.candidates[i].clone())
            .collect()
    }

    pub fn into_candidates(self) -> Vec<Candidate> {
        self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}
