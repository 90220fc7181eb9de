use crate::types::{Fitness, FitnessResult, WORST_FITNESS};
use std::cmp::Ordering;
use std::collections::HashSet;

/// A gene sequence with its cached fitness and provenance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub genes: Vec<char>,
    fitness: Option<Fitness>,
    unique_key: Option<String>,
    unit_hint: Option<usize>,
    /// Generation at which this candidate was created or last retained
    pub generation: usize,
    /// Registry index of the strategy that produced the genes
    pub strategy: usize,
}

impl Candidate {
    pub fn new(genes: Vec<char>, strategy: usize, generation: usize) -> Self {
        Self {
            genes,
            fitness: None,
            unique_key: None,
            unit_hint: None,
            generation,
            strategy,
        }
    }

    /// Placeholder that loses every comparison
    pub fn worst() -> Self {
        Self::new(Vec::new(), 0, 0)
    }

    pub fn sequence(&self) -> String {
        self.genes.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn is_scored(&self) -> bool {
        self.fitness.is_some()
    }

    /// Fitness value; unscored candidates rank as the worst possible
    pub fn fitness(&self) -> Fitness {
        self.fitness.unwrap_or(WORST_FITNESS)
    }

    pub fn unit_hint(&self) -> Option<usize> {
        self.unit_hint
    }

    pub fn assign_fitness(&mut self, result: FitnessResult) {
        self.fitness = Some(result.value);
        self.unique_key = result.unique_key;
        self.unit_hint = result.unit_of_meaning_index_hint;
    }

    /// Key for duplicate detection: the fitness-defined key, else the sequence
    pub fn dedup_key(&self) -> String {
        match &self.unique_key {
            Some(key) => key.clone(),
            None => self.sequence(),
        }
    }

    /// Ascending fitness, then most evolved first
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        self.fitness()
            .cmp(&other.fitness())
            .then_with(|| other.generation.cmp(&self.generation))
    }
}

/// Sort candidates best first
pub fn sort_by_rank(candidates: &mut [Candidate]) {
    candidates.sort_by(Candidate::rank_cmp);
}

/// Up to `k` best-ranked candidates with distinct sequences, leaving the
/// input order alone
pub fn top_distinct(candidates: &[Candidate], k: usize) -> Vec<Candidate> {
    let mut ranked: Vec<&Candidate> = candidates.iter().collect();
    ranked.sort_by(|a, b| a.rank_cmp(b));

    let mut seen = HashSet::new();
    ranked
        .into_iter()
        .filter(|c| seen.insert(c.genes.clone()))
        .take(k)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(genes: &str, fitness: Fitness, generation: usize) -> Candidate {
        let mut candidate = Candidate::new(genes.chars().collect(), 0, generation);
        candidate.assign_fitness(FitnessResult::new(fitness));
        candidate
    }

    #[test]
    fn test_rank_prefers_lower_fitness_then_later_generation() {
        let mut candidates = vec![
            scored("aa", 3, 9),
            scored("bb", 1, 2),
            scored("cc", 1, 7),
        ];
        sort_by_rank(&mut candidates);
        let order: Vec<String> = candidates.iter().map(Candidate::sequence).collect();
        assert_eq!(order, vec!["cc", "bb", "aa"]);
    }

    #[test]
    fn test_unscored_ranks_last() {
        let unscored = Candidate::new(vec!['x'], 0, 100);
        assert!(!unscored.is_scored());
        assert_eq!(unscored.rank_cmp(&scored("y", 1_000, 0)), Ordering::Greater);
    }

    #[test]
    fn test_dedup_key_falls_back_to_sequence() {
        let mut candidate = scored("abc", 4, 0);
        assert_eq!(candidate.dedup_key(), "abc");
        candidate.assign_fitness(FitnessResult::new(4).with_unique_key("class-1"));
        assert_eq!(candidate.dedup_key(), "class-1");
    }

    #[test]
    fn test_top_distinct_ranks_without_reordering_input() {
        let candidates = vec![
            scored("aa", 5, 0),
            scored("bb", 1, 3),
            scored("bb", 1, 8),
            scored("cc", 1, 6),
        ];
        let top = top_distinct(&candidates, 2);
        let order: Vec<(String, usize)> = top.iter().map(|c| (c.sequence(), c.generation)).collect();
        assert_eq!(order, vec![("bb".to_string(), 8), ("cc".to_string(), 6)]);
        assert_eq!(candidates[0].sequence(), "aa");
    }
}
