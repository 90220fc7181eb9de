use std::sync::Arc;

use super::candidate::Candidate;
use super::gene_rng::GeneRng;
use super::strategies::{GeneticStrategy, RandomGenes};

/// A strategy with its current selection weight, in percent
pub struct StrategyEntry {
    pub weight: f64,
    strategy: Arc<dyn GeneticStrategy>,
}

impl StrategyEntry {
    pub fn strategy(&self) -> &Arc<dyn GeneticStrategy> {
        &self.strategy
    }
}

/// Ordered strategies whose weights always sum to 100
pub struct StrategyRegistry {
    entries: Vec<StrategyEntry>,
    cumulative: Vec<f64>,
    minimum_percentage: f64,
}

impl StrategyRegistry {
    pub fn new(mut strategies: Vec<Arc<dyn GeneticStrategy>>, minimum_percentage: f64) -> Self {
        if strategies.is_empty() {
            log::warn!("No generation strategies supplied, falling back to random genes");
            strategies.push(Arc::new(RandomGenes));
        }
        // Stable: equal keys keep registration order
        strategies.sort_by_key(|s| s.order());

        let count = strategies.len();
        let ceiling = 100.0 / count as f64;
        if minimum_percentage > ceiling {
            log::warn!(
                "Minimum strategy percentage {} clamped to {:.3} for {} strategies",
                minimum_percentage,
                ceiling,
                count
            );
        }

        let mut registry = Self {
            entries: strategies
                .into_iter()
                .map(|strategy| StrategyEntry {
                    weight: ceiling,
                    strategy,
                })
                .collect(),
            cumulative: Vec::with_capacity(count),
            minimum_percentage: minimum_percentage.clamp(0.0, ceiling),
        };
        registry.rebuild_cumulative();
        registry
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[StrategyEntry] {
        &self.entries
    }

    pub fn weights(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.weight).collect()
    }

    pub fn minimum_percentage(&self) -> f64 {
        self.minimum_percentage
    }

    pub fn strategy(&self, index: usize) -> &Arc<dyn GeneticStrategy> {
        &self.entries[index.min(self.entries.len() - 1)].strategy
    }

    pub fn description(&self, index: usize) -> &'static str {
        self.strategy(index).description()
    }

    /// Weighted draw; each strategy owns a contiguous slice of `[0, 100)` in
    /// registry order
    pub fn select(&self, rng: &mut GeneRng) -> usize {
        let draw = rng.percent();
        self.cumulative
            .iter()
            .position(|&bound| draw < bound)
            .unwrap_or(self.entries.len() - 1)
    }

    /// Re-weight strategies by how many retained candidates each produced
    pub fn rebalance(&mut self, retained: &[Candidate]) {
        let mut counts = vec![0usize; self.entries.len()];
        for candidate in retained {
            if let Some(count) = counts.get_mut(candidate.strategy) {
                *count += 1;
            }
        }

        let weights = adaptive_weights(&counts, self.minimum_percentage);
        for (entry, weight) in self.entries.iter_mut().zip(weights) {
            entry.weight = weight;
        }
        self.rebuild_cumulative();

        log::debug!(
            "Strategy weights: {}",
            self.entries
                .iter()
                .map(|e| format!("{}={:.1}", e.strategy.alias(), e.weight))
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    fn rebuild_cumulative(&mut self) {
        self.cumulative.clear();
        let mut running = 0.0;
        for entry in &self.entries {
            running += entry.weight;
            self.cumulative.push(running);
        }
    }
}

/// Shares of 100 proportional to `counts`, with no share below `floor`.
///
/// Strategies whose proportional share would fall under the floor are pinned to
/// it and the rest of the mass is split again among the others, until no share
/// is under the floor. With nothing attributed the weights are equal.
pub fn adaptive_weights(counts: &[usize], floor: f64) -> Vec<f64> {
    let n = counts.len();
    if n == 0 {
        return Vec::new();
    }
    let floor = floor.clamp(0.0, 100.0 / n as f64);
    let mut pinned = vec![false; n];

    loop {
        let free: Vec<usize> = (0..n).filter(|&i| !pinned[i]).collect();
        if free.is_empty() {
            return vec![100.0 / n as f64; n];
        }
        let remaining = 100.0 - floor * (n - free.len()) as f64;
        let total: usize = free.iter().map(|&i| counts[i]).sum();

        let share = |i: usize| {
            if total == 0 {
                remaining / free.len() as f64
            } else {
                remaining * counts[i] as f64 / total as f64
            }
        };

        let under: Vec<usize> = free.iter().copied().filter(|&i| share(i) < floor).collect();
        if under.is_empty() {
            return (0..n)
                .map(|i| if pinned[i] { floor } else { share(i) })
                .collect();
        }
        for i in under {
            pinned[i] = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::generation::strategies::{builtin, Crossover, MutateGenes};

    fn total(weights: &[f64]) -> f64 {
        weights.iter().sum()
    }

    #[test]
    fn test_empty_registry_falls_back_to_random() {
        let registry = StrategyRegistry::new(Vec::new(), 2.0);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.strategy(0).alias(), "random");
        assert_eq!(registry.weights(), vec![100.0]);
    }

    #[test]
    fn test_entries_keep_registration_order() {
        let registry = StrategyRegistry::new(builtin(), 2.0);
        let aliases: Vec<&str> = registry.entries().iter().map(|e| e.strategy().alias()).collect();
        let expected: Vec<&str> = builtin().iter().map(|s| s.alias()).collect();
        assert_eq!(aliases, expected);
    }

    #[test]
    fn test_initial_weights_are_equal() {
        let registry = StrategyRegistry::new(builtin(), 2.0);
        let weights = registry.weights();
        assert_eq!(weights.len(), 6);
        assert!((total(&weights) - 100.0).abs() < 1e-9);
        assert!(weights.iter().all(|w| (w - 100.0 / 6.0).abs() < 1e-9));
    }

    #[test]
    fn test_adaptive_weights_respect_floor() {
        let weights = adaptive_weights(&[90, 10, 0], 2.0);
        assert!((total(&weights) - 100.0).abs() < 1e-9);
        assert_eq!(weights[2], 2.0);
        assert!((weights[0] - 88.2).abs() < 1e-9);
        assert!((weights[1] - 9.8).abs() < 1e-9);
    }

    #[test]
    fn test_adaptive_weights_cascade_pinning() {
        // 1 of 100 would get ~1% before pinning; it must end on the floor
        let weights = adaptive_weights(&[99, 1, 0], 5.0);
        assert_eq!(weights[1], 5.0);
        assert_eq!(weights[2], 5.0);
        assert!((weights[0] - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_adaptive_weights_without_attribution() {
        let weights = adaptive_weights(&[0, 0, 0, 0], 2.0);
        assert_eq!(weights, vec![25.0; 4]);
    }

    #[test]
    fn test_floor_clamped_to_even_split() {
        let registry = StrategyRegistry::new(builtin(), 40.0);
        assert!((registry.minimum_percentage() - 100.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_rebalance_counts_provenance() {
        let strategies: Vec<Arc<dyn GeneticStrategy>> =
            vec![Arc::new(RandomGenes), Arc::new(Crossover), Arc::new(MutateGenes)];
        let mut registry = StrategyRegistry::new(strategies, 2.0);
        let retained: Vec<Candidate> = (0..10)
            .map(|i| Candidate::new(vec!['0'], if i < 8 { 0 } else { 1 }, i))
            .collect();

        registry.rebalance(&retained);
        let weights = registry.weights();
        assert!((total(&weights) - 100.0).abs() < 1e-9);
        assert_eq!(weights[2], 2.0);
        assert!(weights[0] > weights[1]);
    }

    #[test]
    fn test_select_follows_weights() {
        let strategies: Vec<Arc<dyn GeneticStrategy>> =
            vec![Arc::new(RandomGenes), Arc::new(Crossover)];
        let mut registry = StrategyRegistry::new(strategies, 0.0);
        let retained: Vec<Candidate> = (0..4).map(|i| Candidate::new(vec!['0'], 1, i)).collect();
        registry.rebalance(&retained);
        assert_eq!(registry.weights(), vec![0.0, 100.0]);

        let mut rng = GeneRng::new(7, "01");
        assert!((0..200).all(|_| registry.select(&mut rng) == 1));
    }
}
