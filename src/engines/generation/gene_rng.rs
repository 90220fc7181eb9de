use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};

/// The single seeded random source of a search, bound to its alphabet
pub struct GeneRng {
    rng: StdRng,
    alphabet: Vec<char>,
    seed: u64,
}

impl GeneRng {
    pub fn new(seed: u64, alphabet: &str) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            alphabet: alphabet.chars().collect(),
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    /// `count` symbols drawn uniformly from the alphabet
    pub fn random_genes(&mut self, count: usize) -> Vec<char> {
        if self.alphabet.is_empty() {
            return Vec::new();
        }
        (0..count)
            .map(|_| self.alphabet[self.rng.gen_range(0..self.alphabet.len())])
            .collect()
    }

    /// A symbol other than `current` when the alphabet allows one
    pub fn random_gene_except(&mut self, current: char) -> char {
        let others: Vec<char> = self.alphabet.iter().copied().filter(|&c| c != current).collect();
        if others.is_empty() {
            return current;
        }
        others[self.rng.gen_range(0..others.len())]
    }

    /// Uniform integer in `0..max`; zero when `max` is zero
    pub fn next_index(&mut self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        self.rng.gen_range(0..max)
    }

    pub fn chance(&mut self, probability: f64) -> bool {
        self.rng.gen::<f64>() < probability
    }

    /// Uniform draw in `[0, 100)`
    pub fn percent(&mut self) -> f64 {
        self.rng.gen::<f64>() * 100.0
    }

    /// `amount` distinct indices of `0..len`, in random order
    pub fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
        index::sample(&mut self.rng, len, amount.min(len)).into_vec()
    }
}

/// Seed used when the configuration does not fix one
pub fn clock_seed() -> u64 {
    chrono::Utc::now().timestamp_millis().unsigned_abs()
}
