// Generation policies and the context they are invoked with.
//
// A policy turns a pool of best-known parents into the genes of one new
// candidate. Every policy leaves genes before the freeze boundary untouched
// and falls back to random generation when it has no parent to work from.

mod crossover;
mod mutation;
mod random;

use std::ops::Range;
use std::sync::Arc;

use super::candidate::Candidate;
use super::gene_rng::GeneRng;

pub use crossover::Crossover;
pub use mutation::{MutateGenes, MutateUnitOfMeaning, ReverseSection, SwapGenes};
pub use random::RandomGenes;

/// A pluggable reproduction policy
pub trait GeneticStrategy: Send + Sync {
    /// Stable identity used for provenance
    fn alias(&self) -> &'static str;

    /// Human-readable description shown in progress reports
    fn description(&self) -> &'static str;

    /// Tie-break key applied once when the registry is built; equal keys keep
    /// registration order
    fn order(&self) -> u32 {
        0
    }

    /// Produce the genes of one new candidate
    fn generate(&self, ctx: &mut GenerationContext<'_>) -> Vec<char>;
}

/// Everything a policy may use to build a candidate
pub struct GenerationContext<'a> {
    pub parents: &'a [Candidate],
    pub length: usize,
    pub unit_of_meaning: usize,
    pub mutation_intensity: f64,
    pub freeze_boundary: usize,
    rng: &'a mut GeneRng,
}

impl<'a> GenerationContext<'a> {
    pub fn new(
        parents: &'a [Candidate],
        length: usize,
        unit_of_meaning: usize,
        mutation_intensity: f64,
        freeze_boundary: usize,
        rng: &'a mut GeneRng,
    ) -> Self {
        Self {
            parents,
            length,
            unit_of_meaning: unit_of_meaning.max(1),
            mutation_intensity: mutation_intensity.clamp(0.0, 1.0),
            freeze_boundary: freeze_boundary.min(length),
            rng,
        }
    }

    /// Positions a policy is allowed to change
    pub fn mutable_span(&self) -> Range<usize> {
        self.freeze_boundary..self.length
    }

    pub fn random_genes(&mut self, count: usize) -> Vec<char> {
        self.rng.random_genes(count)
    }

    pub fn random_gene_except(&mut self, current: char) -> char {
        self.rng.random_gene_except(current)
    }

    pub fn next_index(&mut self, max: usize) -> usize {
        self.rng.next_index(max)
    }

    pub fn chance(&mut self, probability: f64) -> bool {
        self.rng.chance(probability)
    }

    /// Uniform index inside the mutable span, if it is nonempty
    pub fn mutable_index(&mut self) -> Option<usize> {
        let span = self.mutable_span();
        if span.is_empty() {
            return None;
        }
        Some(span.start + self.rng.next_index(span.len()))
    }

    pub fn random_parent(&mut self) -> Option<&'a Candidate> {
        let parents = self.parents;
        if parents.is_empty() {
            return None;
        }
        parents.get(self.rng.next_index(parents.len()))
    }

    /// Parent genes cut or padded with random symbols to the target length
    pub fn conform(&mut self, parent: &Candidate) -> Vec<char> {
        let mut genes: Vec<char> = parent.genes.iter().copied().take(self.length).collect();
        if genes.len() < self.length {
            let missing = self.length - genes.len();
            genes.extend(self.rng.random_genes(missing));
        }
        genes
    }

    /// Random genes after the freeze boundary; the frozen prefix comes from a
    /// parent when one exists
    pub fn random_fill(&mut self) -> Vec<char> {
        let mut prefix = Vec::new();
        if self.freeze_boundary > 0 {
            if let Some(parent) = self.random_parent() {
                prefix = self.conform(parent);
                prefix.truncate(self.freeze_boundary);
            }
        }
        let missing = self.length - prefix.len();
        let mut genes = prefix;
        genes.extend(self.rng.random_genes(missing));
        genes
    }

    /// Conformed genes of a random parent, or a random fill without parents
    pub fn parent_or_random(&mut self) -> Vec<char> {
        match self.random_parent() {
            Some(parent) => self.conform(parent),
            None => self.random_fill(),
        }
    }
}

/// All built-in policies in registration order
pub fn builtin() -> Vec<Arc<dyn GeneticStrategy>> {
    let strategies: Vec<Arc<dyn GeneticStrategy>> = vec![
        Arc::new(RandomGenes),
        Arc::new(Crossover),
        Arc::new(MutateGenes),
        Arc::new(SwapGenes),
        Arc::new(ReverseSection),
        Arc::new(MutateUnitOfMeaning),
    ];
    strategies
}
