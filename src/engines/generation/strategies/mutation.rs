use super::{GenerationContext, GeneticStrategy};
use crate::utils::batching::{batch, unit_containing};

/// Replaces one gene, then keeps going with probability equal to the
/// sliding mutation intensity
pub struct MutateGenes;

impl GeneticStrategy for MutateGenes {
    fn alias(&self) -> &'static str {
        "mutate"
    }

    fn description(&self) -> &'static str {
        "mutate genes"
    }

    fn generate(&self, ctx: &mut GenerationContext<'_>) -> Vec<char> {
        let mut genes = ctx.parent_or_random();
        let limit = ctx.mutable_span().len();
        for _ in 0..limit {
            let Some(index) = ctx.mutable_index() else {
                break;
            };
            genes[index] = ctx.random_gene_except(genes[index]);
            if !ctx.chance(ctx.mutation_intensity) {
                break;
            }
        }
        genes
    }
}

/// Exchanges two genes
pub struct SwapGenes;

impl GeneticStrategy for SwapGenes {
    fn alias(&self) -> &'static str {
        "swap"
    }

    fn description(&self) -> &'static str {
        "swap two genes"
    }

    fn generate(&self, ctx: &mut GenerationContext<'_>) -> Vec<char> {
        let mut genes = ctx.parent_or_random();
        if let Some((a, b)) = distinct_pair(ctx) {
            genes.swap(a, b);
        }
        genes
    }
}

/// Reverses the genes between two positions, inclusive
pub struct ReverseSection;

impl GeneticStrategy for ReverseSection {
    fn alias(&self) -> &'static str {
        "reverse"
    }

    fn description(&self) -> &'static str {
        "reverse a section"
    }

    fn generate(&self, ctx: &mut GenerationContext<'_>) -> Vec<char> {
        let mut genes = ctx.parent_or_random();
        if let Some((a, b)) = distinct_pair(ctx) {
            genes[a.min(b)..=a.max(b)].reverse();
        }
        genes
    }
}

/// Regenerates one whole unit of meaning, preferring the unit the fitness
/// function hinted at
pub struct MutateUnitOfMeaning;

impl GeneticStrategy for MutateUnitOfMeaning {
    fn alias(&self) -> &'static str {
        "mutate_unit"
    }

    fn description(&self) -> &'static str {
        "mutate a unit of meaning"
    }

    fn generate(&self, ctx: &mut GenerationContext<'_>) -> Vec<char> {
        let parent = ctx.random_parent();
        let mut genes = match parent {
            Some(parent) => ctx.conform(parent),
            None => return ctx.random_fill(),
        };

        let units: Vec<_> = batch(ctx.length, ctx.unit_of_meaning)
            .into_iter()
            .filter(|unit| unit.start >= ctx.freeze_boundary)
            .collect();
        if units.is_empty() {
            return genes;
        }

        let first_unit = unit_containing(units[0].start, ctx.unit_of_meaning);
        let hinted = parent
            .and_then(|p| p.unit_hint())
            .filter(|&hint| hint >= first_unit && hint - first_unit < units.len());
        let chosen = match hinted {
            Some(hint) if ctx.chance(0.5) => hint - first_unit,
            _ => ctx.next_index(units.len()),
        };

        let unit = units[chosen].clone();
        let fresh = ctx.random_genes(unit.len());
        if fresh.len() == unit.len() {
            genes[unit].copy_from_slice(&fresh);
        }
        genes
    }
}

fn distinct_pair(ctx: &mut GenerationContext<'_>) -> Option<(usize, usize)> {
    let span = ctx.mutable_span();
    if span.len() < 2 {
        return None;
    }
    let a = span.start + ctx.next_index(span.len());
    let offset = 1 + ctx.next_index(span.len() - 1);
    let b = span.start + (a - span.start + offset) % span.len();
    Some((a, b))
}
