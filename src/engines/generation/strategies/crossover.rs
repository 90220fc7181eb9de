use super::{GenerationContext, GeneticStrategy};

/// Single-point crossover of two parents
pub struct Crossover;

impl GeneticStrategy for Crossover {
    fn alias(&self) -> &'static str {
        "crossover"
    }

    fn description(&self) -> &'static str {
        "crossover"
    }

    fn generate(&self, ctx: &mut GenerationContext<'_>) -> Vec<char> {
        let parents = ctx.parents;
        if parents.is_empty() {
            return ctx.random_fill();
        }

        let first = ctx.next_index(parents.len());
        let mut second = ctx.next_index(parents.len());
        if parents.len() > 1 && second == first {
            second = (first + 1) % parents.len();
        }

        let mut child = ctx.conform(&parents[first]);
        let donor = ctx.conform(&parents[second]);

        let span = ctx.mutable_span();
        if span.is_empty() {
            return child;
        }
        // Keep at least one gene of the first parent inside the span when possible
        let point = if span.len() > 1 {
            span.start + 1 + ctx.next_index(span.len() - 1)
        } else {
            span.start
        };
        child[point..].copy_from_slice(&donor[point..]);
        child
    }
}
