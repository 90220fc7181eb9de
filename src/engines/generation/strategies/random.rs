use super::{GenerationContext, GeneticStrategy};

/// Brand-new random genes
pub struct RandomGenes;

impl GeneticStrategy for RandomGenes {
    fn alias(&self) -> &'static str {
        "random"
    }

    fn description(&self) -> &'static str {
        "random genes"
    }

    fn generate(&self, ctx: &mut GenerationContext<'_>) -> Vec<char> {
        ctx.random_fill()
    }
}
