pub mod candidate;
pub mod gene_rng;
pub mod strategies;
pub mod registry;
pub mod hall_of_fame;
pub mod population;
pub mod progress;
pub mod evolution_engine;
pub mod hill_climbing;

pub use candidate::Candidate;
pub use gene_rng::GeneRng;
pub use strategies::{GenerationContext, GeneticStrategy};
pub use registry::{StrategyEntry, StrategyRegistry, adaptive_weights};
pub use hall_of_fame::{HallOfFame, MIN_RETAINED};
pub use population::PopulationPair;
pub use progress::{
    ChannelProgressCallback, ConsoleProgressCallback, NoProgress, ProgressCallback, ProgressMessage,
};
pub use evolution_engine::{EvolutionEngine, LoopOutcome, RoundParams};
pub use hill_climbing::{HillClimbResult, HillClimber};
