// Genetic search for fixed-length strings over an alphabet.
//
// A caller supplies the target length, the alphabet and a fitness function
// (lower is better, zero is optimal). The `Solver` evolves a population with
// a weighted mix of generation strategies whose weights adapt to which
// strategies keep producing retained candidates. With hill climbing enabled
// the sequence is grown one unit of meaning per round.

pub mod config;
pub mod engines;
pub mod error;
pub mod solver;
pub mod types;
pub mod utils;

pub use crate::config::{AppConfig, ConfigManager, SolverConfig};
pub use engines::generation::strategies;
pub use engines::generation::{Candidate, ConsoleProgressCallback, GeneticStrategy, ProgressCallback};
pub use error::{Result, SolverError};
pub use solver::Solver;
pub use types::{Fitness, FitnessResult, RoundSummary, SearchOutcome, StopReason};
