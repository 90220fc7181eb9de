use serde::{Deserialize, Serialize};

use crate::engines::generation::Candidate;

/// Fitness value: lower is better, zero is optimal
pub type Fitness = u64;

/// Fitness of a candidate that has never been scored
pub const WORST_FITNESS: Fitness = Fitness::MAX;

/// What a fitness function reports for one decoded sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitnessResult {
    pub value: Fitness,
    /// Equivalence key broader than exact sequence equality
    pub unique_key: Option<String>,
    /// Unit of meaning the fitness function would like changed next
    pub unit_of_meaning_index_hint: Option<usize>,
}

impl FitnessResult {
    pub fn new(value: Fitness) -> Self {
        Self {
            value,
            unique_key: None,
            unit_of_meaning_index_hint: None,
        }
    }

    pub fn with_unique_key(mut self, key: impl Into<String>) -> Self {
        self.unique_key = Some(key.into());
        self
    }

    pub fn with_unit_hint(mut self, index: usize) -> Self {
        self.unit_of_meaning_index_hint = Some(index);
        self
    }
}

impl From<Fitness> for FitnessResult {
    fn from(value: Fitness) -> Self {
        Self::new(value)
    }
}

/// Why one generational loop invocation stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    Optimal,
    Stagnation,
    BudgetExhausted,
}

/// Best candidate of one hill-climbing round
#[derive(Debug, Clone)]
pub struct RoundSummary {
    pub length: usize,
    pub freeze_boundary: usize,
    pub best: Candidate,
    pub stop_reason: StopReason,
}

/// Complete result of a search
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub best: Candidate,
    pub seed: u64,
    pub generations: usize,
    pub evaluations: usize,
    pub rounds: Vec<RoundSummary>,
}
