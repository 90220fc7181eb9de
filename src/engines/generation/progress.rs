use crate::types::Fitness;

/// Observer of search progress; has no effect on the search itself
pub trait ProgressCallback: Send {
    /// A new best candidate was found. `generation` is 1-based.
    fn on_improvement(&mut self, generation: usize, fitness: Fitness, sequence: &str, strategy: &str);

    /// A hill-climbing round finished
    fn on_round_complete(&mut self, _length: usize, _best_fitness: Fitness) {}
}

/// Discards every report
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_improvement(&mut self, _generation: usize, _fitness: Fitness, _sequence: &str, _strategy: &str) {}
}

pub struct ConsoleProgressCallback;

impl ProgressCallback for ConsoleProgressCallback {
    fn on_improvement(&mut self, generation: usize, fitness: Fitness, sequence: &str, strategy: &str) {
        log::info!(
            "Generation {}: fitness {} [{}] via {}",
            generation, fitness, sequence, strategy
        );
    }

    fn on_round_complete(&mut self, length: usize, best_fitness: Fitness) {
        log::info!("Round at length {} complete. Best fitness: {}", length, best_fitness);
    }
}

// For handing progress to another thread
pub struct ChannelProgressCallback {
    sender: std::sync::mpsc::Sender<ProgressMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressMessage {
    Improvement { generation: usize, fitness: Fitness, sequence: String, strategy: String },
    RoundComplete { length: usize, best_fitness: Fitness },
}

impl ChannelProgressCallback {
    pub fn new(sender: std::sync::mpsc::Sender<ProgressMessage>) -> Self {
        Self { sender }
    }
}

impl ProgressCallback for ChannelProgressCallback {
    fn on_improvement(&mut self, generation: usize, fitness: Fitness, sequence: &str, strategy: &str) {
        let _ = self.sender.send(ProgressMessage::Improvement {
            generation,
            fitness,
            sequence: sequence.to_string(),
            strategy: strategy.to_string(),
        });
    }

    fn on_round_complete(&mut self, length: usize, best_fitness: Fitness) {
        let _ = self.sender.send(ProgressMessage::RoundComplete { length, best_fitness });
    }
}
