use super::candidate::Candidate;

/// Two same-capacity generation buffers used ping-pong style
pub struct PopulationPair {
    current: Vec<Candidate>,
    next: Vec<Candidate>,
    capacity: usize,
}

impl PopulationPair {
    pub fn new(capacity: usize) -> Self {
        Self {
            current: Vec::with_capacity(capacity),
            next: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn current(&self) -> &[Candidate] {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut Vec<Candidate> {
        &mut self.current
    }

    /// Read the current generation while writing the next one
    pub fn split(&mut self) -> (&mut [Candidate], &mut Vec<Candidate>) {
        (self.current.as_mut_slice(), &mut self.next)
    }

    /// Make the next generation current; the old one becomes scratch space
    pub fn swap(&mut self) {
        debug_assert_eq!(self.next.len(), self.capacity);
        std::mem::swap(&mut self.current, &mut self.next);
        self.next.clear();
    }

    pub fn is_full(&self) -> bool {
        self.current.len() == self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_exchanges_buffers_without_copying() {
        let mut pair = PopulationPair::new(2);
        pair.current_mut().push(Candidate::new(vec!['a'], 0, 0));
        pair.current_mut().push(Candidate::new(vec!['b'], 0, 0));

        let (current, next) = pair.split();
        assert_ne!(current.as_ptr(), next.as_ptr());
        let old_next = next.as_ptr();
        next.extend(current.iter().rev().cloned());

        pair.swap();
        assert_eq!(pair.current().as_ptr(), old_next);
        assert_eq!(pair.current()[0].sequence(), "b");
        assert!(pair.is_full());
    }
}
