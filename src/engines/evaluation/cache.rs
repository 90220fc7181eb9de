use crate::types::FitnessResult;
use std::collections::HashMap;

/// Memoized fitness results keyed by decoded sequence
pub struct FitnessCache {
    data: HashMap<String, FitnessResult>,
    capacity: usize,
}

impl FitnessCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            data: HashMap::with_capacity(capacity.min(1 << 16)),
            capacity: capacity.max(1),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FitnessResult> {
        self.data.get(key)
    }

    pub fn set(&mut self, key: String, value: FitnessResult) {
        if self.data.len() >= self.capacity {
            // A simple eviction strategy: clear the cache when full.
            self.data.clear();
        }
        self.data.insert(key, value);
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_clears_when_full() {
        let mut cache = FitnessCache::new(2);
        cache.set("a".to_string(), FitnessResult::new(1));
        cache.set("b".to_string(), FitnessResult::new(2));
        assert_eq!(cache.len(), 2);

        cache.set("c".to_string(), FitnessResult::new(3));
        assert_eq!(cache.len(), 1);
        assert!(cache.get("a").is_none());
        assert_eq!(cache.get("c").map(|r| r.value), Some(3));
    }
}
