//! Random number generation port
//!
//! Dice rolls go through this port so tests can substitute a fixed or mocked
//! sequence instead of `rand::thread_rng()`.

/// Source of uniformly distributed integers.
///
/// # Implementations
///
/// - `ThreadRngAdapter` in infrastructure (production)
/// - `MockRandomPort` via mockall (testing)
/// - `FixedRandomPort` for deterministic sequences
#[cfg_attr(test, mockall::automock)]
pub trait RandomPort: Send + Sync {
    /// Generate a random i32 in range [min, max] (inclusive on both ends)
    fn random_range(&self, min: i32, max: i32) -> i32;
}

/// Returns values from a provided sequence, cycling when exhausted.
///
/// Values outside the requested range are clamped into it.
#[cfg(test)]
#[derive(Debug)]
pub struct FixedRandomPort {
    values: Vec<i32>,
    index: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl FixedRandomPort {
    pub fn new(values: Vec<i32>) -> Self {
        Self {
            values,
            index: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn constant(value: i32) -> Self {
        Self::new(vec![value])
    }
}

#[cfg(test)]
impl RandomPort for FixedRandomPort {
    fn random_range(&self, min: i32, max: i32) -> i32 {
        if self.values.is_empty() {
            return min;
        }
        let idx = self
            .index
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.values[idx % self.values.len()].clamp(min, max)
    }
}
