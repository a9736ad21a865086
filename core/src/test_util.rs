//! Deterministic helpers shared by the unit tests.

/// Simple LCG for deterministic, fast pseudo-random numbers.
pub struct FastRng(u64);

impl FastRng {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.0 >> 33) % max
    }

    pub fn next_bool(&mut self) -> bool {
        self.next(2) == 1
    }

    /// A weight on the `1 / precision` grid, in `[0, 1]`.
    pub fn next_weight(&mut self, precision: u32) -> f64 {
        self.next(precision as u64 + 1) as f64 / precision as f64
    }
}
