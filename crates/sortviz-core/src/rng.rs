#![forbid(unsafe_code)]

//! Seeded generation of bar heights.

use std::time::{SystemTime, UNIX_EPOCH};

/// Small LCG used for shuffles. Deterministic for a given seed, which makes
/// shuffles reproducible from the command line and in tests.
#[derive(Debug, Clone)]
pub struct ShuffleRng {
    state: u64,
}

impl ShuffleRng {
    /// Create a generator from an explicit seed.
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed.wrapping_add(1),
        }
    }

    /// Create a generator seeded from the wall clock.
    pub fn from_clock() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x5EED);
        Self::new(nanos)
    }

    /// Next raw 64-bit output.
    pub fn next_u64(&mut self) -> u64 {
        // Knuth's MMIX multiplier and increment
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    /// Uniform-ish value in `[min, max)`. Returns `min` for an empty range.
    pub fn next_in(&mut self, min: u32, max: u32) -> u32 {
        if max <= min {
            return min;
        }
        // High bits of an LCG are the well-mixed ones.
        let span = u64::from(max - min);
        min + ((self.next_u64() >> 32) % span) as u32
    }

    /// Fill a new vector of `len` values drawn from `[min, max)`.
    pub fn values(&mut self, len: usize, min: u32, max: u32) -> Vec<u32> {
        (0..len).map(|_| self.next_in(min, max)).collect()
    }
}
