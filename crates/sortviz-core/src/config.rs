#![forbid(unsafe_code)]

//! Fixed visualizer parameters.
//!
//! Defaults match the classic demo: 70 bars with heights in `[50, 450)`,
//! animated with a 10 ms pause per step. The binary may override them at
//! startup; nothing changes them while running.

use std::fmt;
use std::time::Duration;

use crate::rng::ShuffleRng;

/// Default number of bars.
pub const DEFAULT_LEN: usize = 70;
/// Default lowest bar height (inclusive).
pub const DEFAULT_MIN_VALUE: u32 = 50;
/// Default bar height bound (exclusive).
pub const DEFAULT_MAX_VALUE: u32 = 450;
/// Default pause after each step.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(10);
/// Largest accepted bar count.
pub const MAX_LEN: usize = 4096;

/// Parameters shared by the controller and the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualizerConfig {
    /// Number of bars.
    pub len: usize,
    /// Lowest generated height (inclusive).
    pub min_value: u32,
    /// Generated height bound (exclusive). Also the renderer's full scale.
    pub max_value: u32,
    /// Pause after each step.
    pub step_delay: Duration,
    /// Shuffle seed; `None` seeds from the clock.
    pub seed: Option<u64>,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            len: DEFAULT_LEN,
            min_value: DEFAULT_MIN_VALUE,
            max_value: DEFAULT_MAX_VALUE,
            step_delay: DEFAULT_STEP_DELAY,
            seed: None,
        }
    }
}

impl VisualizerConfig {
    /// Check the configuration for values the visualizer cannot honor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_value >= self.max_value {
            return Err(ConfigError::EmptyRange {
                min: self.min_value,
                max: self.max_value,
            });
        }
        if self.len > MAX_LEN {
            return Err(ConfigError::TooManyBars { len: self.len });
        }
        Ok(())
    }

    /// The generator shuffles draw from.
    pub fn rng(&self) -> ShuffleRng {
        match self.seed {
            Some(seed) => ShuffleRng::new(seed),
            None => ShuffleRng::from_clock(),
        }
    }
}

/// Rejected configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// `min_value >= max_value`: no height can be generated.
    EmptyRange { min: u32, max: u32 },
    /// More bars than [`MAX_LEN`].
    TooManyBars { len: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyRange { min, max } => {
                write!(f, "empty value range: min {min} must be below max {max}")
            }
            Self::TooManyBars { len } => {
                write!(f, "too many bars: {len} (limit {MAX_LEN})")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
