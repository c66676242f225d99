#![forbid(unsafe_code)]

//! Step emission.
//!
//! Engines call [`Stepper::step`] after every mutation point that should be
//! visible. The production [`PacedStepper`] asks for a redraw and then sleeps
//! for the step delay; a cancelled run gets `Err(Cancelled)` back and the
//! engine unwinds with `?`, performing no further mutations.

use std::fmt;
use std::time::Duration;

use crate::array::SharedArray;
use crate::cancel::CancelToken;

/// What happened immediately before a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    /// A comparison that left the array unchanged.
    Compare,
    /// Two elements exchanged places.
    Swap,
    /// One element overwritten (shift, placement, or merge copy-back).
    Write,
}

/// The run was cancelled at a step boundary.
///
/// This is the normal way a superseded run stops; it is not a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("run cancelled")
    }
}

impl std::error::Error for Cancelled {}

/// Result of a step or of a whole engine run.
pub type StepResult = Result<(), Cancelled>;

/// Receives a step after every visible mutation.
pub trait Stepper {
    /// Observe one step. Returning `Err` stops the engine.
    fn step(&mut self, kind: StepKind) -> StepResult;
}

impl<S: Stepper + ?Sized> Stepper for &mut S {
    #[inline]
    fn step(&mut self, kind: StepKind) -> StepResult {
        (**self).step(kind)
    }
}

/// Per-run step counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Total steps emitted.
    pub steps: u64,
    /// Steps after a comparison with no mutation.
    pub compares: u64,
    /// Steps after a swap.
    pub swaps: u64,
    /// Steps after a single-element write.
    pub writes: u64,
}

impl StepStats {
    /// Count one step of the given kind.
    #[inline]
    pub fn record(&mut self, kind: StepKind) {
        self.steps += 1;
        match kind {
            StepKind::Compare => self.compares += 1,
            StepKind::Swap => self.swaps += 1,
            StepKind::Write => self.writes += 1,
        }
    }
}

/// The animation stepper: redraw, then sleep, checking for cancellation.
pub struct PacedStepper<F: FnMut()> {
    token: CancelToken,
    delay: Duration,
    on_step: F,
    stats: StepStats,
}

impl<F: FnMut()> PacedStepper<F> {
    /// Create a stepper that calls `on_step` (the redraw request) after each
    /// mutation and then waits `delay`.
    pub fn new(token: CancelToken, delay: Duration, on_step: F) -> Self {
        Self {
            token,
            delay,
            on_step,
            stats: StepStats::default(),
        }
    }

    /// Counters so far.
    pub fn stats(&self) -> StepStats {
        self.stats
    }
}

impl<F: FnMut()> Stepper for PacedStepper<F> {
    fn step(&mut self, kind: StepKind) -> StepResult {
        if self.token.is_cancelled() {
            tracing::debug!(steps = self.stats.steps, "step refused: run cancelled");
            return Err(Cancelled);
        }
        self.stats.record(kind);
        (self.on_step)();

        let cancelled = if self.delay.is_zero() {
            self.token.is_cancelled()
        } else {
            self.token.wait_timeout(self.delay)
        };
        if cancelled {
            tracing::debug!(steps = self.stats.steps, "step delay interrupted");
            return Err(Cancelled);
        }
        Ok(())
    }
}

/// Counts steps without pacing. Optionally cancels after a fixed number of
/// steps, which is how tests simulate a cancel arriving mid-run.
#[derive(Debug, Default, Clone)]
pub struct CountingStepper {
    stats: StepStats,
    cancel_after: Option<u64>,
}

impl CountingStepper {
    /// A stepper that never cancels.
    pub fn new() -> Self {
        Self::default()
    }

    /// A stepper that accepts `limit` steps and refuses every later one.
    pub fn cancel_after(limit: u64) -> Self {
        Self {
            stats: StepStats::default(),
            cancel_after: Some(limit),
        }
    }

    /// Counters so far.
    pub fn stats(&self) -> StepStats {
        self.stats
    }
}

impl Stepper for CountingStepper {
    #[inline]
    fn step(&mut self, kind: StepKind) -> StepResult {
        if self.cancel_after.is_some_and(|limit| self.stats.steps >= limit) {
            return Err(Cancelled);
        }
        self.stats.record(kind);
        Ok(())
    }
}

/// Captures the array after every step.
#[derive(Debug)]
pub struct RecordingStepper {
    array: SharedArray,
    frames: Vec<(StepKind, Vec<u32>)>,
}

impl RecordingStepper {
    /// Record frames of `array`, which must be the storage the engine mutates.
    pub fn new(array: SharedArray) -> Self {
        Self {
            array,
            frames: Vec::new(),
        }
    }

    /// Every recorded (kind, array-after-step) pair, in order.
    pub fn frames(&self) -> &[(StepKind, Vec<u32>)] {
        &self.frames
    }

    /// Consume the recorder, returning its frames.
    pub fn into_frames(self) -> Vec<(StepKind, Vec<u32>)> {
        self.frames
    }
}

impl Stepper for RecordingStepper {
    fn step(&mut self, kind: StepKind) -> StepResult {
        self.frames.push((kind, self.array.snapshot()));
        Ok(())
    }
}
