#![forbid(unsafe_code)]

//! Run controller.
//!
//! # State machine
//!
//! ```text
//!            start()                      engine returns
//!   Idle ───────────────▶ Running ─────────────────────────▶ Idle
//!     ▲                     │
//!     │   join              │ start() / shuffle() / cancel()
//!     └──────────────── Cancelling ◀────────────────
//! ```
//!
//! # Invariants
//!
//! 1. At most one run is alive. `start` and `shuffle` cancel the active run
//!    and join its thread before doing anything else, so two engines never
//!    mutate concurrently.
//! 2. A run mutates only the [`SharedArray`] it was started on. `shuffle`
//!    installs fresh storage, so no step of an old run lands in the new
//!    data.
//! 3. Cancellation is observed at the next step boundary. Because the step
//!    delay sleeps on the cancel token, a join waits at most for the
//!    in-flight loop iteration, never for a full delay.

use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use sortviz_core::rng::ShuffleRng;
use sortviz_core::step::PacedStepper;
use sortviz_core::{
    Algorithm, CancelToken, CancelTrigger, ParseAlgorithmError, SharedArray, StepStats,
    VisualizerConfig,
};

/// Identifies one run. Increases monotonically per controller.
pub type RunId = u64;

/// Controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// No run alive.
    Idle,
    /// A run is stepping on a background thread.
    Running,
    /// Cancellation requested; the engine has not stopped yet.
    Cancelling,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The engine finished sorting.
    Completed,
    /// The engine stopped at a step boundary after a cancel.
    Cancelled,
}

/// Report for a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub run: RunId,
    pub algorithm: Algorithm,
    pub outcome: RunOutcome,
    pub stats: StepStats,
    pub elapsed: Duration,
}

/// Notifications sent to the foreground.
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    /// The array changed; a frame should be presented.
    Frame { run: RunId },
    /// A run ended, naturally or by cancellation.
    Finished(RunSummary),
    /// The array was replaced by a shuffle.
    Shuffled,
}

struct ActiveRun {
    id: RunId,
    algorithm: Algorithm,
    trigger: CancelTrigger,
    thread: Option<thread::JoinHandle<RunSummary>>,
}

impl ActiveRun {
    fn is_finished(&self) -> bool {
        self.thread.as_ref().is_none_or(|t| t.is_finished())
    }

    /// Wait for the thread. `None` if it panicked.
    fn join(mut self) -> Option<RunSummary> {
        let handle = self.thread.take()?;
        match handle.join() {
            Ok(summary) => Some(summary),
            Err(_) => {
                tracing::warn!(run = self.id, algorithm = %self.algorithm, "run thread panicked");
                None
            }
        }
    }
}

impl Drop for ActiveRun {
    fn drop(&mut self) {
        // Never leave a detached run stepping.
        self.trigger.cancel();
    }
}

/// Owns the array and the single active run.
pub struct RunController {
    config: VisualizerConfig,
    array: SharedArray,
    rng: ShuffleRng,
    selected: Option<Algorithm>,
    active: Option<ActiveRun>,
    cancelling: bool,
    next_id: RunId,
    last: Option<RunSummary>,
    events: mpsc::Sender<RunEvent>,
}

impl RunController {
    /// Create a controller with a freshly generated array.
    pub fn new(config: VisualizerConfig, events: mpsc::Sender<RunEvent>) -> Self {
        let mut rng = config.rng();
        let values = rng.values(config.len, config.min_value, config.max_value);
        Self::build(config, rng, &values, events)
    }

    /// Create a controller over explicit values. Later shuffles keep the
    /// length of `values`.
    pub fn with_values(
        config: VisualizerConfig,
        values: &[u32],
        events: mpsc::Sender<RunEvent>,
    ) -> Self {
        let rng = config.rng();
        let config = VisualizerConfig {
            len: values.len(),
            ..config
        };
        Self::build(config, rng, values, events)
    }

    fn build(
        config: VisualizerConfig,
        rng: ShuffleRng,
        values: &[u32],
        events: mpsc::Sender<RunEvent>,
    ) -> Self {
        Self {
            array: SharedArray::from_values(values),
            config,
            rng,
            selected: None,
            active: None,
            cancelling: false,
            next_id: 1,
            last: None,
            events,
        }
    }

    /// Current state.
    ///
    /// A run whose engine has returned reports `Idle` even before
    /// [`poll`](Self::poll) reaps it.
    pub fn state(&self) -> RunState {
        match &self.active {
            None => RunState::Idle,
            Some(run) if run.is_finished() => RunState::Idle,
            Some(_) if self.cancelling => RunState::Cancelling,
            Some(_) => RunState::Running,
        }
    }

    /// The array currently on display.
    pub fn array(&self) -> &SharedArray {
        &self.array
    }

    /// The configuration in effect.
    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    /// The selected algorithm, if any.
    pub fn selected(&self) -> Option<Algorithm> {
        self.selected
    }

    /// Id and algorithm of the live run.
    pub fn active_run(&self) -> Option<(RunId, Algorithm)> {
        self.active.as_ref().map(|r| (r.id, r.algorithm))
    }

    /// Summary of the most recently reaped run.
    pub fn last_summary(&self) -> Option<&RunSummary> {
        self.last.as_ref()
    }

    /// Select an algorithm by its display or short name.
    ///
    /// An unknown name leaves the selection unchanged.
    pub fn select_algorithm(&mut self, name: &str) -> Result<Algorithm, ParseAlgorithmError> {
        match name.parse::<Algorithm>() {
            Ok(algorithm) => {
                self.select(algorithm);
                Ok(algorithm)
            }
            Err(err) => {
                tracing::debug!(%err, "selection ignored");
                Err(err)
            }
        }
    }

    /// Select an algorithm. Takes effect on the next `start`.
    pub fn select(&mut self, algorithm: Algorithm) {
        tracing::debug!(algorithm = %algorithm, "algorithm selected");
        self.selected = Some(algorithm);
    }

    /// Start the selected algorithm on the current array.
    ///
    /// Any active run is cancelled and joined first. With nothing selected
    /// this is a no-op and returns `None`.
    pub fn start(&mut self) -> Option<RunId> {
        let Some(algorithm) = self.selected else {
            tracing::debug!("start ignored: no algorithm selected");
            return None;
        };
        self.stop_active();

        let id = self.next_id;
        self.next_id += 1;

        let (token, trigger) = CancelToken::new();
        let array = self.array.clone();
        let delay = self.config.step_delay;
        let events = self.events.clone();
        tracing::info!(run = id, algorithm = %algorithm, len = array.len(), "run started");
        let thread = thread::spawn(move || run_engine(id, algorithm, array, token, delay, events));

        self.active = Some(ActiveRun {
            id,
            algorithm,
            trigger,
            thread: Some(thread),
        });
        self.cancelling = false;
        Some(id)
    }

    /// Cancel any active run, then replace the array with new random values
    /// of the same length.
    pub fn shuffle(&mut self) {
        self.stop_active();
        let values = self
            .rng
            .values(self.config.len, self.config.min_value, self.config.max_value);
        self.array = SharedArray::from_values(&values);
        tracing::debug!(len = values.len(), "array shuffled");
        let _ = self.events.send(RunEvent::Shuffled);
    }

    /// Ask the active run to stop without waiting. It is reaped by
    /// [`poll`](Self::poll).
    pub fn request_cancel(&mut self) {
        if let Some(run) = &self.active {
            tracing::debug!(run = run.id, "cancel requested");
            run.trigger.cancel();
            self.cancelling = true;
        }
    }

    /// Cancel the active run and wait for it to stop.
    pub fn cancel(&mut self) -> Option<RunSummary> {
        self.stop_active()
    }

    /// Reap the active run if its thread has returned.
    pub fn poll(&mut self) -> Option<RunSummary> {
        if !self.active.as_ref().is_some_and(ActiveRun::is_finished) {
            return None;
        }
        let run = self.active.take()?;
        self.cancelling = false;
        let summary = run.join()?;
        self.last = Some(summary.clone());
        Some(summary)
    }

    fn stop_active(&mut self) -> Option<RunSummary> {
        let run = self.active.take()?;
        if !run.is_finished() {
            tracing::debug!(run = run.id, "cancelling active run");
        }
        run.trigger.cancel();
        self.cancelling = false;
        let summary = run.join()?;
        self.last = Some(summary.clone());
        Some(summary)
    }
}

impl Drop for RunController {
    fn drop(&mut self) {
        self.stop_active();
    }
}

fn run_engine(
    id: RunId,
    algorithm: Algorithm,
    mut array: SharedArray,
    token: CancelToken,
    delay: Duration,
    events: mpsc::Sender<RunEvent>,
) -> RunSummary {
    let started = Instant::now();
    let frames = events.clone();
    let mut stepper = PacedStepper::new(token, delay, move || {
        let _ = frames.send(RunEvent::Frame { run: id });
    });

    let outcome = match algorithm.run(&mut array, &mut stepper) {
        Ok(()) => RunOutcome::Completed,
        Err(_) => RunOutcome::Cancelled,
    };
    let summary = RunSummary {
        run: id,
        algorithm,
        outcome,
        stats: stepper.stats(),
        elapsed: started.elapsed(),
    };
    tracing::info!(
        run = id,
        algorithm = %algorithm,
        outcome = ?outcome,
        steps = summary.stats.steps,
        swaps = summary.stats.swaps,
        "run finished"
    );
    let _ = events.send(RunEvent::Finished(summary.clone()));
    summary
}
