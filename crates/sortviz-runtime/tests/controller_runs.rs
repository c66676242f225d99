#![forbid(unsafe_code)]

//! End-to-end tests for the run controller: real threads, real pacing.

use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use sortviz_core::array::is_sorted;
use sortviz_core::rng::ShuffleRng;
use sortviz_core::{Algorithm, VisualizerConfig};
use sortviz_runtime::{RunController, RunEvent, RunOutcome, RunState, RunSummary};

use proptest::prelude::*;
use tracing_subscriber::layer::SubscriberExt;

const TIMEOUT: Duration = Duration::from_secs(10);

fn config(len: usize, delay_ms: u64) -> VisualizerConfig {
    VisualizerConfig {
        len,
        step_delay: Duration::from_millis(delay_ms),
        seed: Some(42),
        ..Default::default()
    }
}

/// Drain events until `run` reports finished.
fn wait_finished(rx: &Receiver<RunEvent>, run: u64) -> (Vec<RunEvent>, RunSummary) {
    let deadline = Instant::now() + TIMEOUT;
    let mut seen = Vec::new();
    loop {
        let left = deadline.saturating_duration_since(Instant::now());
        let event = rx.recv_timeout(left).expect("run did not finish in time");
        if let RunEvent::Finished(summary) = &event
            && summary.run == run
        {
            return (seen, summary.clone());
        }
        seen.push(event);
    }
}

/// Poll until the controller reaps the finished thread.
fn reap(ctl: &mut RunController) -> RunSummary {
    let deadline = Instant::now() + TIMEOUT;
    loop {
        if let Some(summary) = ctl.poll() {
            return summary;
        }
        assert!(Instant::now() < deadline, "run was never reaped");
        thread::sleep(Duration::from_millis(1));
    }
}

#[test]
fn natural_completion_sorts_and_returns_to_idle() {
    for algorithm in Algorithm::ALL {
        let (tx, rx) = mpsc::channel();
        let mut ctl = RunController::new(config(32, 0), tx);
        ctl.select(algorithm);
        let run = ctl.start().expect("algorithm selected");

        let (seen, summary) = wait_finished(&rx, run);
        assert_eq!(summary.outcome, RunOutcome::Completed);
        assert_eq!(summary.algorithm, algorithm);
        let frames = seen
            .iter()
            .filter(|e| matches!(e, RunEvent::Frame { run: r } if *r == run))
            .count() as u64;
        assert_eq!(frames, summary.stats.steps);

        assert_eq!(reap(&mut ctl), summary);
        assert_eq!(ctl.state(), RunState::Idle);
        assert!(is_sorted(&ctl.array().snapshot()), "{algorithm} left array unsorted");
        assert_eq!(ctl.last_summary(), Some(&summary));
    }
}

#[test]
fn restart_cancels_previous_run_before_new_frames() {
    let (tx, rx) = mpsc::channel();
    let mut ctl = RunController::new(config(24, 20), tx);
    ctl.select(Algorithm::Bubble);
    let first = ctl.start().expect("first run");

    // Let the first run take a few steps.
    match rx.recv_timeout(TIMEOUT) {
        Ok(RunEvent::Frame { run }) => assert_eq!(run, first),
        other => panic!("expected a frame, got {other:?}"),
    }

    ctl.select(Algorithm::Insertion);
    let second = ctl.start().expect("second run");
    assert_ne!(first, second);
    assert_eq!(ctl.state(), RunState::Running);

    let (before, summary) = wait_finished(&rx, first);
    assert_eq!(summary.outcome, RunOutcome::Cancelled);
    assert!(
        before
            .iter()
            .all(|e| !matches!(e, RunEvent::Frame { run } if *run == second)),
        "second run stepped before the first one finished"
    );

    let summary = ctl.cancel().expect("second run summary");
    assert_eq!(summary.run, second);
    assert_eq!(summary.outcome, RunOutcome::Cancelled);
    assert_eq!(ctl.state(), RunState::Idle);
}

#[test]
fn shuffle_cancels_run_and_replaces_storage() {
    let cfg = config(16, 20);
    let (tx, rx) = mpsc::channel();
    let mut ctl = RunController::new(cfg.clone(), tx);
    ctl.select(Algorithm::Heap);
    let run = ctl.start().expect("run");
    let old = ctl.array().clone();

    let _ = rx.recv_timeout(TIMEOUT);
    ctl.shuffle();
    assert_eq!(ctl.state(), RunState::Idle);

    // The old run is gone: its array stops changing.
    let frozen = old.snapshot();
    thread::sleep(Duration::from_millis(60));
    assert_eq!(old.snapshot(), frozen);
    assert!(!ctl.array().same_storage(&old));

    // Same seed, second batch of values.
    let mut rng = ShuffleRng::new(42);
    let _initial = rng.values(cfg.len, cfg.min_value, cfg.max_value);
    let expected = rng.values(cfg.len, cfg.min_value, cfg.max_value);
    assert_eq!(ctl.array().snapshot(), expected);

    let events: Vec<RunEvent> = rx.try_iter().collect();
    assert!(events.contains(&RunEvent::Shuffled));
    assert!(
        events
            .iter()
            .any(|e| matches!(e, RunEvent::Finished(s) if s.run == run && s.outcome == RunOutcome::Cancelled))
    );
}

#[test]
fn request_cancel_is_reaped_by_poll() {
    let (tx, rx) = mpsc::channel();
    let mut ctl = RunController::with_values(config(0, 30), &[9, 8, 7, 6, 5, 4, 3, 2, 1], tx);
    ctl.select(Algorithm::Bubble);
    let run = ctl.start().expect("run");

    ctl.request_cancel();
    assert_ne!(ctl.state(), RunState::Running);

    let (_, summary) = wait_finished(&rx, run);
    assert_eq!(summary.outcome, RunOutcome::Cancelled);
    assert!(summary.stats.steps < 36);
    assert_eq!(reap(&mut ctl).run, run);
    assert_eq!(ctl.state(), RunState::Idle);
}

#[test]
fn empty_array_completes_without_steps() {
    let (tx, rx) = mpsc::channel();
    let mut ctl = RunController::with_values(config(0, 10), &[], tx);
    ctl.select(Algorithm::Merge);
    let run = ctl.start().expect("run");
    let (seen, summary) = wait_finished(&rx, run);
    assert!(seen.is_empty());
    assert_eq!(summary.outcome, RunOutcome::Completed);
    assert_eq!(summary.stats.steps, 0);
}

#[test]
fn start_with_nothing_selected_does_nothing() {
    let (tx, rx) = mpsc::channel();
    let mut ctl = RunController::new(config(8, 0), tx);
    let before = ctl.array().snapshot();
    assert_eq!(ctl.start(), None);
    assert_eq!(ctl.state(), RunState::Idle);
    assert_eq!(ctl.array().snapshot(), before);
    assert!(rx.try_recv().is_err());
}

#[test]
fn unknown_selection_keeps_previous_choice() {
    let (tx, _rx) = mpsc::channel();
    let mut ctl = RunController::new(config(8, 0), tx);
    assert_eq!(ctl.select_algorithm("heap sort"), Ok(Algorithm::Heap));
    let err = ctl.select_algorithm("Bogo Sort").unwrap_err();
    assert_eq!(err.name(), "Bogo Sort");
    assert_eq!(ctl.selected(), Some(Algorithm::Heap));
}

#[test]
fn dropping_controller_stops_the_run() {
    let (tx, rx) = mpsc::channel();
    let mut ctl = RunController::new(config(32, 50), tx);
    ctl.select(Algorithm::Quick);
    let run = ctl.start().expect("run");
    drop(ctl);

    let (_, summary) = wait_finished(&rx, run);
    assert_eq!(summary.outcome, RunOutcome::Cancelled);
}

// ============================================================================
// Arbitrary command sequences
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum Command {
    Select(Algorithm),
    Start,
    Shuffle,
    RequestCancel,
    Poll,
    Pause(u64),
}

fn command_strategy() -> impl Strategy<Value = Command> {
    prop_oneof![
        2 => (0usize..Algorithm::ALL.len()).prop_map(|i| Command::Select(Algorithm::ALL[i])),
        3 => Just(Command::Start),
        1 => Just(Command::Shuffle),
        1 => Just(Command::RequestCancel),
        1 => Just(Command::Poll),
        2 => (0u64..4).prop_map(Command::Pause),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn runs_never_interleave(commands in proptest::collection::vec(command_strategy(), 0..24)) {
        let (tx, rx) = mpsc::channel();
        let mut ctl = RunController::new(config(10, 1), tx);
        let mut started = Vec::new();
        for command in commands {
            match command {
                Command::Select(algorithm) => ctl.select(algorithm),
                Command::Start => started.extend(ctl.start()),
                Command::Shuffle => ctl.shuffle(),
                Command::RequestCancel => ctl.request_cancel(),
                Command::Poll => {
                    let _ = ctl.poll();
                }
                Command::Pause(ms) => thread::sleep(Duration::from_millis(ms)),
            }
        }
        // Dropping joins the last run, so every event is already queued.
        drop(ctl);

        let mut finished = Vec::new();
        for event in rx.try_iter() {
            match event {
                RunEvent::Frame { run } => {
                    let last = finished.last().copied().unwrap_or(0);
                    prop_assert!(run > last, "frame of run {run} after it finished");
                    prop_assert!(last + 1 >= run, "run {run} stepped while run {} was alive", last + 1);
                }
                RunEvent::Finished(summary) => {
                    if let Some(&last) = finished.last() {
                        prop_assert!(summary.run > last, "finish order {last} then {}", summary.run);
                    }
                    finished.push(summary.run);
                }
                RunEvent::Shuffled => {}
            }
        }
        prop_assert_eq!(finished, started);
    }
}

// ============================================================================
// Logging
// ============================================================================

/// Captures event messages emitted on the current thread.
struct MessageCapture(Arc<Mutex<Vec<String>>>);

struct MessageVisitor<'a>(&'a mut Option<String>);

impl tracing::field::Visit for MessageVisitor<'_> {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            *self.0 = Some(format!("{value:?}"));
        }
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for MessageCapture {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut message = None;
        event.record(&mut MessageVisitor(&mut message));
        if let Some(message) = message {
            self.0.lock().unwrap().push(message);
        }
    }
}

#[test]
fn controller_logs_transitions() {
    let messages = Arc::new(Mutex::new(Vec::new()));
    let subscriber = tracing_subscriber::registry().with(MessageCapture(messages.clone()));

    tracing::subscriber::with_default(subscriber, || {
        let (tx, _rx) = mpsc::channel();
        let mut ctl = RunController::new(config(8, 5), tx);
        let _ = ctl.start();
        ctl.select(Algorithm::Bubble);
        ctl.start();
        ctl.cancel();
    });

    let messages = messages.lock().unwrap();
    for expected in [
        "start ignored: no algorithm selected",
        "algorithm selected",
        "run started",
    ] {
        assert!(
            messages.iter().any(|m| m == expected),
            "missing {expected:?} in {messages:?}"
        );
    }
}
