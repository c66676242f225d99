#![forbid(unsafe_code)]

//! UI state: key handling and frame layout.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ sortviz  1 Bubble Sort  2 Insertion Sort ... │  header
//! │                  ▂█                          │
//! │        ▅█  ▃█    ██  ▇█                      │  bars
//! │ Running Quick Sort  step 42    s start ...   │  status
//! └──────────────────────────────────────────────┘
//! ```
//!
//! [`App::view`] draws into a [`CellGrid`] without touching the terminal.

use std::sync::mpsc::Receiver;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use sortviz_core::Algorithm;
use sortviz_core::array::is_sorted;
use sortviz_render::{BarChart, CellFlags, CellGrid, Rgb};
use sortviz_runtime::{RunController, RunEvent, RunId, RunOutcome, RunState, RunSummary};

const TITLE: &str = " sortviz ";
const KEY_HELP: &str = "s start  r shuffle  c cancel  q quit";

/// The visualizer's foreground state.
pub struct App {
    controller: RunController,
    events: Receiver<RunEvent>,
    /// Steps seen for the live run.
    live: Option<(RunId, u64)>,
    finished: Option<RunSummary>,
    notice: Option<&'static str>,
    values: Vec<u32>,
    dirty: bool,
    quit: bool,
}

impl App {
    /// Wrap a controller and the receiving end of its event channel.
    pub fn new(controller: RunController, events: Receiver<RunEvent>) -> Self {
        Self {
            controller,
            events,
            live: None,
            finished: None,
            notice: None,
            values: Vec::new(),
            dirty: true,
            quit: false,
        }
    }

    pub fn controller(&self) -> &RunController {
        &self.controller
    }

    /// Whether the next frame differs from the last one drawn.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Force a redraw, e.g. after a resize.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Start the selected algorithm, or explain why nothing happened.
    pub fn start(&mut self) {
        match self.controller.start() {
            Some(run) => {
                self.live = Some((run, 0));
                self.finished = None;
                self.notice = None;
            }
            None => self.notice = Some("select an algorithm first"),
        }
        self.dirty = true;
    }

    /// Apply one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let selected = self.controller.selected();
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit = true;
            }
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Right | KeyCode::Tab => {
                self.select(selected.map_or(Algorithm::Bubble, Algorithm::next));
            }
            KeyCode::Left | KeyCode::BackTab => {
                self.select(selected.map_or(Algorithm::Heap, Algorithm::prev));
            }
            KeyCode::Char(ch @ '1'..='5') => {
                let index = ch as usize - '1' as usize;
                self.select(Algorithm::ALL[index]);
            }
            KeyCode::Enter | KeyCode::Char('s') => self.start(),
            KeyCode::Char('r') => {
                self.controller.shuffle();
                self.live = None;
                self.finished = None;
                self.notice = None;
                self.dirty = true;
            }
            KeyCode::Char('c') => {
                self.controller.request_cancel();
                self.dirty = true;
            }
            _ => {}
        }
    }

    fn select(&mut self, algorithm: Algorithm) {
        self.controller.select(algorithm);
        self.notice = None;
        self.dirty = true;
    }

    /// Drain pending run events and reap a finished run.
    pub fn pump(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                RunEvent::Frame { run } => {
                    if let Some((live, steps)) = &mut self.live
                        && *live == run
                    {
                        *steps += 1;
                    }
                }
                RunEvent::Finished(summary) => {
                    if self.live.is_some_and(|(live, _)| live == summary.run) {
                        self.live = None;
                        self.finished = Some(summary);
                    }
                }
                RunEvent::Shuffled => {}
            }
            self.dirty = true;
        }
        if self.controller.poll().is_some() {
            self.dirty = true;
        }
    }

    /// Draw the whole UI into `grid`.
    pub fn view(&mut self, grid: &mut CellGrid) {
        grid.clear();
        let (header, rest) = grid.area().split_top(1);
        let (body, status) = rest.split_bottom(1);

        // Header: title, then the selector.
        let mut x = grid.put_str(header.x, header.y, TITLE, Some(Rgb::WHITE), CellFlags::BOLD);
        let selected = self.controller.selected();
        for (i, algorithm) in Algorithm::ALL.into_iter().enumerate() {
            let label = format!(" {} {} ", i + 1, algorithm.name());
            let (fg, flags) = if selected == Some(algorithm) {
                (Some(Rgb::YELLOW), CellFlags::REVERSE | CellFlags::BOLD)
            } else {
                (Some(Rgb::GRAY), CellFlags::empty())
            };
            x = grid.put_str(x, header.y, &label, fg, flags);
        }

        // Bars.
        self.controller.array().snapshot_into(&mut self.values);
        let state = self.controller.state();
        let color = if state == RunState::Idle && is_sorted(&self.values) {
            Rgb::GREEN
        } else {
            Rgb::CYAN
        };
        BarChart::new(&self.values, self.controller.config().max_value)
            .color(color)
            .render(body, grid);

        // Status.
        let text = self.status_text(state);
        let end = grid.put_str(status.x, status.y, &text, Some(Rgb::WHITE), CellFlags::empty());
        let help_x = status.right().saturating_sub(KEY_HELP.len() as u16 + 1);
        if help_x > end {
            grid.put_str(help_x, status.y, KEY_HELP, Some(Rgb::GRAY), CellFlags::DIM);
        }

        self.dirty = false;
    }

    fn status_text(&self, state: RunState) -> String {
        if let Some(notice) = self.notice {
            return format!(" {notice}");
        }
        let active = self.controller.active_run();
        match (state, active) {
            (RunState::Running, Some((run, algorithm))) => {
                let steps = self
                    .live
                    .filter(|(live, _)| *live == run)
                    .map_or(0, |(_, steps)| steps);
                format!(" Running {algorithm}  step {steps}")
            }
            (RunState::Cancelling, Some((_, algorithm))) => format!(" Cancelling {algorithm}"),
            _ => match &self.finished {
                Some(summary) => {
                    let verb = match summary.outcome {
                        RunOutcome::Completed => "Sorted",
                        RunOutcome::Cancelled => "Cancelled",
                    };
                    let s = summary.stats;
                    format!(
                        " {verb} with {}: {} steps, {} compares, {} swaps, {} writes in {:.2}s",
                        summary.algorithm,
                        s.steps,
                        s.compares,
                        s.swaps,
                        s.writes,
                        summary.elapsed.as_secs_f64()
                    )
                }
                None => format!(" Idle  {} bars", self.values.len()),
            },
        }
    }
}
