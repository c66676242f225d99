#![forbid(unsafe_code)]

//! Runtime for the sorting visualizer.
//!
//! The [`RunController`](controller::RunController) owns the array and at
//! most one background run. The foreground issues commands and drains
//! [`RunEvent`](controller::RunEvent)s to know when to redraw.

pub mod controller;

pub use controller::{RunController, RunEvent, RunId, RunOutcome, RunState, RunSummary};
