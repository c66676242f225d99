#![forbid(unsafe_code)]

//! Core of the sorting visualizer: the array, step emission, cancellation,
//! and the five step-generating sorting engines.

pub mod algorithms;
pub mod array;
pub mod cancel;
pub mod config;
pub mod rng;
pub mod step;

pub use algorithms::{Algorithm, ParseAlgorithmError};
pub use array::{ArrayModel, SharedArray};
pub use cancel::{CancelToken, CancelTrigger};
pub use config::{ConfigError, VisualizerConfig};
pub use step::{Cancelled, StepKind, StepResult, StepStats, Stepper};
