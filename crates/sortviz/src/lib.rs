#![forbid(unsafe_code)]

//! Terminal front end for the sorting visualizer.

pub mod app;
pub mod cli;
pub mod logging;
pub mod terminal_session;
