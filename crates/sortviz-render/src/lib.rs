#![forbid(unsafe_code)]

//! Rendering for the sorting visualizer.
//!
//! - [`bars`]: pure bar geometry for an arbitrary drawing surface.
//! - [`grid`]: an in-memory cell grid frames are drawn into.
//! - [`bar_chart`]: draws bar heights into a grid area with sub-cell
//!   vertical resolution.
//! - [`diff`] and [`presenter`]: emit only changed cells to the terminal.

pub mod bar_chart;
pub mod bars;
pub mod diff;
pub mod geometry;
pub mod grid;
pub mod presenter;

pub use bar_chart::BarChart;
pub use bars::{BarLayout, BarRect, ValueScale};
pub use geometry::Rect;
pub use grid::{CellFlags, CellGrid, GridCell, Rgb};
pub use presenter::Presenter;
