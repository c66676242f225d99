#![forbid(unsafe_code)]

//! Changed-cell runs between two frames.
//!
//! A row-major scan collects each horizontal run of cells that differ, so
//! the presenter positions the cursor once per run rather than per cell.

use crate::grid::CellGrid;

/// A contiguous run of changed cells on one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeRun {
    /// Row index.
    pub y: u16,
    /// Start column (inclusive).
    pub x0: u16,
    /// End column (inclusive).
    pub x1: u16,
}

/// Runs of cells that differ between `old` and `new`.
///
/// Both grids must have the same dimensions; a size change is a full
/// repaint and is handled by the presenter before diffing.
pub fn changed_runs(old: &CellGrid, new: &CellGrid) -> Vec<ChangeRun> {
    debug_assert_eq!((old.width(), old.height()), (new.width(), new.height()));
    let mut runs = Vec::new();
    for y in 0..new.height() {
        let mut open: Option<u16> = None;
        for (x, (a, b)) in old.row(y).iter().zip(new.row(y)).enumerate() {
            let x = x as u16;
            match (a != b, open) {
                (true, None) => open = Some(x),
                (false, Some(x0)) => {
                    runs.push(ChangeRun { y, x0, x1: x - 1 });
                    open = None;
                }
                _ => {}
            }
        }
        if let Some(x0) = open {
            runs.push(ChangeRun {
                y,
                x0,
                x1: new.width() - 1,
            });
        }
    }
    runs
}
