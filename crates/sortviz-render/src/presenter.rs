#![forbid(unsafe_code)]

//! Frame emission to a terminal.
//!
//! The presenter keeps the last frame it wrote and emits only the runs of
//! cells that changed, tracking the active style so color and attribute
//! sequences are written only when they change. Each frame is wrapped in a
//! synchronized update and flushed once.

use std::io::{self, BufWriter, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate};

use crate::diff::{ChangeRun, changed_runs};
use crate::grid::{CellFlags, CellGrid, GridCell, Rgb};

/// Size of the internal write buffer.
const BUFFER_CAPACITY: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Style {
    fg: Option<Rgb>,
    flags: CellFlags,
}

impl Style {
    fn of(cell: &GridCell) -> Self {
        Self {
            fg: cell.fg,
            flags: cell.flags,
        }
    }
}

/// Diffing frame writer.
pub struct Presenter<W: Write> {
    writer: BufWriter<W>,
    previous: Option<CellGrid>,
    style: Option<Style>,
}

impl<W: Write> Presenter<W> {
    /// Wrap a writer (usually stdout).
    pub fn new(writer: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(BUFFER_CAPACITY, writer),
            previous: None,
            style: None,
        }
    }

    /// The wrapped writer. Everything presented so far has been flushed to it.
    pub fn get_ref(&self) -> &W {
        self.writer.get_ref()
    }

    /// Forget the previous frame so the next present repaints everything.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    /// Write `frame`, emitting only what changed since the last call.
    ///
    /// Returns the number of cells written.
    pub fn present(&mut self, frame: &CellGrid) -> io::Result<usize> {
        let full = self
            .previous
            .as_ref()
            .is_none_or(|prev| prev.width() != frame.width() || prev.height() != frame.height());

        let runs = if full {
            (0..frame.height())
                .filter(|_| frame.width() > 0)
                .map(|y| ChangeRun {
                    y,
                    x0: 0,
                    x1: frame.width() - 1,
                })
                .collect()
        } else {
            match &self.previous {
                Some(prev) => changed_runs(prev, frame),
                None => Vec::new(),
            }
        };

        if runs.is_empty() && !full {
            return Ok(0);
        }

        queue!(self.writer, BeginSynchronizedUpdate)?;
        if full {
            self.style = None;
            queue!(
                self.writer,
                SetAttribute(Attribute::Reset),
                ResetColor,
                Clear(ClearType::All)
            )?;
        }

        let mut written = 0;
        for run in &runs {
            queue!(self.writer, MoveTo(run.x0, run.y))?;
            for cell in &frame.row(run.y)[run.x0 as usize..=run.x1 as usize] {
                self.apply_style(Style::of(cell))?;
                queue!(self.writer, Print(cell.ch))?;
                written += 1;
            }
        }

        queue!(
            self.writer,
            SetAttribute(Attribute::Reset),
            ResetColor,
            EndSynchronizedUpdate
        )?;
        self.style = None;
        self.writer.flush()?;

        tracing::trace!(full, runs = runs.len(), cells = written, "frame presented");
        self.previous = Some(frame.clone());
        Ok(written)
    }

    fn apply_style(&mut self, next: Style) -> io::Result<()> {
        if self.style == Some(next) {
            return Ok(());
        }
        queue!(self.writer, SetAttribute(Attribute::Reset), ResetColor)?;
        if let Some(Rgb(r, g, b)) = next.fg {
            queue!(self.writer, SetForegroundColor(Color::Rgb { r, g, b }))?;
        }
        if next.flags.contains(CellFlags::BOLD) {
            queue!(self.writer, SetAttribute(Attribute::Bold))?;
        }
        if next.flags.contains(CellFlags::DIM) {
            queue!(self.writer, SetAttribute(Attribute::Dim))?;
        }
        if next.flags.contains(CellFlags::REVERSE) {
            queue!(self.writer, SetAttribute(Attribute::Reverse))?;
        }
        self.style = Some(next);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(p: &Presenter<Vec<u8>>) -> String {
        String::from_utf8_lossy(p.get_ref()).into_owned()
    }

    #[test]
    fn first_frame_is_full() {
        let mut p = Presenter::new(Vec::new());
        let mut grid = CellGrid::new(3, 2);
        grid.put_str(0, 0, "ab", None, CellFlags::empty());
        assert_eq!(p.present(&grid).unwrap(), 6);
        let out = output(&p);
        assert!(out.contains("\x1b[2J"), "full repaint clears: {out:?}");
        assert!(out.contains("ab"));
    }

    #[test]
    fn unchanged_frame_writes_nothing() {
        let mut p = Presenter::new(Vec::new());
        let grid = CellGrid::new(4, 2);
        p.present(&grid).unwrap();
        let before = p.get_ref().len();
        assert_eq!(p.present(&grid).unwrap(), 0);
        assert_eq!(p.get_ref().len(), before);
    }

    #[test]
    fn only_changed_cells_are_written() {
        let mut p = Presenter::new(Vec::new());
        let mut grid = CellGrid::new(10, 3);
        p.present(&grid).unwrap();
        grid.set(4, 1, GridCell::from_char('Z').with_fg(Rgb::CYAN));
        assert_eq!(p.present(&grid).unwrap(), 1);
        let out = output(&p);
        // MoveTo is 1-based on the wire
        assert!(out.contains("\x1b[2;5H"));
        assert!(out.contains("38;2;0;255;255"));
    }

    #[test]
    fn resize_forces_full_repaint() {
        let mut p = Presenter::new(Vec::new());
        p.present(&CellGrid::new(2, 2)).unwrap();
        assert_eq!(p.present(&CellGrid::new(3, 1)).unwrap(), 3);
    }

    #[test]
    fn invalidate_forces_full_repaint() {
        let mut p = Presenter::new(Vec::new());
        let grid = CellGrid::new(2, 2);
        p.present(&grid).unwrap();
        p.invalidate();
        assert_eq!(p.present(&grid).unwrap(), 4);
    }
}
