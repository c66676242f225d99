#![forbid(unsafe_code)]

//! In-memory cell grid.
//!
//! A frame is drawn into a [`CellGrid`] and then handed to the
//! [`Presenter`](crate::presenter::Presenter). Writes outside the grid are
//! ignored, so drawing code never has to clip by hand.

use bitflags::bitflags;

use crate::geometry::Rect;

/// A 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const CYAN: Rgb = Rgb(0, 255, 255);
    pub const GREEN: Rgb = Rgb(80, 220, 100);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const GRAY: Rgb = Rgb(128, 128, 128);
    pub const YELLOW: Rgb = Rgb(255, 215, 0);
}

bitflags! {
    /// Text attributes for a cell.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellFlags: u8 {
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const REVERSE = 1 << 2;
    }
}

/// One terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub ch: char,
    /// Foreground color; `None` keeps the terminal default.
    pub fg: Option<Rgb>,
    pub flags: CellFlags,
}

impl GridCell {
    /// A blank cell.
    pub const EMPTY: GridCell = GridCell {
        ch: ' ',
        fg: None,
        flags: CellFlags::empty(),
    };

    /// A cell showing `ch` in the default style.
    pub const fn from_char(ch: char) -> Self {
        Self {
            ch,
            fg: None,
            flags: CellFlags::empty(),
        }
    }

    /// Set the foreground color.
    pub const fn with_fg(mut self, fg: Rgb) -> Self {
        self.fg = Some(fg);
        self
    }

    /// Set the attributes.
    pub const fn with_flags(mut self, flags: CellFlags) -> Self {
        self.flags = flags;
        self
    }
}

impl Default for GridCell {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Row-major grid of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellGrid {
    width: u16,
    height: u16,
    cells: Vec<GridCell>,
}

impl CellGrid {
    /// A blank grid.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![GridCell::EMPTY; width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// The full grid as a rectangle.
    #[inline]
    pub fn area(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    /// Cell at (x, y), if inside the grid.
    pub fn get(&self, x: u16, y: u16) -> Option<&GridCell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    /// Overwrite the cell at (x, y). Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: u16, y: u16, cell: GridCell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Fill `rect` (clipped to the grid) with `cell`.
    pub fn fill(&mut self, rect: Rect, cell: GridCell) {
        for y in rect.y..rect.bottom().min(self.height) {
            for x in rect.x..rect.right().min(self.width) {
                self.set(x, y, cell);
            }
        }
    }

    /// Blank every cell.
    pub fn clear(&mut self) {
        self.cells.fill(GridCell::EMPTY);
    }

    /// One row of cells.
    pub fn row(&self, y: u16) -> &[GridCell] {
        if y >= self.height {
            return &[];
        }
        let start = y as usize * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Write `text` starting at (x, y) with a shared style, one char per
    /// cell, stopping at the right edge. Returns the column after the last
    /// written char.
    pub fn put_str(&mut self, x: u16, y: u16, text: &str, fg: Option<Rgb>, flags: CellFlags) -> u16 {
        let mut col = x;
        for ch in text.chars() {
            if col >= self.width {
                break;
            }
            self.set(col, y, GridCell { ch, fg, flags });
            col += 1;
        }
        col
    }

    /// Plain-text rendering, one line per row with trailing blanks trimmed.
    pub fn to_text(&self) -> String {
        (0..self.height)
            .map(|y| {
                let line: String = self.row(y).iter().map(|c| c.ch).collect();
                line.trim_end().to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_blank() {
        let grid = CellGrid::new(3, 2);
        assert_eq!(grid.get(2, 1), Some(&GridCell::EMPTY));
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.to_text(), "\n");
    }

    #[test]
    fn out_of_bounds_set_is_ignored() {
        let mut grid = CellGrid::new(2, 2);
        grid.set(5, 5, GridCell::from_char('x'));
        assert_eq!(grid, CellGrid::new(2, 2));
    }

    #[test]
    fn fill_clips_to_grid() {
        let mut grid = CellGrid::new(3, 2);
        grid.fill(Rect::new(1, 1, 10, 10), GridCell::from_char('#'));
        assert_eq!(grid.to_text(), "\n ##");
    }

    #[test]
    fn put_str_stops_at_edge() {
        let mut grid = CellGrid::new(4, 1);
        let end = grid.put_str(1, 0, "hello", Some(Rgb::WHITE), CellFlags::BOLD);
        assert_eq!(end, 4);
        assert_eq!(grid.to_text(), " hel");
        assert_eq!(grid.get(1, 0).map(|c| c.flags), Some(CellFlags::BOLD));
    }

    #[test]
    fn clear_resets_cells() {
        let mut grid = CellGrid::new(2, 1);
        grid.set(0, 0, GridCell::from_char('a').with_fg(Rgb::CYAN));
        grid.clear();
        assert_eq!(grid.row(0), &[GridCell::EMPTY, GridCell::EMPTY]);
        assert!(grid.row(1).is_empty());
    }
}
