#![forbid(unsafe_code)]

//! Terminal bar chart.
//!
//! Each cell row is split into eight vertical units drawn with the block
//! characters `▁▂▃▄▅▆▇█`, so a chart area `h` rows tall has `8 * h` units of
//! height. Values are scaled so that `full_scale` fills the area.

use crate::bars::{BarLayout, ValueScale};
use crate::geometry::Rect;
use crate::grid::{CellGrid, GridCell, Rgb};

/// Vertical units per cell row.
pub const UNITS_PER_ROW: u32 = 8;

/// Partial-cell glyphs indexed by filled eighths (0 = empty, 8 = full).
const EIGHTHS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Draws a slice of bar heights into a grid area.
#[derive(Debug, Clone, Copy)]
pub struct BarChart<'a> {
    values: &'a [u32],
    full_scale: u32,
    color: Rgb,
}

impl<'a> BarChart<'a> {
    /// A chart of `values`, where `full_scale` reaches the top of the area.
    pub fn new(values: &'a [u32], full_scale: u32) -> Self {
        Self {
            values,
            full_scale,
            color: Rgb::CYAN,
        }
    }

    /// Bar color.
    pub fn color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    /// Layout used for `area`: one-column gutter once bars are at least two
    /// columns wide.
    pub fn layout(&self, area: Rect) -> BarLayout {
        let slot = if self.values.is_empty() {
            0
        } else {
            u32::from(area.width) / self.values.len() as u32
        };
        BarLayout {
            gutter: u32::from(slot >= 2),
            scale: ValueScale::fit(self.full_scale, u32::from(area.height) * UNITS_PER_ROW),
        }
    }

    /// Draw into `area` of `grid`. Cells of the area not covered by a bar are
    /// blanked, so redrawing is idempotent.
    pub fn render(&self, area: Rect, grid: &mut CellGrid) {
        let _span = tracing::trace_span!(
            "bar_chart",
            w = area.width,
            h = area.height,
            bars = self.values.len()
        )
        .entered();

        grid.fill(area, GridCell::EMPTY);
        if area.is_empty() || self.values.is_empty() {
            return;
        }

        // With more bars than columns every bar gets one column and the
        // overflow is clipped at the right edge.
        let surface_width = u32::from(area.width).max(self.values.len() as u32);
        let surface_height = u32::from(area.height) * UNITS_PER_ROW;
        let rects = self
            .layout(area)
            .compute(self.values, surface_width, surface_height);

        for rect in rects {
            if rect.x >= u32::from(area.width) {
                break;
            }
            for row in 0..area.height {
                // Row 0 is the bottom row of the area.
                let below = u32::from(row) * UNITS_PER_ROW;
                let filled = rect.height.saturating_sub(below).min(UNITS_PER_ROW);
                if filled == 0 {
                    break;
                }
                let cell = GridCell::from_char(EIGHTHS[filled as usize]).with_fg(self.color);
                let y = area.bottom() - 1 - row;
                for dx in 0..rect.width {
                    let x = rect.x + dx;
                    if x >= u32::from(area.width) {
                        break;
                    }
                    grid.set(area.x + x as u16, y, cell);
                }
            }
        }
    }
}
