#![forbid(unsafe_code)]

//! Bar geometry.
//!
//! Maps bar heights onto a drawing surface measured in abstract units
//! (pixels for a raster canvas, eighth-cells for the terminal chart):
//!
//! - bar width is `surface_width / len` (integer division),
//! - bar `i` starts at `x = i * width`,
//! - bars are anchored to the bottom edge,
//! - a fixed gutter is trimmed from the right of each bar.
//!
//! Layout is pure: it reads heights and never touches the array.

/// Linear mapping from a bar value to surface units: `value * numer / denom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueScale {
    pub numer: u32,
    pub denom: u32,
}

impl ValueScale {
    /// One value unit per surface unit.
    pub const IDENTITY: ValueScale = ValueScale { numer: 1, denom: 1 };

    /// Scale so that `full_scale` maps to exactly `surface_height`.
    pub fn fit(full_scale: u32, surface_height: u32) -> Self {
        Self {
            numer: surface_height,
            denom: full_scale.max(1),
        }
    }

    /// Apply the scale, rounding down.
    #[inline]
    pub fn apply(&self, value: u32) -> u32 {
        if self.denom == 0 {
            return 0;
        }
        (u64::from(value) * u64::from(self.numer) / u64::from(self.denom)) as u32
    }
}

impl Default for ValueScale {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// One bar's rectangle in surface units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Bar layout parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarLayout {
    /// Units trimmed from the right of each bar.
    pub gutter: u32,
    /// Value-to-height mapping.
    pub scale: ValueScale,
}

impl BarLayout {
    /// Raster layout: heights in pixels, two-pixel gutter.
    pub const PIXELS: BarLayout = BarLayout {
        gutter: 2,
        scale: ValueScale::IDENTITY,
    };

    /// Compute one rectangle per value.
    ///
    /// Heights are clipped to the surface. A bar keeps at least one unit of
    /// width as long as its slot is non-empty.
    pub fn compute(&self, values: &[u32], surface_width: u32, surface_height: u32) -> Vec<BarRect> {
        if values.is_empty() {
            return Vec::new();
        }
        let slot = surface_width / values.len() as u32;
        let width = if slot > self.gutter {
            slot - self.gutter
        } else {
            slot.min(1)
        };

        values
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                let height = self.scale.apply(value).min(surface_height);
                BarRect {
                    x: i as u32 * slot,
                    y: surface_height - height,
                    width,
                    height,
                }
            })
            .collect()
    }
}

impl Default for BarLayout {
    fn default() -> Self {
        Self::PIXELS
    }
}
