//! Styling attributes applied to cells by SGR escape sequences.

use bitflags::bitflags;

bitflags! {
    /// Style flags a cell can carry. INVERT is resolved at insertion time
    /// (the stored fg/bg are swapped) but the bit is kept on the cell so a
    /// renderer can still tell inverted cells apart.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Style: u8 {
        const BOLD      = 1 << 0;
        const FAINT     = 1 << 1;
        const ITALIC    = 1 << 2;
        const UNDERLINE = 1 << 3;
        const STRIKEOUT = 1 << 4;
        const INVERT    = 1 << 5;
    }
}

/// A 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}
