//! Color palettes.
//!
//! The 3/4-bit palette is selected with SGR 30-37/40-47 (normal) and
//! 90-97/100-107 (bright). The 8-bit palette is selected with SGR 38;5;n /
//! 48;5;n and follows the standard layout: the 16 named colors, a 6x6x6
//! color cube from index 16, and a 24-step grey ramp from index 232.

use crate::Rgb;

/// Pen colors at session start (before any SGR arrives): white on the
/// near-black window background.
pub const DEFAULT_FOREGROUND: Rgb = Rgb::new(255, 255, 255);
pub const DEFAULT_BACKGROUND: Rgb = Rgb::new(10, 10, 10);

/// The 16 colors reachable through 3/4-bit SGR parameters.
pub const FOUR_BIT_PALETTE: [Rgb; 16] = [
    Rgb::new(0, 0, 0),       // 30/40 Black
    Rgb::new(153, 0, 0),     // 31/41 Red
    Rgb::new(0, 166, 0),     // 32/42 Green
    Rgb::new(153, 153, 153), // 33/43 Yellow
    Rgb::new(0, 0, 178),     // 34/44 Blue
    Rgb::new(178, 0, 178),   // 35/45 Magenta
    Rgb::new(0, 166, 178),   // 36/46 Cyan
    Rgb::new(191, 191, 191), // 37/47 White
    // Bright variants, selected with 90-97 and 100-107.
    Rgb::new(102, 102, 102),
    Rgb::new(230, 0, 0),
    Rgb::new(0, 217, 0),
    Rgb::new(230, 230, 0),
    Rgb::new(0, 0, 255),
    Rgb::new(230, 0, 230),
    Rgb::new(0, 230, 230),
    Rgb::new(230, 230, 230),
];

const NAMED_EIGHT_BIT: [Rgb; 16] = [
    Rgb::new(0, 0, 0),
    Rgb::new(128, 0, 0),
    Rgb::new(0, 128, 0),
    Rgb::new(128, 128, 0),
    Rgb::new(0, 0, 128),
    Rgb::new(128, 0, 128),
    Rgb::new(0, 128, 128),
    Rgb::new(192, 192, 192),
    Rgb::new(128, 128, 128),
    Rgb::new(255, 0, 0),
    Rgb::new(0, 255, 0),
    Rgb::new(255, 255, 0),
    Rgb::new(0, 0, 255),
    Rgb::new(255, 0, 255),
    Rgb::new(0, 255, 255),
    Rgb::new(255, 255, 255),
];

const CUBE_LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];

const fn build_eight_bit_palette() -> [Rgb; 256] {
    let mut palette = [Rgb::new(0, 0, 0); 256];

    let mut i = 0;
    while i < 16 {
        palette[i] = NAMED_EIGHT_BIT[i];
        i += 1;
    }

    // 6x6x6 color cube.
    let mut cube = 0;
    while cube < 216 {
        palette[16 + cube] = Rgb::new(CUBE_LEVELS[cube / 36], CUBE_LEVELS[(cube / 6) % 6], CUBE_LEVELS[cube % 6]);
        cube += 1;
    }

    // Grey ramp.
    let mut grey = 0;
    while grey < 24 {
        let value = 8 + 10 * grey as u8;
        palette[232 + grey] = Rgb::new(value, value, value);
        grey += 1;
    }

    palette
}

/// The xterm 256-color palette.
pub const EIGHT_BIT_PALETTE: [Rgb; 256] = build_eight_bit_palette();
