//! Screen model for the pico_term terminal emulator.
//!
//! The central type is [`Grid`]: a fixed-size array of styled cells plus the
//! caret, pen and mode state the escape-sequence repertoire manipulates.
//! [`GridSink`] adapts a grid to the `pico_parser_core::CommandSink` trait so
//! the parser can drive it directly; [`ScrollbackBuffer`] is the byte ring
//! that receives rows evicted off the top of the grid.

mod attribute;
pub use attribute::{Rgb, Style};

mod palette;
pub use palette::{DEFAULT_BACKGROUND, DEFAULT_FOREGROUND, EIGHT_BIT_PALETTE, FOUR_BIT_PALETTE};

mod caret;
pub use caret::Caret;

mod modes;
pub use modes::Modes;

mod cell;
pub use cell::Cell;

mod grid;
pub use grid::{Grid, Pen};

mod sink;
pub use sink::GridSink;

mod scrollback;
pub use scrollback::{RingBufferError, ScrollbackBuffer, PAGE_GRANULE};
