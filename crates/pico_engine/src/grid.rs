//! The grid buffer: a fixed rows x cols array of styled cells plus the
//! caret, pen and mode state mutated by the escape-sequence repertoire.
//!
//! All operations are infallible: out-of-range positions are clamped, never
//! rejected. The only state a caller can observe outside the documented
//! ranges is the pending-wrap column `cols + 1`.

use pico_parser_core::{EraseInDisplayMode, EraseInLineMode};

use crate::{Caret, Cell, Modes, Rgb, ScrollbackBuffer, Style, DEFAULT_BACKGROUND, DEFAULT_FOREGROUND, EIGHT_BIT_PALETTE, FOUR_BIT_PALETTE};

/// Tab stops sit at every multiple of this column count.
const TAB_WIDTH: usize = 8;

/// Current drawing attributes, applied to every newly inserted cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pen {
    pub style: Style,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            style: Style::empty(),
            fg: DEFAULT_FOREGROUND,
            bg: DEFAULT_BACKGROUND,
        }
    }
}

pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    caret: Caret,
    pen: Pen,
    modes: Modes,
    scrollback: Option<ScrollbackBuffer>,
}

impl Grid {
    /// Allocates an erased grid with the cursor at (1,1) and default modes.
    /// Dimensions are clamped to at least one row and column and are fixed
    /// for the lifetime of the grid.
    pub fn new(rows: usize, cols: usize) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        Self {
            rows,
            cols,
            cells: vec![Cell::ERASED; rows * cols],
            caret: Caret::new(),
            pen: Pen::default(),
            modes: Modes::default(),
            scrollback: None,
        }
    }

    /// Like [`Grid::new`], with a scrollback ring attached: rows evicted by
    /// [`Grid::shift_up`] are serialized into it as text lines.
    pub fn with_scrollback(rows: usize, cols: usize, scrollback: ScrollbackBuffer) -> Self {
        let mut grid = Self::new(rows, cols);
        grid.scrollback = Some(scrollback);
        grid
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn caret(&self) -> &Caret {
        &self.caret
    }

    pub fn pen(&self) -> &Pen {
        &self.pen
    }

    pub fn modes(&self) -> Modes {
        self.modes
    }

    pub fn scrollback(&self) -> Option<&ScrollbackBuffer> {
        self.scrollback.as_ref()
    }

    /// The cell at a 1-indexed position, clamped into range.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        &self.cells[self.index(row.clamp(1, self.rows), col.clamp(1, self.cols))]
    }

    fn index(&self, row: usize, col: usize) -> usize {
        (row - 1) * self.cols + (col - 1)
    }

    /// Writes one character at the cursor using the pen, then advances the
    /// cursor. A cursor resting past the right edge either wraps to the next
    /// row first (AUTOWRAP) or swallows the character (no AUTOWRAP).
    pub fn insert(&mut self, ch: char) {
        if self.caret.col > self.cols {
            if !self.modes.contains(Modes::AUTOWRAP) {
                return;
            }
            self.caret.col = 1;
            self.line_feed();
        }

        let (fg, bg) = if self.pen.style.contains(Style::INVERT) {
            (self.pen.bg, self.pen.fg)
        } else {
            (self.pen.fg, self.pen.bg)
        };
        let index = self.index(self.caret.row, self.caret.col);
        self.cells[index] = Cell::new(ch, self.pen.style, fg, bg);

        // This may leave the cursor at cols + 1; the check above resolves
        // the pending wrap on the next insertion.
        self.caret.col += 1;
    }

    /// Moves rows 2..rows up by one. The evicted top row goes to the
    /// scrollback ring (trailing blanks trimmed); the bottom row is erased.
    pub fn shift_up(&mut self) {
        if let Some(scrollback) = &mut self.scrollback {
            let mut line = String::new();
            for cell in &self.cells[..self.cols] {
                line.push(cell.ch().unwrap_or(' '));
            }
            scrollback.write(line.trim_end().as_bytes());
            scrollback.write(b"\n");
        }

        self.cells.copy_within(self.cols.., 0);
        let bottom = (self.rows - 1) * self.cols;
        for cell in &mut self.cells[bottom..] {
            *cell = Cell::ERASED;
        }
    }

    /// LF: moves down one row, scrolling when already on the bottom row.
    /// The column is left alone.
    pub fn line_feed(&mut self) {
        self.caret.row += 1;
        if self.caret.row > self.rows {
            self.caret.row = self.rows;
            self.shift_up();
        }
    }

    /// CR: back to column 1.
    pub fn carriage_return(&mut self) {
        self.caret.col = 1;
    }

    /// BS: one column back, stopping at the left edge.
    pub fn backspace(&mut self) {
        self.caret.col = (self.caret.col - 1).max(1);
    }

    /// HT: advance to the next tab stop, wrapping to the next row (and
    /// scrolling if needed) when that would pass the right edge.
    pub fn tab_forward(&mut self) {
        let col = (self.caret.col - 1) / TAB_WIDTH * TAB_WIDTH + TAB_WIDTH + 1;
        if col > self.cols {
            self.caret.col = 1;
            self.line_feed();
        } else {
            self.caret.col = col;
        }
    }

    /// CUP: absolute move, clamped into `[1..rows] x [1..cols]`.
    pub fn move_to(&mut self, row: usize, col: usize) {
        self.caret.row = row.clamp(1, self.rows);
        self.caret.col = col.clamp(1, self.cols);
    }

    pub fn cursor_up(&mut self, n: usize) {
        self.caret.row = self.caret.row.saturating_sub(n).max(1);
    }

    pub fn cursor_down(&mut self, n: usize) {
        self.caret.row = (self.caret.row + n).min(self.rows);
    }

    pub fn cursor_forward(&mut self, n: usize) {
        self.caret.col = (self.caret.col + n).min(self.cols);
    }

    pub fn cursor_back(&mut self, n: usize) {
        self.caret.col = self.caret.col.saturating_sub(n).max(1);
    }

    pub fn save_cursor(&mut self) {
        self.caret.save();
    }

    /// No-op when no position was ever saved.
    pub fn restore_cursor(&mut self) {
        self.caret.restore();
    }

    pub fn set_mode(&mut self, mode: Modes) {
        self.modes.insert(mode);
    }

    pub fn clear_mode(&mut self, mode: Modes) {
        self.modes.remove(mode);
    }

    pub fn add_style(&mut self, style: Style) {
        self.pen.style.insert(style);
    }

    pub fn remove_style(&mut self, style: Style) {
        self.pen.style.remove(style);
    }

    pub fn set_foreground_base(&mut self, index: u8) {
        self.pen.fg = FOUR_BIT_PALETTE[(index & 0xF) as usize];
    }

    pub fn set_background_base(&mut self, index: u8) {
        self.pen.bg = FOUR_BIT_PALETTE[(index & 0xF) as usize];
    }

    pub fn set_foreground_extended(&mut self, index: u8) {
        self.pen.fg = EIGHT_BIT_PALETTE[index as usize];
    }

    pub fn set_background_extended(&mut self, index: u8) {
        self.pen.bg = EIGHT_BIT_PALETTE[index as usize];
    }

    pub fn set_foreground_rgb(&mut self, color: Rgb) {
        self.pen.fg = color;
    }

    pub fn set_background_rgb(&mut self, color: Rgb) {
        self.pen.bg = color;
    }

    /// SGR 0: clears all style bits, foreground to bright white, background
    /// to black.
    pub fn reset_pen(&mut self) {
        self.pen.style = Style::empty();
        self.pen.fg = FOUR_BIT_PALETTE[15];
        self.pen.bg = FOUR_BIT_PALETTE[0];
    }

    /// ED: erase affected cells (length zeroed, colors and style untouched).
    pub fn erase_in_display(&mut self, mode: EraseInDisplayMode) {
        match mode {
            EraseInDisplayMode::CursorToEnd => {
                let start = self.index(self.caret.row, self.caret.col.min(self.cols));
                for cell in &mut self.cells[start..] {
                    cell.erase();
                }
            }
            EraseInDisplayMode::StartToCursor => {
                let end = self.index(self.caret.row, self.caret.col.min(self.cols));
                for cell in &mut self.cells[..=end] {
                    cell.erase();
                }
            }
            EraseInDisplayMode::All => {
                for cell in &mut self.cells {
                    cell.erase();
                }
            }
            EraseInDisplayMode::AllAndScrollback => {
                for cell in &mut self.cells {
                    cell.erase();
                }
                if let Some(scrollback) = &mut self.scrollback {
                    scrollback.clear();
                }
            }
        }
    }

    /// EL: erase within the cursor row.
    pub fn erase_in_line(&mut self, mode: EraseInLineMode) {
        let row_start = self.index(self.caret.row, 1);
        let cursor = self.index(self.caret.row, self.caret.col.min(self.cols));
        let range = match mode {
            EraseInLineMode::CursorToEnd => cursor..row_start + self.cols,
            EraseInLineMode::StartToCursor => row_start..cursor + 1,
            EraseInLineMode::All => row_start..row_start + self.cols,
        };
        for cell in &mut self.cells[range] {
            cell.erase();
        }
    }

    /// The visible grid as text, one line per row, trailing blanks trimmed.
    /// Erased cells render as spaces.
    pub fn to_display_string(&self) -> String {
        let mut out = String::new();
        for row in 0..self.rows {
            let line: String = self.cells[row * self.cols..(row + 1) * self.cols]
                .iter()
                .map(|cell| cell.ch().unwrap_or(' '))
                .collect();
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}
