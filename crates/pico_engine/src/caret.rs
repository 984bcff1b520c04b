//! Cursor position tracking.

/// The text cursor. `row` and `col` are 1-indexed; `col` may rest at
/// `cols + 1` after writing into the last column ("pending wrap") and the
/// grid resolves that state on the next insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caret {
    pub(crate) row: usize,
    pub(crate) col: usize,
    pub(crate) saved: Option<(usize, usize)>,
}

impl Caret {
    pub(crate) fn new() -> Self {
        Self { row: 1, col: 1, saved: None }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn position(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub(crate) fn save(&mut self) {
        self.saved = Some((self.row, self.col));
    }

    /// Restores the saved position. Silently keeps the current position when
    /// nothing was ever saved.
    pub(crate) fn restore(&mut self) {
        if let Some((row, col)) = self.saved {
            self.row = row;
            self.col = col;
        }
    }
}

impl Default for Caret {
    fn default() -> Self {
        Self::new()
    }
}
