//! Terminal-wide mode flags.
//!
//! Set by the parser (DECSET/DECRST and the keypad escapes), read back by
//! cell insertion, the renderer and the key encoder.

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Modes: u8 {
        /// DECCKM: cursor keys send ESC O sequences instead of ESC [.
        const APP_CURSOR      = 1 << 0;
        /// DECKPAM: keypad keys send ESC O sequences.
        const APP_KEYPAD      = 1 << 1;
        /// DECAWM: a printable past the right edge wraps to the next row.
        const AUTOWRAP        = 1 << 2;
        /// Mode 25 set: the renderer must not draw the cursor.
        const HIDE_CURSOR     = 1 << 3;
        /// Mode 2004: pasted text is bracketed with ESC[200~ / ESC[201~.
        const BRACKETED_PASTE = 1 << 4;
    }
}

impl Default for Modes {
    fn default() -> Self {
        Modes::AUTOWRAP
    }
}
