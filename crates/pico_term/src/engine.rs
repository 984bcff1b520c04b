//! The engine loop: the single owner of the grid and the parser.
//!
//! [`Terminal`] serializes everything that can touch the grid (child
//! output, key events, focus changes), so mode bits set by a `feed` are
//! always visible to the key lookup that follows it. Bytes owed to the
//! child (DSR replies, encoded keys, focus reports) accumulate in one
//! outbound queue in the order they were produced.
//!
//! [`run_loop`] is the blocking embodiment of that contract over a pair of
//! channels; the binary feeds it from a PTY, tests feed it by hand.

use std::io::Write;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use pico_engine::{Grid, GridSink};
use pico_parser_core::{AnsiParser, CommandParser};
use thiserror::Error;

use crate::keymap::{self, KeyEvent};

/// How long the loop naps when neither collaborator had anything for us.
const IDLE_POLL: Duration = Duration::from_millis(2);

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("writing to the child failed: {0}")]
    ChildWrite(#[source] std::io::Error),
}

/// Events arriving from the windowing collaborator.
#[derive(Debug)]
pub enum UiEvent {
    Key(KeyEvent),
    Focus(bool),
    Close,
}

/// Liveness probe for the child process.
pub trait ChildHandle {
    fn is_alive(&mut self) -> bool;
}

pub struct Terminal {
    grid: Grid,
    parser: AnsiParser,
    outbound: Vec<u8>,
    focused: bool,
}

impl Terminal {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::with_grid(Grid::new(rows, cols))
    }

    pub fn with_grid(grid: Grid) -> Self {
        Self {
            grid,
            parser: AnsiParser::new(),
            outbound: Vec::new(),
            focused: true,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Runs child output through the parser into the grid. Partial escape
    /// sequences are retained; responses the sequences ask for are queued
    /// on the outbound buffer.
    pub fn feed(&mut self, bytes: &[u8]) {
        let mut sink = GridSink::new(&mut self.grid, &mut self.outbound);
        self.parser.parse(bytes, &mut sink);
    }

    /// Encodes one key event onto the outbound buffer. Composed text goes
    /// through verbatim; symbolic keys go through the rule table with the
    /// grid's current mode bits.
    pub fn key_event(&mut self, event: &KeyEvent) {
        if let Some(text) = &event.text {
            self.outbound.extend_from_slice(text.as_bytes());
            return;
        }
        if let Some(key) = event.key {
            if let Some(bytes) = keymap::lookup_key(key, event.modifiers, event.numlock, self.grid.modes()) {
                self.outbound.extend_from_slice(bytes);
            }
        }
    }

    /// Queues a focus report, but only on actual transitions; window
    /// managers like to repeat themselves.
    pub fn focus_changed(&mut self, focused: bool) {
        if focused != self.focused {
            self.outbound.extend_from_slice(if focused { b"\x1b[I" } else { b"\x1b[O" });
        }
        self.focused = focused;
    }

    pub fn has_outbound(&self) -> bool {
        !self.outbound.is_empty()
    }

    /// Takes everything owed to the child, in production order.
    pub fn drain_outbound(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.outbound)
    }
}

/// Drives a [`Terminal`] until the child exits or the UI asks to close.
///
/// Child bytes are always applied before key events picked up in the same
/// round, and the outbound queue is flushed exactly in production order.
/// A write failure towards the child is the only fatal condition.
pub fn run_loop(
    terminal: &mut Terminal,
    child_output: &Receiver<Vec<u8>>,
    ui_events: &Receiver<UiEvent>,
    child_input: &mut dyn Write,
    child: &mut dyn ChildHandle,
) -> Result<(), EngineError> {
    loop {
        let mut idle = true;

        while let Ok(bytes) = child_output.try_recv() {
            terminal.feed(&bytes);
            idle = false;
        }

        while let Ok(event) = ui_events.try_recv() {
            match event {
                UiEvent::Key(key) => terminal.key_event(&key),
                UiEvent::Focus(focused) => terminal.focus_changed(focused),
                UiEvent::Close => return Ok(()),
            }
            idle = false;
        }

        if terminal.has_outbound() {
            let outbound = terminal.drain_outbound();
            child_input.write_all(&outbound).map_err(EngineError::ChildWrite)?;
            child_input.flush().map_err(EngineError::ChildWrite)?;
        }

        if !child.is_alive() {
            return Ok(());
        }

        if idle {
            std::thread::sleep(IDLE_POLL);
        }
    }
}
