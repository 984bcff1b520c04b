//! PTY allocation and child spawn.
//!
//! The engine loop only ever sees channel/trait interfaces; this module is
//! the one place that knows a PTY is behind them. A reader thread pumps
//! child output into an mpsc channel so the loop never blocks on the PTY.

use std::io::{Read, Write};
use std::sync::mpsc::{self, Receiver};
use std::thread;

use anyhow::Context;
use portable_pty::{native_pty_system, Child, CommandBuilder, MasterPty, PtySize};

use crate::engine::ChildHandle;

/// A running child on its PTY.
pub struct PtySession {
    /// Child output, one chunk per read.
    pub output: Receiver<Vec<u8>>,
    /// Writes reach the child's stdin.
    pub input: Box<dyn Write + Send>,
    /// Liveness probe for the engine loop.
    pub handle: ProcessHandle,
}

/// Owns the child process and the master side of the PTY (dropping the
/// master hangs up on the child).
pub struct ProcessHandle {
    child: Box<dyn Child + Send + Sync>,
    _master: Box<dyn MasterPty + Send>,
}

impl ChildHandle for ProcessHandle {
    fn is_alive(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(None))
    }
}

impl ProcessHandle {
    /// Blocks until the child is gone and reports whether it exited cleanly.
    pub fn wait_success(&mut self) -> bool {
        self.child.wait().map(|status| status.success()).unwrap_or(false)
    }
}

/// Spawns `command` on a fresh PTY of the given dimensions with `TERM`
/// exported for it.
pub fn spawn_shell(command: &[String], rows: u16, cols: u16, term: &str) -> anyhow::Result<PtySession> {
    let (program, args) = command.split_first().context("empty command")?;

    let pty_system = native_pty_system();
    let pair = pty_system.openpty(PtySize {
        rows,
        cols,
        pixel_width: 0,
        pixel_height: 0,
    })?;

    let mut builder = CommandBuilder::new(program);
    builder.args(args);
    builder.env("TERM", term);

    let child = pair
        .slave
        .spawn_command(builder)
        .map_err(|err| anyhow::anyhow!("failed to launch {program}: {err}"))?;
    // Only the child holds the slave side now.
    drop(pair.slave);

    let mut reader = pair.master.try_clone_reader()?;
    let input = pair.master.take_writer()?;

    let (tx, output) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = [0u8; 4096];
        loop {
            match reader.read(&mut buf) {
                // EOF or a read error both mean the child side is gone.
                Ok(0) | Err(_) => break,
                Ok(n) => {
                    if tx.send(buf[..n].to_vec()).is_err() {
                        break;
                    }
                }
            }
        }
    });

    Ok(PtySession {
        output,
        input,
        handle: ProcessHandle {
            child,
            _master: pair.master,
        },
    })
}
