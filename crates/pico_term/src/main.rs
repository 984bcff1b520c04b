//! pico_term: a headless terminal emulator.
//!
//! Runs a command (or `$SHELL`) on a PTY, interprets everything it prints
//! into a fixed-size grid, answers its status queries, and prints the final
//! screen contents when it exits. The same [`engine::Terminal`] drives a
//! windowed front end; this binary is the smallest complete host for it.

mod engine;
mod keymap;
mod pty;

use std::sync::mpsc;

use anyhow::Context;
use clap::Parser;

use engine::Terminal;

#[derive(Parser)]
#[command(name = "pico_term", version, about = "Run a command under a terminal emulator and print the resulting screen")]
struct Cli {
    /// Grid height in rows
    #[arg(long, default_value_t = 24)]
    rows: u16,

    /// Grid width in columns
    #[arg(long, default_value_t = 80)]
    cols: u16,

    /// Value exported as TERM to the child
    #[arg(long, default_value = "pico-256color")]
    term: String,

    /// Command to run; falls back to $SHELL
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let _logger = flexi_logger::Logger::try_with_env_or_str("warn").context("logger setup failed")?.start()?;

    let cli = Cli::parse();

    let command = if cli.command.is_empty() {
        let shell = std::env::var("SHELL").context("no command given and SHELL is not set")?;
        vec![shell]
    } else {
        cli.command
    };

    let mut session = pty::spawn_shell(&command, cli.rows, cli.cols, &cli.term)?;
    let mut terminal = Terminal::new(cli.rows as usize, cli.cols as usize);

    // No windowing collaborator in the headless binary; the channel just
    // satisfies the loop contract.
    let (_ui_tx, ui_rx) = mpsc::channel();

    engine::run_loop(&mut terminal, &session.output, &ui_rx, &mut session.input, &mut session.handle)?;

    // Late output can still be sitting in the reader channel.
    while let Ok(bytes) = session.output.try_recv() {
        terminal.feed(&bytes);
    }

    print!("{}", terminal.grid().to_display_string());

    if !session.handle.wait_success() {
        log::warn!("child exited with a failure status");
    }
    Ok(())
}
