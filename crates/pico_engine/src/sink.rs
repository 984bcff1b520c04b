//! CommandSink implementation for [`Grid`].
//!
//! `GridSink` is the adapter between `pico_parser_core` and the screen
//! model: it applies every parsed command to a grid and appends any bytes
//! the terminal owes the child (DSR replies) to an outbound queue.
//!
//! # Example
//!
//! ```
//! use pico_engine::{Grid, GridSink};
//! use pico_parser_core::{AnsiParser, CommandParser};
//!
//! let mut grid = Grid::new(24, 80);
//! let mut responses = Vec::new();
//! let mut parser = AnsiParser::new();
//! parser.parse(b"\x1b[1;32mHello\x1b[0m", &mut GridSink::new(&mut grid, &mut responses));
//! ```

use pico_parser_core::{
    Color, CommandSink, DecPrivateMode, DeviceStatusReport, Direction, ErrorLevel, Intensity, OperatingSystemCommand, ParseError, SgrAttribute,
    TerminalCommand,
};

use crate::{Grid, Modes, Style, FOUR_BIT_PALETTE};

pub struct GridSink<'a> {
    grid: &'a mut Grid,
    responses: &'a mut Vec<u8>,
}

impl<'a> GridSink<'a> {
    pub fn new(grid: &'a mut Grid, responses: &'a mut Vec<u8>) -> Self {
        Self { grid, responses }
    }

    fn apply_sgr(&mut self, attribute: SgrAttribute) {
        match attribute {
            SgrAttribute::Reset => self.grid.reset_pen(),
            SgrAttribute::Intensity(Intensity::Bold) => self.grid.add_style(Style::BOLD),
            SgrAttribute::Intensity(Intensity::Faint) => self.grid.add_style(Style::FAINT),
            SgrAttribute::Intensity(Intensity::Normal) => self.grid.remove_style(Style::BOLD | Style::FAINT),
            SgrAttribute::Italic(true) => self.grid.add_style(Style::ITALIC),
            SgrAttribute::Italic(false) => self.grid.remove_style(Style::ITALIC),
            SgrAttribute::Underline(true) => self.grid.add_style(Style::UNDERLINE),
            SgrAttribute::Underline(false) => self.grid.remove_style(Style::UNDERLINE),
            SgrAttribute::Strikeout(true) => self.grid.add_style(Style::STRIKEOUT),
            SgrAttribute::Strikeout(false) => self.grid.remove_style(Style::STRIKEOUT),
            SgrAttribute::Inverse(true) => self.grid.add_style(Style::INVERT),
            SgrAttribute::Inverse(false) => self.grid.remove_style(Style::INVERT),
            SgrAttribute::Foreground(color) => match color {
                Color::Base(index) => self.grid.set_foreground_base(index),
                Color::Extended(index) => self.grid.set_foreground_extended(index),
                Color::Rgb(r, g, b) => self.grid.set_foreground_rgb(crate::Rgb::new(r, g, b)),
                // The default foreground is the bright white the pen resets to.
                Color::Default => self.grid.set_foreground_rgb(FOUR_BIT_PALETTE[15]),
            },
            SgrAttribute::Background(color) => match color {
                Color::Base(index) => self.grid.set_background_base(index),
                Color::Extended(index) => self.grid.set_background_extended(index),
                Color::Rgb(r, g, b) => self.grid.set_background_rgb(crate::Rgb::new(r, g, b)),
                Color::Default => self.grid.set_background_rgb(FOUR_BIT_PALETTE[0]),
            },
        }
    }

    fn set_dec_private_mode(&mut self, mode: DecPrivateMode, enabled: bool) {
        let flag = match mode {
            DecPrivateMode::ApplicationCursorKeys => Modes::APP_CURSOR,
            DecPrivateMode::AutoWrap => Modes::AUTOWRAP,
            DecPrivateMode::HideCursor => Modes::HIDE_CURSOR,
            DecPrivateMode::BracketedPaste => Modes::BRACKETED_PASTE,
        };
        if enabled {
            self.grid.set_mode(flag);
        } else {
            self.grid.clear_mode(flag);
        }
    }
}

impl CommandSink for GridSink<'_> {
    fn print(&mut self, text: &[u8]) {
        for chunk in text.utf8_chunks() {
            for ch in chunk.valid().chars() {
                self.grid.insert(ch);
            }
            if !chunk.invalid().is_empty() {
                log::warn!("dropping {} invalid UTF-8 bytes from a printable run", chunk.invalid().len());
            }
        }
    }

    fn emit(&mut self, cmd: TerminalCommand<'_>) {
        match cmd {
            TerminalCommand::Printable(text) => self.print(text),
            // No bell of any kind.
            TerminalCommand::Bell => {}
            TerminalCommand::Backspace => self.grid.backspace(),
            TerminalCommand::Tab => self.grid.tab_forward(),
            TerminalCommand::LineFeed => self.grid.line_feed(),
            TerminalCommand::CarriageReturn => self.grid.carriage_return(),
            TerminalCommand::CsiMoveCursor(direction, n) => {
                let n = n as usize;
                match direction {
                    Direction::Up => self.grid.cursor_up(n),
                    Direction::Down => self.grid.cursor_down(n),
                    Direction::Right => self.grid.cursor_forward(n),
                    Direction::Left => self.grid.cursor_back(n),
                }
            }
            TerminalCommand::CsiCursorPosition(row, col) => self.grid.move_to(row as usize, col as usize),
            TerminalCommand::CsiEraseInDisplay(mode) => self.grid.erase_in_display(mode),
            TerminalCommand::CsiEraseInLine(mode) => self.grid.erase_in_line(mode),
            TerminalCommand::CsiSelectGraphicRendition(attribute) => self.apply_sgr(attribute),
            TerminalCommand::CsiDeviceStatusReport(DeviceStatusReport::CursorPosition) => {
                let (row, col) = self.grid.caret().position();
                self.responses.extend_from_slice(format!("\x1b[{row};{col}R").as_bytes());
            }
            TerminalCommand::CsiDecPrivateModeSet(mode) => self.set_dec_private_mode(mode, true),
            TerminalCommand::CsiDecPrivateModeReset(mode) => self.set_dec_private_mode(mode, false),
            TerminalCommand::EscSaveCursor => self.grid.save_cursor(),
            TerminalCommand::EscRestoreCursor => self.grid.restore_cursor(),
            TerminalCommand::EscKeypadApplicationMode => self.grid.set_mode(Modes::APP_KEYPAD),
            TerminalCommand::EscKeypadNumericMode => self.grid.clear_mode(Modes::APP_KEYPAD),
        }
    }

    fn operating_system_command(&mut self, osc: OperatingSystemCommand<'_>) {
        // The grid has no use for these; a windowing front end could pick
        // them up here.
        match osc {
            OperatingSystemCommand::SetTitle(title) | OperatingSystemCommand::SetWindowTitle(title) => {
                log::debug!("window title change: {:?}", String::from_utf8_lossy(title));
            }
            OperatingSystemCommand::SetIconName(_) => {}
            OperatingSystemCommand::SetWorkingDirectory(dir) => {
                log::debug!("working directory hint: {:?}", String::from_utf8_lossy(dir));
            }
            OperatingSystemCommand::Hyperlink { .. } | OperatingSystemCommand::SemanticPrompt { .. } => {}
        }
    }

    fn report_error(&mut self, error: ParseError) {
        match error.level() {
            ErrorLevel::Error => log::warn!("parser: {error}"),
            ErrorLevel::Warning => log::debug!("parser: {error}"),
            ErrorLevel::Info => log::trace!("parser: {error}"),
        }
    }
}
