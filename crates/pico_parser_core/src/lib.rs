//! Core parser infrastructure: the command vocabulary emitted by the ANSI
//! parser and the sink/parser traits that connect it to a screen model.

mod ansi;
pub use ansi::AnsiParser;

mod errors;
pub use errors::{ErrorLevel, ParseError, print_char_value};

/// Cursor movement direction for the CUU/CUD/CUF/CUB family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Erase in Display mode for the ED command (ESC[{n}J)
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraseInDisplayMode {
    /// Clear from cursor to end of display
    CursorToEnd = 0,
    /// Clear from start of display to cursor
    StartToCursor = 1,
    /// Clear entire display
    All = 2,
    /// Clear entire display and scrollback buffer
    AllAndScrollback = 3,
}

impl EraseInDisplayMode {
    fn from_param(n: i32) -> Option<Self> {
        match n {
            0 => Some(Self::CursorToEnd),
            1 => Some(Self::StartToCursor),
            2 => Some(Self::All),
            3 => Some(Self::AllAndScrollback),
            _ => None,
        }
    }
}

/// Erase in Line mode for the EL command (ESC[{n}K)
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraseInLineMode {
    /// Clear from cursor to end of line
    CursorToEnd = 0,
    /// Clear from start of line to cursor
    StartToCursor = 1,
    /// Clear entire line
    All = 2,
}

impl EraseInLineMode {
    fn from_param(n: i32) -> Option<Self> {
        match n {
            0 => Some(Self::CursorToEnd),
            1 => Some(Self::StartToCursor),
            2 => Some(Self::All),
            _ => None,
        }
    }
}

/// Device Status Report type for the DSR command (ESC[{n}n)
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceStatusReport {
    /// Report cursor position (reply: ESC[{row};{col}R)
    CursorPosition = 6,
}

impl DeviceStatusReport {
    fn from_param(n: i32) -> Option<Self> {
        match n {
            6 => Some(Self::CursorPosition),
            _ => None,
        }
    }
}

/// DEC private modes for DECSET/DECRST (ESC[?{n}h / ESC[?{n}l).
///
/// Only the modes the grid model actually carries are recognized; everything
/// else is reported through [`CommandSink::report_error`] and skipped.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecPrivateMode {
    /// DECCKM - Cursor Keys Mode (Mode 1)
    /// When set: cursor keys send application sequences (ESC O ...)
    /// When reset: cursor keys send ANSI sequences (ESC [ ...)
    ApplicationCursorKeys = 1,
    /// DECAWM - Auto Wrap Mode (Mode 7)
    AutoWrap = 7,
    /// Mode 25 - cursor visibility. Setting the mode hides the cursor,
    /// resetting it shows the cursor again.
    HideCursor = 25,
    /// Bracketed paste (Mode 2004)
    BracketedPaste = 2004,
}

impl DecPrivateMode {
    fn from_param(n: i32) -> Option<Self> {
        match n {
            1 => Some(Self::ApplicationCursorKeys),
            7 => Some(Self::AutoWrap),
            25 => Some(Self::HideCursor),
            2004 => Some(Self::BracketedPaste),
            _ => None,
        }
    }
}

/// Color values for foreground and background SGR attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// 3/4-bit palette index (0-7 normal, 8-15 bright)
    Base(u8),
    /// Extended 256-color palette index
    Extended(u8),
    /// Direct RGB color
    Rgb(u8, u8, u8),
    /// Default/terminal color
    Default,
}

/// Intensity level for text display
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intensity {
    /// Normal intensity (default)
    Normal,
    /// Bold or increased intensity
    Bold,
    /// Faint, decreased intensity
    Faint,
}

/// SGR (Select Graphic Rendition) attributes for ESC[...m sequences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SgrAttribute {
    /// Reset all attributes to default
    Reset,
    /// Set text intensity (normal, bold, or faint)
    Intensity(Intensity),
    /// Italic text
    Italic(bool),
    /// Underlined text
    Underline(bool),
    /// Crossed out / strike-through text
    Strikeout(bool),
    /// Inverse video: swap foreground and background on inserted cells
    Inverse(bool),
    /// Set foreground color
    Foreground(Color),
    /// Set background color
    Background(Color),
}

/// OSC (Operating System Command) payloads, already split at the numeric
/// prefix. Borrowed slices point into the parser's OSC buffer and are only
/// valid for the duration of the callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatingSystemCommand<'a> {
    /// OSC 0 - set icon name and window title
    SetTitle(&'a [u8]),
    /// OSC 1 - set icon name
    SetIconName(&'a [u8]),
    /// OSC 2 - set window title
    SetWindowTitle(&'a [u8]),
    /// OSC 7 - working directory hint (file:// URL)
    SetWorkingDirectory(&'a [u8]),
    /// OSC 8 - hyperlink region
    Hyperlink { params: &'a [u8], uri: &'a [u8] },
    /// OSC 133 - shell integration semantic region marker (A..D)
    SemanticPrompt { kind: u8, data: &'a [u8] },
}

/// One action recognized by a parser. Commands that carry text borrow from
/// the input buffer.
#[derive(Debug, PartialEq, Eq)]
pub enum TerminalCommand<'a> {
    /// A run of printable bytes. The slice is valid UTF-8: either a run of
    /// printable ASCII or the complete encoding of a single codepoint.
    Printable(&'a [u8]),

    // C0 controls
    Bell,
    Backspace,
    Tab,
    LineFeed,
    CarriageReturn,

    // CSI sequences
    /// CUU/CUD/CUF/CUB - relative cursor movement: ESC[{n}A..D
    CsiMoveCursor(Direction, u16),
    /// CUP - Cursor Position: ESC[{row};{col}H (or f)
    CsiCursorPosition(u16, u16),
    /// ED - Erase in Display: ESC[{n}J
    CsiEraseInDisplay(EraseInDisplayMode),
    /// EL - Erase in Line: ESC[{n}K
    CsiEraseInLine(EraseInLineMode),
    /// SGR - Select Graphic Rendition: ESC[...m, one command per attribute
    CsiSelectGraphicRendition(SgrAttribute),
    /// DSR - Device Status Report: ESC[{n}n
    CsiDeviceStatusReport(DeviceStatusReport),
    /// DECSET - DEC Private Mode Set: ESC[?{n}h, one command per mode
    CsiDecPrivateModeSet(DecPrivateMode),
    /// DECRST - DEC Private Mode Reset: ESC[?{n}l, one command per mode
    CsiDecPrivateModeReset(DecPrivateMode),

    // ESC sequences (non-CSI)
    /// DECSC - Save Cursor: ESC 7
    EscSaveCursor,
    /// DECRC - Restore Cursor: ESC 8
    EscRestoreCursor,
    /// DECKPAM - Keypad Application Mode: ESC =
    EscKeypadApplicationMode,
    /// DECKPNM - Keypad Numeric Mode: ESC >
    EscKeypadNumericMode,
}

/// Receives the commands a [`CommandParser`] produces.
///
/// The sink is where parsing and screen mutation meet: the parser stays free
/// of screen knowledge and the screen model stays free of byte-level state.
pub trait CommandSink {
    /// A run of printable text. Guaranteed valid UTF-8 by the parser.
    fn print(&mut self, text: &[u8]);

    fn emit(&mut self, cmd: TerminalCommand<'_>);

    /// A complete OSC string. Default implementation ignores it.
    fn operating_system_command(&mut self, _osc: OperatingSystemCommand<'_>) {}

    /// Report a parsing error. Default implementation does nothing.
    fn report_error(&mut self, _error: ParseError) {}
}

/// A restartable byte-stream parser. `parse` may be called with arbitrary
/// splits of the input; state carries over between calls and every byte is
/// consumed exactly once.
pub trait CommandParser {
    fn parse(&mut self, input: &[u8], sink: &mut dyn CommandSink);
}
