//! Parser diagnostics.
//!
//! Malformed input from the child never aborts parsing: every error is
//! reported through the sink together with enough context (parser state,
//! offending byte) to reconstruct what happened, and the parser returns to
//! ground state.

use thiserror::Error;

/// Severity for diagnostic reporting. Consumers typically map these onto
/// their logging levels.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorLevel {
    /// Recognized but intentionally ignored input
    Info = 0,
    /// Well-formed input the parser does not understand
    Warning = 1,
    /// Malformed input that was discarded
    Error = 2,
}

/// Parser error types with context information
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A byte that has no transition in the current state
    #[error("unexpected byte {} in {state} state", print_char_value(*byte))]
    UnexpectedByte { state: &'static str, byte: u8 },

    /// A multi-byte UTF-8 character was interrupted by a non-continuation byte
    #[error("malformed UTF-8: {} is not a continuation byte", print_char_value(*byte))]
    MalformedUtf8 { byte: u8 },

    /// A C0 control this terminal does not implement
    #[error("unsupported control character {}", print_char_value(*byte))]
    UnsupportedControl { byte: u8 },

    /// Well-formed escape sequence with an unknown final byte
    #[error("unknown {} sequence with final byte {}", if *private { "CSI ?" } else { "CSI" }, print_char_value(*final_byte))]
    UnknownCsi { final_byte: u8, private: bool },

    /// Well-formed Fp escape sequence (ESC 0x30..0x3F) this terminal ignores
    #[error("unknown Fp escape sequence ESC {}", print_char_value(*byte))]
    UnknownFp { byte: u8 },

    /// Invalid parameter value for a recognized command
    #[error("invalid parameter {value} for {command}")]
    InvalidParameter { command: &'static str, value: i32 },

    /// A CSI sequence carried more parameters than the fixed slots allow
    #[error("CSI sequence exceeds {max} parameters")]
    TooManyParameters { max: usize },

    /// An OSC string with an unrecognized numeric prefix
    #[error("unknown OSC command")]
    UnknownOsc,

    /// The OSC buffer filled up; the tail of the string was dropped
    #[error("OSC string longer than {limit} bytes was truncated")]
    OscOverflow { limit: usize },
}

impl ParseError {
    /// The suggested severity for this error type.
    pub fn level(&self) -> ErrorLevel {
        match self {
            Self::UnexpectedByte { .. } | Self::MalformedUtf8 { .. } | Self::UnsupportedControl { .. } | Self::TooManyParameters { .. } => ErrorLevel::Error,
            Self::UnknownCsi { .. } | Self::UnknownFp { .. } | Self::InvalidParameter { .. } | Self::OscOverflow { .. } => ErrorLevel::Warning,
            Self::UnknownOsc => ErrorLevel::Info,
        }
    }
}

/// Format a byte for human-readable diagnostics: hex plus a mnemonic for
/// controls or the character itself for printable ASCII.
pub fn print_char_value(byte: u8) -> String {
    const C0_NAMES: [&str; 32] = [
        "NUL", "SOH", "STX", "ETX", "EOT", "ENQ", "ACK", "BEL", "BS", "TAB", "LF", "VT", "FF", "CR", "SO", "SI", "DLE", "DC1", "DC2", "DC3", "DC4", "NAK",
        "SYN", "ETB", "CAN", "EM", "SUB", "ESC", "FS", "GS", "RS", "US",
    ];
    match byte {
        0x00..=0x1F => format!("0x{:02X} ({})", byte, C0_NAMES[byte as usize]),
        0x20..=0x7E => format!("0x{:02X} ('{}')", byte, byte as char),
        0x7F => "0x7F (DEL)".to_string(),
        _ => format!("0x{byte:02X}"),
    }
}
