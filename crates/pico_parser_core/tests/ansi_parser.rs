use pico_parser_core::{
    AnsiParser, Color, CommandParser, CommandSink, DecPrivateMode, DeviceStatusReport, Direction, EraseInDisplayMode, EraseInLineMode, Intensity,
    OperatingSystemCommand, ParseError, SgrAttribute, TerminalCommand,
};
use pretty_assertions::assert_eq;

#[derive(Debug, Clone, PartialEq, Eq)]
enum OwnedOsc {
    SetTitle(Vec<u8>),
    SetIconName(Vec<u8>),
    SetWindowTitle(Vec<u8>),
    SetWorkingDirectory(Vec<u8>),
    Hyperlink { params: Vec<u8>, uri: Vec<u8> },
    SemanticPrompt { kind: u8, data: Vec<u8> },
}

#[derive(Default)]
struct CollectSink {
    text: Vec<u8>,
    cmds: Vec<TerminalCommand<'static>>,
    oscs: Vec<OwnedOsc>,
    errors: Vec<ParseError>,
}

fn to_static(cmd: TerminalCommand<'_>) -> TerminalCommand<'static> {
    use TerminalCommand::*;
    match cmd {
        Printable(_) => unreachable!("printable text is delivered via print()"),
        Bell => Bell,
        Backspace => Backspace,
        Tab => Tab,
        LineFeed => LineFeed,
        CarriageReturn => CarriageReturn,
        CsiMoveCursor(direction, n) => CsiMoveCursor(direction, n),
        CsiCursorPosition(row, col) => CsiCursorPosition(row, col),
        CsiEraseInDisplay(mode) => CsiEraseInDisplay(mode),
        CsiEraseInLine(mode) => CsiEraseInLine(mode),
        CsiSelectGraphicRendition(attr) => CsiSelectGraphicRendition(attr),
        CsiDeviceStatusReport(report) => CsiDeviceStatusReport(report),
        CsiDecPrivateModeSet(mode) => CsiDecPrivateModeSet(mode),
        CsiDecPrivateModeReset(mode) => CsiDecPrivateModeReset(mode),
        EscSaveCursor => EscSaveCursor,
        EscRestoreCursor => EscRestoreCursor,
        EscKeypadApplicationMode => EscKeypadApplicationMode,
        EscKeypadNumericMode => EscKeypadNumericMode,
    }
}

impl CommandSink for CollectSink {
    fn print(&mut self, text: &[u8]) {
        self.text.extend_from_slice(text);
    }

    fn emit(&mut self, cmd: TerminalCommand<'_>) {
        self.cmds.push(to_static(cmd));
    }

    fn operating_system_command(&mut self, osc: OperatingSystemCommand<'_>) {
        self.oscs.push(match osc {
            OperatingSystemCommand::SetTitle(data) => OwnedOsc::SetTitle(data.to_vec()),
            OperatingSystemCommand::SetIconName(data) => OwnedOsc::SetIconName(data.to_vec()),
            OperatingSystemCommand::SetWindowTitle(data) => OwnedOsc::SetWindowTitle(data.to_vec()),
            OperatingSystemCommand::SetWorkingDirectory(data) => OwnedOsc::SetWorkingDirectory(data.to_vec()),
            OperatingSystemCommand::Hyperlink { params, uri } => OwnedOsc::Hyperlink {
                params: params.to_vec(),
                uri: uri.to_vec(),
            },
            OperatingSystemCommand::SemanticPrompt { kind, data } => OwnedOsc::SemanticPrompt { kind, data: data.to_vec() },
        });
    }

    fn report_error(&mut self, error: ParseError) {
        self.errors.push(error);
    }
}

fn parse(input: &[u8]) -> CollectSink {
    let mut parser = AnsiParser::new();
    let mut sink = CollectSink::default();
    parser.parse(input, &mut sink);
    sink
}

#[test]
fn basic_text() {
    let sink = parse(b"Hello World");
    assert_eq!(sink.text, b"Hello World");
    assert!(sink.cmds.is_empty());
    assert!(sink.errors.is_empty());
}

#[test]
fn control_characters() {
    let sink = parse(b"Hello\r\nWorld");
    assert_eq!(sink.text, b"HelloWorld");
    assert_eq!(sink.cmds, vec![TerminalCommand::CarriageReturn, TerminalCommand::LineFeed]);
}

#[test]
fn bell_backspace_tab() {
    let sink = parse(b"\x07\x08\x09");
    assert_eq!(sink.cmds, vec![TerminalCommand::Bell, TerminalCommand::Backspace, TerminalCommand::Tab]);
}

#[test]
fn unsupported_c0_is_reported_not_fatal() {
    let sink = parse(b"A\x01B");
    assert_eq!(sink.text, b"AB");
    assert_eq!(sink.errors, vec![ParseError::UnsupportedControl { byte: 0x01 }]);
}

#[test]
fn multibyte_utf8_characters() {
    // 2-byte (é), 3-byte (€), 4-byte (𝄞)
    let sink = parse("aé€𝄞b".as_bytes());
    assert_eq!(String::from_utf8(sink.text).unwrap(), "aé€𝄞b");
    assert!(sink.errors.is_empty());
}

#[test]
fn malformed_utf8_recovers_to_ground() {
    // 0xC2 opens a 2-byte character but 0x20 is not a continuation byte.
    let sink = parse(b"A\xC2\x20B");
    assert_eq!(sink.text, b"AB");
    assert_eq!(sink.errors, vec![ParseError::MalformedUtf8 { byte: 0x20 }]);
}

#[test]
fn stray_continuation_byte_is_reported() {
    let sink = parse(b"A\x80B");
    assert_eq!(sink.text, b"AB");
    assert_eq!(
        sink.errors,
        vec![ParseError::UnexpectedByte {
            state: "ground",
            byte: 0x80
        }]
    );
}

#[test]
fn csi_cursor_movement() {
    let sink = parse(b"\x1b[5A\x1b[B\x1b[2C\x1b[7D");
    assert_eq!(
        sink.cmds,
        vec![
            TerminalCommand::CsiMoveCursor(Direction::Up, 5),
            TerminalCommand::CsiMoveCursor(Direction::Down, 1),
            TerminalCommand::CsiMoveCursor(Direction::Right, 2),
            TerminalCommand::CsiMoveCursor(Direction::Left, 7),
        ]
    );
}

#[test]
fn csi_cursor_position() {
    let sink = parse(b"\x1b[10;20H\x1b[H\x1b[3;4f");
    assert_eq!(
        sink.cmds,
        vec![
            TerminalCommand::CsiCursorPosition(10, 20),
            TerminalCommand::CsiCursorPosition(1, 1),
            TerminalCommand::CsiCursorPosition(3, 4),
        ]
    );
}

#[test]
fn csi_erase() {
    let sink = parse(b"\x1b[J\x1b[1J\x1b[2J\x1b[3J\x1b[K\x1b[1K\x1b[2K");
    assert_eq!(
        sink.cmds,
        vec![
            TerminalCommand::CsiEraseInDisplay(EraseInDisplayMode::CursorToEnd),
            TerminalCommand::CsiEraseInDisplay(EraseInDisplayMode::StartToCursor),
            TerminalCommand::CsiEraseInDisplay(EraseInDisplayMode::All),
            TerminalCommand::CsiEraseInDisplay(EraseInDisplayMode::AllAndScrollback),
            TerminalCommand::CsiEraseInLine(EraseInLineMode::CursorToEnd),
            TerminalCommand::CsiEraseInLine(EraseInLineMode::StartToCursor),
            TerminalCommand::CsiEraseInLine(EraseInLineMode::All),
        ]
    );
}

#[test]
fn erase_in_line_defaults_to_cursor_to_end() {
    let sink = parse(b"\x1b[K");
    assert_eq!(sink.cmds, vec![TerminalCommand::CsiEraseInLine(EraseInLineMode::CursorToEnd)]);
}

#[test]
fn sgr_basic_attributes() {
    let sink = parse(b"\x1b[1;31m");
    assert_eq!(
        sink.cmds,
        vec![
            TerminalCommand::CsiSelectGraphicRendition(SgrAttribute::Intensity(Intensity::Bold)),
            TerminalCommand::CsiSelectGraphicRendition(SgrAttribute::Foreground(Color::Base(1))),
        ]
    );
}

#[test]
fn sgr_empty_is_reset() {
    let sink = parse(b"\x1b[m");
    assert_eq!(sink.cmds, vec![TerminalCommand::CsiSelectGraphicRendition(SgrAttribute::Reset)]);
}

#[test]
fn sgr_bright_colors() {
    let sink = parse(b"\x1b[91;103m");
    assert_eq!(
        sink.cmds,
        vec![
            TerminalCommand::CsiSelectGraphicRendition(SgrAttribute::Foreground(Color::Base(9))),
            TerminalCommand::CsiSelectGraphicRendition(SgrAttribute::Background(Color::Base(11))),
        ]
    );
}

#[test]
fn sgr_extended_colors_consume_sub_parameters() {
    let sink = parse(b"\x1b[38;5;200;4m");
    assert_eq!(
        sink.cmds,
        vec![
            TerminalCommand::CsiSelectGraphicRendition(SgrAttribute::Foreground(Color::Extended(200))),
            TerminalCommand::CsiSelectGraphicRendition(SgrAttribute::Underline(true)),
        ]
    );

    let sink = parse(b"\x1b[48;2;10;20;30m");
    assert_eq!(
        sink.cmds,
        vec![TerminalCommand::CsiSelectGraphicRendition(SgrAttribute::Background(Color::Rgb(10, 20, 30)))]
    );
}

#[test]
fn sgr_default_colors() {
    let sink = parse(b"\x1b[39;49m");
    assert_eq!(
        sink.cmds,
        vec![
            TerminalCommand::CsiSelectGraphicRendition(SgrAttribute::Foreground(Color::Default)),
            TerminalCommand::CsiSelectGraphicRendition(SgrAttribute::Background(Color::Default)),
        ]
    );
}

#[test]
fn dec_private_modes() {
    let sink = parse(b"\x1b[?1h\x1b[?7l\x1b[?25h\x1b[?2004h");
    assert_eq!(
        sink.cmds,
        vec![
            TerminalCommand::CsiDecPrivateModeSet(DecPrivateMode::ApplicationCursorKeys),
            TerminalCommand::CsiDecPrivateModeReset(DecPrivateMode::AutoWrap),
            TerminalCommand::CsiDecPrivateModeSet(DecPrivateMode::HideCursor),
            TerminalCommand::CsiDecPrivateModeSet(DecPrivateMode::BracketedPaste),
        ]
    );
}

#[test]
fn unknown_dec_private_mode_is_reported() {
    let sink = parse(b"\x1b[?1049h");
    assert!(sink.cmds.is_empty());
    assert_eq!(
        sink.errors,
        vec![ParseError::InvalidParameter {
            command: "CsiDecPrivateModeSet",
            value: 1049
        }]
    );
}

#[test]
fn device_status_report() {
    let sink = parse(b"\x1b[6n");
    assert_eq!(sink.cmds, vec![TerminalCommand::CsiDeviceStatusReport(DeviceStatusReport::CursorPosition)]);
}

#[test]
fn unrecognized_status_report_is_reported_and_skipped() {
    let sink = parse(b"\x1b[5n");
    assert!(sink.cmds.is_empty());
    assert_eq!(
        sink.errors,
        vec![ParseError::InvalidParameter {
            command: "CsiDeviceStatusReport",
            value: 5
        }]
    );
}

#[test]
fn save_and_restore_cursor() {
    let sink = parse(b"\x1b7\x1b8");
    assert_eq!(sink.cmds, vec![TerminalCommand::EscSaveCursor, TerminalCommand::EscRestoreCursor]);
}

#[test]
fn keypad_modes() {
    let sink = parse(b"\x1b=\x1b>");
    assert_eq!(sink.cmds, vec![TerminalCommand::EscKeypadApplicationMode, TerminalCommand::EscKeypadNumericMode]);
}

#[test]
fn unknown_fp_sequence_is_reported() {
    let sink = parse(b"\x1b9A");
    assert_eq!(sink.text, b"A");
    assert_eq!(sink.errors, vec![ParseError::UnknownFp { byte: b'9' }]);
}

#[test]
fn unknown_csi_final_byte_is_reported_and_skipped() {
    let sink = parse(b"A\x1b[5q B");
    assert_eq!(sink.text, b"A B");
    assert!(sink.cmds.is_empty());
    assert_eq!(
        sink.errors,
        vec![ParseError::UnknownCsi {
            final_byte: b'q',
            private: false
        }]
    );
}

#[test]
fn too_many_csi_parameters_abort_the_sequence() {
    let sink = parse(b"\x1b[1;2;3;4;5;6mX");
    assert_eq!(sink.text, b"6mX");
    assert!(sink.cmds.is_empty());
    assert_eq!(sink.errors, vec![ParseError::TooManyParameters { max: 5 }]);
}

#[test]
fn osc_title_with_bel_terminator() {
    let sink = parse(b"\x1b]0;my title\x07");
    assert_eq!(sink.oscs, vec![OwnedOsc::SetTitle(b"my title".to_vec())]);
}

#[test]
fn osc_title_with_st_terminator() {
    let sink = parse(b"\x1b]2;other title\x1b\\");
    assert_eq!(sink.oscs, vec![OwnedOsc::SetWindowTitle(b"other title".to_vec())]);
}

#[test]
fn osc_esc_without_backslash_stays_in_string() {
    // The ESC belongs to the payload; the string ends at BEL.
    let sink = parse(b"\x1b]0;a\x1bzb\x07");
    assert_eq!(sink.oscs, vec![OwnedOsc::SetTitle(b"a\x1bzb".to_vec())]);
}

#[test]
fn osc_working_directory_and_hyperlink() {
    let sink = parse(b"\x1b]7;file:///home/user\x07\x1b]8;;https://example.com\x07");
    assert_eq!(
        sink.oscs,
        vec![
            OwnedOsc::SetWorkingDirectory(b"file:///home/user".to_vec()),
            OwnedOsc::Hyperlink {
                params: Vec::new(),
                uri: b"https://example.com".to_vec(),
            },
        ]
    );
}

#[test]
fn osc_semantic_prompt() {
    let sink = parse(b"\x1b]133;A\x07\x1b]133;D;0\x07");
    assert_eq!(
        sink.oscs,
        vec![
            OwnedOsc::SemanticPrompt { kind: b'A', data: Vec::new() },
            OwnedOsc::SemanticPrompt {
                kind: b'D',
                data: b";0".to_vec()
            },
        ]
    );
}

#[test]
fn unknown_osc_prefix_is_reported() {
    let sink = parse(b"\x1b]52;c;aGk=\x07");
    assert!(sink.oscs.is_empty());
    assert_eq!(sink.errors, vec![ParseError::UnknownOsc]);
}

#[test]
fn osc_overflow_truncates_but_still_dispatches() {
    let mut input = b"\x1b]0;".to_vec();
    input.extend(std::iter::repeat(b'x').take(2000));
    input.push(0x07);

    let sink = parse(&input);
    assert_eq!(sink.errors, vec![ParseError::OscOverflow { limit: 1024 }]);
    assert_eq!(sink.oscs.len(), 1);
    match &sink.oscs[0] {
        OwnedOsc::SetTitle(title) => assert_eq!(title.len(), 1024 - 2),
        other => panic!("unexpected OSC {other:?}"),
    }
}

/// Feeding a stream byte-by-byte must produce the same commands as feeding it
/// in one call: sequences are resumable at any split point.
#[test]
fn split_feed_matches_single_feed() {
    let input: &[u8] = "A\x1b[1;32mgrün\x1b[0m\x1b]0;t\x1b\\\x1b[6n\r\nB".as_bytes();

    let whole = parse(input);

    let mut parser = AnsiParser::new();
    let mut split = CollectSink::default();
    for &byte in input {
        parser.parse(&[byte], &mut split);
    }

    assert_eq!(whole.text, split.text);
    assert_eq!(whole.cmds, split.cmds);
    assert_eq!(whole.oscs, split.oscs);
    assert_eq!(whole.errors, split.errors);
}

#[test]
fn csi_split_across_feeds() {
    let mut parser = AnsiParser::new();
    let mut sink = CollectSink::default();

    parser.parse(b"\x1b[1", &mut sink);
    assert!(sink.cmds.is_empty());
    parser.parse(b"0;2", &mut sink);
    assert!(sink.cmds.is_empty());
    parser.parse(b"0H", &mut sink);

    assert_eq!(sink.cmds, vec![TerminalCommand::CsiCursorPosition(10, 20)]);
}
