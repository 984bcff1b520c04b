//! SGR (Select Graphic Rendition) handling
//!
//! Parses the parameter list of a CSI...m sequence and emits one command per
//! attribute. Extended colors (38/48) consume their sub-parameters so a
//! sequence like `ESC[1;38;5;200;4m` applies bold, the 256-palette
//! foreground, and underline in order.

use crate::{Color, CommandSink, Intensity, ParseError, SgrAttribute, TerminalCommand};

fn emit(sink: &mut dyn CommandSink, attribute: SgrAttribute) {
    sink.emit(TerminalCommand::CsiSelectGraphicRendition(attribute));
}

/// An extended color spec starting at `params[i]` (which is 38 or 48).
/// Returns the color and the number of parameters consumed, or reports and
/// returns what to skip.
fn parse_extended_color(params: &[i32], i: usize, sink: &mut dyn CommandSink) -> (Option<Color>, usize) {
    match params.get(i + 1).copied() {
        Some(5) => {
            let index = params.get(i + 2).copied().unwrap_or(0).clamp(0, 255) as u8;
            (Some(Color::Extended(index)), 3)
        }
        Some(2) => {
            if i + 4 < params.len() {
                let r = params[i + 2].clamp(0, 255) as u8;
                let g = params[i + 3].clamp(0, 255) as u8;
                let b = params[i + 4].clamp(0, 255) as u8;
                (Some(Color::Rgb(r, g, b)), 5)
            } else {
                sink.report_error(ParseError::InvalidParameter {
                    command: "CsiSelectGraphicRendition",
                    value: params[i],
                });
                (None, params.len() - i)
            }
        }
        Some(other) => {
            sink.report_error(ParseError::InvalidParameter {
                command: "CsiSelectGraphicRendition",
                value: other,
            });
            (None, 1)
        }
        None => {
            sink.report_error(ParseError::InvalidParameter {
                command: "CsiSelectGraphicRendition",
                value: params[i],
            });
            (None, 1)
        }
    }
}

pub(crate) fn parse_sgr(params: &[i32], sink: &mut dyn CommandSink) {
    if params.is_empty() {
        emit(sink, SgrAttribute::Reset);
        return;
    }

    let mut i = 0;
    while i < params.len() {
        // An absent parameter in a list (`ESC[;31m`) counts as 0.
        let code = params[i].max(0);
        let mut consumed = 1;

        match code {
            0 => emit(sink, SgrAttribute::Reset),
            1 => emit(sink, SgrAttribute::Intensity(Intensity::Bold)),
            2 => emit(sink, SgrAttribute::Intensity(Intensity::Faint)),
            3 => emit(sink, SgrAttribute::Italic(true)),
            4 => emit(sink, SgrAttribute::Underline(true)),
            7 => emit(sink, SgrAttribute::Inverse(true)),
            9 => emit(sink, SgrAttribute::Strikeout(true)),
            22 => emit(sink, SgrAttribute::Intensity(Intensity::Normal)),
            24 => emit(sink, SgrAttribute::Underline(false)),
            27 => emit(sink, SgrAttribute::Inverse(false)),
            29 => emit(sink, SgrAttribute::Strikeout(false)),
            30..=37 => emit(sink, SgrAttribute::Foreground(Color::Base((code - 30) as u8))),
            38 => {
                let (color, n) = parse_extended_color(params, i, sink);
                if let Some(color) = color {
                    emit(sink, SgrAttribute::Foreground(color));
                }
                consumed = n;
            }
            39 => emit(sink, SgrAttribute::Foreground(Color::Default)),
            40..=47 => emit(sink, SgrAttribute::Background(Color::Base((code - 40) as u8))),
            48 => {
                let (color, n) = parse_extended_color(params, i, sink);
                if let Some(color) = color {
                    emit(sink, SgrAttribute::Background(color));
                }
                consumed = n;
            }
            49 => emit(sink, SgrAttribute::Background(Color::Default)),
            90..=97 => emit(sink, SgrAttribute::Foreground(Color::Base((code - 90 + 8) as u8))),
            100..=107 => emit(sink, SgrAttribute::Background(Color::Base((code - 100 + 8) as u8))),
            _ => sink.report_error(ParseError::InvalidParameter {
                command: "CsiSelectGraphicRendition",
                value: code,
            }),
        }

        i += consumed;
    }
}
