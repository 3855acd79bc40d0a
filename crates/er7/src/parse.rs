//! The ER7 parser: normalized text plus a resolved delimiter set in, a
//! message tree plus accumulated warnings out.
//!
//! The parser is a pure, single-pass function with no state shared between
//! invocations. The delimiter set is threaded through the calls as a value,
//! never held as global configuration.
//!
//! ## Lenient and strict modes
//!
//! The default mode is lenient: a segment line too short to carry an id is
//! recorded as a [`Warning::MalformedSegment`] and skipped, so a message
//! with isolated corruption still parses. Strict mode turns the same
//! condition into a fatal [`ParseError::MalformedSegment`]. An unreadable
//! header is fatal in both modes since it defines the grammar for everything
//! after it.

use crate::delimiters::Delimiters;
use crate::error::{ParseError, Warning};
use crate::escape::decode_escapes;
use crate::message::{Component, Field, Message, Repetition, Segment};
use crate::normalize::normalize_line_endings;

/// How structural problems below the header are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Record malformed segments as warnings and keep going.
    #[default]
    Lenient,
    /// Abort on the first malformed segment.
    Strict,
}

/// A successfully parsed message together with the warnings accumulated
/// while reading it.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    pub message: Message,
    pub delimiters: Delimiters,
    pub warnings: Vec<Warning>,
}

/// Parses one raw ER7 message in the default lenient mode.
pub fn parse_message(input: &str) -> Result<Parsed, ParseError> {
    parse_message_with_mode(input, ParseMode::default())
}

/// Parses one raw ER7 message.
///
/// Line endings are normalized first (idempotently), then the delimiter set
/// is resolved from the header prefix, then each non-empty line becomes a
/// segment. Trailing empty lines from a terminal segment terminator are
/// discarded.
pub fn parse_message_with_mode(input: &str, mode: ParseMode) -> Result<Parsed, ParseError> {
    let text = normalize_line_endings(input);
    let delimiters = Delimiters::from_header(&text)?;
    let mut warnings = Vec::new();
    let mut segments = Vec::new();

    for (index, line) in text.split('\r').enumerate() {
        if line.is_empty() {
            continue;
        }
        if line.chars().count() < 3 {
            match mode {
                ParseMode::Strict => {
                    return Err(ParseError::MalformedSegment {
                        index,
                        text: line.to_string(),
                    });
                }
                ParseMode::Lenient => {
                    warnings.push(Warning::MalformedSegment {
                        index,
                        text: line.to_string(),
                    });
                    continue;
                }
            }
        }
        let is_header = index == 0;
        segments.push(parse_segment(line, &delimiters, is_header, &mut warnings));
    }

    Ok(Parsed {
        message: Message { segments },
        delimiters,
        warnings,
    })
}

/// Parses one segment line. The first 3 characters are the id; the rest is
/// split on the field separator.
///
/// For the header segment the split is special-cased: the text after the id
/// starts with the field separator itself, so field 1 is reconstructed as
/// that literal character and field 2 as the literal 4-character encoding
/// string. Both are data, not delimiters applied to themselves, and are
/// neither re-split nor escape-decoded.
fn parse_segment(
    line: &str,
    delimiters: &Delimiters,
    is_header: bool,
    warnings: &mut Vec<Warning>,
) -> Segment {
    let id: String = line.chars().take(3).collect();
    let rest = &line[id.len()..];

    let mut fields: Vec<Field> = Vec::new();
    if is_header {
        fields.push(Field::literal(delimiters.field.to_string()));
        // rest = "|^~\&|..."; the token between the first two separators is
        // the encoding characters field.
        let mut tokens = rest.split(delimiters.field).skip(1);
        if let Some(encoding) = tokens.next() {
            fields.push(Field::literal(encoding));
        }
        for token in tokens {
            fields.push(parse_field(token, delimiters, warnings));
        }
    } else {
        for token in rest.split(delimiters.field).skip(1) {
            fields.push(parse_field(token, delimiters, warnings));
        }
    }

    // Trailing empty fields are elided; present-field indices never shift.
    while fields.last().is_some_and(Field::is_empty) {
        fields.pop();
    }

    Segment { id, fields }
}

fn parse_field(token: &str, delimiters: &Delimiters, warnings: &mut Vec<Warning>) -> Field {
    Field {
        repetitions: token
            .split(delimiters.repetition)
            .map(|rep| parse_repetition(rep, delimiters, warnings))
            .collect(),
    }
}

fn parse_repetition(token: &str, delimiters: &Delimiters, warnings: &mut Vec<Warning>) -> Repetition {
    Repetition {
        components: token
            .split(delimiters.component)
            .map(|comp| Component {
                subcomponents: comp
                    .split(delimiters.subcomponent)
                    .map(|sub| decode_escapes(sub, delimiters, warnings))
                    .collect(),
            })
            .collect(),
    }
}
