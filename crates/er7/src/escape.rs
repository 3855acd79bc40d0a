//! Expansion of in-field escape sequences.
//!
//! ER7 cannot carry its own delimiter characters literally, so field text
//! embeds them as `<esc>X...<esc>` sequences keyed on the message's resolved
//! escape character. Expansion happens once, during parsing; encoders see
//! only decoded text and never re-escape it.
//!
//! Unrecognized or unterminated sequences are not an error: the original
//! text is preserved verbatim and an [`Warning::UnrecognizedEscape`] is
//! recorded, matching integration-engine tolerance.

use crate::delimiters::Delimiters;
use crate::error::Warning;

/// Expands every escape sequence in `text`, collecting a warning for each
/// sequence left unexpanded.
pub fn decode_escapes(text: &str, delimiters: &Delimiters, warnings: &mut Vec<Warning>) -> String {
    if !text.contains(delimiters.escape) {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(delimiters.escape) {
        let (head, tail) = rest.split_at(start);
        out.push_str(head);

        // tail starts with the escape char; the sequence body runs to the
        // next escape char.
        let body_start = start + delimiters.escape.len_utf8();
        let Some(body_len) = rest[body_start..].find(delimiters.escape) else {
            // Unterminated: keep the remainder verbatim.
            warnings.push(Warning::UnrecognizedEscape {
                sequence: tail.to_string(),
            });
            out.push_str(tail);
            return out;
        };

        let body = &rest[body_start..body_start + body_len];
        match decode_sequence(body, delimiters) {
            Some(decoded) => out.push_str(&decoded),
            None => {
                let sequence = &rest[start..body_start + body_len + delimiters.escape.len_utf8()];
                warnings.push(Warning::UnrecognizedEscape {
                    sequence: sequence.to_string(),
                });
                out.push_str(sequence);
            }
        }
        rest = &rest[body_start + body_len + delimiters.escape.len_utf8()..];
    }
    out.push_str(rest);
    out
}

/// Decodes one sequence body, without its surrounding escape characters.
/// `None` means the sequence is not recognized.
fn decode_sequence(body: &str, delimiters: &Delimiters) -> Option<String> {
    match body {
        "F" => Some(delimiters.field.to_string()),
        "S" => Some(delimiters.component.to_string()),
        "R" => Some(delimiters.repetition.to_string()),
        "T" => Some(delimiters.subcomponent.to_string()),
        "E" => Some(delimiters.escape.to_string()),
        ".br" => Some("\r".to_string()),
        _ => match body.split_at_checked(1)? {
            // Hex byte pairs and single-byte codes decode through the
            // default 8-bit character set (no charset negotiation here).
            ("X", digits) | ("C", digits) => decode_hex_units(digits, 2)
                .map(|units| units.iter().map(|&u| char::from(u as u8)).collect()),
            // Double-byte codes are UTF-16 code units.
            ("M", digits) => decode_hex_units(digits, 4).and_then(|units| {
                units
                    .iter()
                    .map(|&u| char::from_u32(u as u32))
                    .collect::<Option<String>>()
            }),
            _ => None,
        },
    }
}

/// Splits `digits` into fixed-width hex groups. `None` when the digits do not
/// divide evenly or contain a non-hex character.
fn decode_hex_units(digits: &str, width: usize) -> Option<Vec<u16>> {
    if digits.is_empty() || digits.len() % width != 0 || !digits.is_ascii() {
        return None;
    }
    digits
        .as_bytes()
        .chunks(width)
        .map(|chunk| u16::from_str_radix(std::str::from_utf8(chunk).ok()?, 16).ok())
        .collect()
}
