//! Line-ending normalization for raw ER7 input.
//!
//! The ER7 grammar terminates segments with a carriage return and is
//! intolerant of line-feed variants, so `\r\n` and bare `\n` are rewritten to
//! `\r` before anything else looks at the text.

use std::borrow::Cow;

/// Rewrites `\r\n` and bare `\n` segment terminators to `\r`.
///
/// Idempotent: normalizing already-normalized text returns it unchanged
/// (borrowed, no allocation).
pub fn normalize_line_endings(input: &str) -> Cow<'_, str> {
    if !input.contains('\n') {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push('\r');
            }
            '\n' => out.push('\r'),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_both_line_ending_variants() {
        assert_eq!(normalize_line_endings("MSH|a\r\nPID|b\nOBX|c"), "MSH|a\rPID|b\rOBX|c");
    }

    #[test]
    fn normalized_input_is_borrowed() {
        let input = "MSH|a\rPID|b";
        assert!(matches!(normalize_line_endings(input), Cow::Borrowed(_)));
    }

    #[test]
    fn idempotent() {
        let once = normalize_line_endings("a\r\nb\nc\rd").into_owned();
        let twice = normalize_line_endings(&once).into_owned();
        assert_eq!(once, twice);
    }
}
