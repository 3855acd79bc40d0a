//! Error and warning taxonomy for ER7 parsing.
//!
//! Fatal conditions abort the parse and surface as [`ParseError`]; locally
//! recoverable conditions are accumulated as [`Warning`]s and returned beside
//! the parsed message in lenient mode.

/// Fatal parse errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The delimiter-defining header prefix could not be read. Always fatal:
    /// without it the rest of the message cannot be tokenized.
    MalformedHeader(String),

    /// A segment line too short to contain a 3-character id. Fatal only in
    /// strict mode; lenient mode records it as a warning and skips the line.
    MalformedSegment {
        /// Zero-based segment line index within the message.
        index: usize,
        /// The offending line text.
        text: String,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::MalformedHeader(detail) => {
                write!(f, "malformed header segment: {}", detail)
            }
            ParseError::MalformedSegment { index, text } => {
                write!(f, "malformed segment at line {}: {:?}", index + 1, text)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Non-fatal conditions recorded during a lenient parse.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// An escape sequence that is not part of the recognized set. The
    /// original text is preserved verbatim in the tree.
    UnrecognizedEscape {
        /// The sequence as it appeared, including the escape delimiters.
        sequence: String,
    },

    /// A segment line too short to contain an id, skipped in lenient mode.
    MalformedSegment { index: usize, text: String },
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::UnrecognizedEscape { sequence } => {
                write!(f, "unrecognized escape sequence {:?} left unexpanded", sequence)
            }
            Warning::MalformedSegment { index, text } => {
                write!(f, "skipped malformed segment at line {}: {:?}", index + 1, text)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_one_based_for_lines() {
        let err = ParseError::MalformedSegment {
            index: 2,
            text: "PI".to_string(),
        };
        assert_eq!(err.to_string(), "malformed segment at line 3: \"PI\"");
    }
}
