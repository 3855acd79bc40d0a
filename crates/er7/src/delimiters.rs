//! Delimiter resolution from the self-describing message header.
//!
//! An ER7 message declares its own control characters: the character after
//! the 3-letter header id is the field separator, and the next four are the
//! component, repetition, escape, and subcomponent separators, in that fixed
//! order. Nothing here assumes the conventional `|^~\&` set.

use crate::error::ParseError;

/// The five control characters of one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiters {
    pub field: char,
    pub component: char,
    pub repetition: char,
    pub escape: char,
    pub subcomponent: char,
}

impl Default for Delimiters {
    /// The conventional HL7 set: `|^~\&`.
    fn default() -> Self {
        Self {
            field: '|',
            component: '^',
            repetition: '~',
            escape: '\\',
            subcomponent: '&',
        }
    }
}

impl Delimiters {
    /// Reads the delimiter set from the start of a normalized message.
    ///
    /// Pure function of the first eight characters. Fails with
    /// [`ParseError::MalformedHeader`] when the input is shorter than that or
    /// does not begin with a recognizable 3-letter header id.
    pub fn from_header(input: &str) -> Result<Self, ParseError> {
        let mut chars = input.chars();
        let id: Vec<char> = chars.by_ref().take(3).collect();
        if id.len() < 3 || !id.iter().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ParseError::MalformedHeader(format!(
                "expected a 3-character segment id, got {:?}",
                input.chars().take(3).collect::<String>()
            )));
        }

        let rest: Vec<char> = chars.take(5).collect();
        let [field, component, repetition, escape, subcomponent] = rest[..] else {
            return Err(ParseError::MalformedHeader(
                "message shorter than the 8-character delimiter prefix".to_string(),
            ));
        };

        Ok(Self {
            field,
            component,
            repetition,
            escape,
            subcomponent,
        })
    }

    /// The literal content of header field 2: the four separators after the
    /// field separator, in declaration order.
    pub fn encoding_characters(&self) -> String {
        [self.component, self.repetition, self.escape, self.subcomponent]
            .iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_the_conventional_set() {
        let d = Delimiters::from_header("MSH|^~\\&|APP|FAC").unwrap();
        assert_eq!(d, Delimiters::default());
        assert_eq!(d.encoding_characters(), "^~\\&");
    }

    #[test]
    fn separators_are_read_positionally_not_assumed() {
        let d = Delimiters::from_header("MSH#!@$%#APP").unwrap();
        assert_eq!(d.field, '#');
        assert_eq!(d.component, '!');
        assert_eq!(d.repetition, '@');
        assert_eq!(d.escape, '$');
        assert_eq!(d.subcomponent, '%');
    }

    #[test]
    fn short_input_is_a_malformed_header() {
        assert!(matches!(
            Delimiters::from_header("MSH|^~"),
            Err(ParseError::MalformedHeader(_))
        ));
        assert!(matches!(
            Delimiters::from_header(""),
            Err(ParseError::MalformedHeader(_))
        ));
    }

    #[test]
    fn non_alphanumeric_id_is_a_malformed_header() {
        assert!(matches!(
            Delimiters::from_header("M$H|^~\\&|"),
            Err(ParseError::MalformedHeader(_))
        ));
    }
}
