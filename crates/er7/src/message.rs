//! Generic, order-preserving model for a parsed HL7 v2 message.
//!
//! One [`Message`] owns an ordered sequence of [`Segment`]s; each segment owns
//! its [`Field`]s, which own [`Repetition`]s, which own [`Component`]s, which
//! own decoded subcomponent strings. There is no message-type-specific
//! structure here: the tree is parameterized only by the delimiter set that
//! produced it, and repeated segment ids (multiple `OBX` lines, say) are just
//! repeated entries in `segments`.
//!
//! The tree is immutable once built. Encoders walk it without mutating it, and
//! nothing is shared between two parses.

use serde::Serialize;

/// A complete HL7 v2 message: an ordered sequence of segments.
///
/// The first segment is always the header segment (`MSH`); its first two
/// fields carry the delimiter characters the rest of the message was parsed
/// with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub segments: Vec<Segment>,
}

impl Message {
    /// The header segment. Parsing guarantees at least one segment, but the
    /// accessor stays total for callers constructing trees by hand.
    pub fn header(&self) -> Option<&Segment> {
        self.segments.first()
    }

    /// First segment with the given id, in document order.
    pub fn segment(&self, id: &str) -> Option<&Segment> {
        self.segments.iter().find(|s| s.id == id)
    }

    /// All segments with the given id, in document order.
    pub fn segments_named<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Segment> {
        self.segments.iter().filter(move |s| s.id == id)
    }
}

/// One named line of a message (`MSH`, `PID`, `OBX`, ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    /// 3-character segment code.
    pub id: String,
    /// Data fields. `fields[0]` is field 1: the segment id is not a field,
    /// and trailing empty fields are elided at parse time without shifting
    /// the index of any present field.
    pub fields: Vec<Field>,
}

impl Segment {
    /// Field by its 1-based HL7 index (`PID.3` is `field(3)`).
    pub fn field(&self, index: usize) -> Option<&Field> {
        index.checked_sub(1).and_then(|i| self.fields.get(i))
    }
}

/// One field position. HL7 lets a field repeat via the repetition separator;
/// a field without the separator has exactly one repetition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub repetitions: Vec<Repetition>,
}

impl Field {
    /// Builds a field holding a single literal value, bypassing any
    /// splitting. Used for the header's self-referential fields 1 and 2.
    pub fn literal(value: impl Into<String>) -> Self {
        Field {
            repetitions: vec![Repetition {
                components: vec![Component {
                    subcomponents: vec![value.into()],
                }],
            }],
        }
    }

    /// True when every repetition is empty.
    pub fn is_empty(&self) -> bool {
        self.repetitions.iter().all(Repetition::is_empty)
    }

    /// The decoded text of the first subcomponent of the first component of
    /// the first repetition — the common case for simple fields.
    pub fn value(&self) -> Option<&str> {
        self.repetitions
            .first()?
            .components
            .first()?
            .subcomponents
            .first()
            .map(String::as_str)
    }
}

/// One repetition of a field, split on the component separator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Repetition {
    pub components: Vec<Component>,
}

impl Repetition {
    pub fn is_empty(&self) -> bool {
        self.components.iter().all(Component::is_empty)
    }
}

/// One component, split on the subcomponent separator. A component with no
/// separator present has exactly one subcomponent equal to its own decoded
/// text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Component {
    /// Decoded subcomponent strings, escape sequences already expanded.
    pub subcomponents: Vec<String>,
}

impl Component {
    pub fn is_empty(&self) -> bool {
        self.subcomponents.iter().all(String::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(values: &[&str]) -> Component {
        Component {
            subcomponents: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    #[test]
    fn literal_field_is_a_single_subcomponent() {
        let field = Field::literal("^~\\&");
        assert_eq!(field.value(), Some("^~\\&"));
        assert_eq!(field.repetitions.len(), 1);
        assert_eq!(field.repetitions[0].components.len(), 1);
    }

    #[test]
    fn emptiness_requires_every_level_empty() {
        let empty = Field {
            repetitions: vec![Repetition {
                components: vec![component(&["", ""])],
            }],
        };
        assert!(empty.is_empty());

        let populated = Field {
            repetitions: vec![
                Repetition {
                    components: vec![component(&[""])],
                },
                Repetition {
                    components: vec![component(&["", "MRN"])],
                },
            ],
        };
        assert!(!populated.is_empty());
    }

    #[test]
    fn field_lookup_is_one_based() {
        let segment = Segment {
            id: "PID".to_string(),
            fields: vec![Field::literal("a"), Field::literal("b")],
        };
        assert_eq!(segment.field(1).and_then(Field::value), Some("a"));
        assert_eq!(segment.field(2).and_then(Field::value), Some("b"));
        assert!(segment.field(0).is_none());
        assert!(segment.field(3).is_none());
    }
}
