//! XML rendering for parsed HL7 v2 messages.
//!
//! The encoder walks the message tree and emits a position-named XML
//! document: the root element is named after the header segment id and
//! carries the `urn:hl7-org:v2xml` namespace, each segment becomes an
//! element named by its 3-character id, and each populated field becomes a
//! `<SegmentId>.<fieldIndex>` child.
//!
//! ## Shape rules
//!
//! | Tree shape | XML shape |
//! |------------|-----------|
//! | field, one repetition, one component, one subcomponent | `<PID.5>DOE</PID.5>` |
//! | field with repetitions | one sibling `<OBX.3>` element per repetition |
//! | repetition with several components | nested `<PID.3.1>`, `<PID.3.4>`, ... |
//! | component with several subcomponents | nested `<PID.3.1.1>`, `<PID.3.1.2>`, ... |
//! | empty field | no element |
//! | empty repetition of a populated field | `<OBX.3/>` (keeps the sibling count) |
//! | empty component / subcomponent | no element |
//!
//! The sibling-element count for a repeated field is load-bearing: it is the
//! arity signal the JSON transducer (`crate::json`) turns into arrays.
//!
//! Text content is escaped for `&`, `<`, and `>` on the way out. HL7 escape
//! sequences were expanded at parse time and are not re-escaped.

pub mod ser;
mod utils;

pub use ser::{to_xml_string, to_xml_vec, to_xml_writer};
pub use utils::V2_NAMESPACE;
