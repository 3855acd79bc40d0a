//! # hl7cvt rendering module
//!
//! This crate is the back half of the hl7cvt conversion engine: it renders
//! the message tree built by `hl7cvt-er7` as a position-named XML document,
//! and optionally transduces that XML into JSON under a fixed structural
//! mapping.
//!
//! ## Architecture
//!
//! The XML document is always the intermediate representation:
//!
//! ```text
//! raw ER7 text ──parse──▶ Message tree ──encode──▶ XML ──transduce──▶ JSON
//! ```
//!
//! JSON is derived from the XML, never from the tree directly, because the
//! JSON shape must reproduce the XML structure's arity exactly: a field with
//! two repetitions is two sibling `<OBX.3>` elements, and only the sibling
//! count tells the transducer to emit a two-element array.
//!
//! ## ER7 → XML → JSON mapping
//!
//! | ER7 | XML | JSON |
//! |-----|-----|------|
//! | `PID\|\|\|123` | `<PID.3>123</PID.3>` | `"PID.3": 123` |
//! | `OBX\|1\|ST\|A~B` | `<OBX.3>A</OBX.3><OBX.3>B</OBX.3>` | `"OBX.3": ["A", "B"]` |
//! | `PID\|\|\|1&2` | `<PID.3><PID.3.1><PID.3.1.1>1</PID.3.1.1>...` | nested objects |
//!
//! ## Example
//!
//! ```
//! use hl7cvt_serde::{OutputFormat, convert};
//!
//! let conversion = convert("MSH|^~\\&|APP|FAC\rOBX|1|ST|A~B", OutputFormat::Json)?;
//! assert!(conversion.output.contains("\"OBX.3\": ["));
//! assert!(conversion.warnings().is_empty());
//! # Ok::<(), hl7cvt_serde::ConversionError>(())
//! ```
//!
//! The engine is a pure, synchronous transformation: it accepts an owned
//! string and returns owned structures, shares no state between calls, and
//! is reentrant by construction.

pub mod error;
pub mod json;
pub mod xml;

pub use error::{ConversionError, Result};
pub use json::{to_json_string_pretty, xml_to_json};
pub use xml::{to_xml_string, to_xml_vec, to_xml_writer};

use hl7cvt_er7::{ParseMode, Warning, parse_message_with_mode};

/// Which rendering `convert` emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Xml,
    Json,
}

/// A successful conversion: the rendered document plus any warnings
/// recovered from in lenient mode.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    /// The rendered XML or JSON text.
    pub output: String,
    /// Non-fatal conditions accumulated during parsing.
    pub warnings: Vec<Warning>,
}

impl Conversion {
    /// Warnings recorded while reading the input, in occurrence order.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }
}

/// Converts one raw ER7 message to XML or JSON in the default lenient mode.
///
/// Fatal errors return with no partial output; recoverable conditions ride
/// on [`Conversion::warnings`].
pub fn convert(message: &str, format: OutputFormat) -> Result<Conversion> {
    convert_with_mode(message, format, ParseMode::default())
}

/// Converts one raw ER7 message with an explicit parse mode.
pub fn convert_with_mode(
    message: &str,
    format: OutputFormat,
    mode: ParseMode,
) -> Result<Conversion> {
    let parsed = parse_message_with_mode(message, mode)?;
    let xml = to_xml_string(&parsed.message)?;

    let output = match format {
        OutputFormat::Xml => xml,
        OutputFormat::Json => {
            let value = xml_to_json(&xml)?;
            to_json_string_pretty(&value)?
        }
    };

    Ok(Conversion {
        output,
        warnings: parsed.warnings,
    })
}
