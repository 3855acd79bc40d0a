//! XML encoding of the ER7 message tree.
//!
//! Renders a [`Message`] as a position-named XML document in the v2.xml
//! style by writing quick-xml events while walking the tree. The tree is
//! read without mutation; the encoder holds no state between calls.

use crate::error::{ConversionError, Result};
use crate::xml::utils;
use hl7cvt_er7::{Component, Message, Repetition, Segment};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Write;

/// Encode a message tree to an XML string.
///
/// # Examples
///
/// ```
/// use hl7cvt_er7::parse_message;
/// use hl7cvt_serde::xml::to_xml_string;
///
/// let parsed = parse_message("MSH|^~\\&|APP|FAC")?;
/// let xml = to_xml_string(&parsed.message)?;
/// assert!(xml.contains("<MSH.3>APP</MSH.3>"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn to_xml_string(message: &Message) -> Result<String> {
    let mut buffer = Vec::new();
    to_xml_writer(message, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| ConversionError::Custom(e.to_string()))
}

/// Encode a message tree to an XML byte vector.
pub fn to_xml_vec(message: &Message) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    to_xml_writer(message, &mut buffer)?;
    Ok(buffer)
}

/// Encode a message tree to an XML writer.
pub fn to_xml_writer<W>(message: &Message, writer: W) -> Result<()>
where
    W: Write,
{
    let mut encoder = XmlEncoder::new(writer);
    encoder.encode(message)
}

/// Walks the message tree and writes quick-xml events.
struct XmlEncoder<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> XmlEncoder<W> {
    fn new(writer: W) -> Self {
        Self {
            writer: Writer::new_with_indent(writer, b' ', 4),
        }
    }

    /// Writes the whole document: XML declaration, then the root element
    /// named after the header segment id, then every segment as a flat
    /// sibling sequence. Message-type group nesting is out of scope here.
    fn encode(&mut self, message: &Message) -> Result<()> {
        let root = message
            .header()
            .map(|s| s.id.clone())
            .ok_or_else(|| ConversionError::Custom("cannot encode a message with no segments".to_string()))?;

        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut root_start = BytesStart::new(&root);
        root_start.push_attribute(("xmlns", utils::V2_NAMESPACE));
        self.writer.write_event(Event::Start(root_start))?;

        for segment in &message.segments {
            self.encode_segment(segment)?;
        }

        self.writer.write_event(Event::End(BytesEnd::new(&root)))?;
        Ok(())
    }

    fn encode_segment(&mut self, segment: &Segment) -> Result<()> {
        self.writer
            .write_event(Event::Start(BytesStart::new(&segment.id)))?;

        for (i, field) in segment.fields.iter().enumerate() {
            if !utils::should_emit_field(field) {
                continue;
            }
            let name = utils::field_name(&segment.id, i + 1);
            // One sibling element per repetition: the sibling count is the
            // arity signal the JSON transducer consumes.
            for repetition in &field.repetitions {
                self.encode_repetition(&name, repetition)?;
            }
        }

        self.writer
            .write_event(Event::End(BytesEnd::new(&segment.id)))?;
        Ok(())
    }

    fn encode_repetition(&mut self, name: &str, repetition: &Repetition) -> Result<()> {
        if repetition.is_empty() {
            // Empty repetitions of a populated field keep their slot so the
            // sibling count still equals the parsed repetition count.
            self.writer
                .write_event(Event::Empty(BytesStart::new(name)))?;
            return Ok(());
        }

        if utils::is_leaf_repetition(repetition) {
            return self.encode_leaf(name, &repetition.components[0].subcomponents[0]);
        }

        self.writer.write_event(Event::Start(BytesStart::new(name)))?;
        for (i, component) in repetition.components.iter().enumerate() {
            if component.is_empty() {
                continue;
            }
            self.encode_component(&utils::child_name(name, i + 1), component)?;
        }
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn encode_component(&mut self, name: &str, component: &Component) -> Result<()> {
        if utils::is_leaf_component(component) {
            return self.encode_leaf(name, &component.subcomponents[0]);
        }

        self.writer.write_event(Event::Start(BytesStart::new(name)))?;
        for (i, subcomponent) in component.subcomponents.iter().enumerate() {
            if subcomponent.is_empty() {
                continue;
            }
            self.encode_leaf(&utils::child_name(name, i + 1), subcomponent)?;
        }
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    /// A text leaf. `BytesText::new` escapes the XML reserved characters;
    /// HL7 escape sequences were already expanded during parsing and are
    /// written as plain characters.
    fn encode_leaf(&mut self, name: &str, text: &str) -> Result<()> {
        self.writer.write_event(Event::Start(BytesStart::new(name)))?;
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }
}
