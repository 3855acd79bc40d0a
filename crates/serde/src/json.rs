//! XML → JSON transduction.
//!
//! Walks an XML document (normally the one produced by [`crate::xml`]) and
//! builds a `serde_json::Value` under a fixed, order- and arity-sensitive
//! structural mapping. The exact shape is an external-compatibility
//! contract, not an implementation detail: downstream consumers depend on
//! the array-vs-object distinction, the numeric coercion rules, and the key
//! order.
//!
//! ## Mapping
//!
//! | XML | JSON |
//! |-----|------|
//! | element with no children, no text | `{}` |
//! | element with only text | coerced scalar (see below) |
//! | tag appearing once among siblings | single key → value |
//! | tag appearing k>1 times | key → array of length k, document order |
//! | text beside child elements | text under the reserved `"content"` key |
//! | attribute `name="v"` | key `"@name"` → coerced `v` |
//! | root element | the single top-level key |
//!
//! Keys appear in first-seen document order; the crate depends on
//! `serde_json` with `preserve_order` so that order survives rendering.
//!
//! ## Scalar coercion
//!
//! A text token becomes a number or boolean only when nothing is lost:
//! `true`/`false` (any case) become booleans, and a token becomes an i64 or
//! f64 only when the canonical rendering of the parsed number equals the
//! token itself. `007` keeps its leading zero as the string `"007"`, and
//! `12.50`, `1e5`, `-0` stay strings for the same reason.

use crate::error::{ConversionError, Result};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use serde::Serialize;
use serde_json::{Map, Value};

/// Reserved key for text content that appears beside child elements.
pub const CONTENT_KEY: &str = "content";

/// Marker prefix namespacing attribute keys apart from element keys.
pub const ATTRIBUTE_PREFIX: &str = "@";

/// Transduce an XML document into a JSON value.
///
/// Never fails on XML produced by [`crate::xml::to_xml_string`]; XML from
/// any other source that is not well-formed surfaces as
/// [`ConversionError::MalformedXml`].
///
/// # Examples
///
/// ```
/// use hl7cvt_serde::json::xml_to_json;
/// use serde_json::json;
///
/// let value = xml_to_json("<OBX><OBX.3>A</OBX.3><OBX.3>B</OBX.3></OBX>")?;
/// assert_eq!(value, json!({"OBX": {"OBX.3": ["A", "B"]}}));
/// # Ok::<(), hl7cvt_serde::ConversionError>(())
/// ```
pub fn xml_to_json(xml: &str) -> Result<Value> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<ElementFrame> = Vec::new();
    let mut root: Option<(String, Value)> = None;

    loop {
        match reader.read_event() {
            Err(e) => return Err(ConversionError::MalformedXml(e.to_string())),
            Ok(Event::Eof) => break,
            Ok(Event::Start(start)) => stack.push(ElementFrame::open(&start)?),
            Ok(Event::Empty(start)) => {
                let frame = ElementFrame::open(&start)?;
                attach(&mut stack, &mut root, frame)?;
            }
            Ok(Event::End(_)) => {
                let frame = stack.pop().ok_or_else(|| {
                    ConversionError::MalformedXml("close tag without an open element".to_string())
                })?;
                attach(&mut stack, &mut root, frame)?;
            }
            Ok(Event::Text(text)) => {
                let decoded = text
                    .unescape()
                    .map_err(|e| ConversionError::MalformedXml(e.to_string()))?;
                match stack.last_mut() {
                    Some(frame) => frame.text.push_str(&decoded),
                    None => {
                        return Err(ConversionError::MalformedXml(
                            "text content outside the root element".to_string(),
                        ));
                    }
                }
            }
            Ok(Event::CData(data)) => {
                let decoded = String::from_utf8_lossy(data.as_ref()).into_owned();
                match stack.last_mut() {
                    Some(frame) => frame.text.push_str(&decoded),
                    None => {
                        return Err(ConversionError::MalformedXml(
                            "CDATA outside the root element".to_string(),
                        ));
                    }
                }
            }
            // Structure-free events carry no data for the mapping.
            Ok(Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_)) => {}
        }
    }

    if !stack.is_empty() {
        return Err(ConversionError::MalformedXml(
            "unexpected end of input with unclosed elements".to_string(),
        ));
    }
    let (name, value) =
        root.ok_or_else(|| ConversionError::MalformedXml("no root element".to_string()))?;
    let mut top = Map::new();
    top.insert(name, value);
    Ok(Value::Object(top))
}

/// Render a JSON value pretty-printed with four-space indentation and
/// document-order keys.
pub fn to_json_string_pretty(value: &Value) -> Result<String> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(buffer).map_err(|e| ConversionError::Custom(e.to_string()))
}

/// One open element while walking the document.
struct ElementFrame {
    name: String,
    /// Attributes (prefixed) and transduced children, in first-seen order.
    map: Map<String, Value>,
    /// Accumulated text content.
    text: String,
}

impl ElementFrame {
    fn open(start: &BytesStart) -> Result<Self> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut map = Map::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| ConversionError::MalformedXml(e.to_string()))?;
            let key = format!(
                "{}{}",
                ATTRIBUTE_PREFIX,
                String::from_utf8_lossy(attr.key.as_ref())
            );
            let value = attr
                .unescape_value()
                .map_err(|e| ConversionError::MalformedXml(e.to_string()))?;
            map.insert(key, string_to_value(&value));
        }
        Ok(Self {
            name,
            map,
            text: String::new(),
        })
    }

    /// Collapses the frame into its JSON value. An element with nothing in
    /// it is an empty object, never null; text-only elements become coerced
    /// scalars; mixed content keeps its text under [`CONTENT_KEY`].
    fn finalize(self) -> Value {
        let ElementFrame { mut map, text, .. } = self;
        if map.is_empty() {
            if text.is_empty() {
                Value::Object(Map::new())
            } else {
                string_to_value(&text)
            }
        } else {
            if !text.is_empty() {
                map.insert(CONTENT_KEY.to_string(), string_to_value(&text));
            }
            Value::Object(map)
        }
    }
}

/// Finishes a frame and hangs it on its parent, or installs it as the root.
fn attach(
    stack: &mut Vec<ElementFrame>,
    root: &mut Option<(String, Value)>,
    frame: ElementFrame,
) -> Result<()> {
    let name = frame.name.clone();
    let value = frame.finalize();
    match stack.last_mut() {
        Some(parent) => {
            insert_child(&mut parent.map, name, value);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some((name, value));
            Ok(())
        }
        None => Err(ConversionError::MalformedXml(
            "more than one root element".to_string(),
        )),
    }
}

/// Groups same-named siblings: the first occurrence is a bare value, the
/// second converts the slot to an array, later ones append in document
/// order. k==1 is never a single-element array.
fn insert_child(map: &mut Map<String, Value>, name: String, value: Value) {
    match map.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            map.insert(name, value);
        }
    }
}

/// Coerces a text token to the most specific JSON scalar that reproduces it
/// exactly.
fn string_to_value(text: &str) -> Value {
    if text.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if text.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if text.starts_with('-') || text.starts_with(|c: char| c.is_ascii_digit()) {
        if let Ok(integer) = text.parse::<i64>() {
            if integer.to_string() == text {
                return Value::Number(integer.into());
            }
        }
        if text.contains('.') {
            if let Ok(float) = text.parse::<f64>() {
                if float.is_finite() && float.to_string() == text {
                    if let Some(number) = serde_json::Number::from_f64(float) {
                        return Value::Number(number);
                    }
                }
            }
        }
    }
    Value::String(text.to_string())
}
