use hl7cvt_er7::{ParseError, ParseMode, Warning};
use hl7cvt_serde::{ConversionError, OutputFormat, Result, convert, convert_with_mode};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn convert_to_value(message: &str) -> Result<Value> {
    let conversion = convert(message, OutputFormat::Json)?;
    Ok(serde_json::from_str(&conversion.output)?)
}

#[test]
fn test_xml_mode_emits_the_xml_intermediate() -> Result<()> {
    let conversion = convert("MSH|^~\\&|APP|FAC", OutputFormat::Xml)?;

    assert!(conversion.output.contains("<MSH xmlns=\"urn:hl7-org:v2xml\">"));
    assert!(conversion.output.contains("<MSH.3>APP</MSH.3>"));
    assert!(conversion.warnings().is_empty());

    Ok(())
}

#[test]
fn test_root_tag_is_the_single_top_level_key() -> Result<()> {
    let value = convert_to_value("MSH|^~\\&|APP|FAC\rPID|||123")?;

    let top = value.as_object().unwrap();
    assert_eq!(top.len(), 1);
    assert!(top.contains_key("MSH"));

    Ok(())
}

#[test]
fn test_spec_component_example() -> Result<()> {
    // PID.3 carries one populated component and one trailing populated
    // component; interior empties vanish, and the numeric-looking component
    // is coerced.
    let value = convert_to_value("MSH|^~\\&|APP|FAC\rPID|||123^^^MRN")?;

    assert_eq!(
        value["MSH"]["PID"]["PID.3"],
        json!({"PID.3.1": 123, "PID.3.4": "MRN"})
    );

    Ok(())
}

#[test]
fn test_arity_law_repetitions_become_an_array() -> Result<()> {
    let value = convert_to_value("MSH|^~\\&|APP|FAC\rOBX|1|ST|A~B")?;

    assert_eq!(value["MSH"]["OBX"]["OBX.3"], json!(["A", "B"]));

    Ok(())
}

#[test]
fn test_arity_law_single_value_is_never_a_singleton_array() -> Result<()> {
    let value = convert_to_value("MSH|^~\\&|APP|FAC\rOBX|1|ST|A")?;

    assert_eq!(value["MSH"]["OBX"]["OBX.3"], json!("A"));

    Ok(())
}

#[test]
fn test_arity_law_repeated_segments_become_an_array() -> Result<()> {
    let value = convert_to_value("MSH|^~\\&|APP|FAC\rOBX|1\rOBX|2")?;

    assert_eq!(value["MSH"]["OBX"], json!([{"OBX.1": 1}, {"OBX.1": 2}]));

    Ok(())
}

#[test]
fn test_empty_repetition_is_an_empty_object_in_the_array() -> Result<()> {
    let value = convert_to_value("MSH|^~\\&|APP|FAC\rOBX|1|ST|A~~B")?;

    assert_eq!(value["MSH"]["OBX"]["OBX.3"], json!(["A", {}, "B"]));

    Ok(())
}

#[test]
fn test_numeric_coercion_law() -> Result<()> {
    let value = convert_to_value("MSH|^~\\&|APP|FAC\rOBX|1|NM|123~007~12.5~TRUE")?;

    assert_eq!(value["MSH"]["OBX"]["OBX.3"], json!([123, "007", 12.5, true]));

    Ok(())
}

#[test]
fn test_escape_law_decoded_separator_survives_to_json() -> Result<()> {
    let value = convert_to_value("MSH|^~\\&|APP|FAC\rOBX|1|ST|a\\F\\b")?;

    assert_eq!(value["MSH"]["OBX"]["OBX.3"], json!("a|b"));

    Ok(())
}

#[test]
fn test_header_encoding_characters_round_trip_to_json() -> Result<()> {
    // The ampersand is escaped in the XML intermediate and unescaped again
    // by the transducer.
    let value = convert_to_value("MSH|^~\\&|APP|FAC")?;

    assert_eq!(value["MSH"]["MSH"]["MSH.1"], json!("|"));
    assert_eq!(value["MSH"]["MSH"]["MSH.2"], json!("^~\\&"));

    Ok(())
}

#[test]
fn test_root_namespace_is_a_prefixed_attribute_key() -> Result<()> {
    let value = convert_to_value("MSH|^~\\&|APP|FAC")?;

    assert_eq!(value["MSH"]["@xmlns"], json!("urn:hl7-org:v2xml"));

    Ok(())
}

#[test]
fn test_json_key_order_follows_document_order() -> Result<()> {
    let conversion = convert(
        "MSH|^~\\&|APP|FAC\rPID|||123\rOBX|1|ST|A",
        OutputFormat::Json,
    )?;

    let msh = conversion.output.find("\"MSH.3\"").unwrap();
    let pid = conversion.output.find("\"PID\"").unwrap();
    let obx = conversion.output.find("\"OBX\"").unwrap();
    assert!(msh < pid && pid < obx);

    Ok(())
}

#[test]
fn test_json_output_is_pretty_printed_and_deterministic() -> Result<()> {
    let message = "MSH|^~\\&|APP|FAC\rPID|||123^^^MRN";
    let first = convert(message, OutputFormat::Json)?;
    let second = convert(message, OutputFormat::Json)?;

    assert_eq!(first.output, second.output);
    assert!(first.output.contains("    \"MSH\": {"));

    Ok(())
}

#[test]
fn test_warnings_ride_on_the_conversion() -> Result<()> {
    let conversion = convert("MSH|^~\\&|APP|FAC\rOBX|1|ST|a\\Zz\\b", OutputFormat::Json)?;

    assert_eq!(
        conversion.warnings(),
        &[Warning::UnrecognizedEscape {
            sequence: "\\Zz\\".to_string()
        }]
    );
    // The original text is preserved in the output.
    let value: Value = serde_json::from_str(&conversion.output)?;
    assert_eq!(value["MSH"]["OBX"]["OBX.3"], json!("a\\Zz\\b"));

    Ok(())
}

#[test]
fn test_strict_mode_turns_malformed_segments_fatal() {
    let err = convert_with_mode(
        "MSH|^~\\&|APP|FAC\rPI\rPID|||1",
        OutputFormat::Xml,
        ParseMode::Strict,
    )
    .unwrap_err();

    assert!(matches!(
        err,
        ConversionError::Parse(ParseError::MalformedSegment { index: 1, .. })
    ));
}

#[test]
fn test_malformed_header_aborts_with_no_partial_output() {
    for format in [OutputFormat::Xml, OutputFormat::Json] {
        assert!(matches!(
            convert("garbage", format),
            Err(ConversionError::Parse(ParseError::MalformedHeader(_)))
        ));
    }
}

#[test]
fn test_line_ending_variants_convert_identically() -> Result<()> {
    let cr = convert("MSH|^~\\&|APP|FAC\rPID|||1", OutputFormat::Json)?;
    let crlf = convert("MSH|^~\\&|APP|FAC\r\nPID|||1", OutputFormat::Json)?;
    let lf = convert("MSH|^~\\&|APP|FAC\nPID|||1", OutputFormat::Json)?;

    assert_eq!(cr, crlf);
    assert_eq!(cr, lf);

    Ok(())
}
