/// Error types for the conversion engine.
#[derive(Debug)]
pub enum ConversionError {
    /// Fatal ER7 parse error (unreadable header, or a malformed segment in
    /// strict mode)
    Parse(hl7cvt_er7::ParseError),

    /// XML reader/writer error
    Xml(quick_xml::Error),

    /// XML that is not well-formed was fed to the transducer. Only reachable
    /// with XML from a source other than this engine's encoder
    MalformedXml(String),

    /// JSON rendering error
    Json(serde_json::Error),

    /// IO error while writing output
    Io(std::io::Error),

    /// Custom error message
    Custom(String),
}

impl std::fmt::Display for ConversionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversionError::Parse(e) => write!(f, "parse error: {}", e),
            ConversionError::Xml(e) => write!(f, "XML error: {}", e),
            ConversionError::MalformedXml(msg) => write!(f, "malformed XML: {}", msg),
            ConversionError::Json(e) => write!(f, "JSON error: {}", e),
            ConversionError::Io(e) => write!(f, "IO error: {}", e),
            ConversionError::Custom(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ConversionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConversionError::Parse(e) => Some(e),
            ConversionError::Xml(e) => Some(e),
            ConversionError::Json(e) => Some(e),
            ConversionError::Io(e) => Some(e),
            ConversionError::MalformedXml(_) | ConversionError::Custom(_) => None,
        }
    }
}

impl From<hl7cvt_er7::ParseError> for ConversionError {
    fn from(err: hl7cvt_er7::ParseError) -> Self {
        ConversionError::Parse(err)
    }
}

impl From<quick_xml::Error> for ConversionError {
    fn from(err: quick_xml::Error) -> Self {
        ConversionError::Xml(err)
    }
}

impl From<serde_json::Error> for ConversionError {
    fn from(err: serde_json::Error) -> Self {
        ConversionError::Json(err)
    }
}

impl From<std::io::Error> for ConversionError {
    fn from(err: std::io::Error) -> Self {
        ConversionError::Io(err)
    }
}

impl From<String> for ConversionError {
    fn from(msg: String) -> Self {
        ConversionError::Custom(msg)
    }
}

impl From<&str> for ConversionError {
    fn from(msg: &str) -> Self {
        ConversionError::Custom(msg.to_string())
    }
}

/// Result type alias for conversion operations
pub type Result<T> = std::result::Result<T, ConversionError>;
