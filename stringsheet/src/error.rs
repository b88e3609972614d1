//! All error types for the stringsheet crate.
//!
//! These are returned from all fallible operations (decoding, spreadsheet
//! parsing, merging, archiving, translation calls).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown platform `{0}`")]
    UnknownPlatform(String),

    /// Malformed spreadsheet structure (e.g. fewer than the seven
    /// required metadata rows).
    #[error("spreadsheet format error: {0}")]
    Format(String),

    /// A source file could not be decoded into key-value entries.
    #[error("decode error: {0}")]
    Decode(String),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("CSV parse error: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An import precondition was violated (missing base language,
    /// duplicate language codes, …).
    #[error("validation error: {0}")]
    Validation(String),

    /// The translation service is unreachable, rejected the call, or
    /// returned an unusable response. Never raised by the core pipeline.
    #[error("translation service error: {0}")]
    ExternalService(String),
}

impl Error {
    /// Creates a new spreadsheet format error
    pub fn format_error(message: impl Into<String>) -> Self {
        Error::Format(message.into())
    }

    /// Creates a new decode error
    pub fn decode_error(message: impl Into<String>) -> Self {
        Error::Decode(message.into())
    }

    /// Creates a new validation error
    pub fn validation_error(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    /// Creates a new external service error
    pub fn external_service_error(message: impl Into<String>) -> Self {
        Error::ExternalService(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_unknown_platform_error() {
        let error = Error::UnknownPlatform("windows".to_string());
        assert_eq!(error.to_string(), "unknown platform `windows`");
    }

    #[test]
    fn test_format_error() {
        let error = Error::format_error("insufficient metadata rows");
        assert_eq!(
            error.to_string(),
            "spreadsheet format error: insufficient metadata rows"
        );
    }

    #[test]
    fn test_decode_error() {
        let error = Error::decode_error("string tag missing 'name'");
        assert!(error.to_string().contains("decode error"));
    }

    #[test]
    fn test_json_parse_error() {
        let json_error = serde_json::from_str::<serde_json::Value>("{ invalid json }").unwrap_err();
        let error = Error::JsonParse(json_error);
        assert!(error.to_string().contains("JSON parse error"));
    }

    #[test]
    fn test_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = Error::Io(io_error);
        assert!(error.to_string().contains("I/O error"));
    }

    #[test]
    fn test_validation_error() {
        let error = Error::validation_error("base file has no language code");
        assert_eq!(
            error.to_string(),
            "validation error: base file has no language code"
        );
    }

    #[test]
    fn test_external_service_error() {
        let error = Error::external_service_error("missing API credential");
        assert_eq!(
            error.to_string(),
            "translation service error: missing API credential"
        );
    }

    #[test]
    fn test_error_debug() {
        let error = Error::UnknownPlatform("test".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("UnknownPlatform"));
        assert!(debug.contains("test"));
    }
}
