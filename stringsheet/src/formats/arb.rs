//! Codec for the Flutter ARB localization format.
//!
//! ARB is a JSON object whose `@`-prefixed top-level keys are metadata and
//! whose remaining string-valued keys are translation entries. Decode
//! failures propagate like every other codec; an unparsable file is an
//! error, not an empty result.

use serde_json::{Map, Value};

use crate::{error::Error, traits::Parser};

/// A Flutter ARB file: the language code (embedded as `@@locale` on encode)
/// and its translation entries in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Format {
    pub language: String,
    pub entries: Vec<(String, String)>,
}

impl Parser for Format {
    fn from_reader<R: std::io::BufRead>(reader: R) -> Result<Self, Error> {
        let value: Value = serde_json::from_reader(reader).map_err(Error::JsonParse)?;
        let object = value
            .as_object()
            .ok_or_else(|| Error::decode_error("ARB root is not a JSON object"))?;

        let mut language = String::new();
        let mut entries = Vec::new();
        for (key, value) in object {
            if key == "@@locale" {
                language = value.as_str().unwrap_or_default().to_string();
            }
            if key.starts_with('@') {
                continue;
            }
            // Non-string values (nested metadata objects, numbers) are not
            // translation entries and are skipped.
            if let Some(text) = value.as_str() {
                entries.push((key.clone(), text.to_string()));
            }
        }
        Ok(Format { language, entries })
    }

    fn to_writer<W: std::io::Write>(&self, mut writer: W) -> Result<(), Error> {
        writer
            .write_all(encode(&self.language, &self.entries).as_bytes())
            .map_err(Error::Io)
    }
}

/// Decodes ARB text into ordered `(key, value)` entries, skipping
/// `@`-prefixed metadata keys.
pub fn decode(text: &str) -> Result<Vec<(String, String)>, Error> {
    Ok(Format::from_str(text)?.entries)
}

/// Encodes entries as a pretty-printed ARB object: `@@locale` first (with
/// hyphens replaced by underscores), then one member per non-empty value in
/// entry order.
pub fn encode(language: &str, entries: &[(String, String)]) -> String {
    let mut object = Map::new();
    object.insert(
        "@@locale".to_string(),
        Value::String(language.replace('-', "_")),
    );
    for (key, value) in entries {
        if value.is_empty() {
            continue;
        }
        object.insert(key.clone(), Value::String(value.clone()));
    }
    // Map preserves insertion order (serde_json "preserve_order"), so the
    // locale key stays first and entries keep row order.
    serde_json::to_string_pretty(&Value::Object(object)).unwrap_or_default()
}
