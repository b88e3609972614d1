//! Codec for the Android `strings.xml` resource format.
//!
//! Only singular `<string>` elements are supported; `<plurals>` and
//! `<string-array>` elements are skipped. Decoding uses a streaming XML
//! reader and flattens a string's body to its text content: inline markup
//! (`<b>`, `<u>`) contributes its text, CDATA sections are taken verbatim,
//! and whitespace inside the element is preserved. Encoding is hand-rolled
//! because Android resources escape quotes with backslashes (`\"`, `\'`)
//! rather than XML entities.

use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};
use std::io::BufRead;

use crate::{error::Error, traits::Parser};

/// An Android `strings.xml` file: the language (not stored in the file
/// itself, supplied by the caller) and its string resources in document
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Format {
    pub language: String,
    pub entries: Vec<(String, String)>,
}

impl Parser for Format {
    /// Parse from any reader. Malformed XML fails; `<string>` tags without
    /// a `name` attribute fail.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut xml_reader = Reader::from_reader(reader);

        let mut buf = Vec::new();
        let mut entries = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) if e.name().as_ref() == b"string" => {
                    let name = string_name(e)?;
                    let value = read_string_value(&mut xml_reader)?;
                    entries.push((name, value));
                }
                Ok(Event::Empty(ref e)) if e.name().as_ref() == b"string" => {
                    // Self-closing <string name="x"/> decodes as empty.
                    entries.push((string_name(e)?, String::new()));
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => return Err(Error::XmlParse(e)),
            }
            buf.clear();
        }
        Ok(Format {
            language: String::new(), // strings.xml does not carry a language code
            entries,
        })
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: std::io::Write>(&self, mut writer: W) -> Result<(), Error> {
        writer
            .write_all(encode(&self.entries).as_bytes())
            .map_err(Error::Io)
    }
}

/// Decodes `strings.xml` text into ordered `(name, value)` entries.
pub fn decode(text: &str) -> Result<Vec<(String, String)>, Error> {
    Ok(Format::from_str(text)?.entries)
}

/// Encodes entries as a `strings.xml` document, omitting empty values.
pub fn encode(entries: &[(String, String)]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<resources>\n");
    for (name, value) in entries {
        if value.is_empty() {
            continue;
        }
        xml.push_str("    <string name=\"");
        xml.push_str(name);
        xml.push_str("\">");
        xml.push_str(&escape_android(value));
        xml.push_str("</string>\n");
    }
    xml.push_str("</resources>");
    xml
}

// Android resource escaping: entities for markup characters, backslashes
// for quotes (the resource compiler's convention, not XML-standard).
fn escape_android(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("\\\""),
            '\'' => out.push_str("\\'"),
            _ => out.push(c),
        }
    }
    out
}

fn string_name(e: &BytesStart) -> Result<String, Error> {
    for attr in e.attributes().with_checks(false) {
        let attr = attr.map_err(|e| Error::decode_error(e.to_string()))?;
        if attr.key.as_ref() == b"name" {
            return Ok(attr.unescape_value()?.to_string());
        }
    }
    Err(Error::decode_error("string tag missing 'name'"))
}

// Accumulates all descendant text of a <string> element until its closing
// tag, tracking depth so inline markup contributes its text rather than
// truncating the value.
fn read_string_value<R: BufRead>(xml_reader: &mut Reader<R>) -> Result<String, Error> {
    let mut buf = Vec::new();
    let mut value = String::new();
    let mut depth = 0usize;
    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Text(e)) => {
                value.push_str(&e.unescape().map_err(Error::XmlParse)?);
            }
            Ok(Event::CData(e)) => {
                value.push_str(&String::from_utf8_lossy(&e.into_inner()));
            }
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => {
                if depth == 0 {
                    return Ok(value);
                }
                depth -= 1;
            }
            Ok(Event::Eof) => {
                return Err(Error::decode_error("unexpected EOF inside <string>"));
            }
            Ok(_) => (),
            Err(e) => return Err(Error::XmlParse(e)),
        }
        buf.clear();
    }
}
