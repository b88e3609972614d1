//! Codec for the Apple `.strings` localization format.
//!
//! Line-oriented: one `"key" = "value";` pair per line. Keys or values
//! containing unescaped quotes, and values spanning multiple lines, are not
//! supported — such lines are skipped on decode. This is a known limitation
//! of the format scanner.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{error::Error, traits::Parser};

lazy_static! {
    // "key" = "value";  (one pair per line, quotes/semicolon required)
    static ref PAIR_REGEX: Regex = Regex::new(r#""(.+)"\s*=\s*"(.+)";"#).unwrap();
}

/// An Apple `.strings` file: the language (not stored in the file itself,
/// supplied by the caller) and its key-value pairs in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Format {
    pub language: String,
    pub entries: Vec<(String, String)>,
}

impl Parser for Format {
    fn from_reader<R: std::io::BufRead>(reader: R) -> Result<Self, Error> {
        let mut entries = Vec::new();
        for line in reader.lines() {
            let line = line?;
            if let Some(caps) = PAIR_REGEX.captures(&line) {
                entries.push((caps[1].to_string(), caps[2].to_string()));
            }
        }
        Ok(Format {
            language: String::new(), // .strings does not carry a language code
            entries,
        })
    }

    fn to_writer<W: std::io::Write>(&self, mut writer: W) -> Result<(), Error> {
        writer
            .write_all(encode(&self.entries).as_bytes())
            .map_err(Error::Io)
    }

    /// Override default file reading to support BOM-aware decoding: Apple
    /// tooling frequently writes `.strings` files as UTF-16.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path).map_err(Error::Io)?;
        let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .build(file);

        let mut decoded = String::new();
        decoder.read_to_string(&mut decoded).map_err(Error::Io)?;

        Self::from_str(&decoded)
    }
}

/// Decodes `.strings` text into ordered `(key, value)` entries.
pub fn decode(text: &str) -> Result<Vec<(String, String)>, Error> {
    Ok(Format::from_str(text)?.entries)
}

/// Encodes entries as `.strings` text, omitting empty values. Quotes are
/// escaped as `\"` and newlines as the two characters `\n`.
pub fn encode(entries: &[(String, String)]) -> String {
    let mut out = String::new();
    for (key, value) in entries {
        if value.is_empty() {
            continue;
        }
        let escaped = value.replace('"', "\\\"").replace('\n', "\\n");
        out.push_str(&format!("\"{}\" = \"{}\";\n", key, escaped));
    }
    out
}
