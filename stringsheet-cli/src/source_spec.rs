//! Parsing of `LANG=FILE[:DIR]` source-file arguments.
//!
//! The optional `DIR` is the directory path recorded in the project's
//! column metadata (where the file should land on export). When omitted it
//! defaults to the file's parent directory.

use std::fs;
use std::path::Path;

use stringsheet::formats::{self, AppleStringsFormat, Platform};
use stringsheet::traits::Parser;
use stringsheet::{Error, ParsedSourceFile};

/// One `--base`/`--other` argument, before the file is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpec {
    pub language: String,
    pub path: String,
    pub dir: Option<String>,
}

impl SourceSpec {
    /// Parses `LANG=FILE[:DIR]`, e.g. `en-US=res/values/strings.xml` or
    /// `zh-CN=strings.xml:values-zh-rCN/`.
    pub fn parse(arg: &str) -> Result<Self, Error> {
        let (language, rest) = arg.split_once('=').ok_or_else(|| {
            Error::validation_error(format!(
                "invalid source argument `{arg}`: expected LANG=FILE[:DIR]"
            ))
        })?;
        if language.trim().is_empty() {
            return Err(Error::validation_error(format!(
                "invalid source argument `{arg}`: missing language code"
            )));
        }
        let (path, dir) = match rest.split_once(':') {
            Some((path, dir)) => (path, Some(dir.to_string())),
            None => (rest, None),
        };
        if path.is_empty() {
            return Err(Error::validation_error(format!(
                "invalid source argument `{arg}`: missing file path"
            )));
        }
        Ok(SourceSpec {
            language: language.to_string(),
            path: path.to_string(),
            dir,
        })
    }

    /// The directory path recorded in column metadata.
    pub fn dir_path(&self) -> String {
        match &self.dir {
            Some(dir) => dir.clone(),
            None => Path::new(&self.path)
                .parent()
                .map(|p| p.to_string_lossy().into_owned())
                .filter(|p| !p.is_empty())
                .unwrap_or_default(),
        }
    }

    pub fn file_name(&self) -> String {
        Path::new(&self.path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.clone())
    }
}

/// Reads and decodes one source file. `.strings` files go through the
/// BOM-aware reader since Apple tooling often writes UTF-16.
pub fn read_source_file(platform: Platform, spec: &SourceSpec) -> Result<ParsedSourceFile, Error> {
    let entries = match platform {
        Platform::Ios => AppleStringsFormat::read_from(&spec.path)?.entries,
        _ => {
            let text = fs::read_to_string(&spec.path)?;
            formats::decode(platform, &text)?
        }
    };
    Ok(ParsedSourceFile {
        language: spec.language.clone(),
        file_name: spec.file_name(),
        dir_path: spec.dir_path(),
        entries,
    })
}
