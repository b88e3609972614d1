//! Source-import merger: builds a [`Project`] from one base platform file
//! plus any number of sibling language files.
//!
//! The base file defines the key set and row order; keys that appear only
//! in other files are dropped. A cell is set only when its file actually
//! contained the key, so a missing key stays distinct from an empty value
//! and is omitted again on export.

use std::collections::BTreeSet;

use crate::{
    error::Error,
    formats::{self, Platform},
    types::{LanguageColumn, ParsedSourceFile, Project, TranslationRow},
};

impl ParsedSourceFile {
    /// Decodes source file text through the platform's codec into a
    /// transient import record.
    pub fn parse(
        platform: Platform,
        language: impl Into<String>,
        file_name: impl Into<String>,
        dir_path: impl Into<String>,
        text: &str,
    ) -> Result<Self, Error> {
        Ok(ParsedSourceFile {
            language: language.into(),
            file_name: file_name.into(),
            dir_path: dir_path.into(),
            entries: formats::decode(platform, text)?,
        })
    }
}

/// Merges one base file and zero or more other files into a [`Project`].
///
/// One [`LanguageColumn`] is produced per input file, with only the
/// selected platform's file/path fields populated. Fails with a validation
/// error when the base file has no language code, or when two input files
/// declare the same language code (ambiguous merges are rejected rather
/// than resolved by insertion order).
pub fn merge_source_files(
    platform: Platform,
    base: ParsedSourceFile,
    others: Vec<ParsedSourceFile>,
) -> Result<Project, Error> {
    if base.language.trim().is_empty() {
        return Err(Error::validation_error("base file has no language code"));
    }

    let mut files = Vec::with_capacity(1 + others.len());
    files.push(base);
    files.extend(others);

    let mut seen = BTreeSet::new();
    for file in &files {
        if !seen.insert(file.language.as_str()) {
            return Err(Error::validation_error(format!(
                "duplicate language code `{}` in import set",
                file.language
            )));
        }
    }

    let columns: Vec<LanguageColumn> = files
        .iter()
        .map(|f| LanguageColumn::for_platform(&f.language, platform, &f.file_name, &f.dir_path))
        .collect();

    // The base file's keys, in order, are the entire key set.
    let rows: Vec<TranslationRow> = files[0]
        .entries
        .iter()
        .map(|(key, _)| {
            let mut row = TranslationRow::new(key);
            for file in &files {
                if let Some(value) = file.lookup(key) {
                    row.set_value(&file.language, value);
                }
            }
            row
        })
        .collect();

    Ok(Project::new(columns, rows))
}
