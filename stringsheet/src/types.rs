//! Core, format-agnostic types for stringsheet.
//!
//! Every codec, the spreadsheet serializer, the source-import merger, and
//! the resource-tree generator read and write through [`Project`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

use crate::formats::Platform;

/// One target language plus its per-platform output file configuration.
///
/// The six platform fields come in file/directory pairs; an empty pair means
/// "this language has no resource file for this platform". Directory paths
/// are normalized to a single trailing slash at export time, whatever their
/// stored form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LanguageColumn {
    /// The language code (e.g. "en-US", "zh-CN"). Unique within a project;
    /// the first column of a project is the translation source of truth.
    pub code: String,

    #[serde(default)]
    pub android_file: String,
    #[serde(default)]
    pub android_dir: String,
    #[serde(default)]
    pub ios_file: String,
    #[serde(default)]
    pub ios_dir: String,
    #[serde(default)]
    pub flutter_file: String,
    #[serde(default)]
    pub flutter_dir: String,
}

impl LanguageColumn {
    /// Creates a column with no platform files configured.
    pub fn new(code: impl Into<String>) -> Self {
        LanguageColumn {
            code: code.into(),
            android_file: String::new(),
            android_dir: String::new(),
            ios_file: String::new(),
            ios_dir: String::new(),
            flutter_file: String::new(),
            flutter_dir: String::new(),
        }
    }

    /// Creates a column configured for a single platform, as produced by a
    /// source-file import (the other two platforms stay unconfigured).
    pub fn for_platform(
        code: impl Into<String>,
        platform: Platform,
        file_name: impl Into<String>,
        dir_path: impl Into<String>,
    ) -> Self {
        let mut column = LanguageColumn::new(code);
        match platform {
            Platform::Android => {
                column.android_file = file_name.into();
                column.android_dir = dir_path.into();
            }
            Platform::Ios => {
                column.ios_file = file_name.into();
                column.ios_dir = dir_path.into();
            }
            Platform::Flutter => {
                column.flutter_file = file_name.into();
                column.flutter_dir = dir_path.into();
            }
        }
        column
    }

    /// Returns `(dir_path, file_name)` for a platform, but only when both
    /// are configured. Export is driven entirely by this.
    pub fn platform_target(&self, platform: Platform) -> Option<(&str, &str)> {
        let (dir, file) = match platform {
            Platform::Android => (&self.android_dir, &self.android_file),
            Platform::Ios => (&self.ios_dir, &self.ios_file),
            Platform::Flutter => (&self.flutter_dir, &self.flutter_file),
        };
        if dir.is_empty() || file.is_empty() {
            None
        } else {
            Some((dir.as_str(), file.as_str()))
        }
    }

    pub fn parse_language_identifier(&self) -> Option<LanguageIdentifier> {
        self.code.parse().ok()
    }
}

/// One localization key plus its value per language.
///
/// A language absent from `values` is *unset*, which is distinct from a
/// present-but-empty value: the exporter omits unset and empty cells alike,
/// but the merger only sets cells whose source file actually contained the
/// key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TranslationRow {
    /// Unique key within a project, stable across edits.
    pub key: String,

    /// Mapping from language code to translated text.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    #[serde(default)]
    pub values: BTreeMap<String, String>,
}

impl TranslationRow {
    pub fn new(key: impl Into<String>) -> Self {
        TranslationRow {
            key: key.into(),
            values: BTreeMap::new(),
        }
    }

    /// Returns the value for a language, or `None` if the cell is unset.
    pub fn value(&self, code: &str) -> Option<&str> {
        self.values.get(code).map(String::as_str)
    }

    pub fn set_value(&mut self, code: impl Into<String>, value: impl Into<String>) {
        self.values.insert(code.into(), value.into());
    }

    /// True when the cell is set to something other than whitespace.
    pub fn has_value(&self, code: &str) -> bool {
        self.value(code).is_some_and(|v| !v.trim().is_empty())
    }
}

/// The canonical in-memory representation: an ordered set of language
/// columns and an ordered list of keyed rows.
///
/// Created by spreadsheet import, source-file import, or [`Project::example`];
/// replaced wholesale when a new project is loaded. All edits go through
/// pure transformations ([`Project::with_cell`]) so a failing operation
/// never leaves a half-mutated project visible to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Project {
    pub columns: Vec<LanguageColumn>,
    pub rows: Vec<TranslationRow>,
}

impl Project {
    pub fn new(columns: Vec<LanguageColumn>, rows: Vec<TranslationRow>) -> Self {
        Project { columns, rows }
    }

    pub fn language_codes(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.code.as_str()).collect()
    }

    pub fn column(&self, code: &str) -> Option<&LanguageColumn> {
        self.columns.iter().find(|c| c.code == code)
    }

    pub fn find_row(&self, key: &str) -> Option<&TranslationRow> {
        self.rows.iter().find(|r| r.key == key)
    }

    /// The first column's language, the source of truth for translation fill.
    pub fn source_language(&self) -> Option<&str> {
        self.columns.first().map(|c| c.code.as_str())
    }

    /// Pure single-cell edit: returns a new project with the cell set.
    /// Unknown keys leave the project unchanged.
    pub fn with_cell(&self, key: &str, code: &str, value: impl Into<String>) -> Project {
        let mut updated = self.clone();
        if let Some(row) = updated.rows.iter_mut().find(|r| r.key == key) {
            row.set_value(code, value.into());
        }
        updated
    }

    /// All rows restricted to one language, as `(key, value)` pairs.
    /// Unset cells yield empty strings, which every encoder omits.
    pub fn language_entries(&self, code: &str) -> Vec<(String, String)> {
        self.rows
            .iter()
            .map(|row| (row.key.clone(), row.value(code).unwrap_or("").to_string()))
            .collect()
    }

    /// Built-in example project: two languages, all three platforms
    /// configured, two rows.
    pub fn example() -> Project {
        let en = LanguageColumn {
            code: "en-US".to_string(),
            android_file: "strings.xml".to_string(),
            android_dir: "values/".to_string(),
            ios_file: "Localizable.strings".to_string(),
            ios_dir: "en.lproj/".to_string(),
            flutter_file: "app_en.arb".to_string(),
            flutter_dir: "lib/l10n/".to_string(),
        };
        let zh = LanguageColumn {
            code: "zh-CN".to_string(),
            android_file: "strings.xml".to_string(),
            android_dir: "values-zh-rCN/".to_string(),
            ios_file: "Localizable.strings".to_string(),
            ios_dir: "zh-Hans.lproj/".to_string(),
            flutter_file: "app_zh.arb".to_string(),
            flutter_dir: "lib/l10n/".to_string(),
        };

        let mut app_name = TranslationRow::new("app_name");
        app_name.set_value("en-US", "My App");
        app_name.set_value("zh-CN", "我的应用");

        let mut welcome = TranslationRow::new("welcome");
        welcome.set_value("en-US", "Welcome back");
        welcome.set_value("zh-CN", "欢迎回来");

        Project::new(vec![en, zh], vec![app_name, welcome])
    }
}

/// A decoded source file, produced by a format codec and consumed by the
/// source-import merger. Not retained after the merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSourceFile {
    pub language: String,
    pub file_name: String,
    pub dir_path: String,
    /// Key-value entries in first-seen order; order defines row order when
    /// this file is the merge base.
    pub entries: Vec<(String, String)>,
}

impl ParsedSourceFile {
    /// Looks up a key; `None` means the file did not contain it, which the
    /// merger records as an unset cell.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_platform_target_requires_both_fields() {
        let mut column = LanguageColumn::new("en-US");
        assert_eq!(column.platform_target(Platform::Android), None);

        column.android_file = "strings.xml".to_string();
        assert_eq!(column.platform_target(Platform::Android), None);

        column.android_dir = "values/".to_string();
        assert_eq!(
            column.platform_target(Platform::Android),
            Some(("values/", "strings.xml"))
        );
        assert_eq!(column.platform_target(Platform::Ios), None);
    }

    #[test]
    fn test_column_for_platform_populates_single_platform() {
        let column =
            LanguageColumn::for_platform("zh-CN", Platform::Flutter, "app_zh.arb", "lib/l10n/");
        assert_eq!(column.flutter_file, "app_zh.arb");
        assert_eq!(column.flutter_dir, "lib/l10n/");
        assert!(column.android_file.is_empty());
        assert!(column.ios_file.is_empty());
    }

    #[test]
    fn test_column_parse_language_identifier() {
        let column = LanguageColumn::new("en-US");
        let lang_id = column.parse_language_identifier().unwrap();
        assert_eq!(lang_id.language.as_str(), "en");
        assert_eq!(lang_id.region.unwrap().as_str(), "US");
    }

    #[test]
    fn test_row_unset_vs_empty() {
        let mut row = TranslationRow::new("greeting");
        assert_eq!(row.value("en-US"), None);
        assert!(!row.has_value("en-US"));

        row.set_value("en-US", "");
        assert_eq!(row.value("en-US"), Some(""));
        assert!(!row.has_value("en-US"));

        row.set_value("en-US", "Hello");
        assert!(row.has_value("en-US"));
    }

    #[test]
    fn test_with_cell_is_pure() {
        let project = Project::example();
        let updated = project.with_cell("welcome", "zh-CN", "又见面了");

        assert_eq!(
            project.find_row("welcome").unwrap().value("zh-CN"),
            Some("欢迎回来")
        );
        assert_eq!(
            updated.find_row("welcome").unwrap().value("zh-CN"),
            Some("又见面了")
        );
    }

    #[test]
    fn test_with_cell_unknown_key_is_noop() {
        let project = Project::example();
        let updated = project.with_cell("missing", "en-US", "x");
        assert_eq!(project, updated);
    }

    #[test]
    fn test_language_entries_render_unset_as_empty() {
        let columns = vec![LanguageColumn::new("en"), LanguageColumn::new("zh")];
        let mut row = TranslationRow::new("app_name");
        row.set_value("en", "Hello");
        let project = Project::new(columns, vec![row]);

        assert_eq!(
            project.language_entries("zh"),
            vec![("app_name".to_string(), String::new())]
        );
    }

    #[test]
    fn test_example_project_shape() {
        let project = Project::example();
        assert_eq!(project.language_codes(), vec!["en-US", "zh-CN"]);
        assert_eq!(project.rows.len(), 2);
        assert_eq!(project.source_language(), Some("en-US"));
        assert_eq!(
            project.find_row("app_name").unwrap().value("zh-CN"),
            Some("我的应用")
        );
    }

    #[test]
    fn test_parsed_source_file_lookup() {
        let file = ParsedSourceFile {
            language: "en-US".to_string(),
            file_name: "strings.xml".to_string(),
            dir_path: "values/".to_string(),
            entries: vec![("app_name".to_string(), "Hello".to_string())],
        };
        assert_eq!(file.lookup("app_name"), Some("Hello"));
        assert_eq!(file.lookup("missing"), None);
    }
}
