#![forbid(unsafe_code)]
//! Multilingual string table toolkit for Android, iOS, and Flutter.
//!
//! Imports translations from a fixed-layout spreadsheet or from
//! platform-native source files (Android `strings.xml`, Apple `.strings`,
//! Flutter ARB), holds them in a single tabular [`Project`] model, and
//! exports back to a spreadsheet or a zip of platform resource trees.
//! Missing cells can be batch-filled through a translation API.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use stringsheet::{Platform, ParsedSourceFile, ResourceTree, merge_source_files};
//! use stringsheet::traits::Parser;
//!
//! // Merge native source files into a project...
//! let base = ParsedSourceFile::parse(
//!     Platform::Android, "en-US", "strings.xml", "values/",
//!     r#"<resources><string name="app_name">My App</string></resources>"#,
//! )?;
//! let project = merge_source_files(Platform::Android, base, vec![])?;
//!
//! // ...then round-trip it through a spreadsheet and a resource archive.
//! project.write_to("i18n_data.csv")?;
//! let zip = ResourceTree::from_project(&project).to_zip_bytes()?;
//! # let _ = zip;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Pipeline
//!
//! Spreadsheet or source files → [`sheet`] / [`import`] → [`Project`] →
//! (edit, [`translate`]) → [`sheet`] / [`export`] → spreadsheet or zip.
//!
//! All core operations are synchronous and pure over their inputs; a
//! failing decode never leaves a partially built project visible.

pub mod error;
pub mod export;
pub mod formats;
pub mod import;
pub mod sheet;
pub mod traits;
pub mod translate;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    error::Error,
    export::{ResourceFile, ResourceTree},
    formats::Platform,
    import::merge_source_files,
    translate::{FillRequest, Translator, TranslatorConfig, apply_translations, pending_translations},
    types::{LanguageColumn, ParsedSourceFile, Project, TranslationRow},
};
