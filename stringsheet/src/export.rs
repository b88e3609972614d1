//! Resource-tree generator: re-encodes every language column through its
//! platform codecs and assembles a zip archive.
//!
//! Emission is driven purely by column configuration: any platform with
//! both a file name and a directory path gets a file, even when every value
//! for that language is empty.

use std::io::{Cursor, Seek, Write};

use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

use crate::{
    error::Error,
    formats::{self, Platform},
    types::Project,
};

/// One generated file: archive-relative path plus rendered content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceFile {
    pub path: String,
    pub content: String,
}

/// The in-memory directory/file structure produced for archiving.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResourceTree {
    pub files: Vec<ResourceFile>,
}

/// Normalizes a directory path to an archive-relative prefix: leading
/// slashes stripped, exactly one trailing slash.
pub fn normalize_dir_path(dir_path: &str) -> String {
    let trimmed = dir_path.trim_start_matches('/');
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    }
}

impl ResourceTree {
    /// Renders every configured platform/language combination of a project.
    pub fn from_project(project: &Project) -> Self {
        let mut files = Vec::new();
        for column in &project.columns {
            for platform in Platform::ALL {
                if let Some((dir, file_name)) = column.platform_target(platform) {
                    let entries = project.language_entries(&column.code);
                    files.push(ResourceFile {
                        path: format!("{}{}", normalize_dir_path(dir), file_name),
                        content: formats::encode(platform, &column.code, &entries),
                    });
                }
            }
        }
        ResourceTree { files }
    }

    /// Writes the tree as a zip archive: one entry per file, directory
    /// entries implicit from path prefixes, no manifest.
    pub fn write_zip_to<W: Write + Seek>(&self, writer: W) -> Result<(), Error> {
        let mut zip = ZipWriter::new(writer);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for file in &self.files {
            zip.start_file(file.path.as_str(), options)?;
            zip.write_all(file.content.as_bytes())?;
        }

        zip.finish()?;
        Ok(())
    }

    pub fn to_zip_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut cursor = Cursor::new(Vec::new());
        self.write_zip_to(&mut cursor)?;
        Ok(cursor.into_inner())
    }
}
