//! Spreadsheet codec: the fixed-layout tabular serialization of a
//! [`Project`].
//!
//! Layout (row 0-indexed, column 0 = key):
//!
//! | Row | Content                              |
//! |-----|--------------------------------------|
//! | 0   | header label, then language codes    |
//! | 1   | Android file name per language       |
//! | 2   | Android directory path per language  |
//! | 3   | iOS file name per language           |
//! | 4   | iOS directory path per language      |
//! | 5   | Flutter file name per language       |
//! | 6   | Flutter directory path per language  |
//! | 7+  | data rows: key, then one value per language |
//!
//! The matrix functions are byte-format agnostic; [`Parser`] on [`Project`]
//! binds them to CSV for on-disk sheets.

use std::io::BufRead;

use crate::{
    error::Error,
    traits::Parser,
    types::{LanguageColumn, Project, TranslationRow},
};

pub const ROW_HEADER: usize = 0;
pub const ROW_ANDROID_FILE: usize = 1;
pub const ROW_ANDROID_PATH: usize = 2;
pub const ROW_IOS_FILE: usize = 3;
pub const ROW_IOS_PATH: usize = 4;
pub const ROW_FLUTTER_FILE: usize = 5;
pub const ROW_FLUTTER_PATH: usize = 6;
pub const ROW_DATA_START: usize = 7;

// Column-0 labels of the metadata rows. Written on encode, ignored on
// decode; only the row position carries meaning.
const KEY_HEADER: &str = "Android / iOS Key / Flutter key";
const LABEL_ANDROID_FILE: &str = "[Android File]";
const LABEL_ANDROID_PATH: &str = "[Android Path]";
const LABEL_IOS_FILE: &str = "[iOS File]";
const LABEL_IOS_PATH: &str = "[iOS Path]";
const LABEL_FLUTTER_FILE: &str = "[Flutter File]";
const LABEL_FLUTTER_PATH: &str = "[Flutter Path]";

fn cell<'a>(rows: &'a [Vec<String>], row: usize, col: usize) -> &'a str {
    rows.get(row)
        .and_then(|r| r.get(col))
        .map(String::as_str)
        .unwrap_or("")
}

/// Decodes a cell matrix into a [`Project`].
///
/// Columns: every non-empty cell in row 0 from index 1 onward introduces a
/// language; its platform metadata is read from the six rows below, missing
/// cells defaulting to empty. Rows: every row from index 7 whose key cell
/// is non-empty; empty-key rows are silently skipped. Value cells within a
/// discovered row/column always decode as set (possibly empty) — a
/// spreadsheet cannot express an unset cell.
pub fn decode_matrix(matrix: &[Vec<String>]) -> Result<Project, Error> {
    if matrix.len() < ROW_DATA_START {
        return Err(Error::format_error("insufficient metadata rows"));
    }

    let header = &matrix[ROW_HEADER];
    let mut columns = Vec::new();
    let mut column_indices = Vec::new();
    for i in 1..header.len() {
        let code = header[i].as_str();
        if code.is_empty() {
            continue;
        }
        columns.push(LanguageColumn {
            code: code.to_string(),
            android_file: cell(matrix, ROW_ANDROID_FILE, i).to_string(),
            android_dir: cell(matrix, ROW_ANDROID_PATH, i).to_string(),
            ios_file: cell(matrix, ROW_IOS_FILE, i).to_string(),
            ios_dir: cell(matrix, ROW_IOS_PATH, i).to_string(),
            flutter_file: cell(matrix, ROW_FLUTTER_FILE, i).to_string(),
            flutter_dir: cell(matrix, ROW_FLUTTER_PATH, i).to_string(),
        });
        column_indices.push(i);
    }

    let mut rows = Vec::new();
    for record in matrix.iter().skip(ROW_DATA_START) {
        let key = record.first().map(String::as_str).unwrap_or("");
        if key.is_empty() {
            continue;
        }
        let mut row = TranslationRow::new(key);
        for (column, &index) in columns.iter().zip(&column_indices) {
            let value = record.get(index).map(String::as_str).unwrap_or("");
            row.set_value(&column.code, value);
        }
        rows.push(row);
    }

    Ok(Project::new(columns, rows))
}

/// Encodes a [`Project`] as a cell matrix: seven metadata rows followed by
/// one record per translation row, columns in project order, unset values
/// rendered as empty strings. Every record has `columns.len() + 1` cells.
pub fn encode_matrix(project: &Project) -> Vec<Vec<String>> {
    let columns = &project.columns;
    let mut matrix = Vec::with_capacity(ROW_DATA_START + project.rows.len());

    let meta_row = |label: &str, field: fn(&LanguageColumn) -> &String| -> Vec<String> {
        let mut row = Vec::with_capacity(columns.len() + 1);
        row.push(label.to_string());
        row.extend(columns.iter().map(|c| field(c).clone()));
        row
    };

    let mut header = Vec::with_capacity(columns.len() + 1);
    header.push(KEY_HEADER.to_string());
    header.extend(columns.iter().map(|c| c.code.clone()));
    matrix.push(header);

    matrix.push(meta_row(LABEL_ANDROID_FILE, |c| &c.android_file));
    matrix.push(meta_row(LABEL_ANDROID_PATH, |c| &c.android_dir));
    matrix.push(meta_row(LABEL_IOS_FILE, |c| &c.ios_file));
    matrix.push(meta_row(LABEL_IOS_PATH, |c| &c.ios_dir));
    matrix.push(meta_row(LABEL_FLUTTER_FILE, |c| &c.flutter_file));
    matrix.push(meta_row(LABEL_FLUTTER_PATH, |c| &c.flutter_dir));

    for row in &project.rows {
        let mut record = Vec::with_capacity(columns.len() + 1);
        record.push(row.key.clone());
        record.extend(
            columns
                .iter()
                .map(|c| row.value(&c.code).unwrap_or("").to_string()),
        );
        matrix.push(record);
    }

    matrix
}

/// CSV binding for on-disk sheets: `Project::read_from("sheet.csv")` and
/// `project.write_to("sheet.csv")`.
impl Parser for Project {
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);
        let mut matrix = Vec::new();
        for record in rdr.records() {
            let record = record?;
            matrix.push(record.iter().map(str::to_string).collect::<Vec<_>>());
        }
        decode_matrix(&matrix)
    }

    fn to_writer<W: std::io::Write>(&self, writer: W) -> Result<(), Error> {
        let mut wtr = csv::WriterBuilder::new().from_writer(writer);
        for record in encode_matrix(self) {
            wtr.write_record(&record)?;
        }
        wtr.flush()?;
        Ok(())
    }
}
