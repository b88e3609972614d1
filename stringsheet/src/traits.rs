//! The serialization seam shared by every file representation.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::Error;

/// Reading and writing one file representation: each platform codec
/// implements this for its format, and [`crate::Project`] implements it
/// for the spreadsheet form, so the CLI moves all of them between paths,
/// readers, and strings through one interface.
///
/// Only `from_reader` and `to_writer` are required; the path and string
/// forms are conveniences on top. `read_from` may be overridden when a
/// format needs more than plain UTF-8 bytes (the `.strings` codec decodes
/// byte-order-marked UTF-16 files there).
///
/// # Example
///
/// ```rust,no_run
/// use stringsheet::Project;
/// use stringsheet::traits::Parser;
///
/// let project = Project::read_from("i18n_data.csv")?;
/// project.write_to("i18n_backup.csv")?;
/// # Ok::<(), stringsheet::Error>(())
/// ```
pub trait Parser {
    /// Parses from a buffered reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error>
    where
        Self: Sized;

    /// Serializes into a writer.
    fn to_writer<W: Write>(&self, writer: W) -> Result<(), Error>;

    /// Parses the file at `path`.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(BufReader::new(File::open(path)?))
    }

    /// Writes to the file at `path`, replacing any existing content.
    fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        self.to_writer(BufWriter::new(File::create(path)?))
    }

    /// Parses from in-memory text.
    fn from_str(text: &str) -> Result<Self, Error>
    where
        Self: Sized,
    {
        Self::from_reader(text.as_bytes())
    }

    /// Renders to an in-memory string.
    fn to_text(&self) -> Result<String, Error> {
        let mut buf = Vec::new();
        self.to_writer(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
