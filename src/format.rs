//! The delimited text format that tables are exchanged in.
//!
//! A mealy table consists of a header row naming the states, followed by one row per
//! transition whose cells are written `state/signal`:
//! ```text
//! ;q0;q1
//! x0;q1/a0;q0/a1
//! x1;q0/a1;q1/a0
//! ```
//! A moore table has two header rows, the output signals and then the states, and
//! its cells only name the reached state:
//! ```text
//! ;a1;a0
//! ;q0;q1
//! x0;q1;q0
//! x1;q0;q1
//! ```
use std::io::{Read, Write};

use thiserror::Error;

use crate::{
    error::TableError,
    table::{MealyTable, MooreTable},
};

mod input;
mod output;
pub use output::WriteTable;

/// The delimiter that is used if nothing else is configured.
pub const DEFAULT_DELIMITER: u8 = b';';

/// Errors that can occur while reading a table.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ReadError {
    #[error("could not read input: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed delimited input: {0}")]
    Csv(#[from] csv::Error),
    #[error("input does not start with a header row")]
    MissingHeader,
    #[error("line {line} has {found} cells but the header names {expected} states")]
    RaggedRow {
        line: u64,
        expected: usize,
        found: usize,
    },
    #[error("line {line} has no transition")]
    MissingTransition { line: u64 },
    #[error(transparent)]
    Table(#[from] TableError),
}

/// Configures how tables are read and written.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TableFormat {
    /// Separates the fields of a row.
    pub delimiter: u8,
}

impl Default for TableFormat {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl TableFormat {
    /// Uses `delimiter` to separate fields.
    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Reads a mealy table from `reader`.
    pub fn read_mealy<R: Read>(&self, reader: R) -> Result<MealyTable, ReadError> {
        input::read_mealy(self.csv_reader(reader))
    }

    /// Reads a moore table from `reader`.
    pub fn read_moore<R: Read>(&self, reader: R) -> Result<MooreTable, ReadError> {
        input::read_moore(self.csv_reader(reader))
    }

    /// Writes `table` to `writer`.
    pub fn write_mealy<W: Write>(&self, table: &MealyTable, writer: W) -> std::io::Result<()> {
        self.write(table, writer)
    }

    /// Writes `table` to `writer`.
    pub fn write_moore<W: Write>(&self, table: &MooreTable, writer: W) -> std::io::Result<()> {
        self.write(table, writer)
    }

    fn write<T: WriteTable, W: Write>(&self, table: &T, mut writer: W) -> std::io::Result<()> {
        let mut rendered = String::new();
        table
            .write_table(&mut rendered, char::from(self.delimiter))
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        writer.write_all(rendered.as_bytes())?;
        writer.flush()
    }

    fn csv_reader<R: Read>(&self, reader: R) -> csv::Reader<R> {
        csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader)
    }
}

/// Reads a mealy table in the default format.
pub fn read_mealy<R: Read>(reader: R) -> Result<MealyTable, ReadError> {
    TableFormat::default().read_mealy(reader)
}

/// Reads a moore table in the default format.
pub fn read_moore<R: Read>(reader: R) -> Result<MooreTable, ReadError> {
    TableFormat::default().read_moore(reader)
}
