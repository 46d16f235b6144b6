use std::{
    fmt::Display,
    io::{Read, Write},
    str::FromStr,
};

use thiserror::Error;
use tracing::debug;

use crate::{
    error::TableError,
    format::{ReadError, TableFormat},
    table::{MealyTable, MooreTable},
};

/// What to do with the table that is read.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Mode {
    /// Minimize a mealy table.
    MealyMinimize,
    /// Minimize a moore table.
    MooreMinimize,
    /// Convert a mealy table into a minimal moore table.
    MealyToMoore,
    /// Convert a moore table into a mealy table.
    MooreToMealy,
}

impl Mode {
    /// All modes in the order they are listed on the command line.
    pub const ALL: [Mode; 4] = [
        Mode::MealyMinimize,
        Mode::MooreMinimize,
        Mode::MealyToMoore,
        Mode::MooreToMealy,
    ];

    /// The name of the mode on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Mode::MealyMinimize => "mealy",
            Mode::MooreMinimize => "moore",
            Mode::MealyToMoore => "mealy-to-moore",
            Mode::MooreToMealy => "moore-to-mealy",
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Raised when a string names no [`Mode`].
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("unknown mode `{0}`, expected one of mealy, moore, mealy-to-moore, moore-to-mealy")]
pub struct UnknownMode(pub String);

impl FromStr for Mode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| UnknownMode(s.to_string()))
    }
}

/// Errors that abort [`run`].
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum PipelineError {
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error(transparent)]
    Table(#[from] TableError),
    #[error("could not write output: {0}")]
    Write(#[from] std::io::Error),
}

/// Reads a table from `input`, processes it according to `mode` and writes the
/// resulting table to `output`.
pub fn run<R: Read, W: Write>(
    mode: Mode,
    format: &TableFormat,
    input: R,
    output: W,
) -> Result<(), PipelineError> {
    debug!("running in mode {mode}");
    match mode {
        Mode::MealyMinimize => {
            let mut table = format.read_mealy(input)?;
            log_table("read", &table.to_pretty_table());
            table.minimize()?;
            log_table("minimized", &table.to_pretty_table());
            format.write_mealy(&table, output)?;
        }
        Mode::MooreMinimize => {
            let mut table = format.read_moore(input)?;
            log_table("read", &table.to_pretty_table());
            table.minimize()?;
            log_table("minimized", &table.to_pretty_table());
            format.write_moore(&table, output)?;
        }
        Mode::MealyToMoore => {
            let source = format.read_mealy(input)?;
            log_table("read", &source.to_pretty_table());
            let mut table = MooreTable::from_mealy(&source)?;
            log_table("converted", &table.to_pretty_table());
            table.minimize()?;
            log_table("minimized", &table.to_pretty_table());
            format.write_moore(&table, output)?;
        }
        Mode::MooreToMealy => {
            let source = format.read_moore(input)?;
            log_table("read", &source.to_pretty_table());
            let table = MealyTable::from_moore(&source)?;
            log_table("converted", &table.to_pretty_table());
            format.write_mealy(&table, output)?;
        }
    }
    Ok(())
}

fn log_table(stage: &str, rendered: &str) {
    debug!("{stage} table\n{rendered}");
}
