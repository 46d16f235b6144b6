use std::fmt::{Display, Result, Write};

use crate::table::{MealyTable, MooreTable};

/// Writes a table in the delimited text format. Header rows start with the delimiter,
/// data rows start with their transition, and the output ends with a newline.
pub trait WriteTable {
    /// Writes `self` to `w`, separating fields with `delimiter`.
    fn write_table<W: Write>(&self, w: &mut W, delimiter: char) -> Result;
}

fn write_fields<W: Write, T: Display>(w: &mut W, delimiter: char, fields: &[T]) -> Result {
    for field in fields {
        w.write_char(delimiter)?;
        write!(w, "{field}")?;
    }
    Ok(())
}

impl WriteTable for MealyTable {
    fn write_table<W: Write>(&self, w: &mut W, delimiter: char) -> Result {
        write_fields(w, delimiter, self.states())?;
        for (transition, row) in self.transitions().iter().zip(self.cells()) {
            write!(w, "\n{transition}")?;
            write_fields(w, delimiter, row)?;
        }
        w.write_char('\n')
    }
}

impl WriteTable for MooreTable {
    fn write_table<W: Write>(&self, w: &mut W, delimiter: char) -> Result {
        write_fields(w, delimiter, self.signals())?;
        w.write_char('\n')?;
        write_fields(w, delimiter, self.states())?;
        for (transition, row) in self.transitions().iter().zip(self.cells()) {
            write!(w, "\n{transition}")?;
            write_fields(w, delimiter, row)?;
        }
        w.write_char('\n')
    }
}

impl Display for MealyTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result {
        self.write_table(f, char::from(super::DEFAULT_DELIMITER))
    }
}

impl Display for MooreTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result {
        self.write_table(f, char::from(super::DEFAULT_DELIMITER))
    }
}
