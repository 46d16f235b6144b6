use std::{io::Read, str::FromStr};

use csv::StringRecord;
use tracing::trace;

use crate::{
    error::TableError,
    signal::{MealyState, MooreState, Signal, State},
    table::{MealyTable, MooreTable},
};

use super::ReadError;

pub(super) fn read_mealy<R: Read>(mut reader: csv::Reader<R>) -> Result<MealyTable, ReadError> {
    let mut records = reader.records();
    let states = parse_header(&records.next().ok_or(ReadError::MissingHeader)??)?;
    trace!("read mealy header with {} states", states.len());

    let mut transitions = Vec::new();
    let mut cells = Vec::new();
    for record in records {
        let (transition, row) = parse_row::<MealyState>(&record?, states.len())?;
        transitions.push(transition);
        cells.push(row);
    }

    Ok(MealyTable::new(states, transitions, cells)?)
}

pub(super) fn read_moore<R: Read>(mut reader: csv::Reader<R>) -> Result<MooreTable, ReadError> {
    let mut records = reader.records();
    let signals = parse_header(&records.next().ok_or(ReadError::MissingHeader)??)?;
    let states = parse_header(&records.next().ok_or(ReadError::MissingHeader)??)?;
    trace!(
        "read moore header with {} signals and {} states",
        signals.len(),
        states.len()
    );

    let mut transitions = Vec::new();
    let mut cells = Vec::new();
    for record in records {
        let (transition, row) = parse_row::<MooreState>(&record?, states.len())?;
        transitions.push(transition);
        cells.push(row);
    }

    Ok(MooreTable::new(signals, states, transitions, cells)?)
}

/// Header rows start with an empty field, empty fields carry no name and are skipped.
fn parse_header(record: &StringRecord) -> Result<Vec<Signal>, ReadError> {
    record
        .iter()
        .filter(|field| !field.is_empty())
        .map(|field| field.parse().map_err(ReadError::from))
        .collect()
}

/// Splits a data row into its transition and its cells. Trailing empty fields, as left
/// behind by a delimiter at the end of the line, are ignored.
fn parse_row<C>(record: &StringRecord, expected: usize) -> Result<(State, Vec<C>), ReadError>
where
    C: FromStr<Err = TableError>,
{
    let line = record.position().map(|p| p.line()).unwrap_or_default();
    let fields: Vec<&str> = record.iter().collect();
    let end = fields
        .iter()
        .rposition(|field| !field.is_empty())
        .map_or(0, |last| last + 1);

    let Some((transition, cells)) = fields[..end].split_first() else {
        return Err(ReadError::MissingTransition { line });
    };
    if transition.is_empty() {
        return Err(ReadError::MissingTransition { line });
    }
    if cells.len() != expected {
        return Err(ReadError::RaggedRow {
            line,
            expected,
            found: cells.len(),
        });
    }

    Ok((
        transition.parse()?,
        cells
            .iter()
            .map(|cell| cell.parse())
            .collect::<Result<Vec<_>, _>>()?,
    ))
}

#[cfg(test)]
mod tests {
    use crate::{
        error::TableError,
        format::{read_mealy, read_moore, ReadError, TableFormat},
        signal::{Signal, State},
    };

    #[test_log::test]
    fn read_mealy_table() {
        let table = read_mealy(";q0;q1\nx0;q1/a0;q0/a1\nx1;q0/a1;q1/a0\n".as_bytes()).unwrap();
        assert_eq!(table.states(), &[State::new('q', 0), State::new('q', 1)]);
        assert_eq!(table.transitions(), &[State::new('x', 0), State::new('x', 1)]);
        assert_eq!(table.cells()[1][0].to_string(), "q0/a1");
    }

    #[test]
    fn read_moore_table() {
        let table = read_moore(";y0;y1\n;q0;q1\nx0;q1;q0\nx1;q1;q1\n".as_bytes()).unwrap();
        assert_eq!(table.signals(), &[Signal::new('y', 0), Signal::new('y', 1)]);
        assert_eq!(table.states(), &[State::new('q', 0), State::new('q', 1)]);
        assert_eq!(table.cells()[0][0].state(), State::new('q', 1));
    }

    #[test]
    fn tolerate_whitespace_and_trailing_delimiters() {
        let table = read_mealy(" ; q0 ; q1 ;\r\nx0 ; q1/a0 ; q0/a1 ;\r\n".as_bytes()).unwrap();
        assert_eq!(table.to_string(), ";q0;q1\nx0;q1/a0;q0/a1\n");
    }

    #[test]
    fn read_with_custom_delimiter() {
        let format = TableFormat::with_delimiter(b',');
        let table = format
            .read_moore(",y0\n,q0\nx0,q0\n".as_bytes())
            .unwrap();
        assert_eq!(table.states(), &[State::new('q', 0)]);
    }

    #[test]
    fn reject_ragged_rows() {
        let result = read_mealy(";q0;q1\nx0;q1/a0;q0/a1\nx1;q0/a1\n".as_bytes());
        assert!(matches!(
            result,
            Err(ReadError::RaggedRow {
                line: 3,
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn reject_missing_headers_and_transitions() {
        assert!(matches!(read_mealy("".as_bytes()), Err(ReadError::MissingHeader)));
        assert!(matches!(
            read_moore(";y0\n".as_bytes()),
            Err(ReadError::MissingHeader)
        ));
        assert!(matches!(
            read_mealy(";q0\n;q0/a0\n".as_bytes()),
            Err(ReadError::MissingTransition { line: 2 })
        ));
    }

    #[test]
    fn reject_malformed_tokens() {
        assert!(matches!(
            read_mealy(";q0\nx0;q0a0\n".as_bytes()),
            Err(ReadError::Table(TableError::MalformedToken { .. }))
        ));
        assert!(matches!(
            read_moore(";y0\n;0q\nx0;q0\n".as_bytes()),
            Err(ReadError::Table(TableError::MalformedToken { .. }))
        ));
    }
}
