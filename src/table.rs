use bit_set::BitSet;
use owo_colors::OwoColorize;
use tracing::trace;

use crate::{
    error::TableError,
    math::Map,
    signal::{Signal, State},
};

mod mealy;
pub use mealy::MealyTable;

mod moore;
pub use moore::MooreTable;

/// Behaviour shared by [`MealyTable`] and [`MooreTable`]. Both are grids whose columns
/// are states and whose rows are transitions (the inputs of the automaton). Every cell
/// names the state that is reached when the row's input is read in the column's state.
///
/// The methods that are provided by this trait only rely on the column view, which
/// is why reachability analysis and minimization work for both kinds of table.
pub trait TransitionTable {
    /// The column headers in order.
    fn states(&self) -> &[State];

    /// The row headers in order.
    fn transitions(&self) -> &[State];

    /// The state stored in the cell at `row` and `column`. Panics if either is out of range.
    fn target(&self, row: usize, column: usize) -> State;

    /// Position of the column headed by `state`.
    fn column_of(&self, state: &State) -> Option<usize>;

    /// Position of the row headed by `transition`.
    fn row_of(&self, transition: &State) -> Option<usize>;

    /// Everything that is observable when leaving the state in `column`. Two states
    /// with a different signature can never be equivalent.
    fn output_signature(&self, column: usize) -> Vec<Signal>;

    /// Deletes the given columns together with everything aligned to them. The indices
    /// must be sorted in ascending order and free of duplicates.
    fn remove_columns(&mut self, ascending: &[usize]);

    /// Replaces every cell target that is a key of `redirect` by the associated value.
    fn redirect_targets(&mut self, redirect: &Map<State, State>);

    /// The number of states.
    fn size(&self) -> usize {
        self.states().len()
    }

    /// Performs a single pass over the table and collects all columns that no other
    /// column transitions into. The first column is the initial state and is never
    /// reported, even if nothing leads into it.
    fn unreachable_columns(&self) -> Vec<usize> {
        let mut reachable = BitSet::with_capacity(self.size());
        reachable.insert(0);

        for row in 0..self.transitions().len() {
            for source in 0..self.size() {
                match self.column_of(&self.target(row, source)) {
                    Some(column) if column != source => {
                        reachable.insert(column);
                    }
                    _ => {}
                }
            }
        }

        (0..self.size())
            .filter(|column| !reachable.contains(*column))
            .collect()
    }

    /// Removes unreachable states until none are left. A single pass is not enough, as
    /// a state may only be reachable from a state that is removed in the same pass.
    /// Returns the number of states that have been removed.
    fn remove_unreachable_states(&mut self) -> usize {
        let mut removed = 0;
        loop {
            let doomed = self.unreachable_columns();
            if doomed.is_empty() {
                return removed;
            }
            trace!(
                "removing unreachable states {:?}",
                doomed.iter().map(|c| self.states()[*c].to_string()).collect::<Vec<_>>()
            );
            removed += doomed.len();
            self.remove_columns(&doomed);
        }
    }
}

/// Erases the given positions from `items`. Every erasure shifts the elements behind
/// it one to the left, so the n-th removal has to be corrected by n.
pub(crate) fn erase_positions<T>(items: &mut Vec<T>, ascending: &[usize]) {
    for (erased, index) in ascending.iter().enumerate() {
        items.remove(index - erased);
    }
}

/// Maps every header to its position, if a header occurs twice the first occurrence wins.
pub(crate) fn index_headers(headers: &[State]) -> Map<State, usize> {
    let mut index = Map::with_capacity(headers.len());
    for (position, header) in headers.iter().enumerate() {
        index.entry(*header).or_insert(position);
    }
    index
}

/// Like [`index_headers`], but a repeated state is an error.
pub(crate) fn index_unique_states(states: &[State]) -> Result<Map<State, usize>, TableError> {
    let mut index = Map::with_capacity(states.len());
    for (position, state) in states.iter().enumerate() {
        if index.insert(*state, position).is_some() {
            return Err(TableError::DuplicateState(*state));
        }
    }
    Ok(index)
}

/// Checks that there is one row of cells per transition and one cell per state in each row.
pub(crate) fn check_shape<C>(
    columns: usize,
    rows: usize,
    cells: &[Vec<C>],
) -> Result<(), TableError> {
    if cells.len() != rows {
        return Err(TableError::ShapeMismatch {
            what: "rows of cells",
            expected: rows,
            found: cells.len(),
        });
    }
    if let Some(row) = cells.iter().find(|row| row.len() != columns) {
        return Err(TableError::ShapeMismatch {
            what: "cells in a row",
            expected: columns,
            found: row.len(),
        });
    }
    Ok(())
}

/// Renders a grid for diagnostic output, the first `header_rows` records are highlighted.
pub(crate) fn pretty_table(records: Vec<Vec<String>>, header_rows: usize) -> String {
    let mut builder = tabled::builder::Builder::default();
    for (i, record) in records.into_iter().enumerate() {
        if i < header_rows {
            builder.push_record(record.into_iter().map(|field| field.bold().to_string()));
        } else {
            builder.push_record(record);
        }
    }
    builder
        .build()
        .with(tabled::settings::Style::rounded())
        .to_string()
}
