use itertools::Itertools;
use tracing::trace;

use crate::{
    error::TableError,
    math::Map,
    signal::{MooreState, Signal, State},
};

use super::{
    check_shape, erase_positions, index_headers, index_unique_states, pretty_table,
    TransitionTable,
};

/// Transition table of a Moore machine. Every state carries exactly one output
/// signal, `signals[i]` is the output of `states[i]`, and the cells only name the
/// state that is reached.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MooreTable {
    signals: Vec<Signal>,
    states: Vec<State>,
    transitions: Vec<State>,
    cells: Vec<Vec<MooreState>>,
    columns: Map<State, usize>,
    rows: Map<State, usize>,
}

impl MooreTable {
    /// Builds a table from already parsed headers and cells.
    pub fn new(
        signals: Vec<Signal>,
        states: Vec<State>,
        transitions: Vec<State>,
        cells: Vec<Vec<MooreState>>,
    ) -> Result<Self, TableError> {
        if signals.len() != states.len() {
            return Err(TableError::ShapeMismatch {
                what: "signals",
                expected: states.len(),
                found: signals.len(),
            });
        }
        check_shape(states.len(), transitions.len(), &cells)?;

        Ok(Self {
            columns: index_unique_states(&states)?,
            rows: index_headers(&transitions),
            signals,
            states,
            transitions,
            cells,
        })
    }

    /// The output signals, aligned with [`Self::states`].
    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    /// The states heading the columns.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// The transitions heading the rows.
    pub fn transitions(&self) -> &[State] {
        &self.transitions
    }

    /// The grid of cells, indexed `[row][column]`.
    pub fn cells(&self) -> &[Vec<MooreState>] {
        &self.cells
    }

    /// Returns the output signal of `state`.
    pub fn signal_of(&self, state: &State) -> Result<Signal, TableError> {
        self.columns
            .get(state)
            .map(|column| self.signals[*column])
            .ok_or_else(|| TableError::unknown_state(*state))
    }

    /// Returns the cell in the row of `transition` and the column of `state`.
    pub fn cell(&self, transition: &State, state: &State) -> Result<&MooreState, TableError> {
        let row = self
            .rows
            .get(transition)
            .ok_or_else(|| TableError::unknown_transition(*transition))?;
        let column = self
            .columns
            .get(state)
            .ok_or_else(|| TableError::unknown_state(*state))?;
        Ok(&self.cells[*row][*column])
    }

    /// Renames every state so that its index equals its column while keeping its label,
    /// and rewrites the cells accordingly. Afterwards the output of `qN` is `signals[N]`.
    /// Returns the number of states that were renamed.
    pub fn renumber_states(&mut self) -> usize {
        let renamed: Map<State, State> = (0u32..)
            .zip(&self.states)
            .map(|(position, state)| (*state, State::new(state.label(), position)))
            .filter(|(from, to)| from != to)
            .collect();
        if renamed.is_empty() {
            return 0;
        }

        trace!(
            "renaming {}",
            renamed
                .iter()
                .map(|(from, to)| format!("{from} to {to}"))
                .join(", ")
        );
        self.redirect_targets(&renamed);
        for state in &mut self.states {
            if let Some(to) = renamed.get(state) {
                *state = *to;
            }
        }
        self.columns = index_headers(&self.states);
        renamed.len()
    }

    /// Renders the table with box drawing characters, used for diagnostics.
    pub fn to_pretty_table(&self) -> String {
        let header = |items: &[Signal]| {
            std::iter::once(String::new())
                .chain(items.iter().map(|s| s.to_string()))
                .collect::<Vec<_>>()
        };
        let records = [header(&self.signals), header(&self.states)]
            .into_iter()
            .chain(self.transitions.iter().zip(&self.cells).map(|(t, row)| {
                std::iter::once(t.to_string())
                    .chain(row.iter().map(|c| c.to_string()))
                    .collect()
            }))
            .collect();
        pretty_table(records, 2)
    }
}

impl TransitionTable for MooreTable {
    fn states(&self) -> &[State] {
        &self.states
    }

    fn transitions(&self) -> &[State] {
        &self.transitions
    }

    fn target(&self, row: usize, column: usize) -> State {
        self.cells[row][column].state()
    }

    fn column_of(&self, state: &State) -> Option<usize> {
        self.columns.get(state).copied()
    }

    fn row_of(&self, transition: &State) -> Option<usize> {
        self.rows.get(transition).copied()
    }

    fn output_signature(&self, column: usize) -> Vec<Signal> {
        vec![self.signals[column]]
    }

    fn remove_columns(&mut self, ascending: &[usize]) {
        if ascending.is_empty() {
            return;
        }
        erase_positions(&mut self.signals, ascending);
        erase_positions(&mut self.states, ascending);
        for row in &mut self.cells {
            erase_positions(row, ascending);
        }
        self.columns = index_headers(&self.states);
    }

    fn redirect_targets(&mut self, redirect: &Map<State, State>) {
        for cell in self.cells.iter_mut().flatten() {
            if let Some(to) = redirect.get(&cell.0) {
                cell.0 = *to;
            }
        }
    }
}
