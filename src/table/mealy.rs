use crate::{
    error::TableError,
    math::Map,
    signal::{MealyState, Signal, State},
};

use super::{
    check_shape, erase_positions, index_headers, index_unique_states, pretty_table,
    TransitionTable,
};

/// Transition table of a Mealy machine. Columns are states, rows are transitions and
/// each cell holds the state that is reached together with the signal that is emitted.
///
/// The cell grid is indexed `[row][column]`, so there is one row of cells for each
/// transition and each row contains one cell per state.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MealyTable {
    states: Vec<State>,
    transitions: Vec<State>,
    cells: Vec<Vec<MealyState>>,
    columns: Map<State, usize>,
    rows: Map<State, usize>,
}

impl MealyTable {
    /// Builds a table from already parsed headers and cells. Fails if the grid does not
    /// match the headers or if a state heads more than one column.
    pub fn new(
        states: Vec<State>,
        transitions: Vec<State>,
        cells: Vec<Vec<MealyState>>,
    ) -> Result<Self, TableError> {
        check_shape(states.len(), transitions.len(), &cells)?;
        let columns = index_unique_states(&states)?;

        Ok(Self {
            rows: index_headers(&transitions),
            states,
            transitions,
            cells,
            columns,
        })
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
    pub fn cells(&self) -> &[Vec<MealyState>] {
        &self.cells
    }

    /// Returns the cell in the row of `transition` and the column of `state`.
    pub fn cell(&self, transition: &State, state: &State) -> Result<&MealyState, TableError> {
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

    /// Renders the table with box drawing characters, used for diagnostics.
    pub fn to_pretty_table(&self) -> String {
        let header: Vec<String> = std::iter::once(String::new())
            .chain(self.states.iter().map(|s| s.to_string()))
            .collect();
        let records = std::iter::once(header)
            .chain(self.transitions.iter().zip(&self.cells).map(|(t, row)| {
                std::iter::once(t.to_string())
                    .chain(row.iter().map(|c| c.to_string()))
                    .collect()
            }))
            .collect();
        pretty_table(records, 1)
    }
}

impl TransitionTable for MealyTable {
    fn states(&self) -> &[State] {
        &self.states
    }

    fn transitions(&self) -> &[State] {
        &self.transitions
    }

    fn target(&self, row: usize, column: usize) -> State {
        self.cells[row][column].state
    }

    fn column_of(&self, state: &State) -> Option<usize> {
        self.columns.get(state).copied()
    }

    fn row_of(&self, transition: &State) -> Option<usize> {
        self.rows.get(transition).copied()
    }

    fn output_signature(&self, column: usize) -> Vec<Signal> {
        self.cells.iter().map(|row| row[column].signal).collect()
    }

    fn remove_columns(&mut self, ascending: &[usize]) {
        if ascending.is_empty() {
            return;
        }
        erase_positions(&mut self.states, ascending);
        for row in &mut self.cells {
            erase_positions(row, ascending);
        }
        self.columns = index_headers(&self.states);
    }

    fn redirect_targets(&mut self, redirect: &Map<State, State>) {
        for cell in self.cells.iter_mut().flatten() {
            if let Some(to) = redirect.get(&cell.state) {
                cell.state = *to;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MealyTable;
    use crate::{
        error::{HeaderKind, TableError},
        signal::{MealyState, State},
        table::TransitionTable,
    };

    fn states(raw: &[&str]) -> Vec<State> {
        raw.iter().map(|s| s.parse().unwrap()).collect()
    }

    fn cells(raw: &[&[&str]]) -> Vec<Vec<MealyState>> {
        raw.iter()
            .map(|row| row.iter().map(|c| c.parse().unwrap()).collect())
            .collect()
    }

    #[test]
    fn lookup_cells_by_header() {
        let table = MealyTable::new(
            states(&["q0", "q1"]),
            states(&["x0", "x1"]),
            cells(&[&["q1/a0", "q0/a1"], &["q0/a1", "q1/a0"]]),
        )
        .unwrap();

        let x1 = State::new('x', 1);
        let q0 = State::new('q', 0);
        assert_eq!(table.cell(&x1, &q0).unwrap().to_string(), "q0/a1");
        assert_eq!(
            table.cell(&State::new('x', 2), &q0),
            Err(TableError::UnknownHeader {
                kind: HeaderKind::Transition,
                value: State::new('x', 2)
            })
        );
        assert_eq!(
            table.cell(&x1, &State::new('q', 5)),
            Err(TableError::UnknownHeader {
                kind: HeaderKind::State,
                value: State::new('q', 5)
            })
        );
    }

    #[test]
    fn reject_malformed_shapes() {
        assert!(matches!(
            MealyTable::new(states(&["q0"]), states(&["x0", "x1"]), cells(&[&["q0/a0"]])),
            Err(TableError::ShapeMismatch { expected: 2, found: 1, .. })
        ));
        assert!(matches!(
            MealyTable::new(
                states(&["q0", "q1"]),
                states(&["x0"]),
                cells(&[&["q0/a0"]])
            ),
            Err(TableError::ShapeMismatch { expected: 2, found: 1, .. })
        ));
        assert_eq!(
            MealyTable::new(
                states(&["q0", "q0"]),
                states(&["x0"]),
                cells(&[&["q0/a0", "q0/a0"]])
            ),
            Err(TableError::DuplicateState(State::new('q', 0)))
        );
    }

    #[test_log::test]
    fn remove_state_without_incoming_transitions() {
        let mut table = MealyTable::new(
            states(&["q0", "q1", "q2"]),
            states(&["x0", "x1"]),
            cells(&[
                &["q1/a0", "q0/a1", "q2/a0"],
                &["q0/a1", "q1/a0", "q0/a0"],
            ]),
        )
        .unwrap();

        assert_eq!(table.unreachable_columns(), vec![2]);
        assert_eq!(table.remove_unreachable_states(), 1);
        assert_eq!(table.states(), states(&["q0", "q1"]).as_slice());
        assert_eq!(
            table.cells(),
            cells(&[&["q1/a0", "q0/a1"], &["q0/a1", "q1/a0"]]).as_slice()
        );
        assert_eq!(table.column_of(&State::new('q', 1)), Some(1));
        assert_eq!(table.column_of(&State::new('q', 2)), None);
    }

    #[test_log::test]
    fn chained_unreachable_states_need_repeated_passes() {
        // q3 is unreachable, q2 is only reachable from q3
        let mut table = MealyTable::new(
            states(&["q0", "q1", "q2", "q3"]),
            states(&["x0"]),
            cells(&[&["q1/a0", "q0/a1", "q1/a0", "q2/a1"]]),
        )
        .unwrap();

        assert_eq!(table.unreachable_columns(), vec![3]);
        assert_eq!(table.remove_unreachable_states(), 2);
        assert_eq!(table.states(), states(&["q0", "q1"]).as_slice());
        assert!(table.unreachable_columns().is_empty());
        assert_eq!(table.remove_unreachable_states(), 0);
    }

    #[test]
    fn initial_state_survives_without_incoming_transitions() {
        let mut table = MealyTable::new(
            states(&["q0", "q1"]),
            states(&["x0"]),
            cells(&[&["q1/a0", "q1/a1"]]),
        )
        .unwrap();
        assert_eq!(table.remove_unreachable_states(), 0);
        assert_eq!(table.size(), 2);
    }
}
