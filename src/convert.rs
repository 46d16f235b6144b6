//! Conversions between [`MealyTable`] and [`MooreTable`].
//!
//! Going from Mealy to Moore generally increases the number of states: a Moore state
//! carries exactly one output, so every distinct pair of target state and emitted
//! signal that occurs in the Mealy table becomes a state of its own. The other
//! direction keeps the states and moves the output of each target onto the
//! transitions leading into it.
use itertools::Itertools;
use tracing::{debug, trace};

use crate::{
    error::TableError,
    math::Bijection,
    signal::{MealyState, MooreState, State},
    table::{MealyTable, MooreTable, TransitionTable},
};

/// Label of the states that are generated when converting into a Moore table.
pub const GENERATED_STATE_LABEL: char = 'q';

impl MooreTable {
    /// Builds the Moore table that produces the same outputs as `mealy`.
    ///
    /// States are named `q0, q1, ...` following the order of the distinct mealy cells
    /// they stand for, where cells are ordered by state and then by signal. The new
    /// state for the cell `(m, s)` transitions on input `t` to the state generated for
    /// the mealy cell at `(t, m)`, where `t` is taken by row position.
    pub fn from_mealy(mealy: &MealyTable) -> Result<Self, TableError> {
        let origins = distinct_cells(mealy)?;
        if origins.is_empty() {
            return Err(TableError::ConversionIncomplete(
                "the mealy table has no cells".to_string(),
            ));
        }

        let mut generated: Bijection<State, MealyState> = Bijection::with_capacity(origins.len());
        let states = (0u32..)
            .zip(&origins)
            .map(|(i, origin)| {
                let state = State::new(GENERATED_STATE_LABEL, i);
                trace!("generated state {state} for {origin}");
                generated.insert(state, *origin);
                state
            })
            .collect_vec();
        let signals = origins.iter().map(|origin| origin.signal).collect_vec();
        let transitions = mealy.transitions().to_vec();

        // rows are addressed by position, a transition may head more than one row
        let mut cells = vec![Vec::with_capacity(states.len()); transitions.len()];
        for origin in &origins {
            let column = mealy
                .column_of(&origin.state)
                .ok_or_else(|| TableError::unknown_state(origin.state))?;
            for (row, reached) in mealy.cells().iter().map(|row| &row[column]).enumerate() {
                let target = generated.get_by_right(reached).ok_or_else(|| {
                    TableError::ConversionIncomplete(format!(
                        "no state was generated for `{reached}`"
                    ))
                })?;
                cells[row].push(MooreState(*target));
            }
        }

        debug!(
            "converted mealy table with {} states into moore table with {} states",
            mealy.states().len(),
            states.len()
        );
        MooreTable::new(signals, states, transitions, cells)
    }
}

impl MealyTable {
    /// Builds the Mealy table that produces the same outputs as `moore`. Each cell pairs
    /// the reached state with that state's output.
    ///
    /// The output of a state is found through the index of its name, i.e. the output of
    /// `q3` is `moore.signals()[3]`, so state names have to be consistent with the
    /// positions of the signals.
    pub fn from_moore(moore: &MooreTable) -> Result<Self, TableError> {
        let signals = moore.signals();
        let cells = moore
            .cells()
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| {
                        let next = cell.state();
                        let index = next.index() as usize;
                        signals
                            .get(index)
                            .map(|signal| MealyState::new(next, *signal))
                            .ok_or(TableError::LookupOutOfRange {
                                index,
                                len: signals.len(),
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "converted moore table with {} states into mealy table",
            moore.states().len()
        );
        MealyTable::new(moore.states().to_vec(), moore.transitions().to_vec(), cells)
    }
}

impl TryFrom<&MealyTable> for MooreTable {
    type Error = TableError;

    fn try_from(value: &MealyTable) -> Result<Self, Self::Error> {
        MooreTable::from_mealy(value)
    }
}

impl TryFrom<&MooreTable> for MealyTable {
    type Error = TableError;

    fn try_from(value: &MooreTable) -> Result<Self, Self::Error> {
        MealyTable::from_moore(value)
    }
}

/// Collects the distinct cells of `mealy` in ascending order.
fn distinct_cells(mealy: &MealyTable) -> Result<Vec<MealyState>, TableError> {
    let mut distinct = mealy.cells().iter().flatten().copied().unique().collect_vec();

    // sorting compares every pair of states and the signals of cells sharing a state
    if let Some(first) = distinct.first().copied() {
        for cell in &distinct {
            first.state.try_cmp(&cell.state)?;
        }
    }
    for (_, group) in distinct.iter().into_group_map_by(|cell| cell.state) {
        for cell in &group {
            group[0].signal.try_cmp(&cell.signal)?;
        }
    }

    distinct.sort_by(|l, r| {
        l.state
            .index()
            .cmp(&r.state.index())
            .then_with(|| l.signal.index().cmp(&r.signal.index()))
    });
    Ok(distinct)
}
