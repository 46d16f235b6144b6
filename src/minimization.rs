pub(crate) mod partition_refinement;

use itertools::Itertools;
use tracing::debug;

use crate::{
    error::TableError,
    math::{Map, Partition},
    signal::State,
    table::{MealyTable, MooreTable, TransitionTable},
};

impl MealyTable {
    /// Reduces `self` to an equivalent table without unreachable or duplicate states.
    /// Two states are merged if every input makes them emit the same signal and move
    /// into states that are again equivalent.
    pub fn minimize(&mut self) -> Result<(), TableError> {
        minimize(self)
    }
}

impl MooreTable {
    /// Reduces `self` to an equivalent table without unreachable or duplicate states.
    /// States with different output signals are never merged.
    ///
    /// The first column is taken to be the initial state and is always kept. For a table
    /// built by [`MooreTable::from_mealy`] that column is `q0`, the smallest generated
    /// state, which need not correspond to the initial state of the Mealy machine.
    ///
    /// The surviving states are renumbered by [`MooreTable::renumber_states`], so the
    /// result can be converted back with [`MealyTable::from_moore`].
    pub fn minimize(&mut self) -> Result<(), TableError> {
        minimize(self)?;
        self.renumber_states();
        Ok(())
    }
}

/// Removes all unreachable states from `table` and then collapses every class of
/// equivalent states into the state of the class that comes first.
pub fn minimize<T: TransitionTable + ?Sized>(table: &mut T) -> Result<(), TableError> {
    let before = table.size();
    let unreachable = table.remove_unreachable_states();

    let partition = partition_refinement::refine(table)?;
    merge_equivalent_states(table, &partition);

    debug!(
        "minimized table from {before} to {} states, {unreachable} were unreachable",
        table.size()
    );
    Ok(())
}

/// Replaces every state by the representative of its class in `partition` and drops
/// the columns that are no longer needed. The representative keeps its name.
pub fn merge_equivalent_states<T: TransitionTable + ?Sized>(table: &mut T, partition: &Partition) {
    let states = table.states();
    let mut redirect: Map<State, State> = Map::new();
    for class in partition {
        let mut members = class.iter().map(|column| states[*column]);
        if let Some(representative) = members.next() {
            redirect.extend(members.map(|member| (member, representative)));
        }
    }
    if redirect.is_empty() {
        return;
    }

    debug!(
        "merging {}",
        redirect
            .iter()
            .map(|(from, to)| format!("{from} into {to}"))
            .join(", ")
    );
    table.redirect_targets(&redirect);
    let redundant = partition.redundant().sorted().collect_vec();
    table.remove_columns(&redundant);
}

#[cfg(test)]
mod tests {
    use crate::{
        signal::{MealyState, MooreState, Signal},
        table::{MealyTable, MooreTable, TransitionTable},
    };

    fn names(raw: &[&str]) -> Vec<Signal> {
        raw.iter().map(|s| s.parse().unwrap()).collect()
    }

    fn mealy(states: &[&str], transitions: &[&str], cells: &[&[&str]]) -> MealyTable {
        let cells: Vec<Vec<MealyState>> = cells
            .iter()
            .map(|row| row.iter().map(|c| c.parse().unwrap()).collect())
            .collect();
        MealyTable::new(names(states), names(transitions), cells).unwrap()
    }

    fn moore(signals: &[&str], states: &[&str], transitions: &[&str], cells: &[&[&str]]) -> MooreTable {
        let cells: Vec<Vec<MooreState>> = cells
            .iter()
            .map(|row| row.iter().map(|c| c.parse().unwrap()).collect())
            .collect();
        MooreTable::new(names(signals), names(states), names(transitions), cells).unwrap()
    }

    #[test_log::test]
    fn mealy_equivalent_states_are_merged() {
        let mut table = mealy(
            &["q0", "q1", "q2"],
            &["x0", "x1"],
            &[&["q1/a0", "q2/a1", "q1/a1"], &["q2/a1", "q0/a0", "q0/a0"]],
        );
        table.minimize().unwrap();

        assert_eq!(
            table,
            mealy(
                &["q0", "q1"],
                &["x0", "x1"],
                &[&["q1/a0", "q1/a1"], &["q1/a1", "q0/a0"]],
            )
        );
    }

    #[test_log::test]
    fn mealy_unreachable_column_is_dropped() {
        let mut table = mealy(
            &["q0", "q1", "q2"],
            &["x0", "x1"],
            &[&["q1/a0", "q0/a1", "q2/a0"], &["q0/a1", "q1/a0", "q0/a0"]],
        );
        table.minimize().unwrap();

        assert_eq!(
            table.to_string(),
            ";q0;q1\nx0;q1/a0;q0/a1\nx1;q0/a1;q1/a0\n"
        );
    }

    #[test_log::test]
    fn moore_equivalent_states_are_merged() {
        let mut table = moore(
            &["y0", "y1", "y1"],
            &["q0", "q1", "q2"],
            &["x0", "x1"],
            &[&["q1", "q0", "q0"], &["q2", "q1", "q2"]],
        );
        table.minimize().unwrap();

        assert_eq!(
            table,
            moore(
                &["y0", "y1"],
                &["q0", "q1"],
                &["x0", "x1"],
                &[&["q1", "q0"], &["q1", "q1"]],
            )
        );
    }

    #[test]
    fn different_outputs_are_never_merged() {
        // q1 and q2 behave identically but emit different signals
        let mut table = moore(
            &["y0", "y0", "y1"],
            &["q0", "q1", "q2"],
            &["x0", "x1"],
            &[&["q1", "q0", "q0"], &["q2", "q1", "q1"]],
        );
        let before = table.clone();
        table.minimize().unwrap();
        assert_eq!(table, before);

        let mut mealy_table = mealy(
            &["q0", "q1", "q2"],
            &["x0"],
            &[&["q1/a0", "q2/a0", "q1/a1"]],
        );
        let before = mealy_table.clone();
        mealy_table.minimize().unwrap();
        assert_eq!(mealy_table, before);
    }

    #[test]
    fn minimization_is_idempotent() {
        let mut table = mealy(
            &["q0", "q1", "q2", "q3"],
            &["x0", "x1"],
            &[
                &["q1/a0", "q2/a1", "q1/a1", "q0/a0"],
                &["q2/a1", "q0/a0", "q0/a0", "q3/a1"],
            ],
        );
        table.minimize().unwrap();
        let once = table.clone();
        table.minimize().unwrap();
        assert_eq!(table, once);
        assert!(table.unreachable_columns().is_empty());
        assert_eq!(table.size(), 2);
    }
}
