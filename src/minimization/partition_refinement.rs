use std::hash::Hash;

use itertools::Itertools;
use tracing::trace;

use crate::{
    error::TableError,
    math::{Map, Partition},
    table::TransitionTable,
};

/// Computes the coarsest partition of the columns of `table` such that states in the
/// same class emit the same outputs and, for every transition, move into the same class.
///
/// Starts by grouping states with equal [`TransitionTable::output_signature`] and then
/// splits classes until a round leaves the number of classes unchanged. As classes can
/// only be split, this happens after at most `table.size() - 1` rounds.
pub(crate) fn refine<T: TransitionTable + ?Sized>(table: &T) -> Result<Partition, TableError> {
    let rows = table.transitions().len();
    let targets = (0..table.size())
        .map(|column| {
            (0..rows)
                .map(|row| {
                    let target = table.target(row, column);
                    table
                        .column_of(&target)
                        .ok_or_else(|| TableError::unknown_state(target))
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    let (mut classes, mut count) =
        assign_classes((0..table.size()).map(|column| table.output_signature(column)));
    trace!("outputs separate {} states into {count} classes", table.size());

    let mut round = 0;
    loop {
        round += 1;
        let (refined, refined_count) = assign_classes(targets.iter().enumerate().map(
            |(column, reached)| {
                (
                    classes[column],
                    reached.iter().map(|target| classes[*target]).collect_vec(),
                )
            },
        ));
        trace!("refinement round {round} yields {refined_count} classes");
        if refined_count == count {
            break;
        }
        classes = refined;
        count = refined_count;
    }

    Ok(Partition::from_assignment(&classes))
}

/// Numbers the distinct keys in order of their first occurrence and returns the number
/// of every key together with the number of distinct keys.
fn assign_classes<K, I>(keys: I) -> (Vec<usize>, usize)
where
    K: Hash + Eq,
    I: IntoIterator<Item = K>,
{
    let mut ids: Map<K, usize> = Map::new();
    let classes = keys
        .into_iter()
        .map(|key| {
            let next = ids.len();
            *ids.entry(key).or_insert(next)
        })
        .collect();
    (classes, ids.len())
}

#[cfg(test)]
mod tests {
    use super::{assign_classes, refine};
    use crate::{
        math::Partition,
        signal::{MooreState, Signal},
        table::MooreTable,
    };

    fn names(raw: &[&str]) -> Vec<Signal> {
        raw.iter().map(|s| s.parse().unwrap()).collect()
    }

    fn moore(signals: &[&str], states: &[&str], transitions: &[&str], cells: &[&[&str]]) -> MooreTable {
        let cells: Vec<Vec<MooreState>> = cells
            .iter()
            .map(|row| row.iter().map(|c| c.parse().unwrap()).collect())
            .collect();
        MooreTable::new(names(signals), names(states), names(transitions), cells).unwrap()
    }

    #[test]
    fn classes_are_numbered_by_first_occurrence() {
        assert_eq!(assign_classes(["b", "a", "b", "c"]), (vec![0, 1, 0, 2], 3));
        assert_eq!(assign_classes(Vec::<u8>::new()), (vec![], 0));
    }

    #[test_log::test]
    fn refinement_splits_until_stable() {
        // q0 and q1 share an output but q1 leads into the class of q2 while q0 does not,
        // q2 and q3 cannot be told apart
        let table = moore(
            &["y0", "y0", "y1", "y1"],
            &["q0", "q1", "q2", "q3"],
            &["x0"],
            &[&["q1", "q2", "q3", "q2"]],
        );
        assert_eq!(
            refine(&table).unwrap(),
            Partition::from_assignment(&[0, 1, 2, 2])
        );
    }

    #[test]
    fn refinement_fails_on_undeclared_target() {
        let table = moore(&["y0"], &["q0"], &["x0"], &[&["q3"]]);
        assert!(refine(&table).is_err());
    }
}
