use std::collections::BTreeSet;

/// Type alias for maps that remember insertion order, we use this to hide which map
/// type we are actually using.
pub type Map<K, V> = indexmap::IndexMap<K, V>;

/// Represents a bijective mapping between `L` and `R`, that is a mapping which associates
/// each `L` with precisely one `R` and vice versa.
pub type Bijection<L, R> = bimap::BiHashMap<L, R>;

/// A partition groups the columns of a table into disjoint classes. Classes are kept
/// sorted by their smallest element, which doubles as the representative of the class.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Partition(Vec<BTreeSet<usize>>);

impl std::ops::Deref for Partition {
    type Target = Vec<BTreeSet<usize>>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a> IntoIterator for &'a Partition {
    type Item = &'a BTreeSet<usize>;
    type IntoIter = std::slice::Iter<'a, BTreeSet<usize>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Partition {
    /// Builds a partition from an assignment of class ids, where `classes[i]` is the
    /// class that element `i` belongs to.
    pub fn from_assignment(classes: &[usize]) -> Self {
        let mut grouped: Map<usize, BTreeSet<usize>> = Map::new();
        for (element, class) in classes.iter().enumerate() {
            grouped.entry(*class).or_default().insert(element);
        }
        let mut sets: Vec<_> = grouped.into_values().collect();
        sets.sort_by_key(|set| set.first().copied());
        Self(sets)
    }

    /// Returns the number of classes.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Returns the smallest element of the class containing `element`, if there is one.
    pub fn representative(&self, element: usize) -> Option<usize> {
        self.0
            .iter()
            .find(|class| class.contains(&element))
            .and_then(|class| class.first().copied())
    }

    /// Iterates over all elements that are not the representative of their class.
    pub fn redundant(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().flat_map(|class| class.iter().skip(1).copied())
    }
}
