use bit_set::BitSet;
use itertools::Itertools;

use crate::automaton::StateId;

/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
pub type Map<K, V> = fxhash::FxHashMap<K, V>;

/// A set of states, stored as a bit set over the [`StateId`]s of an automaton. This is what
/// a nondeterministic automaton keeps track of while it reads a word.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct StateSet(BitSet);

impl StateSet {
    /// Creates an empty set of states.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set that contains only the given state.
    pub fn singleton(state: StateId) -> Self {
        let mut set = Self::new();
        set.insert(state);
        set
    }

    /// Inserts `state`, returns `true` if it was not present before.
    pub fn insert(&mut self, state: StateId) -> bool {
        self.0.insert(state.index())
    }

    /// Returns `true` if `state` is contained in the set.
    pub fn contains(&self, state: StateId) -> bool {
        self.0.contains(state.index())
    }

    /// Returns the number of states in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no state is contained in the set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the contained states in ascending order of their ids.
    pub fn iter(&self) -> impl Iterator<Item = StateId> + '_ {
        self.0.iter().map(StateId::new)
    }
}

impl FromIterator<StateId> for StateSet {
    fn from_iter<T: IntoIterator<Item = StateId>>(iter: T) -> Self {
        let mut set = Self::new();
        for state in iter {
            set.insert(state);
        }
        set
    }
}

impl Extend<StateId> for StateSet {
    fn extend<T: IntoIterator<Item = StateId>>(&mut self, iter: T) {
        for state in iter {
            self.insert(state);
        }
    }
}

impl std::fmt::Debug for StateSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.iter().map(|q| format!("{q:?}")).join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_set_collects_unique_states() {
        let set: StateSet = [2, 0, 2, 5].into_iter().map(StateId::new).collect();
        assert_eq!(set.len(), 3);
        assert!(set.contains(StateId::new(5)));
        assert!(!set.contains(StateId::new(1)));
        assert_eq!(
            set.iter().map(StateId::index).collect::<Vec<_>>(),
            vec![0, 2, 5]
        );
        assert_eq!(format!("{set:?}"), "{q0, q2, q5}");
    }

    #[test]
    fn empty_state_set() {
        let set = StateSet::new();
        assert!(set.is_empty());
        assert_eq!(set.iter().count(), 0);
    }
}
