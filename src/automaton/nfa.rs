use tracing::trace;

use crate::math::StateSet;

use super::{Automaton, FiniteSemantics, Kind};

/// Semantics of a nondeterministic automaton: all runs on a word are explored at once by
/// tracking the set of reachable states, the word is accepted if this set contains an
/// accepting state once the word is consumed.
#[derive(Clone, Copy, Default, Hash, Eq, PartialEq)]
pub struct NFASemantics;

impl std::fmt::Debug for NFASemantics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NFA (reach true)")
    }
}

impl FiniteSemantics for NFASemantics {
    const KIND: Kind = Kind::Nfa;

    fn accepts(&self, automaton: &Automaton<Self>, word: &str) -> bool {
        automaton
            .reachable(word)
            .iter()
            .any(|q| automaton.is_accepting(q))
    }
}

/// A nondeterministic finite automaton (NFA) may have any number of transitions leaving a
/// state on the same symbol. It accepts a word if at least one run on it ends in an
/// accepting state.
pub type NFA = Automaton<NFASemantics>;

impl NFA {
    /// Returns the set of states that can be reached from any state in `states` by reading
    /// `symbol`.
    pub fn step(&self, states: &StateSet, symbol: char) -> StateSet {
        states
            .iter()
            .flat_map(|q| self.successors(q, symbol).iter().copied())
            .collect()
    }

    /// Returns the set of states in which some run on `word` ends. The set is empty if
    /// every run gets stuck.
    pub fn reachable(&self, word: &str) -> StateSet {
        let mut current = StateSet::singleton(self.initial());
        for symbol in word.chars() {
            let next = self.step(&current, symbol);
            trace!("{current:?} --{symbol}--> {next:?}");
            if next.is_empty() {
                return next;
            }
            current = next;
        }
        current
    }
}
