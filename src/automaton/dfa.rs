use tracing::trace;

use crate::error::ConfigError;

use super::{Automaton, FiniteSemantics, Kind, StateId};

/// Semantics of a deterministic automaton: a word is read along a single path and accepted
/// if that path ends in an accepting state. A missing transition rejects right away.
#[derive(Clone, Copy, Default, Hash, Eq, PartialEq)]
pub struct DFASemantics;

impl std::fmt::Debug for DFASemantics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DFA (reach true)")
    }
}

impl FiniteSemantics for DFASemantics {
    const KIND: Kind = Kind::Dfa;

    /// Ensures that no state has more than one successor for any symbol of the alphabet.
    fn validate(&self, automaton: &Automaton<Self>) -> Result<(), ConfigError> {
        for (_, state) in automaton.states() {
            for symbol in automaton.alphabet().universe() {
                if state.successors(symbol).len() > 1 {
                    return Err(ConfigError::NonDeterministicTransition {
                        state: state.name().to_string(),
                        symbol,
                    });
                }
            }
        }
        Ok(())
    }

    fn accepts(&self, automaton: &Automaton<Self>, word: &str) -> bool {
        automaton
            .run(word)
            .and_then(|run| run.last().copied())
            .is_some_and(|q| automaton.is_accepting(q))
    }
}

/// A deterministic finite automaton (DFA) is an automaton in which every state has at most
/// one outgoing transition per symbol. It accepts a finite word if reading it from the
/// initial state ends in an accepting state.
pub type DFA = Automaton<DFASemantics>;

impl DFA {
    /// Returns the successor of `state` on `symbol`, if there is one.
    pub fn step(&self, state: StateId, symbol: char) -> Option<StateId> {
        self.successors(state, symbol).first().copied()
    }

    /// Reads `word` from the initial state and returns the sequence of visited states,
    /// beginning with the initial state. Returns `None` as soon as the run gets stuck.
    pub fn run(&self, word: &str) -> Option<Vec<StateId>> {
        let mut current = self.initial();
        let mut visited = vec![current];
        for symbol in word.chars() {
            let Some(next) = self.step(current, symbol) else {
                trace!("stuck in {current:?} on {symbol:?}");
                return None;
            };
            trace!("{current:?} --{symbol}--> {next:?}");
            visited.push(next);
            current = next;
        }
        Some(visited)
    }
}
