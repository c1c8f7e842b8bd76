//! This module defines the _semantics_ that the [`Automaton`] struct uses for deciding
//! whether a finite word is accepted.
//!
//! All automata share the same representation, a collection of named states whose
//! transitions may lead to any number of successors. What differs is how a word is read:
//! the [`super::DFASemantics`] follow a single path and insist on at most one successor per
//! state and symbol, while the [`super::NFASemantics`] track the set of all states that can
//! be reached. Each semantic also gets to reject a freshly built automaton, which is how the
//! determinism of a [`super::DFA`] is enforced.

use crate::error::ConfigError;

use super::Automaton;

/// The kinds of automata that can be built from a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Kind {
    /// A deterministic finite automaton, see [`super::DFA`].
    #[default]
    Dfa,
    /// A nondeterministic finite automaton, see [`super::NFA`].
    Nfa,
}

impl Kind {
    /// The lowercase name, as used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Kind::Dfa => "dfa",
            Kind::Nfa => "nfa",
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dfa" => Ok(Kind::Dfa),
            "nfa" => Ok(Kind::Nfa),
            other => Err(format!("unknown automaton kind `{other}`")),
        }
    }
}

/// This trait is implemented by acceptance conditions for finite words.
/// See the module level documentation for details.
pub trait FiniteSemantics: Default + Sized {
    /// The kind of automaton that these semantics give rise to.
    const KIND: Kind;

    /// Checks an automaton right after it was built. The default accepts everything.
    fn validate(&self, _automaton: &Automaton<Self>) -> Result<(), ConfigError> {
        Ok(())
    }

    /// Decides whether `word` is accepted by `automaton`.
    fn accepts(&self, automaton: &Automaton<Self>, word: &str) -> bool;
}
