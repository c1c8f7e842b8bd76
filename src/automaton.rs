use std::path::Path;

use itertools::Itertools;

use crate::{alphabet::CharAlphabet, config::RawConfig, error::ConfigError, math::Map};

mod builder;
pub use builder::AutomatonBuilder;

mod dfa;
pub use dfa::{DFASemantics, DFA};

mod nfa;
pub use nfa::{NFASemantics, NFA};

/// Semantics that decide how an [`Automaton`] reads a word.
pub mod semantics;
pub use semantics::{FiniteSemantics, Kind};

/// Identifies a state within the [`Automaton`] that owns it. Ids are handed out in the order
/// in which states are declared, starting from zero.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(usize);

impl StateId {
    /// Wraps the given index.
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// The position of the state in its automaton.
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Debug for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// A single state of an [`Automaton`]. Transitions are stored with their source state and
/// point to their targets through [`StateId`]s, the states themselves are owned by the
/// automaton.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    pub(crate) name: String,
    pub(crate) initial: bool,
    pub(crate) accepting: bool,
    pub(crate) transitions: Map<char, Vec<StateId>>,
}

impl State {
    pub(crate) fn new(name: String, initial: bool, accepting: bool) -> Self {
        Self {
            name,
            initial,
            accepting,
            transitions: Map::default(),
        }
    }

    /// The name under which the state was declared.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the state carries the `S` marker.
    pub fn is_initial(&self) -> bool {
        self.initial
    }

    /// Whether the state carries the `F` marker.
    pub fn is_accepting(&self) -> bool {
        self.accepting
    }

    /// All states reachable from this one by reading `symbol`, in the order the
    /// transitions were declared.
    pub fn successors(&self, symbol: char) -> &[StateId] {
        self.transitions
            .get(&symbol)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Iterates over all outgoing transitions as pairs of symbol and target, sorted by symbol.
    pub fn transitions(&self) -> impl Iterator<Item = (char, StateId)> + '_ {
        self.transitions
            .iter()
            .sorted_by_key(|(symbol, _)| **symbol)
            .flat_map(|(symbol, targets)| targets.iter().map(move |target| (*symbol, *target)))
    }
}

/// An automaton over finite words. It consists of an alphabet, the states it owns and a
/// designated initial state. How a word is read is decided by the semantics `S`.
///
/// Automata are built once from a configuration and never change afterwards, all methods
/// take `&self` and an automaton can be shared freely between threads.
///
/// # Example
/// ```
/// use automata_sim::prelude::*;
///
/// let dfa = DFA::from_str(
///     "Sigma\n0\n1\nEnd\nStates\nq0, S\nq1, F\nEnd\nTransitions\nq0, 1, q1\nEnd",
/// ).unwrap();
/// assert!(dfa.accepts("1"));
/// assert!(!dfa.accepts("11"));
/// ```
#[derive(Clone, Debug)]
pub struct Automaton<S> {
    pub(crate) alphabet: CharAlphabet,
    pub(crate) states: Vec<State>,
    pub(crate) names: Map<String, StateId>,
    pub(crate) initial: StateId,
    pub(crate) skipped: Vec<ConfigError>,
    pub(crate) semantics: S,
}

impl<S: FiniteSemantics> Automaton<S> {
    /// Builds an automaton from an already sectioned configuration.
    pub fn from_config(config: &RawConfig) -> Result<Self, ConfigError> {
        let mut builder = AutomatonBuilder::default();
        builder.build_symbols(config.alphabet());
        builder.build_states(config.states())?;
        builder.build_transitions(config.transitions())?;
        builder.into_automaton()
    }

    /// Builds an automaton from the text of a configuration.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &str) -> Result<Self, ConfigError> {
        Self::from_config(&RawConfig::from_str(input))
    }

    /// Reads the configuration file at `path` and builds an automaton from it.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::from_config(&RawConfig::from_path(path)?)
    }

    /// Decides whether `word` is accepted, every `char` of the word is read as one symbol.
    pub fn accepts(&self, word: &str) -> bool {
        self.semantics.accepts(self, word)
    }

    /// The kind of automaton, as determined by its semantics.
    pub fn kind(&self) -> Kind {
        S::KIND
    }
}

impl<S> Automaton<S> {
    /// The symbols declared in the `Sigma` section.
    pub fn alphabet(&self) -> &CharAlphabet {
        &self.alphabet
    }

    /// The number of states.
    pub fn size(&self) -> usize {
        self.states.len()
    }

    /// The number of transitions, counting each target separately.
    pub fn transition_count(&self) -> usize {
        self.states
            .iter()
            .map(|q| q.transitions.values().map(Vec::len).sum::<usize>())
            .sum()
    }

    /// The state in which every run starts.
    pub fn initial(&self) -> StateId {
        self.initial
    }

    /// Returns the state with the given id, if it belongs to this automaton.
    pub fn state(&self, id: StateId) -> Option<&State> {
        self.states.get(id.index())
    }

    /// Looks up a state by the name it was declared with.
    pub fn state_by_name(&self, name: &str) -> Option<StateId> {
        self.names.get(name).copied()
    }

    /// Iterates over all states together with their ids, in declaration order.
    pub fn states(&self) -> impl Iterator<Item = (StateId, &State)> + '_ {
        self.states
            .iter()
            .enumerate()
            .map(|(i, q)| (StateId::new(i), q))
    }

    /// Whether the given state is accepting. Unknown ids are treated as rejecting.
    pub fn is_accepting(&self, id: StateId) -> bool {
        self.state(id).map(State::is_accepting).unwrap_or(false)
    }

    /// All states reachable from `id` on `symbol`.
    pub fn successors(&self, id: StateId, symbol: char) -> &[StateId] {
        self.state(id)
            .map(|q| q.successors(symbol))
            .unwrap_or_default()
    }

    /// The state declarations that were dropped because they had no name, each as a
    /// [`ConfigError::MissingStateName`].
    pub fn skipped(&self) -> &[ConfigError] {
        &self.skipped
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    const SAMPLE: &str = "Sigma\na\nb\nEnd\nStates\nq0, S\nq1\nq2, F\nEnd\n\
        Transitions\nq0, a, q1\nq0, a, q2\nq1, b, q2\nEnd\n";

    #[test_log::test]
    fn accessors() {
        let nfa = NFA::from_str(SAMPLE).unwrap();
        assert_eq!(nfa.size(), 3);
        assert_eq!(nfa.transition_count(), 3);
        assert_eq!(nfa.kind(), Kind::Nfa);
        assert_eq!(nfa.alphabet().size(), 2);

        let q0 = nfa.state_by_name("q0").unwrap();
        let q2 = nfa.state_by_name("q2").unwrap();
        assert_eq!(nfa.initial(), q0);
        assert!(nfa.is_accepting(q2));
        assert!(!nfa.is_accepting(q0));
        assert_eq!(nfa.successors(q0, 'a').len(), 2);
        assert!(nfa.successors(q0, 'b').is_empty());
        assert!(nfa.state_by_name("q3").is_none());

        let state = nfa.state(q0).unwrap();
        assert_eq!(state.name(), "q0");
        assert!(state.is_initial());
        assert_eq!(
            state.transitions().collect::<Vec<_>>(),
            vec![('a', StateId::new(1)), ('a', q2)]
        );
        assert_eq!(
            nfa.states().map(|(_, q)| q.name()).collect::<Vec<_>>(),
            vec!["q0", "q1", "q2"]
        );
    }

    #[test]
    fn automata_can_be_shared_between_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DFA>();
        assert_send_sync::<NFA>();
    }
}
