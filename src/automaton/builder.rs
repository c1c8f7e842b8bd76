use tracing::{debug, trace, warn};

use crate::{alphabet::CharAlphabet, error::ConfigError, math::Map};

use super::{Automaton, FiniteSemantics, State, StateId};

/// Helper struct for the construction of an [`Automaton`] from the lines of a
/// [`crate::config::RawConfig`]. The build steps have to be run in order: first the
/// symbols, then the states and finally the transitions, as each step relies on what the
/// previous ones produced. Afterwards, [`AutomatonBuilder::into_automaton`] resolves the
/// initial state and hands the result to the semantics for validation.
///
/// Lines that consist only of whitespace are ignored in every step.
///
/// # Example
/// ```
/// use automata_sim::prelude::*;
///
/// let mut builder = AutomatonBuilder::default();
/// builder.build_symbols(["a"]);
/// builder.build_states(["q0, S, F"]).unwrap();
/// builder.build_transitions(["q0, a, q0"]).unwrap();
/// let dfa: DFA = builder.into_automaton().unwrap();
/// assert!(dfa.accepts("aaa"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct AutomatonBuilder {
    alphabet: CharAlphabet,
    states: Vec<State>,
    names: Map<String, StateId>,
    skipped: Vec<ConfigError>,
    claimed_initial: bool,
}

impl AutomatonBuilder {
    /// Adds the first character of every line to the alphabet, duplicates collapse.
    pub fn build_symbols<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            let line = line.as_ref();
            match line.chars().next() {
                Some(symbol) if !line.trim().is_empty() => {
                    if !self.alphabet.insert(symbol) {
                        trace!("symbol {symbol:?} was declared before");
                    }
                }
                _ => warn!("ignoring blank line in alphabet"),
            }
        }
        debug!("built alphabet {}", self.alphabet);
    }

    /// Declares one state per line. A line is a comma separated list of fields, `S` marks
    /// the state as initial and `F` marks it as accepting, any other field is taken as the
    /// name of the state (the last one wins if there are several).
    ///
    /// A line without a name is dropped and recorded as [`ConfigError::MissingStateName`],
    /// the remaining lines are still processed. Fails if a second line carries the `S`
    /// marker (whether or not the first one had a name), if a name is declared twice, or if
    /// no state is accepting at the end.
    pub fn build_states<I, S>(&mut self, lines: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            let line = line.as_ref();
            if line.trim().is_empty() {
                trace!("skipping blank state line");
                continue;
            }

            let (mut name, mut initial, mut accepting) = (None, false, false);
            for field in line.split(',').map(str::trim) {
                match field {
                    "" => {}
                    "S" => initial = true,
                    "F" => accepting = true,
                    other => name = Some(other),
                }
            }

            if initial {
                // a line claims the marker even if it is dropped for lacking a name
                if self.claimed_initial {
                    return Err(ConfigError::DuplicateInitialState { line: line.into() });
                }
                self.claimed_initial = true;
            }

            let Some(name) = name else {
                warn!("state must have a name, dropping \"{line}\"");
                self.skipped
                    .push(ConfigError::MissingStateName { line: line.into() });
                continue;
            };

            if self.names.contains_key(name) {
                return Err(ConfigError::DuplicateStateName {
                    name: name.into(),
                    line: line.into(),
                });
            }

            let id = StateId::new(self.states.len());
            trace!("declared state {name} as {id:?} (initial: {initial}, accepting: {accepting})");
            self.states.push(State::new(name.into(), initial, accepting));
            self.names.insert(name.into(), id);
        }

        if !self.states.iter().any(State::is_accepting) {
            return Err(ConfigError::NoFinalState);
        }
        debug!("built {} states", self.states.len());
        Ok(())
    }

    /// Adds one transition per line, each line has the form `from, symbol, to`. The symbol
    /// must be a single character of the alphabet and both states must have been declared.
    /// Declaring the same transition twice has no effect.
    pub fn build_transitions<I, S>(&mut self, lines: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut count = 0;
        for line in lines {
            let line = line.as_ref();
            if line.trim().is_empty() {
                trace!("skipping blank transition line");
                continue;
            }

            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            let [from, symbol, to] = fields[..] else {
                return Err(ConfigError::MalformedTransition { line: line.into() });
            };

            let mut chars = symbol.chars();
            let (Some(sym), None) = (chars.next(), chars.next()) else {
                return Err(ConfigError::InvalidSymbolLength {
                    symbol: symbol.into(),
                    line: line.into(),
                });
            };
            if !self.alphabet.contains(sym) {
                return Err(ConfigError::UnknownSymbol {
                    symbol: sym,
                    line: line.into(),
                });
            }

            let source = self.lookup(from, line)?;
            let target = self.lookup(to, line)?;

            let targets = self.states[source.index()]
                .transitions
                .entry(sym)
                .or_default();
            if targets.contains(&target) {
                trace!("transition \"{line}\" was declared before");
                continue;
            }
            trace!("adding transition {source:?} --{sym}--> {target:?}");
            targets.push(target);
            count += 1;
        }
        debug!("built {count} transitions");
        Ok(())
    }

    fn lookup(&self, name: &str, line: &str) -> Result<StateId, ConfigError> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| ConfigError::UndefinedState {
                name: name.into(),
                line: line.into(),
            })
    }

    /// Resolves the initial state, assembles the automaton and lets the semantics `S`
    /// validate it. Fails with [`ConfigError::NoStartState`] if no state was marked initial.
    pub fn into_automaton<S: FiniteSemantics>(self) -> Result<Automaton<S>, ConfigError> {
        let initial = self
            .states
            .iter()
            .position(State::is_initial)
            .map(StateId::new)
            .ok_or(ConfigError::NoStartState)?;

        let automaton = Automaton {
            alphabet: self.alphabet,
            states: self.states,
            names: self.names,
            initial,
            skipped: self.skipped,
            semantics: S::default(),
        };
        automaton.semantics.validate(&automaton)?;
        debug!(
            "built {} with {} states, initial state {:?}",
            S::KIND,
            automaton.size(),
            initial
        );
        Ok(automaton)
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    fn builder_with_states(states: &[&str]) -> AutomatonBuilder {
        let mut builder = AutomatonBuilder::default();
        builder.build_symbols(["a", "b"]);
        builder.build_states(states).unwrap();
        builder
    }

    #[test_log::test]
    fn symbols_take_the_first_character() {
        let mut builder = AutomatonBuilder::default();
        builder.build_symbols(["ab", "a", "   ", "", "c"]);
        builder.build_states(["q, S, F"]).unwrap();
        let nfa: NFA = builder.into_automaton().unwrap();
        assert_eq!(nfa.alphabet().universe().collect::<String>(), "ac");
    }

    #[test_log::test]
    fn state_markers_in_any_order() {
        let builder = builder_with_states(&["F , q0, S", " q1 ", "q2,F,", "a, b"]);
        let nfa: NFA = builder.into_automaton().unwrap();
        let q0 = nfa.state_by_name("q0").unwrap();
        assert_eq!(nfa.initial(), q0);
        assert!(nfa.is_accepting(q0));
        assert!(!nfa.is_accepting(nfa.state_by_name("q1").unwrap()));
        assert!(nfa.is_accepting(nfa.state_by_name("q2").unwrap()));
        assert!(nfa.state_by_name("b").is_some());
        assert!(nfa.state_by_name("a").is_none());
    }

    #[test_log::test]
    fn second_initial_state_is_rejected() {
        let mut builder = AutomatonBuilder::default();
        let err = builder
            .build_states(["q0, S", "q1, S, F"])
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::DuplicateInitialState {
                line: "q1, S, F".into()
            }
        );
    }

    #[test_log::test]
    fn nameless_line_still_claims_initial_marker() {
        let mut builder = AutomatonBuilder::default();
        assert_eq!(
            builder.build_states(["S", "q0, S, F"]),
            Err(ConfigError::DuplicateInitialState {
                line: "q0, S, F".into()
            })
        );
    }

    #[test_log::test]
    fn nameless_initial_line_leaves_no_start_state() {
        let mut builder = AutomatonBuilder::default();
        builder.build_states(["S", "q0, F"]).unwrap();
        assert_eq!(
            builder.into_automaton::<DFASemantics>().unwrap_err(),
            ConfigError::NoStartState
        );
    }

    #[test_log::test]
    fn nameless_states_are_skipped() {
        let mut builder = AutomatonBuilder::default();
        builder.build_states(["q0, S", "F", "q1, F"]).unwrap();
        let dfa: DFA = builder.into_automaton().unwrap();
        assert_eq!(dfa.size(), 2);
        assert_eq!(
            dfa.skipped(),
            [ConfigError::MissingStateName { line: "F".into() }]
        );
    }

    #[test_log::test]
    fn nameless_final_state_does_not_count() {
        let mut builder = AutomatonBuilder::default();
        let err = builder.build_states(["q0, S", ", F"]).unwrap_err();
        assert_eq!(err, ConfigError::NoFinalState);
    }

    #[test_log::test]
    fn at_least_one_final_state() {
        let mut builder = AutomatonBuilder::default();
        assert_eq!(
            builder.build_states(["q0, S", "q1", "q2"]),
            Err(ConfigError::NoFinalState)
        );
        let mut builder = AutomatonBuilder::default();
        assert_eq!(
            builder.build_states(Vec::<String>::new()),
            Err(ConfigError::NoFinalState)
        );
    }

    #[test_log::test]
    fn duplicate_names_are_rejected() {
        let mut builder = AutomatonBuilder::default();
        assert!(matches!(
            builder.build_states(["q0, S", "q0, F"]),
            Err(ConfigError::DuplicateStateName { name, .. }) if name == "q0"
        ));
    }

    #[test_log::test]
    fn transition_errors() {
        let cases = [
            ("q0, ab, q1", "InvalidSymbolLength"),
            ("q0, , q1", "InvalidSymbolLength"),
            ("q0, a", "MalformedTransition"),
            ("q0, a, q1, q2", "MalformedTransition"),
            ("q0, c, q1", "UnknownSymbol"),
            ("q5, a, q1", "UndefinedState"),
            ("q0, a, q5", "UndefinedState"),
        ];
        for (line, expected) in cases {
            let mut builder = builder_with_states(&["q0, S", "q1, F"]);
            let err = builder.build_transitions([line]).unwrap_err();
            assert_eq!(err.line(), Some(line));
            let matched = match err {
                ConfigError::InvalidSymbolLength { .. } => "InvalidSymbolLength",
                ConfigError::MalformedTransition { .. } => "MalformedTransition",
                ConfigError::UnknownSymbol { .. } => "UnknownSymbol",
                ConfigError::UndefinedState { .. } => "UndefinedState",
                _ => "other",
            };
            assert_eq!(matched, expected, "unexpected error for \"{line}\"");
        }
    }

    #[test_log::test]
    fn symbols_are_counted_in_chars() {
        let mut builder = AutomatonBuilder::default();
        builder.build_symbols(["é", "ß"]);
        builder.build_states(["q0, S", "q1, F"]).unwrap();
        builder.build_transitions(["q0, é, q1", "q1, ß, q0"]).unwrap();
        let dfa: DFA = builder.into_automaton().unwrap();
        assert!(dfa.accepts("é"));
        assert!(dfa.accepts("éßé"));
        assert!(!dfa.accepts("e"));

        let mut builder = builder_with_states(&["q0, S", "q1, F"]);
        let combined = "q0, e\u{301}, q1";
        assert_eq!(
            builder.build_transitions([combined]),
            Err(ConfigError::InvalidSymbolLength {
                symbol: "e\u{301}".into(),
                line: combined.into()
            })
        );
    }

    #[test_log::test]
    fn undefined_state_names_the_state() {
        let mut builder = builder_with_states(&["q0, S", "q1, F"]);
        assert_eq!(
            builder.build_transitions(["q0,a,q9"]),
            Err(ConfigError::UndefinedState {
                name: "q9".into(),
                line: "q0,a,q9".into()
            })
        );
    }

    #[test_log::test]
    fn repeated_transitions_collapse() {
        let mut builder = builder_with_states(&["q0, S", "q1, F"]);
        builder
            .build_transitions(["q0, a, q1", "", " q0 , a , q1 "])
            .unwrap();
        let dfa: DFA = builder.into_automaton().unwrap();
        assert_eq!(dfa.transition_count(), 1);
    }

    #[test_log::test]
    fn missing_initial_state_is_an_error() {
        let builder = builder_with_states(&["q0", "q1, F"]);
        let err = builder.into_automaton::<NFASemantics>().unwrap_err();
        assert_eq!(err, ConfigError::NoStartState);
    }
}
