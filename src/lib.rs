//! Library for simulating finite automata that are described in a small text format.
//!
//! A configuration lists the symbols of the alphabet, the states and the transitions of an
//! automaton in three blocks, see the [`config`] module for the format. Reading a
//! configuration happens in two stages: first [`config::RawConfig`] sorts the lines of the text
//! into their blocks, then [`automaton::AutomatonBuilder`] interprets the lines and assembles
//! an [`Automaton`]. Anything that is wrong with the configuration is reported as a
//! [`ConfigError`].
//!
//! All automata share one representation, in which every state is owned by the automaton and
//! transitions refer to their targets by [`automaton::StateId`]. What kind of automaton it is,
//! is determined by its [`automaton::FiniteSemantics`]:
//! - a [`DFA`] reads a word along a single path and refuses to be built if some state has two
//!   transitions on the same symbol,
//! - an [`NFA`] tracks the set of all states that some run can be in and accepts if any of them
//!   is accepting once the word is consumed.
//!
//! Once built, an automaton never changes, so it can be used from many threads at once. The
//! [`driver`] module makes use of this to test a list of words against a whole directory of
//! configurations.
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use automata_sim::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        alphabet::CharAlphabet,
        automaton::{
            Automaton, AutomatonBuilder, DFASemantics, FiniteSemantics, Kind, NFASemantics, State,
            StateId, DFA, NFA,
        },
        config::{RawConfig, Section},
        driver::{Batch, BatchConfig, FileReport, Report, Verdict},
        error::ConfigError,
        math,
        math::StateSet,
        words::WordList,
    };
}

/// This module contains the collection types which are used throughout the crate.
pub mod math;

/// Module that contains the definition of alphabets.
pub mod alphabet;

pub mod config;

/// Errors that occur while reading configurations and word lists.
pub mod error;
pub use error::ConfigError;

/// Defines automata and the semantics that decide which words they accept.
#[allow(clippy::upper_case_acronyms)]
pub mod automaton;
pub use automaton::{Automaton, DFA, NFA};

/// Loading of the words that are tested against automata.
pub mod words;

pub mod driver;
