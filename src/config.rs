//! Splits the text of an automaton configuration into its three sections.
//!
//! A configuration consists of blocks that are opened by a line containing one of the
//! markers `Sigma`, `States` or `Transitions` and closed by a line containing `End`.
//! Markers are found by substring search, so `States of the automaton` opens the
//! states block just as well. This also holds for comments: a line starting with `#` is
//! dropped, but if it contains a marker it switches the block first. Lines outside of any
//! block are dropped silently.
//!
//! ```text
//! Sigma
//! 0
//! 1
//! End
//! States
//! q0, S
//! q1, F
//! End
//! Transitions
//! q0, 1, q1
//! End
//! ```

use std::{
    io::{BufRead, BufReader},
    path::Path,
};

use tracing::{debug, trace};

use crate::error::ConfigError;

/// The block of a configuration that is currently being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    /// Outside of any block, lines are dropped.
    #[default]
    None,
    /// Inside a `Sigma` block.
    Alphabet,
    /// Inside a `States` block.
    States,
    /// Inside a `Transitions` block.
    Transitions,
}

impl Section {
    /// Returns the section that `line` switches to, if it contains a marker.
    pub fn switched_by(line: &str) -> Option<Section> {
        if line.contains("Sigma") {
            Some(Section::Alphabet)
        } else if line.contains("States") {
            Some(Section::States)
        } else if line.contains("Transitions") {
            Some(Section::Transitions)
        } else if line.contains("End") {
            Some(Section::None)
        } else {
            None
        }
    }
}

/// The raw lines of a configuration, sorted into the sections they appeared in. Lines are
/// stored verbatim, interpreting them is up to [`crate::automaton::AutomatonBuilder`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawConfig {
    alphabet: Vec<String>,
    states: Vec<String>,
    transitions: Vec<String>,
}

impl RawConfig {
    /// Creates a configuration from already separated lines.
    pub fn new(alphabet: Vec<String>, states: Vec<String>, transitions: Vec<String>) -> Self {
        Self {
            alphabet,
            states,
            transitions,
        }
    }

    /// Lines of all `Sigma` blocks.
    pub fn alphabet(&self) -> &[String] {
        &self.alphabet
    }

    /// Lines of all `States` blocks.
    pub fn states(&self) -> &[String] {
        &self.states
    }

    /// Lines of all `Transitions` blocks.
    pub fn transitions(&self) -> &[String] {
        &self.transitions
    }

    /// Sorts the given lines into sections. A block may be opened several times, its lines
    /// accumulate in the order they are encountered.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Self::default();
        let mut section = Section::None;

        for line in lines {
            let line = line.as_ref();
            if let Some(next) = Section::switched_by(line) {
                trace!("switching from {section:?} to {next:?}");
                section = next;
                continue;
            }
            if line.starts_with('#') {
                trace!("skipping comment \"{line}\"");
                continue;
            }
            let target = match section {
                Section::None => {
                    trace!("dropping line \"{line}\" outside of any section");
                    continue;
                }
                Section::Alphabet => &mut config.alphabet,
                Section::States => &mut config.states,
                Section::Transitions => &mut config.transitions,
            };
            target.push(line.to_string());
        }

        debug!(
            "read configuration with {} alphabet, {} state and {} transition lines",
            config.alphabet.len(),
            config.states.len(),
            config.transitions.len()
        );
        config
    }

    /// Parses a configuration held in memory.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &str) -> Self {
        Self::from_lines(input.lines())
    }

    /// Reads a configuration from the given reader. The `origin` is only used to describe
    /// the source in case reading fails.
    pub fn from_read<R: BufRead>(read: R, origin: &Path) -> Result<Self, ConfigError> {
        let lines = read
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| ConfigError::io(origin, err))?;
        Ok(Self::from_lines(lines))
    }

    /// Opens the file at `path` and reads a configuration from it. Fails with
    /// [`ConfigError::ConfigNotFound`] if the file cannot be opened.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("reading configuration from {}", path.display());
        let file = std::fs::File::open(path).map_err(|err| ConfigError::not_found(path, err))?;
        Self::from_read(BufReader::new(file), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test_log::test]
    fn sections_are_separated() {
        let config = RawConfig::from_str(
            "Sigma\n0\n1\nEnd\nStates\nq0, S\nq1, F\nEnd\nTransitions\nq0, 1, q1\nEnd\n",
        );
        assert_eq!(config.alphabet(), ["0", "1"]);
        assert_eq!(config.states(), ["q0, S", "q1, F"]);
        assert_eq!(config.transitions(), ["q0, 1, q1"]);
    }

    #[test_log::test]
    fn comments_and_stray_lines_are_dropped() {
        let config = RawConfig::from_str(
            "# an automaton\nstray line\nSigma\n# a comment\na\nEnd\nafter end\n",
        );
        assert_eq!(config.alphabet(), ["a"]);
        assert!(config.states().is_empty());
        assert!(config.transitions().is_empty());
    }

    #[test_log::test]
    fn markers_inside_comments_still_switch() {
        let config = RawConfig::from_str("Sigma\na\n# End of the alphabet\nb\nEnd\n");
        assert_eq!(config.alphabet(), ["a"]);

        let config = RawConfig::from_str("# States\nq0, S\nEnd\n");
        assert_eq!(config.states(), ["q0, S"]);
    }

    #[test_log::test]
    fn markers_match_by_substring_and_blocks_accumulate() {
        let config = RawConfig::from_str(
            "States of the automaton\nq0, S\nEnd states\nSigma:\na\nStates\n  q1 , F\nEnd",
        );
        assert_eq!(config.alphabet(), ["a"]);
        assert_eq!(config.states(), ["q0, S", "  q1 , F"]);
    }

    #[test_log::test]
    fn blocks_need_no_end_marker() {
        let config = RawConfig::from_str("Sigma\na\nTransitions\nq0, a, q0");
        assert_eq!(config.alphabet(), ["a"]);
        assert_eq!(config.transitions(), ["q0, a, q0"]);
    }

    #[test_log::test]
    fn missing_file_is_reported() {
        let err = RawConfig::from_path("this/path/does/not/exist.txt").unwrap_err();
        assert!(matches!(err, ConfigError::ConfigNotFound { .. }));
    }

    #[test]
    fn section_switches() {
        assert_eq!(Section::switched_by("Sigma"), Some(Section::Alphabet));
        assert_eq!(Section::switched_by("End"), Some(Section::None));
        assert_eq!(Section::switched_by("Transitions:"), Some(Section::Transitions));
        assert_eq!(Section::switched_by("q0, a, q1"), None);
    }
}
