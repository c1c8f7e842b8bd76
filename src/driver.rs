//! Runs a list of words against every configuration found in a directory.
//!
//! This is a thin layer on top of the automata: it finds the configuration files, builds
//! one automaton per file and records for every word whether it is accepted. A
//! configuration that fails to build is recorded as such and does not stop the remaining
//! files from being processed.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use owo_colors::OwoColorize;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::{
    automaton::{Automaton, DFASemantics, FiniteSemantics, Kind, NFASemantics},
    error::ConfigError,
    words::WordList,
};

/// Describes a batch run: which kind of automaton to build, where to find the
/// configurations and where to find the words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// The kind of automaton every configuration is built as.
    pub kind: Kind,
    /// Directory whose regular files are the configurations.
    pub config_dir: PathBuf,
    /// File with one word per line.
    pub words: PathBuf,
}

/// Whether a single word was accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// The word that was read.
    pub word: String,
    /// `true` if the automaton accepts `word`.
    pub accepted: bool,
}

/// The outcome for one configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// Path of the configuration.
    pub path: PathBuf,
    /// One verdict per word, or the reason why no automaton could be built.
    pub outcome: Result<Vec<Verdict>, ConfigError>,
}

/// The outcome of a whole batch run, one [`FileReport`] per configuration in the order the
/// configurations were processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// The kind of automaton that was built.
    pub kind: Kind,
    /// The per file outcomes.
    pub files: Vec<FileReport>,
}

impl Report {
    /// Iterates over all configurations that could not be built.
    pub fn failures(&self) -> impl Iterator<Item = (&Path, &ConfigError)> + '_ {
        self.files
            .iter()
            .filter_map(|file| file.outcome.as_ref().err().map(|err| (file.path.as_path(), err)))
    }

    /// Writes a human readable rendition of the report, optionally highlighting verdicts
    /// and errors with terminal colors.
    pub fn write_to<W: Write>(&self, mut out: W, colored: bool) -> std::io::Result<()> {
        for file in &self.files {
            writeln!(out)?;
            writeln!(out, "Configuration: {}", file.path.display())?;
            match &file.outcome {
                Ok(verdicts) => {
                    for verdict in verdicts {
                        let text = if verdict.accepted {
                            "Accepted!"
                        } else {
                            "Rejected!"
                        };
                        if !colored {
                            writeln!(out, "Word: {}: {text}", verdict.word)?;
                        } else if verdict.accepted {
                            writeln!(out, "Word: {}: {}", verdict.word, text.green())?;
                        } else {
                            writeln!(out, "Word: {}: {}", verdict.word, text.red())?;
                        }
                    }
                }
                Err(err) => {
                    if colored {
                        writeln!(out, "{} {err}", "Configuration error:".red().bold())?;
                    } else {
                        writeln!(out, "Configuration error: {err}")?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// A prepared batch run with the words loaded and the configuration files listed.
#[derive(Debug, Clone)]
pub struct Batch {
    kind: Kind,
    configs: Vec<PathBuf>,
    words: WordList,
}

impl Batch {
    /// Loads the words and lists the regular files of the configuration directory, sorted by
    /// path. Fails with [`ConfigError::ConfigNotFound`] if either cannot be opened.
    pub fn new(config: BatchConfig) -> Result<Self, ConfigError> {
        let words = WordList::from_path(&config.words)?;
        let configs = list_configs(&config.config_dir)?;
        info!(
            "found {} configurations in {}",
            configs.len(),
            config.config_dir.display()
        );
        Ok(Self::from_parts(config.kind, configs, words))
    }

    /// Creates a batch from explicitly given configuration files and words.
    pub fn from_parts(kind: Kind, configs: Vec<PathBuf>, words: WordList) -> Self {
        Self {
            kind,
            configs,
            words,
        }
    }

    /// The configuration files that will be processed.
    pub fn configs(&self) -> &[PathBuf] {
        &self.configs
    }

    /// Builds an automaton for every configuration and evaluates all words with it.
    pub fn run(&self) -> Report {
        let files = self
            .configs
            .iter()
            .map(|path| FileReport {
                path: path.clone(),
                outcome: match self.kind {
                    Kind::Dfa => evaluate::<DFASemantics>(path, &self.words),
                    Kind::Nfa => evaluate::<NFASemantics>(path, &self.words),
                },
            })
            .collect();
        Report {
            kind: self.kind,
            files,
        }
    }
}

fn list_configs(dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let entries = std::fs::read_dir(dir).map_err(|err| ConfigError::not_found(dir, err))?;
    let mut configs = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("could not read entry of {}: {err}", dir.display());
                continue;
            }
        };
        // follows symlinks, a link to a configuration file counts as one
        let path = entry.path();
        if path.is_file() {
            configs.push(path);
        } else {
            debug!("skipping {}, not a file", path.display());
        }
    }
    configs.sort();
    Ok(configs)
}

fn evaluate<S>(path: &Path, words: &WordList) -> Result<Vec<Verdict>, ConfigError>
where
    S: FiniteSemantics + Sync,
{
    let automaton = Automaton::<S>::from_path(path).inspect_err(|err| {
        warn!("configuration {} is unusable: {err}", path.display());
    })?;
    for skipped in automaton.skipped() {
        warn!("{}: {skipped}", path.display());
    }
    debug!(
        "evaluating {} words on {} from {}",
        words.len(),
        S::KIND,
        path.display()
    );
    Ok(words
        .as_slice()
        .par_iter()
        .map(|word| Verdict {
            word: word.clone(),
            accepted: automaton.accepts(word),
        })
        .collect())
}
