use std::{
    io::{BufRead, BufReader},
    path::Path,
};

use tracing::debug;

use crate::error::ConfigError;

/// A list of words to test against automata, read one word per line. An empty line stands
/// for the empty word.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList(Vec<String>);

impl WordList {
    /// Creates a word list from the given words.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(words.into_iter().map(Into::into).collect())
    }

    /// Reads one word per line from `read`, both `\n` and `\r\n` end a line.
    pub fn from_read<R: BufRead>(read: R, origin: &Path) -> Result<Self, ConfigError> {
        let mut words = Vec::new();
        for line in read.lines() {
            words.push(line.map_err(|err| ConfigError::io(origin, err))?);
        }
        debug!("read {} words from {}", words.len(), origin.display());
        Ok(Self(words))
    }

    /// Reads the word list stored at `path`. Fails with [`ConfigError::ConfigNotFound`] if
    /// the file cannot be opened.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|err| ConfigError::not_found(path, err))?;
        Self::from_read(BufReader::new(file), path)
    }

    /// The number of words.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the list holds no words, not even the empty one.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the words in the order they were read.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(String::as_str)
    }

    /// The words as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a WordList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test_log::test]
    fn empty_lines_are_empty_words() {
        let words = WordList::from_read("ab\n\nb\r\n".as_bytes(), Path::new("<memory>")).unwrap();
        assert_eq!(words.iter().collect::<Vec<_>>(), vec!["ab", "", "b"]);
        assert_eq!(words.len(), 3);
    }

    #[test_log::test]
    fn missing_word_list() {
        assert!(matches!(
            WordList::from_path("no/such/words.in"),
            Err(ConfigError::ConfigNotFound { .. })
        ));
    }
}
