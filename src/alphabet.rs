use itertools::Itertools;

/// Represents an alphabet where a symbol is just a single `char`.
///
/// Symbols are kept in the order in which they were first inserted, inserting a symbol
/// that is already present has no effect.
///
/// # Example
/// ```
/// use automata_sim::prelude::*;
///
/// let alphabet: CharAlphabet = "abca".chars().collect();
/// assert_eq!(alphabet.size(), 3);
/// assert!(alphabet.contains('c'));
/// assert!(!alphabet.contains('d'));
/// ```
#[derive(Clone, Hash, PartialEq, Eq, Debug, Default)]
pub struct CharAlphabet(Vec<char>);

impl CharAlphabet {
    /// Creates a new, empty alphabet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `symbol` to the alphabet. Returns `false` if it was already present.
    pub fn insert(&mut self, symbol: char) -> bool {
        if self.contains(symbol) {
            return false;
        }
        self.0.push(symbol);
        true
    }

    /// Returns `true` if `symbol` belongs to the alphabet.
    pub fn contains(&self, symbol: char) -> bool {
        self.0.contains(&symbol)
    }

    /// The number of distinct symbols.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no symbol was added yet.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over all symbols in insertion order.
    pub fn universe(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().copied()
    }
}

impl std::ops::Index<usize> for CharAlphabet {
    type Output = char;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl FromIterator<char> for CharAlphabet {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> Self {
        let mut alphabet = Self::new();
        for symbol in iter {
            alphabet.insert(symbol);
        }
        alphabet
    }
}

impl std::fmt::Display for CharAlphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.0.iter().join(", "))
    }
}
