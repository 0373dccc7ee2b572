//! The bidirectional character ↔ Morse symbol table.
//!
//! Built once from a declarative JSON document with four named groupings
//! (letters, accented letters, digits, punctuation), each mapping one
//! uppercase character to one Morse pattern. Both lookup directions are
//! built eagerly at construction and immutable thereafter, so a table can
//! be shared across calls without re-entrancy concerns.

use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::Path,
};

use serde::Deserialize;

use crate::error::MappingError;

/// The default mapping shipped with the crate.
const BUILTIN_MAPPING: &str = include_str!("../assets/symbol2morse.json");

/// The on-disk JSON model of a symbol-table document.
///
/// All four groupings must be present; a truncated document is a parse
/// error, not an empty table. Note the word-separator token `/` must not
/// appear as a pattern, or encoded output becomes ambiguous on the wire.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MappingDocument {
    letters: BTreeMap<char, String>,
    accented_letters: BTreeMap<char, String>,
    digits: BTreeMap<char, String>,
    punctuations: BTreeMap<char, String>,
}

impl MappingDocument {
    /// All entries in fixed grouping order, keys sorted within a grouping.
    fn entries(&self) -> impl Iterator<Item = (char, &str)> {
        self.letters
            .iter()
            .chain(&self.accented_letters)
            .chain(&self.digits)
            .chain(&self.punctuations)
            .map(|(&symbol, pattern)| (symbol, pattern.as_str()))
    }
}

/// Eagerly built forward and reverse lookup tables.
///
/// A character or pattern with no entry is simply unmapped; lookups return
/// `None` and the caller passes the symbol through unchanged.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    forward: HashMap<char, String>,
    reverse: HashMap<String, char>,
}

impl SymbolTable {
    /// Builds both directions from a parsed document.
    ///
    /// If two symbols share a pattern, the later entry in grouping order
    /// wins the reverse slot; the iteration order is deterministic, so the
    /// resolution is too.
    #[must_use]
    pub fn from_document(document: &MappingDocument) -> Self {
        let mut forward = HashMap::new();
        let mut reverse = HashMap::new();
        for (symbol, pattern) in document.entries() {
            forward.insert(symbol, pattern.to_owned());
            reverse.insert(pattern.to_owned(), symbol);
        }
        Self { forward, reverse }
    }

    /// Loads and parses the document at `path`.
    ///
    /// # Errors
    ///
    /// [`MappingError`] when the file is missing, unreadable, or not a
    /// valid mapping document, carrying the path and the underlying cause.
    pub fn from_path(path: &Path) -> Result<Self, MappingError> {
        let contents = fs::read_to_string(path).map_err(|source| MappingError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let document = serde_json::from_str(&contents).map_err(|source| MappingError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_document(&document))
    }

    /// The table embedded in the crate.
    #[must_use]
    pub fn builtin() -> Self {
        let document =
            serde_json::from_str(BUILTIN_MAPPING).expect("embedded mapping document is valid");
        Self::from_document(&document)
    }

    /// The Morse pattern for `symbol`, if mapped.
    #[must_use]
    pub fn to_morse(&self, symbol: char) -> Option<&str> {
        self.forward.get(&symbol).map(String::as_str)
    }

    /// The character for `pattern`, if mapped.
    #[must_use]
    pub fn to_symbol(&self, pattern: &str) -> Option<char> {
        self.reverse.get(pattern).copied()
    }

    /// Number of mapped characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Whether the table maps nothing at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}
