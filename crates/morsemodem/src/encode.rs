//! Text → Morse unit encoding.

use crate::{error::FramingError, separator::Separator, table::SymbolTable};

/// Rough pattern length used to pre-size the output buffer.
const AVERAGE_PATTERN_LEN: usize = 4;

/// Encodes one separator-delimited text unit into Morse code.
#[derive(Debug, Clone, Copy)]
pub struct Encoder<'a> {
    table: &'a SymbolTable,
}

impl<'a> Encoder<'a> {
    /// Borrows `table` for the encoder's lifetime.
    #[must_use]
    pub fn new(table: &'a SymbolTable) -> Self {
        Self { table }
    }

    /// Encodes `unit`, one text segment with no line separator in it.
    ///
    /// Characters are looked up by their uppercase form; a character
    /// absent from the table is copied through unchanged. Runs of word
    /// separators collapse to a single Morse word separator, leading and
    /// trailing separator whitespace is trimmed, and exactly one
    /// character separator lands between consecutive tokens.
    ///
    /// # Errors
    ///
    /// [`FramingError`] if the unit still contains the text line
    /// separator, which the segmentation stage must already have consumed.
    pub fn encode_unit(&self, unit: &str) -> Result<String, FramingError> {
        let line = Separator::Line.as_text();
        if unit.contains(line) {
            return Err(FramingError { separator: line });
        }

        let mut out = String::with_capacity(unit.len() * AVERAGE_PATTERN_LEN);
        // A separator is owed before the next token; word outranks character.
        let mut owes_separator = false;
        let mut owes_word_separator = false;

        for ch in unit.chars() {
            if ch == ' ' {
                // Deferred until a following token exists, so runs collapse
                // and leading/trailing whitespace emits nothing.
                if owes_separator {
                    owes_word_separator = true;
                }
                continue;
            }
            if owes_separator {
                out.push_str(if owes_word_separator {
                    Separator::Word.as_morse()
                } else {
                    Separator::Character.as_morse()
                });
            }
            match self.table.to_morse(uppercase_key(ch)) {
                Some(pattern) => out.push_str(pattern),
                None => out.push(ch),
            }
            owes_separator = true;
            owes_word_separator = false;
        }

        Ok(out)
    }
}

/// Single-character uppercase lookup key.
///
/// When uppercasing expands a character (e.g. 'ß' → "SS") the table can
/// never contain the result, so the original character is used and falls
/// through as unmapped.
fn uppercase_key(ch: char) -> char {
    let mut upper = ch.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(key), None) => key,
        _ => ch,
    }
}
