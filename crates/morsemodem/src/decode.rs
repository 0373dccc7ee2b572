//! Morse → text unit decoding.

use crate::{error::FramingError, separator::Separator, table::SymbolTable};

/// Decodes one separator-delimited Morse unit into text.
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'a> {
    table: &'a SymbolTable,
}

impl<'a> Decoder<'a> {
    /// Borrows `table` for the decoder's lifetime.
    #[must_use]
    pub fn new(table: &'a SymbolTable) -> Self {
        Self { table }
    }

    /// Decodes `unit`, one Morse segment with no line separator in it.
    ///
    /// Tokens are split on the character separator; empty tokens (an
    /// artifact of consecutive separators) are skipped, a reverse-table
    /// miss copies the raw token through unchanged. Characters within a
    /// word concatenate directly; words join with a single space, and a
    /// word that decodes to nothing is skipped so it cannot introduce
    /// duplicate spaces or edge padding.
    ///
    /// # Errors
    ///
    /// [`FramingError`] if the unit still contains the Morse line
    /// separator, which the segmentation stage must already have consumed.
    pub fn decode_unit(&self, unit: &str) -> Result<String, FramingError> {
        let line = Separator::Line.as_morse();
        if unit.contains(line) {
            return Err(FramingError { separator: line });
        }

        let mut out = String::with_capacity(unit.len());
        let mut first_word = true;
        for word in unit.split(Separator::Word.as_morse()) {
            let mut decoded = String::new();
            for token in word.split(Separator::Character.as_morse()) {
                if token.is_empty() {
                    continue;
                }
                match self.table.to_symbol(token) {
                    Some(symbol) => decoded.push(symbol),
                    None => decoded.push_str(token),
                }
            }
            if decoded.is_empty() {
                continue;
            }
            if !first_word {
                out.push_str(Separator::Word.as_text());
            }
            out.push_str(&decoded);
            first_word = false;
        }

        Ok(out)
    }
}
