//! The separator hierarchy shared by the text and Morse representations.
//!
//! Line separators bound word separators, which bound character
//! separators. Each kind has exactly one Morse-side and one text-side
//! form; the mapping is a total bijection over the three kinds and the
//! constants are fixed, not configurable.

/// A separator kind, ordered from finest to coarsest granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    /// Between two Morse patterns inside a word. No text-side form.
    Character,
    /// Between two words.
    Word,
    /// Between two lines.
    Line,
}

impl Separator {
    /// The Morse-side form of this separator.
    #[must_use]
    pub const fn as_morse(self) -> &'static str {
        match self {
            Self::Character => " ",
            Self::Word => "/",
            Self::Line => "//",
        }
    }

    /// The text-side form of this separator.
    ///
    /// The character separator has no text equivalent: decoded characters
    /// within a word concatenate directly.
    #[must_use]
    pub const fn as_text(self) -> &'static str {
        match self {
            Self::Character => "",
            Self::Word => " ",
            Self::Line => "\n",
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::Separator;

    #[rstest]
    #[case(Separator::Character, " ", "")]
    #[case(Separator::Word, "/", " ")]
    #[case(Separator::Line, "//", "\n")]
    fn dual_forms(#[case] separator: Separator, #[case] morse: &str, #[case] text: &str) {
        assert_eq!(separator.as_morse(), morse);
        assert_eq!(separator.as_text(), text);
    }

    #[test]
    fn line_is_two_word_separators() {
        // The EMIT stage relies on this: a trailing word separator may be
        // the first half of a line separator still in flight.
        let word = Separator::Word.as_morse();
        assert_eq!(Separator::Line.as_morse(), format!("{word}{word}"));
    }
}
