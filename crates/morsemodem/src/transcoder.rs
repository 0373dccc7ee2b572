//! The re-segmentation loop driving a whole conversion.
//!
//! Chunks arrive with arbitrary boundaries; this module reassembles them
//! into complete separator-delimited units, transcodes each unit, and
//! appends the matching output-side separator. Segmentation is inherently
//! sequential — separator state spans chunk boundaries — so the loop is
//! single-threaded and blocking by design.

use std::{
    ffi::OsStr,
    io::{Read, Write},
    mem,
    path::Path,
};

use tracing::debug;

use crate::{
    decode::Decoder,
    encode::Encoder,
    error::TranscodeError,
    reader::ChunkReader,
    separator::Separator,
    table::SymbolTable,
    writer::ChunkWriter,
};

/// Transcoding direction, derived from the input file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Text in, Morse out (`.txt` inputs).
    Encode,
    /// Morse in, text out (`.morse` inputs).
    Decode,
}

impl Direction {
    /// Selects the direction from `path`'s extension, rejecting anything
    /// other than `.txt` or `.morse` before any I/O is attempted.
    ///
    /// # Errors
    ///
    /// [`TranscodeError::UnsupportedExtension`] for any other extension.
    pub fn from_input_path(path: &Path) -> Result<Self, TranscodeError> {
        match path.extension().and_then(OsStr::to_str) {
            Some("txt") => Ok(Self::Encode),
            Some("morse") => Ok(Self::Decode),
            other => Err(TranscodeError::UnsupportedExtension {
                extension: other.unwrap_or_default().to_owned(),
            }),
        }
    }

    /// The input-side form of `separator` for this direction.
    fn input_form(self, separator: Separator) -> &'static str {
        match self {
            Self::Encode => separator.as_text(),
            Self::Decode => separator.as_morse(),
        }
    }

    /// The output-side form of `separator` for this direction.
    fn output_form(self, separator: Separator) -> &'static str {
        match self {
            Self::Encode => separator.as_morse(),
            Self::Decode => separator.as_text(),
        }
    }
}

/// Streams one conversion: chunked source in, transcoded chunks out.
///
/// Owns both endpoints and the symbol table exclusively for the lifetime
/// of one conversion; [`close`](Self::close) releases them on every exit
/// path, aggregating close failures from both sides.
#[derive(Debug)]
pub struct Transcoder<R, W> {
    source: ChunkReader<R>,
    sink: ChunkWriter<W>,
    direction: Direction,
    table: SymbolTable,
    /// Bytes read but not yet consumed into a delimited unit: zero or more
    /// complete units followed by at most one partial tail.
    pending: String,
    /// An output word separator consumed but not yet written. Flushed
    /// before the next nonempty unit, dropped at a line separator or end
    /// of stream.
    owed_word_separator: bool,
}

impl<R: Read, W: Write> Transcoder<R, W> {
    /// Assembles a transcoder from its collaborators.
    #[must_use]
    pub fn new(
        source: ChunkReader<R>,
        sink: ChunkWriter<W>,
        direction: Direction,
        table: SymbolTable,
    ) -> Self {
        Self {
            source,
            sink,
            direction,
            table,
            pending: String::new(),
            owed_word_separator: false,
        }
    }

    /// Runs the conversion to completion.
    ///
    /// # Errors
    ///
    /// I/O failures on either endpoint (identified as source or sink) and
    /// framing violations; all are terminal for this conversion.
    pub fn run(&mut self) -> Result<(), TranscodeError> {
        loop {
            let (chunk, end_of_stream) = self.source.read_chunk().map_err(TranscodeError::Source)?;
            debug!(bytes = chunk.len(), end_of_stream, "accumulated chunk");
            self.pending.push_str(&chunk);
            self.emit_ready()?;
            if end_of_stream {
                return self.drain();
            }
        }
    }

    /// Emits every complete unit currently in the accumulation buffer.
    ///
    /// The output word separator is never written eagerly: a unit of bare
    /// word separators transcodes to nothing, and writing its separator
    /// anyway would leave padding that depends on where the chunk
    /// boundaries happened to fall. Instead the separator is owed until
    /// the next nonempty unit, and dropped if a line separator or end of
    /// stream arrives first. Line separators are always emitted: an empty
    /// line is real.
    fn emit_ready(&mut self) -> Result<(), TranscodeError> {
        while let Some((at, separator)) = self.next_separator() {
            let transcoded = self.transcode_unit(&self.pending[..at])?;
            if !transcoded.is_empty() {
                self.flush_owed_separator()?;
                self.sink
                    .write_chunk(&transcoded)
                    .map_err(TranscodeError::Sink)?;
            }
            match separator {
                Separator::Word if transcoded.is_empty() => {}
                Separator::Word => self.owed_word_separator = true,
                _ => {
                    self.owed_word_separator = false;
                    self.sink
                        .write_chunk(self.direction.output_form(separator))
                        .map_err(TranscodeError::Sink)?;
                }
            }
            let consumed = at + self.direction.input_form(separator).len();
            self.pending.drain(..consumed);
        }
        Ok(())
    }

    fn flush_owed_separator(&mut self) -> Result<(), TranscodeError> {
        if mem::take(&mut self.owed_word_separator) {
            self.sink
                .write_chunk(self.direction.output_form(Separator::Word))
                .map_err(TranscodeError::Sink)?;
        }
        Ok(())
    }

    /// Finds the next split point: the line separator first, then the
    /// rightmost word separator.
    ///
    /// The word separator is searched backward so the right edge of the
    /// buffer stays untouched; a match on the very last byte is deferred
    /// to the next cycle, since it may be the first half of a line
    /// separator the next chunk completes.
    fn next_separator(&self) -> Option<(usize, Separator)> {
        let line = self.direction.input_form(Separator::Line);
        if let Some(at) = self.pending.find(line) {
            return Some((at, Separator::Line));
        }
        let word = self.direction.input_form(Separator::Word);
        let at = self.pending.rfind(word)?;
        if at + word.len() == self.pending.len() {
            return None; // insufficient lookahead
        }
        Some((at, Separator::Word))
    }

    /// Transcodes the trailing residue once end of stream is reached,
    /// with no separator appended. A residue that transcodes to nothing
    /// also forfeits any owed word separator.
    fn drain(&mut self) -> Result<(), TranscodeError> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let residue = mem::take(&mut self.pending);
        let transcoded = self.transcode_unit(&residue)?;
        if transcoded.is_empty() {
            return Ok(());
        }
        self.flush_owed_separator()?;
        self.sink
            .write_chunk(&transcoded)
            .map_err(TranscodeError::Sink)
    }

    fn transcode_unit(&self, unit: &str) -> Result<String, TranscodeError> {
        let transcoded = match self.direction {
            Direction::Encode => Encoder::new(&self.table).encode_unit(unit)?,
            Direction::Decode => Decoder::new(&self.table).decode_unit(unit)?,
        };
        Ok(transcoded)
    }

    /// Releases both endpoints, reporting close failures from each side
    /// together rather than letting the first swallow the second.
    ///
    /// # Errors
    ///
    /// [`TranscodeError::Close`] carrying whichever side(s) failed.
    pub fn close(mut self) -> Result<(), TranscodeError> {
        let sink = self.sink.close().err();
        let source = self.source.close().err();
        match (source, sink) {
            (None, None) => Ok(()),
            (source, sink) => Err(TranscodeError::Close { source, sink }),
        }
    }

    /// Consumes the transcoder, returning the sink (test seam).
    pub fn into_sink(self) -> ChunkWriter<W> {
        self.sink
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use quickcheck::QuickCheck;
    use rstest::rstest;

    use super::*;

    fn pipeline(input: &str, direction: Direction, capacity: usize) -> String {
        let source = ChunkReader::with_capacity(Cursor::new(input.as_bytes().to_vec()), capacity);
        let sink = ChunkWriter::new(Vec::new());
        let mut transcoder = Transcoder::new(source, sink, direction, SymbolTable::builtin());
        transcoder.run().unwrap();
        String::from_utf8(transcoder.into_sink().into_inner()).unwrap()
    }

    #[test]
    fn selects_direction_from_extension() {
        let encode = Direction::from_input_path(Path::new("notes.txt")).unwrap();
        assert_eq!(encode, Direction::Encode);
        let decode = Direction::from_input_path(Path::new("dir/notes.morse")).unwrap();
        assert_eq!(decode, Direction::Decode);
    }

    #[rstest]
    #[case("notes.dat")]
    #[case("notes")]
    #[case("notes.")]
    fn rejects_other_extensions(#[case] path: &str) {
        let err = Direction::from_input_path(Path::new(path)).unwrap_err();
        assert!(matches!(err, TranscodeError::UnsupportedExtension { .. }));
    }

    #[test]
    fn encodes_hello_world() {
        assert_eq!(
            pipeline("HELLO WORLD", Direction::Encode, 64_000),
            ".... . .-.. .-.. ---/.-- --- .-. .-.. -.."
        );
    }

    #[test]
    fn decodes_hello_world() {
        assert_eq!(
            pipeline(
                ".... . .-.. .-.. ---/.-- --- .-. .-.. -..",
                Direction::Decode,
                64_000
            ),
            "HELLO WORLD"
        );
    }

    #[test]
    fn line_separator_splits_before_any_word_separator() {
        // The `//` at byte 5 wins over the `/` inside the first half.
        assert_eq!(pipeline(".-/.-//-...", Direction::Decode, 64_000), "A A\nB");
    }

    #[test]
    fn trailing_word_separator_is_deferred_across_chunks() {
        // With capacity 3 the first chunk is ".-/" — splitting at that `/`
        // would misread the `//` completed by the next chunk.
        assert_eq!(pipeline(".-//.-", Direction::Decode, 3), "A\nA");
        assert_eq!(pipeline(".-//.-", Direction::Decode, 64_000), "A\nA");
    }

    #[test]
    fn lines_map_to_morse_line_separators() {
        assert_eq!(pipeline("AB\nC", Direction::Encode, 64_000), ".- -...//-.-.");
        assert_eq!(pipeline("AB\n", Direction::Encode, 64_000), ".- -...//");
        assert_eq!(pipeline("A\n\nB", Direction::Encode, 64_000), ".-////-...");
    }

    #[test]
    fn empty_input_produces_empty_output() {
        assert_eq!(pipeline("", Direction::Encode, 1), "");
        assert_eq!(pipeline("", Direction::Decode, 1), "");
    }

    #[test]
    fn separator_only_units_emit_no_padding() {
        // The middle word of ".-/ /.-" decodes to nothing; its separator
        // is dropped no matter which chunk boundary isolates it.
        for capacity in [1, 3, 4, 64_000] {
            assert_eq!(pipeline(".-/ /.-", Direction::Decode, capacity), "A A");
        }
        assert_eq!(pipeline("  AB", Direction::Encode, 64_000), ".- -...");
    }

    #[test]
    fn whitespace_word_before_line_separator_emits_nothing() {
        // Small capacities split ".-/ " at the interior `/` before the
        // line separator is visible; the owed `" "` must be dropped once
        // the `//` arrives, never written ahead of the `\n`.
        for capacity in [1, 2, 3, 7, 64_000] {
            assert_eq!(pipeline(".-/ //--", Direction::Decode, capacity), "A\nM");
        }
    }

    #[test]
    fn trailing_whitespace_word_leaves_no_padding() {
        for capacity in [1, 2, 64_000] {
            assert_eq!(pipeline(".-/ ", Direction::Decode, capacity), "A");
        }
    }

    #[rstest]
    #[case(Direction::Encode, "Héllo wörld\nA  B €\nend")]
    #[case(Direction::Decode, ".... .//.-/-...//..-.. €/--")]
    #[case(Direction::Decode, ".-/ /.-//--")]
    #[case(Direction::Decode, ".-/ //--")]
    fn output_is_invariant_under_chunk_capacity(#[case] direction: Direction, #[case] input: &str) {
        let reference = pipeline(input, direction, 64_000);
        for capacity in [1, 7, 64_000, input.len() + 1] {
            assert_eq!(pipeline(input, direction, capacity), reference);
        }
    }

    #[test]
    fn multibyte_characters_survive_any_chunk_boundary() {
        // '€' (unmapped, three bytes) split across reads must come out
        // exactly once, uncorrupted.
        assert_eq!(pipeline("€ €\n", Direction::Encode, 1), "€/€//");
    }

    #[test]
    fn round_trip_property() {
        const ALPHABET: &[char] = &['A', 'B', 'Z', 'É', '0', '9', '.', ',', '€'];

        fn prop(word_seeds: Vec<Vec<u8>>, newline_seed: Vec<bool>, capacity_seed: u8) -> bool {
            let words: Vec<String> = word_seeds
                .iter()
                .filter(|seeds| !seeds.is_empty())
                .map(|seeds| {
                    seeds
                        .iter()
                        .map(|&seed| ALPHABET[usize::from(seed) % ALPHABET.len()])
                        .collect()
                })
                .collect();
            if words.is_empty() {
                return true;
            }

            let mut text = words[0].clone();
            for (index, word) in words.iter().enumerate().skip(1) {
                let newline = newline_seed.get(index).copied().unwrap_or(false);
                text.push(if newline { '\n' } else { ' ' });
                text.push_str(word);
            }

            let capacity = 1 + usize::from(capacity_seed) % 97;
            let encoded = pipeline(&text, Direction::Encode, capacity);
            let decoded = pipeline(&encoded, Direction::Decode, capacity);
            decoded == text
        }

        QuickCheck::new()
            .tests(500)
            .quickcheck(prop as fn(Vec<Vec<u8>>, Vec<bool>, u8) -> bool);
    }
}
