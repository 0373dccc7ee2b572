//! File-level conversion facade.
//!
//! Wires extension detection, symbol-table loading, and endpoint
//! construction into one owned conversion, in that order: the extension
//! is validated before any file is touched.

use std::{fs::File, path::Path};

use tracing::debug;

use crate::{
    error::TranscodeError,
    reader::ChunkReader,
    table::SymbolTable,
    transcoder::{Direction, Transcoder},
    writer::{ChunkWriter, SinkTarget},
};

/// One whole-file conversion with exclusively owned endpoints.
#[derive(Debug)]
pub struct Converter {
    transcoder: Transcoder<File, SinkTarget>,
}

impl Converter {
    /// Builds a conversion from `input` to `output` (standard output when
    /// `None`) using the built-in symbol table.
    ///
    /// # Errors
    ///
    /// [`TranscodeError::UnsupportedExtension`] for inputs that are
    /// neither `.txt` nor `.morse`, or an I/O failure opening either
    /// endpoint.
    pub fn new(input: &Path, output: Option<&Path>) -> Result<Self, TranscodeError> {
        let direction = Direction::from_input_path(input)?;
        Self::build(input, output, direction, SymbolTable::builtin())
    }

    /// Like [`new`](Self::new), but loads the symbol table from the
    /// mapping document at `mapping`.
    ///
    /// # Errors
    ///
    /// Additionally [`TranscodeError::MappingLoad`] when the document is
    /// missing, unreadable, or malformed.
    pub fn with_mapping_file(
        input: &Path,
        output: Option<&Path>,
        mapping: &Path,
    ) -> Result<Self, TranscodeError> {
        let direction = Direction::from_input_path(input)?;
        let table = SymbolTable::from_path(mapping)?;
        Self::build(input, output, direction, table)
    }

    fn build(
        input: &Path,
        output: Option<&Path>,
        direction: Direction,
        table: SymbolTable,
    ) -> Result<Self, TranscodeError> {
        debug!(?direction, input = %input.display(), "starting conversion");
        let source = ChunkReader::open(input).map_err(TranscodeError::Source)?;
        let sink = ChunkWriter::create(output).map_err(TranscodeError::Sink)?;
        Ok(Self {
            transcoder: Transcoder::new(source, sink, direction, table),
        })
    }

    /// Streams the whole input through the transcoder.
    ///
    /// # Errors
    ///
    /// See [`Transcoder::run`].
    pub fn process(&mut self) -> Result<(), TranscodeError> {
        self.transcoder.run()
    }

    /// Releases both endpoints, aggregating close failures.
    ///
    /// # Errors
    ///
    /// See [`Transcoder::close`].
    pub fn close(self) -> Result<(), TranscodeError> {
        self.transcoder.close()
    }
}
