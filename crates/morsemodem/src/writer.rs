//! Chunked byte sink.
//!
//! Writes chunks verbatim to a destination file or to standard output.
//! There is no buffering or reordering beyond the underlying stream's own
//! ordering, and standard output — which outlives the sink — is never
//! closed, only flushed.

use std::{
    fs::File,
    io::{self, Stdout, Write},
    path::Path,
};

/// A sink of text chunks over an arbitrary byte writer.
#[derive(Debug)]
pub struct ChunkWriter<W> {
    inner: W,
}

impl ChunkWriter<SinkTarget> {
    /// Creates (or truncates) the file at `path`, or targets standard
    /// output when `path` is `None`.
    ///
    /// # Errors
    ///
    /// Any error creating the file.
    pub fn create(path: Option<&Path>) -> io::Result<Self> {
        let target = match path {
            Some(path) => SinkTarget::File(File::create(path)?),
            None => SinkTarget::Stdout(io::stdout()),
        };
        Ok(Self::new(target))
    }
}

impl<W: Write> ChunkWriter<W> {
    /// Wraps an arbitrary writer.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Appends `chunk` verbatim.
    ///
    /// # Errors
    ///
    /// Propagates the underlying write failure.
    pub fn write_chunk(&mut self, chunk: &str) -> io::Result<()> {
        self.inner.write_all(chunk.as_bytes())
    }

    /// Flushes the destination, surfacing deferred write errors.
    ///
    /// # Errors
    ///
    /// Propagates the underlying flush failure.
    pub fn close(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    /// Consumes the sink, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// Destination of a conversion: a created file or the process's stdout.
#[derive(Debug)]
pub enum SinkTarget {
    /// A file created (or truncated) for this conversion.
    File(File),
    /// The process's standard output stream.
    Stdout(Stdout),
}

impl Write for SinkTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::File(file) => file.write(buf),
            Self::Stdout(stdout) => stdout.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            // sync_all reports write-back failures that a plain flush on
            // `File` would defer to close time.
            Self::File(file) => {
                file.flush()?;
                file.sync_all()
            }
            Self::Stdout(stdout) => stdout.flush(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn writes_are_verbatim_appends() {
        let mut writer = ChunkWriter::new(Vec::new());
        writer.write_chunk(".... .").unwrap();
        writer.write_chunk("/").unwrap();
        writer.write_chunk("€").unwrap();
        assert_eq!(writer.into_inner(), ".... ./€".as_bytes());
    }

    #[test]
    fn creates_and_truncates_destination_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.morse");
        fs::write(&path, "previous contents").unwrap();

        let mut writer = ChunkWriter::create(Some(&path)).unwrap();
        writer.write_chunk(".-").unwrap();
        writer.close().unwrap();
        drop(writer);

        assert_eq!(fs::read_to_string(&path).unwrap(), ".-");
    }
}
