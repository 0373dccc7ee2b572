//! Chunked byte source.
//!
//! Reads fixed-size byte chunks from an underlying reader and returns only
//! complete, valid UTF-8 text: a multi-byte character split across a chunk
//! boundary is held in a small carry buffer until the rest of it arrives,
//! so higher layers never see split characters regardless of buffer size
//! or input boundaries.

use std::{
    fs::File,
    io::{self, Read},
    mem,
    path::Path,
};

use bstr::ByteSlice;

/// Default scratch-buffer capacity in bytes (64 KB).
pub const DEFAULT_CHUNK_CAPACITY: usize = 64_000;

/// A source of validated text chunks over an arbitrary byte reader.
#[derive(Debug)]
pub struct ChunkReader<R> {
    inner: R,
    scratch: Vec<u8>,
    /// Trailing bytes not yet known to form a complete character sequence.
    carry: Vec<u8>,
}

impl ChunkReader<File> {
    /// Opens `path` with [`DEFAULT_CHUNK_CAPACITY`].
    ///
    /// # Errors
    ///
    /// Any error opening the file.
    pub fn open(path: &Path) -> io::Result<Self> {
        Ok(Self::with_capacity(File::open(path)?, DEFAULT_CHUNK_CAPACITY))
    }
}

impl<R: Read> ChunkReader<R> {
    /// Wraps `inner`, reading at most `capacity` bytes per physical read.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_capacity(inner: R, capacity: usize) -> Self {
        assert!(capacity > 0, "chunk capacity must be non-zero");
        Self {
            inner,
            scratch: vec![0; capacity],
            carry: Vec::new(),
        }
    }

    /// Reads the next chunk, returning the validated text and an
    /// end-of-stream flag.
    ///
    /// The returned text is the longest complete prefix of (carry + fresh
    /// bytes); an unfinished multi-byte sequence at its end is held back
    /// for the next call. At end of stream a non-empty carry is a
    /// truncated tail and is discarded, never emitted.
    ///
    /// # Errors
    ///
    /// Propagates read failures. A byte sequence that can never become
    /// valid UTF-8 surfaces as [`io::ErrorKind::InvalidData`].
    pub fn read_chunk(&mut self) -> io::Result<(String, bool)> {
        let read = loop {
            match self.inner.read(&mut self.scratch) {
                Ok(read) => break read,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(err),
            }
        };

        if read == 0 {
            if !self.carry.is_empty() {
                tracing::debug!(
                    discarded = self.carry.len(),
                    "dropping incomplete character sequence at end of stream"
                );
                self.carry.clear();
            }
            return Ok((String::new(), true));
        }

        let mut bytes = mem::take(&mut self.carry);
        bytes.extend_from_slice(&self.scratch[..read]);
        Ok((self.split_complete_prefix(bytes)?, false))
    }

    /// Splits `bytes` into the longest valid prefix (returned) and an
    /// incomplete trailing sequence (kept in the carry buffer).
    fn split_complete_prefix(&mut self, mut bytes: Vec<u8>) -> io::Result<String> {
        let valid_len = match bytes.to_str() {
            Ok(_) => bytes.len(),
            // An unfinished sequence at the very end; more bytes may complete it.
            Err(err) if err.error_len().is_none() => err.valid_up_to(),
            Err(err) => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("invalid UTF-8 sequence at byte {}", err.valid_up_to()),
                ));
            }
        };
        self.carry = bytes.split_off(valid_len);
        String::from_utf8(bytes).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
    }

    /// Releases the underlying handle.
    ///
    /// # Errors
    ///
    /// Currently infallible (the handle closes on drop); fallible for
    /// parity with the sink so close failures can be aggregated.
    pub fn close(self) -> io::Result<()> {
        drop(self);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use rstest::rstest;

    use super::*;

    fn reader(input: &[u8], capacity: usize) -> ChunkReader<Cursor<Vec<u8>>> {
        ChunkReader::with_capacity(Cursor::new(input.to_vec()), capacity)
    }

    /// Drains the source, returning the concatenated chunks.
    fn read_all(reader: &mut ChunkReader<Cursor<Vec<u8>>>) -> String {
        let mut out = String::new();
        loop {
            let (chunk, end_of_stream) = reader.read_chunk().unwrap();
            out.push_str(&chunk);
            if end_of_stream {
                return out;
            }
        }
    }

    #[test]
    fn single_chunk_returns_whole_content() {
        let mut reader = reader(b"This is a test file content.", DEFAULT_CHUNK_CAPACITY);
        let (chunk, end_of_stream) = reader.read_chunk().unwrap();
        assert_eq!(chunk, "This is a test file content.");
        assert!(!end_of_stream);
        let (chunk, end_of_stream) = reader.read_chunk().unwrap();
        assert_eq!(chunk, "");
        assert!(end_of_stream);
    }

    #[rstest]
    #[case(1)]
    #[case(7)]
    #[case(64_000)]
    fn reassembles_across_capacities(#[case] capacity: usize) {
        let input = "aé€👍z".repeat(40);
        let mut reader = reader(input.as_bytes(), capacity);
        assert_eq!(read_all(&mut reader), input);
    }

    #[test]
    fn multibyte_split_across_chunk_boundary() {
        // '€' is three bytes; capacity 4 leaves its first byte stranded.
        let mut reader = reader("xxx€".as_bytes(), 4);
        let (chunk, _) = reader.read_chunk().unwrap();
        assert_eq!(chunk, "xxx");
        let (chunk, _) = reader.read_chunk().unwrap();
        assert_eq!(chunk, "€");
        let (_, end_of_stream) = reader.read_chunk().unwrap();
        assert!(end_of_stream);
    }

    #[test]
    fn multibyte_wider_than_capacity_accumulates() {
        let mut reader = reader("€".as_bytes(), 1);
        assert_eq!(reader.read_chunk().unwrap(), (String::new(), false));
        assert_eq!(reader.read_chunk().unwrap(), (String::new(), false));
        assert_eq!(reader.read_chunk().unwrap(), ("€".to_owned(), false));
        assert_eq!(reader.read_chunk().unwrap(), (String::new(), true));
    }

    #[test]
    fn truncated_tail_at_end_of_stream_is_discarded() {
        // '€' is E2 82 AC; the file ends after two of its bytes.
        let mut reader = reader(b"ab\xE2\x82", DEFAULT_CHUNK_CAPACITY);
        let (chunk, end_of_stream) = reader.read_chunk().unwrap();
        assert_eq!(chunk, "ab");
        assert!(!end_of_stream);
        let (chunk, end_of_stream) = reader.read_chunk().unwrap();
        assert_eq!(chunk, "");
        assert!(end_of_stream);
    }

    #[test]
    fn invalid_interior_byte_is_an_error() {
        let mut reader = reader(b"ab\xFFcd", DEFAULT_CHUNK_CAPACITY);
        let err = reader.read_chunk().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    #[should_panic(expected = "chunk capacity must be non-zero")]
    fn zero_capacity_panics() {
        let _ = reader(b"", 0);
    }
}
