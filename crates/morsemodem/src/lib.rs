//! A streaming transcoder between plain text and Morse code.
//!
//! Input flows through a fixed-size byte buffer rather than being loaded
//! whole: a chunked reader guarantees valid character boundaries across
//! read calls, a re-segmentation loop reassembles chunk fragments into
//! complete encode/decode units, and the unit algorithms translate each
//! segment through an immutable symbol table. The concatenated output is
//! byte-identical regardless of the chunk capacity used.
//!
//! # Examples
//!
//! ```rust
//! use morsemodem::{Encoder, SymbolTable};
//!
//! let table = SymbolTable::builtin();
//! let encoder = Encoder::new(&table);
//! assert_eq!(
//!     encoder.encode_unit("HELLO WORLD").unwrap(),
//!     ".... . .-.. .-.. ---/.-- --- .-. .-.. -..",
//! );
//! ```
//!
//! Whole files are converted through [`Converter`], which picks the
//! direction from the input extension (`.txt` encodes, `.morse` decodes)
//! and streams to a destination file or to standard output.

mod convert;
mod decode;
mod encode;
mod error;
mod reader;
mod separator;
mod table;
mod transcoder;
mod writer;

pub use convert::Converter;
pub use decode::Decoder;
pub use encode::Encoder;
pub use error::{FramingError, MappingError, TranscodeError};
pub use reader::{ChunkReader, DEFAULT_CHUNK_CAPACITY};
pub use separator::Separator;
pub use table::{MappingDocument, SymbolTable};
pub use transcoder::{Direction, Transcoder};
pub use writer::{ChunkWriter, SinkTarget};
