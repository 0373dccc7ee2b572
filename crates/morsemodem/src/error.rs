//! Error taxonomy for a conversion.
//!
//! Unknown or unmapped symbols are never errors anywhere in the pipeline;
//! they are defined passthrough behavior. Every failure below is terminal
//! for the current conversion and there is no automatic retry.

use std::{io, path::PathBuf};

use thiserror::Error;

/// A terminal failure while setting up or running a conversion.
#[derive(Debug, Error)]
pub enum TranscodeError {
    /// The input extension selects the direction; anything other than
    /// `.txt` or `.morse` is rejected before any I/O is attempted.
    #[error("unsupported input extension {extension:?}: expected \".txt\" or \".morse\"")]
    UnsupportedExtension {
        /// The offending extension, empty when the path has none.
        extension: String,
    },

    /// The symbol-table document could not be loaded.
    #[error("loading morse mappings")]
    MappingLoad(#[from] MappingError),

    /// A read on the input source failed.
    #[error("reading from the input source")]
    Source(#[source] io::Error),

    /// A write to the output sink failed.
    #[error("writing to the output sink")]
    Sink(#[source] io::Error),

    /// A segmentation invariant was violated. This signals a bug in the
    /// chunking layer, not malformed user data.
    #[error(transparent)]
    Framing(#[from] FramingError),

    /// Close-time failures from the source and the sink, collected so the
    /// first does not swallow the second.
    #[error("closing resources (source: {source:?}, sink: {sink:?})")]
    Close {
        /// Failure closing the input source, if any.
        source: Option<io::Error>,
        /// Failure closing the output sink, if any.
        sink: Option<io::Error>,
    },
}

/// Failure to load the symbol-table document.
#[derive(Debug, Error)]
pub enum MappingError {
    /// The file was missing or unreadable.
    #[error("reading mapping file {path:?}")]
    Io {
        /// Path of the document.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: io::Error,
    },

    /// The document was truncated or not a valid mapping document.
    #[error("parsing mapping file {path:?}")]
    Parse {
        /// Path of the document.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: serde_json::Error,
    },
}

/// A unit reached an encode/decode algorithm while still containing the
/// line separator the segmentation stage must already have consumed.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unit still contains the line separator {separator:?} after segmentation")]
pub struct FramingError {
    /// The separator token found inside the unit.
    pub separator: &'static str,
}
