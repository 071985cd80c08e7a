//! Error types for mmsave

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for pack/unpack operations
#[derive(Debug, Error)]
pub enum SaveError {
    /// IO error occurred during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The container does not start with the expected magic number
    #[error("Bad magic: {0:#010X}")]
    BadMagic(i32),

    /// The container revision is not the supported one
    #[error("Bad version: {0:#X}")]
    BadVersion(i32),

    /// Invalid container layout (negative or oversized size field)
    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    /// The block decompressor rejected the payload
    #[error("Decompression error: {0}")]
    Decompression(String),

    /// Decompression produced a different number of bytes than declared
    #[error("Frame length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// A valid block that would write past its declared raw size
    #[error("Frame decompresses past its declared {declared} bytes")]
    OutputOverrun { declared: usize },

    /// Decode requested on a frame that holds raw content
    #[error("Frame is not encoded")]
    NotEncoded,

    /// Encode requested on a frame that already holds compressed content
    #[error("Frame is already encoded")]
    AlreadyEncoded,

    /// Decode requested before the compressed block was fully buffered
    #[error("Frame is incomplete: holds {actual} of {expected} compressed bytes")]
    IncompleteFrame { expected: usize, actual: usize },

    /// A payload failed JSON validation
    #[error("Invalid JSON in {}: {source}", .path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An error annotated with the pipeline step that produced it
    #[error("{step}: {source}")]
    Step {
        step: &'static str,
        #[source]
        source: Box<SaveError>,
    },
}

/// Error taxonomy shared by every [`SaveError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Short read/write, open/create failure.
    Io,
    /// Not a recognized or supported container.
    Format,
    /// Corrupted or truncated compressed payload.
    Decode,
    /// Frame operations invoked out of sequence.
    Protocol,
}

impl SaveError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SaveError::Io(_) => ErrorKind::Io,
            SaveError::BadMagic(_)
            | SaveError::BadVersion(_)
            | SaveError::InvalidFormat(_)
            | SaveError::InvalidJson { .. } => ErrorKind::Format,
            SaveError::Decompression(_)
            | SaveError::LengthMismatch { .. }
            | SaveError::OutputOverrun { .. } => ErrorKind::Decode,
            SaveError::NotEncoded
            | SaveError::AlreadyEncoded
            | SaveError::IncompleteFrame { .. } => ErrorKind::Protocol,
            SaveError::Step { source, .. } => source.kind(),
        }
    }

    /// Wrap this error with the name of the step that failed.
    pub fn at(self, step: &'static str) -> Self {
        SaveError::Step {
            step,
            source: Box::new(self),
        }
    }
}

/// Result type alias for mmsave operations
pub type Result<T> = std::result::Result<T, SaveError>;

/// Attach a step name to the error side of a [`Result`].
pub(crate) trait StepExt<T> {
    fn step(self, step: &'static str) -> Result<T>;
}

impl<T, E: Into<SaveError>> StepExt<T> for std::result::Result<T, E> {
    fn step(self, step: &'static str) -> Result<T> {
        self.map_err(|e| e.into().at(step))
    }
}
