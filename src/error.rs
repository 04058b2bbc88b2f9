use thiserror::Error;

/// Custom error types for the snapframe library.
///
/// Every variant is fatal for the stream that produced it: the framing
/// formats carry no resynchronization points, so once framing metadata is
/// suspect the only safe action is to abandon the stream.
#[derive(Error, Debug)]
pub enum Error {
    /// Underlying I/O errors from std::io operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Checksum mismatch error when the recomputed masked CRC-32C doesn't
    /// match the value stored in a data chunk.
    #[error("Checksum mismatch: expected {expected:#010x}, got {calculated:#010x}")]
    ChecksumMismatch { expected: u32, calculated: u32 },

    /// A stream-identifier chunk whose payload is not the fixed magic.
    #[error("Invalid stream identifier")]
    InvalidStreamIdentifier,

    /// A data chunk arrived before any stream-identifier chunk.
    #[error("Stream missing snappy identifier")]
    MissingStreamIdentifier,

    /// A second stream-identifier chunk appeared mid-stream.
    #[error("Unexpected stream identifier after start of stream")]
    UnexpectedIdentifier,

    /// A reserved unskippable chunk type was encountered.
    #[error("Unsupported chunk type: {tag:#04x}")]
    UnsupportedChunkType { tag: u8 },

    /// The block primitive rejected its input, or a hadoop sub-chunk
    /// overshoots the declared block length.
    #[error("Corrupt block: {message}")]
    CorruptBlock { message: String },

    /// Flush was called while an incomplete frame or block was pending.
    #[error("Truncated stream: {remaining} unconsumed bytes at end of stream")]
    TruncatedStream { remaining: usize },

    /// Internal assembler misuse: more bytes requested than buffered.
    /// Unreachable given correct call discipline.
    #[error("Insufficient data: requested {requested} bytes, have {available}")]
    InsufficientData { requested: usize, available: usize },

    /// The residual buffer outgrew its configured cap without ever
    /// completing a frame. Treated as hostile or broken input.
    #[error("Residual buffer grew to {size} bytes, over the {limit} byte limit")]
    ResidualLimitExceeded { size: usize, limit: usize },

    /// Invalid frame error for malformed frames (e.g., a data chunk too
    /// short to hold its checksum field).
    #[error("Invalid frame: {message}")]
    InvalidFrame { message: String },
}

impl Error {
    /// Create a new `InvalidFrame` error with a descriptive message.
    pub fn invalid_frame(message: impl Into<String>) -> Self {
        Self::InvalidFrame {
            message: message.into(),
        }
    }

    /// Create a new `CorruptBlock` error with a descriptive message.
    pub fn corrupt_block(message: impl Into<String>) -> Self {
        Self::CorruptBlock {
            message: message.into(),
        }
    }

    /// Create a new `ChecksumMismatch` error with expected and calculated values.
    pub fn checksum_mismatch(expected: u32, calculated: u32) -> Self {
        Self::ChecksumMismatch {
            expected,
            calculated,
        }
    }
}

impl From<snap::Error> for Error {
    fn from(e: snap::Error) -> Self {
        Self::CorruptBlock {
            message: e.to_string(),
        }
    }
}

/// Result type alias for the library operations.
pub type Result<T> = std::result::Result<T, Error>;
