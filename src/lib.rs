//! # snapframe
//!
//! Streaming codecs for the two common snappy wire formats, layered over
//! the `snap` raw block primitive.
//!
//! ## Overview
//!
//! `snapframe` frames and deframes snappy-compressed data incrementally:
//! callers push arbitrarily sized byte slices in and get fully formed
//! output back, without buffering whole streams in memory. Two formats
//! are supported, plus an unframed passthrough:
//!
//! * **framing2**: the self-describing chunked format (stream-identifier
//!   chunk, typed length-prefixed chunks, masked CRC-32C per data chunk,
//!   store-if-cheaper fallback for incompressible data)
//! * **hadoop**: the big-endian block/sub-chunk format used by the hadoop
//!   native codec (no checksum, no identifier)
//! * **raw**: single whole-buffer blocks with no framing at all
//!
//! ## Quick Start
//!
//! ```rust
//! use snapframe::{FrameCompressor, FrameDecompressor, Result};
//!
//! fn main() -> Result<()> {
//!     let mut compressor = FrameCompressor::new();
//!     let mut framed = compressor.add_chunk(b"hello snappy framing")?;
//!     framed.extend_from_slice(&compressor.flush()?);
//!
//!     let mut decompressor = FrameDecompressor::new();
//!     let restored = decompressor.decompress(&framed)?;
//!     decompressor.flush()?;
//!     assert_eq!(restored, b"hello snappy framing");
//!     Ok(())
//! }
//! ```
//!
//! For file or socket plumbing, [`stream_compress`] and
//! [`stream_decompress`] pump between any `Read` and `Write` in
//! caller-chosen increments.
//!
//! ## Architecture
//!
//! Each codec is an independent value owning its own residual buffer; no
//! shared state, no internal locking, no I/O. A stream is fed with zero
//! or more calls and flushed exactly once; every error is fatal for the
//! stream that raised it.

pub mod assembler;
pub mod block;
pub mod checksum;
pub mod error;
pub mod framing2;
pub mod hadoop;
pub mod raw;
pub mod stream;

// Re-export the main public API for user convenience.
pub use assembler::ChunkAssembler;
pub use block::{max_compressed_length, BlockCompressor, BlockDecompressor};
pub use error::{Error, Result};
pub use framing2::{FrameCompressor, FrameDecompressor, MAX_UNCOMPRESSED_CHUNK, STREAM_IDENTIFIER};
pub use hadoop::{HadoopCompressor, HadoopDecompressor, MAX_SUBCHUNK_UNCOMPRESSED};
pub use raw::RawCodec;
pub use stream::{stream_compress, stream_decompress, Framing, PushCodec};
