//! The self-framed snappy stream format ("framing2").
//!
//! A stream is a sequence of chunks, each `[type: u8 | length: u24 LE |
//! payload]`. The first chunk is a stream identifier carrying a fixed
//! magic; data chunks carry a masked CRC-32C of their uncompressed bytes
//! followed by either compressed or stored data, whichever is smaller.
//! Reserved chunk types split into a skippable range a reader discards
//! and an unskippable range that is fatal.

use crate::assembler::ChunkAssembler;
use crate::block::{BlockCompressor, BlockDecompressor};
use crate::checksum;
use crate::error::{Error, Result};

/// Maximum uncompressed payload of one data chunk.
pub const MAX_UNCOMPRESSED_CHUNK: usize = 65536;

/// Magic payload of the stream-identifier chunk.
pub const STREAM_IDENTIFIER: &[u8; 6] = b"sNaPpY";

/// Chunk type + 3-byte little-endian payload length.
const FRAME_HEADER_LEN: usize = 4;

/// Checksum field at the head of every data chunk payload.
const CHECKSUM_LEN: usize = 4;

const TAG_COMPRESSED: u8 = 0x00;
const TAG_UNCOMPRESSED: u8 = 0x01;
const TAG_PADDING: u8 = 0xfe;
const TAG_IDENTIFIER: u8 = 0xff;

/// Classification of the closed, fixed chunk-type tag space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChunkType {
    Compressed,
    Uncompressed,
    Identifier,
    Padding,
    Skippable,
    Unskippable,
}

impl ChunkType {
    fn classify(tag: u8) -> ChunkType {
        match tag {
            TAG_COMPRESSED => ChunkType::Compressed,
            TAG_UNCOMPRESSED => ChunkType::Uncompressed,
            TAG_IDENTIFIER => ChunkType::Identifier,
            TAG_PADDING => ChunkType::Padding,
            0x80..=0xfd => ChunkType::Skippable,
            0x02..=0x7f => ChunkType::Unskippable,
        }
    }
}

fn put_frame_header(out: &mut Vec<u8>, tag: u8, payload_len: usize) {
    out.push(tag);
    let len = (payload_len as u32).to_le_bytes();
    out.extend_from_slice(&len[..3]);
}

/// Push-based compressor producing a framing2 stream.
///
/// Input accumulates until a full 65536-byte segment is available, so the
/// final stream is byte-identical regardless of how the caller slices its
/// feed calls. Call [`flush`](Self::flush) once at end of input to emit
/// any short final segment.
pub struct FrameCompressor {
    residual: ChunkAssembler,
    block: BlockCompressor,
    wrote_identifier: bool,
}

impl Default for FrameCompressor {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameCompressor {
    pub fn new() -> Self {
        Self {
            residual: ChunkAssembler::new(),
            block: BlockCompressor::new(),
            wrote_identifier: false,
        }
    }

    /// Feeds uncompressed bytes in, returns any fully framed bytes out.
    ///
    /// The stream-identifier chunk is emitted once, ahead of the first
    /// call's output.
    pub fn add_chunk(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        if !self.wrote_identifier {
            put_frame_header(&mut out, TAG_IDENTIFIER, STREAM_IDENTIFIER.len());
            out.extend_from_slice(STREAM_IDENTIFIER);
            self.wrote_identifier = true;
        }
        self.residual.feed(input);
        while self.residual.has(MAX_UNCOMPRESSED_CHUNK) {
            let segment = self.residual.take(MAX_UNCOMPRESSED_CHUNK)?;
            self.emit_data_chunk(&segment, &mut out)?;
        }
        Ok(out)
    }

    /// Alias for [`add_chunk`](Self::add_chunk).
    pub fn compress(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        self.add_chunk(input)
    }

    /// Emits any buffered short final segment. Idempotent no-op afterwards.
    pub fn flush(&mut self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        let pending = self.residual.remaining();
        if pending > 0 {
            let segment = self.residual.take(pending)?;
            self.emit_data_chunk(&segment, &mut out)?;
        }
        Ok(out)
    }

    fn emit_data_chunk(&mut self, segment: &[u8], out: &mut Vec<u8>) -> Result<()> {
        let crc = checksum::masked_crc32c(segment);
        let compressed = self.block.compress(segment)?;
        // Store if cheaper: incompressible segments go out verbatim so a
        // chunk never expands past its input by more than the header.
        let (tag, data) = if compressed.len() < segment.len() {
            (TAG_COMPRESSED, compressed.as_slice())
        } else {
            (TAG_UNCOMPRESSED, segment)
        };
        put_frame_header(out, tag, CHECKSUM_LEN + data.len());
        out.extend_from_slice(&crc.to_le_bytes());
        out.extend_from_slice(data);
        Ok(())
    }
}

/// Push-based decompressor for a framing2 stream.
///
/// Incomplete trailing frames stay buffered between calls; call
/// [`flush`](Self::flush) at end of input to surface truncation.
pub struct FrameDecompressor {
    residual: ChunkAssembler,
    block: BlockDecompressor,
    verified_identifier: bool,
}

impl Default for FrameDecompressor {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDecompressor {
    pub fn new() -> Self {
        Self {
            residual: ChunkAssembler::new(),
            block: BlockDecompressor::new(),
            verified_identifier: false,
        }
    }

    /// Feeds framed bytes in, returns any fully reconstructed payload
    /// bytes out.
    pub fn decompress(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        self.residual.feed(input);
        let mut out = Vec::new();
        while self.residual.has(FRAME_HEADER_LEN) {
            let header = self.residual.peek(FRAME_HEADER_LEN)?;
            let tag = header[0];
            let payload_len =
                u32::from_le_bytes([header[1], header[2], header[3], 0]) as usize;
            if !self.residual.has(FRAME_HEADER_LEN + payload_len) {
                break;
            }
            self.residual.take(FRAME_HEADER_LEN)?;
            let payload = self.residual.take(payload_len)?;
            match ChunkType::classify(tag) {
                ChunkType::Identifier => {
                    if self.verified_identifier {
                        return Err(Error::UnexpectedIdentifier);
                    }
                    if payload != STREAM_IDENTIFIER {
                        return Err(Error::InvalidStreamIdentifier);
                    }
                    self.verified_identifier = true;
                }
                ChunkType::Compressed => {
                    out.extend_from_slice(&self.data_chunk(&payload, true)?);
                }
                ChunkType::Uncompressed => {
                    out.extend_from_slice(&self.data_chunk(&payload, false)?);
                }
                ChunkType::Padding | ChunkType::Skippable => {}
                ChunkType::Unskippable => {
                    return Err(Error::UnsupportedChunkType { tag });
                }
            }
        }
        self.residual.check_limit()?;
        Ok(out)
    }

    /// Fails with `TruncatedStream` if an incomplete frame remains
    /// buffered; succeeds silently otherwise.
    pub fn flush(&mut self) -> Result<()> {
        let remaining = self.residual.remaining();
        if remaining > 0 {
            return Err(Error::TruncatedStream { remaining });
        }
        Ok(())
    }

    fn data_chunk(&mut self, payload: &[u8], compressed: bool) -> Result<Vec<u8>> {
        if !self.verified_identifier {
            return Err(Error::MissingStreamIdentifier);
        }
        if payload.len() < CHECKSUM_LEN {
            return Err(Error::invalid_frame(
                "data chunk too short to hold its checksum",
            ));
        }
        let expected = u32::from_le_bytes([payload[0], payload[1], payload[2], payload[3]]);
        let body = &payload[CHECKSUM_LEN..];
        let data = if compressed {
            self.block.decompress(body)?
        } else {
            body.to_vec()
        };
        if data.len() > MAX_UNCOMPRESSED_CHUNK {
            return Err(Error::invalid_frame(
                "uncompressed chunk payload exceeds 65536 bytes",
            ));
        }
        checksum::verify_masked(expected, &data)?;
        Ok(data)
    }
}
