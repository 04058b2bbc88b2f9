//! The hadoop-native snappy block format.
//!
//! A stream is a sequence of blocks: `[uncompressed_len: u32 BE]` followed
//! by sub-chunks of `[compressed_len: u32 BE | compressed bytes]` whose
//! decompressed sizes sum to exactly the declared length. There is no
//! checksum and no stream identifier, and compression is unconditional.

use crate::assembler::ChunkAssembler;
use crate::block::{BlockCompressor, BlockDecompressor};
use crate::error::{Error, Result};

/// Maximum uncompressed payload of one sub-chunk.
pub const MAX_SUBCHUNK_UNCOMPRESSED: usize = 65536;

/// Uncompressed bytes per emitted block. Input accumulates to this fixed
/// boundary so the final stream is byte-identical regardless of how the
/// caller slices its feed calls.
pub const MAX_BLOCK_UNCOMPRESSED: usize = 4 * MAX_SUBCHUNK_UNCOMPRESSED;

/// Push-based compressor producing a hadoop snappy stream.
pub struct HadoopCompressor {
    residual: ChunkAssembler,
    block: BlockCompressor,
}

impl Default for HadoopCompressor {
    fn default() -> Self {
        Self::new()
    }
}

impl HadoopCompressor {
    pub fn new() -> Self {
        Self {
            residual: ChunkAssembler::new(),
            block: BlockCompressor::new(),
        }
    }

    /// Feeds uncompressed bytes in, returns any fully framed block bytes
    /// out.
    pub fn add_chunk(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.residual.feed(input);
        while self.residual.has(MAX_BLOCK_UNCOMPRESSED) {
            let block = self.residual.take(MAX_BLOCK_UNCOMPRESSED)?;
            self.emit_block(&block, &mut out)?;
        }
        Ok(out)
    }

    /// Alias for [`add_chunk`](Self::add_chunk).
    pub fn compress(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        self.add_chunk(input)
    }

    /// Emits any buffered partial block, even if undersized. Idempotent
    /// no-op afterwards.
    pub fn flush(&mut self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        let pending = self.residual.remaining();
        if pending > 0 {
            let block = self.residual.take(pending)?;
            self.emit_block(&block, &mut out)?;
        }
        Ok(out)
    }

    fn emit_block(&mut self, block: &[u8], out: &mut Vec<u8>) -> Result<()> {
        out.extend_from_slice(&(block.len() as u32).to_be_bytes());
        for segment in block.chunks(MAX_SUBCHUNK_UNCOMPRESSED) {
            let compressed = self.block.compress(segment)?;
            out.extend_from_slice(&(compressed.len() as u32).to_be_bytes());
            out.extend_from_slice(&compressed);
        }
        Ok(())
    }
}

/// Push-based decompressor for a hadoop snappy stream.
///
/// Tracks how many uncompressed bytes the current block still owes;
/// sub-chunks are consumed one at a time so memory stays bounded by one
/// sub-chunk regardless of the declared block length.
pub struct HadoopDecompressor {
    residual: ChunkAssembler,
    block: BlockDecompressor,
    block_remaining: usize,
}

impl Default for HadoopDecompressor {
    fn default() -> Self {
        Self::new()
    }
}

impl HadoopDecompressor {
    pub fn new() -> Self {
        Self {
            residual: ChunkAssembler::new(),
            block: BlockDecompressor::new(),
            block_remaining: 0,
        }
    }

    /// Feeds framed bytes in, returns any fully reconstructed payload
    /// bytes out.
    pub fn decompress(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        self.residual.feed(input);
        let mut out = Vec::new();
        loop {
            if self.block_remaining == 0 {
                if !self.residual.has(4) {
                    break;
                }
                let len = self.residual.take(4)?;
                self.block_remaining =
                    u32::from_be_bytes([len[0], len[1], len[2], len[3]]) as usize;
                continue;
            }
            if !self.residual.has(4) {
                break;
            }
            let header = self.residual.peek(4)?;
            let sub_len =
                u32::from_be_bytes([header[0], header[1], header[2], header[3]]) as usize;
            if !self.residual.has(4 + sub_len) {
                break;
            }
            self.residual.take(4)?;
            let sub = self.residual.take(sub_len)?;
            let data = self.block.decompress(&sub)?;
            if data.len() > self.block_remaining {
                return Err(Error::corrupt_block(
                    "sub-chunk overshoots declared block length",
                ));
            }
            self.block_remaining -= data.len();
            out.extend_from_slice(&data);
        }
        self.residual.check_limit()?;
        Ok(out)
    }

    /// Fails with `TruncatedStream` if an incomplete block remains
    /// pending; succeeds silently otherwise.
    pub fn flush(&mut self) -> Result<()> {
        let remaining = self.residual.remaining();
        if remaining > 0 || self.block_remaining > 0 {
            return Err(Error::TruncatedStream { remaining });
        }
        Ok(())
    }

    /// Single-shot variant for callers holding the entire stream in
    /// memory already. Fails if `input` ends in a partial trailing block.
    pub fn decompress_buffer(input: &[u8]) -> Result<Vec<u8>> {
        let mut dec = Self::new();
        let out = dec.decompress(input)?;
        dec.flush()?;
        Ok(out)
    }
}
