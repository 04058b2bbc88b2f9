//! The raw block primitive boundary.
//!
//! A block is a single self-contained compressed buffer with no framing
//! around it. The transform itself comes from the `snap` crate's raw
//! layer; this module wraps its reusable encoder/decoder state and maps
//! its failures into the crate error taxonomy.

use crate::error::Result;

/// Worst-case compressed size for an `n`-byte input, used for buffer
/// sizing by callers that preallocate.
pub fn max_compressed_length(n: usize) -> usize {
    snap::raw::max_compress_len(n)
}

/// Compresses single blocks, reusing the encoder's internal state across
/// calls.
pub struct BlockCompressor {
    encoder: snap::raw::Encoder,
}

impl Default for BlockCompressor {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockCompressor {
    pub fn new() -> Self {
        Self {
            encoder: snap::raw::Encoder::new(),
        }
    }

    /// Compresses `input` as one self-contained block.
    pub fn compress(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        Ok(self.encoder.compress_vec(input)?)
    }
}

/// Decompresses single blocks, reusing the decoder's internal state
/// across calls.
pub struct BlockDecompressor {
    decoder: snap::raw::Decoder,
}

impl Default for BlockDecompressor {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockDecompressor {
    pub fn new() -> Self {
        Self {
            decoder: snap::raw::Decoder::new(),
        }
    }

    /// Decompresses one block. Fails with `CorruptBlock` if `input` is
    /// not a valid compressed block.
    pub fn decompress(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        Ok(self.decoder.decompress_vec(input)?)
    }
}
