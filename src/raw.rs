//! Unframed single-shot compression.
//!
//! No chunk headers, no checksums: each call compresses or decompresses
//! one whole buffer as a single block. Calls are independent, so feeding
//! partial buffers incrementally will not reassemble them; only hand this
//! codec complete units it previously produced.

use crate::block::{BlockCompressor, BlockDecompressor};
use crate::error::Result;

/// Direct wrapper around the block primitive.
pub struct RawCodec {
    compressor: BlockCompressor,
    decompressor: BlockDecompressor,
}

impl Default for RawCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl RawCodec {
    pub fn new() -> Self {
        Self {
            compressor: BlockCompressor::new(),
            decompressor: BlockDecompressor::new(),
        }
    }

    /// Compresses `input` as one block with no framing.
    pub fn compress(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        self.compressor.compress(input)
    }

    /// Decompresses one previously produced block. Fails with
    /// `CorruptBlock` on anything else.
    pub fn decompress(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        self.decompressor.decompress(input)
    }

    /// No-op; the codec holds no cross-call state.
    pub fn flush(&mut self) -> Result<Vec<u8>> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_roundtrip() {
        let mut codec = RawCodec::new();
        let input = b"raw codec roundtrip data".repeat(100);
        let compressed = codec.compress(&input).unwrap();
        assert_eq!(codec.decompress(&compressed).unwrap(), input);
    }

    #[test]
    fn test_raw_empty() {
        let mut codec = RawCodec::new();
        let compressed = codec.compress(b"").unwrap();
        assert_eq!(codec.decompress(&compressed).unwrap(), b"");
    }

    #[test]
    fn test_flush_is_noop() {
        let mut codec = RawCodec::new();
        assert!(codec.flush().unwrap().is_empty());
        assert!(codec.flush().unwrap().is_empty());
    }

    #[test]
    fn test_each_call_is_independent() {
        let mut codec = RawCodec::new();
        let a = codec.compress(b"first unit").unwrap();
        let b = codec.compress(b"second unit").unwrap();
        assert_eq!(codec.decompress(&b).unwrap(), b"second unit");
        assert_eq!(codec.decompress(&a).unwrap(), b"first unit");
    }
}
