//! Residual byte buffering shared by the streaming codecs.
//!
//! Both wire formats hand the codec arbitrarily sized byte slices that
//! rarely line up with frame boundaries. `ChunkAssembler` owns the bytes
//! received but not yet resolved into a complete frame, and hands them
//! back in exact-sized pieces once enough have arrived.

use crate::error::{Error, Result};

/// Cap on the unconsumed residual a decompressor will hold between
/// calls. The largest legal framing2 frame is 4 + (2^24 - 1) bytes, so
/// 32 MiB leaves room for any well-formed incomplete frame; input that
/// sits unconsumed past this without ever completing one is rejected as
/// hostile.
pub const DEFAULT_RESIDUAL_LIMIT: usize = 32 << 20;

/// An accumulator for partial input across repeated feed calls.
///
/// Drained bytes are tracked with a read cursor rather than shifted out
/// one `take` at a time; the buffer is compacted once the cursor passes
/// the halfway mark, keeping amortized extra memory O(1) per call.
#[derive(Debug)]
pub struct ChunkAssembler {
    buf: Vec<u8>,
    pos: usize,
    limit: usize,
}

impl Default for ChunkAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl ChunkAssembler {
    /// Creates an empty assembler with the default residual cap.
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_RESIDUAL_LIMIT)
    }

    /// Creates an empty assembler with an explicit residual cap.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            buf: Vec::new(),
            pos: 0,
            limit,
        }
    }

    /// Appends `bytes` to the residual buffer.
    pub fn feed(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// True if at least `n` unconsumed bytes are buffered.
    pub fn has(&self, n: usize) -> bool {
        self.remaining() >= n
    }

    /// Reads `n` bytes without consuming them. Callers must check
    /// [`has`](Self::has) first.
    pub fn peek(&self, n: usize) -> Result<&[u8]> {
        if !self.has(n) {
            return Err(Error::InsufficientData {
                requested: n,
                available: self.remaining(),
            });
        }
        Ok(&self.buf[self.pos..self.pos + n])
    }

    /// Removes and returns the first `n` unconsumed bytes.
    ///
    /// Callers must check [`has`](Self::has) first; `InsufficientData`
    /// here indicates a codec bug, not bad input.
    pub fn take(&mut self, n: usize) -> Result<Vec<u8>> {
        if !self.has(n) {
            return Err(Error::InsufficientData {
                requested: n,
                available: self.remaining(),
            });
        }
        let out = self.buf[self.pos..self.pos + n].to_vec();
        self.pos += n;
        if self.pos >= self.buf.len() {
            self.buf.clear();
            self.pos = 0;
        } else if self.pos > self.buf.len() / 2 {
            self.buf.drain(..self.pos);
            self.pos = 0;
        }
        Ok(out)
    }

    /// Number of unconsumed bytes. Used by flush to detect truncation.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Fails with `ResidualLimitExceeded` if the unconsumed residual has
    /// outgrown the cap. Codecs call this after draining everything a
    /// call's input allows, so a large buffer that parses completely
    /// never trips it.
    pub fn check_limit(&self) -> Result<()> {
        let size = self.remaining();
        if size > self.limit {
            return Err(Error::ResidualLimitExceeded {
                size,
                limit: self.limit,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_take_remainder() {
        let mut asm = ChunkAssembler::new();
        asm.feed(b"hello world");
        assert!(asm.has(5));
        assert_eq!(asm.take(5).unwrap(), b"hello");
        assert_eq!(asm.remaining(), 6);
        assert_eq!(asm.take(6).unwrap(), b" world");
        assert_eq!(asm.remaining(), 0);
        assert!(asm.has(0));
        assert!(!asm.has(1));
    }

    #[test]
    fn test_take_spanning_feeds() {
        let mut asm = ChunkAssembler::new();
        asm.feed(b"ab");
        assert!(!asm.has(4));
        asm.feed(b"cd");
        assert_eq!(asm.take(4).unwrap(), b"abcd");
    }

    #[test]
    fn test_take_too_much_is_insufficient_data() {
        let mut asm = ChunkAssembler::new();
        asm.feed(b"abc");
        match asm.take(4) {
            Err(Error::InsufficientData {
                requested,
                available,
            }) => {
                assert_eq!(requested, 4);
                assert_eq!(available, 3);
            }
            other => panic!("expected InsufficientData, got {:?}", other),
        }
        // The buffer is untouched by the failed take.
        assert_eq!(asm.take(3).unwrap(), b"abc");
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut asm = ChunkAssembler::new();
        asm.feed(b"abcd");
        assert_eq!(asm.peek(2).unwrap(), b"ab");
        assert_eq!(asm.remaining(), 4);
        assert_eq!(asm.take(2).unwrap(), b"ab");
    }

    #[test]
    fn test_residual_limit() {
        let mut asm = ChunkAssembler::with_limit(8);
        asm.feed(b"12345678");
        asm.check_limit().unwrap();
        asm.feed(b"9");
        match asm.check_limit() {
            Err(Error::ResidualLimitExceeded { size, limit }) => {
                assert_eq!(size, 9);
                assert_eq!(limit, 8);
            }
            other => panic!("expected ResidualLimitExceeded, got {:?}", other),
        }
        // Draining makes the residual legal again.
        asm.take(9).unwrap();
        asm.check_limit().unwrap();
    }

    #[test]
    fn test_compaction_keeps_contents() {
        let mut asm = ChunkAssembler::new();
        asm.feed(&[1u8; 100]);
        asm.feed(&[2u8; 100]);
        assert_eq!(asm.take(100).unwrap(), vec![1u8; 100]);
        asm.feed(&[3u8; 10]);
        assert_eq!(asm.take(110).unwrap().len(), 110);
        assert_eq!(asm.remaining(), 0);
    }
}
