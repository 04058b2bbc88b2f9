//! Read/Write pumps that drive the push codecs.
//!
//! These cover the common case of a caller that just wants bytes moved
//! between two I/O endpoints in fixed-size read increments, without
//! touching the codec state machines directly.

use crate::error::Result;
use crate::framing2::{FrameCompressor, FrameDecompressor};
use crate::hadoop::{HadoopCompressor, HadoopDecompressor};
use std::io::{Read, Write};

/// Default read increment for the pump loops.
pub const DEFAULT_READ_SIZE: usize = 65536;

/// Wire format selector for the streaming entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// Self-framed chunked format with stream identifier and checksums.
    Framing2,
    /// Big-endian block format used by the hadoop native codec.
    Hadoop,
}

impl std::str::FromStr for Framing {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "framing2" => Ok(Framing::Framing2),
            "hadoop" => Ok(Framing::Hadoop),
            other => Err(format!("unknown framing format: {other}")),
        }
    }
}

/// A push-based codec: bytes in, zero or more finished bytes out.
///
/// Implemented by the compressors and decompressors of both wire formats
/// so the pump loop below works for all four directions.
pub trait PushCodec {
    /// Feeds one increment of input, returning completed output bytes.
    fn push(&mut self, input: &[u8]) -> Result<Vec<u8>>;

    /// Finalizes the stream, returning any last output bytes. Errors if
    /// buffered input cannot form a valid final unit.
    fn finish(&mut self) -> Result<Vec<u8>>;
}

impl PushCodec for FrameCompressor {
    fn push(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        self.add_chunk(input)
    }

    fn finish(&mut self) -> Result<Vec<u8>> {
        self.flush()
    }
}

impl PushCodec for HadoopCompressor {
    fn push(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        self.add_chunk(input)
    }

    fn finish(&mut self) -> Result<Vec<u8>> {
        self.flush()
    }
}

impl PushCodec for FrameDecompressor {
    fn push(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        self.decompress(input)
    }

    fn finish(&mut self) -> Result<Vec<u8>> {
        self.flush()?;
        Ok(Vec::new())
    }
}

impl PushCodec for HadoopDecompressor {
    fn push(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        self.decompress(input)
    }

    fn finish(&mut self) -> Result<Vec<u8>> {
        self.flush()?;
        Ok(Vec::new())
    }
}

/// Compresses everything readable from `input` into `output`, reading in
/// `bytesize` increments.
pub fn stream_compress<R: Read, W: Write>(
    input: &mut R,
    output: &mut W,
    framing: Framing,
    bytesize: usize,
) -> Result<()> {
    match framing {
        Framing::Framing2 => pump(input, output, &mut FrameCompressor::new(), bytesize),
        Framing::Hadoop => pump(input, output, &mut HadoopCompressor::new(), bytesize),
    }
}

/// Decompresses everything readable from `input` into `output`, reading
/// in `bytesize` increments.
pub fn stream_decompress<R: Read, W: Write>(
    input: &mut R,
    output: &mut W,
    framing: Framing,
    bytesize: usize,
) -> Result<()> {
    match framing {
        Framing::Framing2 => pump(input, output, &mut FrameDecompressor::new(), bytesize),
        Framing::Hadoop => pump(input, output, &mut HadoopDecompressor::new(), bytesize),
    }
}

fn pump<R: Read, W: Write, C: PushCodec>(
    input: &mut R,
    output: &mut W,
    codec: &mut C,
    bytesize: usize,
) -> Result<()> {
    let bytesize = if bytesize == 0 {
        DEFAULT_READ_SIZE
    } else {
        bytesize
    };
    let mut buf = vec![0u8; bytesize];
    loop {
        let n = input.read(&mut buf)?;
        if n == 0 {
            break;
        }
        let out = codec.push(&buf[..n])?;
        if !out.is_empty() {
            output.write_all(&out)?;
        }
    }
    let out = codec.finish()?;
    if !out.is_empty() {
        output.write_all(&out)?;
    }
    output.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn pump_roundtrip(framing: Framing, input: &[u8], bytesize: usize) -> Vec<u8> {
        let mut framed = Vec::new();
        stream_compress(&mut Cursor::new(input), &mut framed, framing, bytesize).unwrap();
        let mut restored = Vec::new();
        stream_decompress(&mut Cursor::new(&framed), &mut restored, framing, bytesize).unwrap();
        restored
    }

    #[test]
    fn test_stream_roundtrip_framing2() {
        let input: Vec<u8> = (0..200_000u32).map(|i| (i % 251) as u8).collect();
        assert_eq!(pump_roundtrip(Framing::Framing2, &input, 8192), input);
    }

    #[test]
    fn test_stream_roundtrip_hadoop() {
        let input: Vec<u8> = (0..200_000u32).map(|i| (i % 13) as u8).collect();
        assert_eq!(pump_roundtrip(Framing::Hadoop, &input, 8192), input);
    }

    #[test]
    fn test_stream_roundtrip_empty() {
        assert_eq!(pump_roundtrip(Framing::Framing2, b"", 4096), b"");
        assert_eq!(pump_roundtrip(Framing::Hadoop, b"", 4096), b"");
    }

    #[test]
    fn test_read_size_does_not_change_output() {
        let input: Vec<u8> = (0..300_000u32).map(|i| (i % 7) as u8).collect();
        for framing in [Framing::Framing2, Framing::Hadoop] {
            let mut whole = Vec::new();
            stream_compress(&mut Cursor::new(&input), &mut whole, framing, input.len()).unwrap();
            let mut tiny = Vec::new();
            stream_compress(&mut Cursor::new(&input), &mut tiny, framing, 1).unwrap();
            assert_eq!(whole, tiny);
        }
    }

    #[test]
    fn test_framing_from_str() {
        assert_eq!("framing2".parse::<Framing>().unwrap(), Framing::Framing2);
        assert_eq!("hadoop".parse::<Framing>().unwrap(), Framing::Hadoop);
        assert!("gzip".parse::<Framing>().is_err());
    }
}
