use proptest::prelude::*;
use snapframe::{
    FrameCompressor, FrameDecompressor, HadoopCompressor, HadoopDecompressor, RawCodec,
};

const MAX_PROPTEST_PAYLOAD_SIZE: usize = 1 << 17;

fn feed_in_pieces<F>(data: &[u8], piece: usize, mut push: F) -> Vec<u8>
where
    F: FnMut(&[u8]) -> snapframe::Result<Vec<u8>>,
{
    let mut out = Vec::new();
    for chunk in data.chunks(piece.max(1)) {
        out.extend_from_slice(&push(chunk).unwrap());
    }
    out
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn framing2_roundtrip(
        ref data in proptest::collection::vec(any::<u8>(), 0..MAX_PROPTEST_PAYLOAD_SIZE),
        piece in 1usize..=8192,
    ) {
        let mut comp = FrameCompressor::new();
        let mut framed = feed_in_pieces(data, piece, |c| comp.add_chunk(c));
        framed.extend_from_slice(&comp.flush().unwrap());

        let mut dec = FrameDecompressor::new();
        let restored = feed_in_pieces(&framed, piece, |c| dec.decompress(c));
        dec.flush().unwrap();
        prop_assert_eq!(&restored, data);
    }

    #[test]
    fn hadoop_roundtrip(
        ref data in proptest::collection::vec(any::<u8>(), 0..MAX_PROPTEST_PAYLOAD_SIZE),
        piece in 1usize..=8192,
    ) {
        let mut comp = HadoopCompressor::new();
        let mut framed = feed_in_pieces(data, piece, |c| comp.add_chunk(c));
        framed.extend_from_slice(&comp.flush().unwrap());

        let mut dec = HadoopDecompressor::new();
        let restored = feed_in_pieces(&framed, piece, |c| dec.decompress(c));
        dec.flush().unwrap();
        prop_assert_eq!(&restored, data);

        // The single-shot variant agrees with the streaming one.
        prop_assert_eq!(&HadoopDecompressor::decompress_buffer(&framed).unwrap(), data);
    }

    #[test]
    fn raw_roundtrip(ref data in proptest::collection::vec(any::<u8>(), 0..MAX_PROPTEST_PAYLOAD_SIZE)) {
        let mut codec = RawCodec::new();
        let compressed = codec.compress(data).unwrap();
        prop_assert_eq!(&codec.decompress(&compressed).unwrap(), data);
    }

    #[test]
    fn framing2_output_independent_of_feed_granularity(
        ref data in proptest::collection::vec(any::<u8>(), 0..MAX_PROPTEST_PAYLOAD_SIZE),
        piece in 1usize..=4096,
    ) {
        let mut whole = FrameCompressor::new();
        let mut expected = whole.add_chunk(data).unwrap();
        expected.extend_from_slice(&whole.flush().unwrap());

        let mut comp = FrameCompressor::new();
        let mut framed = feed_in_pieces(data, piece, |c| comp.add_chunk(c));
        framed.extend_from_slice(&comp.flush().unwrap());
        prop_assert_eq!(framed, expected);
    }

    #[test]
    fn framing2_rejects_arbitrary_garbage_or_reports_truncation(
        ref junk in proptest::collection::vec(any::<u8>(), 1..4096),
    ) {
        // Garbage never round-trips silently into data: either some call
        // errors, or flush reports leftover bytes, or nothing but
        // skippable content was consumed and the output stays empty.
        let mut dec = FrameDecompressor::new();
        match dec.decompress(junk) {
            Err(_) => {}
            Ok(out) => {
                prop_assert!(out.is_empty());
            }
        }
    }
}
