//! [`SnappyCodec`] — reference codec over the raw Snappy format.
//!
//! Compression, header decoding, and full decoding are delegated to the
//! `snap` crate's raw (unframed) API. Structural validity is answered by
//! [`walk_stream`], which checks framing and back-references without
//! allocating the decoded output.

use snap::raw::{decompress_len, Decoder, Encoder};

use super::walk::{read_header, walk_stream};
use super::{CodecError, CodecOp, ReferenceCodec};

/// Raw-format Snappy codec. Stateless; a fresh encoder/decoder is built per call.
#[derive(Debug, Default, Clone, Copy)]
pub struct SnappyCodec;

impl SnappyCodec {
    pub const NAME: &'static str = "snappy-raw (snap 1.x)";

    pub const fn new() -> Self {
        SnappyCodec
    }
}

impl ReferenceCodec for SnappyCodec {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>, CodecError> {
        Encoder::new()
            .compress_vec(input)
            .map_err(|e| CodecError::new(CodecOp::Compress, e.to_string()))
    }

    fn is_valid_compressed_buffer(&self, compressed: &[u8]) -> bool {
        walk_stream(compressed).is_ok()
    }

    fn uncompressed_length(&self, compressed: &[u8]) -> Result<usize, CodecError> {
        // `snap` reads an empty buffer as length 0; an empty buffer has no
        // preamble at all, so reject it here first.
        read_header(compressed)
            .map_err(|fault| CodecError::new(CodecOp::UncompressedLength, fault.to_string()))?;
        decompress_len(compressed)
            .map_err(|e| CodecError::new(CodecOp::UncompressedLength, e.to_string()))
    }

    fn decompress(&self, compressed: &[u8]) -> Result<Vec<u8>, CodecError> {
        Decoder::new()
            .decompress_vec(compressed)
            .map_err(|e| CodecError::new(CodecOp::Decompress, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_compresses_to_a_one_byte_preamble() {
        let codec = SnappyCodec::new();
        let out = codec.compress(b"").unwrap();
        assert_eq!(out, vec![0x00]);
        assert!(codec.is_valid_compressed_buffer(&out));
        assert_eq!(codec.uncompressed_length(&out).unwrap(), 0);
    }

    #[test]
    fn empty_buffer_has_no_length() {
        let codec = SnappyCodec::new();
        let err = codec.uncompressed_length(&[]).unwrap_err();
        assert_eq!(err.op, CodecOp::UncompressedLength);
        assert!(!codec.is_valid_compressed_buffer(&[]));
    }

    #[test]
    fn compress_decompress_roundtrip() {
        let codec = SnappyCodec::new();
        let input = b"Hello, World!".repeat(10);
        let out = codec.compress(&input).unwrap();
        assert!(codec.is_valid_compressed_buffer(&out));
        assert_eq!(codec.uncompressed_length(&out).unwrap(), input.len());
        assert_eq!(codec.decompress(&out).unwrap(), input);
    }
}
