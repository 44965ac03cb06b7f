//! Reference codec capability.
//!
//! The generator and validator never call a compression library directly;
//! they go through [`ReferenceCodec`], which exposes exactly the four
//! operations the harness needs. This keeps the harness logic testable
//! against stub codecs (one that always reports invalid, one that lies about
//! the length, …) without a real compression engine.
//!
//! | Submodule  | Responsibility |
//! |------------|---------------|
//! | [`snappy`] | [`SnappyCodec`] — the shipped reference codec over the raw Snappy format. |
//! | [`walk`]   | Non-allocating structural walk of a raw Snappy stream. |

pub mod snappy;
pub mod walk;

use std::fmt;

pub use snappy::SnappyCodec;

/// Which codec operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecOp {
    Compress,
    UncompressedLength,
    Decompress,
}

impl fmt::Display for CodecOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CodecOp::Compress => "compress",
            CodecOp::UncompressedLength => "uncompressed length",
            CodecOp::Decompress => "decompress",
        })
    }
}

/// Failure reported by a [`ReferenceCodec`] operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecError {
    pub op: CodecOp,
    pub detail: String,
}

impl CodecError {
    pub fn new(op: CodecOp, detail: impl Into<String>) -> Self {
        CodecError { op, detail: detail.into() }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.op, self.detail)
    }
}

impl std::error::Error for CodecError {}

/// The trusted codec the harness calls into.
///
/// Implementations must be deterministic for a given version: compressing
/// the same bytes twice yields byte-identical output.
pub trait ReferenceCodec {
    /// Human-readable codec identity, printed in diagnostics.
    fn name(&self) -> &str;

    /// Compress `input`. Expected to be total; an error aborts the whole run.
    fn compress(&self, input: &[u8]) -> Result<Vec<u8>, CodecError>;

    /// Whether `compressed` is a well-formed stream, without producing output.
    fn is_valid_compressed_buffer(&self, compressed: &[u8]) -> bool;

    /// Uncompressed length declared in the stream header.
    fn uncompressed_length(&self, compressed: &[u8]) -> Result<usize, CodecError>;

    /// Fully decode `compressed`.
    fn decompress(&self, compressed: &[u8]) -> Result<Vec<u8>, CodecError>;
}

impl<C: ReferenceCodec + ?Sized> ReferenceCodec for &C {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn compress(&self, input: &[u8]) -> Result<Vec<u8>, CodecError> {
        (**self).compress(input)
    }

    fn is_valid_compressed_buffer(&self, compressed: &[u8]) -> bool {
        (**self).is_valid_compressed_buffer(compressed)
    }

    fn uncompressed_length(&self, compressed: &[u8]) -> Result<usize, CodecError> {
        (**self).uncompressed_length(compressed)
    }

    fn decompress(&self, compressed: &[u8]) -> Result<Vec<u8>, CodecError> {
        (**self).decompress(compressed)
    }
}
